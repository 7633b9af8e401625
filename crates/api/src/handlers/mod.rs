pub mod generation;
pub mod models;
pub mod samples;
pub mod studio;
