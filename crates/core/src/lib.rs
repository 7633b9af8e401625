//! Domain logic for the forge3d studio.
//!
//! Everything in this crate is synchronous and free of I/O: keyword
//! classification, descriptor construction, primitive tessellation, OBJ
//! export, and the generation helpers shared by the service crates.

pub mod classifier;
pub mod descriptor;
pub mod error;
pub mod generation;
pub mod ids;
pub mod mesh;
pub mod obj;
pub mod samples;
pub mod types;
