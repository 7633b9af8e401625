//! 3D generation tool integration.
//!
//! Provides the [`GenerationTool`] trait, an in-process mock, and an HTTP
//! client for a remote generation service.

pub mod api;
pub mod error;
pub mod image;
pub mod tool;

pub use error::GenerationError;
pub use tool::{
    GenerationReceipt, GenerationTool, ImageGeneration, MockTool, ReceiptStatus, RemoteTool,
    TextGeneration,
};
