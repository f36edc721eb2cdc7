//! `stockroom-core`: shared building blocks.
//!
//! This crate contains **pure** primitives used by the catalog read model and
//! the console (no IO, no HTTP, no rendering).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
