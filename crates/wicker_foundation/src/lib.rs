//! Token values, type descriptors, match trees, and errors for Wicker.
//!
//! This crate provides:
//! - [`Value`] - The dynamic token type the engine matches over
//! - [`Type`] - Runtime type descriptors for typed leaf patterns
//! - [`Tree`] - Structured match values with path access
//! - [`Error`] - Usage-error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod tree;
mod types;
mod value;

pub use error::{Error, Result};
pub use tree::{Step, Tree};
pub use types::Type;
pub use value::Value;
