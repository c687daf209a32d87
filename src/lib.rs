//! Wicker - Incremental pattern matching over streams of typed values
//!
//! This crate re-exports all layers of the Wicker system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: wicker_engine     — Pattern AST, automaton compiler,
//!                              incremental runner, match-tree replay
//! Layer 0: wicker_foundation — Core types (Value, Type, Tree, Error)
//! ```

pub use wicker_engine as engine;
pub use wicker_foundation as foundation;
