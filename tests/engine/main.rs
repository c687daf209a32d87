//! Integration tests for Layer 1: Engine
//!
//! Tests for pattern matching, incremental simulation, and match policies.

mod matching;
mod policies;
