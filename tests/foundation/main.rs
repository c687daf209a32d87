//! Integration tests for Layer 0: Foundation
//!
//! Tests for token values, type descriptors, and structured match trees.

mod values;
