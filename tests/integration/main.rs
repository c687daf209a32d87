//! End-to-end integration tests.
//!
//! Drives the full stack the way an incremental tokenizer front-end
//! would: patterns over typed tokens, matches arriving as input streams
//! in, and retraction when the upstream buffer is edited.

mod retraction;
