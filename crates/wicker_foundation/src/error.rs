//! Error types for the Wicker system.
//!
//! Uses `thiserror` for ergonomic error definition.
//!
//! Every variant is a usage error: the caller made an invalid request and
//! must not retry without correcting it. Internal-consistency violations
//! (a replay trace that disagrees with the input buffer) are defects, not
//! errors, and panic instead of appearing here.

use thiserror::Error;

/// Convenient result alias for Wicker operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for Wicker operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A pattern was registered below the runner's current position.
    #[error("cannot register a pattern at position {index} below the current position {pos}")]
    RegistrationBehindCursor {
        /// The requested anchor position.
        index: usize,
        /// The runner's current position.
        pos: usize,
    },

    /// More input was retracted than the runner has seen.
    #[error("cannot retract {requested} items: only {seen} were seen")]
    RetractBeyondHistory {
        /// The number of items the caller asked to drop.
        requested: usize,
        /// The number of items actually available.
        seen: usize,
    },

    /// A path step tried to index a node that cannot be indexed.
    #[error("path step {depth} cannot be applied: {found} is not indexable")]
    NotIndexable {
        /// Zero-based position of the offending step in the path.
        depth: usize,
        /// Short description of the node that was found.
        found: &'static str,
    },

    /// A path index fell outside the list it was applied to.
    #[error("path index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The actual length of the list.
        length: usize,
    },
}
