//! Automaton compiler, incremental runner, and match-tree replay for Wicker.
//!
//! This crate provides:
//! - [`Regex`] - The pattern AST over token values
//! - [`Automaton`] - The compiled transition graph with tree-building
//!   annotations
//! - [`Runner`] - The incremental simulator (add / advance / retract)
//! - [`MatchStream`] / [`MatchSet`] - Accepting matches and selection
//!   policies
//! - [`dsl`] - Construction sugar for building patterns
//!
//! # Overview
//!
//! A [`Regex`] compiles once into an immutable [`Automaton`] shared by every
//! simulation. A [`Runner`] feeds input items one at a time, tracks every
//! reachable configuration per registration, and can retract input exactly.
//! Accepting configurations replay their transition trace into a structured
//! [`MatchTree`] value.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod automaton;
pub mod dsl;
mod matches;
mod regex;
mod replay;
mod runner;

pub use automaton::{Automaton, StateId, Transition, TransitionKind, TreeOp};
pub use matches::{
    Match, MatchSet, MatchStream, MatchTree, match_exactly, matches_anywhere, matches_at_end,
    matches_from_start,
};
pub use regex::{Predicate, Regex};
pub use runner::Runner;
