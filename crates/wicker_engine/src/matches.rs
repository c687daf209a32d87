//! Accepting matches and selection policies.
//!
//! The engine reports *every* accepting configuration and leaves choosing
//! between them to the caller: [`MatchStream`] views the matches at one
//! position of a live [`Runner`], [`MatchSet`] owns a finished run, and
//! both offer the same small policy surface (first, longest, shortest).
//! The whole-input drivers at the bottom cover the common anchoring modes
//! in one call each.

use std::sync::Arc;

use wicker_foundation::{Result, Step, Tree, Value};

use crate::regex::Regex;
use crate::runner::{CheckpointId, Runner};

/// One accepting configuration: a pattern identity and the input span it
/// covers. Cheap to clone; the match value is replayed on demand via
/// [`Runner::tree`].
#[derive(Clone, Debug)]
pub struct Match {
    regex: Arc<Regex>,
    start: usize,
    end: usize,
    checkpoint: CheckpointId,
}

impl Match {
    pub(crate) fn new(
        regex: Arc<Regex>,
        start: usize,
        end: usize,
        checkpoint: CheckpointId,
    ) -> Self {
        Self {
            regex,
            start,
            end,
            checkpoint,
        }
    }

    /// The pattern that matched, by identity.
    #[must_use]
    pub fn regex(&self) -> &Arc<Regex> {
        &self.regex
    }

    /// Input position the match is anchored at.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Input position just past the last item the match consumed.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of input items the match consumed.
    #[must_use]
    pub const fn span(&self) -> usize {
        self.end - self.start
    }

    pub(crate) const fn checkpoint(&self) -> CheckpointId {
        self.checkpoint
    }
}

/// A match paired with its replayed structured value.
#[derive(Clone, Debug)]
pub struct MatchTree {
    origin: Match,
    value: Tree,
}

impl MatchTree {
    pub(crate) fn new(origin: Match, value: Tree) -> Self {
        Self { origin, value }
    }

    /// The match this value was replayed from.
    #[must_use]
    pub fn origin(&self) -> &Match {
        &self.origin
    }

    /// The structured match value.
    #[must_use]
    pub fn value(&self) -> &Tree {
        &self.value
    }

    /// Consumes the pair, keeping only the value.
    #[must_use]
    pub fn into_value(self) -> Tree {
        self.value
    }

    /// Strict path access into the value; see [`Tree::get`].
    ///
    /// # Errors
    /// Propagates the errors of [`Tree::get`].
    pub fn get(&self, path: &[Step]) -> Result<Tree> {
        self.value.get(path)
    }

    /// Tolerant path access into the value; see [`Tree::probe`].
    ///
    /// # Errors
    /// Propagates the errors of [`Tree::probe`].
    pub fn probe(&self, path: &[Step]) -> Result<Tree> {
        self.value.probe(path)
    }
}

/// The accepting configurations settled at one position of a borrowed
/// [`Runner`].
///
/// All matches in a stream share their end position, so "longest" means
/// earliest anchor. Ties under any policy resolve to the
/// earliest-discovered match.
#[derive(Clone, Copy, Debug)]
pub struct MatchStream<'r> {
    runner: &'r Runner,
    pos: usize,
}

impl<'r> MatchStream<'r> {
    pub(crate) fn new(runner: &'r Runner, pos: usize) -> Self {
        Self { runner, pos }
    }

    /// Iterates the matches in discovery order.
    pub fn iter(self) -> impl Iterator<Item = Match> + 'r {
        let runner = self.runner;
        let pos = self.pos;
        runner.accepting_at(pos).map(move |id| {
            let cp = runner.checkpoint(id);
            Match::new(Arc::clone(&cp.regex), cp.start, cp.pos, id)
        })
    }

    /// Whether there are no matches at this position.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The earliest-discovered match.
    #[must_use]
    pub fn first(&self) -> Option<Match> {
        self.iter().next()
    }

    /// The match covering the most input.
    #[must_use]
    pub fn longest(&self) -> Option<Match> {
        self.iter().fold(None, |best: Option<Match>, m| match best {
            Some(b) if m.span() <= b.span() => Some(b),
            _ => Some(m),
        })
    }

    /// The match covering the least input.
    #[must_use]
    pub fn shortest(&self) -> Option<Match> {
        self.iter().fold(None, |best: Option<Match>, m| match best {
            Some(b) if m.span() >= b.span() => Some(b),
            _ => Some(m),
        })
    }

    /// [`Self::first`] with its value replayed.
    #[must_use]
    pub fn first_tree(&self) -> Option<MatchTree> {
        self.first().map(|m| self.runner.tree(&m))
    }

    /// [`Self::longest`] with its value replayed.
    #[must_use]
    pub fn longest_tree(&self) -> Option<MatchTree> {
        self.longest().map(|m| self.runner.tree(&m))
    }

    /// [`Self::shortest`] with its value replayed.
    #[must_use]
    pub fn shortest_tree(&self) -> Option<MatchTree> {
        self.shortest().map(|m| self.runner.tree(&m))
    }

    /// Replays every match's value, in discovery order.
    pub fn trees(self) -> impl Iterator<Item = MatchTree> + 'r {
        let runner = self.runner;
        self.iter().map(move |m| runner.tree(&m))
    }
}

/// The matches of a finished run, owning the [`Runner`] that produced
/// them.
///
/// Unlike a [`MatchStream`], matches here may end at different positions,
/// so the policies compare spans across positions. Ties resolve to the
/// earliest-discovered match.
#[derive(Debug)]
pub struct MatchSet {
    runner: Runner,
    hits: Vec<Match>,
}

impl MatchSet {
    fn collect(runner: Runner, hits: Vec<Match>) -> Self {
        Self { runner, hits }
    }

    /// The runner that produced these matches, for replay or further
    /// inspection.
    #[must_use]
    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// The matches in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.hits.iter()
    }

    /// Number of matches found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether the run produced no match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The earliest-discovered match.
    #[must_use]
    pub fn first(&self) -> Option<&Match> {
        self.hits.first()
    }

    /// The match covering the most input.
    #[must_use]
    pub fn longest(&self) -> Option<&Match> {
        self.hits
            .iter()
            .fold(None, |best: Option<&Match>, m| match best {
                Some(b) if m.span() <= b.span() => Some(b),
                _ => Some(m),
            })
    }

    /// The match covering the least input.
    #[must_use]
    pub fn shortest(&self) -> Option<&Match> {
        self.hits
            .iter()
            .fold(None, |best: Option<&Match>, m| match best {
                Some(b) if m.span() >= b.span() => Some(b),
                _ => Some(m),
            })
    }

    /// [`Self::first`] with its value replayed.
    #[must_use]
    pub fn first_tree(&self) -> Option<MatchTree> {
        self.first().map(|m| self.runner.tree(m))
    }

    /// [`Self::longest`] with its value replayed.
    #[must_use]
    pub fn longest_tree(&self) -> Option<MatchTree> {
        self.longest().map(|m| self.runner.tree(m))
    }

    /// [`Self::shortest`] with its value replayed.
    #[must_use]
    pub fn shortest_tree(&self) -> Option<MatchTree> {
        self.shortest().map(|m| self.runner.tree(m))
    }

    /// Replays every match's value, in discovery order.
    pub fn trees(&self) -> impl Iterator<Item = MatchTree> + '_ {
        self.hits.iter().map(|m| self.runner.tree(m))
    }
}

/// Matches `regex` against the whole input: anchored at position zero,
/// accepting only at the end.
pub fn match_exactly(regex: &Arc<Regex>, input: impl IntoIterator<Item = Value>) -> MatchSet {
    let mut runner = Runner::new();
    runner.add(regex);
    let mut items = input.into_iter();
    for item in items.by_ref() {
        runner.advance(item);
        if runner.dead() {
            // No match is possible, but the runner still consumes the
            // rest so its input buffer reflects the whole stream.
            runner.advance_all(items);
            return MatchSet::collect(runner, Vec::new());
        }
    }
    let hits = runner.matches().iter().collect();
    MatchSet::collect(runner, hits)
}

/// Matches `regex` anchored at position zero, accepting at any position.
pub fn matches_from_start(regex: &Arc<Regex>, input: impl IntoIterator<Item = Value>) -> MatchSet {
    let mut runner = Runner::new();
    runner.add(regex);
    let mut hits: Vec<Match> = runner.matches().iter().collect();
    let mut items = input.into_iter();
    for item in items.by_ref() {
        runner.advance(item);
        if runner.dead() {
            runner.advance_all(items);
            break;
        }
        hits.extend(runner.matches().iter());
    }
    MatchSet::collect(runner, hits)
}

/// Matches `regex` anchored at any position, accepting only at the end of
/// the input.
pub fn matches_at_end(regex: &Arc<Regex>, input: impl IntoIterator<Item = Value>) -> MatchSet {
    let mut runner = Runner::new();
    runner.add(regex);
    for item in input {
        runner.advance(item);
        runner.add(regex);
    }
    let hits = runner.matches().iter().collect();
    MatchSet::collect(runner, hits)
}

/// Matches `regex` anchored at any position, accepting at any position.
pub fn matches_anywhere(regex: &Arc<Regex>, input: impl IntoIterator<Item = Value>) -> MatchSet {
    let mut runner = Runner::new();
    let mut hits: Vec<Match> = Vec::new();
    for item in input {
        runner.add(regex);
        hits.extend(runner.matches().iter());
        runner.advance(item);
    }
    runner.add(regex);
    hits.extend(runner.matches().iter());
    MatchSet::collect(runner, hits)
}
