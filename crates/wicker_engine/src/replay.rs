//! Match-value replay.
//!
//! An accepting checkpoint does not carry its match value; it carries a
//! provenance chain back to its registration seed. Replay walks that chain
//! forward, re-consuming the recorded span of input, and runs each
//! transition's [`TreeOp`] on an operand stack of partial [`Tree`]s. The
//! first-recorded provenance link is followed at every hop, so an
//! ambiguous match replays its earliest-discovered derivation.

use wicker_foundation::{Tree, Value};

use crate::automaton::{TransitionKind, TreeOp};
use crate::matches::{Match, MatchTree};
use crate::runner::Runner;

enum Slot {
    /// Sequence frame delimiter pushed by [`TreeOp::Mark`].
    Marker,
    Value(Tree),
}

pub(crate) struct TreeBuilder {
    stack: Vec<Slot>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self { stack: Vec::new() }
    }

    fn pop_value(&mut self) -> Tree {
        match self.stack.pop() {
            Some(Slot::Value(tree)) => tree,
            _ => unreachable!("replay popped past the values of the current frame"),
        }
    }

    pub(crate) fn apply(&mut self, op: TreeOp, item: Option<&Value>) {
        match op {
            TreeOp::Nop => {}
            TreeOp::Mark => self.stack.push(Slot::Marker),
            TreeOp::PushAbsent => self.stack.push(Slot::Value(Tree::Absent)),
            TreeOp::PushList => self.stack.push(Slot::Value(Tree::List(Vec::new()))),
            TreeOp::PushItem => {
                let Some(item) = item else {
                    unreachable!("replay reached a consuming step without an input item");
                };
                self.stack.push(Slot::Value(Tree::Leaf(item.clone())));
            }
            TreeOp::Collect => {
                let mut items = Vec::new();
                loop {
                    match self.stack.pop() {
                        Some(Slot::Marker) => break,
                        Some(Slot::Value(tree)) => items.push(tree),
                        None => unreachable!("replay collected past the bottom of the stack"),
                    }
                }
                items.reverse();
                self.stack.push(Slot::Value(Tree::List(items)));
            }
            TreeOp::Branch(index) => {
                let value = self.pop_value();
                self.stack.push(Slot::Value(Tree::branch(index, value)));
            }
            TreeOp::Accrete => {
                let value = self.pop_value();
                match self.stack.last_mut() {
                    Some(Slot::Value(Tree::List(items))) => items.push(value),
                    _ => unreachable!("replay accreted onto something that is not a list"),
                }
            }
        }
    }

    pub(crate) fn finish(mut self) -> Tree {
        let tree = self.pop_value();
        debug_assert!(self.stack.is_empty(), "replay left operands on the stack");
        tree
    }
}

impl Runner {
    /// Replays the structured match value of `m`.
    ///
    /// The match must come from this runner, and the input span it covers
    /// must not have been retracted since.
    ///
    /// # Panics
    /// Panics if the match's input span has been retracted.
    #[must_use]
    pub fn tree(&self, m: &Match) -> MatchTree {
        // Back-walk from the accepting checkpoint to the seed, following
        // the first-recorded link at every hop.
        let mut steps = Vec::new();
        let mut id = m.checkpoint();
        while let Some(link) = self.checkpoint(id).provenance.first() {
            steps.push((link.kind, link.op));
            id = link.source;
        }
        steps.reverse();

        let mut builder = TreeBuilder::new();
        let mut cursor = m.start();
        let mut i = 0;
        // The trace decomposes into chains: pre ops, at most one consuming
        // op, then post ops.
        while i < steps.len() {
            while i < steps.len() && steps[i].0 == TransitionKind::Pre {
                builder.apply(steps[i].1, None);
                i += 1;
            }
            if i < steps.len() && steps[i].0 == TransitionKind::Normal {
                let item = self
                    .input()
                    .get(cursor)
                    .unwrap_or_else(|| panic!("match span starting at {} was retracted", m.start()));
                builder.apply(steps[i].1, Some(item));
                cursor += 1;
                i += 1;
            }
            while i < steps.len() && steps[i].0 == TransitionKind::Post {
                builder.apply(steps[i].1, None);
                i += 1;
            }
        }
        MatchTree::new(m.clone(), builder.finish())
    }
}
