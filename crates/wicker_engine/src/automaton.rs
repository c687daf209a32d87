//! Compiled transition graphs.
//!
//! An [`Automaton`] is an epsilon-NFA whose transitions carry two
//! annotations on top of the usual consuming/non-consuming split:
//!
//! - a [`TransitionKind`] ordering epsilon moves *before*
//!   ([`TransitionKind::Pre`]) or *after* ([`TransitionKind::Post`]) the
//!   consuming move of the same input step, and
//! - a [`TreeOp`] instructing the replay machine how to build the
//!   structured match value.
//!
//! Compilation is the classic fragment construction: every pattern kind
//! produces a fragment with a dedicated start and end state, and sequencing
//! splices fragments by copying the next start's transitions onto the
//! previous end. The single state with no outgoing transitions is the
//! accepting state.

use wicker_foundation::{Type, Value};

use crate::regex::{Kind, Predicate, Regex};

/// Index of a state within its [`Automaton`].
pub type StateId = usize;

/// Where a transition sits relative to the consuming move of one input
/// step.
///
/// Every path through an automaton decomposes into chains shaped
/// `PRE* NORMAL POST*` (one item consumed) or `PRE* POST+` (no item
/// consumed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Epsilon move taken before consuming, opening structure.
    Pre,
    /// The consuming move; the only kind that carries a guard.
    Normal,
    /// Epsilon move taken after consuming, closing structure.
    Post,
}

/// A replay instruction attached to a transition.
///
/// The replay machine runs these over an operand stack of partial trees,
/// in trace order, to rebuild the structured match value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeOp {
    /// Do nothing.
    Nop,
    /// Push a frame marker delimiting a sequence.
    Mark,
    /// Pop values down to the nearest marker into a list.
    Collect,
    /// Wrap the top of the stack in a branch with this alternative index.
    Branch(usize),
    /// Push an empty list.
    PushList,
    /// Push the absent marker.
    PushAbsent,
    /// Push the input item consumed by this transition.
    PushItem,
    /// Pop the top value and append it to the list underneath.
    Accrete,
}

/// The test guarding a consuming transition.
#[derive(Clone, Debug)]
pub(crate) enum Guard {
    /// A bare predicate over the item.
    Free(Predicate),
    /// A type test followed by a predicate over the item.
    Typed(Type, Predicate),
}

impl Guard {
    pub(crate) fn admits(&self, item: &Value) -> bool {
        match self {
            Self::Free(pred) => pred.test(item),
            Self::Typed(tag, pred) => tag.admits(item) && pred.test(item),
        }
    }
}

/// One edge of the transition graph.
#[derive(Clone, Debug)]
pub struct Transition {
    /// The state this transition leads to.
    pub target: StateId,
    /// Pre, normal, or post.
    pub kind: TransitionKind,
    /// The guard of a normal transition; pre and post carry none.
    pub(crate) guard: Option<Guard>,
    /// The replay instruction recorded when this transition is taken.
    pub op: TreeOp,
}

impl Transition {
    /// Whether this transition accepts the given input item.
    ///
    /// Unguarded (pre/post) transitions accept everything.
    #[must_use]
    pub fn admits(&self, item: &Value) -> bool {
        self.guard.as_ref().is_none_or(|g| g.admits(item))
    }
}

#[derive(Debug, Default)]
struct State {
    transitions: Vec<Transition>,
}

/// A compiled, immutable pattern automaton.
///
/// Built once per [`Regex`] node via [`Regex::automaton`] and shared by
/// every simulation; safe to use from multiple threads.
#[derive(Debug)]
pub struct Automaton {
    states: Vec<State>,
    start: StateId,
    end: StateId,
}

impl Automaton {
    pub(crate) fn compile(regex: &Regex) -> Self {
        let mut builder = Builder { states: Vec::new() };
        let (start, end) = builder.fragment(&regex.kind);
        Self {
            states: builder.states,
            start,
            end,
        }
    }

    /// The initial state.
    #[must_use]
    pub const fn start(&self) -> StateId {
        self.start
    }

    /// The accepting state.
    #[must_use]
    pub const fn end(&self) -> StateId {
        self.end
    }

    /// The outgoing transitions of a state, in priority order.
    #[must_use]
    pub fn transitions(&self, state: StateId) -> &[Transition] {
        &self.states[state].transitions
    }

    /// Whether a state accepts, which is exactly having no way out.
    #[must_use]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states[state].transitions.is_empty()
    }

    /// Number of states in the graph, including splice leftovers.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

struct Builder {
    states: Vec<State>,
}

impl Builder {
    fn state(&mut self) -> StateId {
        self.states.push(State::default());
        self.states.len() - 1
    }

    fn pre(&mut self, source: StateId, target: StateId, op: TreeOp) {
        self.states[source].transitions.push(Transition {
            target,
            kind: TransitionKind::Pre,
            guard: None,
            op,
        });
    }

    fn post(&mut self, source: StateId, target: StateId, op: TreeOp) {
        self.states[source].transitions.push(Transition {
            target,
            kind: TransitionKind::Post,
            guard: None,
            op,
        });
    }

    fn normal(&mut self, source: StateId, target: StateId, guard: Guard) {
        self.states[source].transitions.push(Transition {
            target,
            kind: TransitionKind::Normal,
            guard: Some(guard),
            op: TreeOp::PushItem,
        });
    }

    /// Splices `next` onto the tail of `prev` by moving the transitions of
    /// `next`'s start state onto `prev`'s end state. The drained start
    /// state stays in the arena, unreachable.
    fn splice(&mut self, prev_end: StateId, next_start: StateId) {
        let moved = std::mem::take(&mut self.states[next_start].transitions);
        self.states[prev_end].transitions.extend(moved);
    }

    fn fragment(&mut self, kind: &Kind) -> (StateId, StateId) {
        match kind {
            Kind::Seq(items) => {
                let frags: Vec<_> = items.iter().map(|r| self.fragment(&r.kind)).collect();
                for pair in frags.windows(2) {
                    self.splice(pair[0].1, pair[1].0);
                }
                let start = self.state();
                let end = self.state();
                self.pre(start, frags[0].0, TreeOp::Mark);
                self.post(frags[frags.len() - 1].1, end, TreeOp::Collect);
                (start, end)
            }
            Kind::Choice(items) => {
                let start = self.state();
                let end = self.state();
                for (index, item) in items.iter().enumerate() {
                    let (sub_start, sub_end) = self.fragment(&item.kind);
                    self.pre(start, sub_start, TreeOp::Nop);
                    self.post(sub_end, end, TreeOp::Branch(index));
                }
                (start, end)
            }
            Kind::Maybe(item) => {
                let start = self.state();
                let skip = self.state();
                let end = self.state();
                let (sub_start, sub_end) = self.fragment(&item.kind);
                // Skipping path first: an empty match records the absent
                // marker ahead of any consuming attempt.
                self.pre(start, skip, TreeOp::PushAbsent);
                self.post(skip, end, TreeOp::Nop);
                self.pre(start, sub_start, TreeOp::Nop);
                self.post(sub_end, end, TreeOp::Nop);
                (start, end)
            }
            Kind::ZeroMore(item) => {
                let start = self.state();
                let hub = self.state();
                let exit = self.state();
                let end = self.state();
                let (sub_start, sub_end) = self.fragment(&item.kind);
                self.pre(start, hub, TreeOp::PushList);
                // Loop entry is listed before loop exit, so longer
                // repetitions are explored first.
                self.pre(hub, sub_start, TreeOp::Nop);
                self.post(sub_end, hub, TreeOp::Accrete);
                self.pre(hub, exit, TreeOp::Nop);
                self.post(exit, end, TreeOp::Nop);
                (start, end)
            }
            Kind::OneMore(item) => {
                let start = self.state();
                let end = self.state();
                let (sub_start, sub_end) = self.fragment(&item.kind);
                self.pre(start, sub_start, TreeOp::PushList);
                self.post(sub_end, sub_start, TreeOp::Accrete);
                self.post(sub_end, end, TreeOp::Accrete);
                (start, end)
            }
            Kind::Pred(pred) => {
                let start = self.state();
                let end = self.state();
                self.normal(start, end, Guard::Free(pred.clone()));
                (start, end)
            }
            Kind::Typed(tag, pred) => {
                let start = self.state();
                let end = self.state();
                self.normal(start, end, Guard::Typed(*tag, pred.clone()));
                (start, end)
            }
        }
    }
}
