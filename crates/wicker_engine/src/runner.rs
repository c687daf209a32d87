//! Incremental automaton simulation.
//!
//! A [`Runner`] consumes input one item at a time and tracks, per
//! registered pattern, every configuration its automaton can be in. Each
//! configuration is a [`Checkpoint`]: a state, the pattern it belongs to,
//! the position it was anchored at, and the provenance links needed to
//! replay its match value later.
//!
//! Checkpoints live in an append-only arena; per-position buckets index
//! the configurations settled at each input position. Because the arena
//! only grows and every mutation of an older checkpoint is journaled in a
//! merge log, retracting the last `n` items is an exact rewind: truncate
//! the arena to the watermark recorded when position `pos - n` was
//! current, undo the journaled merges above it, and drop the orphaned
//! bucket entries.

use std::sync::Arc;

use log::{debug, trace};
use wicker_foundation::{Error, Result, Value};

use crate::automaton::{Automaton, TransitionKind, TreeOp};
use crate::matches::MatchStream;
use crate::regex::Regex;

/// Index of a checkpoint within the runner's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct CheckpointId(pub(crate) usize);

/// How far through a `PRE* NORMAL? POST*` chain a closure has come.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    /// Still before the consuming move; pre and normal transitions apply.
    Pre,
    /// After the consuming move (or committed to consuming nothing); only
    /// post transitions apply.
    Post,
}

/// One recorded way of reaching a checkpoint.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProvenanceLink {
    /// The checkpoint the transition was taken from.
    pub(crate) source: CheckpointId,
    /// The kind of the transition taken.
    pub(crate) kind: TransitionKind,
    /// The replay instruction of the transition taken.
    pub(crate) op: TreeOp,
}

/// One automaton configuration reached during simulation.
#[derive(Debug)]
pub(crate) struct Checkpoint {
    /// Current automaton state.
    pub(crate) state: usize,
    /// The pattern this configuration simulates, held by identity.
    pub(crate) regex: Arc<Regex>,
    /// The pattern's compiled automaton, cached to avoid re-deriving it.
    pub(crate) automaton: Arc<Automaton>,
    /// Input position the registration was anchored at.
    pub(crate) start: usize,
    /// Position of the bucket this checkpoint belongs to, or would belong
    /// to for intermediates created mid-chain and never settled.
    pub(crate) pos: usize,
    /// Re-decided by [`Runner::filter_registrations`]; a non-live
    /// checkpoint no longer advances but keeps recording history for
    /// replay.
    pub(crate) live: bool,
    /// Ways of reaching this configuration, earliest first. Replay walks
    /// the first link only.
    pub(crate) provenance: Vec<ProvenanceLink>,
}

/// Snapshot of journal lengths taken when an input position was current.
#[derive(Clone, Copy, Debug)]
struct Frame {
    arena_len: usize,
    merge_len: usize,
}

/// The incremental simulator.
///
/// Register patterns with [`add`](Runner::add), feed input with
/// [`advance`](Runner::advance), inspect accepting configurations with
/// [`matches`](Runner::matches), and rewind with
/// [`clear_last`](Runner::clear_last).
#[derive(Debug, Default)]
pub struct Runner {
    arena: Vec<Checkpoint>,
    /// `buckets[p]` holds the checkpoints settled at input position `p`.
    buckets: Vec<Vec<CheckpointId>>,
    /// `frames[p]` snapshots the journals as they were when `pos == p`,
    /// taken just before consuming item `p`.
    frames: Vec<Frame>,
    /// Journal of provenance merges into pre-existing checkpoints:
    /// (target, provenance length before the merge).
    merge_log: Vec<(CheckpointId, usize)>,
    input: Vec<Value>,
    pos: usize,
}

impl Runner {
    /// Creates a runner with no registrations and no input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current input position, which is also the number of items
    /// consumed.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// The input consumed so far, in order.
    #[must_use]
    pub fn input(&self) -> &[Value] {
        &self.input
    }

    /// Whether no live configuration remains at the current position.
    ///
    /// A dead runner can only produce further matches through new
    /// registrations.
    #[must_use]
    pub fn dead(&self) -> bool {
        !self.bucket(self.pos).iter().any(|&id| self.arena[id.0].live)
    }

    /// Registers a pattern anchored at the current position.
    pub fn add(&mut self, regex: &Arc<Regex>) {
        self.register(self.pos, regex);
    }

    /// Registers a pattern anchored at `index`, which must not lie behind
    /// the current position.
    ///
    /// Anchoring ahead of the current position is allowed: the
    /// registration sits dormant until input reaches it.
    ///
    /// # Errors
    /// Returns [`Error::RegistrationBehindCursor`] if `index < self.pos()`.
    pub fn add_at(&mut self, index: usize, regex: &Arc<Regex>) -> Result<()> {
        if index < self.pos {
            return Err(Error::RegistrationBehindCursor {
                index,
                pos: self.pos,
            });
        }
        self.register(index, regex);
        Ok(())
    }

    fn register(&mut self, index: usize, regex: &Arc<Regex>) {
        trace!("registering {regex} at position {index}");
        let automaton = Arc::clone(regex.automaton());
        let seed = CheckpointId(self.arena.len());
        self.arena.push(Checkpoint {
            state: automaton.start(),
            regex: Arc::clone(regex),
            automaton,
            start: index,
            pos: index,
            live: true,
            provenance: Vec::new(),
        });
        // A duplicate registration merges into the existing seed, whose
        // empty-match closure already ran.
        if self.store(index, seed) {
            self.follow(seed, Stage::Pre, None, index);
        }
    }

    /// Consumes one input item, advancing every live configuration at the
    /// current position.
    pub fn advance(&mut self, item: Value) {
        trace!("advancing over {item} at position {}", self.pos);
        self.frames.push(Frame {
            arena_len: self.arena.len(),
            merge_len: self.merge_log.len(),
        });
        let current: Vec<CheckpointId> = self.bucket(self.pos).to_vec();
        let next = self.pos + 1;
        for id in current {
            if self.arena[id.0].live {
                self.follow(id, Stage::Pre, Some(&item), next);
            }
        }
        self.input.push(item);
        self.pos = next;
    }

    /// Consumes a batch of input items in order.
    pub fn advance_all(&mut self, items: impl IntoIterator<Item = Value>) {
        for item in items {
            self.advance(item);
        }
    }

    /// Rewinds the last `n` consumed items exactly.
    ///
    /// Afterwards the runner is indistinguishable from one that stopped
    /// `n` items earlier: checkpoints created since are dropped and
    /// provenance merged into older checkpoints is unwound. Registrations
    /// made at positions inside the rewound span survive only if they were
    /// made before the span was consumed.
    ///
    /// # Errors
    /// Returns [`Error::RetractBeyondHistory`] if `n` exceeds the number
    /// of items consumed.
    pub fn clear_last(&mut self, n: usize) -> Result<()> {
        if n > self.pos {
            return Err(Error::RetractBeyondHistory {
                requested: n,
                seen: self.pos,
            });
        }
        if n == 0 {
            return Ok(());
        }
        let new_pos = self.pos - n;
        let Frame {
            arena_len,
            merge_len,
        } = self.frames[new_pos];
        // Undo journaled merges newest-first; repeated merges into the
        // same target settle on its oldest recorded length.
        for &(target, old_len) in self.merge_log[merge_len..].iter().rev() {
            if target.0 < arena_len {
                self.arena[target.0].provenance.truncate(old_len);
            }
        }
        self.merge_log.truncate(merge_len);
        self.arena.truncate(arena_len);
        for bucket in self.buckets.iter_mut().skip(new_pos + 1) {
            bucket.retain(|id| id.0 < arena_len);
        }
        self.input.truncate(new_pos);
        self.frames.truncate(new_pos);
        self.pos = new_pos;
        debug!("retracted {n} items back to position {new_pos}");
        Ok(())
    }

    /// Re-decides the liveness of every configuration at the current
    /// position: live when `keep` returns true for its pattern identity
    /// and anchor position, non-live otherwise.
    ///
    /// A negative decision can be reversed by calling this again at the
    /// same position. Non-live configurations stop advancing but stay
    /// available as replay sources for matches already found.
    pub fn filter_registrations(&mut self, mut keep: impl FnMut(&Arc<Regex>, usize) -> bool) {
        let current: Vec<CheckpointId> = self.bucket(self.pos).to_vec();
        for id in current {
            let (regex, start) = {
                let cp = &self.arena[id.0];
                (Arc::clone(&cp.regex), cp.start)
            };
            self.arena[id.0].live = keep(&regex, start);
        }
    }

    /// The accepting configurations at the current position.
    #[must_use]
    pub fn matches(&self) -> MatchStream<'_> {
        self.matches_at(self.pos)
    }

    /// The accepting configurations settled at `pos`.
    #[must_use]
    pub fn matches_at(&self, pos: usize) -> MatchStream<'_> {
        MatchStream::new(self, pos)
    }

    pub(crate) fn checkpoint(&self, id: CheckpointId) -> &Checkpoint {
        &self.arena[id.0]
    }

    pub(crate) fn accepting_at(&self, pos: usize) -> impl Iterator<Item = CheckpointId> + '_ {
        self.bucket(pos).iter().copied().filter(|&id| {
            let cp = &self.arena[id.0];
            cp.automaton.is_accepting(cp.state)
        })
    }

    fn bucket(&self, pos: usize) -> &[CheckpointId] {
        self.buckets.get(pos).map_or(&[], Vec::as_slice)
    }

    /// Settles a checkpoint into the bucket at `at`.
    ///
    /// If an identical configuration (same state, same pattern identity,
    /// same anchor) is already settled there, the newcomer's provenance is
    /// merged into it, the merge is journaled, and `false` is returned.
    /// Otherwise the checkpoint is inserted and `true` is returned.
    fn store(&mut self, at: usize, id: CheckpointId) -> bool {
        while self.buckets.len() <= at {
            self.buckets.push(Vec::new());
        }
        let (state, start, regex) = {
            let cp = &self.arena[id.0];
            (cp.state, cp.start, Arc::clone(&cp.regex))
        };
        let existing = self.buckets[at].iter().copied().find(|&other| {
            let cp = &self.arena[other.0];
            cp.state == state && cp.start == start && Regex::same(&cp.regex, &regex)
        });
        match existing {
            Some(target) => {
                let links = std::mem::take(&mut self.arena[id.0].provenance);
                self.merge_log
                    .push((target, self.arena[target.0].provenance.len()));
                self.arena[target.0].provenance.extend(links);
                false
            }
            None => {
                self.buckets[at].push(id);
                true
            }
        }
    }

    /// Explores every transition chain out of `source` for one input step.
    ///
    /// With an item, chains shaped `PRE* NORMAL POST*` consume it; without
    /// one (registration closure), chains shaped `PRE* POST+` settle the
    /// empty progress. Chain ends are settled into the bucket at
    /// `store_at`; a settled configuration whose insertion was fresh is
    /// immediately closed over its own no-input chains, while a merged one
    /// is not, which is what keeps unbounded empty repetition finite.
    fn follow(
        &mut self,
        source: CheckpointId,
        stage: Stage,
        item: Option<&Value>,
        store_at: usize,
    ) {
        let (state, automaton) = {
            let cp = &self.arena[source.0];
            (cp.state, Arc::clone(&cp.automaton))
        };
        let mut continued = false;
        for transition in automaton.transitions(state) {
            let next_stage = match transition.kind {
                TransitionKind::Pre => {
                    if stage == Stage::Post {
                        continue;
                    }
                    Stage::Pre
                }
                TransitionKind::Normal => {
                    let admitted = matches!(item, Some(it) if transition.admits(it));
                    if stage == Stage::Post || !admitted {
                        continue;
                    }
                    Stage::Post
                }
                TransitionKind::Post => {
                    // From the pre stage, taking a post transition means
                    // committing to consume nothing, which is only legal
                    // on a no-input closure.
                    if stage == Stage::Pre && item.is_some() {
                        continue;
                    }
                    Stage::Post
                }
            };
            let next = self.derive(source, transition.target, store_at);
            self.arena[next.0].provenance.push(ProvenanceLink {
                source,
                kind: transition.kind,
                op: transition.op,
            });
            self.follow(next, next_stage, item, store_at);
            continued = true;
        }
        if !continued && stage == Stage::Post && self.store(store_at, source) {
            self.follow(source, Stage::Pre, None, store_at);
        }
    }

    fn derive(&mut self, from: CheckpointId, state: usize, pos: usize) -> CheckpointId {
        let (regex, automaton, start, live) = {
            let cp = &self.arena[from.0];
            (
                Arc::clone(&cp.regex),
                Arc::clone(&cp.automaton),
                cp.start,
                cp.live,
            )
        };
        let id = CheckpointId(self.arena.len());
        self.arena.push(Checkpoint {
            state,
            regex,
            automaton,
            start,
            pos,
            live,
            provenance: Vec::new(),
        });
        id
    }
}
