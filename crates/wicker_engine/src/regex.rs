//! The pattern AST.
//!
//! A [`Regex`] is a closed union over exactly seven kinds: two leaf kinds
//! ([`predicate`](Regex::pred) and [`typed`](Regex::typed) tests over token
//! values) and five structural combinators. Nodes are immutable, shared
//! behind [`Arc`], and compared by identity. Each node lazily owns its
//! compiled [`Automaton`], built once and shared by every simulation.

use std::fmt;
use std::sync::{Arc, OnceLock};

use wicker_foundation::{Type, Value};

use crate::automaton::Automaton;

/// A named, shareable test over token values.
///
/// The name only serves diagnostics; two predicates with the same name are
/// still distinct tests.
#[derive(Clone)]
pub struct Predicate {
    name: Arc<str>,
    test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Predicate {
    /// Creates a predicate from a closure.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// A predicate that accepts exactly the given value.
    #[must_use]
    pub fn equals(value: impl Into<Value>) -> Self {
        let value = value.into();
        let name: Arc<str> = format!("{value}").into();
        Self::new(name, move |item| *item == value)
    }

    /// A predicate that accepts every value.
    #[must_use]
    pub fn always() -> Self {
        Self::new("any", |_| true)
    }

    /// Applies the predicate to a token value.
    #[must_use]
    pub fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }

    /// The diagnostic name of this predicate.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}

/// The seven pattern kinds.
#[derive(Debug)]
pub(crate) enum Kind {
    /// Ordered sequence of sub-patterns.
    Seq(Vec<Arc<Regex>>),
    /// Ordered alternatives; the match records which one was taken.
    Choice(Vec<Arc<Regex>>),
    /// Zero or one occurrence.
    Maybe(Arc<Regex>),
    /// Zero or more occurrences.
    ZeroMore(Arc<Regex>),
    /// One or more occurrences.
    OneMore(Arc<Regex>),
    /// A single token satisfying a predicate.
    Pred(Predicate),
    /// A single token of a given type satisfying a predicate.
    Typed(Type, Predicate),
}

/// A pattern over streams of token values.
///
/// Build instances through the constructors below or the [`crate::dsl`]
/// sugar. `Regex` values are always handled as `Arc<Regex>`: registrations
/// and match results identify their pattern by pointer identity.
pub struct Regex {
    pub(crate) kind: Kind,
    compiled: OnceLock<Arc<Automaton>>,
}

impl Regex {
    fn wrap(kind: Kind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            compiled: OnceLock::new(),
        })
    }

    /// An ordered sequence of sub-patterns. Matches a list.
    ///
    /// # Panics
    /// Panics if `items` is empty.
    #[must_use]
    pub fn seq(items: Vec<Arc<Regex>>) -> Arc<Self> {
        assert!(!items.is_empty(), "a sequence needs at least one item");
        Self::wrap(Kind::Seq(items))
    }

    /// Ordered alternatives. Matches a branch recording the alternative
    /// taken.
    ///
    /// # Panics
    /// Panics if `items` is empty.
    #[must_use]
    pub fn choice(items: Vec<Arc<Regex>>) -> Arc<Self> {
        assert!(!items.is_empty(), "a choice needs at least one alternative");
        Self::wrap(Kind::Choice(items))
    }

    /// Zero or one occurrence. Matches the sub-value or the absent marker.
    #[must_use]
    pub fn maybe(item: Arc<Regex>) -> Arc<Self> {
        Self::wrap(Kind::Maybe(item))
    }

    /// Zero or more occurrences. Matches a possibly-empty list.
    #[must_use]
    pub fn zero_more(item: Arc<Regex>) -> Arc<Self> {
        Self::wrap(Kind::ZeroMore(item))
    }

    /// One or more occurrences. Matches a non-empty list.
    #[must_use]
    pub fn one_more(item: Arc<Regex>) -> Arc<Self> {
        Self::wrap(Kind::OneMore(item))
    }

    /// A single token satisfying `pred`. Matches the raw token.
    #[must_use]
    pub fn pred(pred: Predicate) -> Arc<Self> {
        Self::wrap(Kind::Pred(pred))
    }

    /// A single token of type `tag` satisfying `pred`. Matches the raw
    /// token.
    #[must_use]
    pub fn typed(tag: Type, pred: Predicate) -> Arc<Self> {
        Self::wrap(Kind::Typed(tag, pred))
    }

    /// The compiled automaton for this pattern, compiling on first use.
    ///
    /// The automaton is immutable once built and shared by every
    /// simulation of this node.
    #[must_use]
    pub fn automaton(self: &Arc<Self>) -> &Arc<Automaton> {
        self.compiled
            .get_or_init(|| Arc::new(Automaton::compile(self)))
    }

    /// Whether two patterns are the same registration target.
    ///
    /// Patterns compare by identity, never structurally.
    #[must_use]
    pub fn same(a: &Arc<Regex>, b: &Arc<Regex>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn joined(f: &mut fmt::Formatter<'_>, items: &[Arc<Regex>], sep: &str) -> fmt::Result {
            write!(f, "(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, "{sep}")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, ")")
        }
        match &self.kind {
            Kind::Seq(items) => joined(f, items, " "),
            Kind::Choice(items) => joined(f, items, " | "),
            Kind::Maybe(item) => write!(f, "{item}?"),
            Kind::ZeroMore(item) => write!(f, "{item}*"),
            Kind::OneMore(item) => write!(f, "{item}+"),
            Kind::Pred(p) => write!(f, "{}", p.name()),
            Kind::Typed(tag, p) => write!(f, "{}:{tag}", p.name()),
        }
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
