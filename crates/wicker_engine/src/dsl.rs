//! Construction sugar for patterns.
//!
//! Free functions mirroring the [`Regex`] constructors, plus an
//! [`IntoRegex`] conversion so plain values can stand in for
//! equality-test leaves:
//!
//! ```
//! use wicker_engine::dsl::{choice, eq, one_more, seq};
//! use wicker_engine::match_exactly;
//! use wicker_foundation::Value;
//!
//! let number = one_more(choice(["0", "1"]));
//! let signed = seq([eq("-"), number.clone()]);
//! let input = ["-", "1", "0"].map(Value::from);
//! assert!(!match_exactly(&signed, input).is_empty());
//! ```

use std::sync::Arc;

use wicker_foundation::{Type, Value};

use crate::regex::{Predicate, Regex};

/// Conversion into a pattern node.
///
/// Implemented for pattern handles themselves and for anything convertible
/// to a [`Value`], which becomes an equality-test leaf.
pub trait IntoRegex {
    /// Converts `self` into a pattern node.
    fn into_regex(self) -> Arc<Regex>;
}

impl IntoRegex for Arc<Regex> {
    fn into_regex(self) -> Arc<Regex> {
        self
    }
}

impl IntoRegex for &Arc<Regex> {
    fn into_regex(self) -> Arc<Regex> {
        Arc::clone(self)
    }
}

macro_rules! impl_into_regex_for_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoRegex for $ty {
                fn into_regex(self) -> Arc<Regex> {
                    eq(self)
                }
            }
        )*
    };
}

impl_into_regex_for_values!(Value, bool, i32, i64, f64, &str, String);

/// A leaf accepting exactly the given value.
#[must_use]
pub fn eq(value: impl Into<Value>) -> Arc<Regex> {
    Regex::pred(Predicate::equals(value))
}

/// A leaf accepting any single item.
#[must_use]
pub fn any() -> Arc<Regex> {
    Regex::pred(Predicate::always())
}

/// A leaf accepting a single item satisfying `test`.
#[must_use]
pub fn pred(
    name: impl Into<Arc<str>>,
    test: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> Arc<Regex> {
    Regex::pred(Predicate::new(name, test))
}

/// A leaf accepting a single item of type `tag` satisfying `test`.
#[must_use]
pub fn typed(
    tag: Type,
    name: impl Into<Arc<str>>,
    test: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> Arc<Regex> {
    Regex::typed(tag, Predicate::new(name, test))
}

/// A leaf accepting any single item of type `tag`.
#[must_use]
pub fn of_type(tag: Type) -> Arc<Regex> {
    Regex::typed(tag, Predicate::always())
}

/// An ordered sequence; see [`Regex::seq`].
#[must_use]
pub fn seq<I>(items: I) -> Arc<Regex>
where
    I: IntoIterator,
    I::Item: IntoRegex,
{
    Regex::seq(items.into_iter().map(IntoRegex::into_regex).collect())
}

/// Ordered alternatives; see [`Regex::choice`].
#[must_use]
pub fn choice<I>(items: I) -> Arc<Regex>
where
    I: IntoIterator,
    I::Item: IntoRegex,
{
    Regex::choice(items.into_iter().map(IntoRegex::into_regex).collect())
}

/// Zero or one occurrence; see [`Regex::maybe`].
#[must_use]
pub fn maybe(item: impl IntoRegex) -> Arc<Regex> {
    Regex::maybe(item.into_regex())
}

/// Zero or more occurrences; see [`Regex::zero_more`].
#[must_use]
pub fn zero_more(item: impl IntoRegex) -> Arc<Regex> {
    Regex::zero_more(item.into_regex())
}

/// One or more occurrences; see [`Regex::one_more`].
#[must_use]
pub fn one_more(item: impl IntoRegex) -> Arc<Regex> {
    Regex::one_more(item.into_regex())
}
