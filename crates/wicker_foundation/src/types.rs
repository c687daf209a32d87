//! Runtime type descriptors for typed leaf patterns.

use std::fmt;

use crate::value::Value;

/// Type descriptor for runtime type tests.
///
/// Typed leaf patterns guard their transition with a type test in addition
/// to the caller-supplied predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Vector type.
    Vec,
    /// Any type (admits every value).
    Any,
}

impl Type {
    /// Returns true if this type is `Any`.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Checks whether a value belongs to this type.
    ///
    /// `Any` admits all values; every other descriptor requires an exact
    /// variant match.
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            _ => *self == value.value_type(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Vec => "vec",
            Self::Any => "any",
        };
        write!(f, "{name}")
    }
}
