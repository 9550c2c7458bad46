//! `Term`: the opaque symbolic values that states and goals are built from.
//!
//! State-variable arguments and values are terms: symbols, integers, or
//! tuples of terms. Terms are value types with a total order so they can key
//! `BTreeMap`s, which gives every iteration over argument bindings a
//! deterministic order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque symbolic value.
///
/// The planner never interprets terms; it only clones, compares, and prints
/// them. Domain authors decide what a term means.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A symbolic constant, e.g. `room2` or `b`.
    Sym(String),
    /// An integer constant.
    Int(i64),
    /// A tuple of terms, e.g. `(a b 3)`.
    Tuple(Vec<Term>),
}

impl Term {
    /// Build a symbol term.
    #[must_use]
    pub fn sym(name: impl Into<String>) -> Self {
        Self::Sym(name.into())
    }

    /// The symbol's name, if this term is a symbol.
    #[must_use]
    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Self::Sym(name) => Some(name),
            _ => None,
        }
    }

    /// The integer value, if this term is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Self::Sym(name.to_string())
    }
}

impl From<String> for Term {
    fn from(name: String) -> Self {
        Self::Sym(name)
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sym(name) => write!(f, "{name}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Term::sym("room2").to_string(), "room2");
        assert_eq!(Term::Int(7).to_string(), "7");
        let t = Term::Tuple(vec![Term::sym("a"), Term::sym("b"), Term::Int(3)]);
        assert_eq!(t.to_string(), "(a b 3)");
    }

    #[test]
    fn ordering_is_total_and_stable() {
        let mut terms = vec![Term::Int(2), Term::sym("b"), Term::sym("a"), Term::Int(1)];
        terms.sort();
        assert_eq!(
            terms,
            vec![Term::sym("a"), Term::sym("b"), Term::Int(1), Term::Int(2)]
        );
    }

    #[test]
    fn conversions() {
        assert_eq!(Term::from("b"), Term::sym("b"));
        assert_eq!(Term::from(5), Term::Int(5));
        assert_eq!(Term::sym("x").as_sym(), Some("x"));
        assert_eq!(Term::Int(5).as_int(), Some(5));
        assert_eq!(Term::Int(5).as_sym(), None);
    }
}
