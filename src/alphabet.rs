use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::{math::OrderedSet, Show};

/// A symbol is an element of an [`Alphabet`]. Symbols need to be ordered, as the order
/// determines the canonical order in which an alphabet is traversed.
pub trait Symbol: Clone + Eq + Ord + Hash + Debug + Show {}

impl<S: Clone + Eq + Ord + Hash + Debug + Show> Symbol for S {}

/// The label of a transition in a non-deterministic automaton: either a proper symbol, which
/// is consumed when the transition is taken, or epsilon, which consumes no input at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input<S> {
    /// The empty input, the transition is taken without reading anything.
    Epsilon,
    /// A transition that reads the given symbol.
    Symbol(S),
}

impl<S> Input<S> {
    /// Returns the symbol that is read, or `None` for epsilon.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Input::Epsilon => None,
            Input::Symbol(sym) => Some(sym),
        }
    }
}

impl<S> From<S> for Input<S> {
    fn from(value: S) -> Self {
        Input::Symbol(value)
    }
}

impl<S: Show> Show for Input<S> {
    fn show(&self) -> String {
        match self {
            Input::Epsilon => "ε".to_string(),
            Input::Symbol(sym) => sym.show(),
        }
    }
}

/// A finite alphabet, which is simply an ordered collection of symbols. The order on the
/// symbols fixes the order in which [`Alphabet::universe`] yields them, which makes every
/// traversal of an alphabet deterministic. Epsilon is never part of an alphabet.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet<S>(OrderedSet<S>);

impl<S: Ord> Default for Alphabet<S> {
    fn default() -> Self {
        Self(OrderedSet::new())
    }
}

impl<S: Symbol> Alphabet<S> {
    /// Returns an iterator over all symbols of the alphabet in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = &S> + '_ {
        self.0.iter()
    }

    /// Checks whether `symbol` is part of the alphabet.
    pub fn contains(&self, symbol: &S) -> bool {
        self.0.contains(symbol)
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet contains no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Computes the alphabet consisting of the symbols of `self` and those of `other`.
    pub fn union(&self, other: &Alphabet<S>) -> Alphabet<S> {
        Alphabet(self.0.union(&other.0).cloned().collect())
    }
}

impl<S: Symbol> FromIterator<S> for Alphabet<S> {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S: Symbol> Debug for Alphabet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().map(|sym| sym.show()).join(", "))
    }
}
