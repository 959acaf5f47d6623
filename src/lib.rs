//! Library for working with finite automata over finite alphabets.
//!
//! Two kinds of automata are provided. A [`DFA`] has at most one transition per state and
//! symbol, missing transitions simply reject. An [`NFA`] may have any number of transitions
//! per state and symbol and additionally epsilon transitions, which change the state without
//! consuming input. Both are built once from a literal description (see [`DfaDescription`],
//! [`NfaDescription`] and the fluent [`AutomatonBuilder`]) which is validated at construction,
//! and are immutable afterwards.
//!
//! Automata are combined and transformed by operations that never touch their operands and
//! always produce a new, independently owned automaton:
//! - [`operations::cross`] is the generic product construction, parameterized by a predicate
//!   deciding which pairs of states accept, [`operations::cross_padded`] a variant in which a
//!   pair keeps going while one of its components is stuck. [`operations::intersection`] is
//!   an instance of the former, [`operations::union`] and [`operations::minus`] of the latter.
//! - [`minimization::minimize`] removes unreachable states and then collapses language
//!   equivalent states through partition refinement. This is feature gated behind `minimize`.
//! - [`operations::determinize`] turns an [`NFA`] into an equivalent [`DFA`] through the subset
//!   construction, taking epsilon closures into account.
//!
//! Derived automata have structured state labels: a product has states of type
//! [`operations::ProductIndex`] and both minimization and subset construction produce
//! states of type [`operations::StateSet`]. Labels are thus never glued together from
//! strings, and arbitrary source labels cannot collide.
//!
//! ```
//! use finite_automata::prelude::*;
//!
//! let ends_in_01 = DFA::builder()
//!     .with_edges([("a", '0', "b"), ("a", '1', "a"), ("b", '0', "b"), ("b", '1', "c")])
//!     .with_edges([("c", '0', "b"), ("c", '1', "a")])
//!     .with_accepting(["c"])
//!     .into_dfa("a")
//!     .unwrap();
//! assert!(ends_in_01.accepts("0101"));
//! assert!(!ends_in_01.accepts("10"));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use finite_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "minimize")]
    pub use super::minimization::minimize;
    pub use super::{
        alphabet::{Alphabet, Input, Symbol},
        automaton::{
            Automaton, AutomatonBuilder, DfaDescription, InvalidDescription, NfaDescription,
            State, StateIndex, DFA, NFA,
        },
        math,
        operations::{
            cross, cross_padded, determinize, intersection, minus, union, ProductIndex, StateSet,
        },
        reachable::{MinimalRepresentative, MinimalRepresentatives, ReachableStates},
        word::FiniteWord,
        Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets and symbols.
pub mod alphabet;

/// Finite words, i.e. the inputs that automata read.
pub mod word;

mod show;
pub use show::Show;

/// Defines deterministic and non-deterministic automata, the way they are described and the
/// validation that happens when they are built.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::{Automaton, DFA, NFA};

/// Computation of epsilon closures over indexed sets of states.
pub mod closure;

/// Breadth-first exploration of the states that are reachable in a [`DFA`].
pub mod reachable;

/// Operations that build new automata from existing ones: products, quotients and the
/// subset construction.
pub mod operations;

/// Contains the minimization algorithm for [`DFA`]s. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;
