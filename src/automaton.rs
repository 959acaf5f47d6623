use std::{fmt::Debug, hash::Hash};

use crate::{
    alphabet::{Alphabet, Symbol},
    math::{Bijection, IndexSet},
    word::FiniteWord,
    Show,
};

mod description;
pub use description::{DfaDescription, InvalidDescription, NfaDescription};

mod builder;
pub use builder::AutomatonBuilder;

mod dfa;
pub use dfa::DFA;

mod nfa;
pub use nfa::NFA;

/// A state is an opaque label. Labels have to be comparable and hashable, the order on them
/// determines the order in which states are enumerated.
pub trait State: Clone + Eq + Ord + Hash + Debug + Show {}

impl<Q: Clone + Eq + Ord + Hash + Debug + Show> State for Q {}

/// Internally, the states of an automaton are numbered from `0` to `size - 1` in the order of
/// their labels. A [`StateIndex`] is such a number.
pub type StateIndex = usize;

/// Functionality that deterministic and non-deterministic automata have in common. The two
/// differ in the shape of their transition function, so only the state and alphabet
/// vocabulary as well as acceptance of finite words are shared.
pub trait Automaton {
    /// The type of state labels.
    type State: State;
    /// The type of symbols that are read.
    type Symbol: Symbol;

    /// Returns the alphabet, which consists of all symbols that appear on some transition.
    fn alphabet(&self) -> &Alphabet<Self::Symbol>;

    /// Returns an iterator over all declared states in ascending order of their labels.
    fn states(&self) -> impl Iterator<Item = &Self::State> + '_;

    /// Returns the number of states.
    fn size(&self) -> usize;

    /// Returns the designated initial state.
    fn initial(&self) -> &Self::State;

    /// Returns true if and only if `state` is an accepting state. Gives back `false` for
    /// labels that are not a state of the automaton.
    fn state_accepted(&self, state: &Self::State) -> bool;

    /// Returns an iterator over the accepting states in ascending order of their labels.
    fn accepting_states(&self) -> impl Iterator<Item = &Self::State> + '_;

    /// Decides whether the given finite word is accepted.
    fn accepts<W: FiniteWord<Self::Symbol> + ?Sized>(&self, word: &W) -> bool;
}

/// The states of an automaton: the bijection between labels and indices, the index of the
/// initial state and the set of indices of accepting states.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct StateTable<Q: Ord> {
    labels: Bijection<StateIndex, Q>,
    initial: StateIndex,
    accepting: IndexSet,
}

impl<Q: State> StateTable<Q> {
    /// Numbers the given labels in ascending order. Both `initial` and all elements of `accepting`
    /// must be among `labels`, which the callers guarantee.
    pub(crate) fn new<'a, I, J>(labels: I, initial: &Q, accepting: J) -> Self
    where
        Q: 'a,
        I: IntoIterator<Item = &'a Q>,
        J: IntoIterator<Item = &'a Q>,
    {
        let mut ordered = labels.into_iter().cloned().collect::<Vec<_>>();
        ordered.sort();
        ordered.dedup();
        let labels: Bijection<StateIndex, Q> = ordered.into_iter().enumerate().collect();
        let initial = *labels
            .get_by_right(initial)
            .expect("initial state must be among the labels");
        let accepting = accepting
            .into_iter()
            .filter_map(|q| labels.get_by_right(q).copied())
            .collect();
        Self {
            labels,
            initial,
            accepting,
        }
    }

    /// Builds a table from labels that were numbered in some other order, for example in the
    /// order in which a construction discovered them. `labels[i]` is the label of the state
    /// with preliminary index `i`. Returns the table together with the new position of every
    /// preliminary index, so that transitions can be renumbered accordingly.
    pub(crate) fn canonical(
        labels: Vec<Q>,
        initial: StateIndex,
        accepting: &IndexSet,
    ) -> (Self, Vec<StateIndex>) {
        let mut order = (0..labels.len()).collect::<Vec<_>>();
        order.sort_by(|&l, &r| labels[l].cmp(&labels[r]));
        let mut position = vec![0; labels.len()];
        for (new, &old) in order.iter().enumerate() {
            position[old] = new;
        }

        let accepting = accepting.iter().map(|q| position[q]).collect();
        let labels = labels
            .into_iter()
            .enumerate()
            .map(|(old, label)| (position[old], label))
            .collect();
        let table = Self {
            labels,
            initial: position[initial],
            accepting,
        };
        (table, position)
    }

    pub(crate) fn size(&self) -> usize {
        self.labels.len()
    }

    pub(crate) fn index_of(&self, state: &Q) -> Option<StateIndex> {
        self.labels.get_by_right(state).copied()
    }

    pub(crate) fn label(&self, index: StateIndex) -> &Q {
        self.labels
            .get_by_left(&index)
            .expect("state indices are always in range")
    }

    pub(crate) fn labels(&self) -> impl Iterator<Item = &Q> + '_ {
        (0..self.size()).map(|idx| self.label(idx))
    }

    pub(crate) fn initial(&self) -> StateIndex {
        self.initial
    }

    pub(crate) fn is_accepting(&self, index: StateIndex) -> bool {
        self.accepting.contains(index)
    }

    pub(crate) fn accepting(&self) -> &IndexSet {
        &self.accepting
    }
}
