use std::collections::VecDeque;

use crate::{
    alphabet::Symbol,
    automaton::{State, StateIndex, DFA},
    math::IndexSet,
};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and the label of the state.
pub type MinimalRepresentative<'a, Q, S> = (Vec<S>, &'a Q);

/// Computes the indices of all states that are reachable from the initial state of `dfa` in
/// breadth-first order.
pub(crate) fn reachable_indices<Q: State, S: Symbol>(dfa: &DFA<Q, S>) -> Vec<StateIndex> {
    let mut seen = IndexSet::with_capacity(dfa.table().size());
    let mut order = Vec::new();
    let mut queue = VecDeque::from([dfa.initial_index()]);
    seen.insert(dfa.initial_index());

    while let Some(q) = queue.pop_front() {
        order.push(q);
        for &p in dfa.edges_from(q).values() {
            if seen.insert(p) {
                queue.push_back(p);
            }
        }
    }
    order
}

/// Computes the indices of all states of `dfa` from which some accepting state can be reached.
/// The remaining states are dead, no word leads from them to acceptance.
pub(crate) fn live_indices<Q: State, S: Symbol>(dfa: &DFA<Q, S>) -> IndexSet {
    let size = dfa.table().size();
    let mut predecessors = vec![vec![]; size];
    for q in 0..size {
        for &p in dfa.edges_from(q).values() {
            predecessors[p].push(q);
        }
    }

    let mut live = dfa.table().accepting().clone();
    let mut queue: VecDeque<StateIndex> = live.iter().collect();
    while let Some(p) = queue.pop_front() {
        for &q in &predecessors[p] {
            if live.insert(q) {
                queue.push_back(q);
            }
        }
    }
    live
}

/// Struct that can return the minimal representatives of a [`DFA`]. A minimal representative
/// for a state `q` is the length-lexicographically minimal word with which `q` can be reached
/// from the initial state. As the successors of a state are explored in the order of the
/// symbols, a breadth-first search visits the states in the order of their representatives.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a, Q: State, S: Symbol> {
    dfa: &'a DFA<Q, S>,
    seen: IndexSet,
    queue: VecDeque<(Vec<S>, StateIndex)>,
}

impl<'a, Q: State, S: Symbol> MinimalRepresentatives<'a, Q, S> {
    /// Starts the exploration in the initial state of `dfa`.
    pub fn new(dfa: &'a DFA<Q, S>) -> Self {
        let origin = dfa.initial_index();
        let mut seen = IndexSet::with_capacity(dfa.table().size());
        seen.insert(origin);
        Self {
            dfa,
            seen,
            queue: VecDeque::from([(vec![], origin)]),
        }
    }
}

impl<'a, Q: State, S: Symbol> Iterator for MinimalRepresentatives<'a, Q, S> {
    type Item = MinimalRepresentative<'a, Q, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for (sym, &p) in self.dfa.edges_from(q) {
            if self.seen.insert(p) {
                let mut extended = access.clone();
                extended.push(sym.clone());
                self.queue.push_back((extended, p));
            }
        }
        Some((access, self.dfa.table().label(q)))
    }
}

/// Allows iterating over the reachable states of a [`DFA`] in breadth-first order.
#[derive(Debug, Clone)]
pub struct ReachableStates<'a, Q: State, S: Symbol> {
    dfa: &'a DFA<Q, S>,
    order: std::vec::IntoIter<StateIndex>,
}

impl<'a, Q: State, S: Symbol> ReachableStates<'a, Q, S> {
    /// Explores the states of `dfa` that are reachable from its initial state.
    pub fn new(dfa: &'a DFA<Q, S>) -> Self {
        Self {
            dfa,
            order: reachable_indices(dfa).into_iter(),
        }
    }
}

impl<'a, Q: State, S: Symbol> Iterator for ReachableStates<'a, Q, S> {
    type Item = &'a Q;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next().map(|q| self.dfa.table().label(q))
    }
}
