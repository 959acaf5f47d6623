use itertools::Itertools;
use tracing::debug;

use crate::{
    alphabet::Symbol,
    automaton::{Automaton, State, StateIndex, DFA, NFA},
    math::{IndexSet, Map, OrderedMap, OrderedSet},
    Show,
};

/// A set of states, which is used as the state label of automata whose states group together
/// states of some other automaton. This is the case for the subset construction, where a
/// state is the set of states the nondeterministic automaton can be in, and for minimization,
/// where a state is a class of language equivalent states.
///
/// The elements are kept sorted, so two sets with the same elements are equal no matter in
/// which order the elements were collected.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet<Q: Ord>(OrderedSet<Q>);

impl<Q: Ord> StateSet<Q> {
    /// Creates a set containing only `q`.
    pub fn singleton(q: Q) -> Self {
        Self(OrderedSet::from([q]))
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Q> + '_ {
        self.0.iter()
    }

    /// Returns true if `q` is an element.
    pub fn contains(&self, q: &Q) -> bool {
        self.0.contains(q)
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no elements, for the subset construction this is the state
    /// from which nothing is accepted anymore.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<Q: Ord> Default for StateSet<Q> {
    fn default() -> Self {
        Self(OrderedSet::new())
    }
}

impl<Q: Ord> Extend<Q> for StateSet<Q> {
    fn extend<T: IntoIterator<Item = Q>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl<Q: Ord> IntoIterator for StateSet<Q> {
    type IntoIter = std::collections::btree_set::IntoIter<Q>;
    type Item = Q;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<Q: Ord> FromIterator<Q> for StateSet<Q> {
    fn from_iter<T: IntoIterator<Item = Q>>(iter: T) -> Self {
        Self(OrderedSet::from_iter(iter))
    }
}

impl<Q: Ord, const N: usize> From<[Q; N]> for StateSet<Q> {
    fn from(value: [Q; N]) -> Self {
        Self::from_iter(value)
    }
}

impl<Q: Ord + std::fmt::Debug> std::fmt::Debug for StateSet<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{{{}}}", self.iter().map(|q| format!("{q:?}")).join(", "))
        }
    }
}

impl<Q: Ord + Show> Show for StateSet<Q> {
    fn show(&self) -> String {
        if self.0.is_empty() {
            "∅".to_string()
        } else {
            Q::show_collection(self.iter())
        }
    }
}

/// Turns `nfa` into an equivalent [`DFA`] by means of the subset construction. Each state of
/// the result is the set of states that `nfa` can be in after reading some word, closed under
/// epsilon transitions. The initial state is the epsilon closure of the initial state of
/// `nfa` and a set is accepting if it contains an accepting state of `nfa`.
///
/// Only sets that are reachable from the initial one are constructed. Every reachable set has
/// a transition on every symbol of the alphabet of `nfa`; if no state of a set has a
/// transition on some symbol, the target is the empty set. The empty set is then a rejecting
/// state that loops on every symbol.
pub fn determinize<Q: State, S: Symbol>(nfa: &NFA<Q, S>) -> DFA<StateSet<Q>, S> {
    let initial = nfa.initial_closure();
    let mut ids: Map<Vec<StateIndex>, StateIndex> = Map::default();
    ids.insert(initial.iter().collect(), 0);
    let mut sets = vec![initial];
    let mut transitions: Vec<OrderedMap<S, StateIndex>> = vec![];

    // as for products, everything in `sets` after `transitions.len()` is yet to be explored
    while transitions.len() < sets.len() {
        let current = sets[transitions.len()].clone();
        let mut edges = OrderedMap::new();
        for sym in nfa.alphabet().universe() {
            let successor = nfa.step(&current, sym);
            let key = successor.iter().collect::<Vec<_>>();
            let target = match ids.get(&key) {
                Some(&id) => id,
                None => {
                    let id = sets.len();
                    ids.insert(key, id);
                    sets.push(successor);
                    id
                }
            };
            edges.insert(sym.clone(), target);
        }
        transitions.push(edges);
    }

    let accepting: IndexSet = sets
        .iter()
        .enumerate()
        .filter(|(_, set)| nfa.contains_accepting(set))
        .map(|(id, _)| id)
        .collect();
    let labels = sets
        .iter()
        .map(|set| {
            set.iter()
                .map(|q| nfa.table().label(q).clone())
                .collect::<StateSet<_>>()
        })
        .collect::<Vec<_>>();
    debug!(
        "subset construction turned NFA with {} states into DFA with {} states, {} accepting",
        nfa.size(),
        labels.len(),
        accepting.len()
    );

    DFA::from_discovered(labels, 0, &accepting, transitions)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{
        prelude::*,
        tests::{ends_in_01, ends_in_ab_nfa},
    };

    #[test_log::test]
    fn determinized_epsilon_nfa() {
        let nfa = NFA::builder()
            .with_edges([(0, 'a', 1), (2, 'b', 3)])
            .with_epsilon_edges([(1, 2)])
            .with_accepting([3])
            .into_nfa(0)
            .unwrap();
        let dfa = determinize(&nfa);
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts("abb"));

        assert_eq!(dfa.initial(), &StateSet::singleton(0));
        assert_eq!(dfa.reached_state("a"), Some(&StateSet::from([1, 2])));
        assert_eq!(dfa.reached_state("ab"), Some(&StateSet::from([3])));
        // every state has a transition on every symbol, dead ends lead to the empty set
        assert_eq!(dfa.reached_state("b"), Some(&StateSet::default()));
        assert_eq!(dfa.reached_state("bbab"), Some(&StateSet::default()));
        assert!(!dfa.state_accepted(&StateSet::default()));
    }

    #[test]
    fn epsilon_cycles_terminate() {
        let nfa = ends_in_ab_nfa();
        let dfa = nfa.to_deterministic();
        for length in 0..=6 {
            for word in std::iter::repeat(['a', 'b'])
                .take(length)
                .multi_cartesian_product()
            {
                assert_eq!(dfa.accepts(&word), nfa.accepts(&word), "{word:?}");
            }
        }
        assert_eq!(
            dfa.initial(),
            &StateSet::singleton(0),
            "the initial state has no epsilon transitions"
        );
        assert_eq!(
            dfa.reached_state("a"),
            Some(&StateSet::from([0, 1, 2, 4]))
        );
    }

    #[test]
    fn same_language_as_hand_written_dfa() {
        let nfa = NFA::builder()
            .with_edges([('s', '0', 's'), ('s', '1', 's'), ('s', '0', 't'), ('t', '1', 'u')])
            .with_accepting(['u'])
            .into_nfa('s')
            .unwrap();
        let dfa = determinize(&nfa);
        assert!(dfa.equivalent(&ends_in_01()));
        assert!(dfa.size() <= 1 << nfa.size());
        assert_eq!(dfa.size(), 3);
    }

    #[test]
    fn state_set_rendering() {
        assert_eq!(format!("{:?}", StateSet::<u32>::default()), "∅");
        assert_eq!(format!("{:?}", StateSet::from([2, 1])), "{1, 2}");
        assert_eq!(StateSet::from(['q', 'p']).show(), "{p, q}");
        assert_eq!(StateSet::<char>::default().show(), "∅");
    }
}
