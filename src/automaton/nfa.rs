use itertools::Itertools;
use tracing::trace;

use crate::{
    alphabet::{Alphabet, Input, Symbol},
    closure::{epsilon_closure, is_epsilon_closed},
    math::{IndexSet, OrderedMap, OrderedSet},
    operations::{self, StateSet},
    show::transition_table,
    word::FiniteWord,
    Show,
};

use super::{
    Automaton, AutomatonBuilder, InvalidDescription, NfaDescription, State, StateIndex,
    StateTable, DFA,
};

/// A non-deterministic finite automaton (NFA). A state may have any number of successors on
/// a symbol, and it may additionally have epsilon transitions, which are taken without reading
/// any input. A word is accepted if there is some way of reading it from the initial state that
/// ends in an accepting state.
///
/// Acceptance is decided by a single forward sweep over sets of states, so the time needed is
/// linear in the length of the input.
#[derive(Clone, PartialEq, Eq)]
pub struct NFA<Q: Ord, S: Ord> {
    alphabet: Alphabet<S>,
    states: StateTable<Q>,
    transitions: Vec<OrderedMap<S, IndexSet>>,
    epsilon: Vec<IndexSet>,
}

impl<Q: State, S: Symbol> NFA<Q, S> {
    /// Instantiates a new [`AutomatonBuilder`] for the state and symbol type of `self`.
    pub fn builder() -> AutomatonBuilder<Q, S> {
        AutomatonBuilder::default()
    }

    /// Builds an NFA from the given description, after verifying that the initial state, the
    /// accepting states and all transition targets are declared.
    pub fn from_description(
        description: NfaDescription<Q, S>,
    ) -> Result<Self, InvalidDescription<Q, Input<S>>> {
        description.validate()?;
        let NfaDescription {
            transitions: described,
            start,
            accepting,
        } = description;

        let states = StateTable::new(described.keys(), &start, &accepting);
        let indices = |targets: &OrderedSet<Q>| -> IndexSet {
            targets
                .iter()
                .map(|q| {
                    states
                        .index_of(q)
                        .expect("transition targets are validated")
                })
                .collect()
        };

        let mut transitions = Vec::with_capacity(described.len());
        let mut epsilon = Vec::with_capacity(described.len());
        for edges in described.values() {
            let mut on_symbols = OrderedMap::new();
            let mut on_epsilon = IndexSet::new();
            for (input, targets) in edges {
                match input.symbol() {
                    None => on_epsilon.union_with(&indices(targets)),
                    Some(sym) => {
                        on_symbols
                            .entry(sym.clone())
                            .or_insert_with(IndexSet::new)
                            .union_with(&indices(targets));
                    }
                }
            }
            transitions.push(on_symbols);
            epsilon.push(on_epsilon);
        }

        let alphabet = transitions
            .iter()
            .flat_map(|edges: &OrderedMap<S, IndexSet>| edges.keys().cloned())
            .collect();
        let nfa = Self {
            alphabet,
            states,
            transitions,
            epsilon,
        };
        trace!(
            "built NFA with {} states over alphabet {:?}",
            nfa.size(),
            nfa.alphabet
        );
        Ok(nfa)
    }

    pub(crate) fn table(&self) -> &StateTable<Q> {
        &self.states
    }

    /// Computes the epsilon closure of the given state indices.
    pub(crate) fn closure_indices<I>(&self, seeds: I) -> IndexSet
    where
        I: IntoIterator<Item = StateIndex>,
    {
        epsilon_closure(&self.epsilon, seeds)
    }

    /// Collects the targets of all `symbol` transitions leaving some state of `current`.
    /// No epsilon transitions are taken, neither before nor after.
    pub(crate) fn successor_indices(&self, current: &IndexSet, symbol: &S) -> IndexSet {
        let mut successors = IndexSet::new();
        for q in current {
            if let Some(targets) = self.transitions[q].get(symbol) {
                successors.union_with(targets);
            }
        }
        successors
    }

    /// Performs one step of the forward sweep: reads `symbol` from the epsilon closed set
    /// `current` and returns the epsilon closure of the result.
    pub(crate) fn step(&self, current: &IndexSet, symbol: &S) -> IndexSet {
        debug_assert!(is_epsilon_closed(&self.epsilon, current));
        let successors = self.successor_indices(current, symbol);
        self.closure_indices(successors.iter())
    }

    pub(crate) fn initial_closure(&self) -> IndexSet {
        self.closure_indices([self.states.initial()])
    }

    pub(crate) fn contains_accepting(&self, set: &IndexSet) -> bool {
        !set.is_disjoint(self.states.accepting())
    }

    fn labels_of(&self, set: &IndexSet) -> OrderedSet<Q> {
        set.iter().map(|q| self.states.label(q).clone()).collect()
    }

    fn indices_of<'a, I>(&self, states: I) -> IndexSet
    where
        Q: 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        states
            .into_iter()
            .filter_map(|q| self.states.index_of(q))
            .collect()
    }

    /// Returns the set of states that can be reached from `state` by taking one transition
    /// labelled with `input`. No further epsilon transitions are taken. The set is empty if no
    /// such transition is declared or if `state` is unknown.
    pub fn transition(&self, state: &Q, input: &Input<S>) -> OrderedSet<Q> {
        let Some(q) = self.states.index_of(state) else {
            return OrderedSet::new();
        };
        match input.symbol() {
            None => self.labels_of(&self.epsilon[q]),
            Some(sym) => self.transitions[q]
                .get(sym)
                .map(|targets| self.labels_of(targets))
                .unwrap_or_default(),
        }
    }

    /// Computes the epsilon closure of `state`, i.e. the set of all states that can be reached
    /// by taking zero or more epsilon transitions. It always contains `state` itself, unless
    /// `state` is unknown, in which case the closure is empty.
    pub fn epsilon_closure(&self, state: &Q) -> OrderedSet<Q> {
        self.epsilon_closure_of([state])
    }

    /// Computes the union of the epsilon closures of all given states. Unknown labels are ignored.
    pub fn epsilon_closure_of<'a, I>(&self, states: I) -> OrderedSet<Q>
    where
        Q: 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let seeds = self.indices_of(states);
        self.labels_of(&self.closure_indices(seeds.iter()))
    }

    /// Returns all states that can be reached from the epsilon closure of `states` by taking a
    /// single transition on `symbol`. The result is not closed under epsilon transitions.
    pub fn possible_next_states<'a, I>(&self, states: I, symbol: &S) -> OrderedSet<Q>
    where
        Q: 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let seeds = self.indices_of(states);
        let closed = self.closure_indices(seeds.iter());
        self.labels_of(&self.successor_indices(&closed, symbol))
    }

    /// Returns the set of states that `self` can be in after reading `word` from the initial
    /// state, which is closed under epsilon transitions.
    pub fn reached_states<W: FiniteWord<S> + ?Sized>(&self, word: &W) -> OrderedSet<Q> {
        self.labels_of(&self.sweep(word))
    }

    fn sweep<W: FiniteWord<S> + ?Sized>(&self, word: &W) -> IndexSet {
        let mut current = self.initial_closure();
        for symbol in word.symbols() {
            if current.is_empty() {
                break;
            }
            current = self.step(&current, &symbol);
        }
        current
    }

    /// Converts `self` into an equivalent [`DFA`] through the subset construction.
    pub fn to_deterministic(&self) -> DFA<StateSet<Q>, S> {
        operations::determinize(self)
    }

    /// Gives back the literal description of `self`, from which an equal NFA can be built.
    pub fn to_description(&self) -> NfaDescription<Q, S> {
        let transitions = (0..self.size())
            .map(|q| {
                let mut edges: OrderedMap<Input<S>, OrderedSet<Q>> = self.transitions[q]
                    .iter()
                    .map(|(sym, targets)| (Input::Symbol(sym.clone()), self.labels_of(targets)))
                    .collect();
                if !self.epsilon[q].is_empty() {
                    edges.insert(Input::Epsilon, self.labels_of(&self.epsilon[q]));
                }
                (self.states.label(q).clone(), edges)
            })
            .collect();
        NfaDescription {
            transitions,
            start: self.initial().clone(),
            accepting: self.accepting_states().cloned().collect(),
        }
    }

    fn render(&self, colored: bool) -> String {
        let with_epsilon = self.epsilon.iter().any(|targets| !targets.is_empty());
        let header = with_epsilon
            .then(|| Input::<S>::Epsilon.show())
            .into_iter()
            .chain(self.alphabet.universe().map(|sym| sym.show()));
        let rows = (0..self.size()).map(|q| {
            let epsilon = with_epsilon.then(|| self.labels_of(&self.epsilon[q]).show());
            let cells = epsilon
                .into_iter()
                .chain(self.alphabet.universe().map(|sym| {
                    self.transitions[q]
                        .get(sym)
                        .map(|targets| self.labels_of(targets).show())
                        .unwrap_or_else(|| "-".to_string())
                }))
                .collect_vec();
            (
                self.states.label(q).show(),
                q == self.states.initial(),
                self.states.is_accepting(q),
                cells,
            )
        });
        transition_table(header, rows, colored)
    }
}

impl<Q: State, S: Symbol> Automaton for NFA<Q, S> {
    type State = Q;
    type Symbol = S;

    fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    fn states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.states.labels()
    }

    fn size(&self) -> usize {
        self.states.size()
    }

    fn initial(&self) -> &Q {
        self.states.label(self.states.initial())
    }

    fn state_accepted(&self, state: &Q) -> bool {
        self.states
            .index_of(state)
            .is_some_and(|q| self.states.is_accepting(q))
    }

    fn accepting_states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.states.accepting().iter().map(|q| self.states.label(q))
    }

    fn accepts<W: FiniteWord<S> + ?Sized>(&self, word: &W) -> bool {
        self.contains_accepting(&self.sweep(word))
    }
}

impl<Q: State, S: Symbol> TryFrom<NfaDescription<Q, S>> for NFA<Q, S> {
    type Error = InvalidDescription<Q, Input<S>>;

    fn try_from(value: NfaDescription<Q, S>) -> Result<Self, Self::Error> {
        Self::from_description(value)
    }
}

impl<Q: State, S: Symbol> Show for NFA<Q, S> {
    fn show(&self) -> String {
        self.render(true)
    }
}

impl<Q: State, S: Symbol> std::fmt::Display for NFA<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

impl<Q: State, S: Symbol> std::fmt::Debug for NFA<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NFA over {:?}\n{}", self.alphabet, self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use crate::{math::OrderedSet, prelude::*, tests::ends_in_ab_nfa};

    #[test]
    fn epsilon_move_enables_acceptance() {
        let nfa = NFA::builder()
            .with_epsilon_edges([("q0", "q1")])
            .with_edges([("q1", 'a', "q2")])
            .with_accepting(["q2"])
            .into_nfa("q0")
            .unwrap();
        assert!(nfa.transition(&"q0", &Input::Symbol('a')).is_empty());
        assert!(nfa.accepts("a"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("aa"));
    }

    #[test]
    fn accepting_state_reached_through_epsilon_at_the_end() {
        let nfa = NFA::builder()
            .with_edges([(0, 'a', 1)])
            .with_epsilon_edges([(1, 2)])
            .with_accepting([2])
            .into_nfa(0)
            .unwrap();
        assert!(nfa.accepts("a"));
        assert_eq!(nfa.reached_states("a"), OrderedSet::from([1, 2]));
    }

    #[test]
    fn transitions_and_closures() {
        let nfa = ends_in_ab_nfa();
        assert_eq!(
            nfa.transition(&0, &Input::Symbol('a')),
            OrderedSet::from([0, 1])
        );
        assert_eq!(nfa.transition(&1, &Input::Epsilon), OrderedSet::from([4]));
        assert!(nfa.transition(&3, &Input::Symbol('a')).is_empty());
        assert!(nfa.transition(&9, &Input::Epsilon).is_empty());

        assert_eq!(nfa.epsilon_closure(&1), OrderedSet::from([1, 2, 4]));
        assert_eq!(nfa.epsilon_closure(&0), OrderedSet::from([0]));
        assert!(nfa.epsilon_closure(&9).is_empty());
        assert_eq!(
            nfa.epsilon_closure_of(&[0, 4]),
            OrderedSet::from([0, 1, 2, 4])
        );
        assert_eq!(
            nfa.possible_next_states(&[1], &'b'),
            OrderedSet::from([3])
        );
        assert_eq!(
            nfa.possible_next_states(&[0], &'a'),
            OrderedSet::from([0, 1])
        );
    }

    #[test]
    fn epsilon_closure_is_a_fixpoint() {
        let nfa = ends_in_ab_nfa();
        for q in nfa.states() {
            let once = nfa.epsilon_closure(q);
            assert!(once.contains(q));
            assert_eq!(nfa.epsilon_closure_of(&once), once);
        }
    }

    #[test_log::test]
    fn sweep_matches_language() {
        let nfa = ends_in_ab_nfa();
        for (word, expected) in [
            ("", false),
            ("a", false),
            ("ab", true),
            ("bab", true),
            ("abb", false),
            ("aaab", true),
            ("abab", true),
            ("ba", false),
        ] {
            assert_eq!(nfa.accepts(word), expected, "on {word}");
        }
    }

    #[test]
    fn long_inputs_are_swept_iteratively() {
        let nfa = ends_in_ab_nfa();
        let mut word = "ba".repeat(500_000);
        assert!(!nfa.accepts(&word));
        word.push('b');
        assert!(nfa.accepts(&word));
    }

    #[test]
    fn description_round_trip() {
        let nfa = ends_in_ab_nfa();
        let description = nfa.to_description();
        assert_eq!(description.transitions[&1][&Input::Epsilon], OrderedSet::from([4]));
        assert_eq!(NFA::from_description(description), Ok(nfa));
    }

    #[test]
    fn rendering_shows_epsilon_column() {
        let rendered = format!("{:?}", ends_in_ab_nfa());
        assert!(rendered.contains("ε"));
        assert!(rendered.contains("{0, 1}"));
    }
}
