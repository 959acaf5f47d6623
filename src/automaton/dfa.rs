use itertools::Itertools;
use tracing::trace;

use crate::{
    alphabet::{Alphabet, Symbol},
    math::{IndexSet, OrderedMap, OrderedSet},
    operations::{self, ProductIndex},
    reachable::{live_indices, reachable_indices, MinimalRepresentatives, ReachableStates},
    show::transition_table,
    word::FiniteWord,
    Show,
};

use super::{
    Automaton, AutomatonBuilder, DfaDescription, InvalidDescription, State, StateIndex,
    StateTable,
};

/// A deterministic finite automaton (DFA). Every state has at most one successor per symbol,
/// the transition function may however be partial: a word for which some transition is
/// missing along the way is rejected. A word is accepted if reading it from the initial
/// state ends in an accepting state.
///
/// A DFA is built once, either from a [`DfaDescription`] or through [`DFA::builder`], and is
/// never modified afterwards. All operations that combine or transform DFAs produce new
/// values.
#[derive(Clone, PartialEq, Eq)]
pub struct DFA<Q: Ord, S: Ord> {
    alphabet: Alphabet<S>,
    states: StateTable<Q>,
    transitions: Vec<OrderedMap<S, StateIndex>>,
}

impl<Q: State, S: Symbol> DFA<Q, S> {
    /// Instantiates a new [`AutomatonBuilder`] for the state and symbol type of `self`.
    pub fn builder() -> AutomatonBuilder<Q, S> {
        AutomatonBuilder::default()
    }

    /// Builds a DFA from the given description, after verifying that the initial state, the
    /// accepting states and all transition targets are declared.
    pub fn from_description(
        description: DfaDescription<Q, S>,
    ) -> Result<Self, InvalidDescription<Q, S>> {
        description.validate()?;
        let DfaDescription {
            transitions,
            start,
            accepting,
        } = description;

        let states = StateTable::new(transitions.keys(), &start, &accepting);
        let transitions = transitions
            .values()
            .map(|edges| {
                edges
                    .iter()
                    .map(|(sym, target)| {
                        let target = states
                            .index_of(target)
                            .expect("transition targets are validated");
                        (sym.clone(), target)
                    })
                    .collect()
            })
            .collect();
        let dfa = Self::from_parts(states, transitions);
        trace!(
            "built DFA with {} states over alphabet {:?}",
            dfa.size(),
            dfa.alphabet
        );
        Ok(dfa)
    }

    /// Assembles a DFA from its parts, `transitions[q]` holding the edges of the state with
    /// index `q`. The alphabet is derived from the transitions.
    pub(crate) fn from_parts(
        states: StateTable<Q>,
        transitions: Vec<OrderedMap<S, StateIndex>>,
    ) -> Self {
        debug_assert_eq!(states.size(), transitions.len());
        debug_assert!(transitions
            .iter()
            .flat_map(|edges| edges.values())
            .all(|&target| target < states.size()));
        let alphabet = transitions
            .iter()
            .flat_map(|edges| edges.keys().cloned())
            .collect();
        Self {
            alphabet,
            states,
            transitions,
        }
    }

    /// Assembles a DFA from states that are numbered in the order in which some construction
    /// discovered them, `labels[q]` and `transitions[q]` belonging to the state with preliminary
    /// index `q`. The states are renumbered in the order of their labels.
    pub(crate) fn from_discovered(
        labels: Vec<Q>,
        initial: StateIndex,
        accepting: &IndexSet,
        transitions: Vec<OrderedMap<S, StateIndex>>,
    ) -> Self {
        let (states, position) = StateTable::canonical(labels, initial, accepting);
        let mut renumbered = vec![OrderedMap::new(); transitions.len()];
        for (old, edges) in transitions.into_iter().enumerate() {
            renumbered[position[old]] = edges
                .into_iter()
                .map(|(sym, target)| (sym, position[target]))
                .collect();
        }
        Self::from_parts(states, renumbered)
    }

    pub(crate) fn table(&self) -> &StateTable<Q> {
        &self.states
    }

    pub(crate) fn initial_index(&self) -> StateIndex {
        self.states.initial()
    }

    pub(crate) fn edges_from(&self, state: StateIndex) -> &OrderedMap<S, StateIndex> {
        &self.transitions[state]
    }

    pub(crate) fn successor_index(&self, state: StateIndex, symbol: &S) -> Option<StateIndex> {
        self.transitions.get(state)?.get(symbol).copied()
    }

    /// Reads `word` starting in `origin`. This is a plain loop, so arbitrarily long words can
    /// be processed.
    pub(crate) fn run_from<W>(&self, origin: StateIndex, word: &W) -> Option<StateIndex>
    where
        W: FiniteWord<S> + ?Sized,
    {
        let mut current = origin;
        for symbol in word.symbols() {
            current = self.successor_index(current, &symbol)?;
        }
        Some(current)
    }

    /// Returns the successor of `state` on `symbol`, or `None` if there is no such transition
    /// or `state` is not a state of `self`.
    pub fn transition(&self, state: &Q, symbol: &S) -> Option<&Q> {
        let q = self.states.index_of(state)?;
        self.successor_index(q, symbol)
            .map(|p| self.states.label(p))
    }

    /// Returns the state that is reached by reading `word` from the initial state. Gives
    /// back `None` if a transition is missing along the way.
    pub fn reached_state<W: FiniteWord<S> + ?Sized>(&self, word: &W) -> Option<&Q> {
        self.run_from(self.initial_index(), word)
            .map(|q| self.states.label(q))
    }

    /// Returns an iterator over the states that can be reached from the initial state, in
    /// breadth-first order.
    pub fn reachable_states(&self) -> ReachableStates<'_, Q, S> {
        ReachableStates::new(self)
    }

    /// Returns an iterator over the minimal representatives of all reachable states. The
    /// minimal representative of a state is the length-lexicographically least word that
    /// leads to it from the initial state.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_, Q, S> {
        MinimalRepresentatives::new(self)
    }

    /// Keeps only the states with the given indices, dropping all transitions that leave
    /// them. The initial state must be kept.
    pub(crate) fn restrict(&self, keep: &IndexSet) -> Self {
        debug_assert!(keep.contains(self.initial_index()));
        let renumbered: OrderedMap<StateIndex, StateIndex> = keep
            .iter()
            .enumerate()
            .map(|(new, old)| (old, new))
            .collect();
        let labels = renumbered
            .keys()
            .map(|&old| self.states.label(old).clone())
            .collect();
        let accepting = renumbered
            .iter()
            .filter(|(&old, _)| self.states.is_accepting(old))
            .map(|(_, &new)| new)
            .collect();
        let transitions = renumbered
            .keys()
            .map(|&old| {
                self.edges_from(old)
                    .iter()
                    .filter_map(|(sym, target)| {
                        renumbered.get(target).map(|&new| (sym.clone(), new))
                    })
                    .collect()
            })
            .collect();
        Self::from_discovered(
            labels,
            renumbered[&self.initial_index()],
            &accepting,
            transitions,
        )
    }

    /// Returns a new DFA in which all states that cannot be reached from the initial state
    /// are removed. The accepted language does not change.
    pub fn trim(&self) -> Self {
        let reachable: IndexSet = reachable_indices(self).into_iter().collect();
        if reachable.len() < self.size() {
            trace!(
                "trimming {} unreachable states",
                self.size() - reachable.len()
            );
        }
        self.restrict(&reachable)
    }

    /// Removes every dead state, i.e. every state from which no accepting state can be
    /// reached, together with the transitions leading into it. The initial state is kept
    /// even if it is dead. The accepted language does not change.
    pub(crate) fn without_dead_states(&self) -> Self {
        let mut keep = live_indices(self);
        keep.insert(self.initial_index());
        if keep.len() < self.size() {
            trace!("dropping {} dead states", self.size() - keep.len());
        }
        self.restrict(&keep)
    }

    /// Tries to construct a shortest accepted word. If the accepted language is empty, `None`
    /// is returned.
    pub fn give_word(&self) -> Option<Vec<S>> {
        self.minimal_representatives()
            .find_map(|(word, q)| self.state_accepted(q).then_some(word))
    }

    /// Returns true if and only if no word is accepted.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }

    /// Checks whether `self` and `other` accept the same language, by searching their
    /// product for a pair of states on which exactly one of them accepts. Getting stuck
    /// counts as rejecting, so partial automata are compared without completing them.
    pub fn equivalent<P: State>(&self, other: &DFA<P, S>) -> bool {
        operations::cross_padded(self, other, |p, q| {
            let left = p.is_some_and(|p| self.state_accepted(p));
            left != q.is_some_and(|q| other.state_accepted(q))
        })
        .is_empty_language()
    }

    /// Computes the union of `self` and `other` through a product construction, see
    /// [`operations::union`].
    pub fn union<P: State>(
        &self,
        other: &DFA<P, S>,
    ) -> DFA<ProductIndex<Option<Q>, Option<P>>, S> {
        operations::union(self, other)
    }

    /// Computes the intersection of `self` and `other` through a product construction.
    pub fn intersection<P: State>(&self, other: &DFA<P, S>) -> DFA<ProductIndex<Q, P>, S> {
        operations::intersection(self, other)
    }

    /// Computes a DFA accepting the words that `self` accepts and `other` rejects, see
    /// [`operations::minus`].
    pub fn minus<P: State>(
        &self,
        other: &DFA<P, S>,
    ) -> DFA<ProductIndex<Option<Q>, Option<P>>, S> {
        operations::minus(self, other)
    }

    /// Completes `self` over the union of its own alphabet and `alphabet`. Every missing
    /// transition is redirected to a fresh rejecting sink, which is labeled `None` while the
    /// existing states are wrapped in `Some`. The sink is only added if some transition is
    /// actually missing. The accepted language does not change.
    pub fn complete(&self, alphabet: &Alphabet<S>) -> DFA<Option<Q>, S> {
        let alphabet = self.alphabet.union(alphabet);
        let sink = self.size();
        let mut needs_sink = false;

        let mut transitions = Vec::with_capacity(self.size() + 1);
        for edges in &self.transitions {
            let mut completed = OrderedMap::new();
            for sym in alphabet.universe() {
                let target = match edges.get(sym) {
                    Some(&p) => p,
                    None => {
                        needs_sink = true;
                        sink
                    }
                };
                completed.insert(sym.clone(), target);
            }
            transitions.push(completed);
        }

        let mut labels: Vec<Option<Q>> = self.states.labels().cloned().map(Some).collect();
        if needs_sink {
            trace!("completing DFA with {} states adds a sink", self.size());
            labels.push(None);
            transitions.push(alphabet.universe().map(|sym| (sym.clone(), sink)).collect());
        }
        DFA::from_discovered(
            labels,
            self.initial_index(),
            self.states.accepting(),
            transitions,
        )
    }

    /// Gives back the literal description of `self`, from which an equal DFA can be built.
    pub fn to_description(&self) -> DfaDescription<Q, S> {
        let transitions = self
            .states
            .labels()
            .zip(&self.transitions)
            .map(|(q, edges)| {
                let edges = edges
                    .iter()
                    .map(|(sym, &p)| (sym.clone(), self.states.label(p).clone()))
                    .collect();
                (q.clone(), edges)
            })
            .collect();
        DfaDescription {
            transitions,
            start: self.initial().clone(),
            accepting: self.accepting_states().cloned().collect::<OrderedSet<_>>(),
        }
    }

    fn render(&self, colored: bool) -> String {
        let rows = (0..self.size()).map(|q| {
            (
                self.states.label(q).show(),
                q == self.initial_index(),
                self.states.is_accepting(q),
                self.alphabet
                    .universe()
                    .map(|sym| match self.successor_index(q, sym) {
                        Some(p) => self.states.label(p).show(),
                        None => "-".to_string(),
                    })
                    .collect_vec(),
            )
        });
        transition_table(self.alphabet.universe().map(|sym| sym.show()), rows, colored)
    }
}

impl<Q: State, S: Symbol> Automaton for DFA<Q, S> {
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
        self.states.label(self.initial_index())
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
        self.run_from(self.initial_index(), word)
            .is_some_and(|q| self.states.is_accepting(q))
    }
}

impl<Q: State, S: Symbol> TryFrom<DfaDescription<Q, S>> for DFA<Q, S> {
    type Error = InvalidDescription<Q, S>;

    fn try_from(value: DfaDescription<Q, S>) -> Result<Self, Self::Error> {
        Self::from_description(value)
    }
}

impl<Q: State, S: Symbol> Show for DFA<Q, S> {
    fn show(&self) -> String {
        self.render(true)
    }
}

impl<Q: State, S: Symbol> std::fmt::Display for DFA<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

impl<Q: State, S: Symbol> std::fmt::Debug for DFA<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DFA over {:?}\n{}", self.alphabet, self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{ends_in_01, wiki_dfa},
    };

    #[test]
    fn ends_in_01_scenario() {
        let dfa = ends_in_01();
        assert!(dfa.accepts("01"));
        assert!(!dfa.accepts("10"));
        assert!(dfa.accepts("0101"));
        assert!(!dfa.accepts(""));
        assert_eq!(dfa.reached_state("0110"), Some(&"zero"));
    }

    #[test]
    fn core_accessors() {
        let dfa = ends_in_01();
        assert_eq!(dfa.alphabet().universe().collect::<String>(), "01");
        assert_eq!(
            dfa.states().copied().collect::<Vec<_>>(),
            vec!["done", "none", "zero"]
        );
        assert_eq!(dfa.size(), 3);
        assert_eq!(dfa.initial(), &"none");
        assert!(dfa.state_accepted(&"done"));
        assert!(!dfa.state_accepted(&"zero"));
        assert!(!dfa.state_accepted(&"unknown"));
        assert_eq!(dfa.transition(&"zero", &'1'), Some(&"done"));
        assert_eq!(dfa.transition(&"zero", &'2'), None);
        assert_eq!(dfa.transition(&"unknown", &'1'), None);
    }

    #[test]
    fn missing_transition_rejects() {
        let dfa = DFA::builder()
            .with_edges([(0, 'a', 1), (1, 'b', 1)])
            .with_accepting([1])
            .into_dfa(0)
            .unwrap();
        assert!(dfa.accepts("abbb"));
        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts("abab"));
        assert!(!dfa.accepts("ac"));
        assert_eq!(dfa.reached_state("ba"), None);
    }

    #[test]
    fn long_inputs_do_not_recurse() {
        let dfa = ends_in_01();
        let mut word = "1".repeat(1_000_000);
        word.push_str("01");
        assert!(dfa.accepts(&word));
        assert!(!dfa.accepts(&word[..word.len() - 1]));
    }

    #[test]
    fn states_without_edges_and_no_accepting_states() {
        let dfa = DFA::<&str, char>::builder()
            .with_states(["lonely"])
            .into_dfa("lonely")
            .unwrap();
        assert!(dfa.alphabet().is_empty());
        assert!(!dfa.accepts(""));
        assert!(dfa.is_empty_language());
    }

    #[test_log::test]
    fn trim_removes_exactly_unreachable_states() {
        let dfa = DFA::builder()
            .with_edges([(0, 'a', 1), (1, 'a', 0), (2, 'a', 0), (3, 'b', 2)])
            .with_accepting([1, 3])
            .into_dfa(0)
            .unwrap();
        let trimmed = dfa.trim();
        assert_eq!(trimmed.states().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(trimmed.accepting_states().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(trimmed.alphabet().size(), 1);
        for word in ["", "a", "aa", "aaa", "b"] {
            assert_eq!(trimmed.accepts(word), dfa.accepts(word));
        }
    }

    #[test]
    fn dead_states_are_dropped() {
        let dfa = wiki_dfa().without_dead_states();
        assert_eq!(dfa.size(), 5);
        assert_eq!(dfa.transition(&2, &'b'), None);
        assert!(dfa.equivalent(&wiki_dfa()));

        // a dead initial state is kept
        let empty = DFA::builder()
            .with_edges([(0, 'a', 1), (1, 'a', 0)])
            .into_dfa(1)
            .unwrap()
            .without_dead_states();
        assert_eq!(empty.states().copied().collect::<Vec<_>>(), vec![1]);
        assert!(empty.is_empty_language());
    }

    #[test]
    fn give_word_finds_shortest() {
        assert_eq!(wiki_dfa().give_word(), Some(vec!['b']));
        assert_eq!(ends_in_01().give_word(), Some(vec!['0', '1']));
    }

    #[test]
    fn equivalence_of_differently_shaped_dfas() {
        let small = DFA::builder()
            .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 1)])
            .with_accepting([1])
            .into_dfa(0)
            .unwrap();
        let reduced = DFA::builder()
            .with_edges([('x', 'a', 'x'), ('x', 'b', 'y'), ('y', 'a', 'z'), ('y', 'b', 'z')])
            .with_edges([('z', 'a', 'y'), ('z', 'b', 'y')])
            .with_accepting(['y', 'z'])
            .into_dfa('x')
            .unwrap();
        assert!(small.equivalent(&reduced));
        assert!(!small.equivalent(&wiki_dfa()));
    }

    #[test]
    fn equivalence_of_partial_dfas() {
        let just_a = DFA::builder()
            .with_edges([(0, 'a', 1)])
            .with_accepting([1])
            .into_dfa(0)
            .unwrap();
        let with_sink = DFA::builder()
            .with_edges([(0, 'a', 1), (0, 'b', 2), (1, 'a', 2), (1, 'b', 2)])
            .with_edges([(2, 'a', 2), (2, 'b', 2)])
            .with_accepting([1])
            .into_dfa(0)
            .unwrap();
        let also_ab = DFA::builder()
            .with_edges([(0, 'a', 1), (1, 'b', 1)])
            .with_accepting([1])
            .into_dfa(0)
            .unwrap();
        assert!(just_a.equivalent(&with_sink));
        assert!(with_sink.equivalent(&just_a));
        assert!(!just_a.equivalent(&also_ab));
        assert!(!also_ab.equivalent(&just_a));
    }

    #[test]
    fn completion_adds_a_sink_only_when_needed() {
        let partial = DFA::builder()
            .with_edges([(0, 'a', 1), (1, 'b', 1)])
            .with_accepting([1])
            .into_dfa(0)
            .unwrap();
        let complete = partial.complete(&Alphabet::from_iter(['a', 'b', 'c']));
        assert_eq!(complete.size(), 3);
        assert_eq!(complete.alphabet().size(), 3);
        assert_eq!(complete.transition(&Some(0), &'b'), Some(&None));
        assert_eq!(complete.transition(&None, &'a'), Some(&None));
        assert!(!complete.state_accepted(&None));
        for word in ["", "a", "ab", "abbb", "b", "abc", "aa"] {
            assert_eq!(complete.accepts(word), partial.accepts(word), "{word}");
        }

        let wiki = wiki_dfa();
        assert_eq!(wiki.complete(&Alphabet::default()).size(), wiki.size());
    }

    #[test]
    fn description_round_trip() {
        let dfa = wiki_dfa();
        let rebuilt = DFA::from_description(dfa.to_description()).unwrap();
        assert_eq!(rebuilt, dfa);
        assert_eq!(DFA::try_from(dfa.to_description()), Ok(dfa));
    }

    #[test]
    fn display_lists_every_state() {
        let dfa = ends_in_01();
        let rendered = format!("{:?}", dfa);
        for label in ["done", "none", "zero"] {
            assert!(rendered.contains(label));
        }
        assert!(rendered.contains("→"));
    }
}
