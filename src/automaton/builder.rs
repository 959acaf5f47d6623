use crate::{
    alphabet::{Input, Symbol},
    math::{OrderedMap, OrderedSet},
};

use super::{DfaDescription, InvalidDescription, NfaDescription, State, DFA, NFA};

/// Helper struct for the construction of automata. It stores a list of edges, a set of
/// explicitly declared states and a set of accepting states, and can produce both deterministic
/// and non-deterministic automata. Every state that occurs as the source or target of an edge
/// is declared implicitly; the initial state and the accepting states are not, so they must
/// either occur on some edge or be declared through [`AutomatonBuilder::with_states`].
///
/// # Example
///
/// We want to create a DFA with two states `0` and `1` over the alphabet `['a', 'b']`, which
/// moves from `0` to `1` on `b` and back on `a` and loops otherwise. State `0` is initial and
/// state `1` is accepting:
/// ```
/// use finite_automata::prelude::*;
///
/// let dfa = DFA::builder()
///     .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 0), (1, 'b', 1)])
///     .with_accepting([1])
///     .into_dfa(0)
///     .unwrap();
/// assert!(dfa.accepts("aab"));
/// assert!(!dfa.accepts("ba"));
/// ```
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<Q, S> {
    states: OrderedSet<Q>,
    edges: Vec<(Q, Input<S>, Q)>,
    accepting: OrderedSet<Q>,
}

impl<Q: Ord, S> Default for AutomatonBuilder<Q, S> {
    fn default() -> Self {
        Self {
            states: OrderedSet::new(),
            edges: vec![],
            accepting: OrderedSet::new(),
        }
    }
}

impl<Q: State, S: Symbol> AutomatonBuilder<Q, S> {
    /// Declares the given states, which is only necessary for states that do not appear on any edge.
    pub fn with_states<I: IntoIterator<Item = Q>>(mut self, states: I) -> Self {
        self.states.extend(states);
        self
    }

    /// Adds edges given as triples `(source, symbol, target)`.
    pub fn with_edges<I: IntoIterator<Item = (Q, S, Q)>>(mut self, edges: I) -> Self {
        self.edges.extend(
            edges
                .into_iter()
                .map(|(p, sym, q)| (p, Input::Symbol(sym), q)),
        );
        self
    }

    /// Adds epsilon edges given as pairs `(source, target)`. These are only permitted when
    /// building an [`NFA`].
    pub fn with_epsilon_edges<I: IntoIterator<Item = (Q, Q)>>(mut self, edges: I) -> Self {
        self.edges
            .extend(edges.into_iter().map(|(p, q)| (p, Input::Epsilon, q)));
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = Q>>(mut self, states: I) -> Self {
        self.accepting.extend(states);
        self
    }

    fn declared(&self) -> OrderedSet<Q> {
        self.states
            .iter()
            .chain(self.edges.iter().flat_map(|(p, _, q)| [p, q]))
            .cloned()
            .collect()
    }

    /// Assembles a [`DfaDescription`] with the given initial state. Fails if there is an epsilon
    /// edge or if some state has two different successors on the same symbol.
    pub fn into_dfa_description(
        self,
        start: Q,
    ) -> Result<DfaDescription<Q, S>, InvalidDescription<Q, S>> {
        let mut transitions: OrderedMap<Q, OrderedMap<S, Q>> = self
            .declared()
            .into_iter()
            .map(|q| (q, OrderedMap::new()))
            .collect();
        for (from, input, target) in self.edges {
            let Input::Symbol(symbol) = input else {
                return Err(InvalidDescription::EpsilonInDeterministic { from });
            };
            let edges = transitions
                .get_mut(&from)
                .expect("edge sources are declared");
            match edges.get(&symbol) {
                Some(existing) if existing != &target => {
                    return Err(InvalidDescription::Nondeterministic { from, symbol });
                }
                _ => {
                    edges.insert(symbol, target);
                }
            }
        }
        Ok(DfaDescription {
            transitions,
            start,
            accepting: self.accepting,
        })
    }

    /// Assembles an [`NfaDescription`] with the given initial state.
    pub fn into_nfa_description(self, start: Q) -> NfaDescription<Q, S> {
        let mut transitions: OrderedMap<Q, OrderedMap<Input<S>, OrderedSet<Q>>> = self
            .declared()
            .into_iter()
            .map(|q| (q, OrderedMap::new()))
            .collect();
        for (from, input, target) in self.edges {
            transitions
                .get_mut(&from)
                .expect("edge sources are declared")
                .entry(input)
                .or_default()
                .insert(target);
        }
        NfaDescription {
            transitions,
            start,
            accepting: self.accepting,
        }
    }

    /// Builds a [`DFA`] with the given initial state.
    pub fn into_dfa(self, start: Q) -> Result<DFA<Q, S>, InvalidDescription<Q, S>> {
        DFA::from_description(self.into_dfa_description(start)?)
    }

    /// Builds an [`NFA`] with the given initial state.
    pub fn into_nfa(self, start: Q) -> Result<NFA<Q, S>, InvalidDescription<Q, Input<S>>> {
        NFA::from_description(self.into_nfa_description(start))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn builder_declares_edge_endpoints() {
        let description = DFA::builder()
            .with_edges([('p', 0u8, 'q')])
            .with_states(['r'])
            .into_dfa_description('p')
            .unwrap();
        assert_eq!(description.transitions.len(), 3);
        assert!(description.transitions[&'q'].is_empty());
        assert_eq!(description.transitions[&'p'][&0], 'q');
    }

    #[test]
    fn builder_rejects_nondeterminism() {
        let result = DFA::builder()
            .with_edges([(0, 'a', 1), (0, 'a', 2), (1, 'a', 1)])
            .into_dfa(0);
        assert_eq!(
            result.unwrap_err(),
            InvalidDescription::Nondeterministic {
                from: 0,
                symbol: 'a'
            }
        );

        let duplicate = DFA::builder()
            .with_edges([(0, 'a', 1), (0, 'a', 1)])
            .into_dfa(0);
        assert!(duplicate.is_ok());
    }

    #[test]
    fn builder_rejects_epsilon_for_dfa() {
        let builder = AutomatonBuilder::default()
            .with_edges([(0, 'a', 1)])
            .with_epsilon_edges([(1, 0)]);
        assert_eq!(
            builder.clone().into_dfa(0).unwrap_err(),
            InvalidDescription::EpsilonInDeterministic { from: 1 }
        );
        assert!(builder.into_nfa(0).is_ok());
    }

    #[test]
    fn builder_requires_declared_start_and_accepting() {
        assert_eq!(
            DFA::<u32, char>::builder().into_dfa(3).unwrap_err(),
            InvalidDescription::UnknownStart(3)
        );
        assert_eq!(
            NFA::builder()
                .with_edges([(0, 'a', 0)])
                .with_accepting([1])
                .into_nfa(0)
                .unwrap_err(),
            InvalidDescription::UnknownAccepting(1)
        );
    }
}
