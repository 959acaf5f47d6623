use std::fmt::Debug;

use thiserror::Error;
use tracing::debug;

use crate::{
    alphabet::{Input, Symbol},
    math::{OrderedMap, OrderedSet},
};

use super::State;

/// Reasons why a description of an automaton is rejected upon construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDescription<Q: Debug, S: Debug> {
    /// The designated initial state is not a declared state.
    #[error("initial state {0:?} is not a declared state")]
    UnknownStart(Q),
    /// A state that is marked as accepting is not a declared state.
    #[error("accepting state {0:?} is not a declared state")]
    UnknownAccepting(Q),
    /// Some transition leads to a state that is not declared.
    #[error("transition from {from:?} on {symbol:?} leads to undeclared state {target:?}")]
    UnknownTarget {
        /// The state in which the transition originates.
        from: Q,
        /// The label of the transition.
        symbol: S,
        /// The undeclared target.
        target: Q,
    },
    /// An epsilon transition was given for a deterministic automaton.
    #[error("deterministic automata cannot have epsilon transitions, but {from:?} has one")]
    EpsilonInDeterministic {
        /// The state in which the epsilon transition originates.
        from: Q,
    },
    /// A state has more than one successor on a symbol in what should be a deterministic automaton.
    #[error("state {from:?} has more than one successor on {symbol:?}")]
    Nondeterministic {
        /// The state with multiple successors.
        from: Q,
        /// The symbol on which the successors differ.
        symbol: S,
    },
}

/// A literal description of a deterministic automaton. The declared states are precisely the
/// keys of `transitions`, so a state without outgoing transitions is declared by mapping it to
/// an empty map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaDescription<Q, S> {
    /// Maps each state to its outgoing transitions, given as a map from symbol to target.
    pub transitions: OrderedMap<Q, OrderedMap<S, Q>>,
    /// The initial state.
    pub start: Q,
    /// The accepting states.
    pub accepting: OrderedSet<Q>,
}

/// A literal description of a non-deterministic automaton. As for [`DfaDescription`], the
/// declared states are the keys of `transitions`. Transitions may be labelled with
/// [`Input::Epsilon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaDescription<Q, S> {
    /// Maps each state and label to the set of targets.
    pub transitions: OrderedMap<Q, OrderedMap<Input<S>, OrderedSet<Q>>>,
    /// The initial state.
    pub start: Q,
    /// The accepting states.
    pub accepting: OrderedSet<Q>,
}

fn validate_states<Q: State, S: Symbol, V>(
    transitions: &OrderedMap<Q, V>,
    start: &Q,
    accepting: &OrderedSet<Q>,
) -> Result<(), InvalidDescription<Q, S>> {
    if !transitions.contains_key(start) {
        return Err(InvalidDescription::UnknownStart(start.clone()));
    }
    if let Some(q) = accepting.iter().find(|q| !transitions.contains_key(*q)) {
        return Err(InvalidDescription::UnknownAccepting(q.clone()));
    }
    Ok(())
}

impl<Q: State, S: Symbol> DfaDescription<Q, S> {
    /// Checks that the initial state, all accepting states and all transition targets are declared.
    pub fn validate(&self) -> Result<(), InvalidDescription<Q, S>> {
        validate_states::<_, S, _>(&self.transitions, &self.start, &self.accepting)?;
        for (from, edges) in &self.transitions {
            for (symbol, target) in edges {
                if !self.transitions.contains_key(target) {
                    debug!("rejecting description, {target:?} is not declared");
                    return Err(InvalidDescription::UnknownTarget {
                        from: from.clone(),
                        symbol: symbol.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<Q: State, S: Symbol> NfaDescription<Q, S> {
    /// Checks that the initial state, all accepting states and all transition targets are declared.
    pub fn validate(&self) -> Result<(), InvalidDescription<Q, Input<S>>> {
        validate_states::<_, Input<S>, _>(&self.transitions, &self.start, &self.accepting)?;
        for (from, edges) in &self.transitions {
            for (label, targets) in edges {
                if let Some(target) = targets
                    .iter()
                    .find(|target| !self.transitions.contains_key(*target))
                {
                    debug!("rejecting description, {target:?} is not declared");
                    return Err(InvalidDescription::UnknownTarget {
                        from: from.clone(),
                        symbol: label.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
