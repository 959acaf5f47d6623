pub(crate) mod partition_refinement;

use tracing::debug;

use crate::{
    alphabet::Symbol,
    automaton::{Automaton, State, DFA},
    math::Partition,
    operations::{quotient, StateSet},
};

/// Minimizes `dfa`. Unreachable states are removed first, then the remaining states are
/// grouped into classes of language equivalent states by Moore's partition refinement and
/// every class is collapsed into a single state, labeled with the class.
///
/// A missing transition is treated like one into a dead state, i.e. a state from which no
/// word is accepted. All dead states end up in one class, which is dropped together with the
/// transitions leading into it unless it contains the initial state. The result is thus the
/// smallest DFA for the language of `dfa` and never contains a rejecting sink. Completing it
/// yields the smallest complete DFA, with exactly one state more if any transition is missing.
pub fn minimize<Q: State, S: Symbol>(dfa: &DFA<Q, S>) -> DFA<StateSet<Q>, S> {
    let trimmed = dfa.trim();
    let partition = refine(&trimmed);
    let minimized = quotient(&trimmed, &partition).without_dead_states();
    debug!(
        "minimized DFA with {} states ({} reachable, {} classes) to {} states",
        dfa.size(),
        trimmed.size(),
        partition.size(),
        minimized.size()
    );
    minimized
}

/// Computes the partition of the states of `dfa` into classes of states which cannot be
/// told apart by any word, i.e. from which the same words lead to acceptance. In particular
/// all dead states form a single class. Unreachable states are not removed beforehand, so
/// they appear in the partition as well.
pub fn refine<Q: State, S: Symbol>(dfa: &DFA<Q, S>) -> Partition<Q> {
    let blocks = partition_refinement::moore_partition_refinement(dfa);
    let count = blocks.iter().max().map_or(0, |&max| max + 1);
    let mut classes = vec![vec![]; count];
    for (q, &block) in blocks.iter().enumerate() {
        classes[block].push(dfa.table().label(q).clone());
    }
    Partition::new(classes)
}

impl<Q: State, S: Symbol> DFA<Q, S> {
    /// Builds the minimal DFA accepting the same language as `self`, see [`minimize`].
    pub fn minimize(&self) -> DFA<StateSet<Q>, S> {
        minimize(self)
    }
}
