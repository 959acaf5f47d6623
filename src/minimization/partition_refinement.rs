use itertools::Itertools;
use tracing::trace;

use crate::{
    alphabet::Symbol,
    automaton::{Automaton, State, StateIndex, DFA},
    math::Map,
    reachable::live_indices,
};

/// Runs Moore's partition refinement on `dfa` and returns the block of every state, that is
/// the entry at position `q` is the block of the state with index `q`. Blocks are numbered
/// from zero in the order of their smallest state.
///
/// We start with up to three blocks: the accepting states, the rejecting states from which
/// an accepting state can still be reached, and the dead states from which this is not the
/// case. In every round, each state gets a signature consisting of its current block and,
/// for every symbol of the alphabet in ascending order, the block of its successor. A missing
/// transition and a transition into a dead state both yield `None` there, as the automaton
/// rejects from then on either way. States remain in the same block exactly if their
/// signatures coincide. Since the block of a state is part of its signature, a round can only
/// split blocks, so we are done as soon as a round does not increase the number of blocks.
pub(crate) fn moore_partition_refinement<Q: State, S: Symbol>(dfa: &DFA<Q, S>) -> Vec<usize> {
    let symbols = dfa.alphabet().universe().collect_vec();
    let table = dfa.table();
    let live = live_indices(dfa);

    let mut initial_ids: Map<Option<bool>, usize> = Map::default();
    let mut blocks = (0..table.size())
        .map(|q| {
            let fresh = initial_ids.len();
            let kind = live.contains(q).then(|| table.is_accepting(q));
            *initial_ids.entry(kind).or_insert(fresh)
        })
        .collect_vec();
    let mut count = initial_ids.len();

    for round in 1.. {
        let mut ids: Map<(usize, Vec<Option<usize>>), usize> = Map::default();
        let refined = (0..table.size())
            .map(|q: StateIndex| {
                let signature = (
                    blocks[q],
                    symbols
                        .iter()
                        .map(|&sym| {
                            dfa.successor_index(q, sym)
                                .filter(|&p| live.contains(p))
                                .map(|p| blocks[p])
                        })
                        .collect_vec(),
                );
                let fresh = ids.len();
                *ids.entry(signature).or_insert(fresh)
            })
            .collect_vec();
        trace!(
            "refinement round {round} split {count} blocks into {}",
            ids.len()
        );

        blocks = refined;
        if ids.len() == count {
            break;
        }
        count = ids.len();
    }
    blocks
}
