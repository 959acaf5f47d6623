use itertools::Itertools;
use tracing::trace;

use crate::{
    alphabet::Symbol,
    automaton::{State, StateIndex, DFA},
    math::{IndexSet, OrderedMap, Partition},
};

use super::StateSet;

/// Builds the quotient of `dfa` by `partition`, merging all states of a class into one state
/// that is labeled with the class. We assume that the partition is a congruence which refines
/// acceptance, meaning that states of the same class agree on being accepting and for every
/// symbol their successors lie in the same class. A missing transition may stand in for one
/// into a class from which no word is accepted. The edges and acceptance of a class are taken
/// from an arbitrary member, which does not change the accepted language.
///
/// Labels in `partition` that are not states of `dfa` are ignored, as are repeated
/// occurrences of a state in later classes. States that are not covered by any class stay
/// on their own, i.e. they form a singleton class.
pub fn quotient<Q: State, S: Symbol>(
    dfa: &DFA<Q, S>,
    partition: &Partition<Q>,
) -> DFA<StateSet<Q>, S> {
    let table = dfa.table();
    let mut class_of: Vec<Option<usize>> = vec![None; table.size()];
    let mut members: Vec<Vec<StateIndex>> = vec![];

    for class in partition {
        let known = class
            .iter()
            .filter_map(|q| table.index_of(q))
            .filter(|&q| class_of[q].is_none())
            .collect_vec();
        if known.is_empty() {
            continue;
        }
        for &q in &known {
            class_of[q] = Some(members.len());
        }
        members.push(known);
    }
    for q in 0..table.size() {
        if class_of[q].is_none() {
            class_of[q] = Some(members.len());
            members.push(vec![q]);
        }
    }
    // every state has a class by now
    let class_of: Vec<usize> = class_of.into_iter().flatten().collect();
    debug_assert_eq!(class_of.len(), table.size());

    let labels = members
        .iter()
        .map(|class| {
            class
                .iter()
                .map(|&q| table.label(q).clone())
                .collect::<StateSet<_>>()
        })
        .collect_vec();
    let accepting: IndexSet = members
        .iter()
        .positions(|class| table.is_accepting(class[0]))
        .collect();
    let transitions: Vec<OrderedMap<S, StateIndex>> = members
        .iter()
        .map(|class| {
            dfa.edges_from(class[0])
                .iter()
                .map(|(sym, &p)| (sym.clone(), class_of[p]))
                .collect()
        })
        .collect();
    trace!(
        "quotient of DFA with {} states has {} classes",
        table.size(),
        members.len()
    );

    DFA::from_discovered(
        labels,
        class_of[dfa.initial_index()],
        &accepting,
        transitions,
    )
}
