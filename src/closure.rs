use crate::{automaton::StateIndex, math::IndexSet};

/// Computes the epsilon closure of `seeds`, that is the set of all states that can be reached
/// from some seed by taking zero or more epsilon transitions. `epsilon[q]` holds the targets of
/// the epsilon transitions leaving state `q`.
///
/// The epsilon transitions may well form cycles. Every state is pushed onto the worklist at
/// most once, as a state is only pushed when it is first inserted into the closure.
pub fn epsilon_closure<I>(epsilon: &[IndexSet], seeds: I) -> IndexSet
where
    I: IntoIterator<Item = StateIndex>,
{
    let mut closure = IndexSet::with_capacity(epsilon.len());
    let mut stack = Vec::new();
    for seed in seeds {
        if closure.insert(seed) {
            stack.push(seed);
        }
    }

    while let Some(q) = stack.pop() {
        let Some(targets) = epsilon.get(q) else {
            continue;
        };
        for p in targets {
            if closure.insert(p) {
                stack.push(p);
            }
        }
    }
    closure
}

/// Returns true if `set` is closed under epsilon transitions.
pub fn is_epsilon_closed(epsilon: &[IndexSet], set: &IndexSet) -> bool {
    set.iter()
        .filter_map(|q| epsilon.get(q))
        .all(|targets| targets.is_subset(set))
}
