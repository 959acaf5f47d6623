use std::hash::Hash;

use tracing::debug;

use crate::{
    alphabet::{Alphabet, Symbol},
    automaton::{Automaton, State, StateIndex, DFA},
    math::{IndexSet, Map, OrderedMap},
    Show,
};

/// Represents a state in a product construction, which is a pair of a state of the left
/// automaton and one of the right automaton. Being a proper pair, it cannot collide for any
/// choice of component labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductIndex<L, R>(pub L, pub R);

impl<L: Show, R: Show> Show for ProductIndex<L, R> {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<L, R> From<(L, R)> for ProductIndex<L, R> {
    fn from((l, r): (L, R)) -> Self {
        ProductIndex(l, r)
    }
}

/// Explores the pairs that are reachable from `initial`, where `step` computes the successor
/// of a pair on a symbol, if there is one. Returns the pairs in the order in which they were
/// discovered together with their transitions, which refer to positions in that order.
fn explore<C, S, F>(
    initial: C,
    alphabet: &Alphabet<S>,
    step: F,
) -> (Vec<C>, Vec<OrderedMap<S, StateIndex>>)
where
    C: Copy + Eq + Hash,
    S: Symbol,
    F: Fn(C, &S) -> Option<C>,
{
    let mut ids: Map<C, StateIndex> = Map::default();
    let mut pairs = vec![initial];
    let mut transitions: Vec<OrderedMap<S, StateIndex>> = vec![];
    ids.insert(initial, 0);

    // `pairs` doubles as the worklist, everything after `transitions.len()` is unexplored
    while transitions.len() < pairs.len() {
        let pair = pairs[transitions.len()];
        let mut edges = OrderedMap::new();
        for sym in alphabet.universe() {
            let Some(successor) = step(pair, sym) else {
                continue;
            };
            let target = *ids.entry(successor).or_insert_with(|| {
                pairs.push(successor);
                pairs.len() - 1
            });
            edges.insert(sym.clone(), target);
        }
        transitions.push(edges);
    }
    (pairs, transitions)
}

fn assemble<L, R, S, F>(
    labels: Vec<ProductIndex<L, R>>,
    transitions: Vec<OrderedMap<S, StateIndex>>,
    predicate: F,
    sizes: (usize, usize),
) -> DFA<ProductIndex<L, R>, S>
where
    L: State,
    R: State,
    S: Symbol,
    F: Fn(&L, &R) -> bool,
{
    let accepting: IndexSet = labels
        .iter()
        .enumerate()
        .filter(|(_, ProductIndex(l, r))| predicate(l, r))
        .map(|(id, _)| id)
        .collect();
    debug!(
        "product of automata with {} and {} states has {} reachable states, {} accepting",
        sizes.0,
        sizes.1,
        labels.len(),
        accepting.len()
    );
    DFA::from_discovered(labels, 0, &accepting, transitions)
}

/// Builds the product of `left` and `right`. Its states are those pairs of a state of `left`
/// and a state of `right` that are reachable from the pair of initial states, pairs that
/// cannot be reached are never constructed. On a symbol, a pair moves to the pair of the
/// successors of its components. If one of the components has no transition on the symbol,
/// which is in particular the case for symbols that are not in its alphabet, neither has
/// the pair. A pair `(p, q)` is accepting if `predicate(p, q)` holds.
///
/// As both components have to move, a word on which one of them gets stuck is rejected no
/// matter what `predicate` says. This is what [`intersection`] needs, whereas [`union`] and
/// [`minus`] are built on [`cross_padded`], which keeps going with the other component.
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
///
/// let even_a = DFA::builder()
///     .with_edges([(0, 'a', 1), (1, 'a', 0), (0, 'b', 0), (1, 'b', 1)])
///     .with_accepting([0])
///     .into_dfa(0)
///     .unwrap();
/// let ends_in_b = DFA::builder()
///     .with_edges([('x', 'a', 'x'), ('x', 'b', 'y'), ('y', 'a', 'x'), ('y', 'b', 'y')])
///     .with_accepting(['y'])
///     .into_dfa('x')
///     .unwrap();
/// let xor = cross(&even_a, &ends_in_b, |p, q| {
///     even_a.state_accepted(p) != ends_in_b.state_accepted(q)
/// });
/// assert!(!xor.accepts("aab"));
/// assert!(xor.accepts("ab"));
/// assert!(xor.accepts("aa"));
/// ```
pub fn cross<Q, P, S, F>(left: &DFA<Q, S>, right: &DFA<P, S>, predicate: F) -> DFA<ProductIndex<Q, P>, S>
where
    Q: State,
    P: State,
    S: Symbol,
    F: Fn(&Q, &P) -> bool,
{
    let alphabet = left.alphabet().union(right.alphabet());
    let (pairs, transitions) = explore(
        (left.initial_index(), right.initial_index()),
        &alphabet,
        |(l, r), sym| Some((left.successor_index(l, sym)?, right.successor_index(r, sym)?)),
    );
    let labels = pairs
        .iter()
        .map(|&(l, r)| {
            ProductIndex(
                left.table().label(l).clone(),
                right.table().label(r).clone(),
            )
        })
        .collect();
    assemble(labels, transitions, predicate, (left.size(), right.size()))
}

/// Builds the product of `left` and `right` like [`cross`], except that a pair keeps going
/// as long as one of its components can move. A component without a transition on some
/// symbol becomes `None` and stays `None` from then on, and a pair only has no transition if
/// neither component has one. No sink is added to either side, so the product has at most
/// `(|left| + 1) * (|right| + 1) - 1` states.
///
/// A pair is accepting if `predicate` holds for its components, where `None` stands for a
/// component that got stuck on the way. The language of [`union`] and [`minus`] is thereby
/// exactly the combination of the two languages over the joint alphabet, also if `left` or
/// `right` are partial.
pub fn cross_padded<Q, P, S, F>(
    left: &DFA<Q, S>,
    right: &DFA<P, S>,
    predicate: F,
) -> DFA<ProductIndex<Option<Q>, Option<P>>, S>
where
    Q: State,
    P: State,
    S: Symbol,
    F: Fn(Option<&Q>, Option<&P>) -> bool,
{
    let alphabet = left.alphabet().union(right.alphabet());
    let (pairs, transitions) = explore(
        (Some(left.initial_index()), Some(right.initial_index())),
        &alphabet,
        |(l, r), sym| match (
            l.and_then(|l| left.successor_index(l, sym)),
            r.and_then(|r| right.successor_index(r, sym)),
        ) {
            (None, None) => None,
            pair => Some(pair),
        },
    );
    let labels = pairs
        .iter()
        .map(|&(l, r)| {
            ProductIndex(
                l.map(|l| left.table().label(l).clone()),
                r.map(|r| right.table().label(r).clone()),
            )
        })
        .collect();
    assemble(
        labels,
        transitions,
        |l: &Option<Q>, r: &Option<P>| predicate(l.as_ref(), r.as_ref()),
        (left.size(), right.size()),
    )
}

/// Computes a DFA accepting the words accepted by `left` or by `right`. The components of a
/// state are `None` once the respective automaton got stuck, see [`cross_padded`].
pub fn union<Q: State, P: State, S: Symbol>(
    left: &DFA<Q, S>,
    right: &DFA<P, S>,
) -> DFA<ProductIndex<Option<Q>, Option<P>>, S> {
    cross_padded(left, right, |p, q| {
        p.is_some_and(|p| left.state_accepted(p))
            || q.is_some_and(|q| right.state_accepted(q))
    })
}

/// Computes a DFA accepting the words accepted by both `left` and `right`.
pub fn intersection<Q: State, P: State, S: Symbol>(
    left: &DFA<Q, S>,
    right: &DFA<P, S>,
) -> DFA<ProductIndex<Q, P>, S> {
    cross(left, right, |p, q| {
        left.state_accepted(p) && right.state_accepted(q)
    })
}

/// Computes a DFA accepting the words accepted by `left` but not by `right`. The components
/// of a state are `None` once the respective automaton got stuck, see [`cross_padded`].
pub fn minus<Q: State, P: State, S: Symbol>(
    left: &DFA<Q, S>,
    right: &DFA<P, S>,
) -> DFA<ProductIndex<Option<Q>, Option<P>>, S> {
    cross_padded(left, right, |p, q| {
        p.is_some_and(|p| left.state_accepted(p))
            && !q.is_some_and(|q| right.state_accepted(q))
    })
}
