use fastrand::Rng;
use tracing::trace;

use crate::prelude::*;

/// Returns the alphabet consisting of the first `symbols` lowercase latin letters.
pub fn char_alphabet(symbols: usize) -> Alphabet<char> {
    debug_assert!(symbols <= 26, "only 26 letters are available");
    (b'a'..=b'z').take(symbols).map(char::from).collect()
}

/// Uses a sprout-like algorithm to generate a random complete DFA in which every state is
/// reachable. `symbols` determines the number of letters in the alphabet, see
/// [`char_alphabet`], and `probability` the probability of an edge going back to some
/// existing state. The algorithm is as follows:
/// 1. Start with a single state.
/// 2. For each state and each symbol, go through the existing states in order and with
///    probability `probability` add an edge to that state.
/// 3. If no edge to an existing state was added, we insert an edge to a new state.
/// 4. Repeat until all states and symbols have been treated.
///
/// Each state is then made accepting with probability one half. The generated automaton only
/// depends on the state of `rng`, so seeding it makes the outcome reproducible.
pub fn generate_random_dfa(rng: &mut Rng, symbols: usize, probability: f64) -> DFA<u32, char> {
    let alphabet = char_alphabet(symbols);
    let mut size = 1u32;
    let mut edges = vec![];

    let mut current = 0;
    while current < size {
        for &sym in alphabet.universe() {
            let target = (0..=current)
                .find(|_| rng.f64() < probability)
                .unwrap_or_else(|| {
                    size += 1;
                    size - 1
                });
            edges.push((current, sym, target));
        }
        current += 1;
    }

    let accepting = (0..size).filter(|_| rng.bool()).collect::<Vec<_>>();
    trace!("generated random DFA with {size} states and {} edges", edges.len());
    DFA::builder()
        .with_states(0..size)
        .with_edges(edges)
        .with_accepting(accepting)
        .into_dfa(0)
        .expect("generated descriptions only use declared states")
}

/// Generates a DFA with `size` states by drawing transitions at random. Every transition is
/// present with probability `density`, in which case its target is drawn uniformly. Unlike
/// for [`generate_random_dfa`], the result is in general neither complete nor are all of its
/// states reachable.
///
/// # Panics
/// Panics if `size` is zero, as there would be no initial state.
pub fn generate_random_partial_dfa(
    rng: &mut Rng,
    symbols: usize,
    size: u32,
    density: f64,
) -> DFA<u32, char> {
    assert!(size > 0, "a DFA needs at least an initial state");
    let alphabet = char_alphabet(symbols);
    let mut edges = vec![];
    for q in 0..size {
        for &sym in alphabet.universe() {
            if rng.f64() < density {
                edges.push((q, sym, rng.u32(..size)));
            }
        }
    }

    let accepting = (0..size).filter(|_| rng.bool()).collect::<Vec<_>>();
    DFA::builder()
        .with_states(0..size)
        .with_edges(edges)
        .with_accepting(accepting)
        .into_dfa(0)
        .expect("generated descriptions only use declared states")
}

/// Generates an NFA with `size` states. For every state, symbol and potential target, the
/// transition is present with probability `density`, and for every pair of distinct states
/// an epsilon transition is present with probability `epsilon_density`. Each state is
/// accepting with probability one half.
///
/// # Panics
/// Panics if `size` is zero, as there would be no initial state.
pub fn generate_random_nfa(
    rng: &mut Rng,
    symbols: usize,
    size: u32,
    density: f64,
    epsilon_density: f64,
) -> NFA<u32, char> {
    assert!(size > 0, "an NFA needs at least an initial state");
    let alphabet = char_alphabet(symbols);
    let mut edges = vec![];
    let mut epsilon_edges = vec![];
    for q in 0..size {
        for &sym in alphabet.universe() {
            edges.extend(
                (0..size)
                    .filter(|_| rng.f64() < density)
                    .map(|p| (q, sym, p)),
            );
        }
        epsilon_edges.extend(
            (0..size)
                .filter(|&p| p != q && rng.f64() < epsilon_density)
                .map(|p| (q, p)),
        );
    }

    let accepting = (0..size).filter(|_| rng.bool()).collect::<Vec<_>>();
    trace!(
        "generated random NFA with {size} states, {} edges and {} epsilon edges",
        edges.len(),
        epsilon_edges.len()
    );
    NFA::builder()
        .with_states(0..size)
        .with_edges(edges)
        .with_epsilon_edges(epsilon_edges)
        .with_accepting(accepting)
        .into_nfa(0)
        .expect("generated descriptions only use declared states")
}

/// Generates a random `String` over the universe of `alphabet`. The length of the `String`
/// is drawn uniformly from the range `min_len..=max_len`. If `alphabet` is empty, the
/// empty word is returned.
///
/// # Panics
/// Panics if `min_len` exceeds `max_len` and `alphabet` is not empty.
pub fn generate_random_word(
    rng: &mut Rng,
    alphabet: &Alphabet<char>,
    min_len: usize,
    max_len: usize,
) -> String {
    let charset: Vec<char> = alphabet.universe().copied().collect();
    if charset.is_empty() {
        return String::new();
    }

    let length = rng.usize(min_len..=max_len);
    (0..length)
        .map(|_| charset[rng.usize(..charset.len())])
        .collect()
}
