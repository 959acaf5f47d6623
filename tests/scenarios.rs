use finite_automata::{
    math::{OrderedMap, OrderedSet},
    prelude::*,
};

fn ends_in_01() -> DFA<String, char> {
    let transitions = [
        ("q0", [('0', "q1"), ('1', "q0")]),
        ("q1", [('0', "q1"), ('1', "q2")]),
        ("q2", [('0', "q1"), ('1', "q0")]),
    ]
    .into_iter()
    .map(|(q, edges)| {
        (
            q.to_string(),
            edges
                .into_iter()
                .map(|(sym, p)| (sym, p.to_string()))
                .collect::<OrderedMap<_, _>>(),
        )
    })
    .collect();
    DFA::from_description(DfaDescription {
        transitions,
        start: "q0".to_string(),
        accepting: OrderedSet::from(["q2".to_string()]),
    })
    .expect("description is valid")
}

fn contains(symbol: char) -> DFA<u8, char> {
    let other = if symbol == '0' { '1' } else { '0' };
    DFA::builder()
        .with_edges([(0, other, 0), (0, symbol, 1), (1, '0', 1), (1, '1', 1)])
        .with_accepting([1])
        .into_dfa(0)
        .expect("description is valid")
}

#[test_log::test]
fn recognizing_words_ending_in_01() {
    let dfa = ends_in_01();
    assert!(dfa.accepts("01"));
    assert!(!dfa.accepts("10"));
    assert!(dfa.accepts("0101"));
    assert!(!dfa.accepts(""));
    assert!(dfa.accepts(&['1', '1', '0', '1']));
    assert!(dfa.accepts(&vec!['0', '1']));
}

#[test_log::test]
fn union_of_contains_0_and_contains_1() {
    let either = union(&contains('0'), &contains('1'));
    assert!(either.accepts("00"));
    assert!(either.accepts("11"));
    assert!(either.accepts("01"));
    assert!(!either.accepts(""));
    assert_eq!(either.initial(), &ProductIndex(Some(0), Some(0)));
}

#[test_log::test]
fn epsilon_transition_before_reading() {
    let nfa = NFA::builder()
        .with_epsilon_edges([("q0", "q1")])
        .with_edges([("q1", 'a', "q2")])
        .with_accepting(["q2"])
        .into_nfa("q0")
        .expect("description is valid");
    assert!(nfa.accepts("a"));
    assert!(!nfa.accepts(""));
    assert!(!nfa.accepts("aa"));
    assert!(nfa.to_deterministic().accepts("a"));
}

#[cfg(feature = "minimize")]
#[test_log::test]
fn equivalent_states_are_merged() {
    let dfa = DFA::builder()
        .with_edges([("s", 'x', "p"), ("s", 'y', "q"), ("p", 'x', "f"), ("q", 'x', "f")])
        .with_edges([("f", 'x', "f"), ("f", 'y', "f")])
        .with_accepting(["f"])
        .into_dfa("s")
        .expect("description is valid");
    let minimized = minimize(&dfa);
    assert_eq!(minimized.size(), dfa.size() - 1);
    for word in ["xx", "yx", "x", "y", "xxyy", "yy"] {
        assert_eq!(minimized.accepts(word), dfa.accepts(word));
    }
}

#[test]
fn invalid_descriptions_are_rejected() {
    let missing_start = DFA::<u8, char>::builder()
        .with_edges([(0, 'a', 1)])
        .into_dfa(5);
    assert_eq!(missing_start, Err(InvalidDescription::UnknownStart(5)));

    let missing_accepting = DFA::<u8, char>::builder()
        .with_edges([(0, 'a', 1)])
        .with_accepting([3])
        .into_dfa(0);
    assert_eq!(missing_accepting, Err(InvalidDescription::UnknownAccepting(3)));

    let description = DfaDescription {
        transitions: OrderedMap::from([(0u8, OrderedMap::from([('a', 9u8)]))]),
        start: 0,
        accepting: OrderedSet::new(),
    };
    let error = DFA::try_from(description).unwrap_err();
    assert_eq!(
        error,
        InvalidDescription::UnknownTarget {
            from: 0,
            symbol: 'a',
            target: 9
        }
    );
    assert_eq!(
        error.to_string(),
        "transition from 0 on 'a' leads to undeclared state 9"
    );

    let nondeterministic = DFA::<u8, char>::builder()
        .with_edges([(0, 'a', 1), (0, 'a', 0)])
        .into_dfa(0);
    assert_eq!(
        nondeterministic,
        Err(InvalidDescription::Nondeterministic {
            from: 0,
            symbol: 'a'
        })
    );

    let with_epsilon = DFA::<u8, char>::builder()
        .with_epsilon_edges([(0, 1)])
        .into_dfa(0);
    assert_eq!(
        with_epsilon,
        Err(InvalidDescription::EpsilonInDeterministic { from: 0 })
    );
    assert!(NFA::<u8, char>::builder()
        .with_epsilon_edges([(0, 1)])
        .into_nfa(0)
        .is_ok());
}

#[test]
fn very_long_inputs() {
    let word = "01".repeat(500_000);
    assert!(ends_in_01().accepts(word.as_str()));
    let nfa = NFA::builder()
        .with_edges([(0, '0', 0), (0, '1', 0), (0, '0', 1), (1, '1', 2)])
        .with_epsilon_edges([(2, 0)])
        .with_accepting([2])
        .into_nfa(0)
        .expect("description is valid");
    assert!(nfa.accepts(word.as_str()));
    assert!(!nfa.accepts(&word[..word.len() - 1]));
}
