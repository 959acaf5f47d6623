use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fastrand::Rng;
use finite_automata::{
    prelude::*,
    random::{char_alphabet, generate_random_dfa, generate_random_nfa, generate_random_word},
};

fn products(c: &mut Criterion) {
    let mut rng = Rng::with_seed(3);
    let left = generate_random_dfa(&mut rng, 3, 0.05);
    let right = generate_random_dfa(&mut rng, 3, 0.05);
    c.bench_function("intersection of random DFAs", |b| {
        b.iter(|| intersection(black_box(&left), black_box(&right)))
    });
    c.bench_function("equivalence of random DFAs", |b| {
        b.iter(|| black_box(&left).equivalent(black_box(&right)))
    });
}

fn minimization(c: &mut Criterion) {
    let mut rng = Rng::with_seed(5);
    let dfa = generate_random_dfa(&mut rng, 3, 0.02);
    c.bench_function("minimize random DFA", |b| {
        b.iter(|| minimize(black_box(&dfa)))
    });
}

fn determinization(c: &mut Criterion) {
    let mut rng = Rng::with_seed(7);
    let nfa = generate_random_nfa(&mut rng, 2, 12, 0.15, 0.05);
    c.bench_function("determinize random NFA", |b| {
        b.iter(|| determinize(black_box(&nfa)))
    });
}

fn acceptance(c: &mut Criterion) {
    let mut rng = Rng::with_seed(11);
    let dfa = generate_random_dfa(&mut rng, 2, 0.1);
    let nfa = generate_random_nfa(&mut rng, 2, 12, 0.2, 0.05);
    let word = generate_random_word(&mut rng, &char_alphabet(2), 10_000, 10_000);
    c.bench_function("DFA run on long word", |b| {
        b.iter(|| black_box(&dfa).accepts(black_box(word.as_str())))
    });
    c.bench_function("NFA sweep on long word", |b| {
        b.iter(|| black_box(&nfa).accepts(black_box(word.as_str())))
    });
}

criterion_group!(
    benches,
    products,
    minimization,
    determinization,
    acceptance
);
criterion_main!(benches);
