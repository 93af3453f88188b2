#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use holdem_bots::core::Hand;
use holdem_bots::holdem::EquityCalculator;
use rand::{SeedableRng, rngs::StdRng};

fn preflop_vs_opponents(c: &mut Criterion) {
    let hole = Hand::new_from_str("AsKs").unwrap().cards();
    let calc = EquityCalculator::new(1_000);
    let mut group = c.benchmark_group("Preflop equity 1000 trials");
    for opponents in [1, 3, 6] {
        group.bench_with_input(
            BenchmarkId::from_parameter(opponents),
            &opponents,
            |b, &opponents| {
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| calc.calculate_win_probability(&hole, &[], opponents, &mut rng))
            },
        );
    }
    group.finish();
}

fn flop_vs_known_hand(c: &mut Criterion) {
    let hole = Hand::new_from_str("AsKs").unwrap().cards();
    let board = Hand::new_from_str("Qs7d2s").unwrap().cards();
    let villain = Hand::new_from_str("JhJd").unwrap().cards();
    let calc = EquityCalculator::new(1_000);
    c.bench_function("Exact flop equity vs one hand", move |b| {
        let mut rng = StdRng::seed_from_u64(9);
        b.iter(|| calc.vs_specific_hands(&hole, &board, &[[villain[0], villain[1]]], &mut rng))
    });
}

criterion_group!(benches, preflop_vs_opponents, flop_vs_known_hand);
criterion_main!(benches);
