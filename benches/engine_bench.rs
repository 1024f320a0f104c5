use criterion::{black_box, criterion_group, criterion_main, Criterion};

use battle_odds::army::{Army, Force, Side, StatTable};
use battle_odds::combat::{apply_hits, HitDistribution, StrengthModifier};
use battle_odds::{BattleConfig, VictoryEngine};

fn force(stats: &StatTable, army: &str) -> Force {
    let army: Army = army.parse().unwrap();
    Force::from_army(&army, stats).unwrap()
}

fn bench_hit_distribution(c: &mut Criterion) {
    let probs: Vec<f64> = (0..40).map(|i| f64::from(i % 6 + 1) / 6.0).collect();
    c.bench_function("hit_distribution_40_units", |b| {
        b.iter(|| HitDistribution::new(black_box(&probs)))
    });
}

fn bench_casualties(c: &mut Criterion) {
    let stats = StatTable::builtin();
    let f = force(&stats, "Battleship=2,Cruiser=2,Destroyer=4,Submarine=4");
    c.bench_function("apply_hits_12_units_6_hits", |b| {
        b.iter(|| apply_hits(black_box(&f), black_box(6), Side::Defender))
    });
}

fn bench_modifier(c: &mut Criterion) {
    let stats = StatTable::builtin();
    let modifier = StrengthModifier::from_stats(&stats);
    let f = force(&stats, "Infantry=10,Artillery=5,Tank=3,Fighter=2,Tactical Bomber=3");
    c.bench_function("hit_probabilities_23_units", |b| {
        b.iter(|| modifier.hit_probabilities(black_box(&f), Side::Attacker))
    });
}

fn bench_battle(c: &mut Criterion) {
    let stats = StatTable::builtin();
    let attackers = force(&stats, "Infantry=4,Artillery=2,Tank=2");
    let defenders = force(&stats, "Infantry=6");
    let config = BattleConfig {
        max_rounds: 6,
        ..BattleConfig::default()
    };
    let memo = VictoryEngine::new(&config, StrengthModifier::from_stats(&stats));

    let mut group = c.benchmark_group("battle_8_vs_6");
    group.sample_size(10);
    group.bench_function("memoized", |b| {
        b.iter(|| memo.evaluate(black_box(&attackers), black_box(&defenders)))
    });
    group.bench_function("memoized_parallel", |b| {
        b.iter(|| memo.evaluate_parallel(black_box(&attackers), black_box(&defenders)))
    });
    group.finish();
}

fn bench_tree_small(c: &mut Criterion) {
    let stats = StatTable::builtin();
    let attackers = force(&stats, "Infantry=3");
    let defenders = force(&stats, "Infantry=2");
    let config = BattleConfig {
        max_rounds: 4,
        memoize: false,
        ..BattleConfig::default()
    };
    let tree = VictoryEngine::new(&config, StrengthModifier::from_stats(&stats));
    c.bench_function("battle_3_vs_2_tree", |b| {
        b.iter(|| tree.evaluate(black_box(&attackers), black_box(&defenders)))
    });
}

criterion_group!(
    benches,
    bench_hit_distribution,
    bench_casualties,
    bench_modifier,
    bench_battle,
    bench_tree_small
);
criterion_main!(benches);
