use criterion::{black_box, criterion_group, criterion_main, Criterion};
use playoff_core::{
    run_batch, run_simulation, BracketConfig, Conference, DecisionMethod, Game, MatchupTable,
    Round, SimulationOptions, Team, TeamRegistry, Tournament,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const BRACKET: &str = r#"
wild_card = [["AFC3", "AFC6"], ["AFC4", "AFC5"], ["NFC3", "NFC6"], ["NFC4", "NFC5"]]
byes = ["AFC1", "AFC2", "NFC1", "NFC2"]
"#;

fn create_league() -> (TeamRegistry, MatchupTable) {
    let mut registry = TeamRegistry::new();
    for conf in Conference::ALL {
        for seed in 1..=6u8 {
            registry
                .insert(Team::new(format!("{}{}", conf, seed), seed, conf))
                .unwrap();
        }
    }

    let mut table = MatchupTable::new();
    for away in registry.teams() {
        for home in registry.conference(away.conf) {
            if away.seed > home.seed {
                let prob = 0.5 - 0.04 * (away.seed - home.seed) as f64;
                table.insert(away.conf, &away.name, &home.name, prob).unwrap();
            }
        }
    }

    (registry, table)
}

fn bench_resolve_game(c: &mut Criterion) {
    let (registry, table) = create_league();
    let home = registry.lookup("AFC2").unwrap();
    let away = registry.lookup("AFC5").unwrap();
    let game = Game::new(home, away, DecisionMethod::Random, &table).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("resolve_game_random", |b| {
        b.iter(|| black_box(&game).resolve_winner(&mut rng).unwrap())
    });
}

fn bench_build_round(c: &mut Criterion) {
    let (registry, table) = create_league();
    let winners: Vec<&Team> = ["AFC3", "AFC5", "NFC4", "NFC6"]
        .iter()
        .map(|n| registry.lookup(n).unwrap())
        .collect();
    let byes: Vec<&Team> = ["AFC1", "AFC2", "NFC1", "NFC2"]
        .iter()
        .map(|n| registry.lookup(n).unwrap())
        .collect();

    c.bench_function("build_divisional_round", |b| {
        b.iter(|| {
            Round::build_from_winners(
                black_box(&winners),
                2,
                black_box(&byes),
                DecisionMethod::Random,
                &table,
            )
            .unwrap()
        })
    });
}

fn bench_tournament(c: &mut Criterion) {
    let (registry, table) = create_league();
    let config: BracketConfig = BRACKET.parse().unwrap();
    let tournament = Tournament::new(config.resolve(&registry).unwrap(), &table);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("tournament_single_trial", |b| {
        b.iter(|| black_box(&tournament).run(DecisionMethod::Random, &mut rng).unwrap())
    });

    c.bench_function("tournament_1000_trials_batch", |b| {
        b.iter(|| run_batch(black_box(&tournament), DecisionMethod::Random, 1000, &mut rng).unwrap())
    });

    let options = SimulationOptions {
        trials: 100_000,
        method: DecisionMethod::Random,
        seed: Some(42),
        batches: 64,
    };
    c.bench_function("simulation_100k_trials_parallel", |b| {
        b.iter(|| run_simulation(black_box(&tournament), &options).unwrap())
    });
}

fn bench_coverage(c: &mut Criterion) {
    let (registry, table) = create_league();
    let config: BracketConfig = BRACKET.parse().unwrap();
    let tournament = Tournament::new(config.resolve(&registry).unwrap(), &table);

    c.bench_function("validate_coverage", |b| {
        b.iter(|| black_box(&tournament).validate_coverage().unwrap())
    });
}

criterion_group!(
    benches,
    bench_resolve_game,
    bench_build_round,
    bench_tournament,
    bench_coverage,
);
criterion_main!(benches);
