use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use kickoff::config::EngineConfig;
use kickoff::domain::{Fixture, MatchResult};
use kickoff::engine::Engine;
use kickoff::model::{ClassProbabilities, PrecomputedModel};
use kickoff::provider::Archive;

const TEAMS: [&str; 8] = [
    "Arsenal",
    "Aston Villa",
    "Chelsea",
    "Everton",
    "Liverpool",
    "Man City",
    "Newcastle",
    "Tottenham",
];

fn archive() -> Archive {
    let epoch = Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap();
    let mut results = vec![];
    let mut day = 0;
    for (i, home) in TEAMS.iter().enumerate() {
        for (j, away) in TEAMS.iter().enumerate() {
            if i != j {
                day += 1;
                results.push(MatchResult {
                    home: home.to_string(),
                    away: away.to_string(),
                    date: epoch - Duration::days(day),
                    home_goals: ((i * 3 + j) % 4) as u8,
                    away_goals: ((i + j * 2) % 3) as u8,
                });
            }
        }
    }
    Archive::from_results(results)
}

fn criterion_benchmark(c: &mut Criterion) {
    let fixture = Fixture::new("Arsenal", "Chelsea");
    let model: PrecomputedModel = [(fixture.clone(), ClassProbabilities::new(vec![0.25, 0.3, 0.45], vec![0.4, 0.6]))]
        .into_iter()
        .collect();
    let engine = Engine::new(archive(), EngineConfig::default())
        .unwrap()
        .with_neural(model);

    c.bench_function("cri_calculate", |b| {
        b.iter(|| engine.calculate_match_probabilities(&fixture));
    });

    c.bench_function("cri_ensemble", |b| {
        b.iter(|| engine.predict_ensemble(&fixture));
    });

    let fixtures: Vec<_> = TEAMS
        .windows(2)
        .map(|pair| Fixture::new(pair[0], pair[1]))
        .collect();
    c.bench_function("cri_combo", |b| {
        b.iter(|| engine.build_best_combo(&fixtures));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
