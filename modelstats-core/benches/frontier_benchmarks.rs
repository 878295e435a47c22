use criterion::{black_box, criterion_group, criterion_main, Criterion};
use modelstats_core::platform::default_platforms;
use modelstats_core::{compute_frontiers, pareto_frontier, Accuracy, FrontierPoint, ModelStat};
use std::collections::BTreeMap;

/// Deterministic pseudo-random zoo: accuracy loosely grows with runtime.
fn zoo(n: usize) -> Vec<ModelStat> {
    (0..n)
        .map(|i| {
            let speed = 0.05 + (i * 7919 % 1000) as f64 / 500.0;
            let top1 = 30.0 + speed * 20.0 + (i * 104_729 % 97) as f64 / 10.0;
            let mut speeds = BTreeMap::new();
            speeds.insert("pi3".to_string(), speed);
            if i % 3 != 0 {
                speeds.insert("aarch64".to_string(), speed / 2.0);
            }
            ModelStat::new(
                &format!("model_{i}"),
                Accuracy {
                    top1: top1.min(99.0),
                    top5: (top1 + 15.0).min(100.0),
                },
                speeds,
            )
        })
        .collect()
}

fn bench_pareto_frontier(c: &mut Criterion) {
    let points: Vec<FrontierPoint> = zoo(1000)
        .iter()
        .map(|s| {
            FrontierPoint::new(
                s.secs_per_frame["pi3"],
                s.accuracy.top1,
                s.accuracy.top5,
                &s.model_name,
            )
        })
        .collect();

    c.bench_function("pareto_frontier_1000", |b| {
        b.iter(|| pareto_frontier(black_box(&points), black_box(1.5)))
    });
}

fn bench_compute_frontiers(c: &mut Criterion) {
    let stats = zoo(500);
    let platforms = default_platforms();

    c.bench_function("compute_frontiers_500_models", |b| {
        b.iter(|| compute_frontiers(black_box(&stats), &platforms, 1.5))
    });
}

criterion_group!(benches, bench_pareto_frontier, bench_compute_frontiers);
criterion_main!(benches);
