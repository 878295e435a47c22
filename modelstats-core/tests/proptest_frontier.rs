//! Property-based tests for the Pareto frontier using proptest.

use proptest::prelude::*;

use modelstats_core::{pareto_frontier, EmptyFrontierError, FrontierPoint};

fn point() -> impl Strategy<Value = FrontierPoint> {
    (0u32..40, 0u32..100, 0u32..100, "[a-e]{1,3}").prop_map(|(speed, top1, top5, name)| {
        // coarse grid so equal speeds and accuracies actually occur
        FrontierPoint::new(speed as f64 / 20.0, top1 as f64, top5 as f64, &name)
    })
}

fn sorted_filtered(points: &[FrontierPoint], max_x: f64) -> Vec<FrontierPoint> {
    let mut v: Vec<FrontierPoint> = points.iter().filter(|p| p.speed < max_x).cloned().collect();
    v.sort_by(|a, b| {
        a.speed
            .total_cmp(&b.speed)
            .then(a.top1.total_cmp(&b.top1))
            .then(a.top5.total_cmp(&b.top5))
            .then(a.model_name.cmp(&b.model_name))
    });
    v
}

proptest! {
    #[test]
    fn frontier_speed_is_non_decreasing(
        points in prop::collection::vec(point(), 1..60),
        max_x in 0.05f64..2.5,
    ) {
        if let Ok(frontier) = pareto_frontier(&points, max_x) {
            for pair in frontier.windows(2) {
                prop_assert!(pair[0].speed <= pair[1].speed);
            }
        }
    }

    #[test]
    fn frontier_accuracy_is_non_decreasing(
        points in prop::collection::vec(point(), 1..60),
        max_x in 0.05f64..2.5,
    ) {
        if let Ok(frontier) = pareto_frontier(&points, max_x) {
            for pair in frontier.windows(2) {
                prop_assert!(pair[0].top1 <= pair[1].top1);
            }
        }
    }

    #[test]
    fn frontier_respects_cutoff(
        points in prop::collection::vec(point(), 0..60),
        max_x in 0.05f64..2.5,
    ) {
        match pareto_frontier(&points, max_x) {
            Ok(frontier) => {
                prop_assert!(!frontier.is_empty());
                prop_assert!(frontier.iter().all(|p| p.speed < max_x));
            }
            Err(e) => {
                prop_assert_eq!(e, EmptyFrontierError { max_secs_per_frame: max_x });
                prop_assert!(points.iter().all(|p| p.speed >= max_x));
            }
        }
    }

    #[test]
    fn frontier_is_subsequence_of_sorted_input(
        points in prop::collection::vec(point(), 1..60),
        max_x in 0.05f64..2.5,
    ) {
        if let Ok(frontier) = pareto_frontier(&points, max_x) {
            let sorted = sorted_filtered(&points, max_x);
            prop_assert_eq!(&frontier[0], &sorted[0]);
            let mut rest = sorted.iter();
            for p in &frontier {
                prop_assert!(rest.any(|s| s == p));
            }
        }
    }

    #[test]
    fn frontier_point_is_never_beaten_by_a_faster_model(
        points in prop::collection::vec(point(), 1..60),
        max_x in 0.05f64..2.5,
    ) {
        if let Ok(frontier) = pareto_frontier(&points, max_x) {
            let sorted = sorted_filtered(&points, max_x);
            for p in &frontier {
                let idx = sorted.iter().position(|s| s == p).unwrap();
                prop_assert!(sorted[..idx].iter().all(|s| s.top1 <= p.top1));
            }
        }
    }

    #[test]
    fn frontier_is_deterministic_and_order_independent(
        points in prop::collection::vec(point(), 1..60),
        max_x in 0.05f64..2.5,
    ) {
        let first = pareto_frontier(&points, max_x);
        let second = pareto_frontier(&points, max_x);
        prop_assert_eq!(&first, &second);

        let mut reversed = points.clone();
        reversed.reverse();
        prop_assert_eq!(first, pareto_frontier(&reversed, max_x));
    }
}
