//! Property-based invariants of the transforms

mod common;

use common::{date, nan_allclose};
use feature_engine::{
    categorical_to_frequency, days_since_result, ema, grouped_days_since_result, grouped_ema,
    grouped_lagged_decay, lagged_ema, Frame, Record, Value,
};
use proptest::prelude::*;

fn series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1_000.0f64..1_000.0, 1..60)
}

/// Rows of (group, value) with a small key space so groups interleave
fn grouped_rows() -> impl Strategy<Value = Vec<(u8, f64)>> {
    prop::collection::vec((0u8..4, -100.0f64..100.0), 0..80)
}

fn frame_of(rows: &[(u8, f64)]) -> Frame {
    Frame::new(
        rows.iter()
            .enumerate()
            .map(|(i, &(g, x))| {
                Record::new()
                    .with("g", g as i64)
                    .with("x", x)
                    .with("t", date(2023, 6, 1, i as i64))
            })
            .collect(),
    )
}

proptest! {
    #[test]
    fn ema_starts_at_first_value(values in series(), n in 1usize..50) {
        let out = ema(&values, n).unwrap();
        prop_assert_eq!(out.len(), values.len());
        prop_assert_eq!(out[0], values[0]);
    }

    #[test]
    fn ema_period_one_is_identity(values in series()) {
        prop_assert_eq!(ema(&values, 1).unwrap(), values);
    }

    #[test]
    fn lagged_ema_is_shifted_ema(
        values in series(),
        n in 1usize..20,
        shift in 0isize..10,
        init in -5.0f64..5.0,
    ) {
        let base = ema(&values, n).unwrap();
        let lagged = lagged_ema(&values, n, shift, init).unwrap();
        let shift = shift as usize;
        for (t, value) in lagged.iter().enumerate() {
            if t < shift {
                prop_assert_eq!(*value, init);
            } else {
                prop_assert_eq!(*value, base[t - shift]);
            }
        }
    }

    #[test]
    fn grouped_ema_matches_per_group_ema(rows in grouped_rows(), n in 1usize..10) {
        let out = grouped_ema(&frame_of(&rows), "x", n, "g").unwrap();
        for group in 0u8..4 {
            let positions: Vec<usize> = (0..rows.len()).filter(|&i| rows[i].0 == group).collect();
            let values: Vec<f64> = positions.iter().map(|&i| rows[i].1).collect();
            let expected = ema(&values, n).unwrap();
            let actual: Vec<f64> = positions.iter().map(|&i| out[i]).collect();
            prop_assert!(nan_allclose(&actual, &expected));
        }
    }

    #[test]
    fn decay_is_zero_at_group_start(rows in grouped_rows()) {
        let out = grouped_lagged_decay(&frame_of(&rows), "g", "x").unwrap();
        let mut seen = [false; 4];
        for (i, &(g, _)) in rows.iter().enumerate() {
            if !seen[g as usize] {
                prop_assert_eq!(out[i], 0.0);
                seen[g as usize] = true;
            }
        }
    }

    #[test]
    fn days_since_result_points_at_latest_qualifier(values in series(), threshold in -500.0f64..500.0) {
        let times: Vec<_> = (0..values.len()).map(|i| date(2022, 1, 1, (i * i) as i64)).collect();
        let out = days_since_result(&values, &times, threshold).unwrap();
        prop_assert!(out[0].is_nan());
        for t in 1..values.len() {
            match (0..t).rev().find(|&p| values[p] >= threshold) {
                Some(p) => prop_assert_eq!(out[t], (t * t - p * p) as f64),
                None => prop_assert!(out[t].is_nan()),
            }
        }
    }

    #[test]
    fn grouped_sentinel_only_without_prior_win(flags in prop::collection::vec((0u8..3, 0i64..2), 0..60)) {
        let frame = Frame::new(
            flags
                .iter()
                .enumerate()
                .map(|(i, &(g, win))| {
                    Record::new()
                        .with("g", g as i64)
                        .with("win", win)
                        .with("t", date(2021, 3, 1, i as i64))
                })
                .collect(),
        );
        let out = grouped_days_since_result(&frame, "g", "win", "t").unwrap();
        for (t, &(g, _)) in flags.iter().enumerate() {
            let prior_win = flags[..t].iter().any(|&(pg, w)| pg == g && w >= 1);
            prop_assert_eq!(out[t] == -1, !prior_win);
        }
    }

    #[test]
    fn frequency_reports_each_count(values in prop::collection::vec(0i64..6, 0..50)) {
        let frame = Frame::new(values.iter().map(|&v| Record::new().with("c", Value::Int(v))).collect());
        let out = categorical_to_frequency(&frame, "c").unwrap();
        for (i, &v) in values.iter().enumerate() {
            prop_assert_eq!(out[i], values.iter().filter(|&&w| w == v).count());
        }
    }
}
