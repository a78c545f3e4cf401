#![allow(dead_code)]

use indicator_engine::{Candle, CandleSeries, IndicatorKey, IndicatorSnapshot};
use proptest::prelude::*;
use std::collections::BTreeSet;

pub const MINUTE_MS: i64 = 60_000;
pub const START_MS: i64 = 1_704_067_200_000; // 2024-01-01 00:00:00 UTC

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_candle(index: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
    let open_time = START_MS + index * MINUTE_MS;
    Candle {
        open_time,
        close_time: open_time + MINUTE_MS - 1,
        open,
        high,
        low,
        close,
        volume,
        trade_count: 10,
    }
}

pub fn series_from_closes(closes: &[f64]) -> CandleSeries {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| create_candle(i as i64, c, c, c, c, 100.0))
        .collect()
}

/// Well-formed candles one minute apart: high/low bracket open and close.
pub fn candle_series(max_len: usize) -> impl Strategy<Value = CandleSeries> {
    prop::collection::vec(
        (1.0f64..500.0, -0.03f64..0.03, 0.0f64..0.05, 0.0f64..0.05, 0.0f64..10_000.0),
        0..=max_len,
    )
    .prop_map(|bars| {
        bars.into_iter()
            .enumerate()
            .map(|(i, (open, drift, up, down, volume))| {
                let close = open * (1.0 + drift);
                let high = open.max(close) * (1.0 + up);
                let low = open.min(close) * (1.0 - down);
                create_candle(i as i64, open, high, low, close, volume)
            })
            .collect::<CandleSeries>()
    })
}

/// Any subset of the catalog.
pub fn key_subset() -> impl Strategy<Value = BTreeSet<IndicatorKey>> {
    (0u32..(1 << IndicatorKey::ALL.len())).prop_map(|mask| {
        IndicatorKey::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, key)| key)
            .collect()
    })
}

pub fn all_keys() -> BTreeSet<IndicatorKey> {
    IndicatorKey::ALL.into_iter().collect()
}

/// Same output names, same times, same value bits.
pub fn assert_bit_identical(left: &IndicatorSnapshot, right: &IndicatorSnapshot) {
    let (left, right) = (left.outputs(), right.outputs());
    assert_eq!(left.keys().collect::<Vec<_>>(), right.keys().collect::<Vec<_>>());
    for (name, series) in &left {
        let other = right[name];
        assert_eq!(series.parameters, other.parameters, "{}", name);
        assert_eq!(series.len(), other.len(), "{}", name);
        for (a, b) in series.points.iter().zip(&other.points) {
            assert_eq!(a.time, b.time, "{}", name);
            assert_eq!(a.value.to_bits(), b.value.to_bits(), "{} at {}", name, a.time);
        }
    }
}
