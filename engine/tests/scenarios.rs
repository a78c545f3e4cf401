mod common;

use common::{all_keys, create_candle, init_tracing, series_from_closes, START_MS};
use indicator_engine::{
    CandleSeries, EngineSettings, IndicatorEngine, IndicatorKey, KeyStatus, ParamOverrides,
};
use std::collections::BTreeSet;
use std::io::Write;

#[test]
fn sma2_over_three_candles() {
    init_tracing();
    let series = CandleSeries::from_raw(vec![
        create_candle(0, 100.0, 105.0, 95.0, 102.0, 1_000.0),
        create_candle(1, 102.0, 110.0, 100.0, 108.0, 1_200.0),
        create_candle(2, 108.0, 109.0, 103.0, 105.0, 900.0),
    ]);
    let mut engine = IndicatorEngine::new();
    engine.set_overrides(IndicatorKey::Ma5, ParamOverrides::period(2));

    let snapshot = engine.compute(&series, &BTreeSet::from([IndicatorKey::Ma5]));
    let ma = snapshot.series("ma5").unwrap();

    assert_eq!(ma.len(), 2);
    assert_eq!(ma.points[0].value, 105.0);
    assert_eq!(ma.points[1].value, 106.5);
    assert_eq!(ma.points[0].time, series[1].open_time / 1000);
    assert_eq!(ma.points[1].time, series[2].open_time / 1000);
}

#[test]
fn empty_series_yields_only_empty_lines() {
    init_tracing();
    let snapshot = IndicatorEngine::new().compute(&CandleSeries::default(), &all_keys());

    assert!(snapshot.outputs().values().all(|series| series.is_empty()));
    for (key, status) in snapshot.statuses() {
        assert!(
            matches!(status, KeyStatus::InsufficientData { available: 0, .. }),
            "{} -> {:?}",
            key,
            status
        );
    }
}

#[test]
fn duplicate_timestamps_collapse_to_last_candle() {
    init_tracing();
    let raw = (0..5).map(|i| {
        let close = 100.0 + f64::from(i);
        let mut candle = create_candle(0, close, close + 1.0, close - 1.0, close, 10.0);
        candle.trade_count = i as u64;
        candle
    });
    let series = CandleSeries::from_raw(raw);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].close, 104.0);

    let snapshot = IndicatorEngine::new().compute(&series, &all_keys());
    for (name, line) in snapshot.outputs() {
        match name {
            // EMA seeds from the first candle, so one candle is enough
            "ema12" | "ema26" => {
                assert_eq!(line.len(), 1, "{}", name);
                assert_eq!(line.points[0].value, 104.0);
            }
            _ => assert!(line.is_empty(), "{} has {} points", name, line.len()),
        }
    }
}

#[test]
fn unsorted_input_matches_sorted_input() {
    let closes: Vec<f64> = (0..45).map(|i| 50.0 + ((i * 13) % 9) as f64).collect();
    let sorted = series_from_closes(&closes);
    let mut shuffled = sorted.clone().into_candles();
    shuffled.reverse();
    shuffled.swap(3, 17);
    let rebuilt = CandleSeries::from_raw(shuffled);

    let engine = IndicatorEngine::new();
    assert_eq!(rebuilt, sorted);
    assert_eq!(
        engine.compute(&rebuilt, &all_keys()).into_outputs(),
        engine.compute(&sorted, &all_keys()).into_outputs()
    );
}

#[test]
fn composite_keys_expose_all_lines() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (f64::from(i) * 0.3).sin() * 4.0).collect();
    let snapshot = IndicatorEngine::new().compute(
        &series_from_closes(&closes),
        &BTreeSet::from([IndicatorKey::Macd, IndicatorKey::Bb, IndicatorKey::Stoch]),
    );

    let names: Vec<&str> = snapshot.key_outputs(IndicatorKey::Macd).iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["macd", "macd_signal", "macd_histogram"]);
    let names: Vec<&str> = snapshot.key_outputs(IndicatorKey::Bb).iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["bb_upper", "bb_middle", "bb_lower"]);
    assert_eq!(snapshot.series("stoch_k").map(|s| s.len()), Some(47));
    assert_eq!(snapshot.series("stoch_d").map(|s| s.len()), Some(45));
    assert_eq!(snapshot.series("bb_middle").map(|s| s.len()), Some(41));
    assert_eq!(snapshot.series("macd").map(|s| s.len()), Some(46));
}

#[test]
fn disabling_a_key_drops_its_lines() {
    let engine = IndicatorEngine::new();
    let series = series_from_closes(&(1..=30).map(f64::from).collect::<Vec<_>>());
    let previous = engine.compute(&series, &BTreeSet::from([IndicatorKey::Rsi, IndicatorKey::Bb]));
    assert!(previous.series("bb_upper").is_some());

    let next = series.with_appended(create_candle(30, 31.0, 31.0, 31.0, 31.0, 100.0));
    let updated = engine.update(previous, &next, &BTreeSet::from([IndicatorKey::Rsi]));

    assert!(updated.series("bb_upper").is_none());
    assert!(updated.series("bb_middle").is_none());
    assert_eq!(updated.series("rsi").map(|s| s.len()), Some(17));
}

#[test]
fn settings_file_drives_engine() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "enabled": ["ma5", "rsi", "bb", "heikin_ashi"],
            "overrides": {{
                "ma5": {{ "period": 3 }},
                "rsi": {{ "period": -1 }},
                "bb": {{ "period": 10, "std_dev_multiplier": 1.5 }}
            }}
        }}"#
    )
    .unwrap();

    let settings = EngineSettings::load(file.path()).unwrap();
    let engine = IndicatorEngine::from_settings(&settings);
    let enabled = settings.enabled_keys();
    assert_eq!(enabled.len(), 3);

    let closes: Vec<f64> = (0..20).map(|i| 10.0 + f64::from(i % 5)).collect();
    let snapshot = engine.compute(&series_from_closes(&closes), &enabled);

    assert_eq!(snapshot.series("ma5").map(|s| s.len()), Some(18));
    assert!(matches!(snapshot.status(IndicatorKey::Rsi), Some(KeyStatus::Rejected(_))));
    let upper = snapshot.series("bb_upper").unwrap();
    assert_eq!(upper.len(), 11);
    assert_eq!(upper.parameters, serde_json::json!({ "period": 10, "std_dev_multiplier": 1.5 }));
}

#[test]
fn missing_settings_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = EngineSettings::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(indicator_engine::EngineError::Io { .. })));
}

#[test]
fn point_times_are_candle_seconds() {
    let series = series_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let snapshot = IndicatorEngine::new().compute(&series, &BTreeSet::from([IndicatorKey::Ma5, IndicatorKey::Ema12]));
    let ema = snapshot.series("ema12").unwrap();
    assert_eq!(ema.points[0].time, START_MS / 1000);
    let ma = snapshot.series("ma5").unwrap();
    assert_eq!(ma.points[0].time, START_MS / 1000 + 4 * 60);
}

#[test]
fn macd_with_fast_longer_than_slow_is_computed() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i % 6) * 0.8).collect();
    let mut engine = IndicatorEngine::new();
    engine.set_overrides(
        IndicatorKey::Macd,
        ParamOverrides { fast: Some(26), slow: Some(12), ..ParamOverrides::default() },
    );

    let snapshot = engine.compute(&series_from_closes(&closes), &BTreeSet::from([IndicatorKey::Macd]));
    assert_eq!(snapshot.status(IndicatorKey::Macd), Some(&KeyStatus::Computed));
    for name in ["macd", "macd_signal", "macd_histogram"] {
        assert_eq!(snapshot.series(name).map(|s| s.len()), Some(26), "{}", name);
    }
}

#[test]
fn revised_history_plus_new_candle_matches_full_compute() {
    let engine = IndicatorEngine::new();
    let enabled = all_keys();
    let series = series_from_closes(&(1..=20).map(f64::from).collect::<Vec<_>>());
    let previous = engine.compute(&series, &enabled);

    let mut candles = series.into_candles();
    candles[17].close = 500.0;
    let revised = CandleSeries::from_raw(candles).with_appended(create_candle(20, 21.0, 21.0, 21.0, 21.0, 100.0));

    let updated = engine.update(previous, &revised, &enabled);
    assert_eq!(updated.outputs(), engine.compute(&revised, &enabled).outputs());
}
