// Result of an engine run: per-key outputs, statuses and streaming state
use crate::catalog::{IndicatorKey, IndicatorParams};
use crate::error::ConfigError;
use crate::indicators::IndicatorState;
use shared::models::{Candle, IndicatorSeries};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::Hasher;

/// Outcome of one enabled key.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyStatus {
    /// At least one output line has points.
    Computed,
    /// Not enough candles for the first point; the outputs are present but empty.
    InsufficientData { required: usize, available: usize },
    /// The key's parameters could not build a calculator; it has no outputs.
    Rejected(ConfigError),
}

#[derive(Debug)]
pub(crate) struct KeyEntry {
    // Resolution of defaults + overrides, kept to detect parameter changes.
    pub(crate) params: Result<IndicatorParams, ConfigError>,
    pub(crate) status: KeyStatus,
    pub(crate) outputs: Vec<IndicatorSeries>,
    pub(crate) warmup: usize,
    pub(crate) state: Option<Box<dyn IndicatorState>>,
}

impl KeyEntry {
    pub(crate) fn rejected(params: Result<IndicatorParams, ConfigError>, error: ConfigError) -> Self {
        KeyEntry {
            params,
            status: KeyStatus::Rejected(error),
            outputs: Vec::new(),
            warmup: 0,
            state: None,
        }
    }

    pub(crate) fn refresh_status(&mut self, available: usize) {
        if matches!(self.status, KeyStatus::Rejected(_)) {
            return;
        }
        self.status = if self.outputs.iter().all(IndicatorSeries::is_empty) {
            KeyStatus::InsufficientData {
                required: self.warmup,
                available,
            }
        } else {
            KeyStatus::Computed
        };
    }

    pub(crate) fn point_count(&self) -> usize {
        self.outputs.iter().map(IndicatorSeries::len).sum()
    }
}

/// Indicator outputs for one candle series and one set of enabled keys.
///
/// Only enabled keys appear. Besides the plotted lines it keeps each
/// calculator's streaming state, which is what lets
/// [`IndicatorEngine::update`](super::IndicatorEngine::update) extend it by one
/// candle without recomputing from scratch.
#[derive(Debug)]
pub struct IndicatorSnapshot {
    candle_count: usize,
    // Hash of every candle the snapshot was computed over.
    fingerprint: u64,
    pub(crate) entries: BTreeMap<IndicatorKey, KeyEntry>,
}

impl IndicatorSnapshot {
    pub(crate) fn new(candles: &[Candle], entries: BTreeMap<IndicatorKey, KeyEntry>) -> Self {
        Self {
            candle_count: candles.len(),
            fingerprint: fingerprint(candles),
            entries,
        }
    }

    /// The candle `candles` adds on top of this snapshot's series, if it is
    /// exactly that series, unrevised, plus one candle.
    pub(crate) fn appended_candle<'a>(&self, candles: &'a [Candle]) -> Option<&'a Candle> {
        let (last, prefix) = candles.split_last()?;
        if prefix.len() != self.candle_count || fingerprint(prefix) != self.fingerprint {
            return None;
        }
        Some(last)
    }

    pub fn candle_count(&self) -> usize {
        self.candle_count
    }

    pub fn keys(&self) -> impl Iterator<Item = IndicatorKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn status(&self, key: IndicatorKey) -> Option<&KeyStatus> {
        self.entries.get(&key).map(|entry| &entry.status)
    }

    pub fn statuses(&self) -> impl Iterator<Item = (IndicatorKey, &KeyStatus)> + '_ {
        self.entries.iter().map(|(key, entry)| (*key, &entry.status))
    }

    /// Parameters the key was computed with, unless they failed to resolve.
    pub fn params(&self, key: IndicatorKey) -> Option<IndicatorParams> {
        self.entries.get(&key).and_then(|entry| entry.params.clone().ok())
    }

    /// Output lines of one key, in catalog order.
    pub fn key_outputs(&self, key: IndicatorKey) -> &[IndicatorSeries] {
        self.entries
            .get(&key)
            .map(|entry| entry.outputs.as_slice())
            .unwrap_or_default()
    }

    pub fn series(&self, name: &str) -> Option<&IndicatorSeries> {
        self.entries
            .values()
            .flat_map(|entry| entry.outputs.iter())
            .find(|series| series.name == name)
    }

    /// Output name to series, across all enabled keys.
    pub fn outputs(&self) -> BTreeMap<&str, &IndicatorSeries> {
        self.entries
            .values()
            .flat_map(|entry| entry.outputs.iter())
            .map(|series| (series.name.as_str(), series))
            .collect()
    }

    pub fn into_outputs(self) -> BTreeMap<String, IndicatorSeries> {
        self.entries
            .into_values()
            .flat_map(|entry| entry.outputs)
            .map(|series| (series.name.clone(), series))
            .collect()
    }
}

fn fingerprint(candles: &[Candle]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for candle in candles {
        hasher.write_i64(candle.open_time);
        hasher.write_i64(candle.close_time);
        for value in [candle.open, candle.high, candle.low, candle.close, candle.volume] {
            hasher.write_u64(value.to_bits());
        }
        hasher.write_u64(candle.trade_count);
    }
    hasher.finish()
}
