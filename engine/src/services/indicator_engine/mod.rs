// Indicator engine: runs the enabled catalog entries over a candle series
use crate::catalog::{IndicatorKey, IndicatorParams, ParamOverrides};
use crate::config::settings::EngineSettings;
use crate::data::CandleSeries;
use crate::error::ConfigError;
use std::collections::{BTreeMap, BTreeSet, HashMap};

mod compute;
pub mod snapshot;
mod update;

pub use snapshot::{IndicatorSnapshot, KeyStatus};

/// Computes indicator lines for a set of enabled keys.
///
/// Holds only parameter overrides; every call is a pure function of its
/// arguments, so one engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    overrides: HashMap<IndicatorKey, ParamOverrides>,
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the overrides found in `settings`; overrides for names
    /// outside the catalog are dropped.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let mut engine = Self::new();
        for (name, overrides) in &settings.overrides {
            match name.parse::<IndicatorKey>() {
                Ok(key) => engine.set_overrides(key, overrides.clone()),
                Err(e) => tracing::debug!(error = %e, "Ignoring overrides for unknown indicator"),
            }
        }
        engine
    }

    /// Replaces the overrides of `key`. Nothing is validated here; invalid
    /// values surface as [`KeyStatus::Rejected`] for that key on the next run.
    pub fn set_overrides(&mut self, key: IndicatorKey, overrides: ParamOverrides) {
        if overrides.is_empty() {
            self.overrides.remove(&key);
        } else {
            self.overrides.insert(key, overrides);
        }
    }

    pub fn clear_overrides(&mut self, key: IndicatorKey) {
        self.overrides.remove(&key);
    }

    pub fn overrides(&self, key: IndicatorKey) -> Option<&ParamOverrides> {
        self.overrides.get(&key)
    }

    /// Catalog defaults for `key` with its overrides applied.
    pub fn resolve(&self, key: IndicatorKey) -> Result<IndicatorParams, ConfigError> {
        let defaults = key.descriptor().defaults;
        match self.overrides.get(&key) {
            Some(overrides) => defaults.with_overrides(overrides),
            None => Ok(defaults),
        }
    }

    /// Full recompute of every enabled key over `series`.
    pub fn compute(&self, series: &CandleSeries, enabled: &BTreeSet<IndicatorKey>) -> IndicatorSnapshot {
        tracing::debug!(candles = series.len(), keys = enabled.len(), "Computing indicators");
        let entries = enabled
            .iter()
            .map(|&key| (key, compute::compute_key(key, self.resolve(key), series)))
            .collect();
        IndicatorSnapshot::new(series, entries)
    }

    /// Brings `previous` up to date with `series` and `enabled`.
    ///
    /// When `series` is the previous series, with no candle revised, plus one
    /// candle, keys whose parameters did not change are extended by that
    /// candle only; newly enabled or re-parameterised keys are computed in full
    /// and disabled keys are dropped. Any other `series` falls back to
    /// [`IndicatorEngine::compute`]. The result always equals a fresh `compute`
    /// over the same arguments.
    pub fn update(
        &self,
        previous: IndicatorSnapshot,
        series: &CandleSeries,
        enabled: &BTreeSet<IndicatorKey>,
    ) -> IndicatorSnapshot {
        let Some(appended) = previous.appended_candle(series) else {
            tracing::debug!(
                previous = previous.candle_count(),
                candles = series.len(),
                "Series is not a one-candle extension, recomputing"
            );
            return self.compute(series, enabled);
        };

        let mut previous_entries = previous.entries;
        let entries: BTreeMap<_, _> = enabled
            .iter()
            .map(|&key| {
                let params = self.resolve(key);
                let entry = match previous_entries.remove(&key) {
                    Some(entry) if entry.params == params => update::append_key(entry, appended, series.len()),
                    _ => compute::compute_key(key, params, series),
                };
                (key, entry)
            })
            .collect();
        tracing::debug!(candles = series.len(), keys = entries.len(), "Updated indicators incrementally");
        IndicatorSnapshot::new(series, entries)
    }

    /// [`IndicatorEngine::compute`] over key names; names outside the catalog are ignored.
    pub fn compute_named<I, S>(&self, series: &CandleSeries, names: I) -> IndicatorSnapshot
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.compute(series, &IndicatorKey::parse_set(names))
    }
}
