// Full computation of one key over a candle series
use super::snapshot::KeyEntry;
use crate::catalog::{IndicatorKey, IndicatorParams};
use crate::error::ConfigError;
use crate::indicators::run;
use shared::models::{Candle, IndicatorSeries};

pub(super) fn compute_key(
    key: IndicatorKey,
    params: Result<IndicatorParams, ConfigError>,
    candles: &[Candle],
) -> KeyEntry {
    let calculator = match params.clone().and_then(|p| p.build()) {
        Ok(calculator) => calculator,
        Err(error) => {
            tracing::warn!(key = %key, error = %error, "Indicator configuration rejected");
            return KeyEntry::rejected(params, error);
        }
    };

    let parameters = calculator.parameters();
    let mut outputs: Vec<IndicatorSeries> = key
        .descriptor()
        .outputs
        .iter()
        .map(|name| IndicatorSeries::new(*name, parameters.clone()))
        .collect();
    let mut state = calculator.start();
    run(state.as_mut(), candles, &mut outputs);

    let mut entry = KeyEntry {
        params,
        status: super::KeyStatus::Computed,
        outputs,
        warmup: calculator.warmup(),
        state: Some(state),
    };
    entry.refresh_status(candles.len());
    tracing::debug!(
        key = %key,
        indicator = calculator.name(),
        points = entry.point_count(),
        status = ?entry.status,
        "Computed indicator"
    );
    entry
}
