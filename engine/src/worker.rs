// Runs engine computations on tokio's blocking pool
use crate::catalog::IndicatorKey;
use crate::data::CandleSeries;
use crate::error::EngineError;
use crate::services::{IndicatorEngine, IndicatorSnapshot};
use std::collections::BTreeSet;
use std::sync::Arc;

/// `IndicatorEngine::compute` off the async executor, for hosts with large
/// candle sets. The computation itself is unchanged and cannot be cancelled
/// midway; dropping the future only discards the result.
pub async fn compute_in_background(
    engine: Arc<IndicatorEngine>,
    series: Arc<CandleSeries>,
    enabled: BTreeSet<IndicatorKey>,
) -> Result<IndicatorSnapshot, EngineError> {
    tokio::task::spawn_blocking(move || engine.compute(&series, &enabled))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Background indicator computation failed");
            EngineError::Worker(e.to_string())
        })
}
