// Volume moving average: SMA mechanics over `volume` instead of `close`
use super::{CandleField, IndicatorCalculator, IndicatorState, Sma};
use crate::error::ConfigError;
use serde_json::Value;

pub struct VolumeMa {
    inner: Sma,
}

impl VolumeMa {
    pub fn new(period: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Sma::over(CandleField::Volume, period)?,
        })
    }
}

impl IndicatorCalculator for VolumeMa {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn parameters(&self) -> Value {
        self.inner.parameters()
    }

    fn lines(&self) -> &'static [&'static str] {
        &["volume_ma"]
    }

    fn warmup(&self) -> usize {
        self.inner.warmup()
    }

    fn start(&self) -> Box<dyn IndicatorState> {
        self.inner.start()
    }
}
