// Simple Moving Average (SMA) indicator implementation
use super::{emit, CandleField, IndicatorCalculator, IndicatorState, RollingWindow};
use crate::error::ConfigError;
use serde_json::Value;
use shared::models::{Candle, IndicatorSeries};

pub struct Sma {
    name: String,
    period: usize,
    field: CandleField,
}

impl Sma {
    /// SMA over closing prices.
    pub fn new(period: usize) -> Result<Self, ConfigError> {
        Self::over(CandleField::Close, period)
    }

    pub fn over(field: CandleField, period: usize) -> Result<Self, ConfigError> {
        let indicator = match field {
            CandleField::Close => "SMA",
            CandleField::Volume => "VolMA",
        };
        if period == 0 {
            return Err(ConfigError::non_positive(indicator, "period", 0));
        }
        Ok(Self {
            name: format!("{}({})", indicator, period),
            period,
            field,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn lines(&self) -> &'static [&'static str] {
        &["sma"]
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn start(&self) -> Box<dyn IndicatorState> {
        Box::new(SmaState {
            field: self.field,
            window: RollingWindow::new(self.period),
        })
    }
}

#[derive(Debug)]
struct SmaState {
    field: CandleField,
    window: RollingWindow,
}

impl IndicatorState for SmaState {
    fn push(&mut self, candle: &Candle, lines: &mut [IndicatorSeries]) {
        self.window.push(self.field.of(candle));
        if let Some(mean) = self.window.mean() {
            emit(&mut lines[0], candle.open_time_secs(), mean);
        }
    }
}
