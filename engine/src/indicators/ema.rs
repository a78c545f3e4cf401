// Exponential Moving Average (EMA) indicator implementation
use super::{emit, EmaSmoother, IndicatorCalculator, IndicatorState};
use crate::error::ConfigError;
use serde_json::Value;
use shared::models::{Candle, IndicatorSeries};

/// EMA over closing prices.
///
/// Seeded with the first close rather than an SMA warm-up, so it emits one
/// point per candle from the very first one. Moving averages in `sma` need a
/// full window instead; charts rely on that difference.
pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::non_positive("EMA", "period", 0));
        }
        Ok(Self {
            name: format!("EMA({})", period),
            period,
        })
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn lines(&self) -> &'static [&'static str] {
        &["ema"]
    }

    fn warmup(&self) -> usize {
        1
    }

    fn start(&self) -> Box<dyn IndicatorState> {
        Box::new(EmaState {
            smoother: EmaSmoother::new(self.period),
        })
    }
}

#[derive(Debug)]
struct EmaState {
    smoother: EmaSmoother,
}

impl IndicatorState for EmaState {
    fn push(&mut self, candle: &Candle, lines: &mut [IndicatorSeries]) {
        let ema = self.smoother.next(candle.close);
        emit(&mut lines[0], candle.open_time_secs(), ema);
    }
}
