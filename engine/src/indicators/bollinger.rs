// Bollinger Bands indicator implementation
//
// Middle band is the SMA of closes; upper/lower sit `multiplier` population
// standard deviations away, measured over the same trailing window.
use super::{emit, IndicatorCalculator, IndicatorState, RollingWindow};
use crate::error::ConfigError;
use serde_json::Value;
use shared::models::{Candle, IndicatorSeries};

pub struct BollingerBands {
    name: String,
    period: usize,
    multiplier: f64,
}

impl BollingerBands {
    pub fn new(period: usize, multiplier: f64) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::non_positive("Bollinger", "period", 0));
        }
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(ConfigError::InvalidMultiplier {
                indicator: "Bollinger",
                value: multiplier,
            });
        }
        Ok(Self {
            name: format!("BB({},{})", period, multiplier),
            period,
            multiplier,
        })
    }
}

impl IndicatorCalculator for BollingerBands {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "std_dev_multiplier": self.multiplier })
    }

    fn lines(&self) -> &'static [&'static str] {
        &["upper", "middle", "lower"]
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn start(&self) -> Box<dyn IndicatorState> {
        Box::new(BollingerState {
            multiplier: self.multiplier,
            window: RollingWindow::new(self.period),
        })
    }
}

#[derive(Debug)]
struct BollingerState {
    multiplier: f64,
    window: RollingWindow,
}

impl IndicatorState for BollingerState {
    fn push(&mut self, candle: &Candle, lines: &mut [IndicatorSeries]) {
        self.window.push(candle.close);
        let Some(middle) = self.window.mean() else {
            return;
        };
        let band = self.multiplier * self.window.std_dev(middle);
        let time = candle.open_time_secs();
        emit(&mut lines[0], time, middle + band);
        emit(&mut lines[1], time, middle);
        emit(&mut lines[2], time, middle - band);
    }
}
