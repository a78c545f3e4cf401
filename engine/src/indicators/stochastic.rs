// Stochastic oscillator (%K / %D) indicator implementation
use super::{emit, IndicatorCalculator, IndicatorState, RollingWindow};
use crate::error::ConfigError;
use serde_json::Value;
use std::collections::VecDeque;
use shared::models::{Candle, IndicatorSeries};

/// %K reported for a window whose highest high equals its lowest low.
pub const FLAT_WINDOW_K: f64 = 50.0;

/// Stochastic oscillator.
///
/// %K = 100 · (close − lowest low) / (highest high − lowest low) over the
/// trailing `k_period` candles; %D is the SMA of %K over `d_period` points.
/// A flat window has no range to place the close in, so %K reads
/// [`FLAT_WINDOW_K`] there instead of dividing by zero.
pub struct Stochastic {
    name: String,
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Result<Self, ConfigError> {
        if k_period == 0 {
            return Err(ConfigError::non_positive("Stochastic", "k_period", 0));
        }
        if d_period == 0 {
            return Err(ConfigError::non_positive("Stochastic", "d_period", 0));
        }
        Ok(Self {
            name: format!("Stoch({},{})", k_period, d_period),
            k_period,
            d_period,
        })
    }
}

impl IndicatorCalculator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "k_period": self.k_period, "d_period": self.d_period })
    }

    fn lines(&self) -> &'static [&'static str] {
        &["k", "d"]
    }

    fn warmup(&self) -> usize {
        self.k_period
    }

    fn start(&self) -> Box<dyn IndicatorState> {
        Box::new(StochasticState {
            k_period: self.k_period,
            ranges: VecDeque::with_capacity(self.k_period),
            k_window: RollingWindow::new(self.d_period),
        })
    }
}

#[derive(Debug)]
struct StochasticState {
    k_period: usize,
    // (high, low) of the trailing candles
    ranges: VecDeque<(f64, f64)>,
    k_window: RollingWindow,
}

impl IndicatorState for StochasticState {
    fn push(&mut self, candle: &Candle, lines: &mut [IndicatorSeries]) {
        if self.ranges.len() == self.k_period {
            self.ranges.pop_front();
        }
        self.ranges.push_back((candle.high, candle.low));
        if self.ranges.len() < self.k_period {
            return;
        }

        let highest = self.ranges.iter().map(|r| r.0).fold(f64::NEG_INFINITY, f64::max);
        let lowest = self.ranges.iter().map(|r| r.1).fold(f64::INFINITY, f64::min);
        let k = if highest == lowest {
            FLAT_WINDOW_K
        } else {
            100.0 * (candle.close - lowest) / (highest - lowest)
        };

        let time = candle.open_time_secs();
        emit(&mut lines[0], time, k);
        self.k_window.push(k);
        if let Some(d) = self.k_window.mean() {
            emit(&mut lines[1], time, d);
        }
    }
}
