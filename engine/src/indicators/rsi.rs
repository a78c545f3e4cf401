// Relative Strength Index (RSI) indicator implementation
use super::{emit, IndicatorCalculator, IndicatorState};
use crate::error::ConfigError;
use serde_json::Value;
use shared::models::{Candle, IndicatorSeries};

/// RSI with Wilder smoothing.
///
/// Averages are seeded with the plain mean of the first `period` gains and
/// losses; the first point lands on the candle at index `period`. With no
/// losses in the average the RSI is pinned to 100.
pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::non_positive("RSI", "period", 0));
        }
        Ok(Self {
            name: format!("RSI({})", period),
            period,
        })
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn lines(&self) -> &'static [&'static str] {
        &["rsi"]
    }

    fn warmup(&self) -> usize {
        self.period + 1
    }

    fn start(&self) -> Box<dyn IndicatorState> {
        Box::new(RsiState {
            period: self.period,
            prev_close: None,
            changes: 0,
            gains: 0.0,
            losses: 0.0,
            averages: None,
        })
    }
}

#[derive(Debug)]
struct RsiState {
    period: usize,
    prev_close: Option<f64>,
    changes: usize,
    // Sums over the seeding window, unused once `averages` is set.
    gains: f64,
    losses: f64,
    averages: Option<(f64, f64)>,
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

impl IndicatorState for RsiState {
    fn push(&mut self, candle: &Candle, lines: &mut [IndicatorSeries]) {
        let prev = self.prev_close.replace(candle.close);
        let Some(prev) = prev else {
            return;
        };

        let change = candle.close - prev;
        let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };
        self.changes += 1;

        let period = self.period as f64;
        let (avg_gain, avg_loss) = match self.averages {
            Some((avg_gain, avg_loss)) => (
                (avg_gain * (period - 1.0) + gain) / period,
                (avg_loss * (period - 1.0) + loss) / period,
            ),
            None => {
                self.gains += gain;
                self.losses += loss;
                if self.changes < self.period {
                    return;
                }
                (self.gains / period, self.losses / period)
            }
        };

        self.averages = Some((avg_gain, avg_loss));
        emit(&mut lines[0], candle.open_time_secs(), rsi_value(avg_gain, avg_loss));
    }
}
