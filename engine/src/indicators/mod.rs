// Technical indicators module
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume_ma;

pub use bollinger::BollingerBands;
pub use ema::Ema;
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use volume_ma::VolumeMa;

use crate::data::CandleSeries;
use serde_json::Value;
use shared::models::{Candle, IndicatorPoint, IndicatorSeries};
use std::collections::VecDeque;
use std::fmt::Debug;

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;

    /// Parameters used for this indicator instance.
    fn parameters(&self) -> Value;

    /// Generic names of the lines this calculator emits, in output order.
    fn lines(&self) -> &'static [&'static str];

    /// Candles required before the first point is emitted.
    fn warmup(&self) -> usize;

    /// Fresh per-candle state, positioned before the first candle.
    fn start(&self) -> Box<dyn IndicatorState>;

    /// Runs the calculator over the whole series. Too little data yields empty lines.
    fn calculate(&self, series: &CandleSeries) -> Vec<IndicatorSeries> {
        let mut lines: Vec<IndicatorSeries> = self
            .lines()
            .iter()
            .map(|line| IndicatorSeries::new(*line, self.parameters()))
            .collect();
        run(self.start().as_mut(), series, &mut lines);
        lines
    }
}

/// Streaming state of one calculator.
///
/// `push` consumes the next candle and appends whatever points it completes to
/// `lines`, which always has one entry per `IndicatorCalculator::lines`.
/// Full and incremental computation go through the same `push`, so both
/// produce bit-identical values.
pub trait IndicatorState: Debug + Send {
    fn push(&mut self, candle: &Candle, lines: &mut [IndicatorSeries]);
}

pub(crate) fn run(state: &mut dyn IndicatorState, candles: &[Candle], lines: &mut [IndicatorSeries]) {
    for candle in candles {
        state.push(candle, lines);
    }
}

pub(crate) fn emit(line: &mut IndicatorSeries, time: i64, value: f64) {
    line.points.push(IndicatorPoint::new(time, value));
}

/// Candle field a moving average is taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleField {
    Close,
    Volume,
}

impl CandleField {
    pub fn of(self, candle: &Candle) -> f64 {
        match self {
            CandleField::Close => candle.close,
            CandleField::Volume => candle.volume,
        }
    }
}

/// Trailing window of the last `period` values.
///
/// The mean is summed fresh from the window each time (oldest first) rather
/// than kept as a running sum, so it matches a direct average of the same
/// values exactly and never accumulates drift.
#[derive(Debug, Clone)]
pub(crate) struct RollingWindow {
    period: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    pub(crate) fn new(period: usize) -> Self {
        Self {
            period,
            values: VecDeque::with_capacity(period),
        }
    }

    pub(crate) fn push(&mut self, value: f64) {
        if self.values.len() == self.period {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub(crate) fn is_full(&self) -> bool {
        self.values.len() == self.period
    }

    pub(crate) fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.period as f64)
    }

    /// Population standard deviation around `mean`.
    pub(crate) fn std_dev(&self, mean: f64) -> f64 {
        let variance = self.values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / self.period as f64;
        variance.sqrt()
    }
}

/// Exponential smoothing seeded with the first input: out[0] = x[0],
/// out[i] = x[i]·k + out[i−1]·(1−k) with k = 2/(period+1).
#[derive(Debug, Clone)]
pub(crate) struct EmaSmoother {
    k: f64,
    last: Option<f64>,
}

impl EmaSmoother {
    pub(crate) fn new(period: usize) -> Self {
        Self {
            k: 2.0 / (period as f64 + 1.0),
            last: None,
        }
    }

    pub(crate) fn next(&mut self, value: f64) -> f64 {
        let ema = match self.last {
            None => value,
            Some(prev) => value * self.k + prev * (1.0 - self.k),
        };
        self.last = Some(ema);
        ema
    }
}
