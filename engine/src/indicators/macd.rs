// Moving Average Convergence Divergence (MACD) indicator implementation
use super::{emit, EmaSmoother, IndicatorCalculator, IndicatorState};
use crate::error::ConfigError;
use serde_json::Value;
use std::collections::VecDeque;
use shared::models::{Candle, IndicatorSeries};

/// MACD line, signal line and histogram.
///
/// Both EMAs are seeded from the first close. The MACD line pairs fast EMA
/// entry `i` with slow EMA entry `i + (slow - fast)` whenever that index
/// exists and is stamped with the time of candle `i`, so it has
/// `len - |slow - fast|` points. When `fast > slow` the offset is negative and
/// fast entry `i` meets the slow entry `fast - slow` candles before it. The
/// signal line is an EMA of the MACD line seeded with its first value; the
/// histogram is `macd - signal` over the same points.
pub struct Macd {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self, ConfigError> {
        for (param, value) in [("fast", fast), ("slow", slow), ("signal", signal)] {
            if value == 0 {
                return Err(ConfigError::non_positive("MACD", param, 0));
            }
        }
        Ok(Self {
            name: format!("MACD({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        })
    }

    fn offset(&self) -> usize {
        self.slow.abs_diff(self.fast)
    }

    fn lagging(&self) -> Lagging {
        if self.fast <= self.slow {
            Lagging::Fast
        } else {
            Lagging::Slow
        }
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    fn lines(&self) -> &'static [&'static str] {
        &["macd", "signal", "histogram"]
    }

    fn warmup(&self) -> usize {
        self.offset() + 1
    }

    fn start(&self) -> Box<dyn IndicatorState> {
        Box::new(MacdState {
            offset: self.offset(),
            lagging: self.lagging(),
            fast: EmaSmoother::new(self.fast),
            slow: EmaSmoother::new(self.slow),
            signal: EmaSmoother::new(self.signal),
            pending: VecDeque::with_capacity(self.offset() + 1),
        })
    }
}

/// Which EMA waits in the buffer for its partner.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Lagging {
    /// `fast <= slow`: fast entry `i` waits for slow entry `i + offset`.
    Fast,
    /// `fast > slow`: slow entry `i - offset` waits for fast entry `i`.
    Slow,
}

#[derive(Debug)]
struct MacdState {
    offset: usize,
    lagging: Lagging,
    fast: EmaSmoother,
    slow: EmaSmoother,
    signal: EmaSmoother,
    // (time, EMA of the lagging side) for the last `offset + 1` candles.
    pending: VecDeque<(i64, f64)>,
}

impl IndicatorState for MacdState {
    fn push(&mut self, candle: &Candle, lines: &mut [IndicatorSeries]) {
        let fast = self.fast.next(candle.close);
        let slow = self.slow.next(candle.close);
        let now = candle.open_time_secs();
        let held = match self.lagging {
            Lagging::Fast => fast,
            Lagging::Slow => slow,
        };
        self.pending.push_back((now, held));
        if self.pending.len() <= self.offset {
            return;
        }
        let Some((held_time, held)) = self.pending.pop_front() else {
            return;
        };

        let (time, macd) = match self.lagging {
            Lagging::Fast => (held_time, held - slow),
            Lagging::Slow => (now, fast - held),
        };
        let signal = self.signal.next(macd);
        emit(&mut lines[0], time, macd);
        emit(&mut lines[1], time, signal);
        emit(&mut lines[2], time, macd - signal);
    }
}
