use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::millis_to_secs;

/// One OHLCV bar. Timestamps are milliseconds since the Unix epoch.
///
/// `high >= max(open, close)` and `low <= min(open, close)` are expected but
/// not validated; consumers must tolerate bars that break them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub trade_count: u64,
}

impl Candle {
    /// Open time truncated to whole seconds, the time axis used by indicator points.
    pub fn open_time_secs(&self) -> i64 {
        millis_to_secs(self.open_time)
    }

    pub fn open_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.open_time)
    }

    pub fn close_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.close_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    /// Seconds; equal to the source candle's open time.
    pub time: i64,
    pub value: f64,
}

impl IndicatorPoint {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// One plotted line of an indicator, already stripped of its warm-up gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub parameters: serde_json::Value,
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn new(name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            parameters,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn last(&self) -> Option<&IndicatorPoint> {
        self.points.last()
    }
}
