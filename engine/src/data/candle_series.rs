// Canonical, time-sorted view over raw candle input
use shared::models::Candle;
use std::ops::Deref;

/// Candles sorted strictly ascending by `open_time`, one per timestamp.
///
/// Built once from raw input and never patched in place; appending goes
/// through a full rebuild so the ordering invariant cannot drift.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Sorts the input and keeps only the last supplied candle for each open time.
    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = Candle>,
    {
        let mut sorted: Vec<Candle> = raw.into_iter().collect();
        // Stable sort: equal open times keep their input order, so the last one is the newest.
        sorted.sort_by_key(|c| c.open_time);

        let mut candles: Vec<Candle> = Vec::with_capacity(sorted.len());
        for candle in sorted {
            match candles.last_mut() {
                Some(prev) if prev.open_time == candle.open_time => *prev = candle,
                _ => candles.push(candle),
            }
        }

        Self { candles }
    }

    /// Rebuilds the series with extra candles merged in.
    pub fn with_candles<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = Candle>,
    {
        Self::from_raw(self.candles.iter().cloned().chain(extra))
    }

    pub fn with_appended(&self, candle: Candle) -> Self {
        self.with_candles(std::iter::once(candle))
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn into_candles(self) -> Vec<Candle> {
        self.candles
    }
}

impl Deref for CandleSeries {
    type Target = [Candle];

    fn deref(&self) -> &[Candle] {
        &self.candles
    }
}

impl FromIterator<Candle> for CandleSeries {
    fn from_iter<T: IntoIterator<Item = Candle>>(iter: T) -> Self {
        Self::from_raw(iter)
    }
}
