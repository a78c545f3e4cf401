// Candle input handling
pub mod candle_series;

pub use candle_series::CandleSeries;
