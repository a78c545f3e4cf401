// Engine library root
// Derives chart indicator lines (moving averages, RSI, MACD, Bollinger Bands,
// Stochastic, volume MA) from an OHLCV candle series.

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod services;
pub mod worker;

pub use catalog::{IndicatorDescriptor, IndicatorKey, IndicatorKind, IndicatorParams, ParamOverrides};
pub use config::EngineSettings;
pub use data::CandleSeries;
pub use error::{ConfigError, EngineError};
pub use services::{IndicatorEngine, IndicatorSnapshot, KeyStatus};
pub use shared::models::{Candle, IndicatorPoint, IndicatorSeries};
