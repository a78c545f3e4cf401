// Engine services
pub mod indicator_engine;

pub use indicator_engine::{IndicatorEngine, IndicatorSnapshot, KeyStatus};
