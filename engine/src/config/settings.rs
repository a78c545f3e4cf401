// Engine settings: enabled indicators and per-key parameter overrides, loaded from JSON
use crate::catalog::{IndicatorKey, ParamOverrides};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Indicator key names to compute; names outside the catalog are ignored.
    pub enabled: Vec<String>,
    /// Key name to parameter overrides.
    pub overrides: HashMap<String, ParamOverrides>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        // The chart's initial overlay: a short and a medium moving average plus volume.
        EngineSettings {
            enabled: vec!["ma5".to_string(), "ma20".to_string(), "vol_ma".to_string()],
            overrides: HashMap::new(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            enabled = settings.enabled.len(),
            overrides = settings.overrides.len(),
            "Loaded engine settings"
        );
        Ok(settings)
    }

    pub fn enabled_keys(&self) -> BTreeSet<IndicatorKey> {
        IndicatorKey::parse_set(&self.enabled)
    }
}
