//! Fixed catalog of chart indicators.
//!
//! Every [`IndicatorKey`] maps to exactly one calculator kind, its default
//! parameters and the names of the lines it contributes to an engine result.

use crate::error::{require_period, ConfigError};
use crate::indicators::{
    BollingerBands, Ema, IndicatorCalculator, Macd, Rsi, Sma, Stochastic, VolumeMa,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKey {
    Ma5,
    Ma10,
    Ma20,
    Ma50,
    Ma200,
    Ema12,
    Ema26,
    Rsi,
    Stoch,
    Macd,
    Bb,
    VolMa,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 12] = [
        IndicatorKey::Ma5,
        IndicatorKey::Ma10,
        IndicatorKey::Ma20,
        IndicatorKey::Ma50,
        IndicatorKey::Ma200,
        IndicatorKey::Ema12,
        IndicatorKey::Ema26,
        IndicatorKey::Rsi,
        IndicatorKey::Stoch,
        IndicatorKey::Macd,
        IndicatorKey::Bb,
        IndicatorKey::VolMa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorKey::Ma5 => "ma5",
            IndicatorKey::Ma10 => "ma10",
            IndicatorKey::Ma20 => "ma20",
            IndicatorKey::Ma50 => "ma50",
            IndicatorKey::Ma200 => "ma200",
            IndicatorKey::Ema12 => "ema12",
            IndicatorKey::Ema26 => "ema26",
            IndicatorKey::Rsi => "rsi",
            IndicatorKey::Stoch => "stoch",
            IndicatorKey::Macd => "macd",
            IndicatorKey::Bb => "bb",
            IndicatorKey::VolMa => "vol_ma",
        }
    }

    /// Collects the recognized keys from `names`; names outside the catalog are skipped.
    pub fn parse_set<I, S>(names: I) -> BTreeSet<IndicatorKey>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let key = name.parse::<IndicatorKey>().ok();
                if key.is_none() {
                    tracing::debug!(name, "Ignoring indicator outside the catalog");
                }
                key
            })
            .collect()
    }

    pub fn descriptor(self) -> IndicatorDescriptor {
        use IndicatorParams as P;
        match self {
            IndicatorKey::Ma5 => self.entry(P::SimpleMa { period: 5 }, &["ma5"], true),
            IndicatorKey::Ma10 => self.entry(P::SimpleMa { period: 10 }, &["ma10"], true),
            IndicatorKey::Ma20 => self.entry(P::SimpleMa { period: 20 }, &["ma20"], true),
            IndicatorKey::Ma50 => self.entry(P::SimpleMa { period: 50 }, &["ma50"], true),
            IndicatorKey::Ma200 => self.entry(P::SimpleMa { period: 200 }, &["ma200"], true),
            IndicatorKey::Ema12 => self.entry(P::Ema { period: 12 }, &["ema12"], true),
            IndicatorKey::Ema26 => self.entry(P::Ema { period: 26 }, &["ema26"], true),
            IndicatorKey::Rsi => self.entry(P::Rsi { period: 14 }, &["rsi"], false),
            IndicatorKey::Stoch => self.entry(
                P::Stochastic { k_period: 14, d_period: 3 },
                &["stoch_k", "stoch_d"],
                false,
            ),
            IndicatorKey::Macd => self.entry(
                P::Macd { fast: 12, slow: 26, signal: 9 },
                &["macd", "macd_signal", "macd_histogram"],
                false,
            ),
            IndicatorKey::Bb => self.entry(
                P::BollingerBands { period: 20, std_dev_multiplier: 2.0 },
                &["bb_upper", "bb_middle", "bb_lower"],
                true,
            ),
            IndicatorKey::VolMa => self.entry(P::VolumeMa { period: 20 }, &["vol_ma"], false),
        }
    }

    fn entry(self, defaults: IndicatorParams, outputs: &'static [&'static str], overlay: bool) -> IndicatorDescriptor {
        IndicatorDescriptor {
            key: self,
            kind: defaults.kind(),
            defaults,
            outputs,
            overlay,
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown indicator: {0}")]
pub struct UnknownIndicator(pub String);

impl FromStr for IndicatorKey {
    type Err = UnknownIndicator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownIndicator(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    SimpleMa,
    Ema,
    Rsi,
    Macd,
    BollingerBands,
    Stochastic,
    VolumeMa,
}

/// Resolved parameters of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorParams {
    SimpleMa { period: usize },
    Ema { period: usize },
    Rsi { period: usize },
    Macd { fast: usize, slow: usize, signal: usize },
    BollingerBands { period: usize, std_dev_multiplier: f64 },
    Stochastic { k_period: usize, d_period: usize },
    VolumeMa { period: usize },
}

/// Per-key parameter overrides as they arrive from settings.
///
/// Periods are signed so that zero and negative values survive
/// deserialization and are reported as configuration errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamOverrides {
    pub period: Option<i64>,
    pub fast: Option<i64>,
    pub slow: Option<i64>,
    pub signal: Option<i64>,
    pub std_dev_multiplier: Option<f64>,
    pub k_period: Option<i64>,
    pub d_period: Option<i64>,
}

impl ParamOverrides {
    pub fn period(period: i64) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn resolve(indicator: &'static str, param: &'static str, current: usize, value: Option<i64>) -> Result<usize, ConfigError> {
    match value {
        Some(value) => require_period(indicator, param, value),
        None => Ok(current),
    }
}

impl IndicatorParams {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorParams::SimpleMa { .. } => IndicatorKind::SimpleMa,
            IndicatorParams::Ema { .. } => IndicatorKind::Ema,
            IndicatorParams::Rsi { .. } => IndicatorKind::Rsi,
            IndicatorParams::Macd { .. } => IndicatorKind::Macd,
            IndicatorParams::BollingerBands { .. } => IndicatorKind::BollingerBands,
            IndicatorParams::Stochastic { .. } => IndicatorKind::Stochastic,
            IndicatorParams::VolumeMa { .. } => IndicatorKind::VolumeMa,
        }
    }

    /// Applies the overrides that make sense for this kind; the rest are ignored.
    pub fn with_overrides(self, overrides: &ParamOverrides) -> Result<IndicatorParams, ConfigError> {
        let params = match self {
            IndicatorParams::SimpleMa { period } => IndicatorParams::SimpleMa {
                period: resolve("SMA", "period", period, overrides.period)?,
            },
            IndicatorParams::Ema { period } => IndicatorParams::Ema {
                period: resolve("EMA", "period", period, overrides.period)?,
            },
            IndicatorParams::Rsi { period } => IndicatorParams::Rsi {
                period: resolve("RSI", "period", period, overrides.period)?,
            },
            IndicatorParams::Macd { fast, slow, signal } => IndicatorParams::Macd {
                fast: resolve("MACD", "fast", fast, overrides.fast)?,
                slow: resolve("MACD", "slow", slow, overrides.slow)?,
                signal: resolve("MACD", "signal", signal, overrides.signal)?,
            },
            IndicatorParams::BollingerBands { period, std_dev_multiplier } => IndicatorParams::BollingerBands {
                period: resolve("Bollinger", "period", period, overrides.period)?,
                std_dev_multiplier: overrides.std_dev_multiplier.unwrap_or(std_dev_multiplier),
            },
            IndicatorParams::Stochastic { k_period, d_period } => IndicatorParams::Stochastic {
                k_period: resolve("Stochastic", "k_period", k_period, overrides.k_period)?,
                d_period: resolve("Stochastic", "d_period", d_period, overrides.d_period)?,
            },
            IndicatorParams::VolumeMa { period } => IndicatorParams::VolumeMa {
                period: resolve("VolMA", "period", period, overrides.period)?,
            },
        };
        Ok(params)
    }

    /// Constructs the calculator; this is where invalid parameters are rejected.
    pub fn build(&self) -> Result<Box<dyn IndicatorCalculator>, ConfigError> {
        let calculator: Box<dyn IndicatorCalculator> = match *self {
            IndicatorParams::SimpleMa { period } => Box::new(Sma::new(period)?),
            IndicatorParams::Ema { period } => Box::new(Ema::new(period)?),
            IndicatorParams::Rsi { period } => Box::new(Rsi::new(period)?),
            IndicatorParams::Macd { fast, slow, signal } => Box::new(Macd::new(fast, slow, signal)?),
            IndicatorParams::BollingerBands { period, std_dev_multiplier } => {
                Box::new(BollingerBands::new(period, std_dev_multiplier)?)
            }
            IndicatorParams::Stochastic { k_period, d_period } => Box::new(Stochastic::new(k_period, d_period)?),
            IndicatorParams::VolumeMa { period } => Box::new(VolumeMa::new(period)?),
        };
        Ok(calculator)
    }
}

/// Catalog entry for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorDescriptor {
    pub key: IndicatorKey,
    pub kind: IndicatorKind,
    pub defaults: IndicatorParams,
    /// Output names, one per calculator line and in the same order.
    pub outputs: &'static [&'static str],
    /// Drawn on the price pane rather than in a separate panel.
    pub overlay: bool,
}

impl IndicatorDescriptor {
    pub fn cardinality(&self) -> usize {
        self.outputs.len()
    }
}
