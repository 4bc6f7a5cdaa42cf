use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

// --- Policy Defaults ---
// Fixed policy cut-offs with no derivation behind them. Existing ratings depend
// on these values; tune them from `config.toml`, not here.

/// A regression slope above this (price units per day) is an upward trend.
pub const DEFAULT_UPWARD_SLOPE: Decimal = dec!(0.5);
/// A regression slope below the negation of this is a downward trend.
pub const DEFAULT_DOWNWARD_SLOPE: Decimal = dec!(0.5);
/// Strong Buy requires volatility strictly below this.
pub const DEFAULT_STRONG_BUY_MAX_VOLATILITY: Decimal = dec!(0.3);
/// Strong Buy requires liquidity strictly above this.
pub const DEFAULT_STRONG_BUY_MIN_LIQUIDITY: Decimal = dec!(0.2);
/// Hold requires volatility strictly below this.
pub const DEFAULT_HOLD_MAX_VOLATILITY: Decimal = dec!(0.5);
/// Avoid requires volatility strictly above this.
pub const DEFAULT_AVOID_MIN_VOLATILITY: Decimal = dec!(0.4);

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisParams,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()
    }
}

/// Thresholds used by the trend engine to classify trends and rate a card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub upward_slope: Decimal,
    /// Magnitude of the downward cut-off; the slope is compared against its negation.
    pub downward_slope: Decimal,
    pub strong_buy_max_volatility: Decimal,
    pub strong_buy_min_liquidity: Decimal,
    pub hold_max_volatility: Decimal,
    pub avoid_min_volatility: Decimal,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            upward_slope: DEFAULT_UPWARD_SLOPE,
            downward_slope: DEFAULT_DOWNWARD_SLOPE,
            strong_buy_max_volatility: DEFAULT_STRONG_BUY_MAX_VOLATILITY,
            strong_buy_min_liquidity: DEFAULT_STRONG_BUY_MIN_LIQUIDITY,
            hold_max_volatility: DEFAULT_HOLD_MAX_VOLATILITY,
            avoid_min_volatility: DEFAULT_AVOID_MIN_VOLATILITY,
        }
    }
}

impl AnalysisParams {
    /// Every threshold is a magnitude, so negative values are rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("upward_slope", self.upward_slope),
            ("downward_slope", self.downward_slope),
            ("strong_buy_max_volatility", self.strong_buy_max_volatility),
            ("strong_buy_min_liquidity", self.strong_buy_min_liquidity),
            ("hold_max_volatility", self.hold_max_volatility),
            ("avoid_min_volatility", self.avoid_min_volatility),
        ];

        for (name, value) in thresholds {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ConfigError::ValidationError(format!(
                    "analysis.{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Contains parameters for the tracing subscriber installed by the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// If set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
