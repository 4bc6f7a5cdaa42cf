use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    AnalysisParams, Config, LoggingConfig, DEFAULT_AVOID_MIN_VOLATILITY, DEFAULT_DOWNWARD_SLOPE,
    DEFAULT_HOLD_MAX_VOLATILITY, DEFAULT_STRONG_BUY_MAX_VOLATILITY,
    DEFAULT_STRONG_BUY_MIN_LIQUIDITY, DEFAULT_UPWARD_SLOPE,
};

/// The prefix for environment variable overrides, e.g. `CARDPULSE__ANALYSIS__UPWARD_SLOPE`.
pub const ENV_PREFIX: &str = "CARDPULSE";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file at `path` (optional,
/// a missing file is not an error), then `CARDPULSE__*` environment variables.
/// A `.env` file in the working directory is read first if present.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}
