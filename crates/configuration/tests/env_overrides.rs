//! Environment overrides for `load_config`.
//!
//! Kept to a single test: the process environment is global, and parallel
//! tests setting `CARDPULSE__*` variables would race each other.

use configuration::{DEFAULT_DOWNWARD_SLOPE, load_config};
use rust_decimal_macros::dec;
use std::io::Write;

const UPWARD_SLOPE_VAR: &str = "CARDPULSE__ANALYSIS__UPWARD_SLOPE";
const LOG_LEVEL_VAR: &str = "CARDPULSE__LOGGING__LEVEL";

#[test]
fn environment_variables_take_precedence_over_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[analysis]\nupward_slope = 1.25\n\n[logging]\nlevel = \"debug\"").unwrap();

    // SAFETY: this is the only test in this binary touching the environment.
    unsafe {
        std::env::set_var(UPWARD_SLOPE_VAR, "1.75");
        std::env::set_var(LOG_LEVEL_VAR, "warn");
    }
    let loaded = load_config(&path);
    unsafe {
        std::env::remove_var(UPWARD_SLOPE_VAR);
        std::env::remove_var(LOG_LEVEL_VAR);
    }

    let config = loaded.unwrap();
    assert_eq!(config.analysis.upward_slope, dec!(1.75));
    assert_eq!(config.logging.level, "warn");
    // Untouched keys still come from the defaults.
    assert_eq!(config.analysis.downward_slope, DEFAULT_DOWNWARD_SLOPE);

    // With the overrides gone, the file value is back in charge.
    let config = load_config(&path).unwrap();
    assert_eq!(config.analysis.upward_slope, dec!(1.25));
}
