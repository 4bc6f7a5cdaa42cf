//! # Cardpulse Analytics Engine
//!
//! This crate turns the observed sale history of a collectible card into a compact set
//! of market signals: trend direction, volatility, liquidity and an investment rating.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of scrapers, APIs
//!   or storage. It depends only on `core-types` and `configuration` (Layer 0).
//! - **Stateless Calculation:** The `TrendEngine` holds nothing but its thresholds. It takes
//!   raw sales as input and produces an `AnalysisResult` as output, so it can be shared
//!   freely across threads.
//! - **Degenerate input is data:** Malformed sales are skipped and thin histories yield the
//!   `Insufficient Data` / `Unknown` result instead of an error.
//!
//! ## Public API
//!
//! - `TrendEngine`: The main struct that contains the calculation logic.
//! - `AnalysisResult`: The four signals produced for one sale history.
//! - `MarketReport`: An `AnalysisResult` stamped by the caller with a card and a timestamp.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{TrendEngine, MIN_OBSERVATIONS};
pub use error::AnalyticsError;
pub use report::{Analysis, AnalysisResult, MarketReport, SampleDiagnostics};
