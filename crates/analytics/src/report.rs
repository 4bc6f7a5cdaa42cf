use chrono::{DateTime, Utc};
use core_types::{CardQuery, InvestmentRating, Trend};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The market signals derived from one sale history.
///
/// `volatility` and `liquidity` are `None` exactly when the trend is
/// `InsufficientData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub trend: Trend,
    /// Coefficient of variation of prices, two decimal places.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub volatility: Option<Decimal>,
    /// Valid sales per day of observed span, two decimal places.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub liquidity: Option<Decimal>,
    pub investment_rating: InvestmentRating,
}

impl AnalysisResult {
    /// The result for a history too thin to analyze.
    pub fn insufficient_data() -> Self {
        Self {
            trend: Trend::InsufficientData,
            volatility: None,
            liquidity: None,
            investment_rating: InvestmentRating::Unknown,
        }
    }

    /// Attaches the caller's context, turning the result into a report.
    pub fn stamp(self, card: Option<CardQuery>, last_updated: DateTime<Utc>) -> MarketReport {
        MarketReport {
            card,
            analysis: self,
            last_updated,
        }
    }
}

/// An `AnalysisResult` as handed to consumers, with the time it was produced.
///
/// The engine never reads the clock; `last_updated` is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    #[serde(flatten)]
    pub card: Option<CardQuery>,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub last_updated: DateTime<Utc>,
}

/// How many input records survived filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SampleDiagnostics {
    pub accepted: usize,
    pub dropped: usize,
}

/// An `AnalysisResult` together with data-quality counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub diagnostics: SampleDiagnostics,
}
