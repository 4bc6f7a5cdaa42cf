use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a linear fit of price over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Upward,
    Downward,
    Stable,
    /// Fewer valid sales than the engine needs to say anything.
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Upward => "Upward",
            Trend::Downward => "Downward",
            Trend::Stable => "Stable",
            Trend::InsufficientData => "Insufficient Data",
        };
        f.write_str(label)
    }
}

/// A discrete recommendation derived from trend, volatility and liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentRating {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Hold,
    Avoid,
    Speculative,
    Unknown,
}

impl fmt::Display for InvestmentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvestmentRating::StrongBuy => "Strong Buy",
            InvestmentRating::Hold => "Hold",
            InvestmentRating::Avoid => "Avoid",
            InvestmentRating::Speculative => "Speculative",
            InvestmentRating::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}
