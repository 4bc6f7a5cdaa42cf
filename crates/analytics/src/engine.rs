use crate::error::AnalyticsError;
use crate::report::{Analysis, AnalysisResult, SampleDiagnostics};
use crate::stats;
use configuration::AnalysisParams;
use core_types::{InvestmentRating, SaleObservation, SaleRecord, Trend};
use rust_decimal::Decimal;

/// Below this many valid sales no statistical signal is reported.
pub const MIN_OBSERVATIONS: usize = 3;

/// A stateless calculator for deriving market signals from a card's sale history.
#[derive(Debug, Clone, Default)]
pub struct TrendEngine {
    params: AnalysisParams,
}

impl TrendEngine {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    /// The main entry point for analyzing a sale history.
    ///
    /// # Arguments
    ///
    /// * `records` - Sales in any order. Records with a missing or non-positive price,
    ///   or a missing or unparseable date, are skipped.
    ///
    /// # Returns
    ///
    /// The `AnalysisResult`. This never fails: thin histories, and the arithmetic
    /// overflow that only absurd prices can trigger, both yield
    /// `AnalysisResult::insufficient_data()`.
    pub fn analyze<R: SaleRecord>(&self, records: &[R]) -> AnalysisResult {
        self.analyze_detailed(records).result
    }

    /// Same as `analyze`, but also reports how many records were dropped.
    pub fn analyze_detailed<R: SaleRecord>(&self, records: &[R]) -> Analysis {
        let sales = collect_valid(records);
        let diagnostics = SampleDiagnostics {
            accepted: sales.len(),
            dropped: records.len() - sales.len(),
        };
        if diagnostics.dropped > 0 {
            tracing::debug!(
                accepted = diagnostics.accepted,
                dropped = diagnostics.dropped,
                "Skipped malformed sale records."
            );
        }

        let result = match self.evaluate(sales) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "Analysis degraded to insufficient data.");
                AnalysisResult::insufficient_data()
            }
        };

        Analysis {
            result,
            diagnostics,
        }
    }

    /// Same as `analyze`, but surfaces arithmetic failures instead of degrading.
    pub fn try_analyze<R: SaleRecord>(
        &self,
        records: &[R],
    ) -> Result<AnalysisResult, AnalyticsError> {
        self.evaluate(collect_valid(records))
    }

    fn evaluate(&self, mut sales: Vec<SaleObservation>) -> Result<AnalysisResult, AnalyticsError> {
        if sales.len() < MIN_OBSERVATIONS {
            return Ok(AnalysisResult::insufficient_data());
        }

        // Stable, so same-day sales keep their input order.
        sales.sort_by_key(|s| s.date);
        let first_date = sales[0].date;
        let last_date = sales[sales.len() - 1].date;

        let days: Vec<Decimal> = sales
            .iter()
            .map(|s| Decimal::from((s.date - first_date).num_days()))
            .collect();
        let prices: Vec<Decimal> = sales.iter().map(|s| s.price).collect();

        let slope = stats::regression_slope(&days, &prices)?;
        let trend = self.classify_trend(slope);

        let mean_price = stats::mean(&prices)?;
        let volatility = stats::population_std_dev(&prices)?
            .checked_div(mean_price)
            .ok_or_else(|| AnalyticsError::DivisionByZero("volatility".to_string()))?;
        let volatility = stats::round_metric(volatility);

        // A single-day history still counts as one day.
        let span_days = (last_date - first_date).num_days().max(1);
        let liquidity = Decimal::from(sales.len())
            .checked_div(Decimal::from(span_days))
            .ok_or_else(|| AnalyticsError::DivisionByZero("liquidity".to_string()))?;
        let liquidity = stats::round_metric(liquidity);

        let investment_rating = self.rate(trend, volatility, liquidity);

        tracing::debug!(
            sales = sales.len(),
            %slope,
            %volatility,
            %liquidity,
            %trend,
            %investment_rating,
            "Sale history analyzed."
        );

        Ok(AnalysisResult {
            trend,
            volatility: Some(volatility),
            liquidity: Some(liquidity),
            investment_rating,
        })
    }

    /// Maps a regression slope (price units per day) to a trend. Both bounds are strict.
    pub fn classify_trend(&self, slope: Decimal) -> Trend {
        if slope > self.params.upward_slope {
            Trend::Upward
        } else if slope < -self.params.downward_slope {
            Trend::Downward
        } else {
            Trend::Stable
        }
    }

    /// Applies the rating rules in priority order; the first match wins.
    pub fn rate(&self, trend: Trend, volatility: Decimal, liquidity: Decimal) -> InvestmentRating {
        let p = &self.params;
        match trend {
            Trend::InsufficientData => InvestmentRating::Unknown,
            Trend::Upward
                if volatility < p.strong_buy_max_volatility
                    && liquidity > p.strong_buy_min_liquidity =>
            {
                InvestmentRating::StrongBuy
            }
            Trend::Stable if volatility < p.hold_max_volatility => InvestmentRating::Hold,
            Trend::Downward if volatility > p.avoid_min_volatility => InvestmentRating::Avoid,
            _ => InvestmentRating::Speculative,
        }
    }
}

fn collect_valid<R: SaleRecord>(records: &[R]) -> Vec<SaleObservation> {
    records.iter().filter_map(|r| r.to_observation()).collect()
}
