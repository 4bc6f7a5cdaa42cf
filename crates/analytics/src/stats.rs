//! Small descriptive statistics over `Decimal` series.
//!
//! All arithmetic is checked; an overflow becomes `AnalyticsError::Overflow`
//! instead of a panic.

use crate::error::AnalyticsError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places reported for volatility and liquidity.
pub const METRIC_DECIMAL_PLACES: u32 = 2;

fn overflow(metric: &str) -> AnalyticsError {
    AnalyticsError::Overflow(metric.to_string())
}

fn checked_sum<I>(values: I, metric: &str) -> Result<Decimal, AnalyticsError>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or_else(|| overflow(metric))
    })
}

/// Arithmetic mean.
pub fn mean(values: &[Decimal]) -> Result<Decimal, AnalyticsError> {
    if values.is_empty() {
        return Err(AnalyticsError::NotEnoughData(
            "mean of an empty series".to_string(),
        ));
    }
    let sum = checked_sum(values.iter().copied(), "mean")?;
    sum.checked_div(Decimal::from(values.len()))
        .ok_or_else(|| overflow("mean"))
}

/// Population (not sample) standard deviation: divides by `n`.
pub fn population_std_dev(values: &[Decimal]) -> Result<Decimal, AnalyticsError> {
    let mean = mean(values)?;

    let squared_deviations = values
        .iter()
        .map(|v| {
            let d = v.checked_sub(mean).ok_or_else(|| overflow("std_dev"))?;
            d.checked_mul(d).ok_or_else(|| overflow("std_dev"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let variance = checked_sum(squared_deviations, "std_dev")?
        .checked_div(Decimal::from(values.len()))
        .ok_or_else(|| overflow("std_dev"))?;

    // Variance is a sum of squares, so it is never negative.
    variance.sqrt().ok_or_else(|| overflow("std_dev"))
}

/// Slope of the first-degree least-squares fit of `ys` against `xs`.
///
/// Computed as `cov(x, y) / var(x)`. If every `x` is the same the line is
/// vertical and the slope is reported as zero.
pub fn regression_slope(xs: &[Decimal], ys: &[Decimal]) -> Result<Decimal, AnalyticsError> {
    if xs.len() != ys.len() {
        return Err(AnalyticsError::MismatchedSeries(xs.len(), ys.len()));
    }
    let x_mean = mean(xs)?;
    let y_mean = mean(ys)?;

    let mut covariance = Decimal::ZERO;
    let mut x_variance = Decimal::ZERO;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x.checked_sub(x_mean).ok_or_else(|| overflow("slope"))?;
        let dy = y.checked_sub(y_mean).ok_or_else(|| overflow("slope"))?;
        covariance = dx
            .checked_mul(dy)
            .and_then(|p| covariance.checked_add(p))
            .ok_or_else(|| overflow("slope"))?;
        x_variance = dx
            .checked_mul(dx)
            .and_then(|p| x_variance.checked_add(p))
            .ok_or_else(|| overflow("slope"))?;
    }

    if x_variance.is_zero() {
        return Ok(Decimal::ZERO);
    }
    covariance
        .checked_div(x_variance)
        .ok_or_else(|| overflow("slope"))
}

/// Rounds a reported metric to two places the way a binary `f64` rounds.
///
/// The value goes through its nearest `f64` and keeps that float's full binary
/// expansion before rounding half to even, so 0.165 (stored just above the tie)
/// becomes 0.17 and 0.295 (stored just below) becomes 0.29. Only values an
/// `f64` holds exactly, like 0.125, are true ties.
pub fn round_metric(value: Decimal) -> Decimal {
    value
        .to_f64()
        .and_then(Decimal::from_f64_retain)
        .unwrap_or(value)
        .round_dp_with_strategy(METRIC_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}
