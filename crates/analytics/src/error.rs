use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Calculation error: Division by zero encountered in metric '{0}'")]
    DivisionByZero(String),

    #[error("Calculation error: Arithmetic overflow in metric '{0}'")]
    Overflow(String),

    #[error("Series length mismatch: {0} x-values but {1} y-values")]
    MismatchedSeries(usize, usize),
}
