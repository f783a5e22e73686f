//! Historical Value-at-Risk.
//!
//! The statistic is the empirical `1 - alpha` quantile of the observed
//! returns, with linear interpolation between order statistics (the
//! convention numpy and polars both default to). `alpha` names the
//! confidence level on the upper side of the distribution:
//!
//! - `alpha = 0.975`: 2.5% of observations fall below the returned value
//! - `alpha = 0.025`: 97.5% of observations fall below the returned value
//! - `alpha = 0.5`: the median

use polars::prelude::*;
use thiserror::Error;

/// Errors that can occur during risk estimation.
#[derive(Debug, Error)]
pub enum RiskError {
    /// Confidence level outside the open interval (0, 1).
    #[error("Invalid confidence level: {0} (must lie strictly between 0 and 1)")]
    InvalidAlpha(f64),

    /// Series with no non-null observations.
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// Table without a single numeric column.
    #[error("No numeric columns to estimate over")]
    NoNumericColumns,

    /// Polars error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Whether a column dtype participates in per-column estimation.
const fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

/// Historical VaR of a single series at confidence level `alpha`.
///
/// Returns the value at the `1 - alpha` quantile of the non-null
/// observations, linearly interpolated. The result always lies within
/// the observed minimum and maximum.
///
/// # Errors
///
/// [`RiskError::InvalidAlpha`] unless `0 < alpha < 1`;
/// [`RiskError::EmptySeries`] when no non-null observation exists.
pub fn historical_var(series: &Series, alpha: f64) -> Result<f64, RiskError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(RiskError::InvalidAlpha(alpha));
    }

    let values = series.cast(&DataType::Float64)?;
    let values = values.f64()?;

    if values.len() == values.null_count() {
        return Err(RiskError::EmptySeries(series.name().to_string()));
    }

    values
        .quantile(1.0 - alpha, QuantileMethod::Linear)?
        .ok_or_else(|| RiskError::EmptySeries(series.name().to_string()))
}

/// Historical VaR applied independently to every numeric column.
///
/// Non-numeric columns are ignored. Returns a single-row frame whose
/// columns mirror the numeric columns of the input.
///
/// # Errors
///
/// [`RiskError::NoNumericColumns`] when nothing is numeric;
/// [`RiskError::EmptySeries`] when a numeric column is entirely null;
/// alpha validation as in [`historical_var`].
pub fn historical_var_frame(frame: &DataFrame, alpha: f64) -> Result<DataFrame, RiskError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(RiskError::InvalidAlpha(alpha));
    }

    let mut columns: Vec<Column> = Vec::new();

    for column in frame.get_columns() {
        if !is_numeric(column.dtype()) {
            continue;
        }
        let series = column.as_materialized_series();
        let var = historical_var(series, alpha)?;
        columns.push(Series::new(series.name().clone(), vec![var]).into());
    }

    if columns.is_empty() {
        return Err(RiskError::NoNumericColumns);
    }

    Ok(DataFrame::new(columns)?)
}
