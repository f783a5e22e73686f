//! Periodic return series from price history.

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compounding convention for periodic returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnConvention {
    /// Arithmetic returns: `p_t / p_{t-1} - 1`.
    Simple,
    /// Continuously-compounded returns: `ln(p_t / p_{t-1})`.
    Log,
}

impl ReturnConvention {
    /// Display label, matching the tag the selection collaborator accepts.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Log => "Log",
        }
    }
}

impl fmt::Display for ReturnConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compute per-symbol periodic returns from a close-price frame.
///
/// Expects columns `symbol`, `date`, `close` (the shape produced by
/// [`crate::QuoteClient::close_history`]). The first observation of each
/// symbol has no predecessor and is dropped.
///
/// # Returns
/// A DataFrame with columns: date, symbol, return (sorted by symbol, date)
pub fn compute_returns(prices: &DataFrame, convention: ReturnConvention) -> Result<DataFrame> {
    let ratio = col("close") / col("close").shift(lit(1)).over([col("symbol")]);
    let ret = match convention {
        ReturnConvention::Simple => ratio - lit(1.0),
        ReturnConvention::Log => ratio.log(std::f64::consts::E),
    };

    let returns = prices
        .clone()
        .lazy()
        .sort(["symbol", "date"], SortMultipleOptions::default())
        .with_column(ret.alias("return"))
        .filter(col("return").is_not_null())
        .select(&[col("date"), col("symbol"), col("return")])
        .collect()?;

    Ok(returns)
}
