//! Selection-summary composition.
//!
//! The selection computation itself is an external collaborator reached
//! through [`SelectionProvider`]; this module invokes it once per return
//! convention, merges the two result tables on their shared row labels,
//! and renders the merged table for display.

use crate::table::render_pipe_table;
use chrono::NaiveDate;
use hobart_data::ReturnConvention;
use polars::prelude::*;
use thiserror::Error;

/// Errors that can occur during summary composition.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Failure reported by the selection collaborator.
    #[error("Selection error: {0}")]
    Selection(String),

    /// Incompatible summary tables.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Polars error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Result of one selection run.
///
/// The schema of both frames is owned by the collaborator; this crate
/// only relies on `summary`'s first column carrying the row labels.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Selected assets.
    pub assets: DataFrame,
    /// Per-convention results table; first column labels the rows.
    pub summary: DataFrame,
}

/// External selection collaborator.
///
/// Implementations compute a "best" asset selection over a returns
/// dataset under the given compounding convention; this crate never
/// inspects how.
pub trait SelectionProvider {
    /// Run the selection for one return convention.
    fn select(
        &self,
        data: &DataFrame,
        convention: ReturnConvention,
        risk_free: f64,
        best: usize,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Selection, SummaryError>;
}

/// Compose the Simple and Log selection summaries into one rendered table.
///
/// Invokes `provider` once per convention, merges the two summary tables
/// with [`merge_summaries`], and renders the result with
/// [`render_pipe_table`]. Performs no numeric computation of its own.
pub fn convention_summary<P: SelectionProvider + ?Sized>(
    provider: &P,
    data: &DataFrame,
    risk_free: f64,
    best: usize,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<String, SummaryError> {
    let simple = provider
        .select(data, ReturnConvention::Simple, risk_free, best, start, end)?
        .summary;
    let log = provider
        .select(data, ReturnConvention::Log, risk_free, best, start, end)?
        .summary;

    let merged = merge_summaries(&simple, &log)?;

    Ok(render_pipe_table(&merged))
}

/// Merge two summary tables on their shared label column.
///
/// Full outer join: the result's rows are the union of both inputs' row
/// labels, with cells absent from one input left null in that input's
/// columns. The result is sorted by label so rendering is deterministic.
///
/// # Errors
///
/// [`SummaryError::SchemaMismatch`] when either table is column-less or
/// the label columns are named differently.
pub fn merge_summaries(left: &DataFrame, right: &DataFrame) -> Result<DataFrame, SummaryError> {
    let Some(key) = left.get_columns().first().map(|c| c.name().as_str()) else {
        return Err(SummaryError::SchemaMismatch(
            "left summary has no columns".to_string(),
        ));
    };
    let right_key = right.get_columns().first().map(|c| c.name().as_str());
    if right_key != Some(key) {
        return Err(SummaryError::SchemaMismatch(format!(
            "label columns differ: {key:?} vs {right_key:?}"
        )));
    }

    let merged = left
        .clone()
        .lazy()
        .join(
            right.clone().lazy(),
            [col(key)],
            [col(key)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .sort([key], SortMultipleOptions::default())
        .collect()?;

    Ok(merged)
}
