//! Distribution-fit table formatting.
//!
//! A fit run produces one row per resampling period (weekly, monthly,
//! quarterly) with one column per fitted quantity. For display the table
//! is flipped: fitted quantities become rows, the three periods become
//! the fixed columns `Wk`/`Mo`/`Qt`, and a caller-supplied label column
//! names each row.

use crate::table::cell_text;
use polars::prelude::*;
use thiserror::Error;

/// Fixed resampling-period column labels after reshaping.
pub const PERIOD_LABELS: [&str; 3] = ["Wk", "Mo", "Qt"];

/// Name of the reshaped label column.
pub const FIT_INDEX_NAME: &str = "{Params., AIC, BIC}";

/// Errors that can occur while reshaping a fit table.
#[derive(Debug, Error)]
pub enum FitFormatError {
    /// Input dimensions incompatible with the three-period layout.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected count
        expected: usize,
        /// Actual count
        actual: usize,
    },

    /// Polars error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Reshape a distribution-fit table for display.
///
/// The input must have exactly three rows, one per resampling period in
/// `Wk`, `Mo`, `Qt` order. Each input column becomes an output row whose
/// label is taken from `labels` (which must therefore have one entry per
/// input column). Within a row, a cell repeating an earlier cell's
/// display value is blanked, so a quantity identical across periods shows
/// once; distinct values are never dropped.
///
/// The reshaping is a pure function of its arguments: reformatting the
/// same table twice yields the same output.
///
/// # Errors
///
/// [`FitFormatError::ShapeMismatch`] when the input does not have three
/// rows or `labels` does not match the input column count.
pub fn format_dist_fit(fit: &DataFrame, labels: &[String]) -> Result<DataFrame, FitFormatError> {
    if fit.height() != PERIOD_LABELS.len() {
        return Err(FitFormatError::ShapeMismatch {
            expected: PERIOD_LABELS.len(),
            actual: fit.height(),
        });
    }
    if labels.len() != fit.width() {
        return Err(FitFormatError::ShapeMismatch {
            expected: fit.width(),
            actual: labels.len(),
        });
    }

    // Transposed cells, one Vec per period column.
    let mut period_cells: [Vec<Option<String>>; 3] =
        [Vec::new(), Vec::new(), Vec::new()];

    for column in fit.get_columns() {
        let mut row: Vec<Option<String>> = (0..PERIOD_LABELS.len())
            .map(|i| {
                let text = cell_text(&column.get(i).unwrap_or(AnyValue::Null));
                if text.is_empty() { None } else { Some(text) }
            })
            .collect();

        // Keep-first de-duplication within the row.
        for i in 1..row.len() {
            if row[i].is_some() && row[..i].contains(&row[i]) {
                row[i] = None;
            }
        }

        for (cells, cell) in period_cells.iter_mut().zip(row) {
            cells.push(cell);
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(PERIOD_LABELS.len() + 1);
    columns.push(Series::new(FIT_INDEX_NAME.into(), labels.to_vec()).into());
    for (label, cells) in PERIOD_LABELS.iter().zip(period_cells) {
        columns.push(Series::new((*label).into(), cells).into());
    }

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_table() -> DataFrame {
        // Three rows: Wk, Mo, Qt. Columns are fitted quantities.
        DataFrame::new(vec![
            Series::new(
                "norm".into(),
                vec!["(0.001, 0.02)", "(0.004, 0.04)", "(0.012, 0.07)"],
            )
            .into(),
            Series::new("norm_aic".into(), vec!["-512.3", "-512.3", "-498.1"]).into(),
            Series::new("t_bic".into(), vec!["-610.0", "-605.5", "-601.2"]).into(),
        ])
        .unwrap()
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_reshape_layout() {
        let formatted =
            format_dist_fit(&fit_table(), &labels(&["norm", "norm AIC", "t BIC"])).unwrap();

        assert_eq!(formatted.height(), 3);
        let names: Vec<String> = formatted
            .get_columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec![FIT_INDEX_NAME, "Wk", "Mo", "Qt"]);
    }

    #[test]
    fn test_repeated_values_blank_after_first() {
        let formatted =
            format_dist_fit(&fit_table(), &labels(&["norm", "norm AIC", "t BIC"])).unwrap();

        // norm_aic repeats -512.3 across Wk and Mo; only Wk keeps it.
        let row = 1;
        assert_eq!(
            formatted.column("Wk").unwrap().get(row).unwrap(),
            AnyValue::String("-512.3")
        );
        assert!(matches!(
            formatted.column("Mo").unwrap().get(row).unwrap(),
            AnyValue::Null
        ));
        assert_eq!(
            formatted.column("Qt").unwrap().get(row).unwrap(),
            AnyValue::String("-498.1")
        );
    }

    #[test]
    fn test_distinct_values_all_kept() {
        let formatted =
            format_dist_fit(&fit_table(), &labels(&["norm", "norm AIC", "t BIC"])).unwrap();

        let row = 2;
        for period in PERIOD_LABELS {
            assert!(!matches!(
                formatted.column(period).unwrap().get(row).unwrap(),
                AnyValue::Null
            ));
        }
    }

    #[test]
    fn test_idempotent_for_same_inputs() {
        let labels = labels(&["norm", "norm AIC", "t BIC"]);
        let first = format_dist_fit(&fit_table(), &labels).unwrap();
        let second = format_dist_fit(&fit_table(), &labels).unwrap();

        assert!(first.equals_missing(&second));
    }

    #[test]
    fn test_wrong_period_count() {
        let two_rows = DataFrame::new(vec![
            Series::new("norm".into(), vec!["a", "b"]).into(),
        ])
        .unwrap();

        let result = format_dist_fit(&two_rows, &labels(&["norm"]));
        assert!(matches!(
            result,
            Err(FitFormatError::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_label_count_mismatch() {
        let result = format_dist_fit(&fit_table(), &labels(&["norm"]));
        assert!(matches!(
            result,
            Err(FitFormatError::ShapeMismatch {
                expected: 3,
                actual: 1
            })
        ));
    }
}
