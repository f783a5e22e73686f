//! Integration tests for summary composition and fit-table formatting.

use chrono::NaiveDate;
use hobart_data::ReturnConvention;
use hobart_output::{
    FIT_INDEX_NAME, Selection, SelectionProvider, SummaryError, convention_summary,
    format_dist_fit, render_pipe_table,
};
use polars::prelude::*;
use std::cell::RefCell;

/// Test double standing in for the external selection collaborator.
struct RecordingProvider {
    conventions_seen: RefCell<Vec<ReturnConvention>>,
}

impl RecordingProvider {
    fn new() -> Self {
        Self {
            conventions_seen: RefCell::new(Vec::new()),
        }
    }
}

impl SelectionProvider for RecordingProvider {
    fn select(
        &self,
        _data: &DataFrame,
        convention: ReturnConvention,
        _risk_free: f64,
        _best: usize,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Selection, SummaryError> {
        self.conventions_seen.borrow_mut().push(convention);

        let (labels, column, values) = match convention {
            ReturnConvention::Simple => {
                (vec!["AMZN", "KO"], "Sharpe (Simple)", vec![1.21, 0.84])
            }
            ReturnConvention::Log => (vec!["KO", "XOM"], "Sharpe (Log)", vec![0.79, 0.55]),
        };

        let summary = DataFrame::new(vec![
            Series::new("Asset".into(), labels.clone()).into(),
            Series::new(column.into(), values).into(),
        ])?;
        let assets = DataFrame::new(vec![Series::new("Asset".into(), labels).into()])?;

        Ok(Selection { assets, summary })
    }
}

struct FailingProvider;

impl SelectionProvider for FailingProvider {
    fn select(
        &self,
        _data: &DataFrame,
        _convention: ReturnConvention,
        _risk_free: f64,
        _best: usize,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Selection, SummaryError> {
        Err(SummaryError::Selection("no feasible selection".to_string()))
    }
}

fn returns_data() -> DataFrame {
    DataFrame::new(vec![
        Series::new("symbol".into(), vec!["AMZN", "KO", "XOM"]).into(),
        Series::new("return".into(), vec![0.01, -0.002, 0.004]).into(),
    ])
    .unwrap()
}

fn period() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    )
}

#[test]
fn test_convention_summary_invokes_both_conventions() {
    let provider = RecordingProvider::new();
    let (start, end) = period();

    convention_summary(&provider, &returns_data(), 0.04, 5, start, end).unwrap();

    assert_eq!(
        *provider.conventions_seen.borrow(),
        vec![ReturnConvention::Simple, ReturnConvention::Log]
    );
}

#[test]
fn test_convention_summary_renders_merged_table() {
    let provider = RecordingProvider::new();
    let (start, end) = period();

    let rendered = convention_summary(&provider, &returns_data(), 0.04, 5, start, end).unwrap();

    // Header carries both conventions' columns.
    let header = rendered.lines().next().unwrap();
    assert!(header.contains("Asset"));
    assert!(header.contains("Sharpe (Simple)"));
    assert!(header.contains("Sharpe (Log)"));

    // Union of row labels: 2 header lines + 3 asset rows.
    assert_eq!(rendered.lines().count(), 5);

    // AMZN only exists under the Simple convention.
    let amzn = rendered.lines().find(|l| l.contains("AMZN")).unwrap();
    assert!(amzn.contains("1.2100"));
    assert!(!amzn.contains("0.7900"));
}

#[test]
fn test_provider_failure_propagates() {
    let (start, end) = period();

    let result = convention_summary(&FailingProvider, &returns_data(), 0.04, 5, start, end);
    assert!(matches!(result, Err(SummaryError::Selection(_))));
}

#[test]
fn test_fit_format_then_render() {
    let fit = DataFrame::new(vec![
        Series::new("dist".into(), vec!["johnsonsb", "johnsonsb", "norminvgauss"]).into(),
        Series::new("aic".into(), vec!["-3125.2", "-3125.2", "-2981.7"]).into(),
    ])
    .unwrap();
    let labels = vec!["X1".to_string(), "X2".to_string()];

    let formatted = format_dist_fit(&fit, &labels).unwrap();
    let rendered = render_pipe_table(&formatted);

    let header = rendered.lines().next().unwrap();
    assert!(header.contains(FIT_INDEX_NAME));
    assert!(header.contains("Wk"));
    assert!(header.contains("Mo"));
    assert!(header.contains("Qt"));

    // The repeated weekly/monthly cell renders once; the blank shows empty.
    let x1 = rendered.lines().find(|l| l.contains("X1")).unwrap();
    assert_eq!(x1.matches("johnsonsb").count(), 1);
}
