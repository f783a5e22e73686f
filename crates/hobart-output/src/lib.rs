#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dist_fit;
pub mod summary;
pub mod table;

pub use dist_fit::{FIT_INDEX_NAME, FitFormatError, PERIOD_LABELS, format_dist_fit};
pub use summary::{
    Selection, SelectionProvider, SummaryError, convention_summary, merge_summaries,
};
pub use table::render_pipe_table;
