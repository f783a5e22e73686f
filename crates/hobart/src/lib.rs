#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod universe;

// Re-export main types from sub-crates
pub use hobart_data as data;
pub use hobart_manifest as manifest;
pub use hobart_output as output;
pub use hobart_risk as risk;

// Re-export common universe types
pub use universe::{Sp500Universe, Universe, UniverseError, normalize_symbol, partition_batches};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
