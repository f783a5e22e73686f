#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod installer;
pub mod rewrite;

pub use installer::{PackageInstaller, PipInstaller, install_requirements};
pub use rewrite::{ManifestError, NOTEBOOK_REQUIREMENT, rewrite_requirements};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
