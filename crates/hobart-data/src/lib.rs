#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod membership;
pub mod returns;
pub mod yahoo;

pub use error::{DataError, Result};
pub use membership::MembershipClient;
pub use returns::{ReturnConvention, compute_returns};
pub use yahoo::QuoteClient;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
