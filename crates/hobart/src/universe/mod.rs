//! Universe management for equity research.
//!
//! This module provides symbol normalization, fixed-size batching of
//! constituent lists, and the S&P 500 universe container.

pub mod sp500;

pub use sp500::Sp500Universe;

use thiserror::Error;

/// Errors from universe construction and batching.
#[derive(Debug, Error)]
pub enum UniverseError {
    /// Batch size must be at least one symbol.
    #[error("Invalid batch size: {0} (must be at least 1)")]
    InvalidBatchSize(usize),
}

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().contains(&symbol.to_string())
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for Sp500Universe {
    fn symbols(&self) -> Vec<String> {
        self.symbols()
    }
}

/// Normalize a raw ticker symbol to the data-provider convention.
///
/// Share classes are listed with a dot on the index source but a dash on
/// quote providers (`BRK.B` → `BRK-B`). Surrounding whitespace is trimmed.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().replace('.', "-")
}

/// Partition a symbol list into ordered batches of `batch_size`.
///
/// Every batch has exactly `batch_size` symbols except possibly the last,
/// which holds whatever remains after full-size slicing from the front.
/// Concatenating the batches reproduces the input list exactly.
///
/// # Errors
///
/// Returns [`UniverseError::InvalidBatchSize`] if `batch_size` is zero.
pub fn partition_batches(
    symbols: Vec<String>,
    batch_size: usize,
) -> Result<Vec<Vec<String>>, UniverseError> {
    if batch_size == 0 {
        return Err(UniverseError::InvalidBatchSize(batch_size));
    }

    let batches = symbols
        .chunks(batch_size)
        .map(<[String]>::to_vec)
        .collect();

    Ok(batches)
}
