//! S&P 500 universe container.

use crate::universe::{UniverseError, normalize_symbol, partition_batches};
use hobart_data::{DataError, MembershipClient};
use serde::{Deserialize, Serialize};

/// S&P 500 universe built from a constituent symbol list.
///
/// Symbols are normalized to the quote-provider convention on construction
/// (see [`normalize_symbol`]); input order is preserved throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sp500Universe {
    symbols: Vec<String>,
}

impl Sp500Universe {
    /// Create a universe from raw constituent symbols, normalizing each.
    pub fn from_symbols(raw: Vec<String>) -> Self {
        let symbols = raw.iter().map(|s| normalize_symbol(s)).collect();
        Self { symbols }
    }

    /// Fetch the current constituent list from the membership source.
    ///
    /// # Errors
    ///
    /// Propagates fetch and parse failures from the client unchanged.
    pub async fn fetch(client: &MembershipClient) -> Result<Self, DataError> {
        Ok(Self::from_symbols(client.fetch_symbols().await?))
    }

    /// Get all symbols, in constituent-list order.
    pub fn symbols(&self) -> Vec<String> {
        self.symbols.clone()
    }

    /// Partition the universe into ordered batches of `batch_size` symbols.
    ///
    /// The last batch holds the undivisible remainder.
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::InvalidBatchSize`] if `batch_size` is zero.
    pub fn batches(&self, batch_size: usize) -> Result<Vec<Vec<String>>, UniverseError> {
        partition_batches(self.symbols.clone(), batch_size)
    }
}
