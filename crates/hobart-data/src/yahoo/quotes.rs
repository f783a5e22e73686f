//! Adjusted-close history fetching.

use crate::error::{DataError, Result};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;
use yahoo_finance_api as yahoo;

/// Yahoo Finance client returning adjusted-close history as a polars frame.
///
/// Every request either fully succeeds or fails with a [`DataError`];
/// nothing is cached or retried. An optional inter-request delay keeps
/// batch fetches under the provider's rate limit.
pub struct QuoteClient {
    provider: yahoo::YahooConnector,
    request_delay: Duration,
}

impl std::fmt::Debug for QuoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteClient")
            .field("request_delay", &self.request_delay)
            .finish_non_exhaustive()
    }
}

impl QuoteClient {
    /// Create a client with the default inter-request delay (1 req/sec).
    pub fn new() -> Result<Self> {
        Self::with_request_delay(Duration::from_millis(1000))
    }

    /// Create a client with a custom inter-request delay.
    pub fn with_request_delay(request_delay: Duration) -> Result<Self> {
        let provider = yahoo::YahooConnector::new()?;

        Ok(Self {
            provider,
            request_delay,
        })
    }

    /// Fetch daily adjusted-close history for one symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "AAPL")
    /// * `start` - Start date for the history
    /// * `end` - End date for the history
    ///
    /// # Returns
    /// A polars DataFrame with columns: symbol, date, close
    pub async fn close_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No data returned from Yahoo Finance".to_string(),
            });
        }

        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();

        let df = DataFrame::new(vec![
            Series::new("symbol".into(), vec![symbol; timestamps.len()]).into(),
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("close".into(), closes).into(),
        ])?;

        // Convert the unix timestamp to a date column
        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[col("symbol"), col("date"), col("close")])
            .collect()?;

        if !self.request_delay.is_zero() {
            sleep(self.request_delay).await;
        }

        Ok(df)
    }

    /// Fetch adjusted-close history for multiple symbols, combined.
    ///
    /// Symbols that fail to fetch are skipped with a warning; the call
    /// fails only when no symbol yields data.
    pub async fn close_history_batch(
        &self,
        symbols: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        let mut frames = Vec::new();

        for symbol in symbols {
            match self.close_history(symbol, start, end).await {
                Ok(df) => frames.push(df.lazy()),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "failed to fetch history");
                    continue;
                }
            }
        }

        if frames.is_empty() {
            return Err(DataError::MissingData {
                symbol: "batch".to_string(),
                reason: "No data fetched for any symbol".to_string(),
            });
        }

        let combined = concat(frames, UnionArgs::default())?.collect()?;

        Ok(combined)
    }
}
