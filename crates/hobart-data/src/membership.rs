//! Index membership retrieval.
//!
//! Fetches the current constituent list of a market index from a public
//! HTML page and extracts the `Symbol` column of the first table that
//! carries one. No caching: every call is a fresh read of the source.

use crate::error::{DataError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::time::Duration;
use tracing::{debug, info};

/// Default membership source: Wikipedia's list of S&P 500 companies.
pub const SP500_MEMBERSHIP_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

/// Header cell that identifies the constituent table and its symbol column.
const SYMBOL_HEADER: &str = "Symbol";

/// User agent for membership requests.
const USER_AGENT: &str = "hobart/0.1 (+https://github.com/hobart-quant/hobart)";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for fetching index membership from an HTML source.
#[derive(Debug, Clone)]
pub struct MembershipClient {
    client: reqwest::Client,
    url: String,
}

impl MembershipClient {
    /// Create a client against the default S&P 500 membership source.
    pub fn new() -> Result<Self> {
        Self::with_url(SP500_MEMBERSHIP_URL)
    }

    /// Create a client against a custom membership URL.
    ///
    /// The page must contain an HTML table with a `Symbol` header column.
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch the constituent symbols, in document order.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses surface as
    /// [`DataError::Network`]; a page without a `Symbol` column surfaces as
    /// [`DataError::Parse`].
    pub async fn fetch_symbols(&self) -> Result<Vec<String>> {
        info!(url = %self.url, "fetching index membership");

        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let symbols = parse_symbol_column(&body)?;
        debug!(count = symbols.len(), "parsed constituent symbols");

        Ok(symbols)
    }
}

/// Extract the `Symbol` column from the first table that carries one.
///
/// Each `<table>` fragment of the document is walked in turn; the first
/// whose header row contains a `Symbol` cell contributes the text of that
/// column for every body row. Symbols are returned raw (un-normalized).
pub fn parse_symbol_column(html: &str) -> Result<Vec<String>> {
    let mut search_from = 0;

    while let Some(offset) = html[search_from..].find("<table") {
        let table_start = search_from + offset;
        let Some(end_offset) = html[table_start..].find("</table>") else {
            break;
        };
        let table_end = table_start + end_offset + "</table>".len();
        let fragment = &html[table_start..table_end];
        search_from = table_end;

        if let Some(symbols) = extract_symbol_cells(fragment) {
            return Ok(symbols);
        }
    }

    Err(DataError::Parse(format!(
        "no table with a '{SYMBOL_HEADER}' column found"
    )))
}

/// Walk one table fragment; `None` if it has no `Symbol` header column.
fn extract_symbol_cells(table: &str) -> Option<Vec<String>> {
    let mut reader = Reader::from_str(table);
    // Real-world HTML: void elements and stray tags are expected.
    reader.config_mut().check_end_names = false;

    let mut header_done = false;
    let mut symbol_idx: Option<usize> = None;
    let mut row_cells: Vec<String> = Vec::new();
    let mut current_cell: Option<String> = None;
    let mut symbols = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"tr" => row_cells.clear(),
                b"th" | b"td" => current_cell = Some(String::new()),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if matches!(e.local_name().as_ref(), b"th" | b"td") {
                    row_cells.push(String::new());
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(cell) = current_cell.as_mut() {
                    match e.unescape() {
                        Ok(text) => cell.push_str(&text),
                        // Unknown entities (e.g. &nbsp;) stay verbatim.
                        Err(_) => cell.push_str(&String::from_utf8_lossy(e.as_ref())),
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"th" | b"td" => {
                    if let Some(cell) = current_cell.take() {
                        row_cells.push(cell.trim().to_string());
                    }
                }
                b"tr" => {
                    if header_done {
                        if let Some(idx) = symbol_idx {
                            match row_cells.get(idx) {
                                Some(cell) if !cell.is_empty() => symbols.push(cell.clone()),
                                _ => {}
                            }
                        }
                    } else {
                        symbol_idx = row_cells.iter().position(|h| h == SYMBOL_HEADER);
                        header_done = true;
                        symbol_idx?;
                    }
                    row_cells.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            // A fragment this parser cannot walk is not the table we want.
            Err(_) => return None,
        }
    }

    if symbols.is_empty() { None } else { Some(symbols) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBERSHIP_PAGE: &str = r#"
    <html><body>
    <table class="infobox">
      <tr><th>Index</th></tr>
      <tr><td>S&amp;P 500</td></tr>
    </table>
    <table class="wikitable sortable" id="constituents">
      <tbody>
        <tr><th>Symbol</th><th>Security</th><th>GICS Sector</th></tr>
        <tr><td><a href="/MMM">MMM</a></td><td>3M</td><td>Industrials</td></tr>
        <tr><td><a href="/AAPL">AAPL</a></td><td>Apple Inc.</td><td>Information Technology</td></tr>
        <tr><td>BRK.B</td><td>Berkshire Hathaway</td><td>Financials</td></tr>
        <tr><td>T</td><td>AT&amp;T</td><td>Communication Services</td></tr>
      </tbody>
    </table>
    </body></html>
    "#;

    #[test]
    fn test_parse_symbol_column() {
        let symbols = parse_symbol_column(MEMBERSHIP_PAGE).unwrap();
        assert_eq!(symbols, vec!["MMM", "AAPL", "BRK.B", "T"]);
    }

    #[test]
    fn test_tables_without_symbol_column_are_skipped() {
        // The infobox table comes first; it must not satisfy the search.
        let symbols = parse_symbol_column(MEMBERSHIP_PAGE).unwrap();
        assert_ne!(symbols[0], "S&P 500");
    }

    #[test]
    fn test_missing_symbol_column_is_a_parse_error() {
        let html = "<table><tr><th>Security</th></tr><tr><td>3M</td></tr></table>";
        let result = parse_symbol_column(html);
        assert!(matches!(result, Err(DataError::Parse(_))));
    }

    #[test]
    fn test_no_table_is_a_parse_error() {
        let result = parse_symbol_column("<html><body><p>nothing here</p></body></html>");
        assert!(matches!(result, Err(DataError::Parse(_))));
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let html = r#"
        <table>
          <tr><th>Security</th><th>Symbol</th></tr>
          <tr><td>3M</td><td>MMM</td></tr>
          <tr><td>spanning footnote</td></tr>
          <tr><td>Apple</td><td>AAPL</td></tr>
        </table>
        "#;
        let symbols = parse_symbol_column(html).unwrap();
        assert_eq!(symbols, vec!["MMM", "AAPL"]);
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = MembershipClient::with_url("https://example.com/index").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("example.com"));
    }
}
