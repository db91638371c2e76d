//! Report assembly and JSON output.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::twelvedata::{FetchError, TwelveDataClient};
use crate::{Quote, Symbol, UtcDateTime};

/// Source tag embedded in the output for downstream consumers.
pub const SOURCE_NAME: &str = "twelvedata";

/// Fixed ticker list, fetched in this order.
pub const TICKERS: [&str; 8] = [
    "AAPL", "MSFT", "NVDA", "GOOGL", "AMZN", "TSLA", "META", "AMD",
];

/// Where the report lands, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "docs/assets/quotes.json";

/// The built-in ticker list as parsed symbols.
pub fn default_tickers() -> Vec<Symbol> {
    TICKERS
        .into_iter()
        .map(|raw| Symbol::parse(raw).expect("built-in ticker symbols are valid"))
        .collect()
}

/// One run's symbol prices plus metadata. Built fresh each run; never
/// merged with prior output.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    updated_at: UtcDateTime,
    quotes: Vec<Quote>,
}

impl Report {
    pub fn new(updated_at: UtcDateTime) -> Self {
        Self {
            updated_at,
            quotes: Vec::new(),
        }
    }

    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub const fn updated_at(&self) -> UtcDateTime {
        self.updated_at
    }

    /// JSON object with metadata first, then symbols in push order.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            String::from("updated_at_utc"),
            Value::String(self.updated_at.format_rfc3339()),
        );
        map.insert(String::from("source"), Value::String(String::from(SOURCE_NAME)));

        for quote in &self.quotes {
            // Finite by Quote::new, so from_f64 cannot return None here.
            let price = Number::from_f64(quote.price).map_or(Value::Null, Value::Number);
            map.insert(quote.symbol.as_str().to_owned(), price);
        }

        Value::Object(map)
    }

    /// Pretty-printed (2-space indent) JSON with a trailing newline.
    pub fn render(&self) -> String {
        let json = self.to_json();
        let mut rendered =
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());
        rendered.push('\n');
        rendered
    }

    /// Write the report, creating parent directories as needed and
    /// overwriting any prior file. Nothing else on disk is touched.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.render())
    }
}

/// Fetch every symbol sequentially, in list order. The first symbol whose
/// retries are exhausted aborts the run; no partial report survives.
pub async fn collect_report(
    client: &TwelveDataClient,
    tickers: &[Symbol],
    updated_at: UtcDateTime,
) -> Result<Report, FetchError> {
    let mut report = Report::new(updated_at);

    for symbol in tickers {
        let quote = client.fetch_quote(symbol).await?;
        log::debug!("fetched {} at {}", quote.symbol, quote.price);
        report.push(quote);
    }

    Ok(report)
}
