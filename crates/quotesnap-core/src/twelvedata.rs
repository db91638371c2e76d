//! Twelve Data quote client.
//!
//! One HTTP GET per symbol against the single-quote endpoint, retried with
//! linear backoff. Batch endpoints behave differently between plans, so the
//! client deliberately calls per symbol.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::http_client::{HttpClient, HttpError, HttpRequest, ReqwestHttpClient};
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::{Quote, Symbol, ValidationError};

/// Single-quote endpoint.
pub const QUOTE_ENDPOINT: &str = "https://api.twelvedata.com/quote";

/// Price fields recognized in the response body, in priority order. The
/// first non-null field wins; a present-but-unparseable value fails that
/// attempt rather than falling through.
const PRICE_FIELDS: [&str; 2] = ["close", "price"];

const MAX_ERROR_BODY_LEN: usize = 256;

/// One attempt's failure. Every variant is retried identically.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("upstream returned status {status}")]
    HttpStatus { status: u16 },

    #[error("upstream reported error: {message}")]
    Api { message: String },

    #[error("response body is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("no price field in response: {body}")]
    MissingPrice { body: String },

    #[error("price field '{field}' is not numeric: {value}")]
    NonNumericPrice { field: &'static str, value: String },

    #[error(transparent)]
    InvalidPrice(#[from] ValidationError),
}

/// Retry budget exhausted for one symbol. Fatal for the whole run.
#[derive(Debug, Error)]
#[error("failed to fetch {symbol} after {attempts} attempts: {source}")]
pub struct FetchError {
    symbol: Symbol,
    attempts: u32,
    source: AttemptError,
}

impl FetchError {
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_error(&self) -> &AttemptError {
        &self.source
    }
}

/// Quote client over an injectable transport and sleeper.
#[derive(Clone)]
pub struct TwelveDataClient {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl TwelveDataClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), api_key)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: String::from(QUOTE_ENDPOINT),
            timeout: Duration::from_secs(20),
            retry: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Fetch the latest price for one symbol, retrying any failure up to
    /// the policy's attempt budget with linear backoff.
    pub async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, FetchError> {
        let mut attempt = 0;
        loop {
            match self.attempt_quote(symbol).await {
                Ok(quote) => return Ok(quote),
                Err(error) => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts {
                        return Err(FetchError {
                            symbol: symbol.clone(),
                            attempts: attempt,
                            source: error,
                        });
                    }

                    log::warn!(
                        "attempt {attempt}/{} for {symbol} failed: {error}",
                        self.retry.max_attempts
                    );
                    self.sleeper
                        .sleep(self.retry.delay_for_attempt(attempt - 1))
                        .await;
                }
            }
        }
    }

    async fn attempt_quote(&self, symbol: &Symbol) -> Result<Quote, AttemptError> {
        let request = HttpRequest::get(self.quote_url(symbol)).with_timeout(self.timeout);
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(AttemptError::HttpStatus {
                status: response.status,
            });
        }

        let price = extract_price(&response.body)?;
        Ok(Quote::new(symbol.clone(), price)?)
    }

    fn quote_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}?symbol={}&apikey={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(&self.api_key)
        )
    }
}

/// Pull the price out of a quote response body.
///
/// The upstream reports its own errors as `{"status": "error", ...}` even
/// under HTTP 200, so that is checked before the price fields. Field
/// selection is a null/missing check, never truthiness: a real zero price
/// must not be treated as absent.
fn extract_price(body: &str) -> Result<f64, AttemptError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| AttemptError::MalformedBody(e.to_string()))?;

    if value.get("status").and_then(Value::as_str) == Some("error") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unspecified upstream error")
            .to_owned();
        return Err(AttemptError::Api { message });
    }

    for field in PRICE_FIELDS {
        match value.get(field) {
            None | Some(Value::Null) => continue,
            Some(raw) => return parse_price(field, raw),
        }
    }

    Err(AttemptError::MissingPrice {
        body: truncate_body(body),
    })
}

/// Prices arrive either as JSON numbers or as numeric strings, depending on
/// market and plan.
fn parse_price(field: &'static str, raw: &Value) -> Result<f64, AttemptError> {
    match raw {
        Value::Number(number) => number.as_f64().ok_or_else(|| AttemptError::NonNumericPrice {
            field,
            value: number.to_string(),
        }),
        Value::String(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|_| AttemptError::NonNumericPrice {
                    field,
                    value: text.clone(),
                })
        }
        other => Err(AttemptError::NonNumericPrice {
            field,
            value: other.to_string(),
        }),
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body.to_owned();
    }

    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
