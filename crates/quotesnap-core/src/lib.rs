//! Core contracts for quotesnap.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The HTTP transport abstraction and reqwest-backed client
//! - Retry policy with linear backoff
//! - The Twelve Data quote client
//! - Report assembly and JSON output

pub mod domain;
pub mod error;
pub mod http_client;
pub mod report;
pub mod retry;
pub mod twelvedata;

pub use domain::{Quote, Symbol, UtcDateTime};
pub use error::ValidationError;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use report::{
    collect_report, default_tickers, Report, DEFAULT_OUTPUT_PATH, SOURCE_NAME, TICKERS,
};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use twelvedata::{AttemptError, FetchError, TwelveDataClient, QUOTE_ENDPOINT};
