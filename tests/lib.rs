//! Shared fakes for quotesnap behavior tests.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

pub use quotesnap_core::{
    collect_report, default_tickers, HttpClient, HttpError, HttpRequest, HttpResponse, Quote,
    Report, RetryPolicy, Sleeper, Symbol, TwelveDataClient, UtcDateTime, DEFAULT_OUTPUT_PATH,
    SOURCE_NAME, TICKERS,
};
pub use std::sync::Arc;

/// Transport fake that replays a scripted queue of responses, one per
/// request, and records every request it sees.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: &str) -> &Self {
        self.push(Ok(HttpResponse::ok_json(body)))
    }

    pub fn push_status(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            body: body.to_owned(),
        }))
    }

    pub fn push_transport_error(&self, message: &str) -> &Self {
        self.push(Err(HttpError::new(message)))
    }

    pub fn push(&self, response: Result<HttpResponse, HttpError>) -> &Self {
        self.responses
            .lock()
            .expect("response queue should not be poisoned")
            .push_back(response);
        self
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        let response = self
            .responses
            .lock()
            .expect("response queue should not be poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::new("scripted responses exhausted")));
        Box::pin(async move { response })
    }
}

/// Sleeper fake that records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded_delays(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .expect("delay store should not be poisoned")
            .clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep<'a>(
        &'a self,
        duration: Duration,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        self.delays
            .lock()
            .expect("delay store should not be poisoned")
            .push(duration);
        Box::pin(async {})
    }
}

/// A client wired to the scripted transport and recording sleeper.
pub fn scripted_client(
    http: Arc<ScriptedHttpClient>,
    sleeper: Arc<RecordingSleeper>,
) -> TwelveDataClient {
    TwelveDataClient::with_http_client(http, "test-key").with_sleeper(sleeper)
}
