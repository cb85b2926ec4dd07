//! Request transport for searches.
//!
//! A transport performs one GET and always reports back a status: failures
//! below HTTP (DNS, refused connection, timeout) come back as status `0` with
//! the error as status text.

use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use crate::util::compact_text;
use crate::Result;

const USER_AGENT: &str = concat!("roomsearch/", env!("CARGO_PKG_VERSION"));

/// Status code reported when no HTTP response was received.
pub const STATUS_UNSENT: u16 = 0;

/// What the transport saw when a request completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// A request that never produced an HTTP status.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::new(STATUS_UNSENT, reason, String::new())
    }

    /// Only an exact 200 counts as results.
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Sends a search request.
pub trait SearchTransport: Send + Sync + 'static {
    fn get(&self, url: &str) -> impl Future<Output = TransportResponse> + Send;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl SearchTransport for HttpTransport {
    async fn get(&self, url: &str) -> TransportResponse {
        let response = match self
            .client
            .get(url)
            .header(ACCEPT, "text/html")
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => return TransportResponse::failed(compact_text(&error.to_string())),
        };

        let status = response.status();
        let status_text = reason_phrase(status);
        if status != StatusCode::OK {
            return TransportResponse::new(status.as_u16(), status_text, String::new());
        }

        match response.text().await {
            Ok(body) => TransportResponse::new(status.as_u16(), status_text, body),
            Err(error) => TransportResponse::failed(format!(
                "failed to read search response body: {}",
                compact_text(&error.to_string())
            )),
        }
    }
}

/// Reason phrase for `status`, or the bare code when it has none.
fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_u16().to_string(), ToString::to_string)
}
