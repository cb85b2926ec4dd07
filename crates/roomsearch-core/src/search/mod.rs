//! Live search against a room page.
//!
//! [`SearchTrigger`] owns the page elements and the request lifecycle. Each
//! call to [`SearchTrigger::search`] gets a ticket; only the completion holding
//! the latest ticket may touch the results container, so overlapping searches
//! produce one visible update.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};

use crate::config::SearchConfig;
use crate::page::{MarkupPolicy, QueryInput, ResultsContainer};
use crate::transport::{HttpTransport, SearchTransport, TransportResponse};
use crate::Result;

/// Path appended to the page URL.
pub const SEARCH_PATH: &str = "/search";
/// Query parameter carrying the search text.
pub const QUERY_PARAM: &str = "q";

/// Build `<page URL>/search?q=<value>`.
///
/// The value is inserted as-is; the transport applies whatever encoding its
/// URL parser does by default.
pub fn build_search_url(page_url: &str, value: &str) -> String {
    format!("{page_url}{SEARCH_PATH}?{QUERY_PARAM}={value}")
}

/// How a dispatched search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The container now holds the response body.
    Rendered { ticket: u64 },
    /// The request failed and the container was cleared.
    Cleared {
        ticket: u64,
        status: u16,
        status_text: String,
    },
    /// A newer search was dispatched first; the container was left alone.
    Superseded { ticket: u64 },
}

impl SearchOutcome {
    pub const fn ticket(&self) -> u64 {
        match self {
            Self::Rendered { ticket }
            | Self::Cleared { ticket, .. }
            | Self::Superseded { ticket } => *ticket,
        }
    }
}

/// Handle to one dispatched search.
///
/// Dropping it does not cancel the request.
#[derive(Debug)]
pub struct SearchHandle {
    ticket: u64,
    task: JoinHandle<SearchOutcome>,
}

impl SearchHandle {
    pub const fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Wait for the search to finish.
    pub async fn outcome(self) -> SearchOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(_) => SearchOutcome::Superseded {
                ticket: self.ticket,
            },
        }
    }
}

struct Shared<T, I, R> {
    page_url: String,
    input: I,
    results: R,
    transport: T,
    latest: AtomicU64,
    // Dispatch only. Never held across a container callback, so a container
    // may start a new search from `set_markup` or `clear`.
    in_flight: Mutex<Option<AbortHandle>>,
    // Serialises container writes between completing tasks.
    render: Mutex<()>,
}

impl<T, I, R> Shared<T, I, R>
where
    T: SearchTransport,
    I: QueryInput,
    R: ResultsContainer,
{
    fn lock_in_flight(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn complete(
        &self,
        ticket: u64,
        policy: MarkupPolicy,
        response: TransportResponse,
    ) -> SearchOutcome {
        let _render = self.render.lock().unwrap_or_else(PoisonError::into_inner);
        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding superseded search response");
            return SearchOutcome::Superseded { ticket };
        }

        if response.is_ok() {
            self.results.set_markup(&policy.apply(&response.body));
            tracing::debug!(ticket, bytes = response.body.len(), "search results rendered");
            return SearchOutcome::Rendered { ticket };
        }

        self.results.clear();
        tracing::error!(
            ticket,
            status = response.status,
            status_text = %response.status_text,
            "search failed: {}",
            response.status_text
        );
        SearchOutcome::Cleared {
            ticket,
            status: response.status,
            status_text: response.status_text,
        }
    }
}

/// Search controller bound to one page.
pub struct SearchTrigger<T, I, R> {
    shared: Arc<Shared<T, I, R>>,
    policy: MarkupPolicy,
}

impl<T, I, R> Clone for SearchTrigger<T, I, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            policy: self.policy,
        }
    }
}

impl<I, R> SearchTrigger<HttpTransport, I, R>
where
    I: QueryInput,
    R: ResultsContainer,
{
    /// Build a trigger that talks HTTP to the page described by `config`.
    pub fn from_config(config: &SearchConfig, input: I, results: R) -> Result<Self> {
        let page_url = config.resolve_page_url()?;
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::new(page_url, input, results, transport))
    }
}

impl<T, I, R> SearchTrigger<T, I, R>
where
    T: SearchTransport,
    I: QueryInput,
    R: ResultsContainer,
{
    pub fn new(page_url: impl Into<String>, input: I, results: R, transport: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                page_url: page_url.into(),
                input,
                results,
                transport,
                latest: AtomicU64::new(0),
                in_flight: Mutex::new(None),
                render: Mutex::new(()),
            }),
            policy: MarkupPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_markup_policy(mut self, policy: MarkupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn page_url(&self) -> &str {
        &self.shared.page_url
    }

    pub const fn markup_policy(&self) -> MarkupPolicy {
        self.policy
    }

    /// Ticket of the most recent dispatch, `0` before the first one.
    pub fn latest_ticket(&self) -> u64 {
        self.shared.latest.load(Ordering::SeqCst)
    }

    /// Read the input and dispatch a search. Returns immediately.
    ///
    /// Any search still in flight is aborted. Must be called from within a
    /// tokio runtime.
    pub fn search(&self) -> SearchHandle {
        let query = self.shared.input.value();
        let url = build_search_url(&self.shared.page_url, &query);

        let mut in_flight = self.shared.lock_in_flight();
        let ticket = self.shared.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(ticket, %url, "dispatching search");

        let shared = Arc::clone(&self.shared);
        let policy = self.policy;
        let task = tokio::spawn(async move {
            let response = shared.transport.get(&url).await;
            shared.complete(ticket, policy, response)
        });

        if let Some(previous) = in_flight.replace(task.abort_handle()) {
            previous.abort();
        }

        SearchHandle { ticket, task }
    }
}
