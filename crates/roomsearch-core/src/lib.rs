//! roomsearch-core - Core library for roomsearch
//!
//! This crate contains the search controller, its HTTP transport, the page
//! element abstractions it reads from and writes to, and room addressing.

pub mod config;
pub mod error;
pub mod page;
pub mod room;
pub mod search;
pub mod transport;
pub mod util;

pub use config::SearchConfig;
pub use error::{Error, Result};
pub use page::{MarkupPolicy, QueryInput, ResultsContainer, ResultsPane, TextBox};
pub use room::RoomPin;
pub use search::{build_search_url, SearchHandle, SearchOutcome, SearchTrigger};
pub use transport::{HttpTransport, SearchTransport, TransportResponse};
