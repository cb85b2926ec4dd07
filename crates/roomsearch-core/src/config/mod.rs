//! Search configuration shared by every client.
//!
//! A search needs one thing: the URL of the page it was issued from. That is
//! either given directly or derived from a base URL and a room pin.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::room::{room_page_url, RoomPin};
use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where searches are sent and how long a request may take.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub room: Option<RoomPin>,
    /// Explicit page URL; wins over `base_url` + `room` when set.
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            room: None,
            page_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SearchConfig {
    /// Returns the URL of the page searches are relative to.
    pub fn resolve_page_url(&self) -> Result<String> {
        if let Some(page_url) = normalize_text_option(self.page_url.clone()) {
            if !is_http_url(&page_url) {
                return Err(Error::InvalidUrl(format!(
                    "page URL '{page_url}' must include http:// or https://"
                )));
            }
            return Ok(page_url);
        }

        let pin = self.room.ok_or(Error::MissingPage)?;
        room_page_url(&self.base_url, pin)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
