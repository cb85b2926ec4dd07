//! Room addressing.
//!
//! Every room has a page at `<base URL><pin>`; the search endpoint hangs off
//! that page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::is_http_url;
use crate::{Error, Result};

/// Number of digits in a room pin.
pub const PIN_DIGITS: usize = 6;

const MIN_PIN: u32 = 111_111;
// Rooms are allocated from a half-open range, so 999999 is never a pin.
const MAX_PIN: u32 = 999_998;

/// A six-digit room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomPin(u32);

impl RoomPin {
    /// Parse a pin, ignoring surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.len() != PIN_DIGITS || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(Error::InvalidRoomPin(format!(
                "'{value}' must be exactly {PIN_DIGITS} digits"
            )));
        }

        let pin = value
            .parse::<u32>()
            .map_err(|error| Error::InvalidRoomPin(format!("'{value}': {error}")))?;
        if !(MIN_PIN..=MAX_PIN).contains(&pin) {
            return Err(Error::InvalidRoomPin(format!(
                "'{value}' is outside {MIN_PIN}..={MAX_PIN}"
            )));
        }

        Ok(Self(pin))
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RoomPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomPin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoomPin {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RoomPin> for String {
    fn from(pin: RoomPin) -> Self {
        pin.to_string()
    }
}

/// Build the page URL of a room: the base URL and the pin joined by one `/`.
pub fn room_page_url(base_url: &str, pin: RoomPin) -> Result<String> {
    let base_url = base_url.trim();
    if !is_http_url(base_url) {
        return Err(Error::InvalidUrl(format!(
            "base URL '{base_url}' must include http:// or https://"
        )));
    }
    Ok(format!("{}/{pin}", base_url.trim_end_matches('/')))
}
