//! Persistent CLI profile configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use roomsearch_core::util::normalize_text_option;
use roomsearch_core::{RoomPin, SearchConfig};
use serde::{Deserialize, Serialize};

use crate::cli::PageArgs;
use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";

pub const PROFILE_ENV: &str = "ROOMSEARCH_PROFILE";
pub const BASE_URL_ENV: &str = "ROOMSEARCH_BASE_URL";
pub const ROOM_ENV: &str = "ROOMSEARCH_ROOM";
pub const PAGE_URL_ENV: &str = "ROOMSEARCH_PAGE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfilesConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, CliProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfile {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("roomsearch").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI config directory".to_string()))
}

pub fn normalize_profile_name(value: Option<&str>) -> Option<String> {
    normalize_text_option(value.map(ToString::to_string))
}

impl CliProfilesConfig {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {error}",
                path.display()
            ))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {error}",
                path.display()
            ))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {error}",
                    parent.display()
                ))
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized).map_err(|error| {
            CliError::Config(format!(
                "Failed to write config at {}: {error}",
                path.display()
            ))
        })
    }

    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> String {
        if let Some(profile) = normalize_profile_name(explicit) {
            return profile;
        }
        if let Some(profile) = normalize_profile_name(std::env::var(PROFILE_ENV).ok().as_deref()) {
            return profile;
        }
        if let Some(profile) = normalize_profile_name(self.active_profile.as_deref()) {
            return profile;
        }
        "default".to_string()
    }

    pub fn profile(&self, name: &str) -> Option<&CliProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut_or_default(&mut self, name: &str) -> &mut CliProfile {
        self.profiles.entry(name.to_string()).or_default()
    }

    fn normalize(&mut self) {
        self.active_profile = normalize_profile_name(self.active_profile.as_deref());
        for profile in self.profiles.values_mut() {
            profile.normalize();
        }
    }
}

impl CliProfile {
    fn normalize(&mut self) {
        self.base_url = normalize_text_option(self.base_url.clone());
        self.room = normalize_text_option(self.room.clone());
        self.page_url = normalize_text_option(self.page_url.clone());
    }
}

/// Merge flags, environment, and profile into a search configuration.
///
/// Each field takes the first value found in that order; unset fields fall
/// back to the library defaults.
pub fn merge_search_config(
    page: &PageArgs,
    profile: Option<&CliProfile>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SearchConfig, CliError> {
    let profile = profile.cloned().unwrap_or_default();
    let defaults = SearchConfig::default();

    let base_url = normalize_text_option(page.base_url.clone())
        .or_else(|| normalize_text_option(env(BASE_URL_ENV)))
        .or(profile.base_url)
        .unwrap_or(defaults.base_url);
    let room = normalize_text_option(page.room.clone())
        .or_else(|| normalize_text_option(env(ROOM_ENV)))
        .or(profile.room)
        .map(|pin| RoomPin::parse(&pin))
        .transpose()?;
    // An explicit --room means the caller wants that room, not a stored page.
    let page_url = if page.room.is_some() {
        None
    } else {
        normalize_text_option(page.page_url.clone())
            .or_else(|| normalize_text_option(env(PAGE_URL_ENV)))
            .or(profile.page_url)
    };
    let timeout_secs = page
        .timeout_secs
        .or(profile.timeout_secs)
        .unwrap_or(defaults.timeout_secs);
    if timeout_secs == 0 {
        return Err(CliError::Config(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }

    Ok(SearchConfig {
        base_url,
        room,
        page_url,
        timeout_secs,
    })
}

/// Resolve the search configuration for the selected profile.
pub fn resolve_search_config(
    global_profile: Option<&str>,
    page: &PageArgs,
) -> Result<SearchConfig, CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(global_profile);
    tracing::debug!(profile = %profile_name, "resolving search config");
    merge_search_config(page, config.profile(&profile_name), |key| {
        std::env::var(key).ok()
    })
}
