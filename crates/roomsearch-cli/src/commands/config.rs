use roomsearch_core::util::{is_http_url, normalize_text_option};
use roomsearch_core::RoomPin;

use crate::cli::{ConfigCommands, PageArgs};
use crate::config_profiles::{merge_search_config, CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            base_url,
            room,
            page_url,
            timeout_secs,
            no_activate,
        } => {
            let update = CliProfile {
                base_url,
                room,
                page_url,
                timeout_secs,
            };
            run_config_init(global_profile, update, no_activate)
        }
        ConfigCommands::Show { json } => run_config_show(global_profile, json),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    update: CliProfile,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing = config.profile(&profile_name).cloned().unwrap_or_default();

    let merged = merge_profile_update(existing, update)?;
    *config.profile_mut_or_default(&profile_name) = merged;
    if !no_activate || config.active_profile.is_none() {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save()?;
    println!("Saved profile '{profile_name}' to {}", path.display());
    Ok(())
}

/// Overlay explicitly given fields on an existing profile and validate them.
pub fn merge_profile_update(
    existing: CliProfile,
    update: CliProfile,
) -> Result<CliProfile, CliError> {
    let base_url = normalize_text_option(update.base_url).or(existing.base_url);
    let page_url = normalize_text_option(update.page_url).or(existing.page_url);
    let room = normalize_text_option(update.room).or(existing.room);

    for (field, value) in [("base_url", &base_url), ("page_url", &page_url)] {
        if let Some(value) = value {
            if !is_http_url(value) {
                return Err(CliError::Config(format!(
                    "{field} must include http:// or https://"
                )));
            }
        }
    }
    if let Some(room) = &room {
        RoomPin::parse(room)?;
    }
    if update.timeout_secs == Some(0) {
        return Err(CliError::Config(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }

    Ok(CliProfile {
        base_url,
        room,
        page_url,
        timeout_secs: update.timeout_secs.or(existing.timeout_secs),
    })
}

fn run_config_show(profile_name: Option<&str>, as_json: bool) -> Result<(), CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_name);
    let resolved = merge_search_config(
        &PageArgs::default(),
        config.profile(&profile_name),
        |key| std::env::var(key).ok(),
    )?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    println!("profile:      {profile_name}");
    println!("base_url:     {}", resolved.base_url);
    println!(
        "room:         {}",
        resolved
            .room
            .map_or_else(|| "-".to_string(), |pin| pin.to_string())
    );
    match resolved.resolve_page_url() {
        Ok(page_url) => println!("page_url:     {page_url}"),
        Err(error) => println!("page_url:     - ({error})"),
    }
    println!("timeout_secs: {}", resolved.timeout_secs);
    Ok(())
}
