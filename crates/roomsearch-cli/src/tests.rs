use std::io;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::CommandFactory;
use pretty_assertions::assert_eq;
use roomsearch_core::{
    MarkupPolicy, QueryInput, ResultsContainer, SearchTransport, SearchTrigger, TextBox,
    TransportResponse,
};

use crate::cli::{Cli, CompletionShell, PageArgs};
use crate::commands::completions::run_completions;
use crate::commands::config::merge_profile_update;
use crate::commands::search::{join_query, markup_policy};
use crate::commands::terminal::TerminalPane;
use crate::commands::watch::watch_lines;
use crate::config_profiles::CliProfile;
use crate::error::CliError;

const PAGE_URL: &str = "http://localhost:5000/482913";

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Answers every query with a list item echoing it; empty queries get 404.
struct EchoTransport;

impl SearchTransport for EchoTransport {
    async fn get(&self, url: &str) -> TransportResponse {
        let query = url.rsplit_once("?q=").map_or("", |(_, query)| query);
        if query.is_empty() {
            TransportResponse::new(404, "Not Found", "")
        } else {
            TransportResponse::new(200, "OK", format!("<li>{query}</li>"))
        }
    }
}

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn join_query_keeps_words_verbatim() {
    let parts = vec!["daft".to_string(), "punk".to_string()];
    assert_eq!(join_query(&parts), "daft punk");
    assert_eq!(join_query(&[]), "");
}

#[test]
fn text_only_flag_selects_escaping_policy() {
    let page = PageArgs {
        text_only: true,
        ..Default::default()
    };
    assert_eq!(markup_policy(&page), MarkupPolicy::TextOnly);
    assert_eq!(markup_policy(&PageArgs::default()), MarkupPolicy::Trusted);
}

#[test]
fn merge_profile_update_overlays_given_fields() {
    let existing = CliProfile {
        base_url: Some("https://rooms.example.com/".to_string()),
        room: Some("111111".to_string()),
        page_url: None,
        timeout_secs: Some(5),
    };
    let update = CliProfile {
        room: Some(" 482913 ".to_string()),
        ..Default::default()
    };

    let merged = merge_profile_update(existing, update).unwrap();
    assert_eq!(
        merged,
        CliProfile {
            base_url: Some("https://rooms.example.com/".to_string()),
            room: Some("482913".to_string()),
            page_url: None,
            timeout_secs: Some(5),
        }
    );
}

#[test]
fn merge_profile_update_rejects_invalid_values() {
    let bad_url = CliProfile {
        base_url: Some("rooms.example.com".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        merge_profile_update(CliProfile::default(), bad_url),
        Err(CliError::Config(_))
    ));

    let bad_room = CliProfile {
        room: Some("12345".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        merge_profile_update(CliProfile::default(), bad_room),
        Err(CliError::Core(_))
    ));

    let zero_timeout = CliProfile {
        timeout_secs: Some(0),
        ..Default::default()
    };
    assert!(merge_profile_update(CliProfile::default(), zero_timeout).is_err());
}

#[test]
fn terminal_pane_writes_markup_and_blank_on_clear() {
    let buffer = SharedBuffer::default();
    let pane = TerminalPane::new(buffer.clone());

    pane.set_markup("<ul><li>a</li></ul>\n");
    pane.clear();

    assert_eq!(buffer.contents(), "<ul><li>a</li></ul>\n\n");
}

#[tokio::test]
async fn watch_lines_renders_last_line_results() {
    let buffer = SharedBuffer::default();
    let input = TextBox::new();
    let trigger = SearchTrigger::new(
        PAGE_URL,
        input.clone(),
        TerminalPane::new(buffer.clone()),
        EchoTransport,
    );

    watch_lines(&b"ab\nabba\n"[..], &input, &trigger)
        .await
        .unwrap();

    assert_eq!(input.value(), "abba");
    assert_eq!(trigger.latest_ticket(), 2);
    assert!(buffer.contents().ends_with("<li>abba</li>\n"));
}

#[tokio::test]
async fn watch_lines_empty_line_clears_results() {
    let buffer = SharedBuffer::default();
    let input = TextBox::new();
    let trigger = SearchTrigger::new(
        PAGE_URL,
        input.clone(),
        TerminalPane::new(buffer.clone()),
        EchoTransport,
    );

    watch_lines(&b"\n"[..], &input, &trigger).await.unwrap();

    assert_eq!(buffer.contents(), "\n");
}

#[tokio::test]
async fn watch_lines_without_input_sends_nothing() {
    let buffer = SharedBuffer::default();
    let input = TextBox::new();
    let trigger = SearchTrigger::new(
        PAGE_URL,
        input.clone(),
        TerminalPane::new(buffer.clone()),
        EchoTransport,
    );

    watch_lines(&b""[..], &input, &trigger).await.unwrap();

    assert_eq!(trigger.latest_ticket(), 0);
    assert_eq!(buffer.contents(), "");
}

#[test]
fn completions_bash_writes_script() {
    let output_path = std::env::temp_dir().join(format!(
        "roomsearch-completions-{}.bash",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos())
    ));

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_roomsearch()"));
    assert!(script.contains("complete -F _roomsearch"));

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn completions_fish_uses_binary_name() {
    let output_path = std::env::temp_dir().join(format!(
        "roomsearch-completions-{}.fish",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos())
    ));

    run_completions(CompletionShell::Fish, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("complete -c roomsearch"));
    assert_eq!(
        clap_complete::Shell::from(CompletionShell::Zsh),
        clap_complete::Shell::Zsh
    );

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn missing_page_passes_through_core_error() {
    let error = CliError::from(
        roomsearch_core::SearchConfig::default()
            .resolve_page_url()
            .unwrap_err(),
    );
    assert!(matches!(
        error,
        CliError::Core(roomsearch_core::Error::MissingPage)
    ));
    assert!(error.to_string().contains("No search page configured"));
}
