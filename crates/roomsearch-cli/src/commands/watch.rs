use roomsearch_core::{ResultsContainer, SearchTransport, SearchTrigger, TextBox};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::PageArgs;
use crate::commands::search::markup_policy;
use crate::commands::terminal::TerminalPane;
use crate::config_profiles::resolve_search_config;
use crate::error::CliError;

pub async fn run_watch(page: &PageArgs, global_profile: Option<&str>) -> Result<(), CliError> {
    let config = resolve_search_config(global_profile, page)?;
    let input = TextBox::new();
    let trigger = SearchTrigger::from_config(&config, input.clone(), TerminalPane::stdout())?
        .with_markup_policy(markup_policy(page));

    tracing::info!(page = %trigger.page_url(), "watching stdin for search text");
    watch_lines(BufReader::new(tokio::io::stdin()), &input, &trigger).await
}

/// Put every line into `input` and search, the way typing into the page
/// does. Waits for the last search at end of input.
pub async fn watch_lines<B, T, R>(
    reader: B,
    input: &TextBox,
    trigger: &SearchTrigger<T, TextBox, R>,
) -> Result<(), CliError>
where
    B: AsyncBufRead + Unpin,
    T: SearchTransport,
    R: ResultsContainer,
{
    let mut lines = reader.lines();
    let mut last = None;
    while let Some(line) = lines.next_line().await? {
        input.set_value(line);
        last = Some(trigger.search());
    }

    if let Some(handle) = last {
        let outcome = handle.outcome().await;
        tracing::debug!(?outcome, "last search finished");
    }
    Ok(())
}
