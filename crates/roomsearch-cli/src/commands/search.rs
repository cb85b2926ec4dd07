use roomsearch_core::{MarkupPolicy, ResultsPane, SearchOutcome, SearchTrigger, TextBox};

use crate::cli::PageArgs;
use crate::config_profiles::resolve_search_config;
use crate::error::CliError;

/// Join positional words the way a textbox would hold them.
pub fn join_query(parts: &[String]) -> String {
    parts.join(" ")
}

pub const fn markup_policy(page: &PageArgs) -> MarkupPolicy {
    if page.text_only {
        MarkupPolicy::TextOnly
    } else {
        MarkupPolicy::Trusted
    }
}

pub async fn run_search(
    query_parts: &[String],
    page: &PageArgs,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let config = resolve_search_config(global_profile, page)?;
    let input = TextBox::new();
    let results = ResultsPane::new();
    let trigger = SearchTrigger::from_config(&config, input.clone(), results.clone())?
        .with_markup_policy(markup_policy(page));

    input.set_value(join_query(query_parts));
    let outcome = trigger.search().outcome().await;
    tracing::debug!(?outcome, "search finished");

    if let (SearchOutcome::Rendered { .. }, Some(content)) = (&outcome, results.content()) {
        println!("{content}");
    }

    Ok(())
}
