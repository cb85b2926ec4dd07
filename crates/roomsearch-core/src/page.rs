//! Page elements a search reads from and writes to.
//!
//! `search-textbox` is a [`QueryInput`], `search-results` is a
//! [`ResultsContainer`]. The in-memory [`TextBox`] and [`ResultsPane`] back the
//! terminal client and the tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Source of the live query text.
pub trait QueryInput: Send + Sync + 'static {
    /// Current value, exactly as typed.
    fn value(&self) -> String;
}

/// Container whose content is replaced by search results.
pub trait ResultsContainer: Send + Sync + 'static {
    /// Replace the content with `markup`.
    fn set_markup(&self, markup: &str);

    /// Remove all content.
    fn clear(&self);
}

/// How response bodies are inserted into the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupPolicy {
    /// Insert the body verbatim. The server is same-origin and owns the markup.
    #[default]
    Trusted,
    /// Escape the body so it renders as literal text.
    TextOnly,
}

impl MarkupPolicy {
    pub fn apply(self, body: &str) -> String {
        match self {
            Self::Trusted => body.to_string(),
            Self::TextOnly => escape_markup(body),
        }
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared text input. Clones see the same value.
#[derive(Debug, Clone, Default)]
pub struct TextBox {
    value: Arc<Mutex<String>>,
}

impl TextBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *lock(&self.value) = value.into();
    }
}

impl QueryInput for TextBox {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }
}

#[derive(Debug, Default)]
struct PaneState {
    content: Option<String>,
    updates: usize,
}

/// Shared results container. Clones see the same content.
///
/// `content()` is `None` once cleared. Every `set_markup` or `clear` counts as
/// one update.
#[derive(Debug, Clone, Default)]
pub struct ResultsPane {
    state: Arc<Mutex<PaneState>>,
}

impl ResultsPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<String> {
        lock(&self.state).content.clone()
    }

    pub fn updates(&self) -> usize {
        lock(&self.state).updates
    }
}

impl ResultsContainer for ResultsPane {
    fn set_markup(&self, markup: &str) {
        let mut state = lock(&self.state);
        state.content = Some(markup.to_string());
        state.updates += 1;
    }

    fn clear(&self) {
        let mut state = lock(&self.state);
        state.content = None;
        state.updates += 1;
    }
}
