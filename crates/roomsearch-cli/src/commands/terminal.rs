//! Results container that renders to a terminal stream.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use roomsearch_core::ResultsContainer;

/// Writes each results update as one block, or a blank line when cleared.
#[derive(Debug)]
pub struct TerminalPane<W> {
    out: Arc<Mutex<W>>,
}

impl<W> Clone for TerminalPane<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
        }
    }
}

impl TerminalPane<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> TerminalPane<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    fn write_block(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            tracing::warn!("failed to write search results: {error}");
        }
    }
}

impl<W: Write + Send + 'static> ResultsContainer for TerminalPane<W> {
    fn set_markup(&self, markup: &str) {
        self.write_block(markup.trim_end_matches('\n'));
    }

    fn clear(&self) {
        self.write_block("");
    }
}
