pub mod completions;
pub mod config;
pub mod search;
pub mod terminal;
pub mod watch;
