use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "roomsearch")]
#[command(about = "Search a room's catalogue from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

/// Which page searches are sent to.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Six-digit room pin
    #[arg(long, value_name = "PIN")]
    pub room: Option<String>,
    /// Base URL rooms live under
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Full page URL, overrides --room and --base-url
    #[arg(long, value_name = "URL", conflicts_with = "room")]
    pub page_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
    /// Render results as escaped text instead of raw markup
    #[arg(long)]
    pub text_only: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one search and print the results
    Search {
        /// Search text, sent verbatim (may be empty)
        query: Vec<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Search on every line read from stdin
    Watch {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Base URL rooms live under
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Default room pin
        #[arg(long, value_name = "PIN")]
        room: Option<String>,
        /// Full page URL
        #[arg(long, value_name = "URL")]
        page_url: Option<String>,
        /// Request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved configuration for a profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
