use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytsearch",
    about = "YouTube search results scraper",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Free-text search query
    #[arg(required_unless_present = "key")]
    pub query: Option<String>,

    /// API key from a previous response; switches to the continuation path
    #[arg(short, long, requires = "page_token")]
    pub key: Option<String>,

    /// nextPageToken from a previous response
    #[arg(short, long, requires = "key")]
    pub page_token: Option<String>,

    /// Output format: json (default), text
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Abandon the search after this many seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show detection path and counts
    #[arg(short, long)]
    pub verbose: bool,
}
