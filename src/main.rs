use std::path::PathBuf;

use eyre::{Result, bail};
use log::{debug, info, warn};

mod cli;

use cli::{Cli, OutputFormat};
use ytsearch::config::Config;
use ytsearch::{SearchClient, SearchRequest, SearchResponse};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsearch.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("ytsearch=info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsearch")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nCONFIG:\n  {}\n\nLogs are written to: {}",
        ytsearch::config::config_path().display(),
        log_dir().join("ytsearch.log").display()
    )
}

fn resolve_format(cli: &Cli, config: &Config) -> OutputFormat {
    if let Some(format) = cli.format {
        return format;
    }
    match config.default_format.as_deref() {
        Some("text") => OutputFormat::Text,
        Some("json") | None => OutputFormat::Json,
        Some(other) => {
            warn!("Unknown default_format {other:?} in config, using json");
            OutputFormat::Json
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        Config::default()
    });
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    let timeout = config.timeout();
    let format = resolve_format(&cli, &config);

    if cli.verbose {
        let config_path = ytsearch::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        debug!("Config: {config:?}");
    }

    let request = SearchRequest::new(cli.query.clone(), cli.key.clone(), cli.page_token.clone());
    let client = SearchClient::new(config, env!("CARGO_PKG_VERSION"));

    let response = match tokio::time::timeout(timeout, client.search(&request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!("Search abandoned after {timeout:?}");
            SearchResponse::Failed {
                error: format!("request timed out after {}s", timeout.as_secs()),
            }
        }
    };

    if cli.verbose {
        match &response {
            SearchResponse::Found(envelope) => eprintln!(
                "Parser: {}\nResults: {}\nEstimated: {}\nNext page: {}",
                envelope.parser,
                envelope.results.len(),
                envelope.estimated_results,
                envelope.next_page_token.as_deref().unwrap_or("-"),
            ),
            SearchResponse::Failed { error } => eprintln!("Search failed: {error}"),
        }
    }

    let rendered = match format {
        OutputFormat::Json => ytsearch::output::render_json(&response, cli.pretty),
        OutputFormat::Text => ytsearch::output::render_text(&response),
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &rendered)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{rendered}");
    }

    if let SearchResponse::Failed { error } = response {
        bail!("search failed: {error}");
    }

    Ok(())
}
