//! CLI entrypoint for concord
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use concord_application::{NoEventLogger, VoteEventLogger, VotingEngine};
use concord_domain::Severity;
use concord_infrastructure::{
    ConfigLoader, FileConfig, InMemoryCorrelationStore, InMemoryVotingStore,
    JsonlVoteEventLogger,
};
use concord_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ReplConfig, VotingRepl,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.logging.file_path())?;

    info!("Starting concord");

    check_config(&config)?;

    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
    };
    if !output.color {
        colored::control::set_override(false);
    }
    let formatter = ConsoleFormatter::new(output.format);

    // === Dependency Injection ===
    let events: Arc<dyn VoteEventLogger> = match config.logging.event_log_path() {
        Some(path) => Arc::new(
            JsonlVoteEventLogger::new(&path)
                .with_context(|| format!("Failed to open event log {}", path.display()))?,
        ),
        None => Arc::new(NoEventLogger),
    };
    let engine = Arc::new(VotingEngine::with_event_logger(
        Arc::new(InMemoryVotingStore::new()),
        Arc::new(InMemoryCorrelationStore::new()),
        events,
    ));

    for seed in &config.ballots {
        engine
            .ensure_ballot(&seed.label, &seed.options)
            .await
            .with_context(|| format!("Failed to create ballot '{}'", seed.label))?;
    }

    if cli.list {
        println!("{}", formatter.format_ballots(&engine.ballots().await?));
        return Ok(());
    }

    let repl_config = ReplConfig {
        mode: cli
            .mode
            .unwrap_or_else(|| config.suggestions.parse_default_mode().0),
        limit: cli.limit.unwrap_or(config.suggestions.limit),
        history_file: config.repl.history_path(),
        show_hints: !cli.quiet,
    };

    let mut repl = VotingRepl::new(engine, formatter, repl_config);
    repl.run(cli.ballot.as_deref()).await?;

    Ok(())
}

/// Initialize tracing based on verbosity level, writing to `file` when set
fn init_logging(verbose: u8, file: Option<PathBuf>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Report configuration issues; errors abort start-up
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut errors = 0;
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => {
                eprintln!("config error: {}", issue.message);
                errors += 1;
            }
        }
    }
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}
