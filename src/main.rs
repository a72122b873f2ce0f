//! Mailharvest main entry point
//!
//! This is the command-line interface for the mailharvest PDF email
//! harvester. It runs one job from the command line, or serves the HTTP
//! surface with `--serve`.

use clap::Parser;
use mailharvest::config::load_config_with_hash;
use mailharvest::crawler::{build_http_client, Orchestrator, WorkerPool};
use mailharvest::server::run_server;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mailharvest: crawl pages, follow PDF links, harvest email addresses
///
/// Given a list of seed URLs, mailharvest scans each page for linked PDF
/// documents, extracts the email addresses found in their text, and writes
/// the deduplicated result to a text artifact.
#[derive(Parser, Debug)]
#[command(name = "mailharvest")]
#[command(version)]
#[command(about = "Extract email addresses from PDFs linked on web pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Seed URLs to process in one-shot mode
    #[arg(value_name = "URLS")]
    urls: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start the HTTP surface instead of running a one-shot job
    #[arg(long, conflicts_with = "urls")]
    serve: bool,

    /// Validate config, show what would run, and exit
    #[arg(long, conflicts_with = "serve")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config, &cli.urls);
        return Ok(());
    }

    let client = build_http_client(&config.http)?;
    let pool = WorkerPool::new(config.pool.capacity);
    let orchestrator = Orchestrator::new(pool, client, &config.output.directory);

    // The original bootstraps the output directory at startup; artifact
    // writes re-create it if it disappears in between.
    std::fs::create_dir_all(&config.output.directory)?;

    if cli.serve {
        run_server(&config.server, orchestrator).await?;
        return Ok(());
    }

    if cli.urls.is_empty() {
        anyhow::bail!("no seed URLs given (pass URLs after the config path, or use --serve)");
    }

    handle_job(&orchestrator, cli.urls).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mailharvest=info,warn"),
            1 => EnvFilter::new("mailharvest=debug,info"),
            2 => EnvFilter::new("mailharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: validates config and shows what would run
fn handle_dry_run(config: &mailharvest::Config, urls: &[String]) {
    println!("=== Mailharvest Dry Run ===\n");

    println!("Worker pool:");
    println!("  Capacity: {}", config.pool.capacity);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Request timeout: {}s", config.http.request_timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    println!("\nServer:");
    println!("  Bind address: {}", config.server.bind_address);

    println!("\nSeed URLs ({}):", urls.len());
    for url in urls {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
}

/// Runs one job and prints its progress and final summary
async fn handle_job(orchestrator: &Orchestrator, urls: Vec<String>) -> anyhow::Result<()> {
    let mut handle = orchestrator.submit(urls);
    tracing::info!("Submitted job {}", handle.id());

    while let Some(event) = handle.next_event().await {
        tracing::info!("{}", event.describe());
    }

    let result = handle.wait().await?;

    println!("\n=== Extraction complete ===");
    println!("Emails found: {}", result.count);
    for email in &result.emails {
        println!("  {}", email);
    }
    println!("Artifact: {}", result.artifact);

    Ok(())
}
