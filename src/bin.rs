//! Binary entry point for `clinic-triage`.
//!
//! This module provides the command-line interface for the clinic desk with
//! options for configuration file paths and logging verbosity. It initializes
//! logging, loads the configuration and hands over to the desk.

use clap::Parser;
use clinic_triage::prelude::*;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Clinic-triage – a clinic check-in desk with a priority queue.
///
/// Configuration can come from `config.toml` or environment variables
/// prefixed with `CLINIC_TRIAGE_`. Patients register, log in and request a
/// turn; staff log in and serve the queue in triage order.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the desk will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: WARN level
    /// - -v: INFO level
    /// - -vv: DEBUG level
    /// - -vvv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point for the clinic-triage binary.
///
/// Sets up logging based on verbosity, loads configuration, and starts the desk.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer. Logs go to stderr so they stay out of the desk output.

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry().with(level_filter).with(stderr).init();

    let config = Config::load(args.config.as_deref())?;

    debug!(staff = config.staff.len(), withdraw_on_logout = config.withdraw_on_logout, "Configuration loaded.");

    clinic_triage::start(config).await
}
