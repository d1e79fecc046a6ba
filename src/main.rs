//! Nexacro license requester - CLI entry point.
//!
//! Loads credentials from the environment, runs the three-step portal
//! workflow, and exits 0 on success or 1 on any configuration error or
//! workflow failure. Intended for cron and CI (GitHub Actions) execution.

use std::io;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nexacro_license::{Config, LicenseRequester};

/// Directory for the append-mode log file, relative to the working directory.
const LOG_DIR: &str = "logs";

/// Log file name.
const LOG_FILE: &str = "nexacro-license.log";

/// Initialize the tracing subscriber with console and file sinks.
///
/// Both sinks share the same format; the file sink appends under `logs/`.
/// The returned guard must live until shutdown so buffered lines are flushed.
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = std::fs::create_dir_all(LOG_DIR) {
        eprintln!("Warning: could not create log directory {LOG_DIR}: {e}");
    }
    let file_appender = tracing_appender::rolling::never(LOG_DIR, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = init_tracing();

    // Configuration problems fail the run before any network activity.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            return ExitCode::from(1);
        }
    };
    if let Err(e) = config.validate() {
        error!("Configuration error: {e}");
        return ExitCode::from(1);
    }

    let requester = LicenseRequester::new(config);
    let outcome = requester.run().await;

    if outcome.success {
        info!("Done");
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
