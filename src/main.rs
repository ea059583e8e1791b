//! cliplog - session logger
//!
//! Command line entry point: replays scripted logger operations through a
//! configured sink and validates configuration files.

mod cli;
mod cmd_config;
mod cmd_replay;

use std::sync::OnceLock;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cliplog_config::{ConfigLoader, LogFormat, LoggingConfig};

use cli::{Cli, Commands};
use cmd_config::handle_check_config;
use cmd_replay::handle_replay;

fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    // stdout carries command output, diagnostics go to stderr
    let console = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    let file = match &config.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("cliplog")
                .filename_suffix("log")
                .max_log_files(30)
                .build(log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the writer alive for the program duration
            static GUARD: OnceLock<WorkerGuard> = OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            script,
            sink,
            output,
            dry_run,
        } => {
            let config = ConfigLoader::load_or_default(&cli.config)?;
            init_tracing(&config.logging)?;
            handle_replay(config, &script, sink, output, dry_run)
        }
        Commands::CheckConfig => handle_check_config(&cli.config),
    }
}
