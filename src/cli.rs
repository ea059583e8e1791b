//! CLI definitions for cliplog.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use cliplog_config::SinkKind;

/// cliplog CLI.
#[derive(Parser)]
#[command(name = "cliplog")]
#[command(about = "Session logger with context gating and deferred dispatch")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "config/cliplog.toml",
        env = "CLIPLOG_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Replay a JSON lines script of logger operations
    Replay {
        /// Script with one `{"method": ..., "args": ...}` object per line
        script: PathBuf,

        /// Override the configured sink
        #[arg(long, value_enum)]
        sink: Option<SinkArg>,

        /// Override the JSON lines output path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Record hooks in memory and print them instead of using the sink
        #[arg(long)]
        dry_run: bool,
    },

    /// Load and validate the configuration file
    CheckConfig,
}

/// Sink selection on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum SinkArg {
    Tracing,
    Jsonl,
    Both,
}

impl From<SinkArg> for SinkKind {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Tracing => SinkKind::Tracing,
            SinkArg::Jsonl => SinkKind::Jsonl,
            SinkArg::Both => SinkKind::Both,
        }
    }
}
