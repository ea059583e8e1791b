//! Replay subcommand for cliplog.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use cliplog_config::{Config, ConfigError, ConfigValidator, SinkConfig, SinkKind};
use cliplog_core::{
    FanoutSink, RecordingSink, RequiredContextGate, SessionLogger, SessionLoggerOptions,
};
use cliplog_protocols::{LogOperation, SessionSink};
use cliplog_sink_jsonl::JsonLinesSink;
use cliplog_sink_tracing::TracingSink;

use crate::cli::SinkArg;

/// Counts reported after a replay.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ReplaySummary {
    pub applied: usize,
    pub unparsable: usize,
}

/// The sink a replay writes to, plus handles needed after the run.
struct ReplaySinks {
    sink: Arc<dyn SessionSink>,
    jsonl: Option<Arc<JsonLinesSink<BufWriter<File>>>>,
    recording: Option<RecordingSink>,
}

/// Handle the replay subcommand.
pub(crate) fn handle_replay(
    mut config: Config,
    script: &Path,
    sink: Option<SinkArg>,
    output: Option<PathBuf>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    apply_overrides(&mut config, sink, output)?;

    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    let sinks = if dry_run {
        let recording = RecordingSink::new();
        ReplaySinks {
            sink: Arc::new(recording.clone()),
            jsonl: None,
            recording: Some(recording),
        }
    } else {
        build_sinks(&config.sink)?
    };

    let mut logger = build_logger(&config, sinks.sink.clone())?;
    info!(
        "Replaying {} into sink '{}'",
        script.display(),
        sinks.sink.name()
    );

    let reader = BufReader::new(File::open(script)?);
    let summary = replay_script(&mut logger, reader)?;

    if let Some(jsonl) = &sinks.jsonl {
        jsonl.flush()?;
    }

    if let Some(recording) = &sinks.recording {
        for record in recording.records() {
            println!("{}", serde_json::to_string(&record)?);
        }
    }

    println!(
        "Replayed {} operations ({} unparsable)",
        summary.applied, summary.unparsable
    );
    println!("  Session:  {:?}", logger.session_state());
    println!(
        "  Pending:  {} ({:?})",
        logger.pending_operations().len(),
        logger.flush_state()
    );
    if let Some(session_id) = logger.user_session_id() {
        println!("  Session id: {}", session_id);
    }

    Ok(())
}

/// Apply `--sink` and `--output` on top of the loaded configuration.
///
/// `--output` turns on the JSON-lines sink when the configured sink would not
/// write it. Asking for `--sink tracing` together with `--output` is an error.
pub(crate) fn apply_overrides(
    config: &mut Config,
    sink: Option<SinkArg>,
    output: Option<PathBuf>,
) -> Result<(), ConfigError> {
    if let Some(sink) = sink {
        config.sink.kind = sink.into();
    }

    if let Some(output) = output {
        if !config.sink.kind.writes_jsonl() {
            if sink.is_some() {
                return Err(ConfigError::InvalidValue {
                    field: "sink.path".to_string(),
                    message: "--output needs the jsonl sink, not --sink tracing".to_string(),
                });
            }
            config.sink.kind = SinkKind::Jsonl;
        }
        config.sink.path = Some(output);
    }

    config.fill_default_paths();
    Ok(())
}

fn build_sinks(config: &SinkConfig) -> Result<ReplaySinks, Box<dyn std::error::Error>> {
    let mut fanout = FanoutSink::new();
    let mut jsonl = None;

    if config.kind.writes_tracing() {
        fanout.add_sink(Arc::new(TracingSink::with_min_trace_level(
            config.trace_level()?,
        )));
    }

    if config.kind.writes_jsonl() {
        let path = config.path.as_deref().ok_or_else(|| ConfigError::InvalidValue {
            field: "sink.path".to_string(),
            message: "path is required when the jsonl sink is enabled".to_string(),
        })?;
        let sink = Arc::new(JsonLinesSink::create(path)?);
        fanout.add_sink(sink.clone());
        jsonl = Some(sink);
    }

    Ok(ReplaySinks {
        sink: Arc::new(fanout),
        jsonl,
        recording: None,
    })
}

/// Build a logger honoring the gate and funnel configuration.
pub(crate) fn build_logger(
    config: &Config,
    sink: Arc<dyn SessionSink>,
) -> Result<SessionLogger, ConfigError> {
    let mut options = SessionLoggerOptions::new()
        .with_non_interaction_ids(config.funnel.extra_non_interaction_ids.iter().cloned());

    let required = config.gate.required_keys()?;
    if !required.is_empty() {
        options = options.with_context_gate(Arc::new(RequiredContextGate::new(required)));
    }

    Ok(SessionLogger::with_options(sink, options))
}

/// Feed every script line through [`SessionLogger::apply`].
///
/// Blank lines and `#` comments are skipped. Lines that do not parse are
/// reported to the logger as JSON parse failures.
pub(crate) fn replay_script<R: BufRead>(
    logger: &mut SessionLogger,
    reader: R,
) -> io::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match LogOperation::from_json(line) {
            Ok(operation) => {
                logger.apply(operation);
                summary.applied += 1;
            }
            Err(e) => {
                warn!(line = index + 1, "Skipping unparsable operation: {}", e);
                logger.log_json_parse_unexpected(line);
                summary.unparsable += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "cmd_replay_tests.rs"]
mod tests;
