//! JSON lines session sink.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use cliplog_protocols::{
    ContextKey, ContextValue, EndTrigger, Event, FailureInfo, FailureLabel, FailureType,
    FunnelLabel, SessionSink, TraceLabel, TraceLevel, sink::new_session_id,
};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value, json};
use tracing::{debug, error};

use crate::error::SinkError;

/// Session sink writing one JSON object per hook.
///
/// Write failures are reported through `tracing` and otherwise ignored, so
/// a broken destination never reaches the logger.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
    session_id: RwLock<Option<String>>,
    lines: AtomicU64,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Append to the file at `path`, creating it and its parent directories.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Writing session records to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            session_id: RwLock::new(None),
            lines: AtomicU64::new(0),
        }
    }

    /// Number of lines written successfully.
    pub fn lines_written(&self) -> u64 {
        self.lines.load(Ordering::Relaxed)
    }

    /// Session id last handed out by this sink.
    pub fn session_id(&self) -> Option<String> {
        self.session_id.read().clone()
    }

    pub fn flush(&self) -> Result<(), SinkError> {
        self.writer.lock().flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        let mut writer = self.writer.into_inner();
        writer.flush()?;
        Ok(writer)
    }

    fn line(&self, kind: &str, fields: Value) -> Result<Vec<u8>, SinkError> {
        let mut object = Map::new();
        object.insert("kind".to_string(), Value::from(kind));
        object.insert("timestamp".to_string(), Value::from(Utc::now().to_rfc3339()));
        object.insert(
            "session_id".to_string(),
            self.session_id().map(Value::from).unwrap_or(Value::Null),
        );
        if let Value::Object(fields) = fields {
            object.extend(fields);
        }

        let mut line = serde_json::to_vec(&Value::Object(object))?;
        line.push(b'\n');
        Ok(line)
    }

    fn write(&self, kind: &str, fields: Value) {
        let result = self.line(kind, fields).and_then(|line| {
            self.writer.lock().write_all(&line)?;
            Ok(())
        });
        match result {
            Ok(()) => {
                self.lines.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => error!("Failed to write {} record: {}", kind, e),
        }
    }
}

impl<W: Write + Send> SessionSink for JsonLinesSink<W> {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn handle_event(&self, event: &Event) {
        self.write("event", json!({ "event": event }));
    }

    fn handle_event_pure(&self, event: &Event) {
        self.write("event_pure", json!({ "event": event }));
    }

    fn handle_failure(
        &self,
        label: FailureLabel,
        failure_type: FailureType,
        info: Option<&FailureInfo>,
        id: Option<&str>,
    ) {
        self.write(
            "failure",
            json!({
                "label": label,
                "failure_type": failure_type,
                "info": info,
                "id": id,
            }),
        );
    }

    fn handle_user_funnel(&self, label: FunnelLabel) {
        self.write("user_funnel", json!({ "label": label }));
    }

    fn handle_click_event(&self, click_id: &str) {
        self.write("click", json!({ "click_id": click_id }));
    }

    fn handle_session_start(&self) {
        self.write("session_start", json!({}));
    }

    fn handle_session_end(&self, end_trigger: Option<EndTrigger>) {
        self.write("session_end", json!({ "end_trigger": end_trigger }));
        *self.session_id.write() = None;
        if let Err(e) = self.flush() {
            error!("Failed to flush session records: {}", e);
        }
    }

    fn handle_trace(&self, label: TraceLabel, level: TraceLevel, message: Option<&str>) {
        self.write(
            "trace",
            json!({ "label": label, "level": level, "message": message }),
        );
    }

    fn handle_set_context(&self, key: ContextKey, value: &ContextValue) {
        self.write("set_context", json!({ "key": key, "value": value }));
    }

    fn handle_set_user_session_id(&self, current: Option<&str>) -> Option<String> {
        let id = current.map(str::to_string).unwrap_or_else(new_session_id);
        *self.session_id.write() = Some(id.clone());
        self.write("set_user_session_id", json!({}));
        Some(id)
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
