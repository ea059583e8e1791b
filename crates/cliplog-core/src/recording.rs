//! In-memory recording sink.

use std::sync::Arc;

use cliplog_protocols::{
    ContextKey, ContextValue, EndTrigger, Event, FailureInfo, FailureLabel, FailureType,
    FunnelLabel, SessionSink, TraceLabel, TraceLevel,
};
use parking_lot::Mutex;
use serde::Serialize;

/// One hook invocation captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkRecord {
    Event {
        event: Event,
    },
    EventPure {
        event: Event,
    },
    Failure {
        label: FailureLabel,
        failure_type: FailureType,
        info: Option<FailureInfo>,
        id: Option<String>,
    },
    UserFunnel {
        label: FunnelLabel,
    },
    Click {
        click_id: String,
    },
    SessionStart,
    SessionEnd {
        end_trigger: Option<EndTrigger>,
    },
    Trace {
        label: TraceLabel,
        level: TraceLevel,
        message: Option<String>,
    },
    SetContext {
        key: ContextKey,
        value: ContextValue,
    },
    SetUserSessionId {
        session_id: Option<String>,
    },
}

/// Sink that keeps every hook invocation in memory.
///
/// Clones share the same record list.
#[derive(Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<SinkRecord>>>,
    session_id: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always reveal `session_id` instead of minting random ids.
    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            records: Arc::default(),
            session_id: Some(session_id.into()),
        }
    }

    /// Snapshot of the recorded hooks, oldest first.
    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Recorded failures with the given label.
    pub fn failures(&self, label: FailureLabel) -> Vec<SinkRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| matches!(r, SinkRecord::Failure { label: l, .. } if *l == label))
            .cloned()
            .collect()
    }

    fn record(&self, record: SinkRecord) {
        self.records.lock().push(record);
    }
}

impl SessionSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn handle_event(&self, event: &Event) {
        self.record(SinkRecord::Event {
            event: event.clone(),
        });
    }

    fn handle_event_pure(&self, event: &Event) {
        self.record(SinkRecord::EventPure {
            event: event.clone(),
        });
    }

    fn handle_failure(
        &self,
        label: FailureLabel,
        failure_type: FailureType,
        info: Option<&FailureInfo>,
        id: Option<&str>,
    ) {
        self.record(SinkRecord::Failure {
            label,
            failure_type,
            info: info.cloned(),
            id: id.map(str::to_string),
        });
    }

    fn handle_user_funnel(&self, label: FunnelLabel) {
        self.record(SinkRecord::UserFunnel { label });
    }

    fn handle_click_event(&self, click_id: &str) {
        self.record(SinkRecord::Click {
            click_id: click_id.to_string(),
        });
    }

    fn handle_session_start(&self) {
        self.record(SinkRecord::SessionStart);
    }

    fn handle_session_end(&self, end_trigger: Option<EndTrigger>) {
        self.record(SinkRecord::SessionEnd { end_trigger });
    }

    fn handle_trace(&self, label: TraceLabel, level: TraceLevel, message: Option<&str>) {
        self.record(SinkRecord::Trace {
            label,
            level,
            message: message.map(str::to_string),
        });
    }

    fn handle_set_context(&self, key: ContextKey, value: &ContextValue) {
        self.record(SinkRecord::SetContext {
            key,
            value: value.clone(),
        });
    }

    fn handle_set_user_session_id(&self, current: Option<&str>) -> Option<String> {
        let session_id = match (&self.session_id, current) {
            (Some(fixed), _) => fixed.clone(),
            (None, Some(current)) => current.to_string(),
            (None, None) => cliplog_protocols::sink::new_session_id(),
        };
        self.record(SinkRecord::SetUserSessionId {
            session_id: Some(session_id.clone()),
        });
        Some(session_id)
    }
}
