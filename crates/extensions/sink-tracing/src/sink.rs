//! Tracing-backed session sink.

use cliplog_protocols::{
    ContextKey, ContextValue, EndTrigger, Event, FailureInfo, FailureLabel, FailureType,
    FunnelLabel, SessionSink, TraceLabel, TraceLevel, sink::new_session_id,
};
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

const TARGET: &str = "cliplog::session";

/// Session sink that turns every hook into a `tracing` record.
pub struct TracingSink {
    min_trace_level: TraceLevel,
    session_id: RwLock<Option<String>>,
}

impl TracingSink {
    /// Create a sink forwarding every trace level.
    pub fn new() -> Self {
        Self::with_min_trace_level(TraceLevel::Verbose)
    }

    /// Create a sink that drops traces more verbose than `level`.
    pub fn with_min_trace_level(level: TraceLevel) -> Self {
        Self {
            min_trace_level: level,
            session_id: RwLock::new(None),
        }
    }

    pub fn min_trace_level(&self) -> TraceLevel {
        self.min_trace_level
    }

    /// Whether a trace at `level` is forwarded.
    ///
    /// `TraceLevel::None` traces are never forwarded.
    pub fn forwards(&self, level: TraceLevel) -> bool {
        level != TraceLevel::None && level <= self.min_trace_level
    }

    /// Session id last handed out by this sink.
    pub fn session_id(&self) -> Option<String> {
        self.session_id.read().clone()
    }

    fn session(&self) -> String {
        self.session_id.read().clone().unwrap_or_default()
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn handle_event(&self, event: &Event) {
        let properties = serde_json::to_string(&event.properties).unwrap_or_default();
        info!(
            target: TARGET,
            session_id = %self.session(),
            label = %event.label,
            category = ?event.category,
            status = ?event.status,
            duration_ms = ?event.duration_ms,
            %properties,
            "Event"
        );
    }

    fn handle_event_pure(&self, event: &Event) {
        let stream = serde_json::to_string(&event.stream).unwrap_or_default();
        info!(
            target: TARGET,
            session_id = %self.session(),
            label = %event.label,
            values = event.stream.len(),
            %stream,
            "Stream event"
        );
    }

    fn handle_failure(
        &self,
        label: FailureLabel,
        failure_type: FailureType,
        info: Option<&FailureInfo>,
        id: Option<&str>,
    ) {
        warn!(
            target: TARGET,
            session_id = %self.session(),
            %label,
            %failure_type,
            error = info.map(|i| i.error.as_str()).unwrap_or_default(),
            id = id.unwrap_or_default(),
            "Failure"
        );
    }

    fn handle_user_funnel(&self, label: FunnelLabel) {
        info!(target: TARGET, session_id = %self.session(), %label, "User funnel");
    }

    fn handle_click_event(&self, click_id: &str) {
        info!(target: TARGET, session_id = %self.session(), click_id, "Click");
    }

    fn handle_session_start(&self) {
        info!(target: TARGET, "Session started");
    }

    fn handle_session_end(&self, end_trigger: Option<EndTrigger>) {
        info!(
            target: TARGET,
            session_id = %self.session(),
            end_trigger = end_trigger.map(|t| t.as_str()).unwrap_or_default(),
            "Session ended"
        );
        *self.session_id.write() = None;
    }

    fn handle_trace(&self, label: TraceLabel, level: TraceLevel, message: Option<&str>) {
        if !self.forwards(level) {
            return;
        }
        let session_id = self.session();
        let message = message.unwrap_or_default();
        match level {
            TraceLevel::Error => {
                error!(target: TARGET, %session_id, %label, trace_message = message, "Trace")
            }
            TraceLevel::Warning => {
                warn!(target: TARGET, %session_id, %label, trace_message = message, "Trace")
            }
            TraceLevel::Information => {
                info!(target: TARGET, %session_id, %label, trace_message = message, "Trace")
            }
            TraceLevel::Verbose => {
                debug!(target: TARGET, %session_id, %label, trace_message = message, "Trace")
            }
            TraceLevel::None => {}
        }
    }

    fn handle_set_context(&self, key: ContextKey, value: &ContextValue) {
        debug!(target: TARGET, %key, %value, "Context property set");
    }

    fn handle_set_user_session_id(&self, current: Option<&str>) -> Option<String> {
        let id = current.map(str::to_string).unwrap_or_else(new_session_id);
        *self.session_id.write() = Some(id.clone());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliplog_core::SessionLogger;
    use cliplog_protocols::EventLabel;
    use std::sync::Arc;

    #[test]
    fn test_default_forwards_all_levels() {
        let sink = TracingSink::default();
        assert!(sink.forwards(TraceLevel::Error));
        assert!(sink.forwards(TraceLevel::Verbose));
        assert!(!sink.forwards(TraceLevel::None));
    }

    #[test]
    fn test_min_trace_level_filters_verbose() {
        let sink = TracingSink::with_min_trace_level(TraceLevel::Warning);
        assert!(sink.forwards(TraceLevel::Error));
        assert!(sink.forwards(TraceLevel::Warning));
        assert!(!sink.forwards(TraceLevel::Information));
        assert!(!sink.forwards(TraceLevel::Verbose));
    }

    #[test]
    fn test_session_id_kept_until_end() {
        let sink = TracingSink::new();
        let id = sink.handle_set_user_session_id(None).unwrap();
        assert_eq!(sink.session_id(), Some(id.clone()));

        assert_eq!(sink.handle_set_user_session_id(Some(&id)), Some(id.clone()));

        sink.handle_session_end(None);
        assert!(sink.session_id().is_none());
    }

    #[test]
    fn test_drives_logger() {
        let sink = Arc::new(TracingSink::new());
        let mut logger = SessionLogger::new(sink.clone());

        logger.log_session_start();
        logger.log_event(Event::new(EventLabel::ClipToOneNoteAction));
        logger.log_trace(TraceLabel::DebugFeedback, TraceLevel::Verbose, None);

        assert_eq!(logger.user_session_id(), sink.session_id());

        logger.log_session_end(Some(EndTrigger::Unload));
        assert!(sink.session_id().is_none());
    }
}
