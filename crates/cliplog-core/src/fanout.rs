//! Fan-out sink for dispatching hooks to several sinks.

use std::sync::Arc;

use cliplog_protocols::{
    ContextKey, ContextValue, EndTrigger, Event, FailureInfo, FailureLabel, FailureType,
    FunnelLabel, SessionSink, TraceLabel, TraceLevel,
};
use tracing::debug;

/// Sink that forwards every hook to each registered sink in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn SessionSink>>,
}

impl FanoutSink {
    /// Create an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink.
    pub fn add_sink(&mut self, sink: Arc<dyn SessionSink>) {
        debug!("Adding session sink: {}", sink.name());
        self.sinks.push(sink);
    }

    /// Builder form of [`FanoutSink::add_sink`].
    pub fn with_sink(mut self, sink: Arc<dyn SessionSink>) -> Self {
        self.add_sink(sink);
        self
    }

    /// Get list of sink names.
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl SessionSink for FanoutSink {
    fn name(&self) -> &str {
        "fanout"
    }

    fn handle_event(&self, event: &Event) {
        for sink in &self.sinks {
            sink.handle_event(event);
        }
    }

    fn handle_event_pure(&self, event: &Event) {
        for sink in &self.sinks {
            sink.handle_event_pure(event);
        }
    }

    fn handle_failure(
        &self,
        label: FailureLabel,
        failure_type: FailureType,
        info: Option<&FailureInfo>,
        id: Option<&str>,
    ) {
        for sink in &self.sinks {
            sink.handle_failure(label, failure_type, info, id);
        }
    }

    fn handle_user_funnel(&self, label: FunnelLabel) {
        for sink in &self.sinks {
            sink.handle_user_funnel(label);
        }
    }

    fn handle_click_event(&self, click_id: &str) {
        for sink in &self.sinks {
            sink.handle_click_event(click_id);
        }
    }

    fn handle_session_start(&self) {
        for sink in &self.sinks {
            sink.handle_session_start();
        }
    }

    fn handle_session_end(&self, end_trigger: Option<EndTrigger>) {
        for sink in &self.sinks {
            sink.handle_session_end(end_trigger);
        }
    }

    fn handle_trace(&self, label: TraceLabel, level: TraceLevel, message: Option<&str>) {
        for sink in &self.sinks {
            sink.handle_trace(label, level, message);
        }
    }

    fn handle_set_context(&self, key: ContextKey, value: &ContextValue) {
        for sink in &self.sinks {
            sink.handle_set_context(key, value);
        }
    }

    /// The first sink picks the id; the others are told about it.
    fn handle_set_user_session_id(&self, current: Option<&str>) -> Option<String> {
        let mut chosen: Option<String> = None;
        for sink in &self.sinks {
            let offered = chosen.as_deref().or(current);
            let revealed = sink.handle_set_user_session_id(offered);
            if chosen.is_none() {
                chosen = revealed;
            }
        }
        chosen.or_else(|| current.map(str::to_string))
    }
}
