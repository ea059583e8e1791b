//! Session sink protocol.
//!
//! A sink is the backend half of the logger: the core validates, gates and
//! orders operations, then hands each one to a sink hook that performs the
//! actual transmission. Hooks are synchronous from the logger's point of
//! view; a sink that talks to a network should hand the work off rather
//! than block.

use crate::types::{
    ContextKey, ContextValue, EndTrigger, Event, FailureInfo, FailureLabel, FailureType,
    FunnelLabel, TraceLabel, TraceLevel,
};

/// Backend hooks invoked by the session logger.
pub trait SessionSink: Send + Sync {
    /// Sink name, used in diagnostics.
    fn name(&self) -> &str;

    /// Handle a single event that passed the gate.
    fn handle_event(&self, event: &Event);

    /// Handle a pre-built event without further processing.
    ///
    /// The logger uses this for aggregated stream events at session end.
    fn handle_event_pure(&self, event: &Event);

    fn handle_failure(
        &self,
        label: FailureLabel,
        failure_type: FailureType,
        info: Option<&FailureInfo>,
        id: Option<&str>,
    );

    fn handle_user_funnel(&self, label: FunnelLabel);

    fn handle_click_event(&self, click_id: &str);

    fn handle_session_start(&self);

    fn handle_session_end(&self, end_trigger: Option<EndTrigger>);

    fn handle_trace(&self, label: TraceLabel, level: TraceLevel, message: Option<&str>);

    fn handle_set_context(&self, key: ContextKey, value: &ContextValue);

    /// Choose the session id revealed to callers while a session is started.
    ///
    /// Receives the id currently held by the logger, if any. The default keeps
    /// it, or mints a random one.
    fn handle_set_user_session_id(&self, current: Option<&str>) -> Option<String> {
        Some(
            current
                .map(str::to_string)
                .unwrap_or_else(new_session_id),
        )
    }
}

/// Generate a fresh session id.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
