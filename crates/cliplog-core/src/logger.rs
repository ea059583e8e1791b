//! Session logger.
//!
//! Every gated operation follows the same path: validate the arguments,
//! ask the context gate, then either hand the call to the sink or defer it.
//! Deferred calls are replayed in their original order, through the same
//! public operations, the first time `set_context_property` finds the gate
//! open.
//!
//! No operation returns an error. Contract violations (an empty click id,
//! starting a started session, ending an ended one) are reported through
//! the failure channel and the call returns normally.

use std::sync::Arc;

use cliplog_protocols::{
    ContextGate, ContextKey, ContextProperties, ContextValue, EndTrigger, Event, EventLabel,
    FailureInfo, FailureLabel, FailureType, FunnelLabel, LogOperation, SessionSink,
    SessionState, TraceLabel, TraceLevel,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::funnel::InteractionTracker;
use crate::queue::{FlushState, PendingQueue};
use crate::session_id::{SessionIdCell, SessionIdHandle};
use crate::stream::StreamMap;

/// Options for constructing a [`SessionLogger`].
#[derive(Default)]
pub struct SessionLoggerOptions {
    /// Gate consulted before every gated operation. `None` means always open.
    pub context_gate: Option<Arc<dyn ContextGate>>,
    /// Session id cell to write into. A fresh one is created when `None`.
    pub session_id: Option<SessionIdCell>,
    /// Click ids that do not count as a user interaction, on top of the built-in ones.
    pub extra_non_interaction_ids: Vec<String>,
}

impl SessionLoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context_gate(mut self, gate: Arc<dyn ContextGate>) -> Self {
        self.context_gate = Some(gate);
        self
    }

    pub fn with_session_id(mut self, session_id: SessionIdCell) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_non_interaction_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_non_interaction_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }
}

/// Logging facade with context gating, deferred dispatch and session lifecycle.
pub struct SessionLogger {
    sink: Arc<dyn SessionSink>,
    context_gate: Option<Arc<dyn ContextGate>>,
    context_properties: ContextProperties,
    state: SessionState,
    queue: PendingQueue,
    streams: StreamMap,
    interaction: InteractionTracker,
    session_id: SessionIdCell,
}

impl SessionLogger {
    /// Create an ungated logger.
    pub fn new(sink: Arc<dyn SessionSink>) -> Self {
        Self::with_options(sink, SessionLoggerOptions::default())
    }

    pub fn with_options(sink: Arc<dyn SessionSink>, options: SessionLoggerOptions) -> Self {
        Self {
            sink,
            context_gate: options.context_gate,
            context_properties: ContextProperties::new(),
            state: SessionState::Ended,
            queue: PendingQueue::new(),
            streams: StreamMap::new(),
            interaction: InteractionTracker::with_extra_exemptions(
                options.extra_non_interaction_ids,
            ),
            session_id: options.session_id.unwrap_or_default(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn has_user_interacted(&self) -> bool {
        self.interaction.has_interacted()
    }

    /// Session id revealed for the current session, if one is started.
    pub fn user_session_id(&self) -> Option<String> {
        self.session_id.get()
    }

    /// Read-only handle on the session id for other consumers.
    pub fn session_id_handle(&self) -> SessionIdHandle {
        self.session_id.handle()
    }

    pub fn session_state(&self) -> SessionState {
        self.state
    }

    pub fn context_properties(&self) -> &ContextProperties {
        &self.context_properties
    }

    /// Operations currently deferred behind the context gate.
    pub fn pending_operations(&self) -> &[LogOperation] {
        self.queue.operations()
    }

    pub fn flush_state(&self) -> FlushState {
        self.queue.state()
    }

    pub fn streams(&self) -> &StreamMap {
        &self.streams
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Log the first qualifying click of the session as a funnel interaction.
    pub fn send_funnel_interaction_event(&mut self, click_id: &str) {
        if !self.interaction.record(click_id) {
            return;
        }
        self.log_user_funnel(FunnelLabel::Interact);
    }

    pub fn log_event(&mut self, event: Event) {
        if !self.context_requirements_met() {
            self.defer(LogOperation::LogEvent { event });
            return;
        }

        self.sink.handle_event(&event);
    }

    pub fn log_failure(
        &mut self,
        label: FailureLabel,
        failure_type: FailureType,
        info: Option<FailureInfo>,
        id: Option<String>,
    ) {
        if !self.context_requirements_met() {
            self.defer(LogOperation::LogFailure {
                label,
                failure_type,
                info,
                id,
            });
            return;
        }

        self.sink
            .handle_failure(label, failure_type, info.as_ref(), id.as_deref());
    }

    pub fn log_user_funnel(&mut self, label: FunnelLabel) {
        if !self.context_requirements_met() {
            self.defer(LogOperation::LogUserFunnel { label });
            return;
        }

        self.sink.handle_user_funnel(label);
    }

    pub fn log_session_start(&mut self) {
        if !self.context_requirements_met() {
            self.defer(LogOperation::LogSessionStart);
            return;
        }

        self.execute_session_start();
        self.reveal_session_id();
    }

    pub fn log_session_end(&mut self, end_trigger: Option<EndTrigger>) {
        if !self.context_requirements_met() {
            self.defer(LogOperation::LogSessionEnd { end_trigger });
            return;
        }

        self.execute_session_end(end_trigger);
        self.reveal_session_id();
    }

    pub fn log_trace(&mut self, label: TraceLabel, level: TraceLevel, message: Option<String>) {
        if !self.context_requirements_met() {
            self.defer(LogOperation::LogTrace {
                label,
                level,
                message,
            });
            return;
        }

        self.sink.handle_trace(label, level, message.as_deref());
    }

    /// Buffer a value for the stream event emitted at session end.
    ///
    /// Not gated: this only touches local state. Falsy values are ignored.
    pub fn push_to_stream(&mut self, label: EventLabel, value: impl Into<Value>) {
        self.streams.push(label, value.into());
    }

    pub fn log_click_event(&mut self, click_id: impl Into<String>) {
        let click_id = click_id.into();
        if !self.context_requirements_met() {
            self.defer(LogOperation::LogClickEvent { click_id });
            return;
        }

        self.send_funnel_interaction_event(&click_id);
        self.execute_click_event(&click_id);
    }

    /// Record a context property, notify the sink, and flush deferred
    /// operations if the gate is now open.
    pub fn set_context_property(&mut self, key: ContextKey, value: impl Into<ContextValue>) {
        let value = value.into();
        self.context_properties.insert(key, value.clone());
        self.sink.handle_set_context(key, &value);

        if self.context_requirements_met() {
            self.flush_event_queue();
        }
    }

    /// Report a payload that could not be parsed as JSON.
    pub fn log_json_parse_unexpected(&mut self, raw: &str) {
        self.log_failure(
            FailureLabel::JsonParse,
            FailureType::Unexpected,
            Some(FailureInfo::new(format!("Unable to parse JSON: {}", raw))),
            None,
        );
    }

    /// Dispatch an operation through the public method it names.
    pub fn apply(&mut self, operation: LogOperation) {
        match operation {
            LogOperation::LogEvent { event } => self.log_event(event),
            LogOperation::LogFailure {
                label,
                failure_type,
                info,
                id,
            } => self.log_failure(label, failure_type, info, id),
            LogOperation::PushToStream { label, value } => self.push_to_stream(label, value),
            LogOperation::LogUserFunnel { label } => self.log_user_funnel(label),
            LogOperation::LogSessionStart => self.log_session_start(),
            LogOperation::LogSessionEnd { end_trigger } => self.log_session_end(end_trigger),
            LogOperation::LogClickEvent { click_id } => self.log_click_event(click_id),
            LogOperation::SetContextProperty { key, value } => {
                self.set_context_property(key, value)
            }
            LogOperation::LogTrace {
                label,
                level,
                message,
            } => self.log_trace(label, level, message),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn execute_session_start(&mut self) {
        if self.state == SessionState::Started {
            warn!("Session start requested while a session is already started");
            self.log_failure(
                FailureLabel::SessionAlreadySet,
                FailureType::Unexpected,
                Some(FailureInfo::new("Session already STARTED")),
                None,
            );
            return;
        }

        self.streams.clear();
        self.state = SessionState::Started;
        info!("Logging session started");

        self.sink.handle_session_start();
    }

    fn execute_session_end(&mut self, end_trigger: Option<EndTrigger>) {
        if self.state == SessionState::Ended {
            let mut message = "Session already ENDED".to_string();
            if let Some(trigger) = end_trigger {
                message.push_str(&format!(". EndTrigger: {}", trigger));
            }
            warn!("{}", message);
            self.log_failure(
                FailureLabel::SessionAlreadySet,
                FailureType::Unexpected,
                Some(FailureInfo::new(message)),
                None,
            );
            return;
        }

        self.log_all_streams();
        self.session_id.set(None);
        self.interaction.reset();
        self.state = SessionState::Ended;
        info!(end_trigger = ?end_trigger, "Logging session ended");

        self.sink.handle_session_end(end_trigger);
    }

    fn execute_click_event(&mut self, click_id: &str) {
        if click_id.is_empty() {
            warn!("Click event logged without a click id");
            self.log_failure(
                FailureLabel::InvalidArgument,
                FailureType::Unexpected,
                Some(FailureInfo::new(format!(
                    "Button clicked without an ID! Logged with ID {}",
                    Value::from(click_id)
                ))),
                None,
            );
            return;
        }

        self.push_to_stream(EventLabel::Click, click_id);
        self.sink.handle_click_event(click_id);
    }

    /// Expose the session id for the current state: the sink's choice while
    /// started, nothing once ended.
    fn reveal_session_id(&mut self) {
        match self.state {
            SessionState::Started => {
                let current = self.session_id.get();
                let revealed = self.sink.handle_set_user_session_id(current.as_deref());
                self.session_id.set(revealed);
            }
            SessionState::Ended => self.session_id.set(None),
        }
    }

    fn log_all_streams(&mut self) {
        for event in self.streams.drain_events() {
            self.sink.handle_event_pure(&event);
        }
    }

    fn context_requirements_met(&self) -> bool {
        match &self.context_gate {
            Some(gate) => gate.requirements_are_met(&self.context_properties),
            None => true,
        }
    }

    fn defer(&mut self, operation: LogOperation) {
        debug!(
            method = %operation.method(),
            pending = self.queue.len() + 1,
            "Context requirements not met, deferring operation"
        );
        self.queue.push(operation);
    }

    fn flush_event_queue(&mut self) {
        let Some(operations) = self.queue.begin_flush() else {
            return;
        };

        debug!("Flushing {} deferred operations", operations.len());
        for operation in operations {
            self.apply(operation);
        }

        self.queue.finish_flush();
    }
}

impl std::fmt::Debug for SessionLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLogger")
            .field("sink", &self.sink.name())
            .field("state", &self.state)
            .field("pending", &self.queue.len())
            .field("flush_state", &self.queue.state())
            .field("session_id", &self.session_id.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
