//! Operation vocabulary.
//!
//! Every public logger operation has a [`LogMethod`] tag. A deferred call is
//! stored as a [`LogOperation`] carrying its original, typed arguments so it
//! can be replayed through the same public operation later.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::types::{
    ContextKey, ContextValue, EndTrigger, Event, EventLabel, FailureInfo, FailureLabel,
    FailureType, FunnelLabel, TraceLabel, TraceLevel,
};

/// The fixed set of logger operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogMethod {
    LogEvent,
    LogFailure,
    PushToStream,
    LogUserFunnel,
    LogSessionStart,
    LogSessionEnd,
    LogClickEvent,
    SetContextProperty,
    LogTrace,
}

impl LogMethod {
    pub const ALL: [LogMethod; 9] = [
        LogMethod::LogEvent,
        LogMethod::LogFailure,
        LogMethod::PushToStream,
        LogMethod::LogUserFunnel,
        LogMethod::LogSessionStart,
        LogMethod::LogSessionEnd,
        LogMethod::LogClickEvent,
        LogMethod::SetContextProperty,
        LogMethod::LogTrace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogMethod::LogEvent => "logEvent",
            LogMethod::LogFailure => "logFailure",
            LogMethod::PushToStream => "pushToStream",
            LogMethod::LogUserFunnel => "logUserFunnel",
            LogMethod::LogSessionStart => "logSessionStart",
            LogMethod::LogSessionEnd => "logSessionEnd",
            LogMethod::LogClickEvent => "logClickEvent",
            LogMethod::SetContextProperty => "setContextProperty",
            LogMethod::LogTrace => "logTrace",
        }
    }
}

impl std::fmt::Display for LogMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogMethod {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogMethod::ALL
            .iter()
            .copied()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownMethod(s.to_string()))
    }
}

/// One logger operation with its arguments.
///
/// Serialized as `{"method": "<name>", "args": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "args", rename_all = "camelCase")]
pub enum LogOperation {
    LogEvent {
        event: Event,
    },
    LogFailure {
        label: FailureLabel,
        failure_type: FailureType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        info: Option<FailureInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    PushToStream {
        label: EventLabel,
        value: Value,
    },
    LogUserFunnel {
        label: FunnelLabel,
    },
    LogSessionStart,
    LogSessionEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_trigger: Option<EndTrigger>,
    },
    LogClickEvent {
        click_id: String,
    },
    SetContextProperty {
        key: ContextKey,
        value: ContextValue,
    },
    LogTrace {
        label: TraceLabel,
        level: TraceLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl LogOperation {
    /// The method tag of this operation.
    pub fn method(&self) -> LogMethod {
        match self {
            LogOperation::LogEvent { .. } => LogMethod::LogEvent,
            LogOperation::LogFailure { .. } => LogMethod::LogFailure,
            LogOperation::PushToStream { .. } => LogMethod::PushToStream,
            LogOperation::LogUserFunnel { .. } => LogMethod::LogUserFunnel,
            LogOperation::LogSessionStart => LogMethod::LogSessionStart,
            LogOperation::LogSessionEnd { .. } => LogMethod::LogSessionEnd,
            LogOperation::LogClickEvent { .. } => LogMethod::LogClickEvent,
            LogOperation::SetContextProperty { .. } => LogMethod::SetContextProperty,
            LogOperation::LogTrace { .. } => LogMethod::LogTrace,
        }
    }

    /// Parse one operation from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
