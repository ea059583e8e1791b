//! Trace types.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Trace label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceLabel {
    DebugFeedback,
    DefaultingToConsoleLogger,
    ExceptionForClipperInstalledPageUrl,
    GeneralInfo,
    RequestForClipperInstalledPageUrl,
}

impl TraceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceLabel::DebugFeedback => "DebugFeedback",
            TraceLabel::DefaultingToConsoleLogger => "DefaultingToConsoleLogger",
            TraceLabel::ExceptionForClipperInstalledPageUrl => {
                "ExceptionForClipperInstalledPageUrl"
            }
            TraceLabel::GeneralInfo => "GeneralInfo",
            TraceLabel::RequestForClipperInstalledPageUrl => "RequestForClipperInstalledPageUrl",
        }
    }
}

impl std::fmt::Display for TraceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trace verbosity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TraceLevel {
    None,
    Error,
    Warning,
    Information,
    Verbose,
}

impl TraceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceLevel::None => "None",
            TraceLevel::Error => "Error",
            TraceLevel::Warning => "Warning",
            TraceLevel::Information => "Information",
            TraceLevel::Verbose => "Verbose",
        }
    }
}

impl std::fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TraceLevel {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(TraceLevel::None),
            "error" => Ok(TraceLevel::Error),
            "warning" | "warn" => Ok(TraceLevel::Warning),
            "information" | "info" => Ok(TraceLevel::Information),
            "verbose" => Ok(TraceLevel::Verbose),
            _ => Err(ProtocolError::UnknownTraceLevel(s.to_string())),
        }
    }
}
