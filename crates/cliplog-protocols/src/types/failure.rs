//! Failure channel types.

use serde::{Deserialize, Serialize};

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureLabel {
    GetChangeLog,
    InvalidArgument,
    JsonParse,
    NotImplemented,
    RegionSelectionProcessing,
    SessionAlreadySet,
    UnhandledApiCode,
    UnhandledExceptionThrown,
}

impl FailureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureLabel::GetChangeLog => "GetChangeLog",
            FailureLabel::InvalidArgument => "InvalidArgument",
            FailureLabel::JsonParse => "JsonParse",
            FailureLabel::NotImplemented => "NotImplemented",
            FailureLabel::RegionSelectionProcessing => "RegionSelectionProcessing",
            FailureLabel::SessionAlreadySet => "SessionAlreadySet",
            FailureLabel::UnhandledApiCode => "UnhandledApiCode",
            FailureLabel::UnhandledExceptionThrown => "UnhandledExceptionThrown",
        }
    }
}

impl std::fmt::Display for FailureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureType {
    Unexpected,
    Expected,
}

impl std::fmt::Display for FailureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureType::Unexpected => write!(f, "Unexpected"),
            FailureType::Expected => write!(f, "Expected"),
        }
    }
}

/// Free-form failure details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    pub error: String,
}

impl FailureInfo {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl From<&str> for FailureInfo {
    fn from(error: &str) -> Self {
        Self::new(error)
    }
}

impl From<String> for FailureInfo {
    fn from(error: String) -> Self {
        Self::new(error)
    }
}
