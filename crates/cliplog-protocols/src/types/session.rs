//! Session lifecycle types.

use serde::{Deserialize, Serialize};

/// Logging session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionState {
    Started,
    #[default]
    Ended,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndTrigger {
    SignOut,
    Unload,
}

impl EndTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndTrigger::SignOut => "SignOut",
            EndTrigger::Unload => "Unload",
        }
    }
}

impl std::fmt::Display for EndTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
