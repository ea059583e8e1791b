//! Funnel markers.

use serde::{Deserialize, Serialize};

/// Funnel step reached by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunnelLabel {
    Invoke,
    AuthAlreadySignedIn,
    AuthAttempted,
    AuthSignInCompleted,
    AuthSignInFailed,
    ClipAttempted,
    Interact,
    SignOut,
    ViewInWac,
}

impl FunnelLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunnelLabel::Invoke => "Invoke",
            FunnelLabel::AuthAlreadySignedIn => "AuthAlreadySignedIn",
            FunnelLabel::AuthAttempted => "AuthAttempted",
            FunnelLabel::AuthSignInCompleted => "AuthSignInCompleted",
            FunnelLabel::AuthSignInFailed => "AuthSignInFailed",
            FunnelLabel::ClipAttempted => "ClipAttempted",
            FunnelLabel::Interact => "Interact",
            FunnelLabel::SignOut => "SignOut",
            FunnelLabel::ViewInWac => "ViewInWac",
        }
    }
}

impl std::fmt::Display for FunnelLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
