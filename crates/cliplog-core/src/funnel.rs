//! Funnel interaction policy.
//!
//! Only the first qualifying click of a session counts as the user
//! interacting with the clipper. Clicks tied to another intention (signing
//! in or out, closing, clipping, launching) never count.

use std::collections::HashSet;

/// Click ids that never count as an interaction.
pub const NON_INTERACTION_IDS: [&str; 8] = [
    "signInButtonMsa",
    "signInButtonOrgId",
    "signOutButton",
    "closeButton",
    "clipButton",
    "launchOneNoteButton",
    "checkOutWhatsNewButton",
    "proceedToWebClipperButton",
];

/// Tracks whether the user has interacted during the current session.
#[derive(Debug, Clone)]
pub struct InteractionTracker {
    interacted: bool,
    exempt: HashSet<String>,
}

impl InteractionTracker {
    /// Tracker with the built-in exemptions.
    pub fn new() -> Self {
        Self {
            interacted: false,
            exempt: NON_INTERACTION_IDS.iter().map(|id| id.to_string()).collect(),
        }
    }

    /// Tracker with additional exempt click ids.
    pub fn with_extra_exemptions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracker = Self::new();
        tracker.exempt.extend(ids.into_iter().map(Into::into));
        tracker
    }

    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    pub fn is_exempt(&self, click_id: &str) -> bool {
        self.exempt.contains(click_id)
    }

    /// Record a click. Returns true only for the first qualifying click.
    pub fn record(&mut self, click_id: &str) -> bool {
        if self.interacted || self.is_exempt(click_id) {
            return false;
        }
        self.interacted = true;
        true
    }

    pub fn reset(&mut self) {
        self.interacted = false;
    }
}

impl Default for InteractionTracker {
    fn default() -> Self {
        Self::new()
    }
}
