//! Context gate protocol.
//!
//! A gate decides whether logging may proceed with the context gathered so
//! far (for example, before consent or app configuration is known). While
//! the gate is closed the logger defers operations instead of dropping them.

use crate::types::ContextProperties;

/// Readiness policy over accumulated context properties.
pub trait ContextGate: Send + Sync {
    /// Whether logging may proceed. Must be pure: no side effects.
    fn requirements_are_met(&self, properties: &ContextProperties) -> bool;
}

impl<F> ContextGate for F
where
    F: Fn(&ContextProperties) -> bool + Send + Sync,
{
    fn requirements_are_met(&self, properties: &ContextProperties) -> bool {
        self(properties)
    }
}
