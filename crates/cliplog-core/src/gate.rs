//! Required-keys context gate.

use std::collections::BTreeSet;

use cliplog_protocols::{ContextGate, ContextKey, ContextProperties};

/// Gate that opens once every required context key has a value.
///
/// An empty requirement set is always open.
#[derive(Debug, Clone, Default)]
pub struct RequiredContextGate {
    required: BTreeSet<ContextKey>,
}

impl RequiredContextGate {
    pub fn new<I>(required: I) -> Self
    where
        I: IntoIterator<Item = ContextKey>,
    {
        Self {
            required: required.into_iter().collect(),
        }
    }

    pub fn required(&self) -> impl Iterator<Item = &ContextKey> {
        self.required.iter()
    }

    /// Required keys that have no value yet.
    pub fn missing(&self, properties: &ContextProperties) -> Vec<ContextKey> {
        self.required
            .iter()
            .filter(|key| !properties.contains_key(*key))
            .copied()
            .collect()
    }
}

impl ContextGate for RequiredContextGate {
    fn requirements_are_met(&self, properties: &ContextProperties) -> bool {
        self.required.iter().all(|key| properties.contains_key(key))
    }
}
