//! Event types.
//!
//! Three kinds of event share one struct:
//!
//! - **Base** events are logged as-is.
//! - **Promise** events time an asynchronous operation; call [`Event::stop`]
//!   when it settles to record the duration.
//! - **Stream** events aggregate the values pushed to a stream during a
//!   session and are built by the logger when the session ends.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::failure::FailureInfo;

/// Event label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventLabel {
    AddEmbeddedVideo,
    AugmentationApiCall,
    Click,
    ClipToOneNoteAction,
    CloseClipper,
    FullPageScreenshotCall,
    GetNotebooks,
    HandleSignInEvent,
    InvokeClipper,
    InvokeWhatsNew,
    RegionSelectionCapturing,
    SetContextProperty,
    UserInfoUpdated,
}

impl EventLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLabel::AddEmbeddedVideo => "AddEmbeddedVideo",
            EventLabel::AugmentationApiCall => "AugmentationApiCall",
            EventLabel::Click => "Click",
            EventLabel::ClipToOneNoteAction => "ClipToOneNoteAction",
            EventLabel::CloseClipper => "CloseClipper",
            EventLabel::FullPageScreenshotCall => "FullPageScreenshotCall",
            EventLabel::GetNotebooks => "GetNotebooks",
            EventLabel::HandleSignInEvent => "HandleSignInEvent",
            EventLabel::InvokeClipper => "InvokeClipper",
            EventLabel::InvokeWhatsNew => "InvokeWhatsNew",
            EventLabel::RegionSelectionCapturing => "RegionSelectionCapturing",
            EventLabel::SetContextProperty => "SetContextProperty",
            EventLabel::UserInfoUpdated => "UserInfoUpdated",
        }
    }
}

impl std::fmt::Display for EventLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Custom property names attached to events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyName {
    AugmentationModel,
    CorrelationId,
    RequestCorrelationId,
    Url,
    VideoDataOriginalSrcUrl,
    VideoSrcUrl,
}

impl PropertyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyName::AugmentationModel => "AugmentationModel",
            PropertyName::CorrelationId => "CorrelationId",
            PropertyName::RequestCorrelationId => "RequestCorrelationId",
            PropertyName::Url => "Url",
            PropertyName::VideoDataOriginalSrcUrl => "VideoDataOriginalSrcUrl",
            PropertyName::VideoSrcUrl => "VideoSrcUrl",
        }
    }
}

/// Kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    #[default]
    Base,
    Promise,
    Stream,
}

/// Outcome recorded on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Succeeded,
    Failed,
}

/// A loggable event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub label: EventLabel,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default = "Utc::now")]
    pub start_time: DateTime<Utc>,
    /// Milliseconds between creation and [`Event::stop`] (promise events only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<PropertyName, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_info: Option<FailureInfo>,
    /// Values aggregated into a stream event, in append order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stream: Vec<Value>,
}

impl Event {
    /// Create a base event.
    pub fn new(label: EventLabel) -> Self {
        Self::with_category(label, EventCategory::Base)
    }

    /// Create a promise event. Its timer starts now.
    pub fn promise(label: EventLabel) -> Self {
        Self::with_category(label, EventCategory::Promise)
    }

    /// Create an empty stream event.
    pub fn stream(label: EventLabel) -> Self {
        Self::with_category(label, EventCategory::Stream)
    }

    fn with_category(label: EventLabel, category: EventCategory) -> Self {
        Self {
            label,
            category,
            status: EventStatus::Succeeded,
            start_time: Utc::now(),
            duration_ms: None,
            properties: BTreeMap::new(),
            failure_info: None,
            stream: Vec::new(),
        }
    }

    /// Set a custom property, replacing any previous value.
    pub fn set_property(&mut self, name: PropertyName, value: impl Into<Value>) {
        self.properties.insert(name, value.into());
    }

    /// Builder form of [`Event::set_property`].
    pub fn with_property(mut self, name: PropertyName, value: impl Into<Value>) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn property(&self, name: PropertyName) -> Option<&Value> {
        self.properties.get(&name)
    }

    pub fn set_status(&mut self, status: EventStatus) {
        self.status = status;
    }

    /// Mark the event failed and attach the failure info.
    pub fn set_failure_info(&mut self, info: FailureInfo) {
        self.status = EventStatus::Failed;
        self.failure_info = Some(info);
    }

    /// Stop the timer of a promise event. Calling it again keeps the first duration.
    pub fn stop(&mut self) {
        if self.category == EventCategory::Promise && self.duration_ms.is_none() {
            let elapsed = Utc::now() - self.start_time;
            self.duration_ms = Some(elapsed.num_milliseconds());
        }
    }

    /// Append a value to a stream event.
    pub fn append(&mut self, value: Value) {
        self.stream.push(value);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
