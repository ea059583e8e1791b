//! Context properties.
//!
//! Context properties describe the environment every log record is sent in
//! (application, device, user). They accumulate over the logger's lifetime
//! and are what a [`ContextGate`](crate::ContextGate) inspects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Known context keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContextKey {
    #[serde(rename = "AppInfo.Id")]
    AppInfoId,
    #[serde(rename = "AppInfo.Version")]
    AppInfoVersion,
    #[serde(rename = "Browser.InPrivate")]
    InPrivateBrowsing,
    #[serde(rename = "Clipper.ContentType")]
    ContentType,
    #[serde(rename = "DeviceInfo.Id")]
    DeviceInfoId,
    #[serde(rename = "ExtensionLifecycle.Id")]
    ExtensionLifecycleId,
    #[serde(rename = "Flight.Info")]
    FlightInfo,
    #[serde(rename = "User.AuthType")]
    AuthType,
    #[serde(rename = "User.Id")]
    UserInfoId,
    #[serde(rename = "User.Language")]
    UserInfoLanguage,
}

impl ContextKey {
    /// All keys, in declaration order.
    pub const ALL: [ContextKey; 10] = [
        ContextKey::AppInfoId,
        ContextKey::AppInfoVersion,
        ContextKey::InPrivateBrowsing,
        ContextKey::ContentType,
        ContextKey::DeviceInfoId,
        ContextKey::ExtensionLifecycleId,
        ContextKey::FlightInfo,
        ContextKey::AuthType,
        ContextKey::UserInfoId,
        ContextKey::UserInfoLanguage,
    ];

    /// Dotted wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKey::AppInfoId => "AppInfo.Id",
            ContextKey::AppInfoVersion => "AppInfo.Version",
            ContextKey::InPrivateBrowsing => "Browser.InPrivate",
            ContextKey::ContentType => "Clipper.ContentType",
            ContextKey::DeviceInfoId => "DeviceInfo.Id",
            ContextKey::ExtensionLifecycleId => "ExtensionLifecycle.Id",
            ContextKey::FlightInfo => "Flight.Info",
            ContextKey::AuthType => "User.AuthType",
            ContextKey::UserInfoId => "User.Id",
            ContextKey::UserInfoLanguage => "User.Language",
        }
    }
}

impl std::fmt::Display for ContextKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContextKey {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContextKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownContextKey(s.to_string()))
    }
}

/// Scalar context value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl std::fmt::Display for ContextValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextValue::Bool(b) => write!(f, "{}", b),
            ContextValue::Number(n) => write!(f, "{}", n),
            ContextValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Number(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Number(value as f64)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

/// Accumulated context properties.
pub type ContextProperties = BTreeMap<ContextKey, ContextValue>;
