//! # cliplog Tracing Sink Extension
//!
//! Forwards every session hook to the `tracing` ecosystem, so whatever
//! subscriber the host installs (console, rolling file, JSON) receives
//! the session's events, failures and traces.
//!
//! ## Levels
//!
//! - failures: `warn!`
//! - traces: mapped from [`TraceLevel`](cliplog_protocols::TraceLevel)
//! - context changes: `debug!`
//! - everything else: `info!`

pub mod sink;

pub use sink::TracingSink;
