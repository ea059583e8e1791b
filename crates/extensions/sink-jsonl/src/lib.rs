//! # cliplog JSON Lines Sink Extension
//!
//! Writes one JSON object per session hook to any [`std::io::Write`]
//! destination. Each line carries `kind`, `timestamp` and `session_id`
//! followed by the hook's own fields.

pub mod error;
pub mod sink;

pub use error::SinkError;
pub use sink::JsonLinesSink;
