//! # cliplog Protocols
//!
//! Log vocabulary and interface definitions for the cliplog session logger.
//! Contains only types and traits - the logger itself lives in `cliplog-core`.
//!
//! ## Core Traits
//!
//! - [`SessionSink`] - Backend hooks that transmit events, failures and session boundaries
//! - [`ContextGate`] - Readiness policy over the accumulated context properties
//!
//! ## Operation Vocabulary
//!
//! - [`LogMethod`] - The fixed set of logger operations
//! - [`LogOperation`] - One operation together with its typed arguments

pub mod error;
pub mod gate;
pub mod operation;
pub mod sink;
pub mod types;

pub use error::ProtocolError;
pub use gate::ContextGate;
pub use operation::{LogMethod, LogOperation};
pub use sink::SessionSink;
pub use types::*;
