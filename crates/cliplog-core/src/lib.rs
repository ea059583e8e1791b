//! # cliplog Core
//!
//! The session logger: validates logging calls, defers them while the
//! context gate is closed, replays them in order once it opens, and drives
//! the session lifecycle on top of a pluggable [`SessionSink`].
//!
//! ## Components
//!
//! - [`SessionLogger`] - the logging facade
//! - [`PendingQueue`] - deferred operations and their one-shot flush
//! - [`StreamMap`] - per-label value buffers flushed at session end
//! - [`SessionIdCell`] - the observable session id
//! - [`RequiredContextGate`] - gate that opens once required keys are set
//! - [`FanoutSink`], [`RecordingSink`] - sink combinators
//!
//! [`SessionSink`]: cliplog_protocols::SessionSink

pub mod fanout;
pub mod funnel;
pub mod gate;
pub mod logger;
pub mod queue;
pub mod recording;
pub mod session_id;
pub mod stream;

pub use fanout::FanoutSink;
pub use funnel::{InteractionTracker, NON_INTERACTION_IDS};
pub use gate::RequiredContextGate;
pub use logger::{SessionLogger, SessionLoggerOptions};
pub use queue::{FlushState, PendingQueue};
pub use recording::{RecordingSink, SinkRecord};
pub use session_id::{SessionIdCell, SessionIdHandle};
pub use stream::{StreamMap, is_truthy};
