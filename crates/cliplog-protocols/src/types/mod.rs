//! Log vocabulary shared by the logger, its sinks and its gates.

mod context;
mod event;
mod failure;
mod funnel;
mod session;
mod trace;

pub use context::*;
pub use event::*;
pub use failure::*;
pub use funnel::*;
pub use session::*;
pub use trace::*;
