//! Read-only projections of [`DebuggerState`](crate::DebuggerState)
//!
//! Every selector is a plain function of the whole state. The only derived
//! command, [`derive_auto_focus_action`], returns the follow-up action instead
//! of dispatching it; [`Store`](crate::Store) feeds it back.

mod alerts;
mod executions;
mod graph_executions;
mod graphs;
mod runs;
mod source_code;
mod stack_trace;

pub use alerts::*;
pub use executions::*;
pub use graph_executions::*;
pub use graphs::*;
pub use runs::*;
pub use source_code::*;
pub use stack_trace::*;
