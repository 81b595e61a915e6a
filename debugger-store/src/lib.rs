//! Debugger Store - normalized state of the tensor debugger panel
//!
//! This crate holds the paginated timelines, alerts, graph structure and
//! source/stack-trace state of one debugger session, the reducer that applies
//! inbound actions to it, and the selectors the presentation layer reads.

pub mod actions;
pub mod alerts;
pub mod config;
pub mod error;
pub mod executions;
pub mod graph_executions;
pub mod graphs;
pub mod paginated;
pub mod reducer;
pub mod selectors;
pub mod source_code;
pub mod state;
pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use actions::Action;
pub use config::StoreConfig;
pub use error::StoreError;
pub use reducer::{reduce, reduce_at};
pub use state::{CodeLocationType, DebuggerState};
pub use store::Store;
