//! The normalized state tree of one debugger session

use debugger_types::{DebuggerRunListing, LoadState, StackFramesById};
use serde::{Deserialize, Serialize};

use crate::alerts::AlertsState;
use crate::config::StoreConfig;
use crate::executions::ExecutionsState;
use crate::graph_executions::GraphExecutionsState;
use crate::graphs::GraphsState;
use crate::source_code::SourceCodeState;

/// Kind of code location whose stack trace is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodeLocationType {
    /// A top-level (eager) execution.
    Execution,
    /// The creation site of an op inside a graph.
    GraphOpCreation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebuggerState {
    pub runs: DebuggerRunListing,
    pub runs_loaded: LoadState,
    pub active_run_id: Option<String>,
    pub alerts: AlertsState,
    pub executions: ExecutionsState,
    pub graph_executions: GraphExecutionsState,
    pub graphs: GraphsState,
    /// Shared by all executions and ops; frames are never mutated once inserted.
    pub stack_frames: StackFramesById,
    pub source_code: SourceCodeState,
    pub code_location_focus_type: Option<CodeLocationType>,
    pub stick_to_bottommost_frame_in_focused_file: bool,
}

impl DebuggerState {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            runs: DebuggerRunListing::new(),
            runs_loaded: LoadState::default(),
            active_run_id: None,
            alerts: AlertsState::default(),
            executions: ExecutionsState::new(
                config.execution_page_size,
                config.execution_display_count,
            ),
            graph_executions: GraphExecutionsState::new(
                config.graph_execution_page_size,
                config.graph_execution_display_count,
            ),
            graphs: GraphsState::default(),
            stack_frames: StackFramesById::new(),
            source_code: SourceCodeState::default(),
            code_location_focus_type: None,
            stick_to_bottommost_frame_in_focused_file: config
                .stick_to_bottommost_frame_in_focused_file,
        }
    }
}

impl Default for DebuggerState {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
