//! Inbound action vocabulary
//!
//! Actions come from two places: the data source (request lifecycle and
//! loaded responses) and the presentation layer (scrolls, clicks). In an
//! action log each action is one JSON object tagged by `type`.

use debugger_types::{
    Alert, AlertType, AlertsBreakdown, DebuggerRunListing, ExecutionDataResponse,
    ExecutionDigestsResponse, GraphExecutionDataResponse, GraphExecutionDigestsResponse,
    GraphOpInfoResponse, SourceFileResponse, SourceFileSpec, SourceLineSpec, StackFramesById,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // Runs
    RunsRequested,
    RunsRequestFailed,
    RunsLoaded {
        runs: DebuggerRunListing,
    },

    // Alerts
    NumAlertsAndBreakdownRequested,
    NumAlertsAndBreakdownRequestFailed,
    NumAlertsAndBreakdownLoaded {
        num_alerts: u64,
        alerts_breakdown: AlertsBreakdown,
    },
    AlertsOfTypeLoaded {
        alert_type: AlertType,
        begin: usize,
        end: usize,
        alerts: Vec<Alert>,
        num_alerts: u64,
        alerts_breakdown: AlertsBreakdown,
    },
    AlertTypeFocusToggled {
        alert_type: AlertType,
    },

    // Top-level executions
    NumExecutionsRequested,
    NumExecutionsLoaded {
        num_executions: usize,
    },
    ExecutionDigestsRequested,
    ExecutionDigestsLoaded(ExecutionDigestsResponse),
    ExecutionScrollLeft,
    ExecutionScrollRight,
    ExecutionScrollToIndex {
        index: f64,
    },
    ExecutionDigestFocused {
        display_index: usize,
    },
    ExecutionDataLoaded(ExecutionDataResponse),

    // Intra-graph executions
    NumGraphExecutionsRequested,
    NumGraphExecutionsLoaded {
        num_graph_executions: usize,
    },
    GraphExecutionDigestsRequested,
    GraphExecutionDigestsLoaded(GraphExecutionDigestsResponse),
    GraphExecutionDataRequested {
        page_index: usize,
    },
    GraphExecutionDataLoaded(GraphExecutionDataResponse),
    GraphExecutionScrollToIndex {
        index: f64,
    },
    GraphExecutionFocused {
        index: usize,
    },

    // Graph structure
    GraphOpInfoRequested {
        graph_id: String,
        op_name: String,
    },
    GraphOpInfoLoaded {
        graph_op_info_response: GraphOpInfoResponse,
    },
    GraphOpFocused {
        graph_id: String,
        op_name: String,
    },

    // Source files and stack traces
    SourceFileListRequested,
    SourceFileListRequestFailed,
    SourceFileListLoaded {
        source_files: Vec<SourceFileSpec>,
    },
    SourceFileRequested(SourceFileSpec),
    SourceFileLoaded(SourceFileResponse),
    SourceLineFocused {
        source_line_spec: SourceLineSpec,
    },
    StackFramesLoaded {
        stack_frames: StackFramesById,
    },
    SetStickToBottommostFrameInFocusedFile {
        value: bool,
    },
}

impl Action {
    /// Stable name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::RunsRequested => "runs_requested",
            Action::RunsRequestFailed => "runs_request_failed",
            Action::RunsLoaded { .. } => "runs_loaded",
            Action::NumAlertsAndBreakdownRequested => "num_alerts_and_breakdown_requested",
            Action::NumAlertsAndBreakdownRequestFailed => "num_alerts_and_breakdown_request_failed",
            Action::NumAlertsAndBreakdownLoaded { .. } => "num_alerts_and_breakdown_loaded",
            Action::AlertsOfTypeLoaded { .. } => "alerts_of_type_loaded",
            Action::AlertTypeFocusToggled { .. } => "alert_type_focus_toggled",
            Action::NumExecutionsRequested => "num_executions_requested",
            Action::NumExecutionsLoaded { .. } => "num_executions_loaded",
            Action::ExecutionDigestsRequested => "execution_digests_requested",
            Action::ExecutionDigestsLoaded(_) => "execution_digests_loaded",
            Action::ExecutionScrollLeft => "execution_scroll_left",
            Action::ExecutionScrollRight => "execution_scroll_right",
            Action::ExecutionScrollToIndex { .. } => "execution_scroll_to_index",
            Action::ExecutionDigestFocused { .. } => "execution_digest_focused",
            Action::ExecutionDataLoaded(_) => "execution_data_loaded",
            Action::NumGraphExecutionsRequested => "num_graph_executions_requested",
            Action::NumGraphExecutionsLoaded { .. } => "num_graph_executions_loaded",
            Action::GraphExecutionDigestsRequested => "graph_execution_digests_requested",
            Action::GraphExecutionDigestsLoaded(_) => "graph_execution_digests_loaded",
            Action::GraphExecutionDataRequested { .. } => "graph_execution_data_requested",
            Action::GraphExecutionDataLoaded(_) => "graph_execution_data_loaded",
            Action::GraphExecutionScrollToIndex { .. } => "graph_execution_scroll_to_index",
            Action::GraphExecutionFocused { .. } => "graph_execution_focused",
            Action::GraphOpInfoRequested { .. } => "graph_op_info_requested",
            Action::GraphOpInfoLoaded { .. } => "graph_op_info_loaded",
            Action::GraphOpFocused { .. } => "graph_op_focused",
            Action::SourceFileListRequested => "source_file_list_requested",
            Action::SourceFileListRequestFailed => "source_file_list_request_failed",
            Action::SourceFileListLoaded { .. } => "source_file_list_loaded",
            Action::SourceFileRequested(_) => "source_file_requested",
            Action::SourceFileLoaded(_) => "source_file_loaded",
            Action::SourceLineFocused { .. } => "source_line_focused",
            Action::StackFramesLoaded { .. } => "stack_frames_loaded",
            Action::SetStickToBottommostFrameInFocusedFile { .. } => {
                "set_stick_to_bottommost_frame_in_focused_file"
            }
        }
    }

    /// Responses and timeline moves that only make sense while a run is active.
    pub fn requires_active_run(&self) -> bool {
        matches!(
            self,
            Action::NumAlertsAndBreakdownRequested
                | Action::NumAlertsAndBreakdownRequestFailed
                | Action::NumAlertsAndBreakdownLoaded { .. }
                | Action::AlertsOfTypeLoaded { .. }
                | Action::NumExecutionsRequested
                | Action::NumExecutionsLoaded { .. }
                | Action::ExecutionDigestsRequested
                | Action::ExecutionDigestsLoaded(_)
                | Action::ExecutionScrollLeft
                | Action::ExecutionScrollRight
                | Action::ExecutionDataLoaded(_)
                | Action::NumGraphExecutionsRequested
                | Action::NumGraphExecutionsLoaded { .. }
                | Action::GraphExecutionDigestsRequested
                | Action::GraphExecutionDigestsLoaded(_)
                | Action::GraphExecutionDataRequested { .. }
                | Action::GraphExecutionDataLoaded(_)
                | Action::StackFramesLoaded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_log_format() {
        let action: Action =
            serde_json::from_str(r#"{"type": "execution_scroll_to_index", "index": 12}"#).unwrap();
        assert_eq!(action, Action::ExecutionScrollToIndex { index: 12.0 });

        let json = serde_json::to_string(&Action::ExecutionScrollLeft).unwrap();
        assert_eq!(json, r#"{"type":"execution_scroll_left"}"#);
    }

    #[test]
    fn test_response_actions_inline_the_payload() {
        let action: Action = serde_json::from_str(
            r#"{"type": "execution_digests_loaded", "begin": 0, "end": 1, "num_digests": 3,
                "execution_digests": [{"op_type": "MatMul", "output_tensor_device_ids": ["d0"]}]}"#,
        )
        .unwrap();
        let Action::ExecutionDigestsLoaded(response) = action else {
            panic!("unexpected action: {action:?}");
        };
        assert_eq!(response.num_digests, 3);
        assert_eq!(response.execution_digests[0].op_type, "MatMul");
    }

    #[test]
    fn test_user_interactions_do_not_require_a_run() {
        assert!(!Action::ExecutionScrollToIndex { index: 0.0 }.requires_active_run());
        assert!(!Action::ExecutionDigestFocused { display_index: 0 }.requires_active_run());
        assert!(Action::ExecutionScrollRight.requires_active_run());
    }
}
