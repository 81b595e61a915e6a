//! Routes each action to the slice that owns it
//!
//! `reduce` is a total function of (state, action): it either applies the
//! whole action or returns an error and leaves the state untouched. No I/O
//! happens here; the caller owns fetching and feeds back completed results.

use tracing::{debug, warn};

use crate::actions::Action;
use crate::alerts::AlertsBatch;
use crate::error::StoreError;
use crate::state::{now_ms, CodeLocationType, DebuggerState};

/// Applies `action` to `state`, stamping loads with the current wall clock.
pub fn reduce(state: &mut DebuggerState, action: Action) -> Result<(), StoreError> {
    reduce_at(state, action, now_ms())
}

/// Same as [`reduce`] with an explicit load timestamp in epoch milliseconds.
pub fn reduce_at(state: &mut DebuggerState, action: Action, now_ms: i64) -> Result<(), StoreError> {
    let kind = action.kind();
    if action.requires_active_run() && state.active_run_id.is_none() {
        warn!(action = kind, "no active run, dropping action");
        return Ok(());
    }
    debug!(action = kind, "reducing");

    match action {
        // ====================================================================
        // Runs
        // ====================================================================
        Action::RunsRequested => state.runs_loaded.loading(),
        Action::RunsRequestFailed => state.runs_loaded.failed(),
        Action::RunsLoaded { runs } => {
            // A debugger experiment carries a single run, so the first one wins.
            state.active_run_id = runs.keys().next().cloned();
            state.runs = runs;
            state.runs_loaded.loaded(now_ms);
        }

        // ====================================================================
        // Alerts
        // ====================================================================
        Action::NumAlertsAndBreakdownRequested => state.alerts.requested(),
        Action::NumAlertsAndBreakdownRequestFailed => state.alerts.request_failed(),
        Action::NumAlertsAndBreakdownLoaded {
            num_alerts,
            alerts_breakdown,
        } => state
            .alerts
            .summary_loaded(num_alerts, alerts_breakdown, now_ms),
        Action::AlertsOfTypeLoaded {
            alert_type,
            begin,
            end,
            alerts,
            num_alerts,
            alerts_breakdown,
        } => {
            debug!(%alert_type, begin, end, received = alerts.len(), "alerts batch");
            let center = state.alerts.batch_loaded(
                AlertsBatch {
                    alert_type,
                    begin,
                    alerts,
                    num_alerts,
                    alerts_breakdown,
                },
                now_ms,
            );
            if let Some(execution_index) = center {
                state.executions.center_on(execution_index as usize);
            }
        }
        Action::AlertTypeFocusToggled { alert_type } => {
            if let Some(execution_index) = state.alerts.toggle_focus(alert_type) {
                state.executions.center_on(execution_index as usize);
            }
        }

        // ====================================================================
        // Top-level executions
        // ====================================================================
        Action::NumExecutionsRequested => state.executions.num_executions_requested(),
        Action::NumExecutionsLoaded { num_executions } => {
            if state.executions.num_executions_loaded(num_executions, now_ms) {
                state.code_location_focus_type = Some(CodeLocationType::Execution);
            }
        }
        Action::ExecutionDigestsRequested => state.executions.digests_requested(),
        Action::ExecutionDigestsLoaded(response) => {
            state.executions.digests_loaded(response, now_ms)?
        }
        Action::ExecutionScrollLeft => state.executions.scroll_left(),
        Action::ExecutionScrollRight => state.executions.scroll_right(),
        Action::ExecutionScrollToIndex { index } => state.executions.scroll_to_index(index)?,
        Action::ExecutionDigestFocused { display_index } => {
            state.executions.focus_digest(display_index)?;
            state.code_location_focus_type = Some(CodeLocationType::Execution);
        }
        Action::ExecutionDataLoaded(response) => state.executions.data_loaded(response)?,

        // ====================================================================
        // Intra-graph executions
        // ====================================================================
        Action::NumGraphExecutionsRequested => state.graph_executions.num_executions_requested(),
        Action::NumGraphExecutionsLoaded {
            num_graph_executions,
        } => state
            .graph_executions
            .num_executions_loaded(num_graph_executions, now_ms),
        Action::GraphExecutionDigestsRequested => state.graph_executions.digests_requested(),
        Action::GraphExecutionDigestsLoaded(response) => {
            state.graph_executions.digests_loaded(response, now_ms)?
        }
        Action::GraphExecutionDataRequested { page_index } => {
            state.graph_executions.data_requested(page_index)
        }
        Action::GraphExecutionDataLoaded(response) => {
            state.graph_executions.data_loaded(response)?
        }
        Action::GraphExecutionScrollToIndex { index } => {
            state.graph_executions.scroll_to_index(index)?
        }
        Action::GraphExecutionFocused { index } => state.graph_executions.focus(index),

        // ====================================================================
        // Graph structure
        // ====================================================================
        Action::GraphOpInfoRequested { graph_id, op_name } => {
            debug!(%graph_id, %op_name, "graph op info requested");
        }
        Action::GraphOpInfoLoaded {
            graph_op_info_response,
        } => state.graphs.op_info_loaded(graph_op_info_response),
        Action::GraphOpFocused { graph_id, op_name } => {
            state.graphs.focus_op(graph_id, op_name);
            state.code_location_focus_type = Some(CodeLocationType::GraphOpCreation);
        }

        // ====================================================================
        // Source files and stack traces
        // ====================================================================
        Action::SourceFileListRequested => state.source_code.list_requested(),
        Action::SourceFileListRequestFailed => state.source_code.list_request_failed(),
        Action::SourceFileListLoaded { source_files } => {
            state.source_code.list_loaded(source_files, now_ms)
        }
        Action::SourceFileRequested(spec) => state.source_code.file_requested(&spec)?,
        Action::SourceFileLoaded(response) => state.source_code.file_loaded(response)?,
        Action::SourceLineFocused { source_line_spec } => {
            state.source_code.focus_line(source_line_spec)
        }
        Action::StackFramesLoaded { stack_frames } => state.stack_frames.extend(stack_frames),
        Action::SetStickToBottommostFrameInFocusedFile { value } => {
            state.stick_to_bottommost_frame_in_focused_file = value
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{inf_nan_alert, run_listing, state_with_run};
    use debugger_types::{AlertType, AlertsBreakdown, DataLoadState};

    #[test]
    fn test_runs_loaded_selects_first_run() {
        let mut state = DebuggerState::default();
        reduce_at(&mut state, Action::RunsRequested, 1).unwrap();
        assert_eq!(state.runs_loaded.state, DataLoadState::Loading);

        reduce_at(
            &mut state,
            Action::RunsLoaded {
                runs: run_listing(&["__default_debugger_run__"]),
            },
            2,
        )
        .unwrap();
        assert_eq!(state.active_run_id.as_deref(), Some("__default_debugger_run__"));
        assert_eq!(state.runs_loaded.last_loaded_time_in_ms, Some(2));
    }

    #[test]
    fn test_runs_request_failed() {
        let mut state = DebuggerState::default();
        reduce_at(&mut state, Action::RunsRequestFailed, 1).unwrap();
        assert_eq!(state.runs_loaded.state, DataLoadState::Failed);
        assert_eq!(state.runs_loaded.last_loaded_time_in_ms, None);
    }

    #[test]
    fn test_responses_without_active_run_are_dropped() {
        let mut state = DebuggerState::default();
        let before = state.clone();
        for action in [
            Action::NumExecutionsLoaded { num_executions: 10 },
            Action::NumAlertsAndBreakdownRequested,
            Action::ExecutionScrollRight,
            Action::NumGraphExecutionsLoaded {
                num_graph_executions: 3,
            },
        ] {
            reduce_at(&mut state, action, 1).unwrap();
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_first_inf_nan_batch_centers_timeline() {
        let mut state = state_with_run();
        state.executions.display_count = 5;
        state.executions.digests.num_items = 100;

        reduce_at(
            &mut state,
            Action::AlertsOfTypeLoaded {
                alert_type: AlertType::InfNan,
                begin: 0,
                end: 2,
                alerts: vec![inf_nan_alert(10), inf_nan_alert(11)],
                num_alerts: 2,
                alerts_breakdown: AlertsBreakdown::from([(AlertType::InfNan, 2)]),
            },
            1,
        )
        .unwrap();

        assert_eq!(state.executions.scroll_begin_index, 8);
        assert_eq!(state.alerts.num_alerts, 2);
        assert_eq!(state.alerts.alerts_loaded.state, DataLoadState::Loaded);
    }

    #[test]
    fn test_auto_focus_marks_execution_as_code_location() {
        let mut state = state_with_run();
        reduce_at(&mut state, Action::NumExecutionsLoaded { num_executions: 3 }, 1).unwrap();
        assert_eq!(state.executions.focus_index, Some(0));
        assert_eq!(state.code_location_focus_type, Some(CodeLocationType::Execution));

        reduce_at(
            &mut state,
            Action::GraphOpFocused {
                graph_id: "g1".to_string(),
                op_name: "MatMul_1".to_string(),
            },
            2,
        )
        .unwrap();
        assert_eq!(state.code_location_focus_type, Some(CodeLocationType::GraphOpCreation));

        // A later count refresh does not steal focus back.
        reduce_at(&mut state, Action::NumExecutionsLoaded { num_executions: 4 }, 3).unwrap();
        assert_eq!(state.code_location_focus_type, Some(CodeLocationType::GraphOpCreation));
    }

    #[test]
    fn test_digest_focus_outside_viewport_is_rejected() {
        let mut state = state_with_run();
        state.executions.digests.num_items = 100;
        state.executions.scroll_begin_index = 10;
        let before = state.clone();

        let err = reduce_at(
            &mut state,
            Action::ExecutionDigestFocused {
                display_index: usize::MAX,
            },
            1,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::DisplayIndexOutOfRange { .. }));
        assert_eq!(state, before);

        reduce_at(&mut state, Action::ExecutionDigestFocused { display_index: 2 }, 2).unwrap();
        assert_eq!(state.executions.focus_index, Some(12));
        assert_eq!(state.code_location_focus_type, Some(CodeLocationType::Execution));
    }

    #[test]
    fn test_rejected_scroll_leaves_state_unchanged() {
        let mut state = state_with_run();
        state.executions.digests.num_items = 100;
        let before = state.clone();

        let err = reduce_at(&mut state, Action::ExecutionScrollToIndex { index: 51.0 }, 1)
            .unwrap_err();
        assert!(matches!(err, StoreError::ScrollIndexOutOfRange { index: 51, .. }));
        assert_eq!(state, before);
    }
}
