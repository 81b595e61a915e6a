//! Action-log replay and the derived view snapshot

use std::io::BufRead;

use anyhow::Context;
use debugger_store::selectors::{
    self, CodeLocationOrigin, StackFrameForDisplay,
};
use debugger_store::{Action, DebuggerState, Store};
use debugger_types::{AlertType, SourceLineSpec};
use serde::Serialize;
use tracing::{debug, warn};

/// One action of the log together with its 1-based line number
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedAction {
    pub line: usize,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedAction {
    pub line: usize,
    pub kind: &'static str,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub follow_ups: usize,
    pub rejected: Vec<RejectedAction>,
}

/// Projection of the store through the selectors the panel renders from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub active_run_id: Option<String>,
    pub num_executions: usize,
    pub execution_scroll_label: Option<String>,
    pub focused_execution_index: Option<usize>,
    pub alerts_focus_type: Option<AlertType>,
    pub num_alerts: u64,
    pub num_alerts_of_focused_type: u64,
    pub focus_alert_types_of_visible_execution_digests: Vec<Option<AlertType>>,
    pub num_graph_executions: usize,
    pub graph_execution_focus_index: Option<usize>,
    pub code_location_origin: Option<CodeLocationOrigin>,
    pub focused_source_line_spec: Option<SourceLineSpec>,
    pub focused_source_file_index: Option<usize>,
    pub stick_to_bottommost_frame_in_focused_file: bool,
    pub stack_frames: Option<Vec<StackFrameForDisplay>>,
}

impl Snapshot {
    pub fn of(state: &DebuggerState) -> Self {
        Self {
            active_run_id: selectors::active_run_id(state).map(ToString::to_string),
            num_executions: selectors::num_executions(state),
            execution_scroll_label: selectors::execution_scroll_label(state),
            focused_execution_index: selectors::focused_execution_index(state),
            alerts_focus_type: selectors::alerts_focus_type(state),
            num_alerts: selectors::num_alerts(state),
            num_alerts_of_focused_type: selectors::num_alerts_of_focused_type(state),
            focus_alert_types_of_visible_execution_digests:
                selectors::focus_alert_types_of_visible_execution_digests(state),
            num_graph_executions: selectors::num_graph_executions(state),
            graph_execution_focus_index: selectors::graph_execution_focus_index(state),
            code_location_origin: selectors::code_location_origin(state),
            focused_source_line_spec: selectors::focused_source_line_spec(state).cloned(),
            focused_source_file_index: selectors::focused_source_file_index(state),
            stick_to_bottommost_frame_in_focused_file:
                selectors::stick_to_bottommost_frame_in_focused_file(state),
            stack_frames: selectors::stack_frames_for_display(state),
        }
    }
}

/// Parses a JSON-lines action log. Blank lines and `#` comments are skipped.
pub fn read_actions(reader: impl BufRead) -> anyhow::Result<Vec<LoggedAction>> {
    let mut actions = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("failed to read action log line {line_number}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let action: Action = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid action on line {line_number}"))?;
        actions.push(LoggedAction {
            line: line_number,
            action,
        });
    }
    Ok(actions)
}

/// Dispatches every action in order. A rejected action is recorded and the
/// replay continues with the unchanged state.
pub fn replay(store: &mut Store, actions: Vec<LoggedAction>) -> ReplayReport {
    let mut report = ReplayReport::default();
    for LoggedAction { line, action } in actions {
        let kind = action.kind();
        match store.dispatch(action) {
            Ok(follow_ups) => {
                debug!(line, action = kind, follow_ups = follow_ups.len(), "applied");
                report.applied += 1;
                report.follow_ups += follow_ups.len();
            }
            Err(err) => {
                warn!(line, action = kind, error = %err, "action rejected");
                report.rejected.push(RejectedAction {
                    line,
                    kind,
                    error: err.to_string(),
                });
            }
        }
    }
    report
}
