//! Stack trace of the focused code location and the sticky line-follow mode

use debugger_types::{SourceLineSpec, StackFrame};
use serde::Serialize;

use crate::actions::Action;
use crate::selectors::{focused_execution_data, focused_graph_op_info};
use crate::state::{CodeLocationType, DebuggerState};

/// Where the displayed stack trace comes from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code_location_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodeLocationOrigin {
    Execution {
        execution_index: usize,
        op_type: String,
    },
    GraphOpCreation {
        op_name: String,
        op_type: String,
    },
}

/// One row of the stack trace view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackFrameForDisplay {
    pub host_name: String,
    pub file_path: String,
    /// Last path component of `file_path`.
    pub concise_file_path: String,
    pub lineno: u32,
    pub function_name: String,
    pub belongs_to_focused_file: bool,
    pub focused: bool,
    pub auto_focus: bool,
}

pub fn code_location_focus_type(state: &DebuggerState) -> Option<CodeLocationType> {
    state.code_location_focus_type
}

pub fn code_location_origin(state: &DebuggerState) -> Option<CodeLocationOrigin> {
    match state.code_location_focus_type? {
        CodeLocationType::Execution => {
            let execution_index = state.executions.focus_index?;
            let execution = focused_execution_data(state)?;
            Some(CodeLocationOrigin::Execution {
                execution_index,
                op_type: execution.op_type.clone(),
            })
        }
        CodeLocationType::GraphOpCreation => {
            let op = focused_graph_op_info(state)?;
            Some(CodeLocationOrigin::GraphOpCreation {
                op_name: op.op_name.clone(),
                op_type: op.op_type.clone(),
            })
        }
    }
}

/// Frames of the focused code location, or `None` until every frame is loaded.
pub fn focused_stack_frames(state: &DebuggerState) -> Option<Vec<&StackFrame>> {
    let frame_ids = match state.code_location_focus_type? {
        CodeLocationType::Execution => &focused_execution_data(state)?.stack_frame_ids,
        CodeLocationType::GraphOpCreation => &focused_graph_op_info(state)?.stack_frame_ids,
    };
    frame_ids
        .iter()
        .map(|id| state.stack_frames.get(id))
        .collect()
}

pub fn stack_frames_for_display(state: &DebuggerState) -> Option<Vec<StackFrameForDisplay>> {
    let frames = focused_stack_frames(state)?;
    Some(annotate_frames(
        &frames,
        state.source_code.focus_line_spec.as_ref(),
        state.stick_to_bottommost_frame_in_focused_file,
    ))
}

/// Flags each frame against the focused line. In sticky mode the bottommost
/// frame of the focused file is marked for auto-focus unless it is already
/// the focused line.
pub fn annotate_frames(
    frames: &[&StackFrame],
    focus: Option<&SourceLineSpec>,
    stick_to_bottommost: bool,
) -> Vec<StackFrameForDisplay> {
    let in_focused_file = |frame: &StackFrame| {
        focus.is_some_and(|spec| frame.is_in_file(&spec.host_name, &spec.file_path))
    };
    let bottommost = frames.iter().rposition(|frame| in_focused_file(*frame));

    frames
        .iter()
        .enumerate()
        .map(|(position, frame)| {
            let belongs_to_focused_file = in_focused_file(*frame);
            let focused = belongs_to_focused_file
                && focus.is_some_and(|spec| spec.lineno == frame.lineno);
            StackFrameForDisplay {
                host_name: frame.host_name.clone(),
                file_path: frame.file_path.clone(),
                concise_file_path: concise_file_path(&frame.file_path).to_string(),
                lineno: frame.lineno,
                function_name: frame.function_name.clone(),
                belongs_to_focused_file,
                focused,
                auto_focus: stick_to_bottommost && bottommost == Some(position) && !focused,
            }
        })
        .collect()
}

/// The line focus that sticky mode wants next, if it differs from the current one.
pub fn derive_auto_focus_action(state: &DebuggerState) -> Option<Action> {
    if !state.stick_to_bottommost_frame_in_focused_file {
        return None;
    }
    let target = stack_frames_for_display(state)?
        .into_iter()
        .find(|frame| frame.auto_focus)?;
    Some(Action::SourceLineFocused {
        source_line_spec: SourceLineSpec {
            host_name: target.host_name,
            file_path: target.file_path,
            lineno: target.lineno,
        },
    })
}

fn concise_file_path(file_path: &str) -> &str {
    file_path
        .rsplit(['/', '\\'])
        .find(|part| !part.is_empty())
        .unwrap_or(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{execution, graph_op, stack_frames};

    fn focused_on(frame: &StackFrame, sticky: bool) -> DebuggerState {
        let mut state = DebuggerState::default();
        state.stack_frames = stack_frames().into_iter().collect();
        state.executions.focus_index = Some(0);
        state.executions.execution_data.insert(0, execution("MatMul", &["f0", "f1", "f2"]));
        state.code_location_focus_type = Some(CodeLocationType::Execution);
        state.source_code.focus_line_spec = Some(frame.line_spec());
        state.stick_to_bottommost_frame_in_focused_file = sticky;
        state
    }

    fn frame(id: &str) -> StackFrame {
        stack_frames()
            .into_iter()
            .find(|(frame_id, _)| frame_id == id)
            .map(|(_, frame)| frame)
            .expect("fixture frame exists")
    }

    #[test]
    fn test_sticky_mode_follows_bottommost_frame_of_file() {
        let state = focused_on(&frame("f1"), true);
        let display = stack_frames_for_display(&state).expect("frames loaded");
        let flags: Vec<(bool, bool, bool)> = display
            .iter()
            .map(|f| (f.belongs_to_focused_file, f.focused, f.auto_focus))
            .collect();
        assert_eq!(
            flags,
            vec![(false, false, false), (true, true, false), (true, false, true)]
        );
        assert_eq!(
            derive_auto_focus_action(&state),
            Some(Action::SourceLineFocused {
                source_line_spec: frame("f2").line_spec()
            })
        );
    }

    #[test]
    fn test_no_follow_up_when_bottommost_already_focused() {
        let state = focused_on(&frame("f2"), true);
        assert_eq!(derive_auto_focus_action(&state), None);
    }

    #[test]
    fn test_no_follow_up_without_sticky_mode() {
        let state = focused_on(&frame("f1"), false);
        let display = stack_frames_for_display(&state).expect("frames loaded");
        assert!(display.iter().all(|f| !f.auto_focus));
        assert_eq!(derive_auto_focus_action(&state), None);
    }

    #[test]
    fn test_code_location_origin() {
        let mut state = focused_on(&frame("f0"), false);
        assert_eq!(
            code_location_origin(&state),
            Some(CodeLocationOrigin::Execution {
                execution_index: 0,
                op_type: "MatMul".to_string(),
            })
        );

        let mut op = graph_op("Conv2D_1", &["g0"]);
        op.stack_frame_ids = vec!["f2".to_string()];
        state.graphs.ops.entry("g0".to_string()).or_default().insert(op.op_name.clone(), op);
        state.graphs.focus_op("g0".to_string(), "Conv2D_1".to_string());
        state.code_location_focus_type = Some(CodeLocationType::GraphOpCreation);

        assert_eq!(
            code_location_origin(&state),
            Some(CodeLocationOrigin::GraphOpCreation {
                op_name: "Conv2D_1".to_string(),
                op_type: "TestOp".to_string(),
            })
        );
        let frames = focused_stack_frames(&state).expect("frame loaded");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].lineno, 40);
    }

    #[test]
    fn test_concise_file_path() {
        assert_eq!(concise_file_path("/tmp/model.py"), "model.py");
        assert_eq!(concise_file_path("C:\\src\\train.py"), "train.py");
        assert_eq!(concise_file_path("main.py"), "main.py");
    }
}
