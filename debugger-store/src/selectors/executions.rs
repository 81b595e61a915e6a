use std::collections::BTreeSet;

use debugger_types::{AlertType, Execution, ExecutionDigest, LoadState, StackFrame};

use crate::state::DebuggerState;

pub fn num_executions_loaded(state: &DebuggerState) -> &LoadState {
    &state.executions.num_executions_loaded
}

pub fn execution_digests_loaded(state: &DebuggerState) -> &LoadState {
    &state.executions.digests.load
}

pub fn num_executions(state: &DebuggerState) -> usize {
    state.executions.num_executions()
}

pub fn execution_scroll_begin_index(state: &DebuggerState) -> usize {
    state.executions.scroll_begin_index
}

pub fn execution_page_size(state: &DebuggerState) -> usize {
    state.executions.digests.page_size
}

pub fn execution_display_count(state: &DebuggerState) -> usize {
    state.executions.display_count
}

/// Digests in the viewport, clipped at the end of the timeline.
pub fn visible_execution_digests(state: &DebuggerState) -> Vec<Option<&ExecutionDigest>> {
    let executions = &state.executions;
    let begin = executions.scroll_begin_index;
    let end = begin
        .saturating_add(executions.display_count)
        .min(executions.num_executions());
    executions.digests.window(begin, end.saturating_sub(begin))
}

/// "Execution: <first> ~ <last> of <total>" for the viewport, or `None`
/// when the viewport shows no known execution.
pub fn execution_scroll_label(state: &DebuggerState) -> Option<String> {
    let executions = &state.executions;
    let total = executions.num_executions();
    let begin = executions.scroll_begin_index;
    if executions.display_count == 0 || begin >= total {
        return None;
    }
    let last = begin.saturating_add(executions.display_count).min(total) - 1;
    Some(format!("Execution: {begin} ~ {last} of {total}"))
}

pub fn focused_execution_index(state: &DebuggerState) -> Option<usize> {
    state.executions.focus_index
}

pub fn focused_execution_data(state: &DebuggerState) -> Option<&Execution> {
    let index = state.executions.focus_index?;
    state.executions.execution_data.get(&index)
}

/// Frames of the focused execution, or `None` until every frame is loaded.
pub fn focused_execution_stack_frames(state: &DebuggerState) -> Option<Vec<&StackFrame>> {
    let execution = focused_execution_data(state)?;
    execution
        .stack_frame_ids
        .iter()
        .map(|id| state.stack_frames.get(id))
        .collect()
}

/// For each slot of the viewport, the focused alert type when the
/// execution at that slot raised an alert of that type.
pub fn focus_alert_types_of_visible_execution_digests(state: &DebuggerState) -> Vec<Option<AlertType>> {
    let executions = &state.executions;
    let begin = executions.scroll_begin_index;
    let slots = begin..begin.saturating_add(executions.display_count);
    let Some(focus_type) = state.alerts.focus_type else {
        return slots.map(|_| None).collect();
    };
    let alerting: BTreeSet<u64> = state.alerts.execution_indices_of(focus_type).collect();
    slots
        .map(|index| alerting.contains(&(index as u64)).then_some(focus_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{execution, execution_digest, stack_frames};
    use std::collections::BTreeMap;

    fn with_digests(display_count: usize, count: usize) -> DebuggerState {
        let mut state = DebuggerState::default();
        state.executions.display_count = display_count;
        for i in 0..count {
            state.executions.digests.items.insert(i, execution_digest("MatMul"));
        }
        state
    }

    #[test]
    fn test_alert_types_all_none_without_focus() {
        let state = with_digests(3, 3);
        assert_eq!(
            focus_alert_types_of_visible_execution_digests(&state),
            vec![None, None, None]
        );
    }

    #[test]
    fn test_alert_types_with_focus() {
        let mut state = with_digests(3, 4);
        state.alerts.focus_type = Some(AlertType::InfNan);
        state.alerts.execution_indices.insert(
            AlertType::InfNan,
            BTreeMap::from([(0, 0), (1, 2), (2, 3)]),
        );
        assert_eq!(
            focus_alert_types_of_visible_execution_digests(&state),
            vec![Some(AlertType::InfNan), None, Some(AlertType::InfNan)]
        );
    }

    #[test]
    fn test_focused_execution_stack_frames() {
        let mut state = DebuggerState::default();
        assert_eq!(focused_execution_stack_frames(&state), None);

        state.executions.focus_index = Some(1);
        state.executions.execution_data.insert(1, execution("Relu", &["f0", "f2"]));
        state.stack_frames = stack_frames().into_iter().collect();

        let frames = focused_execution_stack_frames(&state).expect("all frames are loaded");
        let lines: Vec<u32> = frames.iter().map(|frame| frame.lineno).collect();
        assert_eq!(lines, vec![20, 40]);

        state.stack_frames.remove("f2");
        assert_eq!(focused_execution_stack_frames(&state), None, "a missing frame hides the trace");
    }

    #[test]
    fn test_scroll_label() {
        let mut state = DebuggerState::default();
        assert_eq!(execution_scroll_label(&state), None);

        state.executions.digests.num_items = 1500;
        state.executions.display_count = 100;
        state.executions.scroll_begin_index = 977;
        assert_eq!(
            execution_scroll_label(&state).as_deref(),
            Some("Execution: 977 ~ 1076 of 1500")
        );

        state.executions.digests.num_items = 20;
        state.executions.scroll_begin_index = 0;
        assert_eq!(execution_scroll_label(&state).as_deref(), Some("Execution: 0 ~ 19 of 20"));
    }

    #[test]
    fn test_scroll_label_absent_outside_timeline() {
        let mut state = DebuggerState::default();
        state.executions.digests.num_items = 100;
        state.executions.display_count = 50;
        state.executions.scroll_begin_index = 4975;
        assert_eq!(execution_scroll_label(&state), None, "scrolled past the last execution");
        assert!(visible_execution_digests(&state).is_empty());

        state.executions.scroll_begin_index = 99;
        assert_eq!(execution_scroll_label(&state).as_deref(), Some("Execution: 99 ~ 99 of 100"));

        state.executions.display_count = 0;
        state.executions.scroll_begin_index = 0;
        assert_eq!(execution_scroll_label(&state), None, "empty viewport");
        assert!(visible_execution_digests(&state).is_empty());
        assert!(focus_alert_types_of_visible_execution_digests(&state).is_empty());
    }

    #[test]
    fn test_viewport_near_usize_max_does_not_overflow() {
        let mut state = with_digests(3, 0);
        state.executions.digests.num_items = usize::MAX;
        state.executions.scroll_begin_index = usize::MAX - 1;
        state.alerts.focus_type = Some(AlertType::InfNan);

        assert_eq!(visible_execution_digests(&state).len(), 1);
        assert_eq!(focus_alert_types_of_visible_execution_digests(&state), vec![None]);
        let label = execution_scroll_label(&state).expect("begin is inside the timeline");
        assert!(label.ends_with(&format!("of {}", usize::MAX)), "unexpected: {label}");
    }

    #[test]
    fn test_visible_digests_clip_at_timeline_end() {
        let mut state = with_digests(5, 2);
        state.executions.digests.num_items = 3;
        let visible = visible_execution_digests(&state);
        assert_eq!(visible.len(), 3);
        assert!(visible[0].is_some() && visible[1].is_some());
        assert!(visible[2].is_none(), "index 2 is known but not loaded");
    }
}
