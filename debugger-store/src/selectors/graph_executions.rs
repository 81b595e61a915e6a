use std::collections::{BTreeMap, BTreeSet};

use debugger_types::{GraphExecution, GraphExecutionDigest, LoadState};

use crate::state::DebuggerState;

pub fn num_graph_executions_loaded(state: &DebuggerState) -> &LoadState {
    &state.graph_executions.num_executions_loaded
}

pub fn graph_execution_digests_loaded(state: &DebuggerState) -> &LoadState {
    &state.graph_executions.digests.load
}

pub fn num_graph_executions(state: &DebuggerState) -> usize {
    state.graph_executions.num_executions()
}

pub fn graph_execution_scroll_begin_index(state: &DebuggerState) -> usize {
    state.graph_executions.scroll_begin_index
}

pub fn graph_execution_display_count(state: &DebuggerState) -> usize {
    state.graph_executions.display_count
}

pub fn graph_execution_page_size(state: &DebuggerState) -> usize {
    state.graph_executions.page_size()
}

pub fn graph_execution_digests(state: &DebuggerState) -> &BTreeMap<usize, GraphExecutionDigest> {
    &state.graph_executions.digests.items
}

pub fn graph_execution_data_loading_pages(state: &DebuggerState) -> &BTreeSet<usize> {
    &state.graph_executions.data_loading_pages
}

pub fn graph_execution_data_page_loaded_sizes(state: &DebuggerState) -> &BTreeMap<usize, usize> {
    &state.graph_executions.data_page_loaded_sizes
}

pub fn graph_execution_data(state: &DebuggerState) -> &BTreeMap<usize, GraphExecution> {
    &state.graph_executions.data
}

pub fn graph_execution_focus_index(state: &DebuggerState) -> Option<usize> {
    state.graph_executions.focus_index
}

pub fn focused_graph_execution(state: &DebuggerState) -> Option<&GraphExecution> {
    let index = state.graph_executions.focus_index?;
    state.graph_executions.data.get(&index)
}

/// Every index of the graph-execution timeline; `None` while it is empty.
pub fn graph_execution_indices(state: &DebuggerState) -> Option<Vec<usize>> {
    match state.graph_executions.num_executions() {
        0 => None,
        n => Some((0..n).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::graph_execution;

    #[test]
    fn test_graph_execution_indices() {
        let mut state = DebuggerState::default();
        assert_eq!(graph_execution_indices(&state), None);
        state.graph_executions.digests.num_items = 4;
        assert_eq!(graph_execution_indices(&state), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_focused_graph_execution() {
        let mut state = DebuggerState::default();
        state.graph_executions.data.insert(3, graph_execution("Add_3"));
        assert_eq!(focused_graph_execution(&state), None);

        state.graph_executions.focus(3);
        assert_eq!(focused_graph_execution(&state).map(|e| e.op_name.as_str()), Some("Add_3"));
        assert_eq!(graph_execution_page_size(&state), 200);
    }
}
