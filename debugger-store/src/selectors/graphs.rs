use debugger_types::GraphOpInfo;
use serde::Serialize;

use crate::graphs::GraphOpFocus;
use crate::state::DebuggerState;

/// An op adjacent to the focused op, resolved when its info is loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphOpNeighbor<'a> {
    pub op_name: &'a str,
    pub data: Option<&'a GraphOpInfo>,
}

pub fn focused_graph_op(state: &DebuggerState) -> Option<&GraphOpFocus> {
    state.graphs.focused_op.as_ref()
}

pub fn focused_graph_op_info(state: &DebuggerState) -> Option<&GraphOpInfo> {
    let focus = state.graphs.focused_op.as_ref()?;
    state.graphs.op(&focus.graph_id, &focus.op_name)
}

/// Inputs of the focused op in input-slot order.
pub fn focused_graph_op_inputs(state: &DebuggerState) -> Option<Vec<GraphOpNeighbor<'_>>> {
    let focus = state.graphs.focused_op.as_ref()?;
    let op = state.graphs.op(&focus.graph_id, &focus.op_name)?;
    Some(
        op.input_names
            .iter()
            .map(|name| neighbor(state, &focus.graph_id, name))
            .collect(),
    )
}

/// Consumers of the focused op grouped by output slot.
pub fn focused_graph_op_consumers(state: &DebuggerState) -> Option<Vec<Vec<GraphOpNeighbor<'_>>>> {
    let focus = state.graphs.focused_op.as_ref()?;
    let op = state.graphs.op(&focus.graph_id, &focus.op_name)?;
    Some(
        op.consumer_names
            .iter()
            .map(|slot| {
                slot.iter()
                    .map(|name| neighbor(state, &focus.graph_id, name))
                    .collect()
            })
            .collect(),
    )
}

fn neighbor<'a>(state: &'a DebuggerState, graph_id: &str, op_name: &'a str) -> GraphOpNeighbor<'a> {
    GraphOpNeighbor {
        op_name,
        data: state.graphs.op(graph_id, op_name),
    }
}
