//! Op-level graph topology assembled from point queries

use std::collections::BTreeMap;

use debugger_types::{GraphOpInfo, GraphOpInfoResponse};
use serde::{Deserialize, Serialize};

/// Identifies one op within its immediately enclosing graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphOpFocus {
    pub graph_id: String,
    pub op_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphsState {
    /// Innermost enclosing graph id -> op name -> op.
    pub ops: BTreeMap<String, BTreeMap<String, GraphOpInfo>>,
    pub focused_op: Option<GraphOpFocus>,
}

impl GraphsState {
    pub fn op(&self, graph_id: &str, op_name: &str) -> Option<&GraphOpInfo> {
        self.ops.get(graph_id).and_then(|ops| ops.get(op_name))
    }

    /// Upserts the queried op and every input/consumer op it came with.
    pub fn op_info_loaded(&mut self, response: GraphOpInfoResponse) {
        let GraphOpInfoResponse {
            op,
            inputs,
            consumers,
        } = response;
        let neighbors = inputs
            .into_iter()
            .flatten()
            .chain(consumers.into_iter().flatten().flatten());
        for neighbor in neighbors {
            self.upsert(neighbor);
        }
        self.upsert(op);
    }

    pub fn focus_op(&mut self, graph_id: String, op_name: String) {
        self.focused_op = Some(GraphOpFocus { graph_id, op_name });
    }

    fn upsert(&mut self, op: GraphOpInfo) {
        let Some(graph_id) = op.innermost_graph_id().map(ToString::to_string) else {
            tracing::warn!(op_name = %op.op_name, "dropping graph op without enclosing graph id");
            return;
        };
        self.ops
            .entry(graph_id)
            .or_default()
            .insert(op.op_name.clone(), op);
    }
}
