//! Fixture builders shared by unit and integration tests

use debugger_types::{
    Alert, DebuggerRunListing, DebuggerRunMetadata, Execution, ExecutionDigest, GraphExecution,
    GraphOpInfo, InfNanAlert, SourceFileSpec, StackFrame, TensorShapeAlert,
};

use crate::state::DebuggerState;

pub const DEFAULT_RUN: &str = "__default_debugger_run__";

pub fn run_listing(run_ids: &[&str]) -> DebuggerRunListing {
    run_ids
        .iter()
        .map(|id| (id.to_string(), DebuggerRunMetadata { start_time: 111.0 }))
        .collect()
}

/// Default state with `DEFAULT_RUN` active.
pub fn state_with_run() -> DebuggerState {
    DebuggerState {
        runs: run_listing(&[DEFAULT_RUN]),
        active_run_id: Some(DEFAULT_RUN.to_string()),
        ..DebuggerState::default()
    }
}

pub fn execution_digest(op_type: &str) -> ExecutionDigest {
    ExecutionDigest {
        op_type: op_type.to_string(),
        output_tensor_device_ids: vec!["d0".to_string()],
    }
}

pub fn execution(op_type: &str, stack_frame_ids: &[&str]) -> Execution {
    Execution {
        op_type: op_type.to_string(),
        output_tensor_device_ids: vec!["d0".to_string()],
        host_name: "localhost".to_string(),
        stack_frame_ids: stack_frame_ids.iter().map(ToString::to_string).collect(),
        tensor_debug_mode: 2,
        graph_id: None,
        input_tensor_ids: vec![10],
        output_tensor_ids: vec![11],
        debug_tensor_values: Some(vec![Some(vec![-1.0, 0.0])]),
    }
}

pub fn graph_execution(op_name: &str) -> GraphExecution {
    GraphExecution {
        op_name: op_name.to_string(),
        op_type: "TestOp".to_string(),
        output_slot: 0,
        graph_id: "g1".to_string(),
        graph_ids: vec!["g0".to_string(), "g1".to_string()],
        device_name: "/GPU:0".to_string(),
        tensor_debug_mode: 2,
        debug_tensor_value: Some(vec![-1.0, 0.0]),
    }
}

pub fn graph_op(op_name: &str, graph_ids: &[&str]) -> GraphOpInfo {
    GraphOpInfo {
        op_name: op_name.to_string(),
        op_type: "TestOp".to_string(),
        device_name: "/GPU:0".to_string(),
        host_name: "localhost".to_string(),
        graph_ids: graph_ids.iter().map(ToString::to_string).collect(),
        num_outputs: 1,
        ..GraphOpInfo::default()
    }
}

pub fn inf_nan_alert(execution_index: u64) -> Alert {
    Alert::InfNan(InfNanAlert {
        op_type: "RealDiv".to_string(),
        output_slot: 0,
        size: 10,
        num_neg_inf: 1,
        num_pos_inf: 2,
        num_nan: 3,
        execution_index: Some(execution_index),
        graph_execution_trace_index: None,
    })
}

pub fn shape_alert() -> Alert {
    Alert::TensorShape(TensorShapeAlert {
        op_type: "Reshape".to_string(),
        output_slot: 0,
        expected_shape: vec![2, 3],
        actual_shape: vec![3, 2],
    })
}

pub fn file_spec(host_name: &str, file_path: &str) -> SourceFileSpec {
    SourceFileSpec {
        host_name: host_name.to_string(),
        file_path: file_path.to_string(),
    }
}

/// Three frames: `f0` in `/tmp/main.py`, `f1` and `f2` in `/tmp/model.py`.
pub fn stack_frames() -> Vec<(String, StackFrame)> {
    vec![
        ("f0".to_string(), StackFrame::new("localhost", "/tmp/main.py", 20, "main")),
        ("f1".to_string(), StackFrame::new("localhost", "/tmp/model.py", 30, "build")),
        ("f2".to_string(), StackFrame::new("localhost", "/tmp/model.py", 40, "call")),
    ]
}
