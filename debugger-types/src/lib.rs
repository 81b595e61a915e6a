//! Shared types between the debugger data source, state store and views
//!
//! These types are used by:
//! - the data source, which decodes backend responses into them
//! - the state store, which folds them into the normalized state tree
//! - the presentation layer, which reads them back through selectors
//!
//! Serializable with serde; field names follow the debugging backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Load State
// ============================================================================

/// Progress of an independently fetched sub-resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataLoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Load state plus the time of the last successful load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadState {
    pub state: DataLoadState,
    /// Epoch milliseconds; `None` until the first successful load.
    pub last_loaded_time_in_ms: Option<i64>,
}

impl LoadState {
    pub fn loading(&mut self) {
        self.state = DataLoadState::Loading;
    }

    pub fn failed(&mut self) {
        self.state = DataLoadState::Failed;
    }

    pub fn loaded(&mut self, now_ms: i64) {
        self.state = DataLoadState::Loaded;
        self.last_loaded_time_in_ms = Some(now_ms);
    }
}

// ============================================================================
// Runs
// ============================================================================

/// A single debugging session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebuggerRunMetadata {
    /// Seconds since epoch.
    pub start_time: f64,
}

/// Runs keyed by run id
pub type DebuggerRunListing = BTreeMap<String, DebuggerRunMetadata>;

// ============================================================================
// Top-level (eager) Executions
// ============================================================================

/// Lightweight per-execution summary, cheap to fetch in bulk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionDigest {
    pub op_type: String,
    #[serde(default)]
    pub output_tensor_device_ids: Vec<String>,
}

/// Full record of one top-level execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub op_type: String,
    #[serde(default)]
    pub output_tensor_device_ids: Vec<String>,
    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub stack_frame_ids: Vec<String>,
    #[serde(default)]
    pub tensor_debug_mode: i32,
    #[serde(default)]
    pub graph_id: Option<String>,
    #[serde(default)]
    pub input_tensor_ids: Vec<i64>,
    #[serde(default)]
    pub output_tensor_ids: Vec<i64>,
    /// One entry per output tensor; `None` where the debug mode records nothing.
    #[serde(default)]
    pub debug_tensor_values: Option<Vec<Option<Vec<f64>>>>,
}

// ============================================================================
// Intra-graph Executions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExecutionDigest {
    pub op_name: String,
    pub op_type: String,
    pub output_slot: u32,
    /// Id of the immediately enclosing graph.
    pub graph_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExecution {
    pub op_name: String,
    pub op_type: String,
    pub output_slot: u32,
    pub graph_id: String,
    /// Outermost to innermost.
    #[serde(default)]
    pub graph_ids: Vec<String>,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub tensor_debug_mode: i32,
    #[serde(default)]
    pub debug_tensor_value: Option<Vec<f64>>,
}

// ============================================================================
// Graph Structure
// ============================================================================

/// Per-op record of the graph topology
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOpInfo {
    pub op_name: String,
    pub op_type: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub host_name: String,
    /// Enclosing graph ids, outermost to innermost.
    pub graph_ids: Vec<String>,
    #[serde(default)]
    pub num_outputs: u32,
    #[serde(default)]
    pub stack_frame_ids: Vec<String>,
    #[serde(default)]
    pub input_names: Vec<String>,
    /// Consumer op names, one list per output slot.
    #[serde(default)]
    pub consumer_names: Vec<Vec<String>>,
}

impl GraphOpInfo {
    /// The most deeply nested graph containing this op.
    pub fn innermost_graph_id(&self) -> Option<&str> {
        self.graph_ids.last().map(String::as_str)
    }
}

/// Answer to a point query for one op: the op itself plus its neighbors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOpInfoResponse {
    #[serde(flatten)]
    pub op: GraphOpInfo,
    #[serde(default)]
    pub inputs: Option<Vec<GraphOpInfo>>,
    /// Consumers grouped by output slot.
    #[serde(default)]
    pub consumers: Option<Vec<Vec<GraphOpInfo>>>,
}

// ============================================================================
// Alerts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "InfNanAlert")]
    InfNan,
    #[serde(rename = "TensorShapeAlert")]
    TensorShape,
    #[serde(rename = "FunctionRecompilesAlert")]
    FunctionRecompiles,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::InfNan => "InfNanAlert",
            AlertType::TensorShape => "TensorShapeAlert",
            AlertType::FunctionRecompiles => "FunctionRecompilesAlert",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric instability (infinity / NaN) in an op's output tensor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfNanAlert {
    pub op_type: String,
    pub output_slot: u32,
    pub size: u64,
    pub num_neg_inf: u64,
    pub num_pos_inf: u64,
    pub num_nan: u64,
    /// Index into the top-level execution timeline, when eager.
    #[serde(default)]
    pub execution_index: Option<u64>,
    #[serde(default)]
    pub graph_execution_trace_index: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorShapeAlert {
    pub op_type: String,
    pub output_slot: u32,
    pub expected_shape: Vec<i64>,
    pub actual_shape: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecompilesAlert {
    pub function_name: String,
    pub num_recompiles: u64,
}

/// Anomaly record, tagged by `alert_type` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "alert_type")]
pub enum Alert {
    #[serde(rename = "InfNanAlert")]
    InfNan(InfNanAlert),
    #[serde(rename = "TensorShapeAlert")]
    TensorShape(TensorShapeAlert),
    #[serde(rename = "FunctionRecompilesAlert")]
    FunctionRecompiles(FunctionRecompilesAlert),
}

impl Alert {
    pub fn alert_type(&self) -> AlertType {
        match self {
            Alert::InfNan(_) => AlertType::InfNan,
            Alert::TensorShape(_) => AlertType::TensorShape,
            Alert::FunctionRecompiles(_) => AlertType::FunctionRecompiles,
        }
    }

    /// Only numeric-instability alerts are correlated to the top-level timeline.
    pub fn execution_index(&self) -> Option<u64> {
        match self {
            Alert::InfNan(alert) => alert.execution_index,
            _ => None,
        }
    }
}

/// Alert counts keyed by type
pub type AlertsBreakdown = BTreeMap<AlertType, u64>;

// ============================================================================
// Stack Frames & Source Code
// ============================================================================

/// One frame of a Python stack trace
///
/// Serialized as the backend's `[host_name, file_path, lineno, function_name]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StackFrameTuple", into = "StackFrameTuple")]
pub struct StackFrame {
    pub host_name: String,
    pub file_path: String,
    pub lineno: u32,
    pub function_name: String,
}

type StackFrameTuple = (String, String, u32, String);

impl From<StackFrameTuple> for StackFrame {
    fn from((host_name, file_path, lineno, function_name): StackFrameTuple) -> Self {
        Self {
            host_name,
            file_path,
            lineno,
            function_name,
        }
    }
}

impl From<StackFrame> for StackFrameTuple {
    fn from(frame: StackFrame) -> Self {
        (
            frame.host_name,
            frame.file_path,
            frame.lineno,
            frame.function_name,
        )
    }
}

impl StackFrame {
    pub fn new(host_name: &str, file_path: &str, lineno: u32, function_name: &str) -> Self {
        Self {
            host_name: host_name.to_string(),
            file_path: file_path.to_string(),
            lineno,
            function_name: function_name.to_string(),
        }
    }

    pub fn is_in_file(&self, host_name: &str, file_path: &str) -> bool {
        self.host_name == host_name && self.file_path == file_path
    }

    pub fn line_spec(&self) -> SourceLineSpec {
        SourceLineSpec {
            host_name: self.host_name.clone(),
            file_path: self.file_path.clone(),
            lineno: self.lineno,
        }
    }
}

/// Content-addressed frames keyed by opaque frame id
pub type StackFramesById = BTreeMap<String, StackFrame>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceFileSpec {
    pub host_name: String,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLineSpec {
    pub host_name: String,
    pub file_path: String,
    pub lineno: u32,
}

impl SourceLineSpec {
    pub fn is_in_file(&self, host_name: &str, file_path: &str) -> bool {
        self.host_name == host_name && self.file_path == file_path
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileContent {
    pub load_state: DataLoadState,
    /// `None` until the file is loaded.
    pub lines: Option<Vec<String>>,
}

// ============================================================================
// Data Source Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionDigestsResponse {
    pub begin: usize,
    pub end: usize,
    pub num_digests: usize,
    pub execution_digests: Vec<ExecutionDigest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionDataResponse {
    pub begin: usize,
    pub end: usize,
    pub executions: Vec<Execution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExecutionDigestsResponse {
    pub begin: usize,
    pub end: usize,
    pub num_digests: usize,
    pub graph_execution_digests: Vec<GraphExecutionDigest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExecutionDataResponse {
    pub begin: usize,
    pub end: usize,
    pub graph_executions: Vec<GraphExecution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileResponse {
    pub host_name: String,
    pub file_path: String,
    pub lines: Vec<String>,
}

impl SourceFileResponse {
    pub fn file_spec(&self) -> SourceFileSpec {
        SourceFileSpec {
            host_name: self.host_name.clone(),
            file_path: self.file_path.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
