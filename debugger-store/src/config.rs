use serde::{Deserialize, Serialize};

pub const DEFAULT_EXECUTION_PAGE_SIZE: usize = 100;
pub const DEFAULT_EXECUTION_DISPLAY_COUNT: usize = 50;
pub const DEFAULT_GRAPH_EXECUTION_PAGE_SIZE: usize = 200;
pub const DEFAULT_GRAPH_EXECUTION_DISPLAY_COUNT: usize = 100;

/// Per-timeline constants used to build an empty [`crate::DebuggerState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Bulk-fetch width of the top-level execution digests.
    pub execution_page_size: usize,
    /// Number of top-level digests visible at once.
    pub execution_display_count: usize,
    pub graph_execution_page_size: usize,
    pub graph_execution_display_count: usize,
    /// Initial value of the stack-trace auto-follow mode.
    pub stick_to_bottommost_frame_in_focused_file: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            execution_page_size: DEFAULT_EXECUTION_PAGE_SIZE,
            execution_display_count: DEFAULT_EXECUTION_DISPLAY_COUNT,
            graph_execution_page_size: DEFAULT_GRAPH_EXECUTION_PAGE_SIZE,
            graph_execution_display_count: DEFAULT_GRAPH_EXECUTION_DISPLAY_COUNT,
            stick_to_bottommost_frame_in_focused_file: false,
        }
    }
}
