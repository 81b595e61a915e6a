//! Faults raised synchronously by the reducer
//!
//! Every variant corresponds to an action that was rejected without touching
//! the state tree.

/// Errors that can occur while reducing an action
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum StoreError {
    /// Scroll target is negative, fractional or not a finite number
    #[error("attempt to scroll to negative or non-integer {timeline} index ({index})")]
    InvalidScrollIndex { timeline: &'static str, index: f64 },
    /// Scroll target is past the last full viewport
    #[error(
        "attempt to scroll to execution index ({index}), which exceeds maximum allowed index \
         (numExecutions={num_executions}; displayCount={display_count})"
    )]
    ScrollIndexOutOfRange {
        index: usize,
        num_executions: usize,
        display_count: usize,
    },
    /// Focused digest slot is outside the viewport
    #[error("display index ({display_index}) is outside the viewport (displayCount={display_count})")]
    DisplayIndexOutOfRange {
        display_index: usize,
        display_count: usize,
    },
    /// Source file operation references a file missing from the file list
    #[error(
        "cannot find the following file in file list: host_name=\"{host_name}\", \
         file_path=\"{file_path}\""
    )]
    SourceFileNotFound {
        host_name: String,
        file_path: String,
    },
    /// Loaded range is reversed, unaligned or short of records
    #[error("invalid page range [{begin}, {end}) for page size {page_size}: {reason}")]
    InvalidPageRange {
        begin: usize,
        end: usize,
        page_size: usize,
        reason: &'static str,
    },
}
