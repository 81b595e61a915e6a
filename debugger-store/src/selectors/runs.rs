use debugger_types::{DebuggerRunListing, LoadState};

use crate::state::DebuggerState;

pub fn debugger_runs_loaded(state: &DebuggerState) -> &LoadState {
    &state.runs_loaded
}

pub fn debugger_run_listing(state: &DebuggerState) -> &DebuggerRunListing {
    &state.runs
}

pub fn active_run_id(state: &DebuggerState) -> Option<&str> {
    state.active_run_id.as_deref()
}
