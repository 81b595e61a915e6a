use debugger_types::{LoadState, SourceFileContent, SourceFileSpec, SourceLineSpec};

use crate::state::DebuggerState;

pub fn source_file_list_loaded(state: &DebuggerState) -> &LoadState {
    &state.source_code.source_file_list_loaded
}

pub fn source_file_list(state: &DebuggerState) -> &[SourceFileSpec] {
    &state.source_code.source_file_list
}

pub fn focused_source_line_spec(state: &DebuggerState) -> Option<&SourceLineSpec> {
    state.source_code.focus_line_spec.as_ref()
}

/// Position of the focused line's file in the source file list.
pub fn focused_source_file_index(state: &DebuggerState) -> Option<usize> {
    let spec = state.source_code.focus_line_spec.as_ref()?;
    state.source_code.file_index(&spec.host_name, &spec.file_path)
}

pub fn focused_source_file_content(state: &DebuggerState) -> Option<&SourceFileContent> {
    let index = focused_source_file_index(state)?;
    state.source_code.file_contents.get(index)
}

pub fn stick_to_bottommost_frame_in_focused_file(state: &DebuggerState) -> bool {
    state.stick_to_bottommost_frame_in_focused_file
}
