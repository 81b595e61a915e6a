//! Source file list, lazily loaded file contents and the focused line

use debugger_types::{
    DataLoadState, LoadState, SourceFileContent, SourceFileResponse, SourceFileSpec, SourceLineSpec,
};
use serde::Serialize;

use crate::error::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceCodeState {
    pub source_file_list_loaded: LoadState,
    pub source_file_list: Vec<SourceFileSpec>,
    /// Same index space as `source_file_list`; never shrinks.
    pub file_contents: Vec<SourceFileContent>,
    pub focus_line_spec: Option<SourceLineSpec>,
}

impl SourceCodeState {
    pub fn file_index(&self, host_name: &str, file_path: &str) -> Option<usize> {
        self.source_file_list
            .iter()
            .position(|spec| spec.host_name == host_name && spec.file_path == file_path)
    }

    pub fn list_requested(&mut self) {
        self.source_file_list_loaded.loading();
    }

    pub fn list_request_failed(&mut self) {
        self.source_file_list_loaded.failed();
    }

    /// Replaces the list. Existing per-file contents stay at their position.
    pub fn list_loaded(&mut self, source_files: Vec<SourceFileSpec>, now_ms: i64) {
        self.source_file_list_loaded.loaded(now_ms);
        if self.file_contents.len() < source_files.len() {
            self.file_contents
                .resize_with(source_files.len(), SourceFileContent::default);
        }
        self.source_file_list = source_files;
    }

    pub fn file_requested(&mut self, spec: &SourceFileSpec) -> Result<(), StoreError> {
        let index = self.require_file_index(&spec.host_name, &spec.file_path)?;
        self.file_contents[index].load_state = DataLoadState::Loading;
        Ok(())
    }

    pub fn file_loaded(&mut self, response: SourceFileResponse) -> Result<(), StoreError> {
        let index = self.require_file_index(&response.host_name, &response.file_path)?;
        self.file_contents[index] = SourceFileContent {
            load_state: DataLoadState::Loaded,
            lines: Some(response.lines),
        };
        Ok(())
    }

    pub fn focus_line(&mut self, spec: SourceLineSpec) {
        self.focus_line_spec = Some(spec);
    }

    fn require_file_index(&self, host_name: &str, file_path: &str) -> Result<usize, StoreError> {
        self.file_index(host_name, file_path)
            .filter(|&index| index < self.file_contents.len())
            .ok_or_else(|| StoreError::SourceFileNotFound {
                host_name: host_name.to_string(),
                file_path: file_path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::file_spec;

    #[test]
    fn test_list_loaded_preserves_contents_by_position() {
        let mut state = SourceCodeState::default();
        state.list_loaded(vec![file_spec("worker0", "/tmp/main.py")], 1);
        state.file_contents[0] = SourceFileContent {
            load_state: DataLoadState::Loaded,
            lines: Some(vec!["import os".to_string()]),
        };

        state.list_loaded(
            vec![
                file_spec("worker0", "/tmp/main.py"),
                file_spec("worker1", "/tmp/eval.py"),
            ],
            2,
        );

        assert_eq!(state.file_contents.len(), 2);
        assert_eq!(state.file_contents[0].load_state, DataLoadState::Loaded);
        assert_eq!(state.file_contents[1], SourceFileContent::default());
        assert_eq!(state.source_file_list_loaded.last_loaded_time_in_ms, Some(2));
    }

    #[test]
    fn test_shorter_list_keeps_trailing_contents() {
        let mut state = SourceCodeState::default();
        state.list_loaded(
            vec![file_spec("h", "/a.py"), file_spec("h", "/b.py")],
            1,
        );
        state.list_loaded(vec![file_spec("h", "/a.py")], 2);
        assert_eq!(state.source_file_list.len(), 1);
        assert_eq!(state.file_contents.len(), 2);
    }

    #[test]
    fn test_unknown_file_is_rejected_without_mutation() {
        let mut state = SourceCodeState::default();
        state.list_loaded(vec![file_spec("worker0", "/tmp/main.py")], 1);
        let before = state.clone();

        let err = state.file_requested(&file_spec("worker0", "/tmp/other.py")).unwrap_err();
        assert_eq!(
            err,
            StoreError::SourceFileNotFound {
                host_name: "worker0".to_string(),
                file_path: "/tmp/other.py".to_string(),
            }
        );
        assert!(err.to_string().contains("/tmp/other.py"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_file_loaded_records_lines() {
        let mut state = SourceCodeState::default();
        state.list_loaded(vec![file_spec("worker0", "/tmp/main.py")], 1);
        state.file_requested(&file_spec("worker0", "/tmp/main.py")).unwrap();
        assert_eq!(state.file_contents[0].load_state, DataLoadState::Loading);

        state
            .file_loaded(SourceFileResponse {
                host_name: "worker0".to_string(),
                file_path: "/tmp/main.py".to_string(),
                lines: vec!["".to_string(), "import tensorflow as tf".to_string()],
            })
            .unwrap();
        assert_eq!(state.file_contents[0].load_state, DataLoadState::Loaded);
        assert_eq!(state.file_contents[0].lines.as_ref().map(Vec::len), Some(2));
    }
}
