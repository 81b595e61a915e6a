//! Top-level (eager) execution timeline
//!
//! Digests are paginated; full execution records are fetched lazily per index.
//! The scroll cursor is the first visible index of a fixed-width viewport.

use std::collections::BTreeMap;

use debugger_types::{Execution, ExecutionDataResponse, ExecutionDigest, ExecutionDigestsResponse, LoadState};
use serde::Serialize;

use crate::error::StoreError;
use crate::paginated::{check_records_cover, Paginated};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionsState {
    pub num_executions_loaded: LoadState,
    pub digests: Paginated<ExecutionDigest>,
    /// Viewport width in digests.
    pub display_count: usize,
    pub scroll_begin_index: usize,
    pub focus_index: Option<usize>,
    pub execution_data: BTreeMap<usize, Execution>,
}

impl ExecutionsState {
    pub fn new(page_size: usize, display_count: usize) -> Self {
        Self {
            num_executions_loaded: LoadState::default(),
            digests: Paginated::new(page_size),
            display_count,
            scroll_begin_index: 0,
            focus_index: None,
            execution_data: BTreeMap::new(),
        }
    }

    pub fn num_executions(&self) -> usize {
        self.digests.num_items
    }

    /// Largest scroll position that still shows a full viewport.
    pub fn max_scroll_begin_index(&self) -> usize {
        self.num_executions().saturating_sub(self.display_count)
    }

    pub fn num_executions_requested(&mut self) {
        self.num_executions_loaded.loading();
    }

    /// Returns true when this load auto-focused the first execution.
    pub fn num_executions_loaded(&mut self, num_executions: usize, now_ms: i64) -> bool {
        self.num_executions_loaded.loaded(now_ms);
        self.digests.num_items = num_executions;
        if num_executions > 0 && self.focus_index.is_none() {
            self.focus_index = Some(0);
            return true;
        }
        false
    }

    pub fn digests_requested(&mut self) {
        self.digests.request_begin();
    }

    pub fn digests_loaded(
        &mut self,
        response: ExecutionDigestsResponse,
        now_ms: i64,
    ) -> Result<(), StoreError> {
        self.digests.apply_range(
            response.begin,
            response.end,
            response.num_digests,
            response.execution_digests,
            now_ms,
        )
    }

    pub fn scroll_left(&mut self) {
        self.scroll_begin_index = self.scroll_begin_index.saturating_sub(1);
    }

    pub fn scroll_right(&mut self) {
        let next_end = self
            .scroll_begin_index
            .saturating_add(self.display_count)
            .saturating_add(1);
        if next_end <= self.num_executions() {
            self.scroll_begin_index += 1;
        }
    }

    pub fn scroll_to_index(&mut self, index: f64) -> Result<(), StoreError> {
        let index = scroll_index("execution", index)?;
        if index > self.max_scroll_begin_index() {
            return Err(StoreError::ScrollIndexOutOfRange {
                index,
                num_executions: self.num_executions(),
                display_count: self.display_count,
            });
        }
        self.scroll_begin_index = index;
        Ok(())
    }

    /// Puts `execution_index` in the middle of the viewport, clamped at zero.
    pub fn center_on(&mut self, execution_index: usize) {
        self.scroll_begin_index = execution_index.saturating_sub(self.display_count / 2);
    }

    /// Focuses the digest at `display_index` slots into the viewport.
    pub fn focus_digest(&mut self, display_index: usize) -> Result<(), StoreError> {
        let out_of_range = StoreError::DisplayIndexOutOfRange {
            display_index,
            display_count: self.display_count,
        };
        if display_index >= self.display_count {
            return Err(out_of_range);
        }
        let index = self
            .scroll_begin_index
            .checked_add(display_index)
            .ok_or(out_of_range)?;
        self.focus_index = Some(index);
        Ok(())
    }

    pub fn data_loaded(&mut self, response: ExecutionDataResponse) -> Result<(), StoreError> {
        let ExecutionDataResponse {
            begin,
            end,
            executions,
        } = response;
        check_records_cover(begin, end, executions.len()).map_err(|reason| {
            StoreError::InvalidPageRange {
                begin,
                end,
                page_size: self.digests.page_size,
                reason,
            }
        })?;
        for (index, execution) in (begin..end).zip(executions) {
            self.execution_data.insert(index, execution);
        }
        Ok(())
    }
}

/// Validates a UI-supplied scroll target: a finite, non-negative integer.
pub(crate) fn scroll_index(timeline: &'static str, index: f64) -> Result<usize, StoreError> {
    if !index.is_finite() || index < 0.0 || index.fract() != 0.0 {
        return Err(StoreError::InvalidScrollIndex { timeline, index });
    }
    Ok(index as usize)
}
