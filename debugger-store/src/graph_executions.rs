//! Intra-graph (compiled function) tensor executions
//!
//! Digests follow the shared pagination engine. Full records are tracked with
//! an explicit set of in-flight pages and a per-page count that only grows the
//! first time an index is filled.

use std::collections::{BTreeMap, BTreeSet};

use debugger_types::{
    GraphExecution, GraphExecutionDataResponse, GraphExecutionDigest, GraphExecutionDigestsResponse,
    LoadState,
};
use serde::Serialize;

use crate::error::StoreError;
use crate::executions::scroll_index;
use crate::paginated::{check_records_cover, Paginated};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphExecutionsState {
    pub num_executions_loaded: LoadState,
    pub digests: Paginated<GraphExecutionDigest>,
    pub display_count: usize,
    pub scroll_begin_index: usize,
    pub focus_index: Option<usize>,
    pub data_loading_pages: BTreeSet<usize>,
    pub data_page_loaded_sizes: BTreeMap<usize, usize>,
    pub data: BTreeMap<usize, GraphExecution>,
}

impl GraphExecutionsState {
    pub fn new(page_size: usize, display_count: usize) -> Self {
        Self {
            num_executions_loaded: LoadState::default(),
            digests: Paginated::new(page_size),
            display_count,
            scroll_begin_index: 0,
            focus_index: None,
            data_loading_pages: BTreeSet::new(),
            data_page_loaded_sizes: BTreeMap::new(),
            data: BTreeMap::new(),
        }
    }

    pub fn num_executions(&self) -> usize {
        self.digests.num_items
    }

    pub fn page_size(&self) -> usize {
        self.digests.page_size
    }

    pub fn num_executions_requested(&mut self) {
        self.num_executions_loaded.loading();
    }

    pub fn num_executions_loaded(&mut self, num_executions: usize, now_ms: i64) {
        self.num_executions_loaded.loaded(now_ms);
        self.digests.num_items = num_executions;
        if num_executions > 0 && self.focus_index.is_none() {
            self.focus_index = Some(0);
        }
    }

    pub fn digests_requested(&mut self) {
        self.digests.request_begin();
    }

    pub fn digests_loaded(
        &mut self,
        response: GraphExecutionDigestsResponse,
        now_ms: i64,
    ) -> Result<(), StoreError> {
        self.digests.apply_range(
            response.begin,
            response.end,
            response.num_digests,
            response.graph_execution_digests,
            now_ms,
        )
    }

    pub fn data_requested(&mut self, page_index: usize) {
        self.data_loading_pages.insert(page_index);
    }

    pub fn data_loaded(&mut self, response: GraphExecutionDataResponse) -> Result<(), StoreError> {
        let GraphExecutionDataResponse {
            begin,
            end,
            graph_executions,
        } = response;
        let page_size = self.page_size();
        check_records_cover(begin, end, graph_executions.len()).map_err(|reason| {
            StoreError::InvalidPageRange {
                begin,
                end,
                page_size,
                reason,
            }
        })?;

        for (index, execution) in (begin..end).zip(graph_executions) {
            let page = self.digests.page_of(index);
            self.data_loading_pages.remove(&page);
            let loaded = self.data_page_loaded_sizes.entry(page).or_insert(0);
            if self.data.insert(index, execution).is_none() {
                *loaded += 1;
            }
        }
        tracing::debug!(begin, end, "graph execution data merged");
        Ok(())
    }

    /// Only a non-negative integer is required; there is no upper bound.
    pub fn scroll_to_index(&mut self, index: f64) -> Result<(), StoreError> {
        self.scroll_begin_index = scroll_index("graph-execution", index)?;
        Ok(())
    }

    pub fn focus(&mut self, index: usize) {
        self.focus_index = Some(index);
    }
}
