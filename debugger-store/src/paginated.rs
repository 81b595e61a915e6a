//! Sparse, page-oriented cache of a long ordered sequence
//!
//! Pages may arrive in any order and may be re-fetched with more entries
//! (a partially filled last page grows as the debugged program runs). All
//! merges are keyed on absolute index, so the result does not depend on the
//! arrival order of responses.

use std::collections::BTreeMap;

use debugger_types::LoadState;
use serde::Serialize;

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub load: LoadState,
    /// Total count reported by the backend; superseded by every response.
    pub num_items: usize,
    pub page_size: usize,
    /// Page index -> number of entries present for that page.
    pub page_loaded_sizes: BTreeMap<usize, usize>,
    /// Absolute index -> record. Entries are overwritten, never removed.
    pub items: BTreeMap<usize, T>,
}

impl<T> Paginated<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            load: LoadState::default(),
            num_items: 0,
            page_size,
            page_loaded_sizes: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    pub fn request_begin(&mut self) {
        self.load.loading();
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(&index)
    }

    pub fn page_of(&self, index: usize) -> usize {
        index.checked_div(self.page_size).unwrap_or(0)
    }

    /// Number of entries present for `page`, zero when never loaded.
    pub fn page_loaded_size(&self, page: usize) -> usize {
        self.page_loaded_sizes.get(&page).copied().unwrap_or(0)
    }

    /// Optional records for `count` consecutive indices starting at `begin`.
    pub fn window(&self, begin: usize, count: usize) -> Vec<Option<&T>> {
        (begin..begin.saturating_add(count)).map(|i| self.items.get(&i)).collect()
    }

    /// Checks a response range without mutating. Ranges wider than one
    /// page are accepted as long as they start on a page boundary.
    pub fn check_range(&self, begin: usize, end: usize, num_records: usize) -> Result<(), StoreError> {
        let invalid = |reason| StoreError::InvalidPageRange {
            begin,
            end,
            page_size: self.page_size,
            reason,
        };
        check_records_cover(begin, end, num_records).map_err(invalid)?;
        if end == begin {
            return Ok(());
        }
        if self.page_size == 0 {
            return Err(invalid("page size is zero"));
        }
        if begin % self.page_size != 0 {
            return Err(invalid("begin is not aligned to a page boundary"));
        }
        Ok(())
    }

    /// Merges the records for `[begin, end)` and records the size of the
    /// page at `begin`.
    ///
    /// A range wider than one page is not split: every record is written but
    /// only the first page's size is updated, capped at `page_size`. Records
    /// beyond `end - begin` are ignored.
    pub fn apply_range(
        &mut self,
        begin: usize,
        end: usize,
        total_count: usize,
        records: Vec<T>,
        now_ms: i64,
    ) -> Result<(), StoreError> {
        self.check_range(begin, end, records.len())?;

        self.num_items = total_count;
        for (index, record) in (begin..end).zip(records) {
            self.items.insert(index, record);
        }
        if end > begin {
            let page = begin / self.page_size;
            let size = self.page_loaded_sizes.entry(page).or_insert(0);
            // Entries are never deleted, so a shorter re-fetch cannot shrink the page.
            *size = (*size).max((end - begin).min(self.page_size));
            tracing::debug!(page, loaded = *size, total_count, "page merged");
        }
        self.load.loaded(now_ms);
        Ok(())
    }
}

/// Shared range check for responses that carry one record per index.
pub(crate) fn check_records_cover(
    begin: usize,
    end: usize,
    num_records: usize,
) -> Result<(), &'static str> {
    if end < begin {
        return Err("end precedes begin");
    }
    if num_records < end - begin {
        return Err("fewer records than indices in range");
    }
    Ok(())
}
