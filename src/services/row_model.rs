use rayon::prelude::*;
use tracing::debug;

use crate::domain::record::{Dataset, Record};
use crate::domain::sorting::SortingState;

/// Free-text filter applied to every cell. Empty means no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalFilter {
    raw: String,
    needle: String,
}

impl GlobalFilter {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    /// Every row matching `self` also matches `previous`.
    pub fn narrows(&self, previous: &GlobalFilter) -> bool {
        previous.is_active() && self.needle.contains(previous.needle.as_str())
    }
}

/// Dataset positions in view order, plus the inputs they were derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowModel {
    rows: Vec<u32>,
    total: usize,
    filter: GlobalFilter,
    sorting: SortingState,
}

fn sort_rows(rows: &mut [u32], dataset: &Dataset, sorting: &SortingState) {
    if sorting.is_empty() {
        return;
    }
    let records = dataset.records();
    rows.par_sort_by(|&a, &b| sorting.compare_records(&records[a as usize], &records[b as usize]));
}

impl RowModel {
    /// Filters the whole dataset, then stable-sorts the survivors.
    pub fn build(dataset: &Dataset, filter: &GlobalFilter, sorting: &SortingState) -> Self {
        let total = dataset.len();
        let mut rows: Vec<u32> = if filter.is_active() {
            (0..total as u32)
                .into_par_iter()
                .filter(|&i| dataset.matches(i as usize, filter.needle()))
                .collect()
        } else {
            (0..total as u32).collect()
        };
        sort_rows(&mut rows, dataset, sorting);

        debug!(
            total = total,
            matched = rows.len(),
            filter = %filter.raw(),
            sort_keys = sorting.keys().len(),
            "Rebuilt row model"
        );
        Self {
            rows,
            total,
            filter: filter.clone(),
            sorting: sorting.clone(),
        }
    }

    /// Derives the next model from this one when possible: a narrower filter
    /// only re-tests the current rows, and a new sort with the same filter only
    /// reorders them.
    pub fn refine(&self, dataset: &Dataset, filter: &GlobalFilter, sorting: &SortingState) -> Self {
        if self.total != dataset.len() {
            return Self::build(dataset, filter, sorting);
        }

        if self.filter == *filter && self.sorting == *sorting {
            return self.clone();
        }

        if self.filter == *filter {
            // Back to dataset order first so ties keep their original position
            let mut rows = self.rows.clone();
            rows.par_sort_unstable();
            sort_rows(&mut rows, dataset, sorting);
            debug!(matched = rows.len(), "Re-sorted row model");
            return Self {
                rows,
                total: self.total,
                filter: filter.clone(),
                sorting: sorting.clone(),
            };
        }

        if self.sorting == *sorting && filter.narrows(&self.filter) {
            let rows: Vec<u32> = self
                .rows
                .par_iter()
                .copied()
                .filter(|&i| dataset.matches(i as usize, filter.needle()))
                .collect();
            debug!(
                before = self.rows.len(),
                after = rows.len(),
                filter = %filter.raw(),
                "Narrowed row model"
            );
            return Self {
                rows,
                total: self.total,
                filter: filter.clone(),
                sorting: sorting.clone(),
            };
        }

        Self::build(dataset, filter, sorting)
    }

    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Size of the dataset before filtering.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn filter(&self) -> &GlobalFilter {
        &self.filter
    }

    pub fn sorting(&self) -> &SortingState {
        &self.sorting
    }

    pub fn record_at<'a>(&self, dataset: &'a Dataset, position: usize) -> Option<&'a Record> {
        self.rows
            .get(position)
            .and_then(|&index| dataset.get(index as usize))
    }
}
