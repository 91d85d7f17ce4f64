use std::sync::Arc;

use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::loader::DataPaths;
use crate::data::model::{Dataset, FieldValue, TransactionRecord};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Built once per load; replaced wholesale, never edited.
    pub dataset: Arc<Dataset>,

    /// Where `dataset` was read from.
    pub source: DataPaths,

    /// Current picker values.
    pub selection: FilterSelection,

    /// Rows passing `selection`, newest first (cached).
    pub visible_indices: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, source: DataPaths) -> Self {
        let selection = FilterSelection::default();
        let visible_indices = filtered_indices(&dataset.table, &selection);
        Self {
            dataset,
            source,
            selection,
            visible_indices,
            status_message: None,
        }
    }

    /// Swap in a freshly built dataset. The old selection may name values
    /// that no longer exist, so it is cleared.
    pub fn set_dataset(&mut self, dataset: Dataset, source: DataPaths) {
        self.dataset = Arc::new(dataset);
        self.source = source;
        self.selection = FilterSelection::default();
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset.table, &self.selection);
    }

    pub fn set_zip(&mut self, zip: Option<FieldValue>) {
        if self.selection.zip != zip {
            self.selection.zip = zip;
            self.refilter();
        }
    }

    pub fn set_month(&mut self, month: Option<u32>) {
        if self.selection.month != month {
            self.selection.month = month;
            self.refilter();
        }
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        if self.selection.year != year {
            self.selection.year = year;
            self.refilter();
        }
    }

    pub fn clear_filters(&mut self) {
        if !self.selection.is_unset() {
            self.selection = FilterSelection::default();
            self.refilter();
        }
    }

    /// Short description of where the dataset came from, for the top bar.
    pub fn source_label(&self) -> String {
        let file_name = |p: &std::path::Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        };
        let dir = self
            .source
            .transactions
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| ".".to_string());
        format!(
            "{dir}: {} + {}",
            file_name(&self.source.customers),
            file_name(&self.source.transactions)
        )
    }

    pub fn visible_record(&self, row: usize) -> Option<&TransactionRecord> {
        self.visible_indices
            .get(row)
            .map(|&i| &self.dataset.table.records[i])
    }
}
