// ── Query engine ──
//
// Composes free-text search with product-line selection into a single
// derived list. Pure and synchronous; callers recompute on every input
// change instead of caching.

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uidb_api::{Device, Line};

use crate::index::{DeviceIndex, TextIndex};

/// Inputs to [`query`], owned by the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    /// Empty means "no line filter", never "match nothing".
    pub selected_line_ids: BTreeSet<String>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.selected_line_ids = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Flip one line in or out of the selection.
    pub fn toggle_line(&mut self, line_id: &str) {
        if !self.selected_line_ids.remove(line_id) {
            self.selected_line_ids.insert(line_id.to_owned());
        }
    }

    /// Whether any line filter is active.
    pub fn has_line_filter(&self) -> bool {
        !self.selected_line_ids.is_empty()
    }
}

/// Filter `devices` by search term and line selection.
///
/// Result order is always the order of `devices`, never index relevance,
/// and a device matching on several fields appears once. A blank term and
/// an empty selection are both identity filters.
pub fn query<I: TextIndex>(
    devices: &[Arc<Device>],
    index: &DeviceIndex<I>,
    search_term: &str,
    selected_line_ids: &BTreeSet<String>,
) -> Vec<Arc<Device>> {
    let term = search_term.trim();
    let matched: Option<HashSet<String>> = if term.is_empty() {
        None
    } else {
        Some(index.search(term).into_iter().collect())
    };

    devices
        .iter()
        .filter(|d| matched.as_ref().is_none_or(|ids| ids.contains(&d.id)))
        .filter(|d| selected_line_ids.is_empty() || selected_line_ids.contains(&d.line.id))
        .cloned()
        .collect()
}

/// Keep the first item for each key, preserving order.
pub fn dedupe_by<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key_fn(item)))
        .collect()
}

/// One entry per product name, first SKU wins. Feeds autocomplete-style
/// lists where several SKUs of the same product would be noise.
pub fn product_names(devices: &[Arc<Device>]) -> Vec<Arc<Device>> {
    dedupe_by(devices.iter().cloned(), |d| d.product.name.clone())
}

/// Distinct product lines present in the catalog, sorted by display name
/// (case-insensitive), ties broken by id. Devices without a line id are
/// skipped.
pub fn product_lines(devices: &[Arc<Device>]) -> Vec<Line> {
    let mut lines = dedupe_by(
        devices
            .iter()
            .filter(|d| !d.line.id.is_empty())
            .map(|d| d.line.clone()),
        |line| line.id.clone(),
    );
    lines.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    lines
}
