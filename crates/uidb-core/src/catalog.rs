// ── Catalog context ──
//
// The single owned state object behind every view: the loaded catalog, its
// derived index, the current query inputs and the last computed result list.
// All mutation goes through setters that recompute synchronously, so a new
// search term is always reflected by the next `results()` call.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uidb_api::{Device, Line};

use crate::error::CoreError;
use crate::index::DeviceIndex;
use crate::loader::LoadOutcome;
use crate::navigator::{Neighbors, neighbors};
use crate::query::{QueryState, product_lines, product_names, query};

// ── Catalog ──────────────────────────────────────────────────────────

/// An immutable, indexed catalog snapshot.
#[derive(Debug, Clone)]
pub struct Catalog {
    devices: Arc<Vec<Arc<Device>>>,
    index: Arc<DeviceIndex>,
    version: String,
    using_fallback: bool,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Index a load outcome.
    pub fn from_outcome(outcome: LoadOutcome) -> Self {
        let devices: Vec<Arc<Device>> = outcome.devices.into_iter().map(Arc::new).collect();
        let index = DeviceIndex::build(&devices);
        debug!(
            devices = devices.len(),
            distinct = index.len(),
            "catalog indexed"
        );
        Self {
            devices: Arc::new(devices),
            index: Arc::new(index),
            version: outcome.version,
            using_fallback: outcome.using_fallback,
            loaded_at: outcome.loaded_at,
        }
    }

    /// All devices in load order.
    pub fn devices(&self) -> &[Arc<Device>] {
        &self.devices
    }

    pub fn index(&self) -> &DeviceIndex {
        &self.index
    }

    pub fn device(&self, id: &str) -> Option<Arc<Device>> {
        self.index.lookup(id)
    }

    /// Like [`device`](Self::device) but a miss is an error.
    pub fn require(&self, id: &str) -> Result<Arc<Device>, CoreError> {
        self.device(id).ok_or_else(|| CoreError::DeviceNotFound {
            identifier: id.to_owned(),
        })
    }

    pub fn neighbors(&self, id: &str) -> Neighbors {
        neighbors(&self.devices, id)
    }

    pub fn query(&self, state: &QueryState) -> Vec<Arc<Device>> {
        query(
            &self.devices,
            &*self.index,
            &state.search_term,
            &state.selected_line_ids,
        )
    }

    pub fn product_lines(&self) -> Vec<Line> {
        product_lines(&self.devices)
    }

    pub fn product_names(&self) -> Vec<Arc<Device>> {
        product_names(&self.devices)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn using_fallback(&self) -> bool {
        self.using_fallback
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

// ── Load state ───────────────────────────────────────────────────────

/// Lifecycle of the catalog within a session.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Catalog),
    Failed(String),
}

/// What the detail view for one id should render.
#[derive(Debug, Clone)]
pub enum DetailView {
    Loading,
    Failed(String),
    NotFound,
    Found {
        device: Arc<Device>,
        neighbors: Neighbors,
    },
}

// ── Context ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
    state: LoadState,
    query: QueryState,
    results: Arc<Vec<Arc<Device>>>,
    /// Bumped on every recomputation.
    generation: u64,
}

impl CatalogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with the catalog already loaded.
    pub fn ready(catalog: Catalog) -> Self {
        let mut ctx = Self::new();
        ctx.state = LoadState::Ready(catalog);
        ctx.recompute();
        ctx
    }

    /// Record the outcome of a load.
    pub fn apply_load(&mut self, outcome: Result<LoadOutcome, CoreError>) {
        self.state = match outcome {
            Ok(outcome) => LoadState::Ready(Catalog::from_outcome(outcome)),
            Err(e) => LoadState::Failed(e.to_string()),
        };
        self.recompute();
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            LoadState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn query_state(&self) -> &QueryState {
        &self.query
    }

    // ── Setters ──────────────────────────────────────────────────────

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.recompute();
    }

    pub fn set_selected_lines(&mut self, lines: BTreeSet<String>) {
        self.query.selected_line_ids = lines;
        self.recompute();
    }

    pub fn toggle_line(&mut self, line_id: &str) {
        self.query.toggle_line(line_id);
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.query = QueryState::default();
        self.recompute();
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Devices matching the current query. Empty while loading or failed.
    pub fn results(&self) -> Arc<Vec<Arc<Device>>> {
        Arc::clone(&self.results)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolve the detail view for `id`.
    pub fn detail(&self, id: &str) -> DetailView {
        match &self.state {
            LoadState::Loading => DetailView::Loading,
            LoadState::Failed(reason) => DetailView::Failed(reason.clone()),
            LoadState::Ready(catalog) => match catalog.device(id) {
                Some(device) => DetailView::Found {
                    device,
                    neighbors: catalog.neighbors(id),
                },
                None => DetailView::NotFound,
            },
        }
    }

    fn recompute(&mut self) {
        let results = match &self.state {
            LoadState::Ready(catalog) => catalog.query(&self.query),
            LoadState::Loading | LoadState::Failed(_) => Vec::new(),
        };
        self.results = Arc::new(results);
        self.generation += 1;
    }
}
