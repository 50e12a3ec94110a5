//! Catalog data layer between `uidb-api` and UI consumers (CLI).
//!
//! This crate owns everything that turns the raw device feed into something
//! browsable:
//!
//! - **[`Loader`]**: one fetch of the remote catalog, falling back to the
//!   snapshot bundled at build time. Failures never escape as fatal unless
//!   no data exists at all.
//!
//! - **[`DeviceIndex`]**: id-keyed lookup plus a prefix-tokenized text
//!   index over product name, short names and product-line name. The text
//!   index sits behind the [`TextIndex`] trait.
//!
//! - **[`query()`]**: composes free-text search and product-line selection
//!   into one order-preserving result list.
//!
//! - **[`neighbors()`]**: previous/next traversal over the unfiltered,
//!   load-ordered catalog.
//!
//! - **[`CatalogContext`]** / **[`SearchSession`]**: the single owned
//!   state object the UI drives through setters, with debounced search-term
//!   updates.
//!
//! - **[`Preferences`]**: best-effort storage of small UI choices.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod highlight;
pub mod index;
pub mod loader;
pub mod navigator;
pub mod preferences;
pub mod query;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{Catalog, CatalogContext, DetailView, LoadState};
pub use config::CatalogConfig;
pub use debounce::Debouncer;
pub use error::CoreError;
pub use highlight::{Segment, highlight};
pub use index::{DeviceIndex, PrefixIndex, SearchField, SearchRecord, TextIndex};
pub use loader::{BUNDLED_CATALOG, CatalogFetcher, Fallback, LoadOutcome, Loader};
pub use navigator::{Neighbors, neighbors};
pub use preferences::{
    MemoryBackend, PreferenceBackend, PreferenceError, Preferences, ViewMode,
};
pub use query::{QueryState, dedupe_by, product_lines, product_names, query};
pub use session::{SEARCH_DEBOUNCE, SearchSession};

// Feed types are part of this crate's public surface.
pub use uidb_api::{
    CatalogResponse, DEFAULT_IMAGE_SIZE, Device, Images, Line, NetworkAttributes, Power, Product,
    UnifiAttributes,
};
