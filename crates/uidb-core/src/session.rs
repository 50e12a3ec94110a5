// ── Search session ──
//
// Drives a `CatalogContext` from interactive input. Search-term keystrokes
// go through a debouncer; line-selection changes apply at once. Every
// recomputation is published on a watch channel.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::trace;
use uidb_api::Device;

use crate::catalog::CatalogContext;
use crate::debounce::Debouncer;
use crate::error::CoreError;
use crate::loader::LoadOutcome;

/// Delay between the last keystroke and the search recomputation.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(100);

type Results = Arc<Vec<Arc<Device>>>;

pub struct SearchSession {
    context: CatalogContext,
    debouncer: Debouncer<String>,
    results: watch::Sender<Results>,
}

impl SearchSession {
    pub fn new(context: CatalogContext) -> Self {
        Self::with_delay(context, SEARCH_DEBOUNCE)
    }

    pub fn with_delay(context: CatalogContext, delay: Duration) -> Self {
        let (results, _) = watch::channel(context.results());
        Self {
            context,
            debouncer: Debouncer::new(delay),
            results,
        }
    }

    pub fn context(&self) -> &CatalogContext {
        &self.context
    }

    /// Feed the outcome of a load into the context.
    pub fn apply_load(&mut self, outcome: Result<LoadOutcome, CoreError>) {
        self.context.apply_load(outcome);
        self.publish();
    }

    /// Record a keystroke. The query runs once typing pauses.
    pub fn type_search_term(&mut self, term: impl Into<String>) {
        self.debouncer.push(term.into());
    }

    /// Whether a typed term is still waiting for its delay.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Wait for the pending search term to fire and apply it.
    ///
    /// Returns `false` when nothing was pending.
    pub async fn settle(&mut self) -> bool {
        let Some(term) = self.debouncer.settled().await else {
            return false;
        };
        trace!(term = %term, "search term settled");
        self.context.set_search_term(term);
        self.publish();
        true
    }

    pub fn set_selected_lines(&mut self, lines: BTreeSet<String>) {
        self.context.set_selected_lines(lines);
        self.publish();
    }

    pub fn toggle_line(&mut self, line_id: &str) {
        self.context.toggle_line(line_id);
        self.publish();
    }

    /// Subscribe to result snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Results> {
        self.results.subscribe()
    }

    /// Result snapshots as a `Stream`, starting with the current one.
    pub fn results_stream(&self) -> WatchStream<Results> {
        WatchStream::new(self.subscribe())
    }

    fn publish(&self) {
        self.results.send_replace(self.context.results());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::loader::BUNDLED_CATALOG;
    use chrono::Utc;
    use tokio_stream::StreamExt;
    use uidb_api::parse_catalog;

    fn session() -> SearchSession {
        let catalog = parse_catalog(BUNDLED_CATALOG).unwrap();
        let outcome = LoadOutcome {
            devices: catalog.devices,
            using_fallback: true,
            version: catalog.version,
            loaded_at: Utc::now(),
        };
        SearchSession::new(CatalogContext::ready(Catalog::from_outcome(outcome)))
    }

    #[tokio::test(start_paused = true)]
    async fn keystroke_burst_recomputes_once() {
        let mut session = session();
        let before = session.context().generation();

        session.type_search_term("g");
        session.type_search_term("g4");
        session.type_search_term("g4 bul");
        assert!(session.is_pending());
        assert_eq!(session.context().generation(), before);

        assert!(session.settle().await);
        assert_eq!(session.context().generation(), before + 1);
        assert_eq!(session.context().query_state().search_term, "g4 bul");

        let results = session.context().results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.name, "G4 Bullet");
    }

    #[tokio::test(start_paused = true)]
    async fn settle_without_input_is_a_no_op() {
        let mut session = session();
        assert!(!session.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn line_changes_publish_immediately() {
        let mut session = session();
        let mut rx = session.subscribe();
        let all = rx.borrow_and_update().len();

        session.toggle_line("unifi-access");
        assert!(rx.has_changed().unwrap());
        let filtered = rx.borrow_and_update().clone();
        assert!(filtered.len() < all);
        assert!(filtered.iter().all(|d| d.line.id == "unifi-access"));
    }

    #[tokio::test(start_paused = true)]
    async fn stream_yields_current_then_settled_results() {
        let mut session = session();
        let mut stream = session.results_stream();
        let initial = stream.next().await.unwrap();

        session.type_search_term("flex");
        session.settle().await;
        let next = stream.next().await.unwrap();
        assert!(next.len() < initial.len());
        assert!(next.iter().all(|d| d.product.name.contains("Flex")));
    }
}
