// src/app/mod.rs

// ---- Standard lib imports ----
use std::sync::Arc;
use std::time::Duration;

// ---- Crates ----
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

// ---- Local modules ----
pub mod debounce;
pub mod detail;
pub mod facets;
pub mod filters;
pub mod list;
pub mod types;
pub mod utils;

pub use debounce::{Debouncer, Ticket};
pub use detail::DetailView;
pub use facets::{FacetOptions, FacetVocabulary};
pub use filters::{FilterField, FilterState};
pub use list::ListView;
pub use types::{BrowseError, Event, FacetResults, LoadStatus};

use crate::catalog::CatalogApi;
use crate::config::FacetFailurePolicy;

// ---- Tunables ----
/// Quiet window for free-text search.
pub const SEARCH_QUIET: Duration = Duration::from_millis(500);
const MAX_EVENTS_PER_POLL: usize = 64;

/// One browsing session.
///
/// Owns every state slot; background work (debounce timers, catalog calls)
/// only talks back through [`Event`]s on the session channel, so nothing here
/// needs a lock. Methods are split across the submodules by concern.
pub struct GameBrowser<C> {
    client: Arc<C>,

    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,

    // list coordinator
    filters: FilterState,
    search_debounce: Debouncer<Event>,
    last_seq: u64,
    list: ListView,

    // startup vocabularies
    facet_policy: FacetFailurePolicy,
    facets: FacetOptions,

    // detail overlay
    detail: DetailView,
}

impl<C: CatalogApi> GameBrowser<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self::with_policy(client, FacetFailurePolicy::default())
    }

    pub fn with_policy(client: Arc<C>, facet_policy: FacetFailurePolicy) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let search_debounce = Debouncer::new(events_tx.clone());
        Self {
            client,
            events_tx,
            events_rx,
            filters: FilterState::default(),
            search_debounce,
            last_seq: 0,
            list: ListView::default(),
            facet_policy,
            facets: FacetOptions::default(),
            detail: DetailView::default(),
        }
    }

    /// Startup: load the four vocabularies and fetch the unfiltered first page.
    pub fn start(&mut self) {
        self.start_with(FilterState::default());
    }

    /// Startup from a prepared filter snapshot (restored or command-line input).
    /// The snapshot is applied without evaluation and fetched exactly once.
    pub fn start_with(&mut self, filters: FilterState) {
        self.filters = filters;
        self.load_facets();
        self.refresh_list();
    }

    // ---- read-only views ----
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    pub fn search_pending(&self) -> bool {
        self.search_debounce.is_pending()
    }

    // ---- event plumbing ----

    /// Route one event to the slot that owns it.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::SearchQuiet { ticket, filters } => self.on_search_quiet(ticket, filters),
            Event::ListArrived { seq, result } => self.on_list_arrived(seq, result),
            Event::FacetsSettled(results) => self.on_facets_settled(results),
            Event::DetailArrived { game_id, result } => self.on_detail_arrived(game_id, result),
        }
    }

    /// Drain whatever is already queued without waiting. Returns events handled.
    pub fn poll_events(&mut self) -> usize {
        let mut drained = 0usize;
        while drained < MAX_EVENTS_PER_POLL {
            match self.events_rx.try_recv() {
                Ok(ev) => {
                    self.handle(ev);
                    drained += 1;
                }
                Err(_) => break,
            }
        }
        drained
    }

    /// Handle events until `window` elapses. Returns how many were handled.
    pub async fn run_for(&mut self, window: Duration) -> usize {
        let deadline = tokio::time::Instant::now() + window;
        let mut handled = 0usize;
        while let Ok(Some(ev)) = tokio::time::timeout_at(deadline, self.events_rx.recv()).await {
            self.handle(ev);
            handled += 1;
        }
        handled
    }

    /// Handle events until `done` holds or `limit` elapses. Returns whether `done` held.
    pub async fn run_until(&mut self, limit: Duration, done: impl Fn(&Self) -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while !done(self) {
            match tokio::time::timeout_at(deadline, self.events_rx.recv()).await {
                Ok(Some(ev)) => self.handle(ev),
                Ok(None) => return false,
                Err(_) => {
                    debug!("run_until: gave up after {limit:?}");
                    return false;
                }
            }
        }
        true
    }
}
