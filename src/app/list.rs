// src/app/list.rs: filter-driven list fetch coordinator
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::debounce::Ticket;
use super::filters::{FilterField, FilterState};
use super::types::{BrowseError, Event, LoadStatus};
use super::SEARCH_QUIET;
use crate::catalog::{CatalogApi, CatalogResult, GamePage, GameQuery, GameSummary};

/// What the game grid shows.
#[derive(Clone, Debug)]
pub struct ListView {
    pub status: LoadStatus,
    pub games: Vec<GameSummary>,
    pub error: Option<String>,
    /// Sequence number of the newest dispatched request (0 = none yet).
    pub latest_seq: u64,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            games: Vec::new(),
            error: None,
            latest_seq: 0,
        }
    }
}

impl ListView {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

impl<C: CatalogApi> super::GameBrowser<C> {
    /// Replace one filter field and evaluate it exactly once: free text with a
    /// value waits for the quiet window, everything else fetches now.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters = self.filters.with(field, value);

        if !field.is_facet() && !self.filters.search.is_empty() {
            let snapshot = self.filters.clone();
            self.search_debounce.schedule(SEARCH_QUIET, move |ticket| Event::SearchQuiet {
                ticket,
                filters: snapshot,
            });
            debug!("search `{}` debounced", self.filters.search);
        } else {
            self.refresh_list();
        }
    }

    /// Enter key / search button: skip the quiet window.
    pub fn search_now(&mut self) {
        self.refresh_list();
    }

    /// Cancel any pending debounced search and fetch the current filters.
    pub fn refresh_list(&mut self) {
        if self.search_debounce.cancel_pending() {
            debug!("pending debounced search cancelled");
        }
        let snapshot = self.filters.clone();
        self.dispatch_list(snapshot);
    }

    pub(crate) fn on_search_quiet(&mut self, ticket: Ticket, filters: FilterState) {
        if !self.search_debounce.claim(ticket) {
            debug!("dropping superseded debounced search {ticket:?}");
            return;
        }
        self.dispatch_list(filters);
    }

    fn dispatch_list(&mut self, filters: FilterState) {
        self.last_seq += 1;
        let seq = self.last_seq;
        self.list.latest_seq = seq;
        self.list.status = LoadStatus::Loading;

        let query = GameQuery::from_filters(&filters);
        debug!("list #{seq}: {}", query.to_query_string());

        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_games(&query).await;
            let _ = tx.send(Event::ListArrived { seq, result });
        });
    }

    pub(crate) fn on_list_arrived(&mut self, seq: u64, result: CatalogResult<GamePage>) {
        if seq != self.list.latest_seq {
            debug!(
                "discarding stale list response #{seq} (latest #{})",
                self.list.latest_seq
            );
            return;
        }

        match result {
            Ok(page) => {
                if page.results.is_empty() {
                    info!("No games matched the current filters");
                }
                self.list.games = page.results;
                self.list.error = None;
                self.list.status = LoadStatus::Loaded;
            }
            Err(e) => {
                warn!("list #{seq} failed: {e}");
                self.list.games.clear();
                self.list.error = Some(BrowseError::ListFetch(e).to_string());
                self.list.status = LoadStatus::Failed;
            }
        }
    }
}
