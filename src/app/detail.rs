// src/app/detail.rs
use std::sync::Arc;

use tracing::{debug, warn};

use super::types::{BrowseError, Event, LoadStatus};
use crate::catalog::{CatalogApi, CatalogResult, GameDetail};

/// Detail overlay slot, keyed by the current selection.
#[derive(Clone, Debug)]
pub struct DetailView {
    pub selected: Option<u64>,
    pub status: LoadStatus,
    pub game: Option<GameDetail>,
    pub error: Option<String>,
}

impl Default for DetailView {
    fn default() -> Self {
        Self {
            selected: None,
            status: LoadStatus::Idle,
            game: None,
            error: None,
        }
    }
}

impl<C: CatalogApi> super::GameBrowser<C> {
    /// Open the overlay for `game_id` and fetch metadata + trailers together.
    /// Any in-flight fetch for a previous selection keeps running but can no
    /// longer land.
    pub fn select_game(&mut self, game_id: u64) {
        self.detail = DetailView {
            selected: Some(game_id),
            status: LoadStatus::Loading,
            game: None,
            error: None,
        };

        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = tokio::try_join!(
                client.get_game_detail(game_id),
                client.get_game_trailers(game_id)
            )
            .map(|(record, trailers)| GameDetail { record, trailers });
            let _ = tx.send(Event::DetailArrived { game_id, result });
        });
    }

    pub fn close_detail(&mut self) {
        self.detail = DetailView::default();
    }

    pub(crate) fn on_detail_arrived(&mut self, game_id: u64, result: CatalogResult<GameDetail>) {
        if self.detail.selected != Some(game_id) {
            debug!("detail for game {game_id} arrived after its overlay closed");
            return;
        }
        match result {
            Ok(game) => {
                self.detail.game = Some(game);
                self.detail.error = None;
                self.detail.status = LoadStatus::Loaded;
            }
            Err(e) => {
                warn!("detail for game {game_id} failed: {e}");
                self.detail.game = None;
                self.detail.error = Some(BrowseError::DetailFetch(e).to_string());
                self.detail.status = LoadStatus::Failed;
            }
        }
    }
}
