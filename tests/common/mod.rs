//! Scripted in-memory catalog shared by the session tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gamedeck::catalog::{
    CatalogApi, CatalogError, CatalogResult, FacetEntry, FacetKind, GamePage, GameQuery,
    GameRecord, GameSummary, Named, Trailer,
};

/// Scripted reply for one `list_games` call.
#[derive(Clone, Copy, Debug)]
pub enum ListReply {
    /// Answer with one game named after the request's search text.
    Echo(Duration),
    Fail(Duration),
}

#[derive(Default)]
struct MockState {
    list_calls: Vec<GameQuery>,
    list_script: VecDeque<ListReply>,
    facet_calls: Vec<FacetKind>,
    facet_failures: HashSet<FacetKind>,
    detail_calls: Vec<u64>,
    trailer_calls: Vec<u64>,
    detail_fails: bool,
    trailers_fail: bool,
    detail_delay: Duration,
}

#[derive(Clone, Default)]
pub struct MockCatalog {
    inner: Arc<Mutex<MockState>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue replies for the next list calls, in dispatch order. Unscripted
    /// calls echo immediately.
    pub fn script_list(&self, replies: impl IntoIterator<Item = ListReply>) {
        self.inner.lock().unwrap().list_script.extend(replies);
    }

    pub fn fail_facet(&self, kind: FacetKind) {
        self.inner.lock().unwrap().facet_failures.insert(kind);
    }

    pub fn heal_facets(&self) {
        self.inner.lock().unwrap().facet_failures.clear();
    }

    pub fn fail_detail(&self) {
        self.inner.lock().unwrap().detail_fails = true;
    }

    pub fn fail_trailers(&self) {
        self.inner.lock().unwrap().trailers_fail = true;
    }

    pub fn delay_detail(&self, d: Duration) {
        self.inner.lock().unwrap().detail_delay = d;
    }

    pub fn list_calls(&self) -> Vec<GameQuery> {
        self.inner.lock().unwrap().list_calls.clone()
    }

    pub fn facet_calls(&self) -> Vec<FacetKind> {
        self.inner.lock().unwrap().facet_calls.clone()
    }

    pub fn detail_calls(&self) -> (Vec<u64>, Vec<u64>) {
        let s = self.inner.lock().unwrap();
        (s.detail_calls.clone(), s.trailer_calls.clone())
    }
}

/// Game whose name is the search text that produced it ("*" for no search).
pub fn echo_page(query: &GameQuery) -> GamePage {
    let name = query.search.clone().unwrap_or_else(|| "*".to_string());
    GamePage {
        count: Some(1),
        results: vec![GameSummary {
            id: 1,
            name,
            background_image: None,
            release_date: Some("2017-03-03".into()),
            metacritic_score: Some(97),
        }],
        ..GamePage::default()
    }
}

pub fn facet_entries(kind: FacetKind) -> Vec<FacetEntry> {
    vec![
        FacetEntry {
            id: 4,
            name: format!("{} #4", kind.as_str()),
        },
        FacetEntry {
            id: 7,
            name: format!("{} #7", kind.as_str()),
        },
    ]
}

impl CatalogApi for MockCatalog {
    fn list_games(&self, query: &GameQuery) -> impl Future<Output = CatalogResult<GamePage>> + Send {
        let query = query.clone();
        let reply = {
            let mut s = self.inner.lock().unwrap();
            s.list_calls.push(query.clone());
            s.list_script
                .pop_front()
                .unwrap_or(ListReply::Echo(Duration::ZERO))
        };
        async move {
            match reply {
                ListReply::Echo(d) => {
                    tokio::time::sleep(d).await;
                    Ok(echo_page(&query))
                }
                ListReply::Fail(d) => {
                    tokio::time::sleep(d).await;
                    Err(CatalogError::status("/games", 502))
                }
            }
        }
    }

    fn get_game_detail(&self, id: u64) -> impl Future<Output = CatalogResult<GameRecord>> + Send {
        let (fails, delay) = {
            let mut s = self.inner.lock().unwrap();
            s.detail_calls.push(id);
            (s.detail_fails, s.detail_delay)
        };
        async move {
            tokio::time::sleep(delay).await;
            if fails {
                return Err(CatalogError::status(&format!("/games/{id}"), 404));
            }
            Ok(GameRecord {
                id,
                name: format!("Game {id}"),
                genres: vec![Named {
                    id: 4,
                    name: "Action".into(),
                }],
                ..GameRecord::default()
            })
        }
    }

    fn get_game_trailers(&self, id: u64) -> impl Future<Output = CatalogResult<Vec<Trailer>>> + Send {
        let fails = {
            let mut s = self.inner.lock().unwrap();
            s.trailer_calls.push(id);
            s.trailers_fail
        };
        async move {
            if fails {
                return Err(CatalogError::status(&format!("/games/{id}/movies"), 500));
            }
            Ok(vec![Trailer {
                id: id * 100,
                preview_image: Some("preview.jpg".into()),
                video_url: Some("max.mp4".into()),
            }])
        }
    }

    fn list_facet(&self, kind: FacetKind) -> impl Future<Output = CatalogResult<Vec<FacetEntry>>> + Send {
        let fails = {
            let mut s = self.inner.lock().unwrap();
            s.facet_calls.push(kind);
            s.facet_failures.contains(&kind)
        };
        async move {
            if fails {
                Err(CatalogError::status(kind.endpoint(), 503))
            } else {
                Ok(facet_entries(kind))
            }
        }
    }
}
