// src/catalog/query.rs
use itertools::Itertools;

use crate::app::filters::FilterState;

// ---- fixed list parameters ----
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Descending by critic score.
pub const ORDERING: &str = "-metacritic";
pub const METACRITIC_RANGE: &str = "75,100";

/// Exact parameter set for one `/games` call.
///
/// Built from a full [`FilterState`] snapshot; optional fields are `None` when
/// the matching filter is empty so they never reach the wire as `key=`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameQuery {
    pub page: u32,
    pub page_size: u32,
    pub ordering: &'static str,
    pub metacritic: &'static str,
    pub search: Option<String>,
    pub platforms: Option<String>,
    pub genres: Option<String>,
    pub tags: Option<String>,
    pub developers: Option<String>,
    pub dates: Option<String>,
}

impl GameQuery {
    pub fn from_filters(filters: &FilterState) -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            ordering: ORDERING,
            metacritic: METACRITIC_RANGE,
            search: non_empty(&filters.search),
            platforms: id_list(&filters.platforms),
            genres: id_list(&filters.genres),
            tags: id_list(&filters.tags),
            developers: id_list(&filters.developers),
            dates: non_empty(filters.dates.trim()),
        }
    }

    /// Populated parameters in a stable order, ready for `RequestBuilder::query`.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(s) = &self.search {
            out.push(("search", s.clone()));
        }
        out.push(("ordering", self.ordering.to_string()));
        let optional = [
            ("platforms", &self.platforms),
            ("genres", &self.genres),
            ("tags", &self.tags),
            ("developers", &self.developers),
            ("dates", &self.dates),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                out.push((key, v.clone()));
            }
        }
        out.push(("metacritic", self.metacritic.to_string()));
        out
    }

    /// URL-encoded form, used for logging.
    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .join("&")
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// "4, 187," → "4,187"; blank → None.
fn id_list(raw: &str) -> Option<String> {
    let joined = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .join(",");
    non_empty(&joined)
}
