// src/catalog/types.rs
use serde::Deserialize;

// ---- list endpoint ----

/// One card in the game grid.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GameSummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default, rename = "released")]
    pub release_date: Option<String>,
    #[serde(default, rename = "metacritic")]
    pub metacritic_score: Option<u32>,
}

impl GameSummary {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(crate::app::utils::release_year)
    }
}

/// `/games` envelope. Only `results` is consumed by the coordinator.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GamePage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<GameSummary>,
}

// ---- facet vocabularies ----

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FacetEntry {
    pub id: u64,
    pub name: String,
}

/// Generic `{results: [...]}` envelope used by the facet and trailer endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ResultsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacetKind {
    Platforms,
    Genres,
    Tags,
    Developers,
}

impl FacetKind {
    pub const ALL: [Self; 4] = [Self::Platforms, Self::Genres, Self::Tags, Self::Developers];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platforms => "platforms",
            Self::Genres => "genres",
            Self::Tags => "tags",
            Self::Developers => "developers",
        }
    }

    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Platforms => "/platforms",
            Self::Genres => "/genres",
            Self::Tags => "/tags",
            Self::Developers => "/developers",
        }
    }
}

// ---- detail endpoints ----

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PlatformSlot {
    pub platform: Named,
}

/// Full `/games/{id}` record (the fields the detail overlay reads).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameRecord {
    pub id: u64,
    pub name: String,
    pub background_image: Option<String>,
    #[serde(rename = "released")]
    pub release_date: Option<String>,
    pub description_raw: Option<String>,
    pub metacritic: Option<u32>,
    pub rating: Option<f32>,
    pub website: Option<String>,
    pub genres: Vec<Named>,
    pub platforms: Vec<PlatformSlot>,
    pub developers: Vec<Named>,
    pub publishers: Vec<Named>,
    pub esrb_rating: Option<Named>,
}

impl GameRecord {
    pub fn genre_names(&self) -> String {
        join_names(self.genres.iter())
    }

    pub fn platform_names(&self) -> String {
        join_names(self.platforms.iter().map(|p| &p.platform))
    }

    pub fn developer_names(&self) -> String {
        join_names(self.developers.iter())
    }

    pub fn publisher_names(&self) -> String {
        join_names(self.publishers.iter())
    }
}

fn join_names<'a>(it: impl Iterator<Item = &'a Named>) -> String {
    itertools::join(it.map(|n| n.name.as_str()), ", ")
}

#[derive(Debug, Default, Deserialize)]
struct TrailerSources {
    #[serde(default)]
    max: Option<String>,
    #[serde(default, rename = "480")]
    low: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTrailer {
    id: u64,
    #[serde(default)]
    preview: Option<String>,
    #[serde(default)]
    data: TrailerSources,
}

/// One entry of `/games/{id}/movies`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTrailer")]
pub struct Trailer {
    pub id: u64,
    pub preview_image: Option<String>,
    pub video_url: Option<String>,
}

impl From<RawTrailer> for Trailer {
    fn from(raw: RawTrailer) -> Self {
        Self {
            id: raw.id,
            preview_image: raw.preview,
            video_url: raw.data.max.or(raw.data.low),
        }
    }
}

/// Metadata and trailers, merged only when both calls succeeded.
#[derive(Clone, Debug, PartialEq)]
pub struct GameDetail {
    pub record: GameRecord,
    pub trailers: Vec<Trailer>,
}
