// src/app/types.rs
use thiserror::Error;

use super::debounce::Ticket;
use super::filters::FilterState;
use crate::catalog::{CatalogError, CatalogResult, FacetEntry, FacetKind, GameDetail, GamePage};

// ---- messages from background tasks to the session owner ----
#[derive(Debug)]
pub enum Event {
    /// Search quiet window elapsed; payload is the snapshot taken at schedule time.
    SearchQuiet {
        ticket: Ticket,
        filters: FilterState,
    },
    ListArrived {
        seq: u64,
        result: CatalogResult<GamePage>,
    },
    FacetsSettled(FacetResults),
    DetailArrived {
        game_id: u64,
        result: CatalogResult<GameDetail>,
    },
}

/// All four vocabulary calls, each settled independently.
#[derive(Debug)]
pub struct FacetResults {
    pub platforms: CatalogResult<Vec<FacetEntry>>,
    pub genres: CatalogResult<Vec<FacetEntry>>,
    pub tags: CatalogResult<Vec<FacetEntry>>,
    pub developers: CatalogResult<Vec<FacetEntry>>,
}

// ---- user-facing error taxonomy ----
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("Failed to fetch games. Please try again later.")]
    ListFetch(#[source] CatalogError),
    #[error("Failed to load filter options")]
    Vocabulary { failed: Vec<FacetKind> },
    /// Per-facet policy only: some lists loaded, these did not.
    #[error("Failed to load filter options ({})", facet_names(.failed))]
    PartialVocabulary { failed: Vec<FacetKind> },
    #[error("Failed to fetch game details. Please try again later.")]
    DetailFetch(#[source] CatalogError),
}

impl BrowseError {
    /// Vocabularies behind a vocabulary error; empty for fetch errors.
    pub fn failed_facets(&self) -> &[FacetKind] {
        match self {
            Self::Vocabulary { failed } | Self::PartialVocabulary { failed } => failed,
            Self::ListFetch(_) | Self::DetailFetch(_) => &[],
        }
    }
}

fn facet_names(kinds: &[FacetKind]) -> String {
    itertools::join(kinds.iter().map(|k| k.as_str()), ", ")
}

// ---- per-slot load phases ----
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}
