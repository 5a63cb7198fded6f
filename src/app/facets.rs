// src/app/facets.rs: startup facet vocabularies
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::types::{BrowseError, Event, FacetResults, LoadStatus};
use crate::catalog::{CatalogApi, CatalogResult, FacetEntry, FacetKind};
use crate::config::FacetFailurePolicy;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetVocabulary {
    pub platforms: Vec<FacetEntry>,
    pub genres: Vec<FacetEntry>,
    pub tags: Vec<FacetEntry>,
    pub developers: Vec<FacetEntry>,
}

impl FacetVocabulary {
    pub fn get(&self, kind: FacetKind) -> &[FacetEntry] {
        match kind {
            FacetKind::Platforms => &self.platforms,
            FacetKind::Genres => &self.genres,
            FacetKind::Tags => &self.tags,
            FacetKind::Developers => &self.developers,
        }
    }

    fn slot_mut(&mut self, kind: FacetKind) -> &mut Vec<FacetEntry> {
        match kind {
            FacetKind::Platforms => &mut self.platforms,
            FacetKind::Genres => &mut self.genres,
            FacetKind::Tags => &mut self.tags,
            FacetKind::Developers => &mut self.developers,
        }
    }

    /// Display name for an id in one vocabulary.
    pub fn name_of(&self, kind: FacetKind, id: u64) -> Option<&str> {
        self.get(kind)
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct FacetOptions {
    pub status: LoadStatus,
    pub vocab: FacetVocabulary,
    pub error: Option<String>,
    /// Vocabularies that failed in the last load, in request order.
    pub failed: Vec<FacetKind>,
}

impl Default for FacetOptions {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            vocab: FacetVocabulary::default(),
            error: None,
            failed: Vec::new(),
        }
    }
}

impl FacetResults {
    fn into_slots(self) -> [(FacetKind, CatalogResult<Vec<FacetEntry>>); 4] {
        [
            (FacetKind::Platforms, self.platforms),
            (FacetKind::Genres, self.genres),
            (FacetKind::Tags, self.tags),
            (FacetKind::Developers, self.developers),
        ]
    }
}

/// Fold four settled results into a vocabulary under `policy`.
pub(crate) fn merge_facets(
    results: FacetResults,
    policy: FacetFailurePolicy,
) -> (FacetVocabulary, Option<BrowseError>) {
    let mut vocab = FacetVocabulary::default();
    let mut failed = Vec::new();

    for (kind, result) in results.into_slots() {
        match result {
            Ok(entries) => *vocab.slot_mut(kind) = entries,
            Err(e) => {
                warn!("facet `{}` failed to load: {e}", kind.as_str());
                failed.push(kind);
            }
        }
    }

    if failed.is_empty() {
        return (vocab, None);
    }
    match policy {
        FacetFailurePolicy::AllOrNothing => (
            FacetVocabulary::default(),
            Some(BrowseError::Vocabulary { failed }),
        ),
        FacetFailurePolicy::PerFacet if failed.len() == FacetKind::ALL.len() => {
            (vocab, Some(BrowseError::Vocabulary { failed }))
        }
        FacetFailurePolicy::PerFacet => (vocab, Some(BrowseError::PartialVocabulary { failed })),
    }
}

impl<C: CatalogApi> super::GameBrowser<C> {
    /// Fire all four vocabulary calls at once; they report back together once
    /// every one has settled. Also the retry path after a failure.
    pub fn load_facets(&mut self) {
        if self.facets.status == LoadStatus::Loading {
            debug!("facet load already in flight; ignoring reload");
            return;
        }
        self.facets.status = LoadStatus::Loading;
        self.facets.error = None;
        self.facets.failed.clear();

        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let (platforms, genres, tags, developers) = tokio::join!(
                client.list_platforms(),
                client.list_genres(),
                client.list_tags(),
                client.list_developers(),
            );
            let _ = tx.send(Event::FacetsSettled(FacetResults {
                platforms,
                genres,
                tags,
                developers,
            }));
        });
    }

    pub(crate) fn on_facets_settled(&mut self, results: FacetResults) {
        let (vocab, err) = merge_facets(results, self.facet_policy);
        self.facets.vocab = vocab;
        match err {
            None => {
                info!(
                    "Filter options ready: {} platforms, {} genres, {} tags, {} developers",
                    self.facets.vocab.platforms.len(),
                    self.facets.vocab.genres.len(),
                    self.facets.vocab.tags.len(),
                    self.facets.vocab.developers.len()
                );
                self.facets.error = None;
                self.facets.status = LoadStatus::Loaded;
            }
            Some(e) => {
                let failed = e.failed_facets().to_vec();
                warn!(
                    "filter options degraded ({:?} policy); failed: {}",
                    self.facet_policy,
                    itertools::join(failed.iter().map(|k| k.as_str()), ", ")
                );
                self.facets.error = Some(e.to_string());
                self.facets.failed = failed;
                self.facets.status = LoadStatus::Failed;
            }
        }
    }
}
