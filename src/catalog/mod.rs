//! Remote catalog contract and the RAWG implementation of it.
//!
//! The coordinator in [`crate::app`] only sees [`CatalogApi`]; everything
//! HTTP-shaped lives behind it.

use std::future::Future;

pub mod error;
pub mod query;
pub mod rawg;
pub mod types;

pub use error::CatalogError;
pub use query::GameQuery;
pub use rawg::RawgClient;
pub use types::{
    FacetEntry, FacetKind, GameDetail, GamePage, GameRecord, GameSummary, Named, PlatformSlot,
    Trailer,
};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Typed query operations over the remote catalog.
///
/// Futures must be `Send` because every call runs on its own spawned task and
/// reports back through the session's event channel.
pub trait CatalogApi: Send + Sync + 'static {
    fn list_games(&self, query: &GameQuery)
        -> impl Future<Output = CatalogResult<GamePage>> + Send;

    fn get_game_detail(&self, id: u64) -> impl Future<Output = CatalogResult<GameRecord>> + Send;

    fn get_game_trailers(&self, id: u64)
        -> impl Future<Output = CatalogResult<Vec<Trailer>>> + Send;

    /// One facet vocabulary. The four public list calls below route here.
    fn list_facet(&self, kind: FacetKind)
        -> impl Future<Output = CatalogResult<Vec<FacetEntry>>> + Send;

    fn list_platforms(&self) -> impl Future<Output = CatalogResult<Vec<FacetEntry>>> + Send {
        self.list_facet(FacetKind::Platforms)
    }

    fn list_genres(&self) -> impl Future<Output = CatalogResult<Vec<FacetEntry>>> + Send {
        self.list_facet(FacetKind::Genres)
    }

    fn list_tags(&self) -> impl Future<Output = CatalogResult<Vec<FacetEntry>>> + Send {
        self.list_facet(FacetKind::Tags)
    }

    fn list_developers(&self) -> impl Future<Output = CatalogResult<Vec<FacetEntry>>> + Send {
        self.list_facet(FacetKind::Developers)
    }
}
