// src/catalog/rawg.rs
use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::ResultsEnvelope;
use super::{
    CatalogApi, CatalogError, CatalogResult, FacetEntry, FacetKind, GamePage, GameQuery,
    GameRecord, Trailer,
};
use crate::config::AppConfig;

/// RAWG HTTP client. One pooled `reqwest::Client` shared by every call; the
/// API key rides along as the `key` query parameter on each request.
#[derive(Clone)]
pub struct RawgClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RawgClient {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .pool_max_idle_per_host(8)
            .default_headers({
                use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
                let mut h = HeaderMap::new();
                h.insert(ACCEPT, HeaderValue::from_static("application/json"));
                h
            })
            .build()
            .map_err(|source| CatalogError::Transport {
                endpoint: "client builder".into(),
                source,
            })?;

        if cfg.api_key.is_none() {
            warn!("No RAWG api_key configured; every catalog call will fail.");
        }

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> CatalogResult<T> {
        let key = self.api_key.as_deref().ok_or(CatalogError::MissingApiKey)?;
        let url = format!("{}{endpoint}", self.base_url);
        debug!("GET {endpoint} ({} params)", params.len());

        let resp = self
            .http
            .get(&url)
            .query(&[("key", key)])
            .query(params)
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::status(endpoint, status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| CatalogError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::decode(endpoint, e))
    }
}

impl CatalogApi for RawgClient {
    fn list_games(&self, query: &GameQuery) -> impl Future<Output = CatalogResult<GamePage>> + Send {
        let params = query.to_pairs();
        async move { self.get_json::<GamePage>("/games", &params).await }
    }

    fn get_game_detail(&self, id: u64) -> impl Future<Output = CatalogResult<GameRecord>> + Send {
        async move { self.get_json(&format!("/games/{id}"), &[]).await }
    }

    fn get_game_trailers(&self, id: u64) -> impl Future<Output = CatalogResult<Vec<Trailer>>> + Send {
        async move {
            let env: ResultsEnvelope<Trailer> =
                self.get_json(&format!("/games/{id}/movies"), &[]).await?;
            Ok(env.results)
        }
    }

    fn list_facet(&self, kind: FacetKind) -> impl Future<Output = CatalogResult<Vec<FacetEntry>>> + Send {
        async move {
            let env: ResultsEnvelope<FacetEntry> = self.get_json(kind.endpoint(), &[]).await?;
            Ok(env.results)
        }
    }
}
