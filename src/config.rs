use std::{env, fs, path::Path, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// What the facet loader does when some (not all) vocabularies fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacetFailurePolicy {
    /// Any failure empties all four lists and shows one combined error.
    AllOrNothing,
    /// Keep every list that loaded; the error names the ones that didn't.
    PerFacet,
}

impl FacetFailurePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all_or_nothing" | "combined" => Some(Self::AllOrNothing),
            "per_facet" | "partial" => Some(Self::PerFacet),
            _ => None,
        }
    }
}

impl Default for FacetFailurePolicy {
    fn default() -> Self {
        Self::AllOrNothing
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub facet_failure: FacetFailurePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("gamedeck/", env!("CARGO_PKG_VERSION")).to_string(),
            facet_failure: FacetFailurePolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "rawg_api_key")]
    api_key: Option<String>,
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
    facet_failure: Option<String>,
}

/// `GAMEDECK_CONFIG` or `./config.json`, then env overrides.
pub fn load_config() -> AppConfig {
    let path = env::var_os("GAMEDECK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut cfg = load_config_from(&path);
    apply_env_overrides(
        &mut cfg,
        env::var("GAMEDECK_API_KEY").ok(),
        env::var("GAMEDECK_BASE_URL").ok(),
    );
    cfg
}

pub fn load_config_from(cfg_path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if let Some(key) = parsed.api_key.filter(|k| !k.trim().is_empty()) {
                    cfg.api_key = Some(key.trim().to_string());
                }
                if let Some(url) = parsed.base_url.filter(|u| !u.trim().is_empty()) {
                    cfg.base_url = url.trim().to_string();
                }
                if let Some(secs) = parsed.request_timeout_secs {
                    cfg.request_timeout_secs = secs.clamp(1, 300);
                }
                if let Some(ua) = parsed.user_agent.filter(|u| !u.trim().is_empty()) {
                    cfg.user_agent = ua;
                }
                if let Some(mode) = parsed.facet_failure {
                    match FacetFailurePolicy::from_str(&mode) {
                        Some(policy) => cfg.facet_failure = policy,
                        None => warn!(
                            "Unknown facet_failure `{mode}` in {}; falling back to all_or_nothing.",
                            cfg_path.display()
                        ),
                    }
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!("Failed to parse {} ({}). Using defaults.", cfg_path.display(), err);
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
        }
    }

    cfg
}

fn apply_env_overrides(cfg: &mut AppConfig, api_key: Option<String>, base_url: Option<String>) {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        cfg.api_key = Some(key.trim().to_string());
    }
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        cfg.base_url = url.trim().to_string();
    }
}
