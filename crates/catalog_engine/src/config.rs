use std::time::Duration;

use catalog_core::{CatalogEndpoints, EndpointError, DEFAULT_CATALOG_URL, DEFAULT_COVERS_URL};

use crate::FetchSettings;

pub const ENV_BASE_URL: &str = "CATALOG_BASE_URL";
pub const ENV_COVERS_URL: &str = "CATALOG_COVERS_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CATALOG_REQUEST_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid catalog endpoint: {0}")]
    Endpoint(#[from] EndpointError),
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    Timeout { name: &'static str, value: String },
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub endpoints: CatalogEndpoints,
    pub fetch: FetchSettings,
}

impl EngineConfig {
    /// Defaults with every catalog and cover URL rooted at `base`.
    pub fn with_base(base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoints: CatalogEndpoints::with_base(base)?,
            fetch: FetchSettings::default(),
        })
    }

    /// Defaults overridden by `CATALOG_BASE_URL`, `CATALOG_COVERS_URL` and
    /// `CATALOG_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base = lookup(ENV_BASE_URL);
        let covers = lookup(ENV_COVERS_URL);
        let endpoints = if base.is_some() || covers.is_some() {
            CatalogEndpoints::new(
                base.as_deref().unwrap_or(DEFAULT_CATALOG_URL),
                covers.as_deref().unwrap_or(DEFAULT_COVERS_URL),
            )?
        } else {
            CatalogEndpoints::default()
        };

        let mut fetch = FetchSettings::default();
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Timeout {
                    name: ENV_REQUEST_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            fetch.request_timeout = Duration::from_secs(secs);
        }

        Ok(Self { endpoints, fetch })
    }
}
