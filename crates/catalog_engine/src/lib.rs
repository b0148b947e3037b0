//! Catalog engine: HTTP access to the remote catalog and effect execution.
mod config;
mod detail;
mod engine;
mod executor;
mod fetch;
mod listing;
mod types;

pub use config::{
    ConfigError, EngineConfig, ENV_BASE_URL, ENV_COVERS_URL, ENV_REQUEST_TIMEOUT_SECS,
};
pub use detail::DetailFetcher;
pub use engine::EngineHandle;
pub use executor::EffectExecutor;
pub use fetch::{FetchSettings, HttpClient, HttpResponse, ReqwestHttpClient};
pub use listing::ListingFetcher;
pub use types::{FailureKind, FetchError};
