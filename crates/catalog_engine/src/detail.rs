use std::sync::Arc;

use catalog_core::{normalize_detail_record, BookDetail, QueryBuilder};
use catalog_logging::catalog_debug;
use serde_json::Value;
use url::Url;

use crate::{FailureKind, FetchError, HttpClient};

/// Loads one work record. Single attempt; retry policy belongs to the caller.
#[derive(Clone)]
pub struct DetailFetcher {
    http: Arc<dyn HttpClient>,
    queries: QueryBuilder,
}

impl DetailFetcher {
    pub fn new(http: Arc<dyn HttpClient>, queries: QueryBuilder) -> Self {
        Self { http, queries }
    }

    pub async fn fetch_detail(&self, id: &str) -> Result<BookDetail, FetchError> {
        let url = self.queries.work_detail(id);
        self.fetch_detail_from(&url, id).await
    }

    /// Same as [`DetailFetcher::fetch_detail`] for an already built detail URL.
    pub async fn fetch_detail_from(&self, url: &Url, id: &str) -> Result<BookDetail, FetchError> {
        catalog_debug!("Fetching work {} from {}", id, url);
        let response = self.http.get(url).await?;

        match response.status {
            404 | 410 => {
                return Err(FetchError::NotFound { id: id.to_string() });
            }
            status if !response.is_success() => {
                return Err(FetchError::transport(
                    FailureKind::HttpStatus(status),
                    format!("detail request returned {status}"),
                ));
            }
            _ => {}
        }

        let raw: Value = serde_json::from_slice(&response.body)
            .map_err(|err| FetchError::transport(FailureKind::MalformedBody, err.to_string()))?;
        Ok(normalize_detail_record(&raw, id))
    }
}
