use std::sync::Arc;

use catalog_core::{
    decode_listing, normalize_search_record, normalize_subject_record, BookSummary, ListingField,
};
use catalog_logging::{catalog_debug, catalog_warn};
use serde_json::Value;
use url::Url;

use crate::{FailureKind, FetchError, HttpClient};

/// Fetches list-shaped responses (search results, subject listings) and normalizes them.
///
/// A body that is not JSON, or that lacks its list field, yields an empty list.
#[derive(Clone)]
pub struct ListingFetcher {
    http: Arc<dyn HttpClient>,
}

impl ListingFetcher {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub async fn fetch_search(&self, url: &Url) -> Result<Vec<BookSummary>, FetchError> {
        let records = self.fetch_records(url, ListingField::Docs).await?;
        Ok(records.iter().map(normalize_search_record).collect())
    }

    pub async fn fetch_subject(&self, url: &Url) -> Result<Vec<BookSummary>, FetchError> {
        let records = self.fetch_records(url, ListingField::Works).await?;
        Ok(records.iter().map(normalize_subject_record).collect())
    }

    async fn fetch_records(
        &self,
        url: &Url,
        field: ListingField,
    ) -> Result<Vec<Value>, FetchError> {
        catalog_debug!("Fetching listing {}", url);
        let response = self.http.get(url).await?;
        if !response.is_success() {
            return Err(FetchError::transport(
                FailureKind::HttpStatus(response.status),
                format!("listing request returned {}", response.status),
            ));
        }

        match decode_listing(&response.body, field) {
            Ok(records) => Ok(records),
            Err(malformed) => {
                catalog_warn!("Treating listing from {} as empty: {}", url, malformed);
                Ok(Vec::new())
            }
        }
    }
}
