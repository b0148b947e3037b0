use std::sync::Arc;

use catalog_core::{Effect, FailureReason, Msg, QueryBuilder, RequestId};
use catalog_logging::{catalog_info, catalog_warn};

use crate::{DetailFetcher, EngineConfig, FetchError, HttpClient, ListingFetcher, ReqwestHttpClient};

/// Runs one core [`Effect`] to completion and reports it back as a resolution [`Msg`].
#[derive(Clone)]
pub struct EffectExecutor {
    listing: ListingFetcher,
    detail: DetailFetcher,
}

impl EffectExecutor {
    pub fn new(http: Arc<dyn HttpClient>, queries: QueryBuilder) -> Self {
        Self {
            listing: ListingFetcher::new(http.clone()),
            detail: DetailFetcher::new(http, queries),
        }
    }

    /// Executor backed by a reqwest client built from `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, FetchError> {
        let http = ReqwestHttpClient::new(config.fetch.clone())?;
        Ok(Self::new(
            Arc::new(http),
            QueryBuilder::new(config.endpoints.clone()),
        ))
    }

    pub fn listing(&self) -> &ListingFetcher {
        &self.listing
    }

    pub fn detail(&self) -> &DetailFetcher {
        &self.detail
    }

    pub async fn execute(&self, effect: Effect) -> Msg {
        match effect {
            Effect::FetchSearch { request, url } => {
                let result = self.listing.fetch_search(&url).await;
                Msg::SearchResolved {
                    request,
                    outcome: report("search", request, result, |books| {
                        format!("{} books", books.len())
                    }),
                }
            }
            Effect::FetchSubject {
                request,
                subject,
                url,
            } => {
                let result = self.listing.fetch_subject(&url).await;
                Msg::SubjectResolved {
                    request,
                    outcome: report(&subject, request, result, |books| {
                        format!("{} books", books.len())
                    }),
                }
            }
            Effect::FetchDetail { request, id, url } => {
                let result = self.detail.fetch_detail_from(&url, &id).await;
                Msg::DetailResolved {
                    request,
                    outcome: report(&id, request, result, |detail| detail.title.clone()),
                }
            }
        }
    }
}

fn report<T>(
    label: &str,
    request: RequestId,
    result: Result<T, FetchError>,
    describe: impl FnOnce(&T) -> String,
) -> Result<T, FailureReason> {
    match result {
        Ok(value) => {
            catalog_info!("Request {} ({}) loaded: {}", request, label, describe(&value));
            Ok(value)
        }
        Err(err) => {
            catalog_warn!("Request {} ({}) failed: {}", request, label, err);
            Err(err.reason())
        }
    }
}
