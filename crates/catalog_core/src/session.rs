use url::Url;

use crate::{
    BookDetail, BookSummary, DetailState, FailureReason, QueryBuilder, SearchCriteria, ViewState,
};

pub type RequestId = u64;

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to load books. Please try again.";
pub const SUBJECT_FAILED_MESSAGE: &str = "Failed to load books for this subject.";
pub const DETAIL_FAILED_MESSAGE: &str = "Unable to load book details. Please try again.";

/// Subjects offered by the browse page. Sessions accept any other name too.
pub const FEATURED_SUBJECTS: [&str; 6] = [
    "fiction",
    "science",
    "history",
    "biography",
    "fantasy",
    "mystery",
];

/// Hands out request ids and remembers which one is still awaited.
///
/// Only the most recently issued request may settle; anything older, or anything
/// issued before an `abandon`, is stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct RequestTracker {
    issued: RequestId,
    pending: Option<RequestId>,
}

impl RequestTracker {
    fn issue(&mut self) -> RequestId {
        self.issued += 1;
        self.pending = Some(self.issued);
        self.issued
    }

    fn settle(&mut self, request: RequestId) -> bool {
        if self.pending == Some(request) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn abandon(&mut self) {
        self.pending = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub request: RequestId,
    pub url: Url,
}

/// One search page: the criteria being edited, and the list it produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchSession {
    queries: QueryBuilder,
    criteria: SearchCriteria,
    state: ViewState<BookSummary>,
    requests: RequestTracker,
}

impl SearchSession {
    pub fn new(queries: QueryBuilder) -> Self {
        Self {
            queries,
            ..Self::default()
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub(crate) fn criteria_mut(&mut self) -> &mut SearchCriteria {
        &mut self.criteria
    }

    pub fn current_state(&self) -> &ViewState<BookSummary> {
        &self.state
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.requests.pending
    }

    /// Starts a search. Criteria without any filter leave the session untouched.
    pub fn search(&mut self, criteria: SearchCriteria) -> Option<SearchRequest> {
        if !criteria.has_filter() {
            return None;
        }
        let url = self.queries.build(&criteria);
        self.criteria = criteria;
        self.state = ViewState::Loading;
        let request = self.requests.issue();
        Some(SearchRequest { request, url })
    }

    /// Applies a response. Returns `false` when the response is stale and was dropped.
    pub fn resolve(
        &mut self,
        request: RequestId,
        outcome: Result<Vec<BookSummary>, FailureReason>,
    ) -> bool {
        if !self.requests.settle(request) {
            return false;
        }
        self.state = match outcome {
            Ok(items) => ViewState::Loaded(items),
            Err(_) => ViewState::Failed(SEARCH_FAILED_MESSAGE.to_string()),
        };
        true
    }

    /// Empties the filters and results; the page size stays. Responses still in flight will be dropped.
    pub fn clear(&mut self) {
        self.criteria = SearchCriteria::new().with_limit(self.criteria.limit);
        self.state = ViewState::Idle;
        self.requests.abandon();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRequest {
    pub request: RequestId,
    pub subject: String,
    pub url: Url,
}

/// The subject browse page: a fixed-size listing for one subject at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectBrowseSession {
    queries: QueryBuilder,
    active_subject: Option<String>,
    state: ViewState<BookSummary>,
    requests: RequestTracker,
}

impl SubjectBrowseSession {
    pub fn new(queries: QueryBuilder) -> Self {
        Self {
            queries,
            ..Self::default()
        }
    }

    pub fn active_subject(&self) -> Option<&str> {
        self.active_subject.as_deref()
    }

    pub fn current_state(&self) -> &ViewState<BookSummary> {
        &self.state
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.requests.pending
    }

    /// Marks `subject` active right away and starts loading its listing.
    pub fn load(&mut self, subject: &str) -> Option<SubjectRequest> {
        if subject.trim().is_empty() {
            return None;
        }
        let url = self.queries.subject_listing(subject);
        self.active_subject = Some(subject.to_string());
        self.state = ViewState::Loading;
        let request = self.requests.issue();
        Some(SubjectRequest {
            request,
            subject: subject.to_string(),
            url,
        })
    }

    pub fn resolve(
        &mut self,
        request: RequestId,
        outcome: Result<Vec<BookSummary>, FailureReason>,
    ) -> bool {
        if !self.requests.settle(request) {
            return false;
        }
        self.state = match outcome {
            Ok(items) => ViewState::Loaded(items),
            Err(_) => ViewState::Failed(SUBJECT_FAILED_MESSAGE.to_string()),
        };
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub request: RequestId,
    pub id: String,
    pub url: Url,
}

/// The detail page of a single work.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailSession {
    queries: QueryBuilder,
    state: DetailState,
    requests: RequestTracker,
}

impl DetailSession {
    pub fn new(queries: QueryBuilder) -> Self {
        Self {
            queries,
            ..Self::default()
        }
    }

    pub fn current_state(&self) -> &DetailState {
        &self.state
    }

    pub fn open(&mut self, id: &str) -> Option<DetailRequest> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        let url = self.queries.work_detail(id);
        self.state = DetailState::Loading { id: id.to_string() };
        let request = self.requests.issue();
        Some(DetailRequest {
            request,
            id: id.to_string(),
            url,
        })
    }

    pub fn resolve(
        &mut self,
        request: RequestId,
        outcome: Result<BookDetail, FailureReason>,
    ) -> bool {
        if !self.requests.settle(request) {
            return false;
        }
        let id = match &self.state {
            DetailState::Loading { id } => id.clone(),
            _ => String::new(),
        };
        self.state = match outcome {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(FailureReason::NotFound) => DetailState::NotFound { id },
            Err(FailureReason::Transport) => DetailState::Failed(DETAIL_FAILED_MESSAGE.to_string()),
        };
        true
    }

    pub fn close(&mut self) {
        self.state = DetailState::Idle;
        self.requests.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::RequestTracker;

    #[test]
    fn only_latest_request_settles() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.settle(first));
        assert!(tracker.settle(second));
        assert!(!tracker.settle(second));
    }

    #[test]
    fn abandoned_request_never_settles() {
        let mut tracker = RequestTracker::default();
        let request = tracker.issue();
        tracker.abandon();
        assert!(!tracker.settle(request));
    }
}
