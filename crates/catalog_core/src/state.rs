use crate::view_model::{self, AppViewModel};
use crate::{
    CatalogEndpoints, DetailSession, QueryBuilder, SearchCriteria, SearchSession,
    SubjectBrowseSession,
};

/// Everything the presentation layer renders, owned by the update loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    queries: QueryBuilder,
    search: SearchSession,
    subjects: SubjectBrowseSession,
    detail: DetailSession,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(endpoints: CatalogEndpoints) -> Self {
        let queries = QueryBuilder::new(endpoints);
        Self {
            search: SearchSession::new(queries.clone()),
            subjects: SubjectBrowseSession::new(queries.clone()),
            detail: DetailSession::new(queries.clone()),
            queries,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            search: view_model::search_view(&self.search, &self.queries),
            subjects: view_model::subject_view(&self.subjects, &self.queries),
            detail: view_model::detail_view(self.detail.current_state(), &self.queries),
            dirty: self.dirty,
        }
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn subjects(&self) -> &SubjectBrowseSession {
        &self.subjects
    }

    pub fn detail(&self) -> &DetailSession {
        &self.detail
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchSession {
        &mut self.search
    }

    pub(crate) fn subjects_mut(&mut self) -> &mut SubjectBrowseSession {
        &mut self.subjects
    }

    pub(crate) fn detail_mut(&mut self) -> &mut DetailSession {
        &mut self.detail
    }

    pub(crate) fn criteria_mut(&mut self) -> &mut SearchCriteria {
        self.search.criteria_mut()
    }
}
