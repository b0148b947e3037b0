//! Catalog core: pure query building, record normalization and view state machines.
mod criteria;
mod effect;
mod model;
mod msg;
mod normalize;
mod query;
mod session;
mod state;
mod update;
mod view_model;
mod view_state;

pub use criteria::{ResultLimit, SearchCriteria, UnsupportedLimit};
pub use effect::Effect;
pub use model::{BookDetail, BookSummary, MISSING_DESCRIPTION, UNKNOWN_AUTHOR, UNTITLED};
pub use msg::Msg;
pub use normalize::{
    decode_listing, normalize_detail_record, normalize_search_record, normalize_subject_record,
    work_id_from_key, ListingField, MalformedListing,
};
pub use query::{
    CatalogEndpoints, CoverSize, EndpointError, QueryBuilder, DEFAULT_CATALOG_URL,
    DEFAULT_COVERS_URL, PLACEHOLDER_COVER_URL, SUBJECT_PAGE_SIZE,
};
pub use session::{
    DetailRequest, DetailSession, RequestId, SearchRequest, SearchSession, SubjectBrowseSession,
    SubjectRequest, DETAIL_FAILED_MESSAGE, FEATURED_SUBJECTS, SEARCH_FAILED_MESSAGE,
    SUBJECT_FAILED_MESSAGE,
};
pub use state::AppState;
pub use update::update;
pub use view_model::{
    book_card, detail_page, AppViewModel, BookCardView, DetailPage, DetailViewModel,
    ListPresentation, SearchViewModel, SubjectChip, SubjectViewModel, MAX_DETAIL_PUBLISHERS,
    MAX_DETAIL_SUBJECTS,
};
pub use view_state::{DetailState, FailureReason, ViewState};
