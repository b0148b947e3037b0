use crate::query::{PLACEHOLDER_COVER_URL, SUBJECT_PAGE_SIZE};
use crate::session::FEATURED_SUBJECTS;
use crate::{
    BookDetail, BookSummary, CoverSize, DetailState, QueryBuilder, SearchCriteria,
    SearchSession, SubjectBrowseSession, ViewState,
};

/// Publishers listed on the detail page.
pub const MAX_DETAIL_PUBLISHERS: usize = 2;
/// Subject tags listed on the detail page.
pub const MAX_DETAIL_SUBJECTS: usize = 12;

const NOT_AVAILABLE: &str = "Not Available";
const NOT_SPECIFIED: &str = "Not Specified";
const PUBLISHERS_UNAVAILABLE: &str = "Information Unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub search: SearchViewModel,
    pub subjects: SubjectViewModel,
    pub detail: DetailViewModel,
    pub dirty: bool,
}

/// What a list area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListPresentation {
    /// Nothing requested yet.
    #[default]
    Prompt,
    Loading,
    NoResults,
    Results {
        shown: usize,
        total: usize,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCardView {
    /// Detail link target; cards without one are not clickable.
    pub work_id: Option<String>,
    pub title: String,
    pub authors: String,
    pub cover_url: String,
    pub has_cover: bool,
    pub first_publish_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchViewModel {
    pub criteria: SearchCriteria,
    pub can_submit: bool,
    pub presentation: ListPresentation,
    pub cards: Vec<BookCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectChip {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectViewModel {
    pub chips: Vec<SubjectChip>,
    pub active_subject: Option<String>,
    pub presentation: ListPresentation,
    pub cards: Vec<BookCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailViewModel {
    #[default]
    Hidden,
    Loading {
        id: String,
    },
    NotFound {
        id: String,
    },
    Error(String),
    Ready(Box<DetailPage>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub cover_url: Option<String>,
    pub description: String,
    pub first_published: String,
    pub pages: String,
    pub publishers: String,
    pub subjects: Vec<String>,
    pub work_page_url: String,
}

pub(crate) fn search_view(session: &SearchSession, queries: &QueryBuilder) -> SearchViewModel {
    let state = session.current_state();
    let criteria = session.criteria().clone();
    let limit = criteria.limit.get() as usize;
    SearchViewModel {
        can_submit: !state.is_loading() && criteria.has_filter(),
        presentation: list_presentation(state, limit),
        cards: cards(state, queries),
        criteria,
    }
}

pub(crate) fn subject_view(
    session: &SubjectBrowseSession,
    queries: &QueryBuilder,
) -> SubjectViewModel {
    let active = session.active_subject();
    let state = session.current_state();
    SubjectViewModel {
        chips: FEATURED_SUBJECTS
            .iter()
            .map(|name| SubjectChip {
                name: (*name).to_string(),
                active: active == Some(*name),
            })
            .collect(),
        active_subject: active.map(ToOwned::to_owned),
        presentation: list_presentation(state, SUBJECT_PAGE_SIZE as usize),
        cards: cards(state, queries),
    }
}

pub(crate) fn detail_view(state: &DetailState, queries: &QueryBuilder) -> DetailViewModel {
    match state {
        DetailState::Idle => DetailViewModel::Hidden,
        DetailState::Loading { id } => DetailViewModel::Loading { id: id.clone() },
        DetailState::NotFound { id } => DetailViewModel::NotFound { id: id.clone() },
        DetailState::Failed(message) => DetailViewModel::Error(message.clone()),
        DetailState::Loaded(detail) => DetailViewModel::Ready(Box::new(detail_page(detail, queries))),
    }
}

fn list_presentation(state: &ViewState<BookSummary>, limit: usize) -> ListPresentation {
    match state {
        ViewState::Idle => ListPresentation::Prompt,
        ViewState::Loading => ListPresentation::Loading,
        ViewState::Loaded(items) if items.is_empty() => ListPresentation::NoResults,
        ViewState::Loaded(items) => ListPresentation::Results {
            shown: items.len().min(limit),
            total: items.len(),
        },
        ViewState::Failed(message) => ListPresentation::Error(message.clone()),
    }
}

fn cards(state: &ViewState<BookSummary>, queries: &QueryBuilder) -> Vec<BookCardView> {
    state
        .items()
        .iter()
        .map(|book| book_card(book, queries))
        .collect()
}

pub fn book_card(book: &BookSummary, queries: &QueryBuilder) -> BookCardView {
    let cover_url = match &book.cover_image_id {
        Some(id) => queries.cover_image(id, CoverSize::Medium).to_string(),
        None => PLACEHOLDER_COVER_URL.to_string(),
    };
    BookCardView {
        work_id: book.id.clone(),
        title: book.title.clone(),
        authors: book.author_line(),
        cover_url,
        has_cover: book.cover_image_id.is_some(),
        first_publish_year: book.first_publish_year,
    }
}

pub fn detail_page(detail: &BookDetail, queries: &QueryBuilder) -> DetailPage {
    let publishers = detail
        .publishers
        .iter()
        .take(MAX_DETAIL_PUBLISHERS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    DetailPage {
        title: detail.title.clone(),
        subtitle: detail.subtitle.clone(),
        authors: detail.author_names.clone(),
        cover_url: detail
            .primary_cover_id()
            .map(|id| queries.cover_image(&id.to_string(), CoverSize::Large).to_string()),
        description: detail.description.clone(),
        first_published: detail
            .first_publish_date
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        pages: match detail.number_of_pages {
            Some(pages) if pages > 0 => format!("{pages} pages"),
            _ => NOT_SPECIFIED.to_string(),
        },
        publishers: if publishers.is_empty() {
            PUBLISHERS_UNAVAILABLE.to_string()
        } else {
            publishers
        },
        subjects: detail
            .subjects
            .iter()
            .take(MAX_DETAIL_SUBJECTS)
            .cloned()
            .collect(),
        work_page_url: queries.work_page(&detail.id).to_string(),
    }
}
