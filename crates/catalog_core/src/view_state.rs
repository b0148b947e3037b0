use crate::BookDetail;

/// Lifecycle of one list view. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            ViewState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Why a fetch did not produce data. Sessions collapse both into a generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    NotFound,
    Transport,
}

/// Lifecycle of the single-record detail view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Idle,
    Loading {
        id: String,
    },
    Loaded(Box<BookDetail>),
    NotFound {
        id: String,
    },
    Failed(String),
}

impl DetailState {
    pub fn detail(&self) -> Option<&BookDetail> {
        match self {
            DetailState::Loaded(detail) => Some(detail.as_ref()),
            _ => None,
        }
    }
}
