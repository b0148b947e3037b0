use crate::{BookDetail, BookSummary, FailureReason, RequestId, ResultLimit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the title filter.
    TitleChanged(String),
    /// User edited the author filter.
    AuthorChanged(String),
    /// User picked a subject filter on the search form.
    SubjectFilterChanged(String),
    /// User picked a page size.
    LimitChanged(ResultLimit),
    /// User submitted the search form (button or Enter).
    SearchSubmitted,
    /// User clicked Clear on the search form.
    ClearClicked,
    /// User picked a subject on the browse page.
    SubjectSelected(String),
    /// User opened the detail page of a work.
    DetailRequested(String),
    /// User left the detail page.
    DetailClosed,
    /// Engine finished a search request.
    SearchResolved {
        request: RequestId,
        outcome: Result<Vec<BookSummary>, FailureReason>,
    },
    /// Engine finished a subject listing request.
    SubjectResolved {
        request: RequestId,
        outcome: Result<Vec<BookSummary>, FailureReason>,
    },
    /// Engine finished a detail request.
    DetailResolved {
        request: RequestId,
        outcome: Result<BookDetail, FailureReason>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
