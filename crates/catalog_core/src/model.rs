pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNTITLED: &str = "Untitled";
pub const MISSING_DESCRIPTION: &str =
    "A comprehensive description is not available for this edition.";

/// One result card, normalized from either a search record or a subject listing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    /// Work identifier; `None` means the card must not link to a detail page.
    pub id: Option<String>,
    pub title: String,
    pub author_names: Vec<String>,
    pub cover_image_id: Option<String>,
    pub first_publish_year: Option<i32>,
}

impl BookSummary {
    pub fn author_line(&self) -> String {
        self.author_names.join(", ")
    }
}

/// Full record of a single work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author_names: Vec<String>,
    pub cover_image_ids: Vec<i64>,
    pub description: String,
    pub first_publish_date: Option<String>,
    pub number_of_pages: Option<u32>,
    pub publishers: Vec<String>,
    pub subjects: Vec<String>,
}

impl BookDetail {
    pub fn primary_cover_id(&self) -> Option<i64> {
        self.cover_image_ids.first().copied()
    }
}
