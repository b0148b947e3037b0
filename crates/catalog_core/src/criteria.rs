use std::fmt;

/// Page sizes offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultLimit {
    #[default]
    Ten,
    Twenty,
    Thirty,
    Fifty,
}

impl ResultLimit {
    pub const ALL: [ResultLimit; 4] = [
        ResultLimit::Ten,
        ResultLimit::Twenty,
        ResultLimit::Thirty,
        ResultLimit::Fifty,
    ];

    pub fn get(self) -> u32 {
        match self {
            ResultLimit::Ten => 10,
            ResultLimit::Twenty => 20,
            ResultLimit::Thirty => 30,
            ResultLimit::Fifty => 50,
        }
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported result limit {0} (expected 10, 20, 30 or 50)")]
pub struct UnsupportedLimit(pub u32);

impl TryFrom<u32> for ResultLimit {
    type Error = UnsupportedLimit;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        ResultLimit::ALL
            .into_iter()
            .find(|limit| limit.get() == value)
            .ok_or(UnsupportedLimit(value))
    }
}

/// Filters for one search. A filter counts only when it has non-whitespace content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub limit: ResultLimit,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_limit(mut self, limit: ResultLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn title(&self) -> Option<&str> {
        present(self.title.as_deref())
    }

    pub fn author(&self) -> Option<&str> {
        present(self.author.as_deref())
    }

    pub fn subject(&self) -> Option<&str> {
        present(self.subject.as_deref())
    }

    pub fn has_filter(&self) -> bool {
        self.title().is_some() || self.author().is_some() || self.subject().is_some()
    }

    /// Present filters in query order.
    pub fn filters(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("title", self.title()),
            ("author", self.author()),
            ("subject", self.subject()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
