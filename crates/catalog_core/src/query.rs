use url::Url;

use crate::SearchCriteria;

pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org";
pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org";
/// Shown on cards whose record carries no cover id.
pub const PLACEHOLDER_COVER_URL: &str =
    "https://images.unsplash.com/photo-1544716278-e513176f20b5?w=300&h=400&fit=crop";
/// Subject listings are not caller-configurable.
pub const SUBJECT_PAGE_SIZE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid endpoint url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("endpoint url cannot carry a path: {0}")]
    NotHierarchical(String),
}

/// Roots of the remote catalog and its cover image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    catalog: Url,
    covers: Url,
}

impl CatalogEndpoints {
    pub fn new(catalog: &str, covers: &str) -> Result<Self, EndpointError> {
        Ok(Self {
            catalog: parse_root(catalog)?,
            covers: parse_root(covers)?,
        })
    }

    /// Points both the catalog and the cover host at one base, e.g. a local stub server.
    pub fn with_base(base: &str) -> Result<Self, EndpointError> {
        Self::new(base, base)
    }

    pub fn catalog(&self) -> &Url {
        &self.catalog
    }

    pub fn covers(&self) -> &Url {
        &self.covers
    }
}

impl Default for CatalogEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL, DEFAULT_COVERS_URL)
            .expect("default catalog endpoints are valid urls")
    }
}

fn parse_root(raw: &str) -> Result<Url, EndpointError> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(EndpointError::NotHierarchical(raw.to_string()));
    }
    Ok(url)
}

/// Builds every outgoing catalog URL. Pure: never performs IO and never fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryBuilder {
    endpoints: CatalogEndpoints,
}

impl QueryBuilder {
    pub fn new(endpoints: CatalogEndpoints) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &CatalogEndpoints {
        &self.endpoints
    }

    /// Search URL with each present filter encoded in title/author/subject order, `limit` last.
    ///
    /// Values are percent-encoded as URI components, so a space becomes `%20`.
    /// Callers check [`SearchCriteria::has_filter`] first; absent filters are simply omitted.
    pub fn build(&self, criteria: &SearchCriteria) -> Url {
        let mut url = with_segments(&self.endpoints.catalog, &["search.json"]);
        let limit = criteria.limit.get().to_string();
        let query = criteria
            .filters()
            .chain(std::iter::once(("limit", limit.as_str())))
            .map(|(key, value)| format!("{key}={}", encode_component(value)))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query));
        url
    }

    /// Listing URL for a subject; the name is used verbatim as a path segment.
    pub fn subject_listing(&self, subject: &str) -> Url {
        let segment = format!("{subject}.json");
        let mut url = with_segments(&self.endpoints.catalog, &["subjects", &segment]);
        url.query_pairs_mut()
            .append_pair("limit", &SUBJECT_PAGE_SIZE.to_string());
        url
    }

    pub fn work_detail(&self, work_id: &str) -> Url {
        let segment = format!("{work_id}.json");
        with_segments(&self.endpoints.catalog, &["works", &segment])
    }

    /// Public, human-facing page of a work.
    pub fn work_page(&self, work_id: &str) -> Url {
        with_segments(&self.endpoints.catalog, &["works", work_id])
    }

    pub fn cover_image(&self, cover_id: &str, size: CoverSize) -> Url {
        let segment = format!("{cover_id}-{}.jpg", size.suffix());
        with_segments(&self.endpoints.covers, &["b", "id", &segment])
    }
}

/// Form encoding with `%20` for spaces. A literal `+` is already `%2B` at this point.
fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn with_segments(root: &Url, segments: &[&str]) -> Url {
    let mut url = root.clone();
    url.set_query(None);
    url.set_fragment(None);
    // Roots are validated as hierarchical in `CatalogEndpoints::new`.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
