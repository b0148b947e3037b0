//! Maps raw catalog records onto [`BookSummary`] and [`BookDetail`].
//!
//! Every function here is total: a missing, null, or wrongly typed field falls
//! back to its documented default instead of failing the whole record.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{MISSING_DESCRIPTION, UNKNOWN_AUTHOR, UNTITLED};
use crate::{BookDetail, BookSummary};

/// Top-level list field of a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    /// `docs`, returned by the search endpoint.
    Docs,
    /// `works`, returned by the subject endpoint.
    Works,
}

impl ListingField {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingField::Docs => "docs",
            ListingField::Works => "works",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedListing {
    #[error("body is not json: {0}")]
    NotJson(String),
    #[error("body has no `{field}` list")]
    MissingList { field: &'static str },
}

/// Extracts the raw record list from a listing body. A `null` list is an empty list.
pub fn decode_listing(body: &[u8], field: ListingField) -> Result<Vec<Value>, MalformedListing> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| MalformedListing::NotJson(err.to_string()))?;
    let missing = MalformedListing::MissingList {
        field: field.as_str(),
    };
    match value.get(field.as_str()) {
        Some(Value::Array(records)) => Ok(records.clone()),
        Some(Value::Null) => Ok(Vec::new()),
        _ => Err(missing),
    }
}

/// One element of an author list, in every shape the catalog emits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum AuthorEntry {
    /// `"Frank Herbert"` (search records' `author_name`).
    Name(String),
    /// `{ "name": "Frank Herbert", "key": ... }` (subject listings).
    Named { name: String },
    /// `{ "author": { "key": ..., "name"?: ... } }` (work records).
    Linked { author: AuthorLink },
    Unrecognized(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct AuthorLink {
    #[serde(default)]
    name: Option<String>,
}

impl AuthorEntry {
    fn name(&self) -> Option<&str> {
        let name = match self {
            AuthorEntry::Name(name) | AuthorEntry::Named { name } => Some(name.as_str()),
            AuthorEntry::Linked { author } => author.name.as_deref(),
            AuthorEntry::Unrecognized(_) => None,
        };
        name.map(str::trim).filter(|n| !n.is_empty())
    }
}

/// A work description: either plain text or a typed `{ "type", "value" }` wrapper.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum DescriptionField {
    Text(String),
    Wrapped { value: String },
    Unrecognized(Value),
}

impl DescriptionField {
    fn text(&self) -> Option<&str> {
        let text = match self {
            DescriptionField::Text(text) | DescriptionField::Wrapped { value: text } => text,
            DescriptionField::Unrecognized(_) => return None,
        };
        Some(text.as_str()).filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
struct RawWorkRecord {
    #[serde(deserialize_with = "lenient")]
    key: Option<String>,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    subtitle: Option<String>,
    #[serde(deserialize_with = "lenient")]
    author_name: Vec<AuthorEntry>,
    #[serde(deserialize_with = "lenient")]
    authors: Vec<AuthorEntry>,
    #[serde(deserialize_with = "lenient")]
    cover_i: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    cover_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    covers: Vec<Option<i64>>,
    #[serde(deserialize_with = "lenient")]
    first_publish_year: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    first_publish_date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    number_of_pages: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    description: Option<DescriptionField>,
    #[serde(deserialize_with = "lenient")]
    publishers: Vec<Value>,
    #[serde(deserialize_with = "lenient")]
    subjects: Vec<Value>,
}

impl RawWorkRecord {
    fn from_value(raw: &Value) -> Self {
        Self::deserialize(raw).unwrap_or_default()
    }

    fn work_id(&self) -> Option<String> {
        self.key.as_deref().and_then(work_id_from_key)
    }

    fn title(&self) -> String {
        non_blank(self.title.as_deref()).unwrap_or(UNTITLED).to_string()
    }

    fn subtitle(&self) -> Option<String> {
        non_blank(self.subtitle.as_deref()).map(ToOwned::to_owned)
    }

    /// Flat name list first, then the object list, then the unknown-author singleton.
    fn author_names(&self) -> Vec<String> {
        [&self.author_name, &self.authors]
            .into_iter()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(AuthorEntry::name)
                    .map(ToOwned::to_owned)
                    .collect::<Vec<_>>()
            })
            .find(|names| !names.is_empty())
            .unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()])
    }

    fn cover_ids(&self) -> Vec<i64> {
        self.covers
            .iter()
            .flatten()
            .copied()
            .filter(|id| *id > 0)
            .collect()
    }

    /// Single-id fields first, then the first usable element of the id list.
    fn primary_cover(&self) -> Option<i64> {
        [self.cover_i, self.cover_id]
            .into_iter()
            .flatten()
            .find(|id| *id > 0)
            .or_else(|| self.cover_ids().first().copied())
    }

    fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.work_id(),
            title: self.title(),
            author_names: self.author_names(),
            cover_image_id: self.primary_cover().map(|id| id.to_string()),
            first_publish_year: self.first_publish_year,
        }
    }
}

/// Normalizes one element of the search endpoint's `docs` list.
pub fn normalize_search_record(raw: &Value) -> BookSummary {
    RawWorkRecord::from_value(raw).summary()
}

/// Normalizes one element of the subject endpoint's `works` list.
pub fn normalize_subject_record(raw: &Value) -> BookSummary {
    RawWorkRecord::from_value(raw).summary()
}

/// Normalizes a work record. `fallback_id` is used when the record carries no usable key.
pub fn normalize_detail_record(raw: &Value, fallback_id: &str) -> BookDetail {
    let record = RawWorkRecord::from_value(raw);
    BookDetail {
        id: record.work_id().unwrap_or_else(|| fallback_id.to_string()),
        title: record.title(),
        subtitle: record.subtitle(),
        author_names: record.author_names(),
        cover_image_ids: record.cover_ids(),
        description: record
            .description
            .as_ref()
            .and_then(DescriptionField::text)
            .unwrap_or(MISSING_DESCRIPTION)
            .to_string(),
        first_publish_date: non_blank(record.first_publish_date.as_deref()).map(ToOwned::to_owned),
        number_of_pages: record.number_of_pages,
        publishers: text_entries(&record.publishers),
        subjects: text_entries(&record.subjects),
    }
}

/// Final `/`-delimited segment of a key such as `/works/OL123W`.
pub fn work_id_from_key(key: &str) -> Option<String> {
    key.rsplit('/')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
}

/// Keeps the non-blank strings of a list, skipping entries of any other shape.
fn text_entries(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|value| non_blank(value.as_str()))
        .map(ToOwned::to_owned)
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Decodes a field, falling back to its default when the value has an unexpected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
