//! Catalog entry domain model.
//!
//! # Responsibility
//! - Define the canonical portfolio entry record consumed by views.
//! - Validate record-level invariants on construction and on decode.
//!
//! # Invariants
//! - `slug` is non-blank; it namespaces image files so it must stay stable.
//! - `tags` is non-empty and contains no blank value.
//! - An empty `links.url` is normalized to `None`.
//! - `score` is finite so ranking order is well defined.

use crate::model::tag::{normalize_tags, TagToken};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outbound links attached to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLinks {
    /// External project page.
    #[serde(default)]
    pub url: Option<String>,
}

/// One portfolio entry, immutable once loaded into a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord")]
pub struct Entry {
    pub title: String,
    pub company: String,
    /// Display string, e.g. `2023` or `2021 - 2022`.
    pub year: String,
    /// Stable identifier, unique within a store.
    pub slug: String,
    /// Raw body text handed to the markup converter.
    pub content: String,
    /// Raw tag strings as authored.
    pub tags: Vec<String>,
    pub links: EntryLinks,
    /// Image filename suffixes, resolved as `{slug}_{suffix}`.
    pub images: Vec<String>,
    /// Ranking weight; higher sorts first.
    pub score: f64,
}

/// Validation errors for entry invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    BlankSlug,
    BlankTitle { slug: String },
    NoTags { slug: String },
    BlankTag { slug: String },
    NonFiniteScore { slug: String },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankSlug => write!(f, "entry slug must not be blank"),
            Self::BlankTitle { slug } => write!(f, "entry `{slug}` has a blank title"),
            Self::NoTags { slug } => write!(f, "entry `{slug}` must carry at least one tag"),
            Self::BlankTag { slug } => write!(f, "entry `{slug}` contains a blank tag"),
            Self::NonFiniteScore { slug } => write!(f, "entry `{slug}` has a non-finite score"),
        }
    }
}

impl Error for EntryValidationError {}

impl Entry {
    /// Creates an entry with the required identity fields.
    ///
    /// Optional fields start empty and `score` starts at `0.0`.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Self, EntryValidationError> {
        let entry = Self {
            title: title.into(),
            company: String::new(),
            year: String::new(),
            slug: slug.into(),
            content: String::new(),
            tags,
            links: EntryLinks::default(),
            images: Vec::new(),
            score: 0.0,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.links.url = non_empty(url.into());
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.slug.trim().is_empty() {
            return Err(EntryValidationError::BlankSlug);
        }
        if self.title.trim().is_empty() {
            return Err(EntryValidationError::BlankTitle {
                slug: self.slug.clone(),
            });
        }
        if self.tags.is_empty() {
            return Err(EntryValidationError::NoTags {
                slug: self.slug.clone(),
            });
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(EntryValidationError::BlankTag {
                slug: self.slug.clone(),
            });
        }
        if !self.score.is_finite() {
            return Err(EntryValidationError::NonFiniteScore {
                slug: self.slug.clone(),
            });
        }
        Ok(())
    }

    /// Normalized tag tokens, deduplicated in authored order.
    pub fn tag_tokens(&self) -> Vec<TagToken> {
        normalize_tags(&self.tags)
    }

    /// External link, if any.
    pub fn url(&self) -> Option<&str> {
        self.links.url.as_deref()
    }

    /// Whether the card for this entry reacts to pointer interaction.
    pub fn is_interactive(&self) -> bool {
        self.url().is_some() || !self.images.is_empty()
    }
}

/// Wire shape for entries; converted through `Entry::validate`.
#[derive(Deserialize)]
struct EntryRecord {
    title: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    year: YearValue,
    slug: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    links: EntryLinks,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    score: f64,
}

/// Years are authored either as text or as a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum YearValue {
    Text(String),
    Number(i64),
}

impl Default for YearValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<YearValue> for String {
    fn from(value: YearValue) -> Self {
        match value {
            YearValue::Text(text) => text,
            YearValue::Number(number) => number.to_string(),
        }
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = EntryValidationError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let entry = Self {
            title: record.title,
            company: record.company,
            year: record.year.into(),
            slug: record.slug,
            content: record.content,
            tags: record.tags,
            links: EntryLinks {
                url: record.links.url.and_then(non_empty),
            },
            images: record.images,
            score: record.score,
        };
        entry.validate()?;
        Ok(entry)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryValidationError};

    #[test]
    fn new_rejects_empty_tag_set() {
        let err = Entry::new("a", "Alpha", vec![]).unwrap_err();
        assert_eq!(
            err,
            EntryValidationError::NoTags {
                slug: "a".to_string()
            }
        );
    }

    #[test]
    fn empty_url_is_not_a_link() {
        let entry = Entry::new("a", "Alpha", vec!["Web".to_string()])
            .unwrap()
            .with_url("  ");
        assert_eq!(entry.url(), None);
        assert!(!entry.is_interactive());
    }

    #[test]
    fn images_make_entry_interactive() {
        let entry = Entry::new("a", "Alpha", vec!["Web".to_string()])
            .unwrap()
            .with_images(vec!["1.png".to_string()]);
        assert!(entry.is_interactive());
    }

    #[test]
    fn validate_rejects_non_finite_scores() {
        let base = Entry::new("a", "Alpha", vec!["Web".to_string()]).unwrap();
        for score in [f64::NAN, -f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = base.clone().with_score(score).validate().unwrap_err();
            assert_eq!(
                err,
                EntryValidationError::NonFiniteScore {
                    slug: "a".to_string()
                }
            );
        }
        assert!(base.with_score(-3.5).validate().is_ok());
    }
}
