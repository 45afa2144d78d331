//! Tag tokens and catalog selection state.
//!
//! # Responsibility
//! - Normalize free-form tag strings into stable tokens.
//! - Model the single "current selection" of the filter bar.
//!
//! # Invariants
//! - `normalize_tag` is pure and idempotent: normalizing a token's text yields
//!   the same token.
//! - A `TagToken` is never empty and never contains whitespace.
//! - The literal token `all` always denotes `Selection::All`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Query/token value reserved for the unfiltered selection.
pub const ALL_TOKEN: &str = "all";

/// Normalized tag identifier used for filtering, CSS classes and URLs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagToken(String);

impl TagToken {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for TagToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for TagToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Normalizes one raw tag string into its token form.
///
/// Rules: trim, lowercase, collapse every internal whitespace run to `-`.
/// Returns `None` for blank input.
pub fn normalize_tag(raw: &str) -> Option<TagToken> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    Some(TagToken(
        WHITESPACE_RUN_RE.replace_all(&lowered, "-").into_owned(),
    ))
}

/// Normalizes a tag list, dropping blanks and duplicates while keeping the
/// first-seen order.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<TagToken> {
    let mut tokens: Vec<TagToken> = Vec::with_capacity(tags.len());
    for tag in tags {
        if let Some(token) = normalize_tag(tag.as_ref()) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }
    tokens
}

/// Current filter selection: everything, or one tag token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Tag(TagToken),
}

impl Selection {
    /// Parses a raw query/button value. `all` (any case) maps to `All`.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = normalize_tag(raw)?;
        if token.as_str() == ALL_TOKEN {
            Some(Self::All)
        } else {
            Some(Self::Tag(token))
        }
    }

    /// Value written to the `tag` query parameter and filter control.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_TOKEN,
            Self::Tag(token) => token.as_str(),
        }
    }

    /// Returns whether an entry carrying `tokens` passes this selection.
    pub fn admits(&self, tokens: &[TagToken]) -> bool {
        match self {
            Self::All => true,
            Self::Tag(token) => tokens.contains(token),
        }
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
