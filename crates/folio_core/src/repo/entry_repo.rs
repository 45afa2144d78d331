//! Entry data source contracts and JSON implementation.
//!
//! # Responsibility
//! - Provide already-decoded, ordered entry sequences to the store.
//! - Keep the on-disk/in-bundle data format out of view code.
//!
//! # Invariants
//! - Sources return entries in authored order; they never sort.
//! - Every returned entry has passed `Entry::validate()`.

use crate::logging::Stopwatch;
use crate::model::entry::{Entry, EntryValidationError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for loading and assembling catalog entries.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    DuplicateSlug(String),
    Decode(serde_json::Error),
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateSlug(slug) => write!(f, "duplicate entry slug: `{slug}`"),
            Self::Decode(err) => write!(f, "invalid entry data: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateSlug(_) => None,
            Self::Decode(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Source of catalog entries.
pub trait EntryRepository {
    /// Returns every entry in authored order.
    fn load_entries(&self) -> RepoResult<Vec<Entry>>;
}

/// Entries held in memory, e.g. built by tests or embedded at compile time.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntryRepository {
    entries: Vec<Entry>,
}

impl InMemoryEntryRepository {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl EntryRepository for InMemoryEntryRepository {
    fn load_entries(&self) -> RepoResult<Vec<Entry>> {
        for entry in &self.entries {
            entry.validate()?;
        }
        Ok(self.entries.clone())
    }
}

/// JSON array source in the `projects.json` layout.
#[derive(Debug, Clone)]
pub enum JsonEntryRepository {
    Text(String),
    File(PathBuf),
}

impl JsonEntryRepository {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl EntryRepository for JsonEntryRepository {
    fn load_entries(&self) -> RepoResult<Vec<Entry>> {
        let stopwatch = Stopwatch::start();
        let result = match self {
            Self::Text(text) => decode_entries(text),
            Self::File(path) => std::fs::read_to_string(path)
                .map_err(|source| RepoError::Io {
                    path: path.clone(),
                    source,
                })
                .and_then(|text| decode_entries(&text)),
        };

        match &result {
            Ok(entries) => info!(
                "event=entries_load module=repo status=ok count={} duration_ms={}",
                entries.len(),
                stopwatch.elapsed_ms()
            ),
            Err(err) => error!(
                "event=entries_load module=repo status=error duration_ms={} error={}",
                stopwatch.elapsed_ms(),
                err
            ),
        }
        result
    }
}

fn decode_entries(text: &str) -> RepoResult<Vec<Entry>> {
    Ok(serde_json::from_str::<Vec<Entry>>(text)?)
}
