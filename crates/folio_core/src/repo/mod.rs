//! Entry sources and the in-memory entry store.
//!
//! # Responsibility
//! - Define the data-source boundary the catalog loads entries through.
//! - Assemble the immutable store the views read from.
//!
//! # Invariants
//! - Store construction enforces `Entry::validate()` and slug uniqueness.
//! - Sources return semantic errors (`DuplicateSlug`, `Validation`) in addition
//!   to decode/IO errors.

pub mod entry_repo;
pub mod entry_store;
