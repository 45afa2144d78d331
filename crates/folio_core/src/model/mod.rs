//! Domain model for the portfolio catalog page.
//!
//! # Responsibility
//! - Define catalog entries and the tag tokens derived from them.
//! - Define the bounded UI scale tokens and the theme color model.
//!
//! # Invariants
//! - Entries are validated before they reach any view.
//! - Scale token values never leave their per-key bounds.

pub mod color;
pub mod entry;
pub mod scale;
pub mod tag;
