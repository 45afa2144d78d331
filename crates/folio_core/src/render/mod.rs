//! Card rendering and the markup converter boundary.
//!
//! # Responsibility
//! - Turn visible entries into display cards.
//! - Keep body conversion behind `MarkupConverter` so views stay testable
//!   without a real converter.
//!
//! # Invariants
//! - Rendering is a pure function of entries, converter and image base.
//! - A re-render fully replaces the previous card set.

pub mod card;
pub mod markup;
