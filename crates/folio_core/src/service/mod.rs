//! Page use-case services.
//!
//! # Responsibility
//! - Derive the visible catalog from the store and the current selection.
//! - Own the selection, lightbox and size controller transitions.
//! - Keep presentation adapters decoupled from state rules.

pub mod catalog_view;
pub mod lightbox_service;
pub mod page_service;
pub mod scale_service;
pub mod selection_service;
