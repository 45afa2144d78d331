//! Core logic for the Folio portfolio page.
//! This crate is the single source of truth for catalog, selection and
//! scale invariants; browser and CLI front ends only adapt it.

pub mod config;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod surface;

pub use config::{ConfigError, SiteConfig};
pub use logging::{default_log_level, sanitize_message, LogLevel};
#[cfg(feature = "file-logging")]
pub use logging::{init_logging, logging_status};
pub use model::color::{ColorPair, Gradient, Rgb};
pub use model::entry::{Entry, EntryLinks, EntryValidationError};
pub use model::scale::{ScaleBounds, ScaleKey, ScaleTokens};
pub use model::tag::{normalize_tag, Selection, TagToken, ALL_TOKEN};
pub use render::card::{render_cards, Card};
pub use render::markup::{demote_headings, CommonMarkConverter, MarkupConverter};
pub use repo::entry_repo::{
    EntryRepository, InMemoryEntryRepository, JsonEntryRepository, RepoError, RepoResult,
};
pub use repo::entry_store::EntryStore;
pub use service::catalog_view::visible_entries;
pub use service::lightbox_service::{
    LightboxController, Overlay, OverlayClick, OverlayId, OverlayTarget,
};
pub use service::page_service::CatalogPage;
pub use service::scale_service::{grow, shrink, ScaleDirection};
pub use service::selection_service::{
    FilterControl, SelectionChange, SelectionController, SelectionError, TagUniverse,
};
pub use surface::{Location, MemoryLocation, PageSurface, RecordingSurface, TAG_QUERY_PARAM};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
