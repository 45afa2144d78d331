//! Presentation and navigation boundaries.
//!
//! # Responsibility
//! - Define what the page core needs from the URL/history layer
//!   (`Location`) and from the display layer (`PageSurface`).
//! - Provide in-memory implementations for tests and static rendering.
//!
//! # Invariants
//! - Core state is the source of truth; surfaces are sinks, except for the
//!   style values read once at startup.
//! - Boundary calls are synchronous and run to completion.

mod memory;

pub use memory::{MemoryLocation, RecordingSurface};

use crate::model::tag::Selection;
use crate::render::card::Card;
use crate::service::lightbox_service::{Overlay, OverlayId};
use crate::service::selection_service::FilterControl;

/// Query parameter holding the current tag selection.
pub const TAG_QUERY_PARAM: &str = "tag";

/// URL query and history capability.
pub trait Location {
    /// Current value of one query parameter.
    fn query_param(&self, key: &str) -> Option<String>;
    /// Sets one query parameter and records a new history entry.
    fn push_query_param(&mut self, key: &str, value: &str);
}

/// Display capability the page renders into.
pub trait PageSurface {
    /// Draws the filter bar, in order.
    fn render_filters(&mut self, controls: &[FilterControl]);
    /// Marks the control for `selection` active and every other inactive.
    fn set_active_filter(&mut self, selection: &Selection);
    /// Replaces the whole card set.
    fn replace_cards(&mut self, cards: &[Card]);
    fn scroll_to_top(&mut self);
    /// Inline style value currently set on the document root.
    fn style_property(&self, name: &str) -> Option<String>;
    fn set_style_property(&mut self, name: &str, value: &str);
    fn show_overlay(&mut self, overlay: &Overlay);
    fn remove_overlay(&mut self, id: OverlayId);
}
