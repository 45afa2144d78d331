//! In-memory `Location` and `PageSurface` implementations.

use super::{Location, PageSurface};
use crate::model::tag::Selection;
use crate::render::card::Card;
use crate::service::lightbox_service::{Overlay, OverlayId};
use crate::service::selection_service::FilterControl;
use std::collections::BTreeMap;

type Query = BTreeMap<String, String>;

/// Browser-like history of query strings.
///
/// `push_query_param` drops forward entries the way a browser does after
/// navigating back and then pushing.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    entries: Vec<Query>,
    position: usize,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self {
            entries: vec![Query::new()],
            position: 0,
        }
    }

    /// Starts at a URL carrying `?{key}={value}`.
    pub fn with_query(key: &str, value: &str) -> Self {
        let mut query = Query::new();
        query.insert(key.to_string(), value.to_string());
        Self {
            entries: vec![query],
            position: 0,
        }
    }

    /// Number of history entries, including the initial one.
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// Steps back one entry. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Steps forward one entry. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Current query rendered as `?k=v&...`, or empty.
    pub fn search(&self) -> String {
        let current = &self.entries[self.position];
        if current.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = current.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("?{}", pairs.join("&"))
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl Location for MemoryLocation {
    fn query_param(&self, key: &str) -> Option<String> {
        self.entries[self.position].get(key).cloned()
    }

    fn push_query_param(&mut self, key: &str, value: &str) {
        let mut next = self.entries[self.position].clone();
        next.insert(key.to_string(), value.to_string());
        self.entries.truncate(self.position + 1);
        self.entries.push(next);
        self.position += 1;
    }
}

/// Surface that records every effect applied to it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub filters: Vec<FilterControl>,
    pub active_filter: Option<Selection>,
    pub cards: Vec<Card>,
    /// Number of full card replacements.
    pub card_renders: usize,
    pub scroll_to_top_calls: usize,
    pub styles: BTreeMap<String, String>,
    pub overlays: Vec<Overlay>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with inline styles already present on the document root.
    pub fn with_styles<'a>(styles: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            styles: styles
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Catalog section markup for the current card set.
    pub fn cards_html(&self) -> String {
        self.cards.iter().map(Card::to_html).collect()
    }
}

impl PageSurface for RecordingSurface {
    fn render_filters(&mut self, controls: &[FilterControl]) {
        self.filters = controls.to_vec();
    }

    fn set_active_filter(&mut self, selection: &Selection) {
        self.active_filter = Some(selection.clone());
    }

    fn replace_cards(&mut self, cards: &[Card]) {
        self.cards = cards.to_vec();
        self.card_renders += 1;
    }

    fn scroll_to_top(&mut self) {
        self.scroll_to_top_calls += 1;
    }

    fn style_property(&self, name: &str) -> Option<String> {
        self.styles.get(name).cloned()
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        self.styles.insert(name.to_string(), value.to_string());
    }

    fn show_overlay(&mut self, overlay: &Overlay) {
        self.overlays.push(overlay.clone());
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.retain(|overlay| overlay.id != id);
    }
}
