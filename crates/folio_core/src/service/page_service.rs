//! Catalog page command surface.
//!
//! # Responsibility
//! - Own the page-wide state: selection, scale tokens and open overlays.
//! - Translate each command into the full set of surface/location effects.
//!
//! # Invariants
//! - Each command runs to completion before the next one starts (`&mut self`).
//! - `select` applies URL, active control, card re-render and scroll together,
//!   or nothing at all.
//! - Scale tokens are committed to the surface as a full set.
//! - The in-memory scale value is the source of truth after `start`.

use crate::config::SiteConfig;
use crate::logging::Stopwatch;
use crate::model::color::ColorPair;
use crate::model::scale::{ScaleKey, ScaleTokens};
use crate::model::tag::Selection;
use crate::render::card::{render_cards, Card};
use crate::render::markup::MarkupConverter;
use crate::repo::entry_store::EntryStore;
use crate::service::catalog_view::visible_entries;
use crate::service::lightbox_service::{
    LightboxController, OverlayClick, OverlayId, OverlayTarget,
};
use crate::service::scale_service::{self, ScaleDirection};
use crate::service::selection_service::{SelectionController, SelectionError, TagUniverse};
use crate::surface::{Location, PageSurface};
use log::{debug, info};

/// One catalog page session.
pub struct CatalogPage<L, S, M>
where
    L: Location,
    S: PageSurface,
    M: MarkupConverter,
{
    store: EntryStore,
    config: SiteConfig,
    selection: SelectionController,
    lightbox: LightboxController,
    scale: ScaleTokens,
    cards: Vec<Card>,
    location: L,
    surface: S,
    converter: M,
}

impl<L, S, M> CatalogPage<L, S, M>
where
    L: Location,
    S: PageSurface,
    M: MarkupConverter,
{
    pub fn new(store: EntryStore, config: SiteConfig, location: L, surface: S, converter: M) -> Self {
        let universe = TagUniverse::build(&store, &config);
        let scale = config.initial_scale;
        Self {
            store,
            config,
            selection: SelectionController::new(universe),
            lightbox: LightboxController::new(),
            scale,
            cards: Vec::new(),
            location,
            surface,
            converter,
        }
    }

    /// Page-ready bootstrap: filter bar, URL restore, first render, scale.
    ///
    /// Scale values already present on the surface are adopted (malformed
    /// ones degrade to the key minimum); otherwise the configured initial
    /// scale is used.
    pub fn start(&mut self) {
        let stopwatch = Stopwatch::start();
        self.surface
            .render_filters(self.selection.universe().controls());

        let restored = self.selection.restore_from_location(&self.location).clone();
        self.surface.set_active_filter(&restored);
        self.render();

        let has_inline_scale = ScaleKey::ALL
            .iter()
            .any(|key| self.surface.style_property(key.css_property()).is_some());
        if has_inline_scale {
            let surface = &self.surface;
            self.scale = ScaleTokens::from_css(|name| surface.style_property(name));
        }
        self.commit_scale();

        info!(
            "event=page_start module=page status=ok entries={} tags={} selection={} duration_ms={}",
            self.store.len(),
            self.selection.universe().controls().len() - 1,
            restored,
            stopwatch.elapsed_ms()
        );
    }

    /// Filter button activation.
    pub fn select(&mut self, raw: &str) -> Result<(), SelectionError> {
        let change = self.selection.select(raw, &mut self.location)?;
        self.surface.set_active_filter(&change.current);
        self.render();
        self.surface.scroll_to_top();
        Ok(())
    }

    /// Re-reads the URL after history navigation (back/forward) and
    /// re-renders without pushing a new history entry.
    pub fn sync_from_location(&mut self) {
        let previous = self.selection.current().clone();
        let current = self.selection.restore_from_location(&self.location).clone();
        if current == previous {
            return;
        }
        debug!(
            "event=selection_sync module=page status=ok from={} to={}",
            previous, current
        );
        self.surface.set_active_filter(&current);
        self.render();
    }

    pub fn grow(&mut self) -> ScaleTokens {
        self.resize(ScaleDirection::Grow)
    }

    pub fn shrink(&mut self) -> ScaleTokens {
        self.resize(ScaleDirection::Shrink)
    }

    /// Opens a lightbox with the images of the card `slug`.
    ///
    /// Returns `None` when the card has no images.
    pub fn open_lightbox(&mut self, slug: &str) -> Option<OverlayId> {
        let images = self
            .cards
            .iter()
            .find(|card| card.slug == slug)
            .filter(|card| card.has_images())?
            .images
            .clone();
        let overlay = self.lightbox.open(images);
        self.surface.show_overlay(overlay);
        Some(overlay.id)
    }

    pub fn click_overlay(&mut self, id: OverlayId, target: OverlayTarget) -> OverlayClick {
        let outcome = self.lightbox.click(id, target);
        if outcome == OverlayClick::Closed {
            self.surface.remove_overlay(id);
        }
        outcome
    }

    /// Applies the gradient color under a pointer at `x` of a `width` strip.
    pub fn pick_color(&mut self, x: f64, width: f64) -> ColorPair {
        let pair = self.config.gradient.pick(x, width);
        self.apply_colors(pair);
        pair
    }

    pub fn apply_colors(&mut self, pair: ColorPair) {
        for (name, value) in pair.css_properties() {
            self.surface.set_style_property(name, &value);
        }
    }

    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    pub fn scale(&self) -> ScaleTokens {
        self.scale
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn lightbox(&self) -> &LightboxController {
        &self.lightbox
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    fn render(&mut self) {
        let visible = visible_entries(&self.store, self.selection.current());
        self.cards = render_cards(visible, &self.converter, self.config.image_base());
        self.surface.replace_cards(&self.cards);
    }

    fn resize(&mut self, direction: ScaleDirection) -> ScaleTokens {
        self.scale = scale_service::step(self.scale, direction);
        self.commit_scale();
        self.scale
    }

    fn commit_scale(&mut self) {
        for (name, value) in self.scale.css_properties() {
            self.surface.set_style_property(name, &value);
        }
    }
}
