//! Browser implementations of the page boundaries.
//!
//! # Responsibility
//! - `DomLocation`: read `window.location.search`, push history entries.
//! - `DomSurface`: write filter buttons, cards, styles and overlays into the
//!   document.
//!
//! # Invariants
//! - DOM failures are logged and swallowed; nothing panics across the JS
//!   boundary.

use folio_core::{Card, FilterControl, Location, Overlay, OverlayId, PageSurface, Selection};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Url, UrlSearchParams, Window,
};

pub const FILTER_ID: &str = "filter";
pub const PROJECTS_ID: &str = "projects";
const ACTIVE_CLASS: &str = "active";

pub(crate) fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// URL query and history backed by `window.location` / `window.history`.
pub struct DomLocation {
    window: Window,
}

impl DomLocation {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Location for DomLocation {
    fn query_param(&self, key: &str) -> Option<String> {
        let search = self.window.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(key)
    }

    fn push_query_param(&mut self, key: &str, value: &str) {
        let result = (|| -> Result<(), JsValue> {
            let url = Url::new(&self.window.location().href()?)?;
            url.search_params().set(key, value);
            self.window
                .history()?
                .push_state_with_url(&JsValue::NULL, "", Some(&url.href()))
        })();
        if let Err(err) = result {
            warn!(
                "event=history_push module=web status=error key={} error={}",
                key,
                js_error(&err)
            );
        }
    }
}

/// Page surface writing into `#filter`, `#projects` and the root element.
pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            warn!("event=dom_lookup module=web status=missing id={}", id);
        }
        element
    }

    fn root(&self) -> Option<HtmlElement> {
        self.document
            .document_element()
            .and_then(|root| root.dyn_into::<HtmlElement>().ok())
    }
}

impl PageSurface for DomSurface {
    fn render_filters(&mut self, controls: &[FilterControl]) {
        if let Some(filter) = self.element(FILTER_ID) {
            let html: String = controls.iter().map(|control| control.to_html(false)).collect();
            filter.set_inner_html(&html);
        }
    }

    fn set_active_filter(&mut self, selection: &Selection) {
        let Ok(buttons) = self
            .document
            .query_selector_all(&format!("#{FILTER_ID} button"))
        else {
            return;
        };
        for index in 0..buttons.length() {
            let Some(button) = buttons
                .get(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let active = button.get_attribute("data-tag").as_deref() == Some(selection.as_str());
            let _ = button.class_list().toggle_with_force(ACTIVE_CLASS, active);
        }
    }

    fn replace_cards(&mut self, cards: &[Card]) {
        if let Some(projects) = self.element(PROJECTS_ID) {
            let html: String = cards.iter().map(Card::to_html).collect();
            projects.set_inner_html(&html);
        }
    }

    fn scroll_to_top(&mut self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn style_property(&self, name: &str) -> Option<String> {
        let value = self.root()?.style().get_property_value(name).ok()?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        let Some(root) = self.root() else {
            return;
        };
        if let Err(err) = root.style().set_property(name, value) {
            warn!(
                "event=style_set module=web status=error property={} error={}",
                name,
                js_error(&err)
            );
        }
    }

    fn show_overlay(&mut self, overlay: &Overlay) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(err) = body.insert_adjacent_html("beforeend", &overlay.to_html()) {
            warn!(
                "event=overlay_show module=web status=error overlay={} error={}",
                overlay.id,
                js_error(&err)
            );
        }
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        if let Ok(Some(modal)) = self
            .document
            .query_selector(&format!("[data-overlay=\"{id}\"]"))
        {
            modal.remove();
        }
    }
}
