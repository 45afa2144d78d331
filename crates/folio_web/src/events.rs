//! DOM event wiring.
//!
//! Every listener borrows the shared page for one handler and releases it
//! before returning. Listeners are registered once per mount and live for the
//! page lifetime (`Closure::forget`).

use crate::dom::{js_error, DomLocation, DomSurface, FILTER_ID, PROJECTS_ID};
use folio_core::{CatalogPage, ColorPair, CommonMarkConverter, OverlayId, OverlayTarget};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, MouseEvent, Window};

pub type BrowserPage = CatalogPage<DomLocation, DomSurface, CommonMarkConverter>;
pub type SharedPage = Rc<RefCell<BrowserPage>>;

const SIZE_PLUS_SELECTOR: &str = ".size-controller-button-plus";
const SIZE_MINUS_SELECTOR: &str = ".size-controller-button-minus";
const PALETTE_SELECTOR: &str = ".color-palette";
const PALETTE_WHITE_SELECTOR: &str = ".color-palette-white";
const PALETTE_BLACK_SELECTOR: &str = ".color-palette-black";

/// Registers every page listener.
pub fn bind(window: &Window, document: &Document, page: SharedPage) -> Result<(), JsValue> {
    if let Some(filter) = document.get_element_by_id(FILTER_ID) {
        bind_filter(&filter, page.clone())?;
    }
    if let Some(projects) = document.get_element_by_id(PROJECTS_ID) {
        bind_projects(&projects, page.clone())?;
    }
    if let Some(body) = document.body() {
        bind_overlays(&body, page.clone())?;
    }
    bind_size_controller(document, page.clone())?;
    bind_color_palette(document, page.clone())?;

    let popstate_page = page;
    listen(window, "popstate", move |_event| {
        with_page(&popstate_page, |page| page.sync_from_location());
    })
}

fn bind_filter(filter: &Element, page: SharedPage) -> Result<(), JsValue> {
    listen(filter, "click", move |event| {
        let Some(button) = closest(&event, "button[data-tag]") else {
            return;
        };
        let Some(tag) = button.get_attribute("data-tag") else {
            return;
        };
        with_page(&page, |page| {
            if let Err(err) = page.select(&tag) {
                debug!("event=filter_click module=web status=rejected error={}", err);
            }
        });
    })
}

fn bind_projects(projects: &Element, page: SharedPage) -> Result<(), JsValue> {
    listen(projects, "click", move |event| {
        if closest(&event, ".project-images").is_none() {
            return;
        }
        let Some(slug) =
            closest(&event, "article[data-slug]").and_then(|card| card.get_attribute("data-slug"))
        else {
            return;
        };
        with_page(&page, |page| {
            page.open_lightbox(&slug);
        });
    })
}

fn bind_overlays(body: &Element, page: SharedPage) -> Result<(), JsValue> {
    listen(body, "click", move |event| {
        let Some(id) = closest(&event, ".modal[data-overlay]")
            .and_then(|modal| modal.get_attribute("data-overlay"))
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(OverlayId::from_raw)
        else {
            return;
        };
        let target = if closest(&event, ".modal-close").is_some() {
            OverlayTarget::CloseButton
        } else if closest(&event, ".modal-container").is_some() {
            event.prevent_default();
            OverlayTarget::Image
        } else {
            OverlayTarget::Background
        };
        with_page(&page, |page| {
            page.click_overlay(id, target);
        });
    })
}

fn bind_size_controller(document: &Document, page: SharedPage) -> Result<(), JsValue> {
    if let Some(plus) = optional_element(document, SIZE_PLUS_SELECTOR) {
        let page = page.clone();
        listen(&plus, "click", move |_event| {
            with_page(&page, |page| {
                page.grow();
            });
        })?;
    }
    if let Some(minus) = optional_element(document, SIZE_MINUS_SELECTOR) {
        listen(&minus, "click", move |_event| {
            with_page(&page, |page| {
                page.shrink();
            });
        })?;
    }
    Ok(())
}

fn bind_color_palette(document: &Document, page: SharedPage) -> Result<(), JsValue> {
    if let Some(palette) = optional_element(document, PALETTE_SELECTOR) {
        let page = page.clone();
        let strip = palette.clone();
        listen(&palette, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            // Only while a pointer button is held.
            if mouse.buttons() == 0 {
                return;
            }
            let rect = strip.get_bounding_client_rect();
            let x = f64::from(mouse.client_x()) - rect.left();
            with_page(&page, |page| {
                page.pick_color(x, rect.width());
            });
        })?;
    }
    let presets = [
        (PALETTE_WHITE_SELECTOR, ColorPair::light()),
        (PALETTE_BLACK_SELECTOR, ColorPair::dark()),
    ];
    for (selector, pair) in presets {
        if let Some(preset) = optional_element(document, selector) {
            let page = page.clone();
            listen(&preset, "mousemove", move |_event| {
                with_page(&page, |page| page.apply_colors(pair));
            })?;
        }
    }
    Ok(())
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn with_page(page: &SharedPage, command: impl FnOnce(&mut BrowserPage)) {
    match page.try_borrow_mut() {
        Ok(mut page) => command(&mut page),
        Err(_) => warn!("event=page_borrow module=web status=busy"),
    }
}

fn closest(event: &Event, selector: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(selector).ok().flatten()
}

fn optional_element(document: &Document, selector: &str) -> Option<Element> {
    match document.query_selector(selector) {
        Ok(found) => {
            if found.is_none() {
                debug!(
                    "event=dom_lookup module=web status=missing selector={}",
                    selector
                );
            }
            found
        }
        Err(err) => {
            warn!(
                "event=dom_lookup module=web status=error selector={} error={}",
                selector,
                js_error(&err)
            );
            None
        }
    }
}
