//! Browser entry points for the Folio catalog page.
//!
//! # Responsibility
//! - Expose `mount` and logging setup to JavaScript via wasm-bindgen.
//! - Adapt DOM events to `CatalogPage` commands.
//!
//! # Invariants
//! - Exported functions must not panic across the JS boundary.
//! - Load and config errors are returned as JS errors; runtime DOM errors
//!   are only logged.

mod console_log;
mod dom;
mod events;

pub use console_log::init_console_logging;
pub use dom::{DomLocation, DomSurface};

use folio_core::{
    core_version as core_version_inner, default_log_level, CatalogPage, CommonMarkConverter,
    EntryStore, JsonEntryRepository, SiteConfig,
};
use log::info;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Core crate version.
#[wasm_bindgen]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes console logging once per page.
///
/// Returns an empty string on success and the error message on failure.
#[wasm_bindgen]
pub fn init_logging(level: String) -> String {
    match init_console_logging(level.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Builds the catalog page from `entries_json` and binds every listener.
///
/// `config_json` overrides the built-in site defaults when present.
///
/// # Errors
/// - Entries fail to decode or validate.
/// - Config fails to decode.
/// - No `window`/`document` is available.
#[wasm_bindgen]
pub fn mount(entries_json: String, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // An explicit `init_logging` call may already have picked the level.
    let _ = init_console_logging(default_log_level().as_str());

    let store = EntryStore::load(&JsonEntryRepository::from_text(entries_json))
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let config = match config_json.as_deref() {
        Some(text) if !text.trim().is_empty() => {
            SiteConfig::from_json_str(text).map_err(|err| JsValue::from_str(&err.to_string()))?
        }
        _ => SiteConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    let mut page = CatalogPage::new(
        store,
        config,
        DomLocation::new(window.clone()),
        DomSurface::new(window.clone(), document.clone()),
        CommonMarkConverter::default(),
    );
    page.start();
    events::bind(&window, &document, Rc::new(RefCell::new(page)))?;

    info!("event=mount module=web status=ok");
    Ok(())
}
