#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const ENTRIES: &str = r#"[
    {"title": "Site", "slug": "site", "tags": ["Web"], "score": 1},
    {"title": "Posters", "slug": "posters", "tags": ["Print"], "images": ["a.png"], "score": 2}
]"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn prepare_page(document: &Document) {
    let body = document.body().unwrap();
    for id in ["filter", "projects"] {
        if document.get_element_by_id(id).is_none() {
            let element = document.create_element("div").unwrap();
            element.set_id(id);
            body.append_child(&element).unwrap();
        }
    }
}

fn click(document: &Document, selector: &str) {
    document
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
}

fn count(document: &Document, selector: &str) -> u32 {
    document.query_selector_all(selector).unwrap().length()
}

#[wasm_bindgen_test]
fn invalid_entries_are_reported_as_errors() {
    let err = folio_web::mount(r#"[{"title": "x", "slug": "x", "tags": []}]"#.to_string(), None)
        .unwrap_err();
    assert!(err.as_string().unwrap().contains("at least one tag"));
}

#[wasm_bindgen_test]
fn mount_renders_and_reacts_to_clicks() {
    let document = document();
    prepare_page(&document);
    folio_web::mount(ENTRIES.to_string(), None).unwrap();

    assert_eq!(count(&document, "#filter button"), 3);
    assert_eq!(count(&document, "#projects article"), 2);
    let root = document
        .document_element()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    assert_eq!(
        root.style().get_property_value("font-size").unwrap(),
        "12px"
    );

    click(&document, "#filter button[data-tag=\"print\"]");
    assert_eq!(count(&document, "#projects article"), 1);
    assert_eq!(count(&document, "#filter button.active"), 1);
    let search = web_sys::window().unwrap().location().search().unwrap();
    assert!(search.contains("tag=print"));

    click(&document, "#projects .project-image");
    assert_eq!(count(&document, ".modal"), 1);
    click(&document, ".modal .modal-container img");
    assert_eq!(count(&document, ".modal"), 1);
    click(&document, ".modal .modal-close");
    assert_eq!(count(&document, ".modal"), 0);
}
