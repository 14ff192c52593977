use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Update the loading bar, percentage and (optionally) the message.
pub fn set_progress(document: &web::Document, percent: u32, message: Option<&str>) {
    if let Some(bar) = document
        .get_element_by_id("loading-bar")
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        _ = bar.style().set_property("width", &format!("{}%", percent));
    }
    dom::set_text(document, "loading-percentage", &format!("{}%", percent));
    if let Some(msg) = message {
        dom::set_text(document, "loading-message", msg);
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id("loading-screen")
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(true)
}

/// Hide the loading screen and reveal the page chrome.
pub fn hide(document: &web::Document) {
    if is_hidden(document) {
        return;
    }
    dom::set_hidden(document, "loading-screen", true);
    for id in ["controls-panel", "specs-panel", "footer-credit", "model-status"] {
        dom::set_hidden(document, id, false);
    }
}

/// Hide after `delay_ms`, letting the 100% state show briefly.
pub fn hide_after(delay_ms: i32) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::once(move || {
        if let Some(doc) = dom::window_document() {
            hide(&doc);
        }
    });
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    );
    closure.forget();
}
