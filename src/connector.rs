use crate::dom;
use crate::events;
use crate::fetch;
use crate::input;
use crate::loading;
use parts_core::viewer::{ConnectorViewer, ViewMode};
use parts_core::{asset_url, CONNECTOR_PART, PINS_PART};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedConnector = Rc<RefCell<ConnectorViewer>>;

/// Load the connector, then the optional pins; a failed connector swaps in
/// the procedural model.
pub async fn load_models(
    document: &web::Document,
    viewer: &SharedConnector,
    asset_base: &str,
) {
    loading::set_progress(document, 60, Some("Loading OBJ models..."));
    loading::set_progress(document, 65, Some("Loading full connector assembly..."));
    let connector_url = asset_url(asset_base, CONNECTOR_PART.file);
    let connector = match fetch::load_mesh(CONNECTOR_PART.name, &connector_url).await {
        Ok(tree) => tree,
        Err(e) => {
            log::error!("[load] {}", e);
            loading::set_progress(document, 75, Some("Error loading OBJ - using fallback"));
            viewer.borrow_mut().use_fallback();
            loading::hide_after(1000);
            return;
        }
    };

    loading::set_progress(document, 80, Some("Loading pogo pins..."));
    let pins_url = asset_url(asset_base, PINS_PART.file);
    let pins = fetch::load_mesh(PINS_PART.name, &pins_url).await;

    viewer.borrow_mut().assemble(Ok(connector), pins);
    loading::set_progress(document, 100, Some("Models loaded!"));
    loading::hide_after(500);
}

fn sync_zoom_ui(document: &web::Document, zoom: f32) {
    dom::set_input_value(document, "zoom-slider", &zoom.to_string());
    dom::set_text(document, "zoom-display", &format!("{:.1}", zoom));
}

/// Radio inputs named `model-view`.
fn model_radios(document: &web::Document) -> Vec<web::HtmlInputElement> {
    let Ok(nodes) = document.query_selector_all(r#"input[name="model-view"]"#) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<web::HtmlInputElement>().ok())
        .collect()
}

pub fn wire_controls(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    viewer: SharedConnector,
) {
    let v = viewer.clone();
    let doc = document.clone();
    dom::add_event_listener(document, "rotation-speed", "input", move |ev| {
        let value = dom::event_input_value(&ev).unwrap_or_default();
        let speed = v.borrow_mut().set_rotation_speed(&value);
        dom::set_text(&doc, "speed-display", &format!("{}x", speed));
    });

    // The page's initial checkbox state wins over the viewer default.
    viewer.borrow_mut().auto_rotate = dom::is_checked(document, "auto-rotate");
    let v = viewer.clone();
    let doc = document.clone();
    dom::add_event_listener(document, "auto-rotate", "change", move |_| {
        v.borrow_mut().auto_rotate = dom::is_checked(&doc, "auto-rotate");
    });

    let v = viewer.clone();
    let doc = document.clone();
    dom::add_event_listener(document, "zoom-slider", "input", move |ev| {
        let value = dom::event_input_value(&ev).unwrap_or_default();
        let zoom = v.borrow_mut().set_zoom(&value);
        dom::set_text(&doc, "zoom-display", &format!("{:.1}", zoom));
    });

    let radios = model_radios(document);
    for radio in &radios {
        let v = viewer.clone();
        let all = radios.clone();
        dom::add_listener(radio.unchecked_ref(), "change", move |ev: web::Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
            else {
                return;
            };
            if !input.checked() {
                return;
            }
            let Some(requested) = ViewMode::from_value(&input.value()) else {
                log::warn!("[dom] unknown model view {:?}", input.value());
                return;
            };
            let shown = v.borrow_mut().set_mode(requested);
            if shown != requested {
                for r in &all {
                    r.set_checked(ViewMode::from_value(&r.value()) == Some(shown));
                }
            }
        });
    }

    events::wire_orbit_input(canvas, viewer.clone());
    wire_pinch(document, canvas, viewer.clone());

    let v = viewer;
    let doc = document.clone();
    events::wire_wheel(canvas, move |delta_y| {
        let zoom = v.borrow_mut().wheel(delta_y);
        sync_zoom_ui(&doc, zoom);
    });
}

fn wire_pinch(document: &web::Document, canvas: &web::HtmlCanvasElement, viewer: SharedConnector) {
    let target: &web::EventTarget = canvas.unchecked_ref();

    let v = viewer.clone();
    dom::add_listener(target, "touchstart", move |ev: web::TouchEvent| {
        if let [a, b] = input::touch_points(&ev).as_slice() {
            v.borrow_mut().pinch_start(*a, *b);
        }
    });

    let v = viewer;
    let doc = document.clone();
    dom::add_active_listener(target, "touchmove", move |ev: web::TouchEvent| {
        let points = input::touch_points(&ev);
        let [a, b] = points.as_slice() else {
            return;
        };
        ev.prevent_default();
        let zoom = v.borrow_mut().pinch_move(*a, *b);
        if let Some(zoom) = zoom {
            sync_zoom_ui(&doc, zoom);
        }
    });
}
