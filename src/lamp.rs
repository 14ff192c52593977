use crate::dom;
use crate::events;
use crate::fetch;
use crate::loading;
use crate::storage::PageStore;
use parts_core::viewer::lamp::TransformFields;
use parts_core::viewer::{loading_message, loading_progress, LampViewer, TransformInputs};
use parts_core::asset_url;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedLamp = Rc<RefCell<LampViewer<PageStore>>>;

const POSITION_IDS: [&str; 3] = ["pos-x", "pos-y", "pos-z"];
const ROTATION_IDS: [&str; 3] = ["rot-x", "rot-y", "rot-z"];
const CAMERA_IDS: [&str; 3] = ["cam-x", "cam-y", "cam-z"];

/// Restore the saved camera and mirror it into the form.
pub fn restore_camera(document: &web::Document, viewer: &SharedLamp) {
    if viewer.borrow_mut().restore_camera() {
        log::info!("[camera] applied saved settings");
    }
    update_camera_ui(document, &viewer.borrow());
}

/// Fetch every catalog part in order, updating the loading bar as we go.
pub async fn load_parts(document: &web::Document, viewer: &SharedLamp, asset_base: &str) {
    loading::set_progress(document, 55, Some("Loading parts..."));
    let catalog = viewer.borrow().catalog();
    let count = catalog.len();
    for (i, spec) in catalog.iter().enumerate() {
        loading::set_progress(
            document,
            loading_progress(i, count),
            Some(&loading_message(spec.name, i, count)),
        );
        let url = asset_url(asset_base, spec.file);
        match fetch::load_mesh(spec.name, &url).await {
            Ok(tree) => {
                _ = viewer.borrow_mut().add_loaded_part(i, tree);
            }
            Err(e) => viewer.borrow_mut().record_load_failure(i, e),
        }
    }

    let loaded = viewer.borrow().finish_loading();
    populate_selector(document, &viewer.borrow());
    loading::set_progress(document, 100, Some("All parts loaded!"));
    dom::set_text(document, "parts-count", &format!("{} parts loaded", loaded));
    loading::hide_after(500);
}

fn populate_selector(document: &web::Document, viewer: &LampViewer<PageStore>) {
    let Some(select) = document
        .get_element_by_id("object-selector")
        .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
    else {
        return;
    };
    select.set_inner_html(r#"<option value="">-- Select Part --</option>"#);
    for (i, name) in viewer.part_names().enumerate() {
        if let Ok(option) = web::HtmlOptionElement::new_with_text_and_value(name, &i.to_string()) {
            _ = select.add_with_html_option_element(&option);
        }
    }
}

fn update_transform_ui(document: &web::Document, fields: &TransformFields) {
    for (id, value) in POSITION_IDS.iter().zip(&fields.position) {
        dom::set_input_value(document, id, value);
    }
    for (id, value) in ROTATION_IDS.iter().zip(&fields.rotation) {
        dom::set_input_value(document, id, value);
    }
    dom::set_input_value(document, "scale", &fields.scale);
    dom::set_checked(document, "visibility-toggle", fields.visible);
    dom::set_hidden(document, "transform-controls", false);
}

fn update_camera_ui(document: &web::Document, viewer: &LampViewer<PageStore>) {
    for (id, value) in CAMERA_IDS.iter().zip(viewer.camera_fields()) {
        dom::set_input_value(document, id, &value);
    }
    dom::set_input_value(document, "zoom-slider", &viewer.zoom().to_string());
}

fn read_transform_form(document: &web::Document) -> ([String; 3], [String; 3], String) {
    (
        POSITION_IDS.map(|id| dom::input_value(document, id)),
        ROTATION_IDS.map(|id| dom::input_value(document, id)),
        dom::input_value(document, "scale"),
    )
}

pub fn wire_controls(document: &web::Document, canvas: &web::HtmlCanvasElement, viewer: SharedLamp) {
    let v = viewer.clone();
    let doc = document.clone();
    dom::add_event_listener(document, "object-selector", "change", move |ev| {
        let index = dom::event_input_value(&ev).and_then(|s| s.parse::<usize>().ok());
        match v.borrow_mut().select(index) {
            Some(fields) => update_transform_ui(&doc, &fields),
            None => dom::set_hidden(&doc, "transform-controls", true),
        }
    });

    for id in POSITION_IDS.iter().chain(&ROTATION_IDS).chain(&["scale"]) {
        let v = viewer.clone();
        let doc = document.clone();
        dom::add_event_listener(document, id, "input", move |_| {
            let (position, rotation, scale) = read_transform_form(&doc);
            let inputs = TransformInputs {
                position: position.each_ref().map(String::as_str),
                rotation: rotation.each_ref().map(String::as_str),
                scale: &scale,
            };
            v.borrow_mut().edit_selected(&inputs);
        });
    }

    let v = viewer.clone();
    let doc = document.clone();
    dom::add_event_listener(document, "visibility-toggle", "change", move |_| {
        let visible = dom::is_checked(&doc, "visibility-toggle");
        v.borrow_mut().set_selected_visible(visible);
    });

    let v = viewer.clone();
    let doc = document.clone();
    dom::add_click_listener(document, "reset-transform", move || {
        let fields = v.borrow_mut().reset_selected();
        if let Some(fields) = fields {
            update_transform_ui(&doc, &fields);
        }
    });

    let v = viewer.clone();
    dom::add_event_listener(document, "zoom-slider", "input", move |ev| {
        let value = dom::event_input_value(&ev).unwrap_or_default();
        v.borrow_mut().set_zoom(&value);
    });

    for (axis, id) in CAMERA_IDS.iter().enumerate() {
        let v = viewer.clone();
        let doc = document.clone();
        dom::add_event_listener(document, id, "input", move |ev| {
            let value = dom::event_input_value(&ev).unwrap_or_default();
            let mut lamp = v.borrow_mut();
            lamp.set_camera_axis(axis, &value);
            if axis == 2 {
                dom::set_input_value(&doc, "zoom-slider", &lamp.zoom().to_string());
            }
        });
    }

    let v = viewer.clone();
    let doc = document.clone();
    dom::add_click_listener(document, "reset-camera", move || {
        let mut lamp = v.borrow_mut();
        lamp.reset_camera();
        update_camera_ui(&doc, &lamp);
    });

    events::wire_orbit_input(canvas, viewer.clone());

    let v = viewer;
    let doc = document.clone();
    events::wire_wheel(canvas, move |delta_y| {
        let mut lamp = v.borrow_mut();
        lamp.wheel(delta_y);
        update_camera_ui(&doc, &lamp);
    });
}
