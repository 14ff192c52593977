use crate::dom;
use crate::input;
use parts_core::viewer::OrbitControls;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Mouse and one-finger touch drag on the canvas rotate the viewer's orbit
/// target.
pub fn wire_orbit_input<V: OrbitControls + 'static>(
    canvas: &web::HtmlCanvasElement,
    viewer: Rc<RefCell<V>>,
) {
    let target: &web::EventTarget = canvas.unchecked_ref();

    let v = viewer.clone();
    dom::add_listener(target, "mousedown", move |ev: web::MouseEvent| {
        let p = input::mouse_client(&ev);
        v.borrow_mut().pointer_down(p.x, p.y);
    });

    let v = viewer.clone();
    dom::add_listener(target, "mousemove", move |ev: web::MouseEvent| {
        let p = input::mouse_client(&ev);
        v.borrow_mut().pointer_move(p.x, p.y);
    });

    for name in ["mouseup", "mouseleave"] {
        let v = viewer.clone();
        dom::add_listener(target, name, move |_: web::MouseEvent| {
            v.borrow_mut().pointer_up();
        });
    }

    let v = viewer.clone();
    dom::add_listener(target, "touchstart", move |ev: web::TouchEvent| {
        let points = input::touch_points(&ev);
        if let [p] = points.as_slice() {
            v.borrow_mut().pointer_down(p.x, p.y);
        }
    });

    let v = viewer.clone();
    dom::add_active_listener(target, "touchmove", move |ev: web::TouchEvent| {
        let points = input::touch_points(&ev);
        if let [p] = points.as_slice() {
            if v.borrow_mut().pointer_move(p.x, p.y) {
                ev.prevent_default();
            }
        }
    });

    let v = viewer;
    dom::add_listener(target, "touchend", move |_: web::TouchEvent| {
        v.borrow_mut().pointer_up();
    });
}

/// Wheel zoom; `on_wheel` receives `deltaY`.
pub fn wire_wheel(canvas: &web::HtmlCanvasElement, mut on_wheel: impl FnMut(f64) + 'static) {
    dom::add_active_listener(canvas.unchecked_ref(), "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        on_wheel(ev.delta_y());
    });
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    if let Some(window) = web::window() {
        dom::add_listener(window.unchecked_ref(), "resize", move |_: web::Event| {
            dom::sync_canvas_backing_size(&canvas_resize);
        });
    }
}
