#![cfg(target_arch = "wasm32")]
use instant::Instant;
use parts_core::viewer::{ConnectorViewer, LampViewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod connector;
mod dom;
mod events;
mod fetch;
mod frame;
mod input;
mod lamp;
mod loading;
mod render;
mod storage;

use frame::PageViewer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("parts-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    // data-viewer picks the page; data-assets overrides where OBJ files live
    let kind = canvas_el
        .get_attribute("data-viewer")
        .unwrap_or_else(|| "lamp".to_string());
    let asset_override = canvas_el.get_attribute("data-assets");
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    events::wire_canvas_resize(&canvas);

    loading::set_progress(&document, 10, Some("Setting up 3D scene..."));
    let viewer = match kind.as_str() {
        "connector" => {
            let v = Rc::new(RefCell::new(ConnectorViewer::new()));
            connector::wire_controls(&document, &canvas, v.clone());
            PageViewer::Connector(v)
        }
        other => {
            if other != "lamp" {
                log::warn!("unknown data-viewer {:?}; showing the lamp viewer", other);
            }
            let v = Rc::new(RefCell::new(LampViewer::new(storage::PageStore::open())));
            lamp::restore_camera(&document, &v);
            lamp::wire_controls(&document, &canvas, v.clone());
            PageViewer::Lamp(v)
        }
    };
    let config = viewer.config();
    let asset_base = asset_override.unwrap_or_else(|| config.asset_base.to_string());

    loading::set_progress(&document, 20, Some("Configuring renderer..."));
    let gpu = frame::init_gpu(&canvas, &config).await;
    loading::set_progress(&document, 50, Some("Scene ready!"));

    // Scene updates and rendering driven by requestAnimationFrame
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer: viewer.clone(),
        canvas: canvas.clone(),
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    match &viewer {
        PageViewer::Lamp(v) => lamp::load_parts(&document, v, &asset_base).await,
        PageViewer::Connector(v) => connector::load_models(&document, v, &asset_base).await,
    }
    Ok(())
}
