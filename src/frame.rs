use crate::render;
use crate::storage::PageStore;
use instant::Instant;
use parts_core::viewer::{ConnectorViewer, LampViewer, SceneView};
use parts_core::ViewerConfig;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The page's viewer, shared with the DOM handlers that drive it.
#[derive(Clone)]
pub enum PageViewer {
    Lamp(Rc<RefCell<LampViewer<PageStore>>>),
    Connector(Rc<RefCell<ConnectorViewer>>),
}

impl PageViewer {
    pub fn config(&self) -> ViewerConfig {
        match self {
            Self::Lamp(v) => *v.borrow().config(),
            Self::Connector(v) => *v.borrow().config(),
        }
    }
}

pub struct FrameContext<'a> {
    pub viewer: PageViewer,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        if let PageViewer::Connector(v) = &self.viewer {
            v.borrow_mut().frame(dt_sec);
        }

        let Some(g) = &mut self.gpu else {
            return;
        };
        let w = self.canvas.width();
        let h = self.canvas.height();
        g.resize_if_needed(w, h);
        let (w, h) = g.size();
        let result = match &self.viewer {
            PageViewer::Lamp(v) => draw(g, &mut *v.borrow_mut(), w, h),
            PageViewer::Connector(v) => draw(g, &mut *v.borrow_mut(), w, h),
        };
        if let Err(e) = result {
            log::error!("render error: {:?}", e);
        }
    }
}

fn draw(
    gpu: &mut render::GpuState<'_>,
    view: &mut impl SceneView,
    width: u32,
    height: u32,
) -> Result<(), wgpu::SurfaceError> {
    view.camera_mut().set_viewport(width, height);
    gpu.render(&*view)
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    config: &ViewerConfig,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, config).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
