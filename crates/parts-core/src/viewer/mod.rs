//! Application-context objects for the two product pages.
//!
//! Each viewer owns its scene, camera and input state; the web crate only
//! forwards DOM events and draws what [`SceneView`] hands it.

pub mod connector;
pub mod lamp;

pub use connector::{ConnectorViewer, ViewMode};
pub use lamp::{LampViewer, TransformInputs};

use crate::constants::{LOAD_PROGRESS_END, LOAD_PROGRESS_START};
use crate::interaction::{apply_orbit, DragState};
use crate::scene::{DrawItem, Scene, Transform};
use crate::state::{Camera, ViewerConfig};

/// What the renderer needs from a viewer each frame.
pub trait SceneView {
    fn config(&self) -> &ViewerConfig;
    fn scene(&self) -> &Scene;
    fn camera(&self) -> &Camera;
    fn camera_mut(&mut self) -> &mut Camera;

    fn draw_items(&self) -> Vec<DrawItem> {
        self.scene().draw_items()
    }
}

/// Drag-to-rotate on whatever object the viewer treats as "current".
pub trait OrbitControls {
    fn drag_state(&mut self) -> &mut DragState;
    fn orbit_target(&mut self) -> &mut Transform;

    fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag_state().begin(x, y);
    }

    /// Returns true when the target rotated.
    fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        match self.drag_state().drag_to(x, y) {
            Some(delta) => {
                apply_orbit(&mut self.orbit_target().rotation, delta);
                true
            }
            None => false,
        }
    }

    fn pointer_up(&mut self) {
        self.drag_state().end();
    }
}

/// Loading-bar percentage shown before fetching part `index` of `count`.
pub fn loading_progress(index: usize, count: usize) -> u32 {
    if count == 0 {
        return LOAD_PROGRESS_END as u32;
    }
    let span = LOAD_PROGRESS_END - LOAD_PROGRESS_START;
    (LOAD_PROGRESS_START + index as f32 / count as f32 * span).round() as u32
}

pub fn loading_message(name: &str, index: usize, count: usize) -> String {
    format!("Loading {}... ({}/{})", name, index + 1, count)
}
