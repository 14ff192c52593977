//! Magnetic connector viewer: two halves snapping together on a loop, with
//! idle spin and bob.

use super::{OrbitControls, SceneView};
use crate::assemble::{connector_part, place_pair};
use crate::catalog::{CONNECTOR_PART, PINS_PART};
use crate::constants::{DEFAULT_ROTATION_SPEED, FLOAT_AMPLITUDE, FLOAT_FREQUENCY};
use crate::error::ViewerError;
use crate::fallback::fallback_connector;
use crate::interaction::{float_offset, parse_leading_float, DragState, PinchState, ZoomState};
use crate::mesh::MeshTree;
use crate::scene::{Scene, Transform};
use crate::snap::{Clock, InstantClock, SnapAnimation, SnapDriver, SnapFrame};
use crate::state::{Camera, ViewerConfig, CONNECTOR_CONFIG};
use glam::Vec2;

/// Which model the page radio buttons ask for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Both halves with the snap loop.
    #[default]
    Assembly,
    Connector,
    Pins,
}

impl ViewMode {
    /// Radio value spelling (`"connector"`, `"pins"`).
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "assembly" => Some(Self::Assembly),
            "connector" => Some(Self::Connector),
            "pins" => Some(Self::Pins),
            _ => None,
        }
    }
}

const CONNECTOR_SLOT: usize = 0;
const PINS_SLOT: usize = 1;

/// Connector page state. `C` is the time source for the snap loop and the
/// floating bob.
pub struct ConnectorViewer<C: Clock = InstantClock> {
    config: ViewerConfig,
    scene: Scene,
    camera: Camera,
    zoom: ZoomState,
    drag: DragState,
    pinch: PinchState,
    snap: SnapDriver<C>,
    mode: ViewMode,
    has_pins: bool,
    using_fallback: bool,
    pub auto_rotate: bool,
    rotation_speed: f32,
}

impl Default for ConnectorViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorViewer {
    pub fn new() -> Self {
        Self::with_clock(InstantClock::new())
    }
}

impl<C: Clock> ConnectorViewer<C> {
    pub fn with_clock(clock: C) -> Self {
        let config = CONNECTOR_CONFIG;
        Self {
            camera: config.default_camera(),
            zoom: ZoomState::new(
                config.default_zoom,
                config.min_zoom,
                config.max_zoom,
                config.wheel_step,
            ),
            config,
            scene: Scene::default(),
            drag: DragState::default(),
            pinch: PinchState::default(),
            snap: SnapDriver::new(clock),
            mode: ViewMode::Assembly,
            has_pins: false,
            using_fallback: false,
            auto_rotate: false,
            rotation_speed: DEFAULT_ROTATION_SPEED,
        }
    }

    /// Build the scene from both load results.
    ///
    /// A failed connector switches to the procedural model and ignores the
    /// pins. Missing pins leave a single model with no snap loop.
    pub fn assemble(
        &mut self,
        connector: Result<MeshTree, ViewerError>,
        pins: Result<MeshTree, ViewerError>,
    ) {
        self.scene = Scene::default();
        self.has_pins = false;
        self.using_fallback = false;

        let tree = match connector {
            Ok(tree) => tree,
            Err(e) => {
                log::error!("[load] {}; using fallback model", e);
                self.use_fallback();
                return;
            }
        };
        let mut static_half = connector_part(&CONNECTOR_PART, tree);

        match pins {
            Ok(tree) => {
                let mut moving_half = connector_part(&PINS_PART, tree);
                place_pair(&mut static_half, &mut moving_half);
                self.scene.parts.push(static_half);
                self.scene.parts.push(moving_half);
                self.has_pins = true;
                log::info!("[assemble] both halves positioned for snap");
                self.snap.schedule_initial(true);
            }
            Err(e) => {
                let missing = ViewerError::MissingOptionalAsset(PINS_PART.file.to_string());
                log::info!("[load] {} ({}); showing connector only", missing, e);
                self.scene.parts.push(static_half);
            }
        }
        self.apply_mode();
    }

    /// Replace the scene with the procedural connector.
    pub fn use_fallback(&mut self) {
        self.scene = Scene::default();
        self.scene.parts.push(fallback_connector(CONNECTOR_PART.name));
        self.has_pins = false;
        self.using_fallback = true;
        self.apply_mode();
    }

    pub fn using_fallback(&self) -> bool {
        self.using_fallback
    }

    /// True when both halves are present and the snap loop may run.
    pub fn pair_loaded(&self) -> bool {
        self.has_pins && self.scene.parts.len() > PINS_SLOT
    }

    pub fn snap(&self) -> &SnapAnimation {
        self.snap.animation()
    }

    pub fn clock(&self) -> &C {
        self.snap.clock()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch the displayed model. A request for a missing half falls back
    /// to the connector.
    pub fn set_mode(&mut self, mode: ViewMode) -> ViewMode {
        self.mode = match mode {
            ViewMode::Assembly | ViewMode::Pins if !self.pair_loaded() => {
                log::info!("[assemble] {:?} unavailable; showing connector", mode);
                ViewMode::Connector
            }
            m => m,
        };
        self.apply_mode();
        self.mode
    }

    fn apply_mode(&mut self) {
        let (show_connector, show_pins) = match self.mode {
            ViewMode::Assembly => (true, true),
            ViewMode::Connector => (true, false),
            ViewMode::Pins => (false, true),
        };
        if let Some(p) = self.scene.parts.get_mut(CONNECTOR_SLOT) {
            p.visible = show_connector;
        }
        if let Some(p) = self.scene.parts.get_mut(PINS_SLOT) {
            p.visible = show_pins;
        }
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Rotation-speed slider input; unparsable text is ignored.
    pub fn set_rotation_speed(&mut self, value: &str) -> f32 {
        if let Some(v) = parse_leading_float(value) {
            self.rotation_speed = v;
        }
        self.rotation_speed
    }

    pub fn zoom(&self) -> f32 {
        self.zoom.current
    }

    /// Zoom slider input.
    pub fn set_zoom(&mut self, value: &str) -> f32 {
        if let Some(v) = parse_leading_float(value) {
            self.camera.eye.z = self.zoom.set(v);
        }
        self.zoom.current
    }

    pub fn wheel(&mut self, delta_y: f64) -> f32 {
        let z = self.zoom.wheel(delta_y);
        self.camera.eye.z = z;
        z
    }

    pub fn pinch_start(&mut self, a: Vec2, b: Vec2) {
        self.pinch.begin(a, b, self.zoom.current);
    }

    pub fn pinch_move(&mut self, a: Vec2, b: Vec2) -> Option<f32> {
        let z = self.zoom.set(self.pinch.zoom_for(a, b)?);
        self.camera.eye.z = z;
        Some(z)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Advance to the clock's current time; `dt` is the seconds since the
    /// previous frame.
    pub fn frame(&mut self, dt: f32) -> Option<SnapFrame> {
        let now = self.snap.now();
        let pair = self.pair_loaded();
        let snap = self.snap.tick(pair);
        if pair {
            if let Some(pins) = self.scene.parts.get_mut(PINS_SLOT) {
                pins.transform.position.z = self.snap.animation().depth();
            }
        }

        let playing = self.snap.animation().is_playing();
        if self.auto_rotate && !self.drag.active && !playing {
            self.scene.group.rotation.y += dt * self.rotation_speed;
        }
        if !self.drag.active {
            self.scene.group.position.y = float_offset(now as f32, FLOAT_FREQUENCY, FLOAT_AMPLITUDE);
        }
        snap
    }
}

impl<C: Clock> SceneView for ConnectorViewer<C> {
    fn config(&self) -> &ViewerConfig {
        &self.config
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

impl<C: Clock> OrbitControls for ConnectorViewer<C> {
    fn drag_state(&mut self) -> &mut DragState {
        &mut self.drag
    }

    fn orbit_target(&mut self) -> &mut Transform {
        &mut self.scene.group
    }
}
