//! Lamp exploded-view viewer: parts laid out left to right, each editable
//! and persisted.

use super::{OrbitControls, SceneView};
use crate::assemble::{lamp_default_transform, lamp_part};
use crate::catalog::{PartSpec, LAMP_PARTS};
use crate::error::ViewerError;
use crate::interaction::{number_or, DragState, ZoomState};
use crate::mesh::MeshTree;
use crate::persist::{CameraSettings, KeyValueStore, PartTransform, SavedTransforms, TransformStore};
use crate::scene::{PartNode, Scene, Transform};
use crate::state::{Camera, ViewerConfig, LAMP_CONFIG};

/// Raw text of the transform form fields. Rotations are in degrees.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransformInputs<'a> {
    pub position: [&'a str; 3],
    pub rotation: [&'a str; 3],
    pub scale: &'a str,
}

/// Formatted values for repopulating the transform form.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformFields {
    pub position: [String; 3],
    pub rotation: [String; 3],
    pub scale: String,
    pub visible: bool,
}

impl TransformFields {
    pub fn from_part(part: &PartNode) -> Self {
        let t = &part.transform;
        Self {
            position: t.position.to_array().map(|v| format!("{:.2}", v)),
            rotation: t.rotation.to_array().map(|v| format!("{:.1}", v.to_degrees())),
            scale: format!("{:.2}", t.uniform_scale()),
            visible: part.visible,
        }
    }
}

pub struct LampViewer<S: KeyValueStore> {
    config: ViewerConfig,
    catalog: &'static [PartSpec],
    scene: Scene,
    /// Catalog slot of each entry in `scene.parts`.
    slots: Vec<usize>,
    camera: Camera,
    zoom: ZoomState,
    drag: DragState,
    store: TransformStore<S>,
    saved: SavedTransforms,
    selected: Option<usize>,
    failures: Vec<String>,
}

impl<S: KeyValueStore> LampViewer<S> {
    pub fn new(store: S) -> Self {
        Self::with_catalog(LAMP_PARTS, store)
    }

    pub fn with_catalog(catalog: &'static [PartSpec], store: S) -> Self {
        let config = LAMP_CONFIG;
        let store = TransformStore::new(store);
        let saved = store.load();
        log::info!("[persist] {} saved transforms available", saved.len());
        Self {
            camera: config.default_camera(),
            zoom: ZoomState::new(
                config.default_zoom,
                config.min_zoom,
                config.max_zoom,
                config.wheel_step,
            ),
            config,
            catalog,
            scene: Scene::default(),
            slots: Vec::new(),
            drag: DragState::default(),
            store,
            saved,
            selected: None,
            failures: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &'static [PartSpec] {
        self.catalog
    }

    pub fn zoom(&self) -> f32 {
        self.zoom.current
    }

    pub fn store(&self) -> &TransformStore<S> {
        &self.store
    }

    /// Apply saved camera settings, if any. Returns whether something was
    /// restored.
    pub fn restore_camera(&mut self) -> bool {
        let Some(settings) = self.store.load_camera() else {
            return false;
        };
        self.camera.eye = settings.position.into();
        let z = self.zoom.set(settings.zoom);
        self.camera.eye.z = z;
        log::info!("[camera] restored eye {:?} zoom {}", self.camera.eye, z);
        true
    }

    /// Place a successfully loaded mesh for catalog slot `index`.
    pub fn add_loaded_part(&mut self, index: usize, tree: MeshTree) -> Option<&PartNode> {
        let Some(spec) = self.catalog.get(index) else {
            log::warn!("[assemble] no catalog entry at {}", index);
            return None;
        };
        let part = lamp_part(spec, index, self.catalog.len(), tree, &self.saved);
        log::info!("[load] {} placed at x={}", spec.name, part.transform.position.x);
        self.scene.parts.push(part);
        self.slots.push(index);
        self.scene.parts.last()
    }

    pub fn record_load_failure(&mut self, index: usize, err: ViewerError) {
        let name = self.catalog.get(index).map(|s| s.name).unwrap_or("?");
        log::error!("[load] {}: {}", name, err);
        self.failures.push(name.to_string());
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Number of parts placed.
    pub fn finish_loading(&self) -> usize {
        let loaded = self.scene.parts.len();
        log::info!("[load] loaded {}/{} parts", loaded, self.catalog.len());
        loaded
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.scene.parts.iter().map(|p| p.name.as_str())
    }

    /// Select a loaded part by its position in the selector; `None` clears.
    pub fn select(&mut self, index: Option<usize>) -> Option<TransformFields> {
        self.selected = index.filter(|&i| i < self.scene.parts.len());
        self.selected_part().map(TransformFields::from_part)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_part(&self) -> Option<&PartNode> {
        self.selected.and_then(|i| self.scene.parts.get(i))
    }

    pub fn selected_transform(&self) -> Option<Transform> {
        self.selected_part().map(|p| p.transform)
    }

    fn selected_part_mut(&mut self) -> Option<&mut PartNode> {
        self.selected.and_then(|i| self.scene.parts.get_mut(i))
    }

    /// Overwrite the selected part's transform from form text.
    pub fn edit_selected(&mut self, inputs: &TransformInputs<'_>) -> bool {
        let Some(part) = self.selected_part_mut() else {
            return false;
        };
        let t = &mut part.transform;
        for axis in 0..3 {
            t.position[axis] = number_or(inputs.position[axis], 0.0);
            t.rotation[axis] = number_or(inputs.rotation[axis], 0.0).to_radians();
        }
        t.set_uniform_scale(number_or(inputs.scale, 1.0));
        self.save_transforms();
        true
    }

    pub fn set_selected_visible(&mut self, visible: bool) -> bool {
        let Some(part) = self.selected_part_mut() else {
            return false;
        };
        part.visible = visible;
        log::info!("[persist] {} visibility: {}", part.name, visible);
        self.save_transforms();
        true
    }

    /// Back to the default layout slot, unrotated, default scale, visible.
    pub fn reset_selected(&mut self) -> Option<TransformFields> {
        let i = self.selected?;
        let slot = *self.slots.get(i)?;
        let count = self.catalog.len();
        let part = self.scene.parts.get_mut(i)?;
        part.transform = lamp_default_transform(slot, count);
        part.visible = true;
        log::info!("[assemble] reset {} to default", part.name);
        let fields = TransformFields::from_part(part);
        self.save_transforms();
        Some(fields)
    }

    fn save_transforms(&self) {
        self.store.save(
            self.scene
                .parts
                .iter()
                .map(|p| (p.name.as_str(), PartTransform::capture(&p.transform, p.visible))),
        );
    }

    fn save_camera(&self) {
        self.store.save_camera(&CameraSettings {
            position: self.camera.eye.into(),
            zoom: self.zoom.current,
        });
    }

    /// Zoom slider input.
    pub fn set_zoom(&mut self, value: &str) -> f32 {
        let z = self.zoom.set(number_or(value, self.config.default_zoom));
        self.camera.eye.z = z;
        self.save_camera();
        z
    }

    /// Camera position input for `axis` (0..3). Z is the zoom, so it is
    /// clamped to the zoom range.
    pub fn set_camera_axis(&mut self, axis: usize, value: &str) {
        if axis > 2 {
            return;
        }
        let v = number_or(value, 0.0);
        self.camera.eye[axis] = if axis == 2 { self.zoom.set(v) } else { v };
        self.save_camera();
    }

    pub fn reset_camera(&mut self) {
        self.camera.eye = self.config.camera_eye;
        self.camera.eye.z = self.zoom.set(self.config.default_zoom);
        log::info!("[camera] reset to default");
        self.save_camera();
    }

    /// Camera inputs formatted as shown in the form.
    pub fn camera_fields(&self) -> [String; 3] {
        self.camera.eye.to_array().map(|v| format!("{:.1}", v))
    }

    pub fn wheel(&mut self, delta_y: f64) -> f32 {
        let z = self.zoom.wheel(delta_y);
        self.camera.eye.z = z;
        self.save_camera();
        z
    }
}

impl<S: KeyValueStore> SceneView for LampViewer<S> {
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

impl<S: KeyValueStore> OrbitControls for LampViewer<S> {
    fn drag_state(&mut self) -> &mut DragState {
        &mut self.drag
    }

    fn orbit_target(&mut self) -> &mut Transform {
        &mut self.scene.group
    }
}
