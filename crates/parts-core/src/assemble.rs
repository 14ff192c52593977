//! Placement of loaded meshes into the viewer scenes.

use crate::catalog::PartSpec;
use crate::constants::{
    CONNECTOR_MOVING_Z, CONNECTOR_STATIC_Z, CONNECTOR_TARGET_SIZE, LAMP_PART_SCALE, LAMP_SPACING,
};
use crate::error::ViewerError;
use crate::material::{resolve, resolve_connector};
use crate::mesh::{Aabb, MeshTree};
use crate::persist::SavedTransforms;
use crate::scene::{PartNode, Scene, Transform};
use glam::Vec3;
use std::f32::consts::PI;

/// Lateral offset of catalog slot `index` out of `count`, centred on 0.
#[inline]
pub fn lamp_offset(index: usize, count: usize) -> f32 {
    (index as f32 - (count as f32 - 1.0) / 2.0) * LAMP_SPACING
}

/// Default layout transform for a lamp part.
///
/// Parts are not re-centred on their own bounds: the lateral slot offset
/// replaces X and the other axes are zeroed.
pub fn lamp_default_transform(index: usize, count: usize) -> Transform {
    let mut t = Transform::IDENTITY;
    t.position = Vec3::new(lamp_offset(index, count), 0.0, 0.0);
    t.set_uniform_scale(LAMP_PART_SCALE);
    t
}

/// Centre `bounds` on the origin and scale its largest side to the target
/// size. Degenerate bounds keep scale 1.
pub fn connector_fit_transform(bounds: &Aabb) -> Transform {
    let mut t = Transform::IDENTITY;
    if bounds.is_empty() {
        return t;
    }
    t.position = -bounds.center();
    let max_dim = bounds.max_dimension();
    if max_dim > f32::EPSILON && max_dim.is_finite() {
        t.set_uniform_scale(CONNECTOR_TARGET_SIZE / max_dim);
    }
    t
}

/// Overwrite a part's transform with its saved record, if there is one.
pub fn apply_saved(part: &mut PartNode, saved: &SavedTransforms) -> bool {
    match saved.get(&part.name) {
        Some(record) => {
            record.apply(&mut part.transform, &mut part.visible);
            true
        }
        None => false,
    }
}

/// Build the lamp part for catalog slot `index`.
pub fn lamp_part(
    spec: &PartSpec,
    index: usize,
    count: usize,
    tree: MeshTree,
    saved: &SavedTransforms,
) -> PartNode {
    let mut part = PartNode::from_tree(spec.name, tree, |mesh| resolve(mesh, spec.components));
    part.transform = lamp_default_transform(index, count);
    if apply_saved(&mut part, saved) {
        log::info!("[assemble] restored saved transform for {}", spec.name);
    }
    part
}

/// Assemble the lamp scene from per-slot load results.
///
/// Failed slots are logged and skipped; surviving parts keep the spacing of
/// their catalog slot.
pub fn assemble_lamp<I>(catalog: &[PartSpec], results: I, saved: &SavedTransforms) -> Scene
where
    I: IntoIterator<Item = Result<MeshTree, ViewerError>>,
{
    let count = catalog.len();
    let mut scene = Scene::default();
    for (index, (spec, result)) in catalog.iter().zip(results).enumerate() {
        match result {
            Ok(tree) => scene.parts.push(lamp_part(spec, index, count, tree, saved)),
            Err(e) => log::error!("[assemble] skipping {}: {}", spec.name, e),
        }
    }
    log::info!("[assemble] placed {} of {} parts", scene.parts.len(), count);
    scene
}

/// Build a connector-viewer half, centred and scaled to the target size.
pub fn connector_part(spec: &PartSpec, tree: MeshTree) -> PartNode {
    let mut part = PartNode::from_tree(spec.name, tree, resolve_connector);
    part.transform = connector_fit_transform(&part.local_bounds());
    log::info!(
        "[assemble] {} fitted at scale {:.2}",
        spec.name,
        part.transform.uniform_scale()
    );
    part
}

/// Position both halves for the snap animation: the static half faces the
/// moving half, which starts back along +Z.
pub fn place_pair(static_half: &mut PartNode, moving_half: &mut PartNode) {
    static_half.transform.position = Vec3::new(0.0, 0.0, CONNECTOR_STATIC_Z);
    static_half.transform.rotation.y = PI;
    moving_half.transform.position = Vec3::new(0.0, 0.0, CONNECTOR_MOVING_Z);
}
