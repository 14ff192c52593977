//! Minimal scene graph: one orbit group holding parts, each part holding
//! mesh instances with their resolved materials.

use crate::material::ResolvedMaterial;
use crate::mesh::{Aabb, MeshData, MeshTree};
use glam::{Mat4, Vec3};
use smallvec::SmallVec;
use std::rc::Rc;

/// Translation, XYZ Euler rotation (radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn uniform_scale(&self) -> f32 {
        self.scale.x
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    /// `T * Rx * Ry * Rz * S`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One drawable mesh inside a part.
#[derive(Clone, Debug)]
pub struct MeshInstance {
    pub name: String,
    pub geometry: Rc<MeshData>,
    pub material: ResolvedMaterial,
    /// Offset inside the part (identity for loaded meshes).
    pub local: Transform,
}

/// A loaded part: its display name, transform and meshes.
#[derive(Clone, Debug)]
pub struct PartNode {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub meshes: SmallVec<[MeshInstance; 4]>,
}

impl PartNode {
    /// Attach a material to every mesh of `tree` using `resolve`.
    pub fn from_tree(
        name: impl Into<String>,
        tree: MeshTree,
        mut resolve: impl FnMut(&str) -> ResolvedMaterial,
    ) -> Self {
        let meshes = tree
            .nodes
            .into_iter()
            .map(|node| {
                let material = resolve(&node.name);
                MeshInstance {
                    material,
                    name: node.name,
                    geometry: Rc::new(node.data),
                    local: Transform::IDENTITY,
                }
            })
            .collect();
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            visible: true,
            meshes,
        }
    }

    /// Bounds in the part's own (untransformed) space.
    pub fn local_bounds(&self) -> Aabb {
        self.meshes.iter().fold(Aabb::EMPTY, |acc, m| {
            acc.union(&m.geometry.bounds().transformed(&m.local.matrix()))
        })
    }
}

/// Flattened draw item handed to the renderer.
#[derive(Clone, Debug)]
pub struct DrawItem {
    pub geometry: Rc<MeshData>,
    pub model: Mat4,
    pub material: ResolvedMaterial,
}

/// The orbit group and its parts.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub group: Transform,
    pub parts: Vec<PartNode>,
}

impl Scene {
    /// Visible meshes with world matrices (group * part * local).
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let group = self.group.matrix();
        let mut items = Vec::new();
        for part in self.parts.iter().filter(|p| p.visible) {
            let part_m = group * part.transform.matrix();
            for mesh in &part.meshes {
                items.push(DrawItem {
                    geometry: mesh.geometry.clone(),
                    model: part_m * mesh.local.matrix(),
                    material: mesh.material,
                });
            }
        }
        items
    }
}
