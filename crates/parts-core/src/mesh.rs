//! Triangle mesh data and the OBJ adapter.
//!
//! Parsing itself is delegated to `tobj`; this module only turns its output
//! into named [`MeshNode`]s with normals and bounds.

use crate::error::MeshError;
use glam::Vec3;
use std::io::BufRead;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn extend_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn max_dimension(&self) -> f32 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }

    /// Bounds of the eight corners after applying `m`.
    pub fn transformed(&self, m: &glam::Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::EMPTY;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.extend_point(m.transform_point3(corner));
        }
        out
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Indexed triangle list with per-vertex normals.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Aabb {
        let mut b = Aabb::EMPTY;
        for p in &self.positions {
            b.extend_point(Vec3::from_array(*p));
        }
        b
    }

    /// Area-weighted smooth normals, replacing any existing ones.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if a >= acc.len() || b >= acc.len() || c >= acc.len() {
                continue;
            }
            let pa = Vec3::from_array(self.positions[a]);
            let pb = Vec3::from_array(self.positions[b]);
            let pc = Vec3::from_array(self.positions[c]);
            let n = (pb - pa).cross(pc - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        self.normals = acc
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
            .collect();
    }
}

/// A named mesh inside a loaded model.
#[derive(Clone, Debug)]
pub struct MeshNode {
    pub name: String,
    pub data: MeshData,
}

/// All meshes produced by loading one file.
#[derive(Clone, Debug, Default)]
pub struct MeshTree {
    pub nodes: Vec<MeshNode>,
}

impl MeshTree {
    pub fn bounds(&self) -> Aabb {
        self.nodes
            .iter()
            .fold(Aabb::EMPTY, |acc, n| acc.union(&n.data.bounds()))
    }

    pub fn triangle_count(&self) -> usize {
        self.nodes.iter().map(|n| n.data.triangle_count()).sum()
    }
}

/// Parse OBJ text into a [`MeshTree`]. Material libraries are ignored;
/// materials come from the resolvers instead.
pub fn parse_obj<R: BufRead>(reader: &mut R) -> Result<MeshTree, MeshError> {
    let (models, _materials) = tobj::load_obj_buf(
        reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Err(tobj::LoadError::OpenFileFailed),
    )?;

    let mut nodes = Vec::with_capacity(models.len());
    for model in models {
        let mesh = model.mesh;
        if mesh.indices.len() < 3 {
            log::debug!("[mesh] skipping '{}' (no triangles)", model.name);
            continue;
        }
        let positions: Vec<[f32; 3]> = mesh
            .positions
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        let mut data = MeshData {
            normals: Vec::new(),
            indices: mesh.indices,
            positions,
        };
        if mesh.normals.len() == mesh.positions.len() {
            data.normals = mesh
                .normals
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect();
        } else {
            data.compute_normals();
        }
        nodes.push(MeshNode {
            name: model.name,
            data,
        });
    }

    if nodes.is_empty() {
        return Err(MeshError::Empty);
    }
    Ok(MeshTree { nodes })
}

/// Convenience for in-memory bytes (e.g. a fetched response body).
pub fn parse_obj_bytes(bytes: &[u8]) -> Result<MeshTree, MeshError> {
    let mut cursor = std::io::Cursor::new(bytes);
    parse_obj(&mut cursor)
}
