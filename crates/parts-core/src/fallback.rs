//! Procedural stand-in for the connector when its OBJ cannot be loaded.

use crate::material::{ResolvedMaterial, SurfaceKind};
use crate::mesh::MeshData;
use crate::scene::{MeshInstance, PartNode, Transform};
use glam::Vec3;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};
use std::rc::Rc;

pub const PIN_PITCH: f32 = 2.54;
pub const PIN_X: [f32; 3] = [-PIN_PITCH, 0.0, PIN_PITCH];
pub const MAGNET_X: [f32; 2] = [-6.0, 6.0];
pub const COIL_COUNT: usize = 6;

const SEGMENTS: u32 = 16;

pub const FALLBACK_GOLD: ResolvedMaterial = ResolvedMaterial {
    kind: SurfaceKind::Gold,
    base_color: 0xffd700,
    metalness: 0.95,
    roughness: 0.05,
    env_map_intensity: None,
};

pub const FALLBACK_SILVER: ResolvedMaterial = ResolvedMaterial {
    kind: SurfaceKind::Silver,
    base_color: 0xc0c0c0,
    metalness: 0.85,
    roughness: 0.15,
    env_map_intensity: None,
};

pub const FALLBACK_BLACK: ResolvedMaterial = ResolvedMaterial {
    kind: SurfaceKind::BlackAbs,
    base_color: 0x1a1a1a,
    metalness: 0.1,
    roughness: 0.4,
    env_map_intensity: None,
};

pub const FALLBACK_MAGNET: ResolvedMaterial = ResolvedMaterial {
    kind: SurfaceKind::Magnet,
    base_color: 0x505050,
    metalness: 0.9,
    roughness: 0.1,
    env_map_intensity: None,
};

#[derive(Default)]
struct Builder {
    mesh: MeshData,
}

impl Builder {
    fn vertex(&mut self, p: Vec3, n: Vec3) -> u32 {
        let i = self.mesh.positions.len() as u32;
        self.mesh.positions.push(p.to_array());
        self.mesh.normals.push(n.normalize_or_zero().to_array());
        i
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    fn finish(self) -> MeshData {
        self.mesh
    }
}

/// Axis-aligned box centred on the origin, flat-shaded.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let h = Vec3::new(width, height, depth) * 0.5;
    let mut b = Builder::default();
    // (normal, u axis, v axis); u x v == normal keeps faces CCW from outside
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let c = n * h;
        let (u, v) = (u * h, v * h);
        let i0 = b.vertex(c - u - v, n);
        let i1 = b.vertex(c + u - v, n);
        let i2 = b.vertex(c + u + v, n);
        let i3 = b.vertex(c - u + v, n);
        b.quad(i0, i1, i2, i3);
    }
    b.finish()
}

/// Capped cylinder along Y centred on the origin. The radii may differ.
pub fn cylinder_mesh(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    let mut b = Builder::default();

    let mut ring = Vec::with_capacity(segments as usize + 1);
    for s in 0..=segments {
        let theta = s as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        let n = Vec3::new(sin, slope, cos);
        let top = b.vertex(Vec3::new(radius_top * sin, half, radius_top * cos), n);
        let bottom = b.vertex(Vec3::new(radius_bottom * sin, -half, radius_bottom * cos), n);
        ring.push((top, bottom));
    }
    for w in ring.windows(2) {
        let ((t0, b0), (t1, b1)) = (w[0], w[1]);
        b.quad(t0, b0, b1, t1);
    }

    for (y, r, n) in [(half, radius_top, Vec3::Y), (-half, radius_bottom, Vec3::NEG_Y)] {
        if r <= 0.0 {
            continue;
        }
        let centre = b.vertex(Vec3::new(0.0, y, 0.0), n);
        let rim: Vec<u32> = (0..segments)
            .map(|s| {
                let theta = s as f32 / segments as f32 * TAU;
                b.vertex(Vec3::new(r * theta.sin(), y, r * theta.cos()), n)
            })
            .collect();
        for s in 0..segments as usize {
            let (a, c) = (rim[s], rim[(s + 1) % rim.len()]);
            if n.y > 0.0 {
                b.mesh.indices.extend_from_slice(&[centre, a, c]);
            } else {
                b.mesh.indices.extend_from_slice(&[centre, c, a]);
            }
        }
    }
    b.finish()
}

/// Torus in the XY plane around the Z axis.
pub fn torus_mesh(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut b = Builder::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            b.vertex(p, p - centre);
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let bb = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            b.mesh.indices.extend_from_slice(&[a, bb, d, bb, c, d]);
        }
    }
    b.finish()
}

fn placed(name: String, geometry: &Rc<MeshData>, material: ResolvedMaterial, pos: Vec3) -> MeshInstance {
    MeshInstance {
        name,
        geometry: geometry.clone(),
        material,
        local: Transform {
            position: pos,
            ..Transform::IDENTITY
        },
    }
}

/// Housing, three pogo pins and two magnets, built from primitives.
pub fn fallback_connector(name: &str) -> PartNode {
    let housing = Rc::new(box_mesh(15.0, 4.0, 0.8));
    let plunger = Rc::new(cylinder_mesh(0.35, 0.4, 2.5, SEGMENTS));
    let body = Rc::new(cylinder_mesh(0.5, 0.5, 4.0, SEGMENTS));
    let coil = Rc::new(torus_mesh(0.28, 0.06, 8, SEGMENTS));
    let contact = Rc::new(cylinder_mesh(0.4, 0.35, 1.2, SEGMENTS));
    let magnet = Rc::new(cylinder_mesh(0.8, 0.8, 0.6, SEGMENTS));

    let mut meshes: SmallVec<[MeshInstance; 4]> = SmallVec::new();
    meshes.push(placed("housing".into(), &housing, FALLBACK_BLACK, Vec3::ZERO));

    for (p, &x) in PIN_X.iter().enumerate() {
        meshes.push(placed(format!("plunger_{p}"), &plunger, FALLBACK_GOLD, Vec3::new(x, 3.5, 0.0)));
        meshes.push(placed(format!("body_{p}"), &body, FALLBACK_SILVER, Vec3::new(x, 0.0, 0.0)));
        for i in 0..COIL_COUNT {
            let mut m = placed(
                format!("spring_{p}_{i}"),
                &coil,
                FALLBACK_SILVER,
                Vec3::new(x, 0.4 + i as f32 * 0.3, 0.0),
            );
            m.local.rotation.x = PI / 2.0;
            meshes.push(m);
        }
        meshes.push(placed(format!("contact_{p}"), &contact, FALLBACK_GOLD, Vec3::new(x, -2.6, 0.0)));
    }

    for (i, &x) in MAGNET_X.iter().enumerate() {
        let mut m = placed(format!("magnet_{i}"), &magnet, FALLBACK_MAGNET, Vec3::new(x, 0.0, 0.0));
        m.local.rotation.z = PI / 2.0;
        meshes.push(m);
    }

    log::info!("[assemble] built fallback connector ({} meshes)", meshes.len());
    PartNode {
        name: name.to_string(),
        transform: Transform::IDENTITY,
        visible: true,
        meshes,
    }
}
