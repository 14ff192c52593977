//! Per-mesh material resolution.
//!
//! Two resolvers exist: the catalog-driven one used by the lamp viewer and a
//! keyword one used by the connector viewer. Both are pure; identical input
//! always yields an identical [`ResolvedMaterial`].

use crate::catalog::{ComponentList, ComponentSpec, MaterialKind, NODE_COMPONENT};

/// Neutral gray used for unknown colours and the default material.
pub const FALLBACK_COLOR: u32 = 0xcccccc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Plastic,
    Metal,
    Paper,
    Gold,
    Silver,
    BlackAbs,
    Magnet,
    Default,
}

/// Concrete shading parameters attached to one mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedMaterial {
    pub kind: SurfaceKind,
    pub base_color: u32,
    pub metalness: f32,
    pub roughness: f32,
    pub env_map_intensity: Option<f32>,
}

impl ResolvedMaterial {
    pub const DEFAULT: Self = Self {
        kind: SurfaceKind::Default,
        base_color: FALLBACK_COLOR,
        metalness: 0.5,
        roughness: 0.5,
        env_map_intensity: None,
    };

    /// Linear-ish RGB in \[0, 1\] for uniform upload.
    pub fn rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.base_color)
    }
}

impl Default for ResolvedMaterial {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Catalog colour names. Unknown names map to [`FALLBACK_COLOR`].
pub fn color_hex(name: &str) -> u32 {
    match name {
        "off-white" => 0xf5f5f0,
        "dark-gray" => 0x2a2a2a,
        "steel" => 0xb0b0b8,
        "gold" => 0xffd700,
        "copper" => 0xb87333,
        _ => FALLBACK_COLOR,
    }
}

/// Build the material for one catalog `(kind, colour)` pair.
pub fn material_for(kind: MaterialKind, color_name: &str) -> ResolvedMaterial {
    let base_color = color_hex(color_name);
    match kind {
        MaterialKind::Plastic => ResolvedMaterial {
            kind: SurfaceKind::Plastic,
            base_color,
            metalness: 0.0,
            roughness: 0.8,
            env_map_intensity: Some(0.2),
        },
        MaterialKind::Metal => ResolvedMaterial {
            kind: SurfaceKind::Metal,
            base_color,
            metalness: 0.9,
            roughness: 0.2,
            env_map_intensity: Some(1.0),
        },
        MaterialKind::Paper => ResolvedMaterial {
            kind: SurfaceKind::Paper,
            base_color,
            metalness: 0.0,
            roughness: 1.0,
            env_map_intensity: Some(0.05),
        },
        MaterialKind::Default => ResolvedMaterial {
            base_color,
            ..ResolvedMaterial::DEFAULT
        },
    }
}

fn from_spec(spec: &ComponentSpec) -> ResolvedMaterial {
    material_for(spec.material, spec.color)
}

/// Resolve a mesh name against an ordered component list.
///
/// The first entry whose key occurs in the lower-cased mesh name wins. If
/// nothing matches, the `"node"` entry is used when present; otherwise (or
/// without a component list at all) the default material is returned.
pub fn resolve(mesh_name: &str, components: Option<ComponentList<'_>>) -> ResolvedMaterial {
    let Some(components) = components else {
        return ResolvedMaterial::DEFAULT;
    };
    let name = mesh_name.to_lowercase();
    if let Some((_, spec)) = components
        .iter()
        .find(|(key, _)| name.contains(&key.to_lowercase()))
    {
        return from_spec(spec);
    }
    components
        .iter()
        .find(|(key, _)| *key == NODE_COMPONENT)
        .map(|(_, spec)| from_spec(spec))
        .unwrap_or(ResolvedMaterial::DEFAULT)
}

pub const CONNECTOR_GOLD: ResolvedMaterial = ResolvedMaterial {
    kind: SurfaceKind::Gold,
    base_color: 0xefbf04,
    metalness: 0.95,
    roughness: 0.05,
    env_map_intensity: None,
};

pub const CONNECTOR_SILVER: ResolvedMaterial = ResolvedMaterial {
    kind: SurfaceKind::Silver,
    base_color: 0xd4d4d4,
    metalness: 0.9,
    roughness: 0.1,
    env_map_intensity: None,
};

// Matte black; low env intensity keeps it from washing out.
pub const CONNECTOR_BLACK_ABS: ResolvedMaterial = ResolvedMaterial {
    kind: SurfaceKind::BlackAbs,
    base_color: 0x0a0a0a,
    metalness: 0.0,
    roughness: 1.0,
    env_map_intensity: Some(0.1),
};

pub const CONNECTOR_MAGNET: ResolvedMaterial = ResolvedMaterial {
    kind: SurfaceKind::Magnet,
    base_color: 0xc0c0c0,
    metalness: 0.9,
    roughness: 0.1,
    env_map_intensity: None,
};

/// Ordered keyword groups for the connector viewer; first group hit wins.
const CONNECTOR_KEYWORDS: &[(&[&str], ResolvedMaterial)] = &[
    (&["plunger", "pin", "contact", "head"], CONNECTOR_GOLD),
    (&["magnet", "neo"], CONNECTOR_MAGNET),
    (
        &["housing", "base", "body", "plastic", "case"],
        CONNECTOR_BLACK_ABS,
    ),
    (&["tube", "spring", "barrel"], CONNECTOR_SILVER),
];

/// Keyword-driven resolution used by the connector viewer.
pub fn resolve_connector(mesh_name: &str) -> ResolvedMaterial {
    let name = mesh_name.to_lowercase();
    CONNECTOR_KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| name.contains(w)))
        .map(|(_, material)| *material)
        .unwrap_or(ResolvedMaterial::DEFAULT)
}
