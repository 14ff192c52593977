//! Static part catalogs for both viewers.
//!
//! Component lists are ordered slices: the first key that matches a mesh name
//! wins, so declaration order is part of the contract.

/// Coarse surface category declared in a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    Plastic,
    Metal,
    Paper,
    Default,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentSpec {
    pub material: MaterialKind,
    pub color: &'static str,
}

impl ComponentSpec {
    pub const fn new(material: MaterialKind, color: &'static str) -> Self {
        Self { material, color }
    }
}

/// Ordered `(component key, spec)` pairs.
pub type ComponentList<'a> = &'a [(&'a str, ComponentSpec)];

/// Key used as the fallback component when nothing else matches.
pub const NODE_COMPONENT: &str = "node";

#[derive(Clone, Copy, Debug)]
pub struct PartSpec {
    pub file: &'static str,
    pub name: &'static str,
    pub components: Option<ComponentList<'static>>,
}

const OFF_WHITE_PLASTIC: &[(&str, ComponentSpec)] = &[(
    NODE_COMPONENT,
    ComponentSpec::new(MaterialKind::Plastic, "off-white"),
)];

const OFF_WHITE_PAPER: &[(&str, ComponentSpec)] = &[(
    NODE_COMPONENT,
    ComponentSpec::new(MaterialKind::Paper, "off-white"),
)];

const CONNECTOR_COMPONENTS: &[(&str, ComponentSpec)] = &[
    ("housing", ComponentSpec::new(MaterialKind::Plastic, "dark-gray")),
    ("magnet", ComponentSpec::new(MaterialKind::Metal, "steel")),
    ("pin", ComponentSpec::new(MaterialKind::Metal, "gold")),
];

/// Parts shown by the lamp viewer, laid out left to right in this order.
pub const LAMP_PARTS: &[PartSpec] = &[
    PartSpec {
        file: "base.obj",
        name: "Base",
        components: Some(OFF_WHITE_PLASTIC),
    },
    PartSpec {
        file: "lampy-mag-bottom-wider.obj",
        name: "Mag Bottom",
        components: Some(OFF_WHITE_PLASTIC),
    },
    PartSpec {
        file: "lampy-mag-insert-fillet.obj",
        name: "Mag Insert",
        components: Some(OFF_WHITE_PLASTIC),
    },
    PartSpec {
        file: "lampy.obj",
        name: "Lampy Main",
        components: Some(OFF_WHITE_PAPER),
    },
    PartSpec {
        file: "connector.obj",
        name: "Connector",
        components: Some(CONNECTOR_COMPONENTS),
    },
    PartSpec {
        file: "connector-pins.obj",
        name: "Connector Pins",
        components: Some(CONNECTOR_COMPONENTS),
    },
    PartSpec {
        file: "XIAO-ESP32C3.obj",
        name: "XIAO ESP32C3",
        components: None,
    },
];

/// Static half of the connector viewer pair (required).
pub const CONNECTOR_PART: PartSpec = PartSpec {
    file: "connector.obj",
    name: "Connector",
    components: None,
};

/// Moving half of the connector viewer pair (optional).
pub const PINS_PART: PartSpec = PartSpec {
    file: "connector-pins.obj",
    name: "Connector Pins",
    components: None,
};

/// Join an asset base path and a catalog file name.
pub fn asset_url(base: &str, file: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", base, file)
    }
}
