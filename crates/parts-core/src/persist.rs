//! Transform and camera persistence over a synchronous key-value store.
//!
//! Corrupt or missing data is never an error for callers: it is logged and
//! treated as "nothing saved".

use crate::constants::{CAMERA_STORAGE_KEY, TRANSFORMS_STORAGE_KEY};
use crate::error::ViewerError;
use crate::scene::Transform;
use fnv::FnvHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Synchronous string store (browser `localStorage` or an in-memory map).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), ViewerError>;
}

/// In-memory store, used by tests and when `localStorage` is unavailable.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<FnvHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ViewerError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ViewerError> {
        (**self).set_item(key, value)
    }
}

/// `{x, y, z}` record as stored in JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3Record {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for Vec3Record {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3Record> for Vec3 {
    fn from(r: Vec3Record) -> Self {
        Vec3::new(r.x, r.y, r.z)
    }
}

/// Persisted per-part edit state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartTransform {
    pub position: Vec3Record,
    pub rotation: Vec3Record,
    pub scale: f32,
    pub visible: bool,
}

impl PartTransform {
    pub fn capture(transform: &Transform, visible: bool) -> Self {
        Self {
            position: transform.position.into(),
            rotation: transform.rotation.into(),
            scale: transform.uniform_scale(),
            visible,
        }
    }

    /// Overwrite a part's transform and visibility entirely.
    pub fn apply(&self, transform: &mut Transform, visible: &mut bool) {
        transform.position = self.position.into();
        transform.rotation = self.rotation.into();
        transform.set_uniform_scale(self.scale);
        *visible = self.visible;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub position: Vec3Record,
    pub zoom: f32,
}

pub type SavedTransforms = FnvHashMap<String, PartTransform>;

/// Reads and writes viewer state under fixed keys.
pub struct TransformStore<S> {
    store: S,
    transforms_key: &'static str,
    camera_key: &'static str,
}

impl<S: KeyValueStore> TransformStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            transforms_key: TRANSFORMS_STORAGE_KEY,
            camera_key: CAMERA_STORAGE_KEY,
        }
    }

    /// Replace the whole saved collection with `parts`.
    pub fn save<'a>(&self, parts: impl IntoIterator<Item = (&'a str, PartTransform)>) {
        let snapshot: FnvHashMap<&str, PartTransform> = parts.into_iter().collect();
        match serde_json::to_string(&snapshot) {
            Ok(json) => match self.store.set_item(self.transforms_key, &json) {
                Ok(()) => log::info!("[persist] saved {} transforms", snapshot.len()),
                Err(e) => log::error!("[persist] {}", e),
            },
            Err(e) => log::error!("[persist] could not serialize transforms: {}", e),
        }
    }

    /// Saved transforms keyed by display name; empty when absent or corrupt.
    pub fn load(&self) -> SavedTransforms {
        let Some(raw) = self.store.get_item(self.transforms_key) else {
            return SavedTransforms::default();
        };
        let entries: FnvHashMap<String, serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(source) => {
                let err = ViewerError::PersistedDataCorrupt {
                    key: self.transforms_key.to_string(),
                    source,
                };
                log::error!("[persist] {}", err);
                return SavedTransforms::default();
            }
        };
        let mut out = SavedTransforms::default();
        for (name, value) in entries {
            match serde_json::from_value::<PartTransform>(value) {
                Ok(t) => {
                    out.insert(name, t);
                }
                Err(e) => log::warn!("[persist] ignoring malformed transform for {}: {}", name, e),
            }
        }
        out
    }

    pub fn save_camera(&self, settings: &CameraSettings) {
        match serde_json::to_string(settings) {
            Ok(json) => {
                if let Err(e) = self.store.set_item(self.camera_key, &json) {
                    log::error!("[persist] {}", e);
                }
            }
            Err(e) => log::error!("[persist] could not serialize camera: {}", e),
        }
    }

    pub fn load_camera(&self) -> Option<CameraSettings> {
        let raw = self.store.get_item(self.camera_key)?;
        match serde_json::from_str(&raw) {
            Ok(s) => Some(s),
            Err(source) => {
                let err = ViewerError::PersistedDataCorrupt {
                    key: self.camera_key.to_string(),
                    source,
                };
                log::error!("[persist] {}", err);
                None
            }
        }
    }
}
