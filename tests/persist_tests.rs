// Host-side tests for transform and camera persistence.

use glam::Vec3;
use parts_core::*;

fn sample(x: f32, visible: bool) -> PartTransform {
    let mut t = Transform::IDENTITY;
    t.position = Vec3::new(x, 1.0, -2.0);
    t.rotation = Vec3::new(0.0, 0.5, 0.0);
    t.set_uniform_scale(0.75);
    PartTransform::capture(&t, visible)
}

#[test]
fn save_then_load_round_trips() {
    let store = TransformStore::new(MemoryStore::new());
    store.save([("Base", sample(-45.0, true)), ("Lampy Main", sample(0.0, false))]);

    let loaded = store.load();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded["Base"], sample(-45.0, true));
    assert!(!loaded["Lampy Main"].visible);
}

#[test]
fn save_replaces_previous_collection() {
    let store = TransformStore::new(MemoryStore::new());
    store.save([("Base", sample(1.0, true)), ("Mag Bottom", sample(2.0, true))]);
    store.save([("Base", sample(3.0, true))]);
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded["Base"].position.x, 3.0);
}

#[test]
fn stored_json_uses_name_keyed_records() {
    let mem = MemoryStore::new();
    let store = TransformStore::new(&mem);
    store.save([("Base", sample(1.0, true))]);
    let raw = mem.get_item(TRANSFORMS_STORAGE_KEY).expect("written");
    let v: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(v["Base"]["position"]["x"], 1.0);
    assert_eq!(v["Base"]["scale"], 0.75);
    assert_eq!(v["Base"]["visible"], true);
}

#[test]
fn missing_data_loads_empty() {
    let store = TransformStore::new(MemoryStore::new());
    assert!(store.load().is_empty());
    assert!(store.load_camera().is_none());
}

#[test]
fn corrupt_data_loads_empty() {
    let mem = MemoryStore::new();
    mem.set_item(TRANSFORMS_STORAGE_KEY, "{not json").unwrap();
    mem.set_item(CAMERA_STORAGE_KEY, "[1, 2").unwrap();
    let store = TransformStore::new(mem);
    assert!(store.load().is_empty());
    assert!(store.load_camera().is_none());
}

#[test]
fn malformed_entries_are_skipped_individually() {
    let mem = MemoryStore::new();
    let json = r#"{
        "Base": {"position": {"x": 1, "y": 2, "z": 3}, "rotation": {"x": 0, "y": 0, "z": 0}, "scale": 0.5, "visible": true},
        "Broken": {"position": "nowhere"}
    }"#;
    mem.set_item(TRANSFORMS_STORAGE_KEY, json).unwrap();
    let loaded = TransformStore::new(mem).load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded["Base"].position, Vec3Record { x: 1.0, y: 2.0, z: 3.0 });
}

#[test]
fn camera_round_trips() {
    let store = TransformStore::new(MemoryStore::new());
    let settings = CameraSettings {
        position: Vec3::new(5.0, 20.0, 64.0).into(),
        zoom: 64.0,
    };
    store.save_camera(&settings);
    assert_eq!(store.load_camera(), Some(settings));
}

#[test]
fn apply_overwrites_transform_and_visibility() {
    let record = sample(7.0, false);
    let mut t = Transform::IDENTITY;
    let mut visible = true;
    record.apply(&mut t, &mut visible);
    assert_eq!(t.position, Vec3::new(7.0, 1.0, -2.0));
    assert_eq!(t.scale, Vec3::splat(0.75));
    assert!(!visible);
}
