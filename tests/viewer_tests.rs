// Host-side tests for the lamp and connector viewer state machines.

use glam::{Vec2, Vec3};
use parts_core::fallback::box_mesh;
use parts_core::viewer::*;
use parts_core::*;

fn tree(name: &str) -> MeshTree {
    MeshTree {
        nodes: vec![MeshNode {
            name: name.to_string(),
            data: box_mesh(2.0, 2.0, 2.0),
        }],
    }
}

fn lamp_with_two_parts(mem: &MemoryStore) -> LampViewer<&MemoryStore> {
    let mut lamp = LampViewer::new(mem);
    lamp.add_loaded_part(0, tree("node"));
    lamp.record_load_failure(1, ViewerError::load_failure("Mag Bottom", "HTTP 404"));
    lamp.add_loaded_part(2, tree("node"));
    lamp
}

#[test]
fn lamp_loading_reports_failures_and_names() {
    let mem = MemoryStore::new();
    let lamp = lamp_with_two_parts(&mem);
    assert_eq!(lamp.finish_loading(), 2);
    assert_eq!(lamp.failures(), ["Mag Bottom".to_string()]);
    let names: Vec<&str> = lamp.part_names().collect();
    assert_eq!(names, ["Base", "Mag Insert"]);
}

#[test]
fn selecting_a_part_formats_its_fields() {
    let mem = MemoryStore::new();
    let mut lamp = lamp_with_two_parts(&mem);
    let fields = lamp.select(Some(1)).expect("selected");
    assert_eq!(fields.position, ["-15.00", "0.00", "0.00"].map(String::from));
    assert_eq!(fields.rotation, ["0.0", "0.0", "0.0"].map(String::from));
    assert_eq!(fields.scale, "0.30");
    assert!(fields.visible);

    assert!(lamp.select(Some(9)).is_none());
    assert!(lamp.select(None).is_none());
    assert!(!lamp.edit_selected(&TransformInputs::default()));
}

#[test]
fn editing_applies_form_semantics_and_persists() {
    let mem = MemoryStore::new();
    let mut lamp = lamp_with_two_parts(&mem);
    lamp.select(Some(1));
    let inputs = TransformInputs {
        position: ["5", "abc", "-2.5"],
        rotation: ["90", "", "0"],
        scale: "0",
    };
    assert!(lamp.edit_selected(&inputs));
    let t = lamp.selected_transform().expect("selected");
    assert_eq!(t.position, Vec3::new(5.0, 0.0, -2.5));
    assert!((t.rotation.x - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(t.scale, Vec3::ONE);

    // A fresh viewer on the same store picks the edit up at load time.
    let mut reloaded = LampViewer::new(&mem);
    let part = reloaded.add_loaded_part(2, tree("node")).expect("placed");
    assert_eq!(part.transform.position, Vec3::new(5.0, 0.0, -2.5));
}

#[test]
fn visibility_and_reset_round_trip_through_storage() {
    let mem = MemoryStore::new();
    let mut lamp = lamp_with_two_parts(&mem);
    lamp.select(Some(0));
    assert!(lamp.set_selected_visible(false));
    assert!(!lamp.store().load()["Base"].visible);

    lamp.edit_selected(&TransformInputs {
        position: ["1", "1", "1"],
        rotation: ["45", "45", "45"],
        scale: "3",
    });
    let fields = lamp.reset_selected().expect("reset");
    assert_eq!(fields.position[0], "-45.00");
    assert_eq!(fields.scale, "0.30");
    assert!(fields.visible);

    let saved = lamp.store().load();
    assert_eq!(saved["Base"].position.x, -45.0);
    assert_eq!(saved["Base"].scale, 0.3);
    assert!(saved["Base"].visible);
}

#[test]
fn lamp_zoom_and_camera_inputs() {
    let mem = MemoryStore::new();
    let mut lamp = LampViewer::new(&mem);
    assert_eq!(lamp.set_zoom("abc"), 50.0);
    assert_eq!(lamp.set_zoom("150"), 100.0);
    assert_eq!(lamp.camera().eye.z, 100.0);

    lamp.set_camera_axis(0, "12");
    lamp.set_camera_axis(2, "30");
    assert_eq!(lamp.camera().eye, Vec3::new(12.0, 20.0, 30.0));
    assert_eq!(lamp.zoom(), 30.0);
    assert_eq!(lamp.camera_fields(), ["12.0", "20.0", "30.0"].map(String::from));

    let mut restored = LampViewer::new(&mem);
    assert!(restored.restore_camera());
    assert_eq!(restored.camera().eye, Vec3::new(12.0, 20.0, 30.0));
    assert_eq!(restored.zoom(), 30.0);

    lamp.reset_camera();
    assert_eq!(lamp.camera().eye, Vec3::new(0.0, 20.0, 50.0));
    assert_eq!(lamp.wheel(1.0), 52.0);
    assert_eq!(lamp.camera().eye.z, 52.0);
}

#[test]
fn camera_z_input_is_clamped_to_zoom_range() {
    let mut lamp = LampViewer::new(MemoryStore::new());
    // Zero reads as the 0.0 default, which is below the range.
    lamp.set_camera_axis(2, "0");
    assert_eq!(lamp.zoom(), 20.0);
    assert_eq!(lamp.camera().eye.z, 20.0);

    lamp.set_camera_axis(2, "500");
    assert_eq!(lamp.zoom(), 100.0);
    assert_eq!(lamp.camera().eye.z, 100.0);
    assert_eq!(lamp.store().load_camera().map(|c| c.zoom), Some(100.0));
}

#[test]
fn restored_zoom_outside_range_is_clamped() {
    let mem = MemoryStore::new();
    let store = TransformStore::new(&mem);
    store.save_camera(&CameraSettings {
        position: Vec3::new(3.0, 20.0, 5.0).into(),
        zoom: 5.0,
    });
    let mut lamp = LampViewer::new(&mem);
    assert!(lamp.restore_camera());
    assert_eq!(lamp.zoom(), 20.0);
    assert_eq!(lamp.camera().eye, Vec3::new(3.0, 20.0, 20.0));

    store.save_camera(&CameraSettings {
        position: Vec3::new(0.0, 20.0, 400.0).into(),
        zoom: 400.0,
    });
    let mut lamp = LampViewer::new(&mem);
    assert!(lamp.restore_camera());
    assert_eq!(lamp.zoom(), 100.0);
    assert_eq!(lamp.camera().eye.z, 100.0);
}

#[test]
fn restore_camera_without_saved_settings() {
    let mut lamp = LampViewer::new(MemoryStore::new());
    assert!(!lamp.restore_camera());
    assert_eq!(lamp.camera().eye, LAMP_CONFIG.camera_eye);
}

#[test]
fn drag_rotates_the_lamp_group() {
    let mut lamp = LampViewer::new(MemoryStore::new());
    lamp.add_loaded_part(0, tree("node"));
    lamp.pointer_down(0.0, 0.0);
    assert!(lamp.pointer_move(20.0, 0.0));
    lamp.pointer_up();
    assert!(!lamp.pointer_move(40.0, 0.0));
    assert!((lamp.scene().group.rotation.y - 0.2).abs() < 1e-6);
}

#[test]
fn view_mode_values() {
    assert_eq!(ViewMode::from_value("pins"), Some(ViewMode::Pins));
    assert_eq!(ViewMode::from_value("connector"), Some(ViewMode::Connector));
    assert_eq!(ViewMode::from_value("assembly"), Some(ViewMode::Assembly));
    assert_eq!(ViewMode::from_value("exploded"), None);
}

fn connector_at(start: f64) -> ConnectorViewer<ManualClock> {
    ConnectorViewer::with_clock(ManualClock::new(start))
}

/// Set the clock to `t` and run one frame.
fn frame_at(v: &mut ConnectorViewer<ManualClock>, t: f64, dt: f32) -> Option<SnapFrame> {
    v.clock().set(t);
    v.frame(dt)
}

#[test]
fn failed_connector_uses_fallback_and_ignores_pins() {
    let mut v = connector_at(0.0);
    v.assemble(
        Err(ViewerError::load_failure("Connector", "HTTP 500")),
        Ok(tree("pin")),
    );
    assert!(v.using_fallback());
    assert!(!v.pair_loaded());
    assert_eq!(v.scene().parts.len(), 1);
    assert_eq!(v.draw_items().len(), 30);
    assert_eq!(v.set_mode(ViewMode::Pins), ViewMode::Connector);
    assert!(v.snap().restart_due().is_none());
}

#[test]
fn missing_pins_shows_connector_alone() {
    let mut v = connector_at(0.0);
    v.assemble(
        Ok(tree("housing")),
        Err(ViewerError::load_failure("Connector Pins", "HTTP 404")),
    );
    assert!(!v.using_fallback());
    assert!(!v.pair_loaded());
    assert_eq!(v.scene().parts.len(), 1);
    assert!(v.scene().parts[0].visible);
    assert_eq!(v.set_mode(ViewMode::Assembly), ViewMode::Connector);
    assert!(frame_at(&mut v, 5.0, 0.016).is_none());
}

#[test]
fn pair_snaps_and_modes_toggle_visibility() {
    let mut v = connector_at(0.0);
    v.assemble(Ok(tree("housing")), Ok(tree("pin")));
    assert!(v.pair_loaded());
    assert_eq!(v.mode(), ViewMode::Assembly);
    assert_eq!(v.snap().restart_due(), Some(1.0));
    assert!(v.scene().parts.iter().all(|p| p.visible));

    assert_eq!(v.set_mode(ViewMode::Pins), ViewMode::Pins);
    assert!(!v.scene().parts[0].visible);
    assert!(v.scene().parts[1].visible);
    v.set_mode(ViewMode::Assembly);

    let frame = frame_at(&mut v, 1.0, 0.016).expect("first cycle");
    assert_eq!(frame.phase, SnapPhase::Approaching);
    assert_eq!(v.scene().parts[1].transform.position.z, SNAP_START_DEPTH);

    frame_at(&mut v, 2.3, 0.016);
    assert!((v.scene().parts[1].transform.position.z - SNAP_MATED_DEPTH).abs() < 1e-4);
}

#[test]
fn snap_schedule_follows_the_viewer_clock() {
    let mut v = connector_at(40.0);
    v.assemble(Ok(tree("housing")), Ok(tree("pin")));
    assert_eq!(v.snap().restart_due(), Some(41.0));

    // First frame long after the due time still plays from the start.
    let frame = frame_at(&mut v, 90.0, 0.016).expect("cycle started");
    assert_eq!(frame.phase, SnapPhase::Approaching);
    assert_eq!(v.snap().state().start_time, 90.0);
}

#[test]
fn auto_rotate_starts_off() {
    let mut v = connector_at(0.0);
    assert!(!v.auto_rotate);
    v.assemble(Ok(tree("housing")), Ok(tree("pin")));
    frame_at(&mut v, 0.5, 0.1);
    assert_eq!(v.scene().group.rotation.y, 0.0);
}

#[test]
fn idle_spin_and_float() {
    let mut v = connector_at(0.0);
    v.auto_rotate = true;
    v.assemble(Ok(tree("housing")), Ok(tree("pin")));

    frame_at(&mut v, 0.5, 0.1);
    assert!((v.scene().group.rotation.y - 0.05).abs() < 1e-6);
    let bob = (0.25f32).sin() * 0.3;
    assert!((v.scene().group.position.y - bob).abs() < 1e-6);

    // No spin while the snap plays.
    frame_at(&mut v, 1.0, 0.1);
    let spun = v.scene().group.rotation.y;
    frame_at(&mut v, 1.5, 0.1);
    assert_eq!(v.scene().group.rotation.y, spun);

    v.auto_rotate = false;
    frame_at(&mut v, 10.0, 0.1);
    assert_eq!(v.scene().group.rotation.y, spun);
}

#[test]
fn dragging_suspends_float_and_spin() {
    let mut v = connector_at(0.0);
    v.auto_rotate = true;
    v.assemble(Ok(tree("housing")), Err(ViewerError::MissingOptionalAsset("pins".into())));
    v.pointer_down(0.0, 0.0);
    assert!(v.is_dragging());
    let before = v.scene().group;
    frame_at(&mut v, 3.0, 0.1);
    assert_eq!(v.scene().group, before);
    v.pointer_up();
    frame_at(&mut v, 3.0, 0.1);
    assert_ne!(v.scene().group.rotation.y, before.rotation.y);
}

#[test]
fn connector_speed_zoom_and_pinch() {
    let mut v = ConnectorViewer::new();
    assert_eq!(v.set_rotation_speed("2"), 2.0);
    assert_eq!(v.set_rotation_speed("fast"), 2.0);

    assert_eq!(v.set_zoom("100"), 50.0);
    assert_eq!(v.camera().eye.z, 50.0);
    assert_eq!(v.wheel(-1.0), 49.5);

    v.pinch_start(Vec2::ZERO, Vec2::new(100.0, 0.0));
    assert_eq!(v.pinch_move(Vec2::ZERO, Vec2::new(50.0, 0.0)), Some(50.0));
    assert_eq!(v.pinch_move(Vec2::ZERO, Vec2::new(400.0, 0.0)), Some(12.375));
    assert_eq!(v.camera().eye.z, 12.375);
}

#[test]
fn loading_bar_progress() {
    assert_eq!(loading_progress(0, 7), 55);
    assert_eq!(loading_progress(6, 7), 89);
    assert_eq!(loading_progress(0, 0), 95);
    assert_eq!(loading_message("Base", 0, 7), "Loading Base... (1/7)");
}
