// Host-side tests for scene assembly: lamp layout, connector fitting and the
// procedural fallback.

use glam::Vec3;
use parts_core::fallback::{box_mesh, fallback_connector, COIL_COUNT, PIN_X};
use parts_core::*;
use std::f32::consts::PI;

fn tree(name: &str, w: f32, h: f32, d: f32) -> MeshTree {
    MeshTree {
        nodes: vec![MeshNode {
            name: name.to_string(),
            data: box_mesh(w, h, d),
        }],
    }
}

fn six_slot_catalog() -> &'static [PartSpec] {
    &LAMP_PARTS[..6]
}

#[test]
fn lamp_offsets_are_centred_and_spaced() {
    let xs: Vec<f32> = (0..6).map(|i| lamp_offset(i, 6)).collect();
    assert_eq!(xs, [-37.5, -22.5, -7.5, 7.5, 22.5, 37.5]);
    assert_eq!(lamp_offset(0, 1), 0.0);
}

#[test]
fn failed_part_is_skipped_and_others_keep_their_slot() {
    let catalog = six_slot_catalog();
    let results = (0..6).map(|i| {
        if i == 2 {
            Err(ViewerError::load_failure(catalog[i].name, "HTTP 404"))
        } else {
            Ok(tree("node", 1.0, 1.0, 1.0))
        }
    });
    let scene = assemble_lamp(catalog, results, &SavedTransforms::default());
    assert_eq!(scene.parts.len(), 5);
    assert!(scene.parts.iter().all(|p| p.name != catalog[2].name));
    let xs: Vec<f32> = scene.parts.iter().map(|p| p.transform.position.x).collect();
    assert_eq!(xs, [-37.5, -22.5, 7.5, 22.5, 37.5]);
    for p in &scene.parts {
        assert_eq!(p.transform.scale, Vec3::splat(LAMP_PART_SCALE));
        assert_eq!(p.transform.position.y, 0.0);
        assert!(p.visible);
    }
}

#[test]
fn saved_transform_overrides_default_layout() {
    let catalog = six_slot_catalog();
    let mut saved = SavedTransforms::default();
    let mut t = Transform::IDENTITY;
    t.position = Vec3::new(1.0, 2.0, 3.0);
    t.set_uniform_scale(2.0);
    saved.insert(catalog[0].name.to_string(), PartTransform::capture(&t, false));

    let part = lamp_part(&catalog[0], 0, 6, tree("node", 1.0, 1.0, 1.0), &saved);
    assert_eq!(part.transform.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(part.transform.uniform_scale(), 2.0);
    assert!(!part.visible);

    let other = lamp_part(&catalog[1], 1, 6, tree("node", 1.0, 1.0, 1.0), &saved);
    assert_eq!(other.transform.position.x, lamp_offset(1, 6));
}

#[test]
fn lamp_part_resolves_materials_from_catalog() {
    let connector = LAMP_PARTS
        .iter()
        .find(|p| p.name == "Connector")
        .expect("connector entry");
    let part = lamp_part(connector, 4, 7, tree("Housing_01", 1.0, 1.0, 1.0), &SavedTransforms::default());
    assert_eq!(part.meshes[0].material.kind, SurfaceKind::Plastic);
}

#[test]
fn connector_is_centred_and_scaled_to_target_size() {
    let mut t = tree("housing", 20.0, 4.0, 2.0);
    for p in &mut t.nodes[0].data.positions {
        p[0] += 7.0;
    }
    let part = connector_part(&CONNECTOR_PART, t);
    assert!((part.transform.uniform_scale() - 0.5).abs() < 1e-6);
    assert_eq!(part.transform.position, Vec3::new(-7.0, 0.0, 0.0));
    assert_eq!(part.meshes[0].material.kind, SurfaceKind::BlackAbs);
}

#[test]
fn degenerate_bounds_keep_unit_scale() {
    let mut b = Aabb::EMPTY;
    b.extend_point(Vec3::new(1.0, 1.0, 1.0));
    let t = connector_fit_transform(&b);
    assert_eq!(t.uniform_scale(), 1.0);
    assert_eq!(t.position, Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(connector_fit_transform(&Aabb::EMPTY), Transform::IDENTITY);
}

#[test]
fn pair_placement_faces_halves_together() {
    let mut a = connector_part(&CONNECTOR_PART, tree("housing", 2.0, 2.0, 2.0));
    let mut b = connector_part(&PINS_PART, tree("pin", 2.0, 2.0, 2.0));
    place_pair(&mut a, &mut b);
    assert_eq!(a.transform.position, Vec3::ZERO);
    assert_eq!(a.transform.rotation.y, PI);
    assert_eq!(b.transform.position, Vec3::new(0.0, 0.0, 8.0));
    // Scale from fitting survives placement.
    assert_eq!(b.transform.uniform_scale(), 5.0);
}

#[test]
fn fallback_connector_has_every_component() {
    let part = fallback_connector("Connector");
    let expected = 1 + PIN_X.len() * (3 + COIL_COUNT) + 2;
    assert_eq!(part.meshes.len(), expected);
    assert_eq!(part.meshes.len(), 30);

    let kind_of = |name: &str| {
        part.meshes
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.material.kind)
    };
    assert_eq!(kind_of("housing"), Some(SurfaceKind::BlackAbs));
    assert_eq!(kind_of("plunger_1"), Some(SurfaceKind::Gold));
    assert_eq!(kind_of("spring_2_5"), Some(SurfaceKind::Silver));
    assert_eq!(kind_of("magnet_0"), Some(SurfaceKind::Magnet));
}

#[test]
fn fallback_meshes_share_geometry() {
    let part = fallback_connector("Connector");
    let springs: Vec<_> = part
        .meshes
        .iter()
        .filter(|m| m.name.starts_with("spring_"))
        .collect();
    assert_eq!(springs.len(), PIN_X.len() * COIL_COUNT);
    assert!(springs
        .windows(2)
        .all(|w| std::rc::Rc::ptr_eq(&w[0].geometry, &w[1].geometry)));
}

#[test]
fn draw_items_skip_hidden_parts() {
    let mut scene = Scene::default();
    scene.parts.push(fallback_connector("a"));
    scene.parts.push(connector_part(&PINS_PART, tree("pin", 1.0, 1.0, 1.0)));
    assert_eq!(scene.draw_items().len(), 31);
    scene.parts[0].visible = false;
    assert_eq!(scene.draw_items().len(), 1);
}
