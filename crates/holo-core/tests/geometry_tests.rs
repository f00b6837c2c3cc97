// Host-side tests for the geometry catalog and mesh generation.

use holo_core::geometry::{build_mesh, fallback_quad, resolve_args, MAX_SEGMENTS};
use holo_core::{GeometryKind, Mesh};

fn assert_well_formed(mesh: &Mesh) {
    assert!(!mesh.vertices.is_empty());
    assert_eq!(mesh.indices.len() % 3, 0);
    let n = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < n), "index out of range");
    for v in &mesh.vertices {
        assert!(v.position.iter().all(|c| c.is_finite()));
        let len = (v.normal[0].powi(2) + v.normal[1].powi(2) + v.normal[2].powi(2)).sqrt();
        assert!((len - 1.0).abs() < 1e-4, "normal not unit: {:?}", v.normal);
        assert!(v.uv.iter().all(|c| (-1e-6..=1.0 + 1e-6).contains(c)));
    }
}

#[test]
fn default_args_match_catalog() {
    assert_eq!(GeometryKind::Plane.default_args().as_slice(), &[1.0, 1.0, 64.0, 64.0]);
    assert_eq!(GeometryKind::Sphere.default_args().as_slice(), &[1.0, 32.0, 32.0]);
    assert_eq!(GeometryKind::Box.default_args().as_slice(), &[1.0, 1.0, 1.0]);
    assert_eq!(GeometryKind::Cylinder.default_args().as_slice(), &[1.0, 1.0, 2.0, 32.0]);
    assert_eq!(GeometryKind::Torus.default_args().as_slice(), &[1.0, 0.4, 16.0, 32.0]);
    assert_eq!(GeometryKind::Cone.default_args().as_slice(), &[1.0, 2.0, 32.0]);
}

#[test]
fn labels_line_up_with_defaults() {
    for kind in GeometryKind::ALL {
        assert_eq!(kind.arg_labels().count(), kind.default_args().len());
    }
    let torus: Vec<&str> = GeometryKind::Torus.arg_labels().collect();
    assert_eq!(
        torus,
        vec!["Radius", "Tube", "Radial Segments", "Tubular Segments"]
    );
}

#[test]
fn ids_round_trip_and_unknown_is_plane() {
    for kind in GeometryKind::ALL {
        assert_eq!(GeometryKind::from_id(kind.id()), Some(kind));
    }
    assert_eq!(GeometryKind::from_id("teapot"), None);
    assert_eq!(GeometryKind::from_id_or_plane("teapot"), GeometryKind::Plane);
    assert_eq!(GeometryKind::Cone.next(), GeometryKind::Plane);
}

#[test]
fn empty_args_resolve_to_defaults() {
    for kind in GeometryKind::ALL {
        assert_eq!(resolve_args(kind, &[]), kind.default_args());
    }
}

#[test]
fn invalid_slots_fall_back_per_slot() {
    let args = resolve_args(GeometryKind::Sphere, &[2.0, f32::NAN, -4.0]);
    assert_eq!(args.as_slice(), &[2.0, 32.0, 32.0]);

    // short vector: missing tail takes defaults
    let args = resolve_args(GeometryKind::Cylinder, &[0.5]);
    assert_eq!(args.as_slice(), &[0.5, 1.0, 2.0, 32.0]);

    // extra values are ignored
    let args = resolve_args(GeometryKind::Box, &[2.0, 3.0, 4.0, 5.0]);
    assert_eq!(args.as_slice(), &[2.0, 3.0, 4.0]);
}

#[test]
fn segment_slots_are_floored_and_clamped() {
    let args = resolve_args(GeometryKind::Torus, &[1.0, 0.4, 0.0, 7.9]);
    assert_eq!(args[2], 2.0);
    assert_eq!(args[3], 7.0);

    let args = resolve_args(GeometryKind::Plane, &[1.0, 1.0, 1.0e9, 1.0]);
    assert_eq!(args[2], MAX_SEGMENTS as f32);
}

#[test]
fn zero_extent_is_accepted() {
    let args = resolve_args(GeometryKind::Plane, &[0.0, 1.0, 4.0, 4.0]);
    assert_eq!(args[0], 0.0);
}

#[test]
fn plane_mesh_counts() {
    let mesh = build_mesh(GeometryKind::Plane, &[]);
    assert_eq!(mesh.vertices.len(), 65 * 65);
    assert_eq!(mesh.triangle_count(), 64 * 64 * 2);
    assert_well_formed(&mesh);
}

#[test]
fn plane_top_row_has_top_uv() {
    let mesh = build_mesh(GeometryKind::Plane, &[2.0, 2.0, 1.0, 1.0]);
    let top_left = mesh.vertices[0];
    assert_eq!(top_left.position, [-1.0, 1.0, 0.0]);
    assert_eq!(top_left.uv, [0.0, 1.0]);
}

#[test]
fn sphere_mesh_counts() {
    let mesh = build_mesh(GeometryKind::Sphere, &[]);
    assert_eq!(mesh.vertices.len(), 33 * 33);
    assert_eq!(mesh.triangle_count(), 2 * 32 * 31);
    assert_well_formed(&mesh);
    let r = mesh.vertices[40].position;
    let len = (r[0].powi(2) + r[1].powi(2) + r[2].powi(2)).sqrt();
    assert!((len - 1.0).abs() < 1e-4);
}

#[test]
fn box_mesh_counts() {
    let mesh = build_mesh(GeometryKind::Box, &[2.0, 2.0, 2.0]);
    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.triangle_count(), 12);
    assert_well_formed(&mesh);
    // every corner of a 2x2x2 box sits at +-1 on each axis
    assert!(mesh
        .vertices
        .iter()
        .all(|v| v.position.iter().all(|c| c.abs() == 1.0)));
}

#[test]
fn every_kind_builds_a_well_formed_mesh() {
    for kind in GeometryKind::ALL {
        let mesh = build_mesh(kind, &[]);
        assert!(mesh.triangle_count() > 0, "{kind} produced no triangles");
        assert_well_formed(&mesh);
    }
}

#[test]
fn cone_has_no_top_cap() {
    let cone = build_mesh(GeometryKind::Cone, &[1.0, 2.0, 8.0]);
    let cylinder = build_mesh(GeometryKind::Cylinder, &[1.0, 1.0, 2.0, 8.0]);
    assert!(cone.triangle_count() < cylinder.triangle_count());
}

#[test]
fn fallback_quad_is_two_triangles() {
    let quad = fallback_quad(2.0);
    assert_eq!(quad.vertices.len(), 4);
    assert_eq!(quad.triangle_count(), 2);
    assert!(quad
        .vertices
        .iter()
        .all(|v| v.position[0].abs() == 1.0 && v.position[1].abs() == 1.0));
}
