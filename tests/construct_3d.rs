use geomod::geometry::position::{Dim, ModelKind};
use geomod::geometry::vec::{DVec2, DVec3};
use geomod::model_error::ModelError;
use geomod::topology::model::Model;

fn tri(model: &mut Model, a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)) {
    model
        .add_triangle(
            DVec3::new(a.0, a.1, a.2),
            DVec3::new(b.0, b.1, b.2),
            DVec3::new(c.0, c.1, c.2),
        )
        .unwrap();
}

#[test]
fn single_triangle_makes_a_shell() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.face_count(), 1);
    assert_eq!(m.loop_use_count(), 2);
    assert_eq!(m.edge_count(), 3);
    assert_eq!(m.edge_use_count(), 6);
    assert_eq!(m.vertex_count(), 3);
    assert_eq!(m.disk_use_count(), 3);
    assert_eq!(m.vertex_use_count(), 6);
    m.validate().unwrap();
}

#[test]
fn first_triangle_keeps_its_corners_apart() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    let a = m.match_vertex(DVec3::new(0.0, 0.0, 0.0)).unwrap();
    let b = m.match_vertex(DVec3::new(1.0, 0.0, 0.0)).unwrap();
    let c = m.match_vertex(DVec3::new(0.0, 1.0, 0.0)).unwrap();
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn two_triangles_share_an_edge() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (1.0, 0.0, 0.0), (0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.face_count(), 2);
    assert_eq!(m.loop_use_count(), 4);
    assert_eq!(m.edge_count(), 5);
    assert_eq!(m.edge_use_count(), 12);
    assert_eq!(m.vertex_count(), 4);
    assert_eq!(m.disk_use_count(), 4);
    assert_eq!(m.vertex_use_count(), 12);
    m.validate().unwrap();
}

#[test]
fn fan_of_three_triangles_around_one_edge() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, -1.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.face_count(), 3);
    assert_eq!(m.edge_count(), 7);
    assert_eq!(m.vertex_count(), 5);
    assert_eq!(m.disk_use_count(), 5);
    assert_eq!(m.edge_use_count(), 18);
    m.validate().unwrap();
}

#[test]
fn triangle_sharing_one_vertex_extends_the_shell() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (1.0, 0.0, 0.0), (2.0, 0.0, 0.0), (2.0, 1.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.face_count(), 2);
    assert_eq!(m.vertex_count(), 5);
    assert_eq!(m.edge_count(), 6);
    // the shared vertex now carries two disks
    assert_eq!(m.disk_use_count(), 6);
    m.validate().unwrap();
}

#[test]
fn two_vertices_on_one_shell_without_an_edge() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (1.0, 0.0, 0.0), (2.0, 0.0, 0.0), (2.0, 1.0, 0.0));
    // (0,1,0) and (2,1,0) share the shell but no edge joins them
    tri(&mut m, (0.0, 1.0, 0.0), (2.0, 1.0, 0.0), (1.0, 2.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.face_count(), 3);
    assert_eq!(m.edge_count(), 9);
    assert_eq!(m.vertex_count(), 6);
    assert_eq!(m.disk_use_count(), 9);
    m.validate().unwrap();
}

#[test]
fn bridging_triangle_joins_two_shells() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (3.0, 0.0, 0.0), (4.0, 0.0, 0.0), (3.0, 1.0, 0.0));
    assert_eq!(m.shell_count(), 2);
    tri(&mut m, (0.0, 0.0, 0.0), (3.0, 0.0, 0.0), (1.5, -1.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.face_count(), 3);
    assert_eq!(m.vertex_count(), 7);
    m.validate().unwrap();
}

#[test]
fn three_first_faces_of_a_tetrahedron() {
    let mut m = Model::new(ModelKind::Dbl3);
    let p = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
    ];
    tri(&mut m, p[0], p[1], p[2]);
    tri(&mut m, p[0], p[3], p[1]);
    tri(&mut m, p[1], p[3], p[2]);
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.face_count(), 3);
    assert_eq!(m.edge_count(), 6);
    assert_eq!(m.vertex_count(), 4);
    assert_eq!(m.edge_use_count(), 18);
    m.validate().unwrap();
}

#[test]
fn closing_face_over_three_existing_edges_is_unsupported() {
    let mut m = Model::new(ModelKind::Dbl3);
    let p = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
    ];
    tri(&mut m, p[0], p[1], p[2]);
    tri(&mut m, p[0], p[3], p[1]);
    tri(&mut m, p[1], p[3], p[2]);
    let err = m
        .add_triangle(
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 0.0),
        )
        .unwrap_err();
    assert_eq!(err, ModelError::UnsupportedTriangle);
}

#[test]
fn duplicate_triangle_is_ignored() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    assert_eq!(m.face_count(), 1);
    assert_eq!(m.edge_count(), 3);
    assert_eq!(m.edge_use_count(), 6);
    m.validate().unwrap();
}

#[test]
fn triangle_on_planar_model_is_rejected() {
    let mut m = Model::new(ModelKind::Dbl2);
    let err = m
        .add_triangle(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        )
        .unwrap_err();
    assert_eq!(err, ModelError::WrongDimension { expected: Dim::Three, found: Dim::Two });
    assert!(m.add_segment(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)).is_ok());
}

#[test]
fn shell_simplex_count_counts_faces() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (1.0, 0.0, 0.0), (0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    let shell = m.first_shell().unwrap();
    assert_eq!(m.shell_simplex_count(shell).unwrap(), 2);
}

#[test]
fn joining_shells_keeps_the_larger_one() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (10.0, 0.0, 0.0), (0.0, 10.0, 0.0));
    // distant second shell
    tri(&mut m, (20.0, 0.0, 0.0), (21.0, 0.0, 0.0), (20.0, 1.0, 0.0));
    let shells = m.shell_ids();
    assert_eq!(shells.len(), 2);
    let big = shells[0];
    tri(&mut m, (10.0, 0.0, 0.0), (20.0, 0.0, 0.0), (15.0, -5.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.first_shell(), Some(big));
    m.validate().unwrap();
}
