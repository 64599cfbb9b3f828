use std::cell::RefCell;
use std::rc::Rc;

use geomod::geometry::vec::{DVec2, DVec3};
use geomod::model_error::{ElemKind, ModelError};
use geomod::observer::ResourceEvent;
use geomod::prelude::ModelKind;
use geomod::topology::model::Model;

fn seg(model: &mut Model, a: (f64, f64), b: (f64, f64)) {
    model.add_segment(DVec2::new(a.0, a.1), DVec2::new(b.0, b.1)).unwrap();
}

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
fn deleting_a_triangle_edge_joins_its_loops() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0, 0.0), (0.0, 1.0));
    seg(&mut m, (0.0, 1.0), (0.0, 0.0));
    assert_eq!(m.loop_use_count(), 2);
    let e = m.edge_ids()[0];
    m.delete_edge(e).unwrap();
    assert_eq!(m.edge_count(), 2);
    assert_eq!(m.loop_use_count(), 1);
    assert_eq!(m.edge_use_count(), 4);
    assert_eq!(m.vertex_count(), 3);
    assert_eq!(m.shell_count(), 1);
    m.validate().unwrap();
}

#[test]
fn deleting_a_terminal_edge_shrinks_the_loop() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0, 0.0), (2.0, 0.0));
    let pendant = m.edge_ids()[1];
    m.delete_edge(pendant).unwrap();
    assert_eq!(m.edge_count(), 1);
    assert_eq!(m.vertex_count(), 2);
    assert_eq!(m.loop_use_count(), 1);
    assert_eq!(m.shell_count(), 1);
    m.validate().unwrap();
}

#[test]
fn deleting_a_cut_edge_splits_the_shell() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0, 0.0), (2.0, 0.0));
    seg(&mut m, (2.0, 0.0), (3.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    let middle = m.edge_ids()[1];
    m.delete_edge(middle).unwrap();
    assert_eq!(m.shell_count(), 2);
    assert_eq!(m.edge_count(), 2);
    assert_eq!(m.vertex_count(), 4);
    assert_eq!(m.loop_use_count(), 2);
    m.validate().unwrap();
    for shell in m.shell_ids() {
        assert_eq!(m.shell_simplex_count(shell).unwrap(), 1);
    }
}

#[test]
fn deleting_the_last_edge_removes_the_shell() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    m.delete_edge(m.edge_ids()[0]).unwrap();
    assert_eq!(m.shell_count(), 0);
    assert_eq!(m.vertex_count(), 0);
    assert_eq!(m.edge_use_count(), 0);
    assert_eq!(m.first_shell(), None);
    m.validate().unwrap();
}

#[test]
fn deleting_a_vertex_takes_its_edges() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (0.0, 0.0), (0.0, 1.0));
    seg(&mut m, (0.0, 0.0), (-1.0, 0.0));
    assert_eq!(m.edge_count(), 3);
    let center = m.match_vertex(DVec3::new(0.0, 0.0, 0.0)).unwrap();
    m.delete_vertex(center).unwrap();
    assert_eq!(m.edge_count(), 0);
    assert_eq!(m.vertex_count(), 0);
    assert_eq!(m.shell_count(), 0);
    m.validate().unwrap();
}

#[test]
fn vertex_deletion_is_planar_only() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    let v = m.match_vertex(DVec3::new(0.0, 0.0, 0.0)).unwrap();
    assert_eq!(m.delete_vertex(v).unwrap_err(), ModelError::VertexDeleteNotPlanar);
}

#[test]
fn deleting_one_face_of_a_pair_keeps_the_shared_edge() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (1.0, 0.0, 0.0), (0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    let f = m.face_ids()[0];
    m.delete_face(f).unwrap();
    assert_eq!(m.face_count(), 1);
    assert_eq!(m.loop_use_count(), 2);
    assert_eq!(m.edge_count(), 3);
    assert_eq!(m.vertex_count(), 3);
    assert_eq!(m.edge_use_count(), 6);
    assert_eq!(m.shell_count(), 1);
    m.validate().unwrap();
}

#[test]
fn deleting_every_face_empties_the_model() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (1.0, 0.0, 0.0), (0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    while let Some(f) = m.face_ids().first().copied() {
        m.delete_face(f).unwrap();
    }
    assert_eq!(m.shell_count(), 0);
    assert_eq!(m.vertex_count(), 0);
    assert_eq!(m.edge_count(), 0);
    assert_eq!(m.edge_use_count(), 0);
    assert_eq!(m.disk_use_count(), 0);
    assert_eq!(m.vertex_use_count(), 0);
    assert_eq!(m.loop_use_count(), 0);
    m.validate().unwrap();
}

#[test]
fn deleting_a_shell_removes_everything_in_it() {
    let mut m = Model::new(ModelKind::Dbl3);
    tri(&mut m, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    tri(&mut m, (5.0, 0.0, 0.0), (6.0, 0.0, 0.0), (5.0, 1.0, 0.0));
    assert_eq!(m.shell_count(), 2);
    let ds = m.shell_ids()[0];
    m.delete_shell(ds).unwrap();
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.vertex_count(), 3);
    assert_eq!(m.face_count(), 1);
    m.validate().unwrap();
    // welding finds no leftover vertex at the deleted corner
    assert_eq!(m.match_vertex(DVec3::new(0.0, 0.0, 0.0)), None);
}

#[test]
fn stale_handles_are_reported() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    let shell = m.first_shell().unwrap();
    m.delete_shell(shell).unwrap();
    match m.delete_shell(shell).unwrap_err() {
        ModelError::StaleHandle { kind, .. } => assert_eq!(kind, ElemKind::Shell),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn observers_see_frees() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    let frees = Rc::new(RefCell::new(0usize));
    let frees2 = Rc::clone(&frees);
    let token = m.observe(move |_, event| {
        if event == ResourceEvent::Free {
            *frees2.borrow_mut() += 1;
        }
    });
    let shell = m.first_shell().unwrap();
    m.delete_shell(shell).unwrap();
    // 2 vertices, 2 disk-uses, 2 vertex-uses, 2 edge-uses, 1 edge,
    // 1 loop-use, 1 shell
    assert_eq!(*frees.borrow(), 11);
    assert!(m.unobserve(token));
    assert!(!m.unobserve(token));
}
