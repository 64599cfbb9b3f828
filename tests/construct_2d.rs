use geomod::geometry::TOLERANCE;
use geomod::geometry::position::{Dim, ModelKind, Position};
use geomod::geometry::vec::{DVec2, DVec3};
use geomod::model_error::ModelError;
use geomod::topology::model::Model;

fn seg(model: &mut Model, a: (f64, f64), b: (f64, f64)) {
    model.add_segment(DVec2::new(a.0, a.1), DVec2::new(b.0, b.1)).unwrap();
}

#[test]
fn single_segment_makes_a_shell() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.loop_use_count(), 1);
    assert_eq!(m.edge_count(), 1);
    assert_eq!(m.edge_use_count(), 2);
    assert_eq!(m.vertex_count(), 2);
    assert_eq!(m.disk_use_count(), 2);
    assert_eq!(m.vertex_use_count(), 2);
    assert_eq!(m.face_count(), 0);
    m.validate().unwrap();
}

#[test]
fn chained_segments_extend_the_loop() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0, 0.0), (2.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.loop_use_count(), 1);
    assert_eq!(m.edge_count(), 2);
    assert_eq!(m.edge_use_count(), 4);
    assert_eq!(m.vertex_count(), 3);
    assert_eq!(m.disk_use_count(), 3);
    assert_eq!(m.vertex_use_count(), 4);
    m.validate().unwrap();
}

#[test]
fn closing_a_triangle_splits_the_loop() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0, 0.0), (0.0, 1.0));
    seg(&mut m, (0.0, 1.0), (0.0, 0.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.loop_use_count(), 2);
    assert_eq!(m.edge_count(), 3);
    assert_eq!(m.edge_use_count(), 6);
    assert_eq!(m.vertex_count(), 3);
    m.validate().unwrap();
}

#[test]
fn bridging_segment_joins_two_shells() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (5.0, 5.0), (6.0, 5.0));
    assert_eq!(m.shell_count(), 2);
    seg(&mut m, (1.0, 0.0), (5.0, 5.0));
    assert_eq!(m.shell_count(), 1);
    assert_eq!(m.loop_use_count(), 1);
    assert_eq!(m.edge_count(), 3);
    assert_eq!(m.vertex_count(), 4);
    m.validate().unwrap();
}

#[test]
fn duplicate_segment_is_ignored() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0, 0.0), (0.0, 0.0));
    assert_eq!(m.edge_count(), 1);
    assert_eq!(m.vertex_count(), 2);
    assert_eq!(m.edge_use_count(), 2);
    m.validate().unwrap();
}

#[test]
fn nearby_endpoints_weld_to_one_vertex() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0 + 0.4 * TOLERANCE, 0.4 * TOLERANCE), (2.0, 0.0));
    assert_eq!(m.vertex_count(), 3);
    assert_eq!(m.shell_count(), 1);
    m.validate().unwrap();
}

#[test]
fn integral_kind_rounds_positions() {
    let mut m = Model::new(ModelKind::Int2);
    seg(&mut m, (0.4, 0.6), (2.0, 2.0));
    let v = m.match_vertex(DVec3::new(0.0, 1.0, 0.0)).unwrap();
    match m.vertex_position(v).unwrap() {
        Position::Int2(p) => {
            assert_eq!(p.x, 0);
            assert_eq!(p.y, 1);
        }
        other => panic!("unexpected position {other:?}"),
    }
}

#[test]
fn segment_on_spatial_model_is_rejected() {
    let mut m = Model::new(ModelKind::Dbl3);
    let err = m.add_segment(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)).unwrap_err();
    assert_eq!(err, ModelError::WrongDimension { expected: Dim::Two, found: Dim::Three });
}

#[test]
fn shell_bounds_follow_the_geometry() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0, 0.0), (1.0, 3.0));
    let shell = m.first_shell().unwrap();
    let b = m.shell_bounds(shell).unwrap().to_d3();
    assert_eq!(b.y_min, 0.0);
    assert_eq!(b.y_max, 3.0);
    assert_eq!(b.x_max, 1.0);
}

#[test]
fn joining_a_multi_loop_shell_keeps_its_other_loops() {
    // The fifth segment splits a loop; the last one joins the split shell
    // into another, which must carry the leftover loop along.
    let segs = [
        ((4.0, 2.0), (2.0, 1.0)),
        ((2.0, 2.0), (0.0, 0.0)),
        ((4.0, 1.0), (3.0, 5.0)),
        ((4.0, 1.0), (2.0, 0.0)),
        ((1.0, 3.0), (3.0, 0.0)),
        ((2.0, 5.0), (2.0, 0.0)),
        ((3.0, 5.0), (2.0, 5.0)),
        ((1.0, 3.0), (2.0, 0.0)),
    ];
    let mut m = Model::new(ModelKind::Dbl2);
    for (a, b) in segs {
        seg(&mut m, a, b);
    }
    m.validate().unwrap();
    assert_eq!(m.edge_use_count(), 2 * m.edge_count());
}

#[test]
fn simplex_count_counts_segments() {
    let mut m = Model::new(ModelKind::Dbl2);
    seg(&mut m, (0.0, 0.0), (1.0, 0.0));
    seg(&mut m, (1.0, 0.0), (2.0, 1.0));
    seg(&mut m, (2.0, 1.0), (0.0, 0.0));
    let shell = m.first_shell().unwrap();
    assert_eq!(m.shell_simplex_count(shell).unwrap(), 3);
}

mod random {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn random_segments_keep_the_model_valid(
            segs in prop::collection::vec(
                ((0u8..6, 0u8..6), (0u8..6, 0u8..6)),
                1..40,
            )
        ) {
            let mut m = Model::new(ModelKind::Dbl2);
            for (a, b) in segs {
                if a == b {
                    continue;
                }
                seg(&mut m, (a.0 as f64, a.1 as f64), (b.0 as f64, b.1 as f64));
            }
            prop_assert!(m.validate().is_ok());
            prop_assert_eq!(m.edge_use_count(), 2 * m.edge_count());
        }
    }
}
