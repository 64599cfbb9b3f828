use bytes::{BufMut, BytesMut};

use geomod::geometry::vec::{DVec2, DVec3};
use geomod::io::{ENCODING_PLAIN, read_model, write_model};
use geomod::model_error::ModelError;
use geomod::prelude::ModelKind;
use geomod::topology::model::Model;

fn planar_sample() -> Model {
    let mut m = Model::new(ModelKind::Dbl2);
    m.add_segment(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)).unwrap();
    m.add_segment(DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)).unwrap();
    m.add_segment(DVec2::new(0.0, 1.0), DVec2::new(0.0, 0.0)).unwrap();
    m
}

fn spatial_sample() -> Model {
    let mut m = Model::new(ModelKind::Dbl3);
    m.add_triangle(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    )
    .unwrap();
    m.add_triangle(
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
    )
    .unwrap();
    m
}

#[test]
fn planar_round_trip() {
    let m = planar_sample();
    let mut buf = BytesMut::new();
    write_model(&m, &mut buf);
    let read = read_model(&mut buf.freeze()).unwrap();
    assert!(read.is_complete());
    let n = read.into_model();
    assert_eq!(n.vertex_count(), m.vertex_count());
    assert_eq!(n.edge_count(), m.edge_count());
    assert_eq!(n.shell_count(), m.shell_count());
    assert_eq!(n.loop_use_count(), m.loop_use_count());
    n.validate().unwrap();
}

#[test]
fn spatial_round_trip() {
    let m = spatial_sample();
    let mut buf = BytesMut::new();
    write_model(&m, &mut buf);
    let read = read_model(&mut buf.freeze()).unwrap();
    assert!(read.is_complete());
    let n = read.into_model();
    assert_eq!(n.vertex_count(), 4);
    assert_eq!(n.edge_count(), 5);
    assert_eq!(n.face_count(), 2);
    assert_eq!(n.shell_count(), 1);
    n.validate().unwrap();
}

#[test]
fn integral_round_trip() {
    let mut m = Model::new(ModelKind::Int2);
    m.add_segment(DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0)).unwrap();
    let mut buf = BytesMut::new();
    write_model(&m, &mut buf);
    let n = read_model(&mut buf.freeze()).unwrap().into_model();
    assert_eq!(n.kind(), ModelKind::Int2);
    assert_eq!(n.vertex_count(), 2);
    assert!(n.match_vertex(DVec3::new(3.0, 4.0, 0.0)).is_some());
}

#[test]
fn empty_model_round_trip() {
    let m = Model::new(ModelKind::Dbl3);
    let mut buf = BytesMut::new();
    write_model(&m, &mut buf);
    let read = read_model(&mut buf.freeze()).unwrap();
    assert!(read.is_complete());
    assert_eq!(read.into_model().shell_count(), 0);
}

#[test]
fn short_header_is_truncated() {
    let mut buf = BytesMut::new();
    write_model(&planar_sample(), &mut buf);
    let short = buf.freeze().slice(0..6);
    assert_eq!(read_model(&mut short.clone()).unwrap_err(), ModelError::Truncated);
}

#[test]
fn cut_inside_vertex_table_is_an_error() {
    let mut buf = BytesMut::new();
    write_model(&planar_sample(), &mut buf);
    // header plus one and a half vertices
    let cut = buf.freeze().slice(0..10 + 16 + 8);
    assert_eq!(read_model(&mut cut.clone()).unwrap_err(), ModelError::Truncated);
}

#[test]
fn cut_inside_simplex_records_yields_a_partial_model() {
    let m = planar_sample();
    let mut buf = BytesMut::new();
    write_model(&m, &mut buf);
    // header, 3 vertices of 16 bytes, one full segment record of the 3
    let cut = buf.freeze().slice(0..10 + 3 * 16 + 8);
    let read = read_model(&mut cut.clone()).unwrap();
    assert!(!read.is_complete());
    let n = read.into_model();
    assert_eq!(n.edge_count(), 1);
    assert_eq!(n.vertex_count(), 2);
    n.validate().unwrap();
}

#[test]
fn unknown_kind_tag_is_rejected() {
    let mut buf = BytesMut::new();
    buf.put_u8(0x7f);
    buf.put_u8(ENCODING_PLAIN);
    buf.put_u32(0);
    buf.put_u32(0);
    assert_eq!(
        read_model(&mut buf.freeze()).unwrap_err(),
        ModelError::UnknownModelKind(0x7f)
    );
}

#[test]
fn unknown_encoding_is_rejected() {
    let mut buf = BytesMut::new();
    buf.put_u8(ModelKind::Dbl2.tag());
    buf.put_u8(9);
    buf.put_u32(0);
    buf.put_u32(0);
    assert_eq!(read_model(&mut buf.freeze()).unwrap_err(), ModelError::UnknownEncoding(9));
}

#[test]
fn out_of_range_vertex_index_is_rejected() {
    let mut buf = BytesMut::new();
    buf.put_u8(ModelKind::Dbl2.tag());
    buf.put_u8(ENCODING_PLAIN);
    buf.put_u32(2);
    buf.put_u32(1);
    for c in [0.0f64, 0.0, 1.0, 0.0] {
        buf.put_f64(c);
    }
    buf.put_u32(0);
    buf.put_u32(5);
    assert_eq!(
        read_model(&mut buf.freeze()).unwrap_err(),
        ModelError::VertexIndexOutOfRange { index: 5, count: 2 }
    );
}
