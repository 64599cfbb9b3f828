//! Model streams.
//!
//! A model is serialized as its simplices and replayed through the
//! constructors on read, so the stream carries geometry only and the
//! topology is rebuilt by welding. All scalars are big-endian:
//!
//! * header: model kind tag (one byte), encoding tag (one byte), vertex
//!   count and simplex count (`u32` each);
//! * vertex table, in slot order: two or three coordinates per vertex,
//!   `i32` for integral kinds and `f64` otherwise;
//! * one record per simplex: two (segment) or three (triangle) `u32`
//!   indices into the vertex table.
//!
//! A stream cut short inside the vertex table is an error; one cut short
//! in the simplex records yields the model built so far, reported as
//! incomplete, so partial transfers stay usable.

use bytes::{Buf, BufMut};
use hashbrown::HashMap;

use crate::geometry::position::{Dim, ModelKind, Position};
use crate::geometry::vec::DVec3;
use crate::model_error::ModelError;
use crate::topology::model::Model;
use crate::topology::vertex_index::VertexIndex;

/// The only encoding so far: uncompressed big-endian records.
pub const ENCODING_PLAIN: u8 = 0;

/// Outcome of [`read_model`].
#[derive(Debug)]
pub enum ReadModel {
    /// Every simplex record was present.
    Complete(Model),
    /// The stream ended inside the simplex records; the model holds the
    /// simplices read up to that point.
    Incomplete(Model),
}

impl ReadModel {
    pub fn is_complete(&self) -> bool {
        matches!(self, ReadModel::Complete(_))
    }

    pub fn into_model(self) -> Model {
        match self {
            ReadModel::Complete(m) | ReadModel::Incomplete(m) => m,
        }
    }
}

/// Writes `model` to `buf` as a plain-encoded stream.
pub fn write_model<B: BufMut>(model: &Model, buf: &mut B) {
    let kind = model.kind();
    buf.put_u8(kind.tag());
    buf.put_u8(ENCODING_PLAIN);
    buf.put_u32(model.vertex_count() as u32);
    let ns = match kind.dim() {
        Dim::Two => model.edge_count(),
        Dim::Three => model.face_count(),
    };
    buf.put_u32(ns as u32);
    let mut index = HashMap::with_capacity(model.vertex_count());
    for (i, (h, v)) in model.vertices.iter().enumerate() {
        index.insert(h, i as u32);
        match v.position {
            Position::Int2(p) => {
                buf.put_i32(p.x);
                buf.put_i32(p.y);
            }
            Position::Dbl2(p) => {
                buf.put_f64(p.x);
                buf.put_f64(p.y);
            }
            Position::Int3(p) => {
                buf.put_i32(p.x);
                buf.put_i32(p.y);
                buf.put_i32(p.z);
            }
            Position::Dbl3(p) => {
                buf.put_f64(p.x);
                buf.put_f64(p.y);
                buf.put_f64(p.z);
            }
        }
    }
    match kind.dim() {
        Dim::Two => {
            for (_, e) in model.edges.iter() {
                let et = e.edge_use;
                let opp = model.edge_uses[et].opp;
                buf.put_u32(index[&model.edge_use_vertex(et)]);
                buf.put_u32(index[&model.edge_use_vertex(opp)]);
            }
        }
        Dim::Three => {
            for (_, f) in model.faces.iter() {
                let first = model.loop_uses[f.loop_use].edge_use;
                for et in model.edge_use_ring(first) {
                    buf.put_u32(index[&model.edge_use_vertex(et)]);
                }
            }
        }
    }
}

/// Reads a plain-encoded stream, rebuilding the model by replaying its
/// simplices through the constructors.
pub fn read_model<B: Buf>(buf: &mut B) -> Result<ReadModel, ModelError> {
    if buf.remaining() < 10 {
        return Err(ModelError::Truncated);
    }
    let tag = buf.get_u8();
    let kind = ModelKind::from_tag(tag).ok_or(ModelError::UnknownModelKind(tag))?;
    let enc = buf.get_u8();
    if enc != ENCODING_PLAIN {
        return Err(ModelError::UnknownEncoding(enc));
    }
    let nv = buf.get_u32() as usize;
    let ns = buf.get_u32() as usize;
    let mut model =
        Model::with_vertex_index_size(kind, nv.max(VertexIndex::DEFAULT_BUCKETS));
    let coords = match kind.dim() {
        Dim::Two => 2,
        Dim::Three => 3,
    };
    let coord_bytes = if kind.is_integral() { 4 } else { 8 };
    let mut pts = Vec::with_capacity(nv);
    for _ in 0..nv {
        if buf.remaining() < coords * coord_bytes {
            return Err(ModelError::Truncated);
        }
        let mut c = [0.0f64; 3];
        for c in c.iter_mut().take(coords) {
            *c = if kind.is_integral() { buf.get_i32() as f64 } else { buf.get_f64() };
        }
        pts.push(DVec3::new(c[0], c[1], c[2]));
    }
    for _ in 0..ns {
        // a simplex has as many corners as the model has coordinates
        if buf.remaining() < coords * 4 {
            log::warn!("model stream ends inside the simplex records");
            return Ok(ReadModel::Incomplete(model));
        }
        let mut idx = [0usize; 3];
        for idx in idx.iter_mut().take(coords) {
            let i = buf.get_u32();
            if i as usize >= nv {
                return Err(ModelError::VertexIndexOutOfRange { index: i, count: nv as u32 });
            }
            *idx = i as usize;
        }
        match kind.dim() {
            Dim::Two => model.add_segment(pts[idx[0]].xy(), pts[idx[1]].xy())?,
            Dim::Three => model.add_triangle(pts[idx[0]], pts[idx[1]], pts[idx[2]])?,
        }
    }
    Ok(ReadModel::Complete(model))
}
