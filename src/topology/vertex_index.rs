//! Spatial vertex index.
//!
//! Vertex positions are hashed into buckets of singly-linked chains
//! (threaded through [`crate::topology::elements::Vertex::hash_next`]).
//! Each chain is kept sorted by the tolerance-aware lexicographic position
//! order, so a lookup walks a chain only as far as the first chain entry
//! not below the probe position. Positions within [`crate::geometry::TOLERANCE`]
//! of an indexed vertex hash to the same bucket because each coordinate is
//! quantized to the tolerance before hashing.

use std::cmp::Ordering;

use crate::geometry::position::Dim;
use crate::geometry::vec::DVec3;
use crate::geometry::{TOLERANCE, cmp_tol2, cmp_tol3};
use crate::topology::handle::VertexId;
use crate::topology::model::Model;

const PRIME_X: f64 = 399989.0;
const PRIME_Y: f64 = 599999.0;
const PRIME_Z: f64 = 999983.0;

/// Bucket table of the vertex index; chains live in the vertices.
#[derive(Clone, Debug)]
pub(crate) struct VertexIndex {
    buckets: Vec<Option<VertexId>>,
}

impl VertexIndex {
    pub(crate) const DEFAULT_BUCKETS: usize = 1024;

    pub(crate) fn new(buckets: usize) -> Self {
        Self { buckets: vec![None; buckets.max(1)] }
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket(&self, dim: Dim, pos: DVec3) -> usize {
        hash_pos(dim, pos) as usize % self.buckets.len()
    }

    /// The indexed vertex within tolerance of `pos`, if any.
    pub(crate) fn matching_vertex(&self, model: &Model, pos: DVec3) -> Option<VertexId> {
        let dim = model.dim();
        let mut cur = self.buckets[self.bucket(dim, pos)];
        while let Some(v) = cur {
            match cmp_pos(dim, model.vertex_d3(v), pos) {
                Ordering::Less => cur = model.vertices[v].hash_next,
                Ordering::Equal => return Some(v),
                Ordering::Greater => return None,
            }
        }
        None
    }
}

impl Model {
    /// Links a vertex into its sorted hash chain.
    pub(crate) fn index_vertex(&mut self, nv: VertexId) {
        let dim = self.dim();
        let pos = self.vertex_d3(nv);
        let b = self.vindex.bucket(dim, pos);
        let mut prev: Option<VertexId> = None;
        let mut cur = self.vindex.buckets[b];
        while let Some(tv) = cur {
            if cmp_pos(dim, self.vertex_d3(tv), pos) != Ordering::Less {
                break;
            }
            prev = Some(tv);
            cur = self.vertices[tv].hash_next;
        }
        self.vertices[nv].hash_next = cur;
        match prev {
            Some(pv) => self.vertices[pv].hash_next = Some(nv),
            None => self.vindex.buckets[b] = Some(nv),
        }
    }

    /// Unlinks a vertex from its hash chain.
    pub(crate) fn unindex_vertex(&mut self, dv: VertexId) {
        let dim = self.dim();
        let pos = self.vertex_d3(dv);
        let b = self.vindex.bucket(dim, pos);
        let mut prev: Option<VertexId> = None;
        let mut cur = self.vindex.buckets[b];
        while let Some(tv) = cur {
            if tv == dv {
                let next = self.vertices[dv].hash_next;
                match prev {
                    Some(pv) => self.vertices[pv].hash_next = next,
                    None => self.vindex.buckets[b] = next,
                }
                self.vertices[dv].hash_next = None;
                return;
            }
            prev = Some(tv);
            cur = self.vertices[tv].hash_next;
        }
    }

    /// Rebuilds the vertex index from scratch. Needed after any operation
    /// that changes vertex positions wholesale; compaction uses it.
    pub fn rehash(&mut self) {
        let n = self.vindex.bucket_count();
        self.vindex = VertexIndex::new(n);
        let ids: Vec<VertexId> = self.vertices.handles().collect();
        for v in &ids {
            self.vertices[*v].hash_next = None;
        }
        for v in ids {
            self.index_vertex(v);
        }
    }
}

fn cmp_pos(dim: Dim, a: DVec3, b: DVec3) -> Ordering {
    match dim {
        Dim::Two => cmp_tol2(a.xy(), b.xy()),
        Dim::Three => cmp_tol3(a, b),
    }
}

/// One coordinate's contribution: the integral part scaled by the axis
/// prime plus the tolerance-quantized fraction scaled by the product of
/// the other axis primes, truncated to 32 bits.
fn hash_coord(v: f64, own: f64, others: f64) -> u32 {
    let fi = v.trunc();
    let ff = (v.fract() / TOLERANCE).floor() * TOLERANCE;
    ((fi * own) as i64).wrapping_add((ff * others) as i64) as u32
}

fn hash_pos(dim: Dim, p: DVec3) -> u32 {
    let hx = hash_coord(p.x, PRIME_X, PRIME_Y * PRIME_Z);
    let hy = hash_coord(p.y, PRIME_Y, PRIME_X * PRIME_Z);
    match dim {
        Dim::Two => hx ^ hy,
        Dim::Three => hx ^ hy ^ hash_coord(p.z, PRIME_Z, PRIME_X * PRIME_Y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_positions_share_a_hash() {
        let p = DVec3::new(1.0, -3.0, 7.0);
        let q = DVec3::new(1.0 + 0.1 * TOLERANCE, -3.0, 7.0);
        assert_eq!(hash_pos(Dim::Three, p), hash_pos(Dim::Three, q));
    }

    #[test]
    fn distinct_positions_usually_differ() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        let q = DVec3::new(1.0, 2.0, 4.0);
        assert_ne!(hash_pos(Dim::Three, p), hash_pos(Dim::Three, q));
    }
}
