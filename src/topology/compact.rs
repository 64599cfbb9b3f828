//! Model compaction.
//!
//! Construction and deletion leave vacant slots behind and retire
//! generations; a long-lived model accumulates both. Compaction rebuilds
//! every pool densely, renumbering the elements in slot order with all
//! generations restarted at one, and rebuilds the vertex index over the
//! new handles.

use crate::topology::elements::{DiskUse, Edge, EdgeUse, Face, LoopUse, Shell, Vertex, VertexUse};
use crate::topology::handle::{
    DiskUseId, EdgeId, EdgeUseId, FaceId, Handle, LoopUseId, ShellId, VertexId, VertexUseId,
};
use crate::topology::model::Model;
use crate::topology::pool::Pool;

/// Old-slot to new-handle tables for every pool, built up front so the
/// links can be rewritten in a single pass over the elements.
struct ResourceIndex {
    vertices: Vec<Option<VertexId>>,
    vertex_uses: Vec<Option<VertexUseId>>,
    disk_uses: Vec<Option<DiskUseId>>,
    edges: Vec<Option<EdgeId>>,
    edge_uses: Vec<Option<EdgeUseId>>,
    faces: Vec<Option<FaceId>>,
    loop_uses: Vec<Option<LoopUseId>>,
    shells: Vec<Option<ShellId>>,
}

impl ResourceIndex {
    fn new(model: &Model) -> Self {
        Self {
            vertices: build_lut(&model.vertices),
            vertex_uses: build_lut(&model.vertex_uses),
            disk_uses: build_lut(&model.disk_uses),
            edges: build_lut(&model.edges),
            edge_uses: build_lut(&model.edge_uses),
            faces: build_lut(&model.faces),
            loop_uses: build_lut(&model.loop_uses),
            shells: build_lut(&model.shells),
        }
    }
}

fn build_lut<T, H: Handle>(pool: &Pool<T, H>) -> Vec<Option<H>> {
    let mut lut = vec![None; pool.slot_count()];
    for (k, (h, _)) in pool.iter().enumerate() {
        lut[h.slot() as usize] = Some(H::compose(k as u32, 1));
    }
    lut
}

/// Every link of a completed model names a live element, so a miss here is
/// a kernel bug, like indexing a pool with a stale handle.
fn remap<H: Handle>(lut: &[Option<H>], h: H) -> H {
    match lut.get(h.slot() as usize).copied().flatten() {
        Some(n) => n,
        None => panic!("compaction of dangling link {h:?}"),
    }
}

impl Model {
    /// Returns a compacted copy of the model: identical topology and
    /// geometry, with handles renumbered densely in slot order and all
    /// generations back at one. Observers are not carried over, and
    /// handles into the original do not name elements of the copy.
    pub fn compacted_copy(&self) -> Model {
        let idx = ResourceIndex::new(self);
        let mut out = Model::with_vertex_index_size(self.kind(), self.vindex.bucket_count());
        for (_, v) in self.vertices.iter() {
            out.vertices.insert(Vertex {
                position: v.position,
                disk_use: remap(&idx.disk_uses, v.disk_use),
                hash_next: None,
            });
        }
        for (_, vu) in self.vertex_uses.iter() {
            out.vertex_uses.insert(VertexUse {
                next: remap(&idx.vertex_uses, vu.next),
                prev: remap(&idx.vertex_uses, vu.prev),
                disk_use: remap(&idx.disk_uses, vu.disk_use),
                parent: remap(&idx.edge_uses, vu.parent),
            });
        }
        for (_, du) in self.disk_uses.iter() {
            out.disk_uses.insert(DiskUse {
                next: remap(&idx.disk_uses, du.next),
                prev: remap(&idx.disk_uses, du.prev),
                vertex: remap(&idx.vertices, du.vertex),
                vertex_use: remap(&idx.vertex_uses, du.vertex_use),
            });
        }
        for (_, e) in self.edges.iter() {
            out.edges.insert(Edge { edge_use: remap(&idx.edge_uses, e.edge_use) });
        }
        for (_, et) in self.edge_uses.iter() {
            out.edge_uses.insert(EdgeUse {
                next: remap(&idx.edge_uses, et.next),
                prev: remap(&idx.edge_uses, et.prev),
                opp: remap(&idx.edge_uses, et.opp),
                rad: remap(&idx.edge_uses, et.rad),
                edge: remap(&idx.edges, et.edge),
                vertex_use: remap(&idx.vertex_uses, et.vertex_use),
                parent: remap(&idx.loop_uses, et.parent),
            });
        }
        for (_, f) in self.faces.iter() {
            out.faces.insert(Face { loop_use: remap(&idx.loop_uses, f.loop_use) });
        }
        for (_, lu) in self.loop_uses.iter() {
            out.loop_uses.insert(LoopUse {
                next: remap(&idx.loop_uses, lu.next),
                prev: remap(&idx.loop_uses, lu.prev),
                opp: remap(&idx.loop_uses, lu.opp),
                face: lu.face.map(|f| remap(&idx.faces, f)),
                edge_use: remap(&idx.edge_uses, lu.edge_use),
                parent: remap(&idx.shells, lu.parent),
            });
        }
        for (_, s) in self.shells.iter() {
            out.shells.insert(Shell {
                next: remap(&idx.shells, s.next),
                prev: remap(&idx.shells, s.prev),
                child: remap(&idx.loop_uses, s.child),
                bounds: s.bounds,
            });
        }
        out.child = self.child.map(|s| remap(&idx.shells, s));
        out.rehash();
        out
    }
}
