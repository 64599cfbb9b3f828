//! The topological element records.
//!
//! A model is a hierarchy of use records over shared geometry-bearing
//! elements:
//!
//! * a [`Shell`] heads a circular list of [`LoopUse`]s;
//! * a loop-use heads a circular list of [`EdgeUse`]s (half-edges) and, in
//!   spatial models, pairs with an opposite loop-use under one [`Face`];
//! * an edge-use names its [`Edge`], its radially next use around that edge,
//!   and its start [`VertexUse`];
//! * vertex-uses at one vertex that share a local surface sheet form a
//!   circular list under a [`DiskUse`]; the disk-uses of one vertex form a
//!   circular list under the [`Vertex`], which is where non-manifold
//!   branching lives.
//!
//! All `next`/`prev` lists are circular: a sole element links to itself.
//! Planar models have no faces; their loop-uses are their own `opp`.

use crate::geometry::bbox::ShellBounds;
use crate::geometry::position::Position;
use crate::topology::handle::{
    DiskUseId, EdgeId, EdgeUseId, FaceId, LoopUseId, ShellId, VertexId, VertexUseId,
};

/// A geometric vertex: one position, shared by all its uses.
#[derive(Copy, Clone, Debug)]
pub struct Vertex {
    pub position: Position,
    /// Head of the circular disk-use list.
    pub disk_use: DiskUseId,
    /// Next vertex in the same spatial hash chain.
    pub hash_next: Option<VertexId>,
}

/// One use of a vertex by an edge-use.
#[derive(Copy, Clone, Debug)]
pub struct VertexUse {
    pub next: VertexUseId,
    pub prev: VertexUseId,
    pub disk_use: DiskUseId,
    /// The edge-use that starts at this vertex-use.
    pub parent: EdgeUseId,
}

/// Groups the vertex-uses of one vertex that lie on one local surface
/// sheet. A vertex with more than one disk-use is a non-manifold vertex.
#[derive(Copy, Clone, Debug)]
pub struct DiskUse {
    pub next: DiskUseId,
    pub prev: DiskUseId,
    pub vertex: VertexId,
    /// Head of the circular vertex-use list.
    pub vertex_use: VertexUseId,
}

/// An undirected edge between two vertices.
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    /// One of the edge's uses; the rest are reached through `opp`/`rad`.
    pub edge_use: EdgeUseId,
}

/// A half-edge: one directed use of an edge within a loop-use.
#[derive(Copy, Clone, Debug)]
pub struct EdgeUse {
    /// Next edge-use around the loop.
    pub next: EdgeUseId,
    /// Previous edge-use around the loop.
    pub prev: EdgeUseId,
    /// The oppositely directed use in the same loop pair.
    pub opp: EdgeUseId,
    /// Next use radially around the edge; self when the edge is manifold
    /// here.
    pub rad: EdgeUseId,
    pub edge: EdgeId,
    /// Vertex-use at the start of this half-edge.
    pub vertex_use: VertexUseId,
    pub parent: LoopUseId,
}

/// A face of a spatial model, bounded by a pair of opposite loop-uses.
#[derive(Copy, Clone, Debug)]
pub struct Face {
    /// One of the face's two loop-uses.
    pub loop_use: LoopUseId,
}

/// One use of a loop within a shell.
#[derive(Copy, Clone, Debug)]
pub struct LoopUse {
    pub next: LoopUseId,
    pub prev: LoopUseId,
    /// The oppositely oriented loop-use of the same face; self in planar
    /// models.
    pub opp: LoopUseId,
    /// `None` in planar models.
    pub face: Option<FaceId>,
    /// One edge-use on the loop.
    pub edge_use: EdgeUseId,
    pub parent: ShellId,
}

/// A connected component of the model.
#[derive(Copy, Clone, Debug)]
pub struct Shell {
    /// Next shell in the model's circular shell list.
    pub next: ShellId,
    pub prev: ShellId,
    /// Head of the circular loop-use list.
    pub child: LoopUseId,
    /// Grow-only bounding box in storage precision.
    pub bounds: ShellBounds,
}
