//! The model: element pools, list maintenance and common queries.
//!
//! A [`Model`] owns one generational pool per element class, the head of
//! the shell list and the spatial vertex index. The simplex constructors
//! (`add_segment`, `add_triangle`), the deletion operators and compaction
//! live in sibling modules; this module provides the machinery they share:
//! allocation with observer events, circular-list append/unlink helpers,
//! loop re-parenting, shell joins and bounds maintenance, and the common
//! element queries.

use crate::geometry::bbox::ShellBounds;
use crate::geometry::position::{Dim, ModelKind, Position};
use crate::geometry::vec::DVec3;
use crate::model_error::ModelError;
use crate::observer::{ElemRef, ObserverId, ObserverSet, ResourceEvent};
use crate::topology::elements::{DiskUse, Edge, EdgeUse, Face, LoopUse, Shell, Vertex, VertexUse};
use crate::topology::handle::{
    DiskUseId, EdgeId, EdgeUseId, FaceId, LoopUseId, ShellId, VertexId, VertexUseId,
};
use crate::topology::pool::Pool;
use crate::topology::vertex_index::VertexIndex;

/// An incremental non-manifold boundary-representation model.
#[derive(Debug)]
pub struct Model {
    kind: ModelKind,
    pub(crate) vertices: Pool<Vertex, VertexId>,
    pub(crate) vertex_uses: Pool<VertexUse, VertexUseId>,
    pub(crate) disk_uses: Pool<DiskUse, DiskUseId>,
    pub(crate) edges: Pool<Edge, EdgeId>,
    pub(crate) edge_uses: Pool<EdgeUse, EdgeUseId>,
    pub(crate) faces: Pool<Face, FaceId>,
    pub(crate) loop_uses: Pool<LoopUse, LoopUseId>,
    pub(crate) shells: Pool<Shell, ShellId>,
    /// One shell of the circular shell list, `None` while the model is
    /// empty.
    pub(crate) child: Option<ShellId>,
    pub(crate) vindex: VertexIndex,
    pub(crate) observers: ObserverSet,
}

impl Model {
    /// Creates an empty model of the given kind.
    pub fn new(kind: ModelKind) -> Self {
        Self::with_vertex_index_size(kind, VertexIndex::DEFAULT_BUCKETS)
    }

    /// Creates an empty model with a sized vertex index, for callers that
    /// know the expected vertex count up front (the model stream reader
    /// does).
    pub fn with_vertex_index_size(kind: ModelKind, buckets: usize) -> Self {
        Self {
            kind,
            vertices: Pool::new(),
            vertex_uses: Pool::new(),
            disk_uses: Pool::new(),
            edges: Pool::new(),
            edge_uses: Pool::new(),
            faces: Pool::new(),
            loop_uses: Pool::new(),
            shells: Pool::new(),
            child: None,
            vindex: VertexIndex::new(buckets),
            observers: ObserverSet::default(),
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn dim(&self) -> Dim {
        self.kind.dim()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex_use_count(&self) -> usize {
        self.vertex_uses.len()
    }

    pub fn disk_use_count(&self) -> usize {
        self.disk_uses.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_use_count(&self) -> usize {
        self.edge_uses.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn loop_use_count(&self) -> usize {
        self.loop_uses.len()
    }

    pub fn shell_count(&self) -> usize {
        self.shells.len()
    }

    /// One shell of the model, `None` while the model is empty.
    pub fn first_shell(&self) -> Option<ShellId> {
        self.child
    }

    /// All live shells, starting from the first and following the ring.
    pub fn shell_ids(&self) -> Vec<ShellId> {
        let mut out = Vec::with_capacity(self.shells.len());
        if let Some(first) = self.child {
            let mut cur = first;
            loop {
                out.push(cur);
                cur = self.shells[cur].next;
                if cur == first {
                    break;
                }
            }
        }
        out
    }

    /// All live vertices, in slot order.
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.handles().collect()
    }

    /// All live edges, in slot order.
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.handles().collect()
    }

    /// All live faces, in slot order.
    pub fn face_ids(&self) -> Vec<FaceId> {
        self.faces.handles().collect()
    }

    /// The loop-use ring of a shell.
    pub fn shell_loop_uses(&self, shell: ShellId) -> Result<Vec<LoopUseId>, ModelError> {
        let first = self.shells.get(shell)?.child;
        Ok(self.loop_ring(first))
    }

    /// The edge-use ring of a loop-use, in `next` order.
    pub fn loop_edge_uses(&self, lu: LoopUseId) -> Result<Vec<EdgeUseId>, ModelError> {
        let first = self.loop_uses.get(lu)?.edge_use;
        Ok(self.edge_use_ring(first))
    }

    pub fn vertex_position(&self, v: VertexId) -> Result<Position, ModelError> {
        Ok(self.vertices.get(v)?.position)
    }

    pub fn shell_bounds(&self, shell: ShellId) -> Result<ShellBounds, ModelError> {
        Ok(self.shells.get(shell)?.bounds)
    }

    /// The two end vertices of an edge, start vertex of its first use
    /// first.
    pub fn edge_vertices(&self, e: EdgeId) -> Result<(VertexId, VertexId), ModelError> {
        let et = self.edges.get(e)?.edge_use;
        let opp = self.edge_uses.get(et)?.opp;
        Ok((self.edge_use_vertex(et), self.edge_use_vertex(opp)))
    }

    /// Registers a resource observer; it sees every element creation and
    /// free until removed.
    pub fn observe(
        &mut self,
        cb: impl FnMut(ElemRef, ResourceEvent) + 'static,
    ) -> ObserverId {
        self.observers.register(Box::new(cb))
    }

    /// Removes an observer; returns false when the token is unknown.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    // --- queries -------------------------------------------------------

    /// The edge joining two vertices, if one exists.
    pub fn common_edge(&self, v0: VertexId, v1: VertexId) -> Result<Option<EdgeId>, ModelError> {
        self.vertices.get(v0)?;
        self.vertices.get(v1)?;
        Ok(self.common_edge_impl(v0, v1))
    }

    /// The shell both vertices belong to, if it is the same one.
    pub fn common_shell(&self, v0: VertexId, v1: VertexId) -> Result<Option<ShellId>, ModelError> {
        let s0 = self.vertex_shell(v0)?;
        let s1 = self.vertex_shell(v1)?;
        Ok(if s0 == s1 { Some(s0) } else { None })
    }

    /// The loop-use two edge-uses lie on, if it is the same one.
    pub fn common_loop_use(
        &self,
        et0: EdgeUseId,
        et1: EdgeUseId,
    ) -> Result<Option<LoopUseId>, ModelError> {
        let p0 = self.edge_uses.get(et0)?.parent;
        let p1 = self.edge_uses.get(et1)?.parent;
        Ok(if p0 == p1 { Some(p0) } else { None })
    }

    /// The shell a vertex belongs to.
    pub fn vertex_shell(&self, v: VertexId) -> Result<ShellId, ModelError> {
        let v = self.vertices.get(v)?;
        let vu = self.disk_uses.get(v.disk_use)?.vertex_use;
        let et = self.vertex_uses.get(vu)?.parent;
        let lu = self.edge_uses.get(et)?.parent;
        Ok(self.loop_uses.get(lu)?.parent)
    }

    /// The shell an edge belongs to.
    pub fn edge_shell(&self, e: EdgeId) -> Result<ShellId, ModelError> {
        let et = self.edges.get(e)?.edge_use;
        let lu = self.edge_uses.get(et)?.parent;
        Ok(self.loop_uses.get(lu)?.parent)
    }

    /// The vertex shared by two edges, if any.
    pub fn edge_common_vertex(
        &self,
        e0: EdgeId,
        e1: EdgeId,
    ) -> Result<Option<VertexId>, ModelError> {
        let (a0, a1) = self.edge_vertices(e0)?;
        let (b0, b1) = self.edge_vertices(e1)?;
        Ok(if a0 == b0 || a0 == b1 {
            Some(a0)
        } else if a1 == b0 || a1 == b1 {
            Some(a1)
        } else {
            None
        })
    }

    /// Number of simplices (segments or triangles) in a shell.
    pub fn shell_simplex_count(&self, shell: ShellId) -> Result<usize, ModelError> {
        self.shells.get(shell)?;
        let lus = self.shell_loop_uses(shell)?;
        Ok(match self.kind.dim() {
            Dim::Two => {
                let mut uses = 0;
                for lu in &lus {
                    uses += self.loop_edge_uses(*lu)?.len();
                }
                uses / 2
            }
            Dim::Three => lus.len() / 2,
        })
    }

    /// The vertex within matching tolerance of `pos`, if the model has one.
    pub fn match_vertex(&self, pos: DVec3) -> Option<VertexId> {
        self.vindex.matching_vertex(self, pos)
    }

    // --- internal accessors -------------------------------------------

    /// Start vertex of an edge-use.
    pub(crate) fn edge_use_vertex(&self, et: EdgeUseId) -> VertexId {
        let vu = self.edge_uses[et].vertex_use;
        let du = self.vertex_uses[vu].disk_use;
        self.disk_uses[du].vertex
    }

    /// Canonical position of an edge-use's start vertex.
    pub(crate) fn edge_use_pos(&self, et: EdgeUseId) -> DVec3 {
        self.vertex_d3(self.edge_use_vertex(et))
    }

    pub(crate) fn vertex_d3(&self, v: VertexId) -> DVec3 {
        self.vertices[v].position.to_d3()
    }

    /// Collects the loop-use ring starting at `first`.
    pub(crate) fn loop_ring(&self, first: LoopUseId) -> Vec<LoopUseId> {
        let mut out = Vec::new();
        let mut cur = first;
        loop {
            out.push(cur);
            cur = self.loop_uses[cur].next;
            if cur == first {
                break;
            }
        }
        out
    }

    /// Collects the edge-use ring starting at `first`, in `next` order.
    pub(crate) fn edge_use_ring(&self, first: EdgeUseId) -> Vec<EdgeUseId> {
        let mut out = Vec::new();
        let mut cur = first;
        loop {
            out.push(cur);
            cur = self.edge_uses[cur].next;
            if cur == first {
                break;
            }
        }
        out
    }

    /// Collects the radial ring of an edge-use, starting with `rad` of
    /// `first` and ending with `first` itself.
    pub(crate) fn radial_ring(&self, first: EdgeUseId) -> Vec<EdgeUseId> {
        let mut out = Vec::new();
        let mut cur = first;
        loop {
            cur = self.edge_uses[cur].rad;
            out.push(cur);
            if cur == first {
                break;
            }
        }
        out
    }

    pub(crate) fn common_edge_impl(&self, v0: VertexId, v1: VertexId) -> Option<EdgeId> {
        let first0 = self.disk_uses[self.vertices[v0].disk_use].vertex_use;
        let first1 = self.disk_uses[self.vertices[v1].disk_use].vertex_use;
        let mut vu0 = first0;
        loop {
            let e0 = self.edge_uses[self.vertex_uses[vu0].parent].edge;
            let mut vu1 = first1;
            loop {
                if self.edge_uses[self.vertex_uses[vu1].parent].edge == e0 {
                    return Some(e0);
                }
                vu1 = self.vertex_uses[vu1].next;
                if vu1 == first1 {
                    break;
                }
            }
            vu0 = self.vertex_uses[vu0].next;
            if vu0 == first0 {
                break;
            }
        }
        None
    }

    pub(crate) fn vertex_shell_impl(&self, v: VertexId) -> ShellId {
        let vu = self.disk_uses[self.vertices[v].disk_use].vertex_use;
        let et = self.vertex_uses[vu].parent;
        self.loop_uses[self.edge_uses[et].parent].parent
    }

    // --- allocation and freeing ---------------------------------------

    fn notify(&mut self, elem: ElemRef, event: ResourceEvent) {
        if !self.observers.is_empty() {
            self.observers.notify(elem, event);
        }
    }

    pub(crate) fn new_vertex(&mut self, position: Position) -> VertexId {
        let v = self.vertices.insert(Vertex {
            position,
            disk_use: DiskUseId::DANGLING,
            hash_next: None,
        });
        self.notify(ElemRef::Vertex(v), ResourceEvent::New);
        v
    }

    pub(crate) fn new_vertex_use(&mut self) -> VertexUseId {
        let vu = self.vertex_uses.insert(VertexUse {
            next: VertexUseId::DANGLING,
            prev: VertexUseId::DANGLING,
            disk_use: DiskUseId::DANGLING,
            parent: EdgeUseId::DANGLING,
        });
        self.notify(ElemRef::VertexUse(vu), ResourceEvent::New);
        vu
    }

    pub(crate) fn new_disk_use(&mut self) -> DiskUseId {
        let du = self.disk_uses.insert(DiskUse {
            next: DiskUseId::DANGLING,
            prev: DiskUseId::DANGLING,
            vertex: VertexId::DANGLING,
            vertex_use: VertexUseId::DANGLING,
        });
        self.notify(ElemRef::DiskUse(du), ResourceEvent::New);
        du
    }

    pub(crate) fn new_edge(&mut self) -> EdgeId {
        let e = self.edges.insert(Edge { edge_use: EdgeUseId::DANGLING });
        self.notify(ElemRef::Edge(e), ResourceEvent::New);
        e
    }

    pub(crate) fn new_edge_use(&mut self) -> EdgeUseId {
        let et = self.edge_uses.insert(EdgeUse {
            next: EdgeUseId::DANGLING,
            prev: EdgeUseId::DANGLING,
            opp: EdgeUseId::DANGLING,
            rad: EdgeUseId::DANGLING,
            edge: EdgeId::DANGLING,
            vertex_use: VertexUseId::DANGLING,
            parent: LoopUseId::DANGLING,
        });
        self.notify(ElemRef::EdgeUse(et), ResourceEvent::New);
        et
    }

    pub(crate) fn new_face(&mut self) -> FaceId {
        let f = self.faces.insert(Face { loop_use: LoopUseId::DANGLING });
        self.notify(ElemRef::Face(f), ResourceEvent::New);
        f
    }

    pub(crate) fn new_loop_use(&mut self) -> LoopUseId {
        let lu = self.loop_uses.insert(LoopUse {
            next: LoopUseId::DANGLING,
            prev: LoopUseId::DANGLING,
            opp: LoopUseId::DANGLING,
            face: None,
            edge_use: EdgeUseId::DANGLING,
            parent: ShellId::DANGLING,
        });
        self.notify(ElemRef::LoopUse(lu), ResourceEvent::New);
        lu
    }

    pub(crate) fn new_shell(&mut self) -> ShellId {
        let bounds = ShellBounds::from_points(self.kind, &[]);
        let s = self.shells.insert(Shell {
            next: ShellId::DANGLING,
            prev: ShellId::DANGLING,
            child: LoopUseId::DANGLING,
            bounds,
        });
        self.notify(ElemRef::Shell(s), ResourceEvent::New);
        s
    }

    pub(crate) fn free_vertex(&mut self, v: VertexId) {
        self.notify(ElemRef::Vertex(v), ResourceEvent::Free);
        let _ = self.vertices.remove(v);
    }

    pub(crate) fn free_vertex_use(&mut self, vu: VertexUseId) {
        self.notify(ElemRef::VertexUse(vu), ResourceEvent::Free);
        let _ = self.vertex_uses.remove(vu);
    }

    pub(crate) fn free_disk_use(&mut self, du: DiskUseId) {
        self.notify(ElemRef::DiskUse(du), ResourceEvent::Free);
        let _ = self.disk_uses.remove(du);
    }

    pub(crate) fn free_edge(&mut self, e: EdgeId) {
        self.notify(ElemRef::Edge(e), ResourceEvent::Free);
        let _ = self.edges.remove(e);
    }

    pub(crate) fn free_edge_use(&mut self, et: EdgeUseId) {
        self.notify(ElemRef::EdgeUse(et), ResourceEvent::Free);
        let _ = self.edge_uses.remove(et);
    }

    pub(crate) fn free_face(&mut self, f: FaceId) {
        self.notify(ElemRef::Face(f), ResourceEvent::Free);
        let _ = self.faces.remove(f);
    }

    pub(crate) fn free_loop_use(&mut self, lu: LoopUseId) {
        self.notify(ElemRef::LoopUse(lu), ResourceEvent::Free);
        let _ = self.loop_uses.remove(lu);
    }

    pub(crate) fn free_shell(&mut self, s: ShellId) {
        self.notify(ElemRef::Shell(s), ResourceEvent::Free);
        let _ = self.shells.remove(s);
    }

    // --- circular list maintenance ------------------------------------

    /// Links `nvu` into a vertex-use ring after `evu`.
    pub(crate) fn vertex_use_append(&mut self, evu: VertexUseId, nvu: VertexUseId) {
        let next = self.vertex_uses[evu].next;
        self.vertex_uses[nvu].next = next;
        self.vertex_uses[nvu].prev = evu;
        self.vertex_uses[next].prev = nvu;
        self.vertex_uses[evu].next = nvu;
    }

    /// Links `ndu` into a disk-use ring after `edu`.
    pub(crate) fn disk_use_append(&mut self, edu: DiskUseId, ndu: DiskUseId) {
        let next = self.disk_uses[edu].next;
        self.disk_uses[ndu].next = next;
        self.disk_uses[ndu].prev = edu;
        self.disk_uses[next].prev = ndu;
        self.disk_uses[edu].next = ndu;
    }

    /// Links `nlu` into a loop-use ring after `elu`.
    pub(crate) fn loop_use_append(&mut self, elu: LoopUseId, nlu: LoopUseId) {
        let next = self.loop_uses[elu].next;
        self.loop_uses[nlu].next = next;
        self.loop_uses[nlu].prev = elu;
        self.loop_uses[next].prev = nlu;
        self.loop_uses[elu].next = nlu;
    }

    /// Links `ns` into the shell ring after `es`.
    pub(crate) fn shell_append(&mut self, es: ShellId, ns: ShellId) {
        let next = self.shells[es].next;
        self.shells[ns].next = next;
        self.shells[ns].prev = es;
        self.shells[next].prev = ns;
        self.shells[es].next = ns;
    }

    /// Unlinks a vertex-use from its ring and fixes its disk-use's head.
    pub(crate) fn vertex_use_unlink(&mut self, dvu: VertexUseId) {
        let VertexUse { next, prev, disk_use, .. } = self.vertex_uses[dvu];
        if next != dvu {
            self.vertex_uses[prev].next = next;
            self.vertex_uses[next].prev = prev;
        }
        if self.disk_uses.contains(disk_use) && self.disk_uses[disk_use].vertex_use == dvu {
            self.disk_uses[disk_use].vertex_use = next;
        }
    }

    /// Unlinks a disk-use from its ring and fixes its vertex's head.
    pub(crate) fn disk_use_unlink(&mut self, ddu: DiskUseId) {
        let DiskUse { next, prev, vertex, .. } = self.disk_uses[ddu];
        if next != ddu {
            self.disk_uses[prev].next = next;
            self.disk_uses[next].prev = prev;
        }
        if self.vertices.contains(vertex) && self.vertices[vertex].disk_use == ddu {
            self.vertices[vertex].disk_use = next;
        }
    }

    /// Splices an opposite pair of edge-uses out of its loop ring while
    /// both uses are still live. The ring either closes over the gap (the
    /// uses were neighbours) or falls into two pieces, one starting at each
    /// use's former successor. Loop-use heads resting on either use move to
    /// a surviving neighbour, preferring `et0`'s successor so the head
    /// stays on the piece the caller re-parents first.
    pub(crate) fn unlink_edge_use_pair(&mut self, et0: EdgeUseId, et1: EdgeUseId) {
        let p0 = self.edge_uses[et0].prev;
        let n0 = self.edge_uses[et0].next;
        let p1 = self.edge_uses[et1].prev;
        let n1 = self.edge_uses[et1].next;
        self.edge_uses[p0].next = n1;
        self.edge_uses[n1].prev = p0;
        self.edge_uses[p1].next = n0;
        self.edge_uses[n0].prev = p1;
        for det in [et0, et1] {
            let lu = self.edge_uses[det].parent;
            if !self.loop_uses.contains(lu) || self.loop_uses[lu].edge_use != det {
                continue;
            }
            for cand in [n0, p0, n1, p1] {
                if cand != et0 && cand != et1 {
                    self.loop_uses[lu].edge_use = cand;
                    break;
                }
            }
        }
    }

    /// Unlinks a loop-use from its ring and fixes its shell's head.
    pub(crate) fn loop_use_unlink(&mut self, dlu: LoopUseId) {
        let LoopUse { next, prev, parent, .. } = self.loop_uses[dlu];
        if next != dlu {
            self.loop_uses[prev].next = next;
            self.loop_uses[next].prev = prev;
        }
        if self.shells.contains(parent) && self.shells[parent].child == dlu {
            self.shells[parent].child = next;
        }
    }

    /// Unlinks a shell from the model's shell ring.
    pub(crate) fn shell_unlink(&mut self, ds: ShellId) {
        let Shell { next, prev, .. } = self.shells[ds];
        if self.child == Some(ds) {
            self.child = if next == ds { None } else { Some(next) };
        }
        if next != ds {
            self.shells[prev].next = next;
            self.shells[next].prev = prev;
        }
    }

    /// Moves every loop-use of `dshell` onto `eshell`, widens `eshell`'s
    /// bounds over `dshell`'s, splices the loop rings and unlinks the now
    /// childless shell. The caller frees it.
    pub(crate) fn shell_join_and_unlink(&mut self, eshell: ShellId, dshell: ShellId) {
        let dbounds = self.shells[dshell].bounds;
        self.shells[eshell].bounds.include_bounds(&dbounds);
        let elu = self.shells[eshell].child;
        let dlu = self.shells[dshell].child;
        for lu in self.loop_ring(dlu) {
            self.loop_uses[lu].parent = eshell;
        }
        let tlu = self.loop_uses[elu].prev;
        self.loop_uses[tlu].next = dlu;
        let dprev = self.loop_uses[dlu].prev;
        self.loop_uses[elu].prev = dprev;
        self.loop_uses[dlu].prev = tlu;
        self.loop_uses[dprev].next = elu;
        self.shell_unlink(dshell);
        log::debug!("joined shell {dshell:?} into {eshell:?}");
    }

    /// Re-parents every edge-use on `glu`'s loop to `glu`, and the loop of
    /// every opposite use to `glu`'s shell. Used after loops are split,
    /// joined or moved between shells.
    pub(crate) fn set_loop_uses(&mut self, glu: LoopUseId) {
        let gs = self.loop_uses[glu].parent;
        let first = self.loop_uses[glu].edge_use;
        let mut tet = first;
        loop {
            self.edge_uses[tet].parent = glu;
            let opp = self.edge_uses[tet].opp;
            let opp_lu = self.edge_uses[opp].parent;
            self.loop_uses[opp_lu].parent = gs;
            tet = self.edge_uses[tet].next;
            if tet == first {
                break;
            }
        }
    }

    /// The shell a split-off loop still touches through opposite edge-uses,
    /// if any. Loops connected to the rest of their shell only through
    /// shared vertices are not found.
    pub(crate) fn find_adjoining_shell(&self, glu: LoopUseId) -> Option<ShellId> {
        let first = self.loop_uses[glu].edge_use;
        let mut tet = first;
        loop {
            tet = self.edge_uses[tet].next;
            let opp_lu = self.edge_uses[self.edge_uses[tet].opp].parent;
            if opp_lu != glu {
                return Some(self.loop_uses[opp_lu].parent);
            }
            if tet == first {
                break;
            }
        }
        None
    }

    // --- shell geometry -----------------------------------------------

    /// Sets a shell's bounds to the tight box of `pts`.
    pub(crate) fn set_shell_bounds(&mut self, shell: ShellId, pts: &[DVec3]) {
        self.shells[shell].bounds = ShellBounds::from_points(self.kind, pts);
    }

    /// Widens a shell's bounds to cover `p`.
    pub(crate) fn widen_shell_bounds(&mut self, shell: ShellId, p: DVec3) {
        self.shells[shell].bounds.include_point(p);
    }

    /// Widens `eshell`'s bounds to cover `dshell`'s.
    pub(crate) fn merge_shell_bounds(&mut self, eshell: ShellId, dshell: ShellId) {
        let dbounds = self.shells[dshell].bounds;
        self.shells[eshell].bounds.include_bounds(&dbounds);
    }

    /// Recomputes a shell's bounds from its vertices. Needed after
    /// deletion, which never shrinks the grow-only boxes.
    pub(crate) fn compute_shell_bounds(&mut self, shell: ShellId) {
        let mut pts = Vec::new();
        for lu in self.loop_ring(self.shells[shell].child) {
            for et in self.edge_use_ring(self.loop_uses[lu].edge_use) {
                pts.push(self.edge_use_pos(et));
            }
        }
        self.shells[shell].bounds = ShellBounds::from_points(self.kind, &pts);
    }
}
