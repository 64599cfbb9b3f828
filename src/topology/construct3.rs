//! Spatial simplex construction.
//!
//! A spatial model is built one triangle at a time. Each corner is matched
//! against the vertex index and the corners are then cyclically rotated so
//! the matched ones come first; the operator is picked from the number of
//! matched vertices, the number of edges already joining them and the
//! number of distinct shells they lie on:
//!
//! * no corner known: a new shell with one face;
//! * one corner known: extend that vertex's shell;
//! * two or three corners known: extend a shell, or join two or three
//!   shells, reusing whatever edges already connect the matched vertices.
//!
//! Every face is entered as a pair of oppositely wound loop-uses; a use of
//! an edge that already has uses is spliced into the edge's radial cycle.
//! A triangle whose three edges are all present is either a duplicate of
//! an existing face (ignored) or closes a configuration the incremental
//! builder cannot express, which is reported as an error.

use crate::geometry::position::{Dim, Position};
use crate::geometry::vec::DVec3;
use crate::model_error::ModelError;
use crate::topology::handle::{DiskUseId, EdgeId, EdgeUseId, FaceId, LoopUseId, ShellId, VertexId, VertexUseId};
use crate::topology::model::Model;

/// Number of set bits in a 3-bit corner mask.
const BIT_COUNT: [usize; 8] = [0, 1, 1, 2, 1, 2, 2, 3];

/// Cyclic rotation per corner mask that brings the set corners to the
/// front while preserving the triangle's winding.
const MATCH_VTX_IDX: [[usize; 3]; 8] = [
    [0, 1, 2],
    [0, 1, 2],
    [1, 2, 0],
    [0, 1, 2],
    [2, 0, 1],
    [2, 0, 1],
    [1, 2, 0],
    [0, 1, 2],
];

/// First bit of the contiguous run of set bits in a 3-bit cyclic mask.
const FIRST_CTG_BIT: [usize; 8] = [0, 0, 1, 0, 2, 2, 1, 0];

/// The face, loop-use pair and use records of one new triangle. The
/// edge-use and vertex-use arrays are indexed by corner; `net0` winds the
/// triangle one way, `net1` the other.
struct TriFrame {
    nf: FaceId,
    nlt: [LoopUseId; 2],
    net0: [EdgeUseId; 3],
    net1: [EdgeUseId; 3],
    nvt0: [VertexUseId; 3],
    nvt1: [VertexUseId; 3],
}

impl Model {
    /// Adds one triangle to a spatial model. Corners within matching
    /// tolerance of existing vertices are welded to them.
    pub fn add_triangle(&mut self, p0: DVec3, p1: DVec3, p2: DVec3) -> Result<(), ModelError> {
        if self.dim() != Dim::Three {
            return Err(ModelError::WrongDimension { expected: Dim::Three, found: self.dim() });
        }
        let tpv = [p0, p1, p2];
        let tmv = [
            self.match_vertex(tpv[0]),
            self.match_vertex(tpv[1]),
            self.match_vertex(tpv[2]),
        ];
        let mask = tmv[0].is_some() as usize
            | (tmv[1].is_some() as usize) << 1
            | (tmv[2].is_some() as usize) << 2;
        let perm = MATCH_VTX_IDX[mask];
        let pos = [tpv[perm[0]], tpv[perm[1]], tpv[perm[2]]];
        match [tmv[perm[0]], tmv[perm[1]], tmv[perm[2]]] {
            [None, None, None] => self.new_shell_3d(pos),
            [Some(v0), None, None] => self.extend_shell_1v(v0, pos[1], pos[2]),
            [Some(v0), Some(v1), None] => self.add_triangle_2v(v0, v1, pos[2]),
            [Some(v0), Some(v1), Some(v2)] => return self.add_triangle_3v([v0, v1, v2]),
            // the rotation packs matched corners to the front
            _ => {}
        }
        Ok(())
    }

    /// Two corners matched: the operator depends on whether the vertices
    /// share a shell and whether an edge already joins them.
    fn add_triangle_2v(&mut self, v0: VertexId, v1: VertexId, pos2: DVec3) {
        if self.vertex_shell_impl(v0) == self.vertex_shell_impl(v1) {
            match self.common_edge_impl(v0, v1) {
                Some(e) => self.extend_shell_2v1e(e, pos2),
                None => self.extend_shell_2v0e(v0, v1, pos2),
            }
        } else {
            self.join_shells_2v(v0, v1, pos2);
        }
    }

    /// All three corners matched: the operator depends on which edges of
    /// the triangle are already present and on how many distinct shells
    /// the vertices lie on.
    fn add_triangle_3v(&mut self, ev: [VertexId; 3]) -> Result<(), ModelError> {
        let ce = [
            self.common_edge_impl(ev[0], ev[1]),
            self.common_edge_impl(ev[1], ev[2]),
            self.common_edge_impl(ev[2], ev[0]),
        ];
        let sh = [
            self.vertex_shell_impl(ev[0]),
            self.vertex_shell_impl(ev[1]),
            self.vertex_shell_impl(ev[2]),
        ];
        let shell_cnt = if sh[0] == sh[1] {
            if sh[1] == sh[2] { 1 } else { 2 }
        } else if sh[1] == sh[2] || sh[2] == sh[0] {
            2
        } else {
            3
        };
        let emask = ce[0].is_some() as usize
            | (ce[1].is_some() as usize) << 1
            | (ce[2].is_some() as usize) << 2;
        match (BIT_COUNT[emask], shell_cnt) {
            (0, 1) => self.extend_shell_3v0e(ev),
            (0, 2) => self.join_shells_3v0e2s(ev),
            (0, _) => self.join_shells_3v0e3s(ev),
            (1, cnt) => {
                let idx0 = FIRST_CTG_BIT[emask];
                let idx1 = (idx0 + 2) % 3;
                if let Some(e) = ce[idx0] {
                    if cnt == 1 {
                        self.extend_shell_3v1e(e, ev[idx1]);
                    } else {
                        self.join_shells_3v1e(e, ev[idx1]);
                    }
                }
            }
            (2, _) => {
                let idx0 = FIRST_CTG_BIT[emask];
                let idx1 = (idx0 + 1) % 3;
                if let (Some(e0), Some(e1)) = (ce[idx0], ce[idx1]) {
                    self.extend_shell_3v2e(e0, e1);
                }
            }
            _ => {
                if let (Some(e0), Some(e1), Some(e2)) = (ce[0], ce[1], ce[2]) {
                    if self.triangle_face_exists(e0, e1, e2) {
                        log::trace!("triangle over {ev:?} already present");
                    } else {
                        return Err(ModelError::UnsupportedTriangle);
                    }
                }
            }
        }
        Ok(())
    }

    /// True when some face already uses all three edges.
    fn triangle_face_exists(&self, e0: EdgeId, e1: EdgeId, e2: EdgeId) -> bool {
        let head = self.edges[e0].edge_use;
        for et in self.radial_ring(head) {
            for cand in [et, self.edge_uses[et].opp] {
                let mut has1 = false;
                let mut has2 = false;
                for t in self.edge_use_ring(cand) {
                    let e = self.edge_uses[t].edge;
                    has1 |= e == e1;
                    has2 |= e == e2;
                }
                if has1 && has2 {
                    return true;
                }
            }
        }
        false
    }

    // --- frame helpers -------------------------------------------------

    fn new_tri_frame(&mut self) -> TriFrame {
        let nf = self.new_face();
        let nlt = [self.new_loop_use(), self.new_loop_use()];
        let net0 = [self.new_edge_use(), self.new_edge_use(), self.new_edge_use()];
        let net1 = [self.new_edge_use(), self.new_edge_use(), self.new_edge_use()];
        let nvt0 = [self.new_vertex_use(), self.new_vertex_use(), self.new_vertex_use()];
        let nvt1 = [self.new_vertex_use(), self.new_vertex_use(), self.new_vertex_use()];
        TriFrame { nf, nlt, net0, net1, nvt0, nvt1 }
    }

    /// Wires the frame's edge-uses into the two opposed loops and points
    /// each vertex-use at its edge-use. Edge fields are assigned
    /// separately because the uses at shared edges refer to existing
    /// edges.
    fn wire_tri_edge_uses(&mut self, fr: &TriFrame) {
        for idx in 0..3 {
            let nidx = (idx + 1) % 3;
            let pidx = (idx + 2) % 3;
            {
                let et = &mut self.edge_uses[fr.net0[idx]];
                et.next = fr.net0[nidx];
                et.prev = fr.net0[pidx];
                et.opp = fr.net1[nidx];
                et.rad = fr.net0[idx];
                et.vertex_use = fr.nvt0[idx];
                et.parent = fr.nlt[0];
            }
            {
                // reverse winding, so next and prev swap roles
                let et = &mut self.edge_uses[fr.net1[idx]];
                et.next = fr.net1[pidx];
                et.prev = fr.net1[nidx];
                et.opp = fr.net0[pidx];
                et.rad = fr.net1[idx];
                et.vertex_use = fr.nvt1[idx];
                et.parent = fr.nlt[1];
            }
            self.vertex_uses[fr.nvt0[idx]].parent = fr.net0[idx];
            self.vertex_uses[fr.nvt1[idx]].parent = fr.net1[idx];
        }
    }

    /// Assigns the edge of every edge-use from the triangle's edge triple
    /// in loop order.
    fn assign_tri_edges(&mut self, fr: &TriFrame, e: [EdgeId; 3]) {
        for idx in 0..3 {
            let pidx = (idx + 2) % 3;
            self.edge_uses[fr.net0[idx]].edge = e[idx];
            self.edge_uses[fr.net1[idx]].edge = e[pidx];
        }
    }

    fn finish_tri_loops(&mut self, fr: &TriFrame, shell: ShellId) {
        self.faces[fr.nf].loop_use = fr.nlt[0];
        {
            let lu = &mut self.loop_uses[fr.nlt[0]];
            lu.opp = fr.nlt[1];
            lu.face = Some(fr.nf);
            lu.edge_use = fr.net0[0];
            lu.parent = shell;
        }
        {
            let lu = &mut self.loop_uses[fr.nlt[1]];
            lu.opp = fr.nlt[0];
            lu.face = Some(fr.nf);
            lu.edge_use = fr.net1[0];
            lu.parent = shell;
        }
    }

    /// Appends the loop pair into an existing shell's loop ring.
    fn attach_tri_loops(&mut self, fr: &TriFrame, eshell: ShellId) {
        let head = self.shells[eshell].child;
        self.loop_use_append(head, fr.nlt[0]);
        self.loop_use_append(head, fr.nlt[1]);
        self.finish_tri_loops(fr, eshell);
    }

    /// Makes the loop pair the sole ring of a brand new shell.
    fn attach_tri_loops_new_shell(&mut self, fr: &TriFrame, nshell: ShellId) {
        self.loop_uses[fr.nlt[0]].next = fr.nlt[1];
        self.loop_uses[fr.nlt[0]].prev = fr.nlt[1];
        self.loop_uses[fr.nlt[1]].next = fr.nlt[0];
        self.loop_uses[fr.nlt[1]].prev = fr.nlt[0];
        self.shells[nshell].child = fr.nlt[0];
        self.finish_tri_loops(fr, nshell);
    }

    /// Links the corner's two vertex-uses into a ring of their own under
    /// `ndt`.
    fn pair_vertex_uses(&mut self, a: VertexUseId, b: VertexUseId, ndt: DiskUseId) {
        self.vertex_uses[a].next = b;
        self.vertex_uses[a].prev = b;
        self.vertex_uses[b].next = a;
        self.vertex_uses[b].prev = a;
        self.vertex_uses[a].disk_use = ndt;
        self.vertex_uses[b].disk_use = ndt;
    }

    /// Links the corner's two vertex-uses into the ring of an existing
    /// vertex-use, on its disk.
    fn append_vertex_use_pair(&mut self, evt: VertexUseId, a: VertexUseId, b: VertexUseId) {
        let edt = self.vertex_uses[evt].disk_use;
        self.vertex_use_append(evt, a);
        self.vertex_use_append(evt, b);
        self.vertex_uses[a].disk_use = edt;
        self.vertex_uses[b].disk_use = edt;
    }

    /// Fills a fresh disk-use as the sole disk of `nv`, holding `nvt`.
    fn init_sole_disk(&mut self, ndt: DiskUseId, nv: VertexId, nvt: VertexUseId) {
        let du = &mut self.disk_uses[ndt];
        du.next = ndt;
        du.prev = ndt;
        du.vertex = nv;
        du.vertex_use = nvt;
    }

    /// Appends a fresh disk-use into an existing vertex's disk ring: the
    /// vertex gains a second surface sheet and becomes non-manifold.
    fn append_disk(&mut self, ndt: DiskUseId, ev: VertexId, nvt: VertexUseId) {
        let edu = self.vertices[ev].disk_use;
        self.disk_use_append(edu, ndt);
        self.disk_uses[ndt].vertex = ev;
        self.disk_uses[ndt].vertex_use = nvt;
    }

    // --- operators -----------------------------------------------------

    /// No corner matched: a new one-face shell with all elements fresh.
    fn new_shell_3d(&mut self, pos: [DVec3; 3]) {
        let nshell = self.new_shell();
        let fr = self.new_tri_frame();
        let ne = [self.new_edge(), self.new_edge(), self.new_edge()];
        let ndt = [self.new_disk_use(), self.new_disk_use(), self.new_disk_use()];
        let kind = self.kind();
        let nv = [
            self.new_vertex(Position::for_kind(kind, pos[0])),
            self.new_vertex(Position::for_kind(kind, pos[1])),
            self.new_vertex(Position::for_kind(kind, pos[2])),
        ];
        for idx in 0..3 {
            self.vertices[nv[idx]].disk_use = ndt[idx];
            self.index_vertex(nv[idx]);
            self.pair_vertex_uses(fr.nvt0[idx], fr.nvt1[idx], ndt[idx]);
            self.init_sole_disk(ndt[idx], nv[idx], fr.nvt0[idx]);
            self.edges[ne[idx]].edge_use = fr.net0[idx];
        }
        self.wire_tri_edge_uses(&fr);
        self.assign_tri_edges(&fr, ne);
        self.attach_tri_loops_new_shell(&fr, nshell);
        self.set_shell_bounds(nshell, &pos);
        self.shells[nshell].next = nshell;
        self.shells[nshell].prev = nshell;
        match self.child {
            None => self.child = Some(nshell),
            Some(es) => self.shell_append(es, nshell),
        }
        log::debug!("new spatial shell {nshell:?}");
    }

    /// One corner matched: a new face hanging off the matched vertex, with
    /// two new vertices. The face is a fresh sheet at that vertex, so the
    /// vertex gains a disk.
    fn extend_shell_1v(&mut self, ev: VertexId, pos0: DVec3, pos1: DVec3) {
        let eshell = self.vertex_shell_impl(ev);
        let fr = self.new_tri_frame();
        let ne = [self.new_edge(), self.new_edge(), self.new_edge()];
        let ndt = [self.new_disk_use(), self.new_disk_use(), self.new_disk_use()];
        let kind = self.kind();
        let nv = [
            self.new_vertex(Position::for_kind(kind, pos0)),
            self.new_vertex(Position::for_kind(kind, pos1)),
        ];
        for idx in 0..2 {
            self.vertices[nv[idx]].disk_use = ndt[idx];
            self.index_vertex(nv[idx]);
            self.pair_vertex_uses(fr.nvt0[idx], fr.nvt1[idx], ndt[idx]);
            self.init_sole_disk(ndt[idx], nv[idx], fr.nvt0[idx]);
        }
        self.pair_vertex_uses(fr.nvt0[2], fr.nvt1[2], ndt[2]);
        self.append_disk(ndt[2], ev, fr.nvt0[2]);
        for idx in 0..3 {
            self.edges[ne[idx]].edge_use = fr.net0[idx];
        }
        self.wire_tri_edge_uses(&fr);
        self.assign_tri_edges(&fr, ne);
        self.attach_tri_loops(&fr, eshell);
        self.widen_shell_bounds(eshell, pos0);
        self.widen_shell_bounds(eshell, pos1);
    }

    /// Two corners matched and joined by an edge: a new face over that
    /// edge and one new vertex. The new uses of the shared edge go into
    /// its radial cycle.
    fn extend_shell_2v1e(&mut self, ee: EdgeId, pos2: DVec3) {
        let eet = self.edges[ee].edge_use;
        let eet_opp = self.edge_uses[eet].opp;
        let eshell = self.loop_uses[self.edge_uses[eet].parent].parent;
        let fr = self.new_tri_frame();
        let ne = [self.new_edge(), self.new_edge()];
        let ndt = self.new_disk_use();
        let kind = self.kind();
        let nv = self.new_vertex(Position::for_kind(kind, pos2));
        let evt0 = self.edge_uses[eet].vertex_use;
        self.append_vertex_use_pair(evt0, fr.nvt0[0], fr.nvt1[0]);
        let evt1 = self.edge_uses[eet_opp].vertex_use;
        self.append_vertex_use_pair(evt1, fr.nvt0[1], fr.nvt1[1]);
        self.pair_vertex_uses(fr.nvt0[2], fr.nvt1[2], ndt);
        self.vertices[nv].disk_use = ndt;
        self.index_vertex(nv);
        self.init_sole_disk(ndt, nv, fr.nvt0[2]);
        self.edges[ne[0]].edge_use = fr.net0[1];
        self.edges[ne[1]].edge_use = fr.net0[2];
        self.wire_tri_edge_uses(&fr);
        self.assign_tri_edges(&fr, [ee, ne[0], ne[1]]);
        self.insert_radial(fr.net0[0]);
        self.insert_radial(fr.net1[1]);
        self.attach_tri_loops(&fr, eshell);
        self.widen_shell_bounds(eshell, pos2);
    }

    /// Two corners matched on one shell with no edge between them: a new
    /// face bridging them through one new vertex, with three new edges.
    /// Both matched vertices gain a disk.
    fn extend_shell_2v0e(&mut self, v0: VertexId, v1: VertexId, pos2: DVec3) {
        let eshell = self.vertex_shell_impl(v0);
        self.bridge_2v0e(eshell, v0, v1, pos2);
        self.widen_shell_bounds(eshell, pos2);
    }

    /// Two corners matched on different shells: as the no-edge extend, but
    /// the smaller shell is then absorbed into the larger.
    fn join_shells_2v(&mut self, v0: VertexId, v1: VertexId, pos2: DVec3) {
        let mut ev = [v0, v1];
        let mut eshell = self.vertex_shell_impl(v0);
        let mut dshell = self.vertex_shell_impl(v1);
        if self.shells[eshell].bounds.volume() < self.shells[dshell].bounds.volume() {
            std::mem::swap(&mut eshell, &mut dshell);
            ev.swap(0, 1);
        }
        self.bridge_2v0e(eshell, ev[0], ev[1], pos2);
        self.widen_shell_bounds(eshell, pos2);
        if self.child == Some(dshell) {
            self.child = Some(eshell);
        }
        self.shell_join_and_unlink(eshell, dshell);
        self.free_shell(dshell);
    }

    /// Shared wiring of the two-vertex no-edge operators: a new face over
    /// `v0`, `v1` and a new vertex at `pos2`, all three edges fresh.
    fn bridge_2v0e(&mut self, eshell: ShellId, v0: VertexId, v1: VertexId, pos2: DVec3) {
        let fr = self.new_tri_frame();
        let ne = [self.new_edge(), self.new_edge(), self.new_edge()];
        let ndt = [self.new_disk_use(), self.new_disk_use(), self.new_disk_use()];
        let kind = self.kind();
        let nv = self.new_vertex(Position::for_kind(kind, pos2));
        self.pair_vertex_uses(fr.nvt0[0], fr.nvt1[0], ndt[0]);
        self.append_disk(ndt[0], v0, fr.nvt0[0]);
        self.pair_vertex_uses(fr.nvt0[1], fr.nvt1[1], ndt[1]);
        self.append_disk(ndt[1], v1, fr.nvt0[1]);
        self.pair_vertex_uses(fr.nvt0[2], fr.nvt1[2], ndt[2]);
        self.vertices[nv].disk_use = ndt[2];
        self.index_vertex(nv);
        self.init_sole_disk(ndt[2], nv, fr.nvt0[2]);
        for idx in 0..3 {
            self.edges[ne[idx]].edge_use = fr.net0[idx];
        }
        self.wire_tri_edge_uses(&fr);
        self.assign_tri_edges(&fr, ne);
        self.attach_tri_loops(&fr, eshell);
    }

    /// Three corners matched on one shell, no edges between them: a new
    /// face over three fresh edges. Every corner vertex gains a disk.
    fn extend_shell_3v0e(&mut self, ev: [VertexId; 3]) {
        let eshell = self.vertex_shell_impl(ev[0]);
        self.bridge_3v0e(eshell, ev);
    }

    /// Three corners matched on two shells: as the one-shell extend, then
    /// the second shell is absorbed. When two corners share a shell that
    /// shell is kept.
    fn join_shells_3v0e2s(&mut self, ev: [VertexId; 3]) {
        let sh = [
            self.vertex_shell_impl(ev[0]),
            self.vertex_shell_impl(ev[1]),
            self.vertex_shell_impl(ev[2]),
        ];
        let (eshell, dshell) = if sh[0] == sh[1] {
            (sh[0], sh[2])
        } else if sh[1] == sh[2] {
            (sh[1], sh[0])
        } else {
            (sh[2], sh[1])
        };
        self.bridge_3v0e(eshell, ev);
        if self.child == Some(dshell) {
            self.child = Some(eshell);
        }
        self.shell_join_and_unlink(eshell, dshell);
        self.free_shell(dshell);
    }

    /// Three corners matched on three shells: as the one-shell extend,
    /// keeping the largest shell and absorbing the other two.
    fn join_shells_3v0e3s(&mut self, ev: [VertexId; 3]) {
        let mut ev = ev;
        let mut eshell = self.vertex_shell_impl(ev[0]);
        let mut dshell = [self.vertex_shell_impl(ev[1]), self.vertex_shell_impl(ev[2])];
        let evol = self.shells[eshell].bounds.volume();
        let dvol = [
            self.shells[dshell[0]].bounds.volume(),
            self.shells[dshell[1]].bounds.volume(),
        ];
        if evol < dvol[0] || evol < dvol[1] {
            if dvol[0] > dvol[1] {
                std::mem::swap(&mut eshell, &mut dshell[0]);
                ev.swap(0, 1);
            } else {
                std::mem::swap(&mut eshell, &mut dshell[1]);
                ev.swap(0, 2);
            }
        }
        self.bridge_3v0e(eshell, ev);
        for ds in dshell {
            if self.child == Some(ds) {
                self.child = Some(eshell);
            }
            self.shell_join_and_unlink(eshell, ds);
            self.free_shell(ds);
        }
    }

    /// Shared wiring of the three-vertex no-edge operators.
    fn bridge_3v0e(&mut self, eshell: ShellId, ev: [VertexId; 3]) {
        let fr = self.new_tri_frame();
        let ne = [self.new_edge(), self.new_edge(), self.new_edge()];
        let ndt = [self.new_disk_use(), self.new_disk_use(), self.new_disk_use()];
        for idx in 0..3 {
            self.pair_vertex_uses(fr.nvt0[idx], fr.nvt1[idx], ndt[idx]);
            self.append_disk(ndt[idx], ev[idx], fr.nvt0[idx]);
            self.edges[ne[idx]].edge_use = fr.net0[idx];
        }
        self.wire_tri_edge_uses(&fr);
        self.assign_tri_edges(&fr, ne);
        self.attach_tri_loops(&fr, eshell);
    }

    /// One shared edge plus one matched vertex, all on one shell: a new
    /// face over the edge, its uses spliced into the edge's radial cycle,
    /// with two fresh edges closing on the matched vertex.
    fn extend_shell_3v1e(&mut self, ee: EdgeId, sv: VertexId) {
        let eshell = self.loop_uses[self.edge_uses[self.edges[ee].edge_use].parent].parent;
        self.bridge_3v1e(eshell, ee, sv);
        let pos2 = self.vertex_d3(sv);
        self.widen_shell_bounds(eshell, pos2);
    }

    /// As the one-shell variant, but the matched vertex lies on another
    /// shell, which is absorbed.
    fn join_shells_3v1e(&mut self, ee: EdgeId, sv: VertexId) {
        let eshell = self.loop_uses[self.edge_uses[self.edges[ee].edge_use].parent].parent;
        let dshell = self.vertex_shell_impl(sv);
        self.bridge_3v1e(eshell, ee, sv);
        let pos2 = self.vertex_d3(sv);
        self.widen_shell_bounds(eshell, pos2);
        if self.child == Some(dshell) {
            self.child = Some(eshell);
        }
        self.shell_join_and_unlink(eshell, dshell);
        self.free_shell(dshell);
    }

    /// Shared wiring of the one-edge three-vertex operators. The shared
    /// vertex off the edge gains a disk.
    fn bridge_3v1e(&mut self, eshell: ShellId, ee: EdgeId, sv: VertexId) {
        let eet = self.edges[ee].edge_use;
        let eet_opp = self.edge_uses[eet].opp;
        let fr = self.new_tri_frame();
        let ne = [self.new_edge(), self.new_edge()];
        let ndt = self.new_disk_use();
        let evt0 = self.edge_uses[eet].vertex_use;
        self.append_vertex_use_pair(evt0, fr.nvt0[0], fr.nvt1[0]);
        let evt1 = self.edge_uses[eet_opp].vertex_use;
        self.append_vertex_use_pair(evt1, fr.nvt0[1], fr.nvt1[1]);
        self.pair_vertex_uses(fr.nvt0[2], fr.nvt1[2], ndt);
        self.append_disk(ndt, sv, fr.nvt0[2]);
        self.edges[ne[0]].edge_use = fr.net0[1];
        self.edges[ne[1]].edge_use = fr.net0[2];
        self.wire_tri_edge_uses(&fr);
        self.assign_tri_edges(&fr, [ee, ne[0], ne[1]]);
        self.insert_radial(fr.net0[0]);
        self.insert_radial(fr.net1[1]);
        self.attach_tri_loops(&fr, eshell);
    }

    /// Two shared edges: a new face closing their corner with one fresh
    /// edge. Four uses are spliced radially, and if the corner vertex's
    /// uses by the two edges were on different disks, closing the corner
    /// merges those disks.
    fn extend_shell_3v2e(&mut self, ee0: EdgeId, ee1: EdgeId) {
        let eshell = self.loop_uses[self.edge_uses[self.edges[ee0].edge_use].parent].parent;
        let (a0, a1) = {
            let et = self.edges[ee0].edge_use;
            (self.edge_use_vertex(et), self.edge_use_vertex(self.edge_uses[et].opp))
        };
        let (b0, b1) = {
            let et = self.edges[ee1].edge_use;
            (self.edge_use_vertex(et), self.edge_use_vertex(self.edge_uses[et].opp))
        };
        let ev1 = if a0 == b0 || a0 == b1 { a0 } else { a1 };
        // vertex-uses at the three corners, with each edge-use flipped so
        // corner 0 is the far end of the first edge and corner 2 the far
        // end of the second
        let evt0 = {
            let et = self.edges[ee0].edge_use;
            if self.edge_use_vertex(et) == ev1 {
                self.edge_uses[self.edge_uses[et].opp].vertex_use
            } else {
                self.edge_uses[et].vertex_use
            }
        };
        let evt1 = {
            let et = self.edges[ee0].edge_use;
            if self.edge_use_vertex(et) == ev1 {
                self.edge_uses[et].vertex_use
            } else {
                self.edge_uses[self.edge_uses[et].opp].vertex_use
            }
        };
        let evt2 = {
            let et = self.edges[ee1].edge_use;
            if self.edge_use_vertex(et) == ev1 {
                self.edge_uses[self.edge_uses[et].opp].vertex_use
            } else {
                self.edge_uses[et].vertex_use
            }
        };
        let fr = self.new_tri_frame();
        let ne = self.new_edge();
        for (idx, evt) in [evt0, evt1, evt2].into_iter().enumerate() {
            self.append_vertex_use_pair(evt, fr.nvt0[idx], fr.nvt1[idx]);
        }
        self.edges[ne].edge_use = fr.net0[2];
        self.wire_tri_edge_uses(&fr);
        self.assign_tri_edges(&fr, [ee0, ee1, ne]);
        self.insert_radial(fr.net0[0]);
        self.insert_radial(fr.net1[1]);
        self.insert_radial(fr.net0[1]);
        self.insert_radial(fr.net1[2]);
        self.attach_tri_loops(&fr, eshell);
        let edt0 = {
            let r = self.edge_uses[fr.net0[1]].rad;
            self.vertex_uses[self.edge_uses[r].vertex_use].disk_use
        };
        let edt1 = {
            let r = self.edge_uses[fr.net1[1]].rad;
            self.vertex_uses[self.edge_uses[r].vertex_use].disk_use
        };
        if edt0 != edt1 {
            let first = self.disk_uses[edt1].vertex_use;
            let mut cur = first;
            loop {
                let nxt = self.vertex_uses[cur].next;
                let head = self.disk_uses[edt0].vertex_use;
                self.vertex_use_append(head, cur);
                self.vertex_uses[cur].disk_use = edt0;
                if nxt == first {
                    break;
                }
                cur = nxt;
            }
            if self.vertices[ev1].disk_use == edt1 {
                self.vertices[ev1].disk_use = edt0;
            }
            self.disk_use_unlink(edt1);
            self.free_disk_use(edt1);
            log::debug!("merged disks at vertex {ev1:?}");
        }
    }
}
