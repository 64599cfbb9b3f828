//! Planar simplex construction.
//!
//! A planar model is built one line segment at a time. Each endpoint is
//! matched against the vertex index; the pattern of matches picks one of
//! four operators:
//!
//! * neither endpoint known: a new shell with a single two-use loop;
//! * one endpoint known: extend that vertex's loop with a pendant edge;
//! * both known, on a common loop: split the loop with a new edge;
//! * both known, on different loops: join the loops (and their shells,
//!   absorbing the second shell) with a new edge.
//!
//! A segment whose endpoints already share an edge is a duplicate and is
//! ignored.

use std::cmp::Ordering;

use crate::geometry::position::{Dim, Position};
use crate::geometry::vec::{DVec2, DVec3, cmp_angle};
use crate::geometry::TOLERANCE;
use crate::model_error::ModelError;
use crate::topology::handle::EdgeUseId;
use crate::topology::model::Model;

fn d3(p: DVec2) -> DVec3 {
    DVec3::new(p.x, p.y, 0.0)
}

impl Model {
    /// Adds one line segment to a planar model. Endpoints within matching
    /// tolerance of existing vertices are welded to them.
    pub fn add_segment(&mut self, p0: DVec2, p1: DVec2) -> Result<(), ModelError> {
        if self.dim() != Dim::Two {
            return Err(ModelError::WrongDimension { expected: Dim::Two, found: self.dim() });
        }
        let pos = [p0, p1];
        let matched = self.match_edge_uses_2d(pos);
        match matched {
            [None, None] => self.new_shell_2d(pos),
            [Some(et0), None] => self.extend_loop_2d(et0, pos[1]),
            [None, Some(et1)] => self.extend_loop_2d(et1, pos[0]),
            [Some(et0), Some(et1)] => {
                if self.edge_uses[et0].edge == self.edge_uses[et1].edge {
                    // duplicate segment
                    log::trace!("segment {p0:?} {p1:?} already present");
                } else if self.edge_uses[et0].parent == self.edge_uses[et1].parent {
                    self.split_loop_2d(et0, et1);
                } else {
                    self.join_loops_2d(et0, et1);
                }
            }
        }
        Ok(())
    }

    /// For each endpoint that matches an existing vertex, the edge-use
    /// directed away from that vertex which the new edge should precede.
    ///
    /// When several edges use the matched vertex the candidates are ranked
    /// by the polar angle of their far endpoints after a rigid transform
    /// taking the prospective edge onto the x axis.
    fn match_edge_uses_2d(&self, pos: [DVec2; 2]) -> [Option<EdgeUseId>; 2] {
        let mut matched = [None, None];
        for idd in 0..2 {
            let Some(vertex) = self.match_vertex(d3(pos[idd])) else {
                continue;
            };
            let vu = self.disk_uses[self.vertices[vertex].disk_use].vertex_use;
            let ets = self.vertex_uses[vu].parent;
            if vu == self.vertex_uses[vu].next {
                // sole use of this vertex
                matched[idd] = Some(ets);
                continue;
            }
            let m_pos = pos[idd];
            let o_pos = pos[1 - idd];
            let td0 = m_pos.x - o_pos.x;
            let td1 = m_pos.y - o_pos.y;
            let mut tr_scale = td0 * td0 + td1 * td1;
            if tr_scale <= TOLERANCE {
                // degenerate segment, treat the endpoint as unmatched
                continue;
            }
            tr_scale = 1.0 / tr_scale.sqrt();
            let tr_cos = o_pos.x - m_pos.x;
            let tr_sin = m_pos.y - o_pos.y;
            let tr_x = m_pos.x * m_pos.x + m_pos.y * m_pos.y
                - m_pos.x * o_pos.x
                - m_pos.y * o_pos.y;
            let tr_y = m_pos.x * o_pos.y - m_pos.y * o_pos.x;
            let xform = |p: DVec2| {
                DVec2::new(
                    tr_scale * (p.x * tr_cos - p.y * tr_sin + tr_x),
                    tr_scale * (p.x * tr_sin - p.y * tr_cos + tr_y),
                )
            };
            let far = |et: EdgeUseId| self.edge_use_pos(self.edge_uses[et].next).xy();
            let mut etb = ets;
            let mut tpos_b = xform(far(etb));
            // walk every edge-use directed away from the matched vertex
            let mut etn = self.edge_uses[self.edge_uses[etb].opp].next;
            while etn != ets {
                let tpos_n = xform(far(etn));
                if cmp_angle(tpos_n, tpos_b) == Ordering::Greater {
                    tpos_b = tpos_n;
                    etb = etn;
                }
                etn = self.edge_uses[self.edge_uses[etn].opp].next;
            }
            matched[idd] = Some(etb);
        }
        matched
    }

    /// Neither endpoint matched: one new shell holding a single loop of
    /// two edge-uses over one edge.
    fn new_shell_2d(&mut self, pos: [DVec2; 2]) {
        let nshell = self.new_shell();
        let nlu = self.new_loop_use();
        let ne = self.new_edge();
        let net = [self.new_edge_use(), self.new_edge_use()];
        let ndt = [self.new_disk_use(), self.new_disk_use()];
        let kind = self.kind();
        let nv = [
            self.new_vertex(Position::for_kind(kind, d3(pos[0]))),
            self.new_vertex(Position::for_kind(kind, d3(pos[1]))),
        ];
        let nvt = [self.new_vertex_use(), self.new_vertex_use()];
        for idx in 0..2 {
            self.vertices[nv[idx]].disk_use = ndt[idx];
            self.index_vertex(nv[idx]);
            let vu = &mut self.vertex_uses[nvt[idx]];
            vu.next = nvt[idx];
            vu.prev = nvt[idx];
            vu.disk_use = ndt[idx];
            vu.parent = net[idx];
            let du = &mut self.disk_uses[ndt[idx]];
            du.next = ndt[idx];
            du.prev = ndt[idx];
            du.vertex = nv[idx];
            du.vertex_use = nvt[idx];
        }
        self.edges[ne].edge_use = net[0];
        for idx in 0..2 {
            let other = net[1 - idx];
            let et = &mut self.edge_uses[net[idx]];
            et.next = other;
            et.prev = other;
            et.opp = other;
            et.rad = net[idx];
            et.edge = ne;
            et.vertex_use = nvt[idx];
            et.parent = nlu;
        }
        let lu = &mut self.loop_uses[nlu];
        lu.next = nlu;
        lu.prev = nlu;
        lu.opp = nlu;
        lu.face = None;
        lu.edge_use = net[0];
        lu.parent = nshell;
        self.set_shell_bounds(nshell, &[d3(pos[0]), d3(pos[1])]);
        self.shells[nshell].child = nlu;
        self.shells[nshell].next = nshell;
        self.shells[nshell].prev = nshell;
        match self.child {
            None => self.child = Some(nshell),
            Some(es) => self.shell_append(es, nshell),
        }
        log::debug!("new planar shell {nshell:?}");
    }

    /// One endpoint matched: a pendant edge from the matched vertex to a
    /// new vertex at `n_pos`. `eet0` is the loop's next edge-use for the
    /// new use directed away from the new endpoint.
    fn extend_loop_2d(&mut self, eet0: EdgeUseId, n_pos: DVec2) {
        let ne = self.new_edge();
        let net0 = self.new_edge_use();
        let net1 = self.new_edge_use();
        let ndt = self.new_disk_use();
        let kind = self.kind();
        let nv = self.new_vertex(Position::for_kind(kind, d3(n_pos)));
        let nvt0 = self.new_vertex_use();
        let nvt1 = self.new_vertex_use();
        let eet1 = self.edge_uses[eet0].prev;
        self.vertices[nv].disk_use = ndt;
        self.index_vertex(nv);
        {
            let vu = &mut self.vertex_uses[nvt0];
            vu.next = nvt0;
            vu.prev = nvt0;
            vu.disk_use = ndt;
            vu.parent = net0;
        }
        let evt = self.edge_uses[eet0].vertex_use;
        self.vertex_use_append(evt, nvt1);
        self.vertex_uses[nvt1].disk_use = self.vertex_uses[evt].disk_use;
        self.vertex_uses[nvt1].parent = net1;
        {
            let du = &mut self.disk_uses[ndt];
            du.next = ndt;
            du.prev = ndt;
            du.vertex = nv;
            du.vertex_use = nvt0;
        }
        self.edges[ne].edge_use = net0;
        self.edge_uses[net0].prev = net1;
        self.edge_uses[net0].next = eet0;
        self.edge_uses[eet0].prev = net0;
        self.edge_uses[net1].prev = eet1;
        self.edge_uses[eet1].next = net1;
        self.edge_uses[net1].next = net0;
        let p0 = self.edge_uses[eet0].parent;
        let p1 = self.edge_uses[eet1].parent;
        {
            let et = &mut self.edge_uses[net0];
            et.opp = net1;
            et.rad = net0;
            et.edge = ne;
            et.vertex_use = nvt0;
            et.parent = p0;
        }
        {
            let et = &mut self.edge_uses[net1];
            et.opp = net0;
            et.rad = net1;
            et.edge = ne;
            et.vertex_use = nvt1;
            et.parent = p1;
        }
        let shell = self.loop_uses[p0].parent;
        self.widen_shell_bounds(shell, d3(n_pos));
    }

    /// Both endpoints matched on one loop: split it with a new edge,
    /// creating a second loop-use in the same shell. A segment that would
    /// duplicate the edge closing a two-edge loop is ignored.
    fn split_loop_2d(&mut self, eet0: EdgeUseId, eet1: EdgeUseId) {
        if self.edge_uses[eet0].prev == self.edge_uses[self.edge_uses[eet1].prev].opp {
            return;
        }
        let ne = self.new_edge();
        let net0 = self.new_edge_use();
        let net1 = self.new_edge_use();
        let nvt0 = self.new_vertex_use();
        let nvt1 = self.new_vertex_use();
        let nlu = self.new_loop_use();
        let evt1 = self.edge_uses[eet1].vertex_use;
        self.vertex_use_append(evt1, nvt0);
        self.vertex_uses[nvt0].disk_use = self.vertex_uses[evt1].disk_use;
        self.vertex_uses[nvt0].parent = net0;
        let evt0 = self.edge_uses[eet0].vertex_use;
        self.vertex_use_append(evt0, nvt1);
        self.vertex_uses[nvt1].disk_use = self.vertex_uses[evt0].disk_use;
        self.vertex_uses[nvt1].parent = net1;
        self.edges[ne].edge_use = net0;
        let e0_prev = self.edge_uses[eet0].prev;
        let e1_prev = self.edge_uses[eet1].prev;
        let p0 = self.edge_uses[eet0].parent;
        let p1 = self.edge_uses[eet1].parent;
        {
            let et = &mut self.edge_uses[net0];
            et.next = eet0;
            et.prev = e1_prev;
            et.opp = net1;
            et.rad = net0;
            et.edge = ne;
            et.vertex_use = nvt0;
            et.parent = p0;
        }
        {
            let et = &mut self.edge_uses[net1];
            et.next = eet1;
            et.prev = e0_prev;
            et.opp = net0;
            et.rad = net1;
            et.edge = ne;
            et.vertex_use = nvt1;
            et.parent = p1;
        }
        self.edge_uses[eet0].prev = net0;
        self.edge_uses[e1_prev].next = net0;
        self.edge_uses[eet1].prev = net1;
        self.edge_uses[e0_prev].next = net1;
        let elu = p0;
        let shell = self.loop_uses[elu].parent;
        self.loop_uses[elu].edge_use = net0;
        self.loop_use_append(elu, nlu);
        {
            let lu = &mut self.loop_uses[nlu];
            lu.opp = nlu;
            lu.face = None;
            lu.parent = shell;
            lu.edge_use = net1;
        }
        self.set_loop_uses(elu);
        self.set_loop_uses(nlu);
        log::debug!("split loop {elu:?} into {elu:?} and {nlu:?}");
    }

    /// Both endpoints matched on different loops: join them with a new
    /// edge. The second loop-use is freed; if it was the last loop of a
    /// different shell, that shell's geometry is merged into the first
    /// shell and the shell freed.
    fn join_loops_2d(&mut self, eet0: EdgeUseId, eet1: EdgeUseId) {
        let ne = self.new_edge();
        let net0 = self.new_edge_use();
        let net1 = self.new_edge_use();
        let nvt0 = self.new_vertex_use();
        let nvt1 = self.new_vertex_use();
        let evt0 = self.edge_uses[eet0].vertex_use;
        self.vertex_use_append(evt0, nvt0);
        self.vertex_uses[nvt0].disk_use = self.vertex_uses[evt0].disk_use;
        self.vertex_uses[nvt0].parent = net0;
        let evt1 = self.edge_uses[eet1].vertex_use;
        self.vertex_use_append(evt1, nvt1);
        self.vertex_uses[nvt1].disk_use = self.vertex_uses[evt1].disk_use;
        self.vertex_uses[nvt1].parent = net1;
        self.edges[ne].edge_use = net0;
        let e0_prev = self.edge_uses[eet0].prev;
        let e1_prev = self.edge_uses[eet1].prev;
        let elu = self.edge_uses[eet0].parent;
        {
            let et = &mut self.edge_uses[net0];
            et.next = eet1;
            et.prev = e0_prev;
            et.opp = net1;
            et.rad = net0;
            et.edge = ne;
            et.vertex_use = nvt0;
            et.parent = elu;
        }
        {
            let et = &mut self.edge_uses[net1];
            et.next = eet0;
            et.prev = e1_prev;
            et.opp = net0;
            et.rad = net1;
            et.edge = ne;
            et.vertex_use = nvt1;
            et.parent = elu;
        }
        self.edge_uses[eet1].prev = net0;
        self.edge_uses[e0_prev].next = net0;
        self.edge_uses[eet0].prev = net1;
        self.edge_uses[e1_prev].next = net1;
        let dlu = self.edge_uses[eet1].parent;
        let eshell = self.loop_uses[elu].parent;
        let dshell = self.loop_uses[dlu].parent;
        let sole = self.loop_uses[dlu].next == dlu;
        self.set_loop_uses(elu);
        self.loop_use_unlink(dlu);
        self.free_loop_use(dlu);
        if dshell != eshell {
            if sole {
                self.merge_shell_bounds(eshell, dshell);
                self.shell_unlink(dshell);
            } else {
                // the losing shell still holds other loops; move them over
                self.shell_join_and_unlink(eshell, dshell);
            }
            self.free_shell(dshell);
            log::debug!("joined loops across shells, freed {dshell:?}");
        }
    }
}
