//! Deletion operators.
//!
//! Elements are deleted together with everything that depends on them,
//! working top down: deleting an edge deletes its uses and any vertex or
//! disk left without a use, and may split a loop in two (possibly
//! splitting off a new shell) or join two loops into one. Deleting the
//! last edge of a loop deletes the loop, and deleting the last loop of a
//! shell deletes the shell.
//!
//! Shell bounding boxes are recomputed where a deletion splits a shell;
//! vertex deletion leaves them untouched, so they may overestimate until
//! the caller recomputes them.

use itertools::Itertools;

use crate::geometry::position::Dim;
use crate::model_error::ModelError;
use crate::topology::handle::{
    DiskUseId, EdgeId, EdgeUseId, FaceId, LoopUseId, ShellId, VertexId, VertexUseId,
};
use crate::topology::model::Model;

struct EdgeUseRecord {
    et: EdgeUseId,
    vt: VertexUseId,
    dt: DiskUseId,
    v: VertexId,
    rad: EdgeUseId,
    edge: EdgeId,
}

impl Model {
    /// Deletes a shell and every element in it.
    pub fn delete_shell(&mut self, ds: ShellId) -> Result<(), ModelError> {
        self.shells.get(ds)?;
        self.delete_shell_impl(ds);
        Ok(())
    }

    pub(crate) fn delete_shell_impl(&mut self, ds: ShellId) {
        self.shell_unlink(ds);
        // Gather everything reachable before freeing anything: shared
        // elements (vertices, disks, edges, radial mates) are reached from
        // several edge-uses.
        let lts = self.loop_ring(self.shells[ds].child);
        let mut loops = Vec::with_capacity(lts.len());
        for lt in lts {
            let ets = self.edge_use_ring(self.loop_uses[lt].edge_use);
            let mut recs = Vec::with_capacity(ets.len());
            for et in ets {
                let vt = self.edge_uses[et].vertex_use;
                let dt = self.vertex_uses[vt].disk_use;
                recs.push(EdgeUseRecord {
                    et,
                    vt,
                    dt,
                    v: self.disk_uses[dt].vertex,
                    rad: self.edge_uses[et].rad,
                    edge: self.edge_uses[et].edge,
                });
            }
            loops.push((lt, self.loop_uses[lt].face, recs));
        }
        for (lt, face, recs) in loops {
            for r in recs {
                if self.vertices.contains(r.v) {
                    self.unindex_vertex(r.v);
                    self.free_vertex(r.v);
                }
                if self.disk_uses.contains(r.dt) {
                    self.free_disk_use(r.dt);
                }
                if self.vertex_uses.contains(r.vt) {
                    self.free_vertex_use(r.vt);
                }
                if self.edge_uses.contains(r.rad) {
                    self.free_edge_use(r.rad);
                }
                if self.edges.contains(r.edge) {
                    self.free_edge(r.edge);
                }
                if self.edge_uses.contains(r.et) {
                    self.free_edge_use(r.et);
                }
            }
            if let Some(f) = face {
                if self.faces.contains(f) {
                    self.free_face(f);
                }
            }
            self.free_loop_use(lt);
        }
        self.free_shell(ds);
        log::debug!("deleted shell {ds:?}");
    }

    /// Deletes a vertex of a planar model along with every edge incident
    /// with it. Shell bounds are not recomputed.
    pub fn delete_vertex(&mut self, dv: VertexId) -> Result<(), ModelError> {
        self.vertices.get(dv)?;
        if self.dim() != Dim::Two {
            return Err(ModelError::VertexDeleteNotPlanar);
        }
        let mut edges = Vec::new();
        let fdt = self.vertices[dv].disk_use;
        let mut dt = fdt;
        loop {
            dt = self.disk_uses[dt].next;
            let fvt = self.disk_uses[dt].vertex_use;
            let mut vt = fvt;
            loop {
                vt = self.vertex_uses[vt].next;
                edges.push(self.edge_uses[self.vertex_uses[vt].parent].edge);
                if vt == fvt {
                    break;
                }
            }
            if dt == fdt {
                break;
            }
        }
        // Deleting one edge can take others with it when a loop or shell
        // collapses, so skip entries that have already gone.
        let mut edges: Vec<EdgeId> = edges.into_iter().unique().collect();
        while let Some(e) = edges.pop() {
            if self.edges.contains(e) {
                self.delete_edge(e)?;
            }
        }
        Ok(())
    }

    /// Deletes an edge and every element that depends on it. Removing an
    /// edge either splits its loop in two (splitting off a new shell when
    /// the two halves no longer touch) or joins two loops into one.
    pub fn delete_edge(&mut self, de: EdgeId) -> Result<(), ModelError> {
        self.edges.get(de)?;
        let tet0 = self.edges[de].edge_use;
        if self.edge_uses[tet0].rad == tet0
            && self.edge_uses[tet0].prev == self.edge_uses[tet0].next
        {
            // sole edge of its loop
            let parent = self.edge_uses[tet0].parent;
            match self.loop_uses[parent].face {
                Some(f) => self.delete_face(f)?,
                None => self.delete_loop_use(parent),
            }
            return Ok(());
        }
        for tet1 in self.radial_ring(tet0) {
            let tet2 = self.edge_uses[tet1].opp;
            let tet3 = self.edge_uses[tet1].next;
            let tet4 = self.edge_uses[tet2].next;
            let terminal =
                tet2 == self.edge_uses[tet1].next || tet1 == self.edge_uses[tet2].next;
            let p3 = self.edge_uses[tet3].parent;
            let p4 = self.edge_uses[tet4].parent;
            // Splice the whole pair out of its loop ring while both uses
            // are still live, then retire them one by one.
            self.unlink_edge_use_pair(tet1, tet2);
            self.retire_edge_use(tet1);
            self.retire_edge_use(tet2);
            if p3 == p4 {
                // one loop split in two, or a terminal edge removed
                self.set_loop_uses(p3);
                if !terminal {
                    self.split_off_loop(p3, tet4);
                }
            } else {
                // two loops joined into one
                self.loop_use_unlink(p4);
                if let Some(f) = self.loop_uses[p4].face {
                    if self.loop_uses[p4].opp == p4 {
                        self.free_face(f);
                    }
                }
                self.free_loop_use(p4);
                self.set_loop_uses(p3);
            }
        }
        if self.edges.contains(de) {
            self.free_edge(de);
        }
        Ok(())
    }

    /// Houses the ring starting at `het` in a loop-use of its own after a
    /// loop was split in two. The new loop goes into the shell it still
    /// adjoins, or into a brand new shell when the split disconnected it.
    fn split_off_loop(&mut self, elu: LoopUseId, het: EdgeUseId) {
        let shell = self.loop_uses[elu].parent;
        let nlt = self.new_loop_use();
        let nf = match self.loop_uses[elu].face {
            Some(_) => Some(self.new_face()),
            None => None,
        };
        {
            let lu = &mut self.loop_uses[nlt];
            lu.next = nlt;
            lu.prev = nlt;
            lu.opp = nlt;
            lu.face = nf;
            lu.edge_use = het;
            lu.parent = shell;
        }
        if let Some(f) = nf {
            self.faces[f].loop_use = nlt;
        }
        self.set_loop_uses(nlt);
        match self.find_adjoining_shell(nlt) {
            Some(es) => {
                self.loop_uses[nlt].parent = es;
                let head = self.shells[es].child;
                self.loop_use_append(head, nlt);
            }
            None => {
                let ns = self.new_shell();
                self.shell_append(shell, ns);
                self.shells[ns].child = nlt;
                self.loop_uses[nlt].parent = ns;
                self.compute_shell_bounds(ns);
                log::debug!("split shell {shell:?}, new shell {ns:?}");
            }
        }
        self.compute_shell_bounds(shell);
    }

    /// Deletes a face with both its loop-uses; deletes the whole shell
    /// when the face is its shell's only face.
    pub fn delete_face(&mut self, df: FaceId) -> Result<(), ModelError> {
        self.faces.get(df)?;
        let tlt0 = self.faces[df].loop_use;
        if self.loop_uses[tlt0].next == self.loop_uses[tlt0].opp {
            self.delete_shell_impl(self.loop_uses[tlt0].parent);
        } else {
            let opp = self.loop_uses[tlt0].opp;
            self.delete_loop_use(opp);
            self.delete_loop_use(tlt0);
            self.free_face(df);
        }
        Ok(())
    }

    /// Deletes a loop-use and its edge-uses; deletes the whole shell when
    /// it is the shell's only loop-use.
    fn delete_loop_use(&mut self, dlt: LoopUseId) {
        if self.loop_uses[dlt].next == dlt {
            self.delete_shell_impl(self.loop_uses[dlt].parent);
            return;
        }
        // The whole ring dies with the loop-use, so the uses are retired
        // without splicing the ring.
        let mut ring = self.edge_use_ring(self.loop_uses[dlt].edge_use);
        ring.rotate_left(1);
        for et in ring {
            self.retire_edge_use(et);
        }
        self.loop_use_unlink(dlt);
        self.free_loop_use(dlt);
    }

    /// Frees one edge-use, its vertex-use, and the disk, vertex and edge
    /// when this was their last use. The use must already be out of its
    /// loop ring, or the ring must be dying with it. Loop-uses are never
    /// freed here.
    fn retire_edge_use(&mut self, det: EdgeUseId) {
        let vt = self.edge_uses[det].vertex_use;
        if self.vertex_uses[vt].next == vt {
            let dt = self.vertex_uses[vt].disk_use;
            if self.disk_uses[dt].next == dt {
                let v = self.disk_uses[dt].vertex;
                self.unindex_vertex(v);
                self.free_vertex(v);
            }
            self.disk_use_unlink(dt);
            self.free_disk_use(dt);
        }
        self.vertex_use_unlink(vt);
        self.free_vertex_use(vt);
        // splice out of the radial cycle
        let mut pet = det;
        while self.edge_uses[pet].rad != det {
            pet = self.edge_uses[pet].rad;
        }
        if pet != det {
            self.edge_uses[pet].rad = self.edge_uses[det].rad;
        }
        let e = self.edge_uses[det].edge;
        let rad = self.edge_uses[det].rad;
        let opp = self.edge_uses[det].opp;
        self.free_edge_use(det);
        // retire the edge with its last use, or move its head off the
        // freed use
        if self.edges.contains(e) && self.edges[e].edge_use == det {
            if rad != det && self.edge_uses.contains(rad) {
                self.edges[e].edge_use = rad;
            } else if opp != det && self.edge_uses.contains(opp) {
                self.edges[e].edge_use = opp;
            } else {
                self.free_edge(e);
            }
        }
    }
}
