//! Radial ordering of edge-uses around a shared edge.
//!
//! In a spatial model several surface sheets may share one edge. The
//! similarly directed uses of that edge are kept in a cyclic `rad` list
//! ordered by the angle of each use's off-edge vertex around the edge
//! direction, so walking `rad` sweeps the sheets in rotational order.

use crate::geometry::vec::{DVec2, tri_signed_area2};
use crate::topology::handle::EdgeUseId;
use crate::topology::model::Model;

impl Model {
    /// Inserts `net` into the radial cycle of its edge. All fields of
    /// `net` except `rad` must already be wired, including `next`/`prev`
    /// (they name the off-edge vertex of its triangle).
    ///
    /// The angular predecessor is found by projecting every candidate's
    /// off-edge vertex onto the plane perpendicular to the edge and
    /// comparing with a signed-area orientation test; no trigonometry.
    pub(crate) fn insert_radial(&mut self, net: EdgeUseId) {
        let mut fet = self.edges[self.edge_uses[net].edge].edge_use;
        if self.edge_use_vertex(fet) != self.edge_use_vertex(net) {
            // antiparallel, use the opposite
            fet = self.edge_uses[fet].opp;
        }
        let pet = if self.edge_uses[fet].rad == fet {
            fet
        } else {
            let p0 = self.edge_use_pos(net);
            let p1 = self.edge_use_pos(self.edge_uses[net].next);
            let p2 = self.edge_use_pos(self.edge_uses[net].prev);
            let n0 = (p0 - p1).normalized();
            let v2 = p2 - p0;
            let n1 = n0.cross(v2).normalized();
            let n2 = n0.cross(n1);
            let grd = |m: &Model, et: EdgeUseId| {
                let q = m.edge_use_pos(m.edge_uses[et].prev) - p0;
                DVec2::new(q.dot(n1), q.dot(n2))
            };
            let n_grd = DVec2::new(v2.dot(n1), v2.dot(n2));
            let mut pet = fet;
            let mut p_grd = grd(self, pet);
            let mut tet = self.edge_uses[fet].rad;
            while tet != fet {
                let t_grd = grd(self, tet);
                if tri_signed_area2(n_grd, p_grd, t_grd) > 0.0 {
                    pet = tet;
                    p_grd = t_grd;
                }
                tet = self.edge_uses[tet].rad;
            }
            pet
        };
        self.edge_uses[net].rad = self.edge_uses[pet].rad;
        self.edge_uses[pet].rad = net;
    }
}
