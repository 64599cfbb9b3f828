//! Structural verification.
//!
//! [`Model::validate`] walks the whole model and checks every link
//! invariant the constructors maintain: ring closure with consistent
//! `prev` pointers, the pairing of opposite edge-uses and loop-uses,
//! radial cycle closure, parent consistency from vertex-uses up to
//! shells, and that every vertex can be found again through the spatial
//! index. It is meant for tests and for debugging new operators, not for
//! the construction hot path.

use hashbrown::HashSet;

use crate::geometry::position::Dim;
use crate::model_error::ModelError;
use crate::topology::handle::{EdgeUseId, LoopUseId};
use crate::topology::model::Model;

fn corrupt<T>(msg: String) -> Result<T, ModelError> {
    Err(ModelError::CorruptModel(msg))
}

impl Model {
    /// Checks every structural invariant of the model.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_shell_ring()?;
        self.validate_loops()?;
        self.validate_vertices()?;
        Ok(())
    }

    fn validate_shell_ring(&self) -> Result<(), ModelError> {
        let Some(first) = self.child else {
            if self.shell_count() != 0 {
                return corrupt(format!(
                    "model has {} shells but no shell list head",
                    self.shell_count()
                ));
            }
            return Ok(());
        };
        if !self.shells.contains(first) {
            return corrupt(format!("shell list head {first:?} is stale"));
        }
        let mut seen = 0usize;
        let mut cur = first;
        loop {
            let next = self.shells[cur].next;
            if !self.shells.contains(next) {
                return corrupt(format!("shell {cur:?} links stale next {next:?}"));
            }
            if self.shells[next].prev != cur {
                return corrupt(format!("shell ring broken between {cur:?} and {next:?}"));
            }
            seen += 1;
            if seen > self.shell_count() {
                return corrupt("shell ring does not close".to_string());
            }
            cur = next;
            if cur == first {
                break;
            }
        }
        if seen != self.shell_count() {
            return corrupt(format!(
                "shell ring holds {seen} shells, pool holds {}",
                self.shell_count()
            ));
        }
        Ok(())
    }

    fn validate_loops(&self) -> Result<(), ModelError> {
        let mut seen_lus = HashSet::new();
        let mut seen_ets = HashSet::new();
        for shell in self.shell_ids() {
            let lus = self.shell_loop_uses(shell)?;
            for lu in lus {
                if !seen_lus.insert(lu) {
                    return corrupt(format!("loop-use {lu:?} appears in two shells"));
                }
                if self.loop_uses[lu].parent != shell {
                    return corrupt(format!(
                        "loop-use {lu:?} is in shell {shell:?} but names parent {:?}",
                        self.loop_uses[lu].parent
                    ));
                }
                let opp = self.loop_uses[lu].opp;
                match self.dim() {
                    Dim::Two => {
                        if opp != lu || self.loop_uses[lu].face.is_some() {
                            return corrupt(format!("planar loop-use {lu:?} has a face"));
                        }
                    }
                    Dim::Three => {
                        let Some(face) = self.loop_uses[lu].face else {
                            return corrupt(format!("spatial loop-use {lu:?} has no face"));
                        };
                        if opp == lu || self.loop_uses[opp].opp != lu {
                            return corrupt(format!("loop-use {lu:?} is not paired"));
                        }
                        if self.loop_uses[opp].face != Some(face) {
                            return corrupt(format!(
                                "loop-use pair {lu:?}/{opp:?} spans two faces"
                            ));
                        }
                        if !self.faces.contains(face) {
                            return corrupt(format!("loop-use {lu:?} names stale {face:?}"));
                        }
                    }
                }
                self.validate_edge_uses(lu, &mut seen_ets)?;
            }
        }
        if seen_lus.len() != self.loop_use_count() {
            return corrupt(format!(
                "{} loop-uses reachable from shells, pool holds {}",
                seen_lus.len(),
                self.loop_use_count()
            ));
        }
        if seen_ets.len() != self.edge_use_count() {
            return corrupt(format!(
                "{} edge-uses reachable from loops, pool holds {}",
                seen_ets.len(),
                self.edge_use_count()
            ));
        }
        Ok(())
    }

    fn validate_edge_uses(
        &self,
        lu: LoopUseId,
        seen: &mut HashSet<EdgeUseId>,
    ) -> Result<(), ModelError> {
        let ets = self.loop_edge_uses(lu)?;
        for &et in &ets {
            if !seen.insert(et) {
                return corrupt(format!("edge-use {et:?} appears in two loops"));
            }
            let e = self.edge_uses[et];
            if e.parent != lu {
                return corrupt(format!(
                    "edge-use {et:?} is in loop {lu:?} but names parent {:?}",
                    e.parent
                ));
            }
            if self.edge_uses[e.prev].next != et || self.edge_uses[e.next].prev != et {
                return corrupt(format!("edge-use ring broken at {et:?}"));
            }
            if self.edge_uses[e.opp].opp != et {
                return corrupt(format!("edge-use {et:?} is not paired with its opposite"));
            }
            if self.edge_uses[e.opp].edge != e.edge {
                return corrupt(format!("edge-use pair at {et:?} spans two edges"));
            }
            if !self.edges.contains(e.edge) {
                return corrupt(format!("edge-use {et:?} names stale {:?}", e.edge));
            }
            let mut rad = e.rad;
            let mut steps = 0usize;
            while rad != et {
                if self.edge_uses[rad].edge != e.edge {
                    return corrupt(format!("radial cycle at {et:?} crosses edges"));
                }
                if self.edge_use_vertex(rad) != self.edge_use_vertex(et) {
                    return corrupt(format!("radial cycle at {et:?} mixes directions"));
                }
                steps += 1;
                if steps > self.edge_use_count() {
                    return corrupt(format!("radial cycle at {et:?} does not close"));
                }
                rad = self.edge_uses[rad].rad;
            }
            let vu = e.vertex_use;
            if !self.vertex_uses.contains(vu) {
                return corrupt(format!("edge-use {et:?} names stale {vu:?}"));
            }
            if self.vertex_uses[vu].parent != et {
                return corrupt(format!(
                    "vertex-use {vu:?} does not name its edge-use {et:?}"
                ));
            }
        }
        Ok(())
    }

    fn validate_vertices(&self) -> Result<(), ModelError> {
        let mut seen_dus = HashSet::new();
        let mut seen_vus = HashSet::new();
        for v in self.vertex_ids() {
            let fdu = self.vertices[v].disk_use;
            if !self.disk_uses.contains(fdu) {
                return corrupt(format!("vertex {v:?} names stale disk-use {fdu:?}"));
            }
            let mut du = fdu;
            loop {
                if !seen_dus.insert(du) {
                    return corrupt(format!("disk-use {du:?} appears under two vertices"));
                }
                if self.disk_uses[du].vertex != v {
                    return corrupt(format!(
                        "disk-use {du:?} in vertex {v:?} names vertex {:?}",
                        self.disk_uses[du].vertex
                    ));
                }
                if self.disk_uses[self.disk_uses[du].next].prev != du {
                    return corrupt(format!("disk ring broken at {du:?}"));
                }
                let fvu = self.disk_uses[du].vertex_use;
                let mut vu = fvu;
                loop {
                    if !seen_vus.insert(vu) {
                        return corrupt(format!("vertex-use {vu:?} appears on two disks"));
                    }
                    if self.vertex_uses[vu].disk_use != du {
                        return corrupt(format!(
                            "vertex-use {vu:?} on disk {du:?} names disk {:?}",
                            self.vertex_uses[vu].disk_use
                        ));
                    }
                    if self.vertex_uses[self.vertex_uses[vu].next].prev != vu {
                        return corrupt(format!("vertex-use ring broken at {vu:?}"));
                    }
                    vu = self.vertex_uses[vu].next;
                    if vu == fvu {
                        break;
                    }
                }
                du = self.disk_uses[du].next;
                if du == fdu {
                    break;
                }
            }
            if self.match_vertex(self.vertex_d3(v)) != Some(v) {
                return corrupt(format!("vertex {v:?} is not found through the index"));
            }
        }
        if seen_dus.len() != self.disk_use_count() {
            return corrupt(format!(
                "{} disk-uses reachable from vertices, pool holds {}",
                seen_dus.len(),
                self.disk_use_count()
            ));
        }
        if seen_vus.len() != self.vertex_use_count() {
            return corrupt(format!(
                "{} vertex-uses reachable from disks, pool holds {}",
                seen_vus.len(),
                self.vertex_use_count()
            ));
        }
        Ok(())
    }
}
