//! Model kinds and vertex positions.
//!
//! A model is created for one of four kinds (integral or double precision,
//! planar or spatial) and every vertex stores its position in the matching
//! [`Position`] variant. Internally the kernel computes in double precision:
//! positions are promoted to a canonical [`DVec3`] (planar positions read
//! with `z = 0`) and demoted again on store, rounding to the nearest integer
//! for the integral kinds.

use serde::{Deserialize, Serialize};

use crate::geometry::vec::{DVec2, DVec3, IVec2, IVec3};

/// Dimensionality of a model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dim {
    Two,
    Three,
}

/// The four model kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Planar model with integer vertex positions.
    Int2,
    /// Planar model with double-precision vertex positions.
    Dbl2,
    /// Spatial model with integer vertex positions.
    Int3,
    /// Spatial model with double-precision vertex positions.
    Dbl3,
}

impl ModelKind {
    pub fn dim(self) -> Dim {
        match self {
            ModelKind::Int2 | ModelKind::Dbl2 => Dim::Two,
            ModelKind::Int3 | ModelKind::Dbl3 => Dim::Three,
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(self, ModelKind::Int2 | ModelKind::Int3)
    }

    /// Tag byte used by the model stream.
    pub fn tag(self) -> u8 {
        match self {
            ModelKind::Int2 => 1,
            ModelKind::Dbl2 => 2,
            ModelKind::Int3 => 3,
            ModelKind::Dbl3 => 4,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(ModelKind::Int2),
            2 => Some(ModelKind::Dbl2),
            3 => Some(ModelKind::Int3),
            4 => Some(ModelKind::Dbl3),
            _ => None,
        }
    }
}

/// A stored vertex position, tagged with the model kind it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Position {
    Int2(IVec2),
    Dbl2(DVec2),
    Int3(IVec3),
    Dbl3(DVec3),
}

impl Position {
    /// Demotes a canonical position to the storage form for `kind`.
    /// Integral kinds round to the nearest integer; planar kinds drop `z`.
    pub fn for_kind(kind: ModelKind, p: DVec3) -> Self {
        match kind {
            ModelKind::Int2 => Position::Int2(IVec2::new(round_i32(p.x), round_i32(p.y))),
            ModelKind::Dbl2 => Position::Dbl2(DVec2::new(p.x, p.y)),
            ModelKind::Int3 => {
                Position::Int3(IVec3::new(round_i32(p.x), round_i32(p.y), round_i32(p.z)))
            }
            ModelKind::Dbl3 => Position::Dbl3(p),
        }
    }

    /// Promotes to the canonical double-precision form; planar positions
    /// read with `z = 0`.
    pub fn to_d3(self) -> DVec3 {
        match self {
            Position::Int2(v) => DVec3::new(v.x as f64, v.y as f64, 0.0),
            Position::Dbl2(v) => DVec3::new(v.x, v.y, 0.0),
            Position::Int3(v) => DVec3::new(v.x as f64, v.y as f64, v.z as f64),
            Position::Dbl3(v) => v,
        }
    }

    pub fn to_d2(self) -> DVec2 {
        let p = self.to_d3();
        DVec2::new(p.x, p.y)
    }
}

fn round_i32(v: f64) -> i32 {
    v.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_positions_round() {
        let p = Position::for_kind(ModelKind::Int2, DVec3::new(1.6, -0.5, 9.0));
        assert_eq!(p, Position::Int2(IVec2::new(2, -1)));
    }

    #[test]
    fn planar_promotion_reads_z_zero() {
        let p = Position::for_kind(ModelKind::Dbl2, DVec3::new(3.5, 4.5, 7.0));
        assert_eq!(p.to_d3(), DVec3::new(3.5, 4.5, 0.0));
    }
}
