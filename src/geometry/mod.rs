//! Geometric value types and tolerance predicates.

pub mod bbox;
pub mod position;
pub mod vec;

use std::cmp::Ordering;

pub use bbox::{BBox2, BBox3, ShellBounds};
pub use position::{Dim, ModelKind, Position};
pub use vec::{DVec2, DVec3, IVec2, IVec3, cmp_angle, tri_signed_area2};

/// Absolute tolerance within which two positions name the same vertex.
pub const TOLERANCE: f64 = 1.0e-6;

/// Tolerance-aware lexicographic order of planar positions, most
/// significant coordinate last-axis first (`y` then `x`). Positions within
/// [`TOLERANCE`] on every axis compare equal; the vertex index relies on
/// this order for its sorted hash chains.
pub fn cmp_tol2(a: DVec2, b: DVec2) -> Ordering {
    cmp_axis(a.y, b.y).then_with(|| cmp_axis(a.x, b.x))
}

/// Tolerance-aware lexicographic order of spatial positions (`z`, `y`, `x`).
pub fn cmp_tol3(a: DVec3, b: DVec3) -> Ordering {
    cmp_axis(a.z, b.z)
        .then_with(|| cmp_axis(a.y, b.y))
        .then_with(|| cmp_axis(a.x, b.x))
}

fn cmp_axis(a: f64, b: f64) -> Ordering {
    if a < b - TOLERANCE {
        Ordering::Less
    } else if a > b + TOLERANCE {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}
