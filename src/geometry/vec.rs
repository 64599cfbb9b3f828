//! Small fixed-dimension vector types.
//!
//! The kernel keeps its own minimal vectors rather than pulling in a linear
//! algebra crate: the only operations it needs are subtraction, dot and
//! cross products, and two planar predicates (polar-angle ordering and the
//! doubled signed triangle area) used by the edge-matching and radial-edge
//! ordering walks.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 2D double-precision vector / position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DVec2 {
    pub x: f64,
    pub y: f64,
}

/// 3D double-precision vector / position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DVec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 2D integer position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IVec2 {
    pub x: i32,
    pub y: i32,
}

/// 3D integer position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl DVec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, o: Self) -> f64 {
        self.x * o.x + self.y * o.y
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl DVec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, o: Self) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    pub fn cross(self, o: Self) -> Self {
        Self {
            x: self.y * o.z - self.z * o.y,
            y: self.z * o.x - self.x * o.z,
            z: self.x * o.y - self.y * o.x,
        }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or the zero vector if degenerate.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 { self * (1.0 / len) } else { self }
    }

    pub fn xy(self) -> DVec2 {
        DVec2 { x: self.x, y: self.y }
    }
}

impl IVec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl IVec3 {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

macro_rules! impl_vec_ops {
    ($t:ident, $s:ty, { $($f:ident),+ }) => {
        impl Add for $t {
            type Output = $t;
            fn add(self, o: $t) -> $t {
                $t { $($f: self.$f + o.$f),+ }
            }
        }
        impl Sub for $t {
            type Output = $t;
            fn sub(self, o: $t) -> $t {
                $t { $($f: self.$f - o.$f),+ }
            }
        }
        impl Mul<$s> for $t {
            type Output = $t;
            fn mul(self, s: $s) -> $t {
                $t { $($f: self.$f * s),+ }
            }
        }
        impl Neg for $t {
            type Output = $t;
            fn neg(self) -> $t {
                $t { $($f: -self.$f),+ }
            }
        }
    };
}

impl_vec_ops!(DVec2, f64, { x, y });
impl_vec_ops!(DVec3, f64, { x, y, z });
impl_vec_ops!(IVec2, i32, { x, y });
impl_vec_ops!(IVec3, i32, { x, y, z });

/// Quadrant of a planar vector, counting counter-clockwise from the
/// positive x axis. The origin maps to quadrant 0.
fn quadrant(v: DVec2) -> u8 {
    if v.x > 0.0 && v.y >= 0.0 {
        0
    } else if v.x <= 0.0 && v.y > 0.0 {
        1
    } else if v.x < 0.0 && v.y <= 0.0 {
        2
    } else if v.x >= 0.0 && v.y < 0.0 {
        3
    } else {
        0
    }
}

/// Orders two planar vectors by polar angle in `[0, 2*pi)` about the origin,
/// without computing the angles: compare quadrants first, then the sign of
/// the cross product within a quadrant.
pub fn cmp_angle(a: DVec2, b: DVec2) -> Ordering {
    let (qa, qb) = (quadrant(a), quadrant(b));
    if qa != qb {
        return qa.cmp(&qb);
    }
    let cross = a.x * b.y - a.y * b.x;
    if cross > 0.0 {
        Ordering::Less
    } else if cross < 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Twice the signed area of the triangle `a`, `b`, `c`; positive when the
/// vertices run counter-clockwise.
pub fn tri_signed_area2(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_is_right_handed() {
        let x = DVec3::new(1.0, 0.0, 0.0);
        let y = DVec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn angle_order_around_circle() {
        let e = DVec2::new(1.0, 0.0);
        let ne = DVec2::new(1.0, 1.0);
        let n = DVec2::new(0.0, 1.0);
        let w = DVec2::new(-1.0, 0.0);
        let s = DVec2::new(0.0, -1.0);
        assert_eq!(cmp_angle(e, ne), Ordering::Less);
        assert_eq!(cmp_angle(ne, n), Ordering::Less);
        assert_eq!(cmp_angle(n, w), Ordering::Less);
        assert_eq!(cmp_angle(w, s), Ordering::Less);
        assert_eq!(cmp_angle(s, e), Ordering::Greater);
        assert_eq!(cmp_angle(n, n), Ordering::Equal);
    }

    #[test]
    fn signed_area_orientation() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(1.0, 0.0);
        let c = DVec2::new(0.0, 1.0);
        assert!(tri_signed_area2(a, b, c) > 0.0);
        assert!(tri_signed_area2(a, c, b) < 0.0);
    }
}
