//! Axis-aligned bounding boxes and per-shell bounds.
//!
//! Every shell keeps an axis-aligned bounding box in the model's storage
//! precision. The boxes are grow-only under construction: widening on
//! vertex insertion is exact, but deletion never shrinks them (recompute
//! with [`crate::topology::model::Model`] when exact bounds matter after
//! deletion).

use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use crate::geometry::position::ModelKind;
use crate::geometry::vec::DVec3;

/// Planar axis-aligned box.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox2<T> {
    pub x_min: T,
    pub y_min: T,
    pub x_max: T,
    pub y_max: T,
}

/// Spatial axis-aligned box.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox3<T> {
    pub x_min: T,
    pub y_min: T,
    pub z_min: T,
    pub x_max: T,
    pub y_max: T,
    pub z_max: T,
}

impl<T: Copy + PartialOrd> BBox2<T> {
    pub fn from_point(x: T, y: T) -> Self {
        Self { x_min: x, y_min: y, x_max: x, y_max: y }
    }

    pub fn include(&mut self, x: T, y: T) {
        if x < self.x_min {
            self.x_min = x;
        }
        if y < self.y_min {
            self.y_min = y;
        }
        if x > self.x_max {
            self.x_max = x;
        }
        if y > self.y_max {
            self.y_max = y;
        }
    }
}

impl<T: Copy + PartialOrd> BBox3<T> {
    pub fn from_point(x: T, y: T, z: T) -> Self {
        Self { x_min: x, y_min: y, z_min: z, x_max: x, y_max: y, z_max: z }
    }

    pub fn include(&mut self, x: T, y: T, z: T) {
        if x < self.x_min {
            self.x_min = x;
        }
        if y < self.y_min {
            self.y_min = y;
        }
        if z < self.z_min {
            self.z_min = z;
        }
        if x > self.x_max {
            self.x_max = x;
        }
        if y > self.y_max {
            self.y_max = y;
        }
        if z > self.z_max {
            self.z_max = z;
        }
    }
}

impl<T: Copy + NumCast> BBox3<T> {
    /// Widens to double precision; lossless for the i32 boxes used here.
    pub fn to_f64(&self) -> BBox3<f64> {
        BBox3 {
            x_min: cast(self.x_min),
            y_min: cast(self.y_min),
            z_min: cast(self.z_min),
            x_max: cast(self.x_max),
            y_max: cast(self.y_max),
            z_max: cast(self.z_max),
        }
    }
}

impl BBox3<f64> {
    /// Volume of the box; zero-thickness boxes have zero volume.
    pub fn volume(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min) * (self.z_max - self.z_min)
    }
}

fn cast<T: NumCast>(v: T) -> f64 {
    NumCast::from(v).unwrap_or(f64::NAN)
}

/// Bounding box of one shell, in the model's storage precision.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShellBounds {
    Int2(BBox2<i32>),
    Dbl2(BBox2<f64>),
    Int3(BBox3<i32>),
    Dbl3(BBox3<f64>),
}

impl ShellBounds {
    /// Tight box of `pts` in the storage precision of `kind`. Integer
    /// bounds truncate toward zero, as the stored boxes always have.
    ///
    /// `pts` must be non-empty; a zero point seeds the box otherwise.
    pub fn from_points(kind: ModelKind, pts: &[DVec3]) -> Self {
        let first = pts.first().copied().unwrap_or(DVec3::new(0.0, 0.0, 0.0));
        let mut bounds = Self::from_point(kind, first);
        for p in &pts[1.min(pts.len())..] {
            bounds.include_point(*p);
        }
        bounds
    }

    fn from_point(kind: ModelKind, p: DVec3) -> Self {
        match kind {
            ModelKind::Int2 => ShellBounds::Int2(BBox2::from_point(p.x as i32, p.y as i32)),
            ModelKind::Dbl2 => ShellBounds::Dbl2(BBox2::from_point(p.x, p.y)),
            ModelKind::Int3 => {
                ShellBounds::Int3(BBox3::from_point(p.x as i32, p.y as i32, p.z as i32))
            }
            ModelKind::Dbl3 => ShellBounds::Dbl3(BBox3::from_point(p.x, p.y, p.z)),
        }
    }

    /// Widens the box to cover `p`.
    pub fn include_point(&mut self, p: DVec3) {
        match self {
            ShellBounds::Int2(b) => b.include(p.x as i32, p.y as i32),
            ShellBounds::Dbl2(b) => b.include(p.x, p.y),
            ShellBounds::Int3(b) => b.include(p.x as i32, p.y as i32, p.z as i32),
            ShellBounds::Dbl3(b) => b.include(p.x, p.y, p.z),
        }
    }

    /// Widens the box to cover another shell's box.
    pub fn include_bounds(&mut self, other: &ShellBounds) {
        let o = other.to_d3();
        self.include_point(DVec3::new(o.x_min, o.y_min, o.z_min));
        self.include_point(DVec3::new(o.x_max, o.y_max, o.z_max));
    }

    /// Canonical double-precision box; planar boxes read with `z = [0, 0]`.
    pub fn to_d3(&self) -> BBox3<f64> {
        match self {
            ShellBounds::Int2(b) => BBox3 {
                x_min: b.x_min as f64,
                y_min: b.y_min as f64,
                z_min: 0.0,
                x_max: b.x_max as f64,
                y_max: b.y_max as f64,
                z_max: 0.0,
            },
            ShellBounds::Dbl2(b) => BBox3 {
                x_min: b.x_min,
                y_min: b.y_min,
                z_min: 0.0,
                x_max: b.x_max,
                y_max: b.y_max,
                z_max: 0.0,
            },
            ShellBounds::Int3(b) => b.to_f64(),
            ShellBounds::Dbl3(b) => *b,
        }
    }

    /// Volume used to pick the surviving shell when two shells join.
    pub fn volume(&self) -> f64 {
        self.to_d3().volume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bounds_truncate() {
        let b = ShellBounds::from_points(
            ModelKind::Int3,
            &[DVec3::new(0.9, -0.9, 2.5), DVec3::new(3.1, 4.0, 1.0)],
        );
        assert_eq!(
            b,
            ShellBounds::Int3(BBox3 { x_min: 0, y_min: 0, z_min: 1, x_max: 3, y_max: 4, z_max: 2 })
        );
    }

    #[test]
    fn planar_volume_is_zero() {
        let b = ShellBounds::from_points(
            ModelKind::Dbl2,
            &[DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, 3.0, 0.0)],
        );
        assert_eq!(b.volume(), 0.0);
    }
}
