//! Axis-aligned bounding boxes and the ray/box slab test.

use meshpick_math::{Point3, Real};

use crate::ray::Ray;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All axes in tie-break order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis-aligned bounding box in 3D.
///
/// `min <= max` holds on every axis; the fields are private so only the
/// constructors and [`grow_to_include`](Self::grow_to_include) can change them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAlignedBox {
    min: Point3,
    max: Point3,
}

impl AxisAlignedBox {
    /// Box spanning two opposite corners, given in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::from(a.coords.inf(&b.coords)),
            max: Point3::from(a.coords.sup(&b.coords)),
        }
    }

    /// Degenerate box containing only `p`.
    pub fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// Collapse the box onto the point `(x, y, z)`.
    pub fn reset(&mut self, x: Real, y: Real, z: Real) {
        self.reset_to(Point3::new(x, y, z));
    }

    /// Collapse the box onto `p`.
    pub fn reset_to(&mut self, p: Point3) {
        self.min = p;
        self.max = p;
    }

    /// Widen the box just enough to contain `p`.
    pub fn grow_to_include(&mut self, p: &Point3) {
        for i in 0..3 {
            if p[i] < self.min[i] {
                self.min[i] = p[i];
            } else if p[i] > self.max[i] {
                self.max[i] = p[i];
            }
        }
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> &Point3 {
        &self.min
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> &Point3 {
        &self.max
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Size of the box along `axis`.
    #[inline]
    pub fn extent(&self, axis: Axis) -> Real {
        self.max[axis.index()] - self.min[axis.index()]
    }

    /// Axis of greatest extent.
    ///
    /// X wins only if strictly longer than both others, then Y likewise;
    /// every remaining tie resolves to Z.
    pub fn longest_axis(&self) -> Axis {
        let (x, y, z) = (self.extent(Axis::X), self.extent(Axis::Y), self.extent(Axis::Z));
        if x > y && x > z {
            Axis::X
        } else if y > x && y > z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Whether `(x, y, z)` lies inside the box, faces included.
    pub fn contains(&self, x: Real, y: Real, z: Real) -> bool {
        x >= self.min.x
            && x <= self.max.x
            && y >= self.min.y
            && y <= self.max.y
            && z >= self.min.z
            && z <= self.max.z
    }

    /// Whether `p` lies inside the box, faces included.
    #[inline]
    pub fn contains_point(&self, p: &Point3) -> bool {
        self.contains(p.x, p.y, p.z)
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &AxisAlignedBox) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// Squared distance from the ray origin to where the ray enters the box.
    ///
    /// Returns `Some(0.0)` if the origin is already inside (or on the surface
    /// of) the box, and `None` if the ray misses the box or the box lies
    /// entirely behind the origin.
    ///
    /// Axis-parallel rays are handled through the infinite reciprocal
    /// direction. When the origin also lies exactly on a slab plane the product
    /// is NaN; `Real::max`/`Real::min` ignore NaN, so that slab leaves the
    /// running interval unbounded, which is right for a point on the boundary.
    pub fn ray_hit_distance_squared(&self, ray: &Ray) -> Option<Real> {
        let origin = ray.origin();
        if self.contains_point(origin) {
            return Some(0.0);
        }

        let inv = ray.inv_direction();
        let mut t_min = Real::NEG_INFINITY;
        let mut t_max = Real::INFINITY;

        for i in 0..3 {
            let mut near = (self.min[i] - origin[i]) * inv[i];
            let mut far = (self.max[i] - origin[i]) * inv[i];
            if inv[i] < 0.0 {
                std::mem::swap(&mut near, &mut far);
            }

            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }

        // Infinite entry only happens for a zero direction.
        if t_min > 0.0 && t_min.is_finite() {
            Some(ray.distance_squared_at(t_min))
        } else {
            None
        }
    }
}
