//! Triangle references into a shared position buffer and the
//! Möller–Trumbore ray/triangle test.

#![allow(clippy::many_single_char_names)]

use meshpick_math::{point_at, Point3, Real};

use crate::aabb::{Axis, AxisAlignedBox};
use crate::ray::{HitResult, Ray};

/// A triangle of a borrowed mesh.
///
/// Holds the offsets of its three vertices' `x` components in the flat
/// position buffer, plus its ordinal in the index array so hits can be
/// reported in the caller's numbering after the tree has reordered triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleRef {
    offsets: [usize; 3],
    ordinal: usize,
}

impl TriangleRef {
    /// Triangle `ordinal` made of vertices `indices`.
    pub fn new(ordinal: usize, indices: [u32; 3]) -> Self {
        Self {
            offsets: indices.map(|i| i as usize * 3),
            ordinal,
        }
    }

    /// Position of this triangle in the original index array.
    #[inline]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Offsets of the three vertices in the position buffer.
    #[inline]
    pub fn offsets(&self) -> [usize; 3] {
        self.offsets
    }

    /// The three corner positions.
    #[inline]
    pub fn vertices(&self, positions: &[Real]) -> [Point3; 3] {
        self.offsets.map(|o| point_at(positions, o))
    }

    /// Smallest coordinate of the three corners along `axis`.
    #[inline]
    pub fn min_coordinate(&self, positions: &[Real], axis: Axis) -> Real {
        let [a, b, c] = self.offsets.map(|o| positions[o + axis.index()]);
        a.min(b).min(c)
    }

    /// Fold the three corners into `bounds`.
    pub fn grow_bounds(&self, positions: &[Real], bounds: &mut AxisAlignedBox) {
        for v in &self.vertices(positions) {
            bounds.grow_to_include(v);
        }
    }

    /// Test the ray against this triangle, tightening `result` on a closer hit.
    ///
    /// Returns `true` if `result` was overwritten. Hits at or beyond
    /// `result.distance_squared` are ignored, so calling this over any set of
    /// triangles in any order leaves the nearest one in `result`.
    ///
    /// There is no determinant guard: a ray parallel to the triangle's plane or
    /// a zero-area triangle gives `det == 0`, the barycentric terms come out
    /// infinite or NaN, and the acceptance comparisons all fail.
    pub fn intersect(&self, positions: &[Real], ray: &Ray, result: &mut HitResult) -> bool {
        let [v0, v1, v2] = self.vertices(positions);
        let origin = ray.origin();
        let dir = ray.direction();

        let e1 = v1 - v0;
        let e2 = v2 - v0;

        let p = dir.cross(&e2);
        let det = e1.dot(&p);
        let f = 1.0 / det;

        let s = origin - v0;
        let q = s.cross(&e1);

        let t = f * q.dot(&e2);
        let u = f * p.dot(&s);
        let v = f * q.dot(dir);

        if !(u >= 0.0 && v >= 0.0 && u + v <= 1.0 && t >= 0.0) {
            return false;
        }

        let distance_squared = ray.distance_squared_at(t);
        if !(distance_squared < result.distance_squared) {
            return false;
        }

        result.distance_squared = distance_squared;
        result.point = ray.at(t);
        result.normal = e1.cross(&e2).normalize();
        result.triangle = Some(self.ordinal);
        true
    }
}
