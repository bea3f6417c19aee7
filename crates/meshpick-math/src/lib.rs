#![warn(missing_docs)]

//! Math types for meshpick.
//!
//! Thin aliases over nalgebra in single precision, matching the `f32`
//! vertex buffers the index borrows, plus a homogeneous 4x4 transform for
//! moving rays between world space and mesh space.

use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// Scalar type used for all geometry.
pub type Real = f32;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<Real>;

/// A vector in 3D space.
pub type Vec3 = Vector3<Real>;

/// A homogeneous 4-component vector (`w = 1` for points, `w = 0` for directions).
pub type Vec4 = Vector4<Real>;

/// Read the point stored at `offset` in a flat `x, y, z` position buffer.
///
/// `offset` is the index of the `x` component, i.e. `vertex_index * 3`.
#[inline]
pub fn point_at(positions: &[Real], offset: usize) -> Point3 {
    Point3::new(positions[offset], positions[offset + 1], positions[offset + 2])
}

/// A 4x4 affine transformation matrix acting on homogeneous coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The underlying column-major 4x4 matrix.
    pub matrix: Matrix4<Real>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Wrap an existing matrix, e.g. a model matrix handed over by a scene graph.
    pub fn from_matrix(matrix: Matrix4<Real>) -> Self {
        Self { matrix }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: Real, dy: Real, dz: Real) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vec3::new(dx, dy, dz)),
        }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: Real, sy: Real, sz: Real) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz)),
        }
    }

    /// Rotation of `angle` radians about `axis` through the origin.
    pub fn rotation(axis: &Vec3, angle: Real) -> Self {
        Self {
            matrix: Matrix4::from_axis_angle(&Unit::new_normalize(*axis), angle),
        }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// Applying the result to `p` computes `self(other(p))`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Multiply a homogeneous vector.
    #[inline]
    pub fn apply_homogeneous(&self, v: &Vec4) -> Vec4 {
        self.matrix * v
    }

    /// Transform a point (`w = 1`).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.apply_homogeneous(&p.to_homogeneous());
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction (`w = 0`); translation does not apply.
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.apply_homogeneous(&v.push(0.0));
        Vec3::new(r.x, r.y, r.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
