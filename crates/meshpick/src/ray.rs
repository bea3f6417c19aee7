//! Ray and hit-record value types.

use meshpick_math::{Point3, Real, Transform, Vec3, Vec4};

/// Squared distance stored in a [`HitResult`] that has not hit anything.
pub const NO_HIT: Real = Real::MAX;

/// A ray in 3D space defined by origin and direction.
///
/// The direction is kept exactly as supplied; it need not be unit length.
/// Distances reported against a ray are always Euclidean, so a ray built from
/// a scaled direction reports the same hits as its normalized twin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vec3,
    /// Componentwise reciprocal of `direction`. Zero components become
    /// signed infinities, which the slab test relies on.
    inv_direction: Vec3,
}

impl Ray {
    /// Create a ray from an origin and a direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z),
        }
    }

    /// Create a ray from homogeneous coordinates as produced by an
    /// unprojection step. The `w` components are ignored.
    pub fn from_homogeneous(origin: &Vec4, direction: &Vec4) -> Self {
        Self::new(
            Point3::new(origin.x, origin.y, origin.z),
            Vec3::new(direction.x, direction.y, direction.z),
        )
    }

    /// Ray starting at `from` and passing through `to` at `t = 1`.
    pub fn from_points(from: Point3, to: Point3) -> Self {
        Self::new(from, to - from)
    }

    /// Origin of the ray.
    #[inline]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Direction of the ray, as supplied.
    #[inline]
    pub fn direction(&self) -> &Vec3 {
        &self.direction
    }

    /// Componentwise reciprocal of the direction.
    #[inline]
    pub fn inv_direction(&self) -> &Vec3 {
        &self.inv_direction
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: Real) -> Point3 {
        self.origin + self.direction * t
    }

    /// Squared Euclidean distance travelled at parameter `t`.
    ///
    /// Scales the direction before squaring, so directions far from unit
    /// length stay within `Real` range.
    #[inline]
    pub fn distance_squared_at(&self, t: Real) -> Real {
        (self.direction * t).norm_squared()
    }

    /// Map the ray through `transform`, e.g. the inverse model matrix to pick
    /// against a mesh in its local space.
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self::new(
            transform.apply_point(&self.origin),
            transform.apply_vec(&self.direction),
        )
    }
}

/// Closest hit found so far by a query.
///
/// Owned by the caller and reusable across queries. It starts out as the
/// no-hit sentinel and is only ever tightened while a query runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Squared distance from the ray origin to `point`; [`NO_HIT`] when empty.
    pub distance_squared: Real,
    /// Hit position in the mesh's coordinate space.
    pub point: Point3,
    /// Unit face normal of the hit triangle, `normalize(e1 × e2)`.
    pub normal: Vec3,
    /// Ordinal of the hit triangle in the index array the tree was built from.
    pub triangle: Option<usize>,
}

impl HitResult {
    /// An empty result.
    pub fn new() -> Self {
        Self {
            distance_squared: NO_HIT,
            point: Point3::origin(),
            normal: Vec3::zeros(),
            triangle: None,
        }
    }

    /// Return to the no-hit state before reuse.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether anything was hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance_squared < NO_HIT
    }

    /// True distance to the hit point.
    pub fn distance(&self) -> Option<Real> {
        self.is_hit().then(|| self.distance_squared.sqrt())
    }
}

impl Default for HitResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        let p = ray.at(1.5);
        assert!((p - Point3::new(1.0, 3.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_direction_is_not_normalized() {
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(ray.direction().z, -3.0);
        assert_eq!(ray.distance_squared_at(1.0), 9.0);
    }

    #[test]
    fn test_distance_squared_at_huge_direction_stays_finite() {
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -1e20));
        assert!((ray.distance_squared_at(2e-20) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_components_invert_to_infinity() {
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, -0.0, 2.0));
        assert_eq!(ray.inv_direction().x, Real::INFINITY);
        assert_eq!(ray.inv_direction().y, Real::NEG_INFINITY);
        assert_eq!(ray.inv_direction().z, 0.5);
    }

    #[test]
    fn test_from_homogeneous_drops_w() {
        let ray = Ray::from_homogeneous(
            &Vec4::new(1.0, 2.0, 3.0, 1.0),
            &Vec4::new(0.0, 0.0, -1.0, 0.0),
        );
        assert_eq!(*ray.origin(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(*ray.direction(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_from_points_reaches_target_at_one() {
        let from = Point3::new(1.0, 1.0, 1.0);
        let to = Point3::new(4.0, 5.0, 1.0);
        let ray = Ray::from_points(from, to);
        assert!((ray.at(1.0) - to).norm() < 1e-6);
        assert_eq!(ray.distance_squared_at(1.0), 25.0);
    }

    #[test]
    fn test_transformed_moves_origin_not_direction() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let moved = ray.transformed(&Transform::translation(1.0, 2.0, 0.0));
        assert!((moved.origin() - Point3::new(1.0, 2.0, 5.0)).norm() < 1e-6);
        assert!((moved.direction() - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_hit_result_starts_empty() {
        let hit = HitResult::default();
        assert!(!hit.is_hit());
        assert_eq!(hit.distance_squared, NO_HIT);
        assert_eq!(hit.distance(), None);
        assert_eq!(hit.triangle, None);
    }

    #[test]
    fn test_hit_result_reset() {
        let mut hit = HitResult::new();
        hit.distance_squared = 4.0;
        hit.triangle = Some(3);
        assert_eq!(hit.distance(), Some(2.0));

        hit.reset();
        assert!(!hit.is_hit());
        assert_eq!(hit, HitResult::new());
    }
}
