//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use meshpick::{HitResult, Ray, TriangleRef};
use meshpick_math::{Point3, Real, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Flat position and index buffers.
pub struct Mesh {
    pub positions: Vec<Real>,
    pub indices: Vec<u32>,
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn point_in(rng: &mut StdRng, half: Real) -> Point3 {
    Point3::new(
        rng.random_range(-half..half),
        rng.random_range(-half..half),
        rng.random_range(-half..half),
    )
}

/// `count` independent triangles scattered through a 20-unit cube, each
/// spanning up to 4 units. No vertex is shared.
pub fn random_soup(rng: &mut StdRng, count: usize) -> Mesh {
    let mut positions = Vec::with_capacity(count * 9);
    let mut indices = Vec::with_capacity(count * 3);
    for i in 0..count {
        let center = point_in(rng, 10.0);
        for _ in 0..3 {
            let v = center + point_in(rng, 2.0).coords;
            positions.extend_from_slice(&[v.x, v.y, v.z]);
        }
        let base = (i * 3) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    Mesh { positions, indices }
}

/// A `n` x `n` grid of quads in the z = 0 plane, two triangles each, with
/// shared vertices.
pub fn grid(n: u32) -> Mesh {
    let mut positions = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            positions.extend_from_slice(&[i as Real, j as Real, 0.0]);
        }
    }
    let mut indices = Vec::new();
    let row = n + 1;
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            indices.extend_from_slice(&[a, a + 1, a + row + 1, a, a + row + 1, a + row]);
        }
    }
    Mesh { positions, indices }
}

/// Rays from outside the soup aimed at points inside it, with non-unit
/// directions, plus some starting in its interior.
pub fn random_rays(rng: &mut StdRng, count: usize) -> Vec<Ray> {
    (0..count)
        .map(|i| {
            let target = point_in(rng, 9.0);
            let origin = if i % 4 == 0 {
                point_in(rng, 8.0)
            } else {
                let dir = point_in(rng, 1.0).coords;
                let dir = if dir.norm() < 1e-3 { Vec3::x() } else { dir.normalize() };
                Point3::from(dir * 30.0)
            };
            let scale: Real = rng.random_range(0.1..5.0);
            Ray::new(origin, (target - origin) * scale)
        })
        .collect()
}

/// Exhaustive scan in index-array order.
pub fn brute_force(mesh: &Mesh, ray: &Ray) -> HitResult {
    let mut best = HitResult::new();
    for (ordinal, tri) in mesh.indices.chunks_exact(3).enumerate() {
        TriangleRef::new(ordinal, [tri[0], tri[1], tri[2]]).intersect(&mesh.positions, ray, &mut best);
    }
    best
}
