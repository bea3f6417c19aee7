#![warn(missing_docs)]

//! Nearest-hit ray picking against static triangle meshes.
//!
//! This crate builds a k-d tree over a borrowed triangle soup once and then
//! answers "which triangle does this ray hit first, and where?" for mouse
//! picking, collision probes and similar queries.
//!
//! # Architecture
//!
//! - [`AxisAlignedBox`] - Box extents and the ray/box slab test
//! - [`Ray`] / [`HitResult`] - Query input and the caller-owned closest hit
//! - [`TriangleRef`] - Triangle offsets into the shared position buffer and
//!   the Möller–Trumbore test
//! - [`KdTree`] - Construction and pruned nearest-hit traversal
//! - [`KdTreeSettings`] - Leaf size, split strategy and visit order
//!
//! # Example
//!
//! ```
//! use meshpick::{KdTree, Ray};
//! use meshpick_math::{Point3, Vec3};
//!
//! let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
//! let indices = [0, 1, 2];
//! let tree = KdTree::build(&positions, &indices)?;
//!
//! let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));
//! let hit = tree.nearest_hit(&ray);
//! assert!(hit.is_hit());
//! assert_eq!(hit.triangle, Some(0));
//! # Ok::<(), meshpick::PickError>(())
//! ```

pub mod aabb;
pub mod error;
mod ray;
pub mod settings;
pub mod tree;
pub mod triangle;

pub use aabb::{Axis, AxisAlignedBox};
pub use error::{PickError, Result};
pub use ray::{HitResult, Ray, NO_HIT};
pub use settings::{KdTreeSettings, SplitStrategy, TraversalOrder};
pub use tree::{KdNode, KdTree, TreeStats};
pub use triangle::TriangleRef;
