//! Error types for index construction.

use thiserror::Error;

/// Errors that can occur while building a [`KdTree`](crate::KdTree).
///
/// Queries never fail; a ray that hits nothing yields a no-hit
/// [`HitResult`](crate::HitResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    /// Index array does not describe whole triangles.
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotMultipleOfThree(usize),

    /// Position array does not hold whole `x, y, z` triples.
    #[error("position count {0} is not a multiple of 3")]
    PositionCountNotMultipleOfThree(usize),

    /// A triangle references a vertex past the end of the position array.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Ordinal of the offending triangle.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the position array.
        vertex_count: usize,
    },

    /// Build settings are unusable.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, PickError>;
