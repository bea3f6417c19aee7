//! k-d tree over the triangles of a static mesh.
//!
//! Nodes live in one arena and refer to their children by index. Each leaf
//! owns a contiguous range of the tree's reordered triangle array, and the
//! leaf ranges partition that array.

use std::cmp::Ordering;

use meshpick_math::{point_at, Real};

use crate::aabb::{Axis, AxisAlignedBox};
use crate::error::{PickError, Result};
use crate::ray::{HitResult, Ray};
use crate::settings::{KdTreeSettings, SplitStrategy, TraversalOrder};
use crate::triangle::TriangleRef;

/// Arena index of the root node.
const ROOT: usize = 0;

/// A k-d tree node - either a leaf holding a triangle range or an internal
/// node with two children.
#[derive(Debug, Clone, PartialEq)]
pub enum KdNode {
    /// Leaf node owning `triangles[start..end]`.
    Leaf {
        /// Box around every vertex of the leaf's triangles.
        bounds: AxisAlignedBox,
        /// First triangle of the range.
        start: usize,
        /// One past the last triangle of the range.
        end: usize,
    },
    /// Internal node with two children.
    Internal {
        /// Box around every triangle below this node.
        bounds: AxisAlignedBox,
        /// Arena index of the left child.
        left: usize,
        /// Arena index of the right child.
        right: usize,
    },
}

impl KdNode {
    /// Bounding box of the node.
    pub fn bounds(&self) -> &AxisAlignedBox {
        match self {
            KdNode::Leaf { bounds, .. } | KdNode::Internal { bounds, .. } => bounds,
        }
    }
}

/// Shape summary of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub nodes: usize,
    /// Number of leaves.
    pub leaves: usize,
    /// Number of nodes on the longest root-to-leaf path.
    pub depth: usize,
    /// Largest leaf triangle count.
    pub max_leaf_len: usize,
}

/// Spatial index answering nearest-hit ray queries against a triangle mesh.
///
/// The position buffer is borrowed for the lifetime of the tree and never
/// copied. The tree is immutable once built and is `Sync`, so one instance can
/// serve queries from many threads; every query keeps its scratch values on
/// its own stack.
#[derive(Debug, Clone)]
pub struct KdTree<'m> {
    positions: &'m [Real],
    triangles: Vec<TriangleRef>,
    nodes: Vec<KdNode>,
    settings: KdTreeSettings,
}

impl<'m> KdTree<'m> {
    /// Build a tree with default settings.
    ///
    /// `positions` holds flat `x, y, z` triples; `indices` holds three vertex
    /// indices per triangle.
    pub fn build(positions: &'m [Real], indices: &[u32]) -> Result<Self> {
        Self::build_with(positions, indices, KdTreeSettings::default())
    }

    /// Build a tree with explicit settings.
    ///
    /// Triangles are reordered internally while splitting; hits report each
    /// triangle's ordinal in `indices`, never its position in the tree.
    pub fn build_with(
        positions: &'m [Real],
        indices: &[u32],
        settings: KdTreeSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let mut triangles = collect_triangles(positions, indices)?;

        let mut nodes = Vec::new();
        if !triangles.is_empty() {
            // Split leaves hold at least half a bucket; this is only a capacity hint.
            nodes.reserve(4 * triangles.len() / settings.leaf_size.max(1) + 1);
            let mut builder = Builder {
                positions,
                triangles: &mut triangles,
                nodes: &mut nodes,
                settings: &settings,
            };
            let len = builder.triangles.len();
            builder.build_node(0, len);
        }

        let tree = Self {
            positions,
            triangles,
            nodes,
            settings,
        };

        if log::log_enabled!(log::Level::Debug) {
            let stats = tree.stats();
            log::debug!(
                "built k-d tree over {} triangles: {} nodes, {} leaves, depth {}, largest leaf {}",
                tree.triangles.len(),
                stats.nodes,
                stats.leaves,
                stats.depth,
                stats.max_leaf_len,
            );
        }

        Ok(tree)
    }

    /// Find the closest triangle hit by `ray`.
    pub fn nearest_hit(&self, ray: &Ray) -> HitResult {
        let mut result = HitResult::new();
        self.nearest_hit_into(ray, &mut result);
        result
    }

    /// Find the closest triangle hit by `ray`, writing into a caller-owned
    /// result. `result` is reset first, so it can be reused across queries.
    ///
    /// Returns whether anything was hit.
    pub fn nearest_hit_into(&self, ray: &Ray, result: &mut HitResult) -> bool {
        result.reset();

        let Some(root) = self.nodes.get(ROOT) else {
            return false;
        };

        let mut visits = 0usize;
        if root.bounds().ray_hit_distance_squared(ray).is_some() {
            self.descend(ROOT, ray, result, &mut visits);
        }

        log::trace!(
            "nearest-hit query visited {visits} of {} nodes, hit: {}",
            self.nodes.len(),
            result.is_hit()
        );
        result.is_hit()
    }

    /// Visit a node whose box the ray is known to reach.
    fn descend(&self, id: usize, ray: &Ray, result: &mut HitResult, visits: &mut usize) {
        *visits += 1;
        match self.nodes[id] {
            KdNode::Leaf { start, end, .. } => {
                for tri in &self.triangles[start..end] {
                    let before = result.distance_squared;
                    tri.intersect(self.positions, ray, result);
                    debug_assert!(result.distance_squared <= before);
                }
            }
            KdNode::Internal { left, right, .. } => {
                let left_d = self.nodes[left].bounds().ray_hit_distance_squared(ray);
                let right_d = self.nodes[right].bounds().ray_hit_distance_squared(ray);

                let mut order = [(left, left_d), (right, right_d)];
                if self.settings.traversal == TraversalOrder::NearestFirst
                    && entry_key(right_d) < entry_key(left_d)
                {
                    order.swap(0, 1);
                }

                for (child, box_d) in order {
                    // A box entered no sooner than the best hit cannot hold a
                    // closer triangle.
                    if let Some(d) = box_d {
                        if !result.is_hit() || d < result.distance_squared {
                            self.descend(child, ray, result, visits);
                        }
                    }
                }
            }
        }
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh had no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The borrowed position buffer.
    pub fn positions(&self) -> &'m [Real] {
        self.positions
    }

    /// Settings the tree was built with.
    pub fn settings(&self) -> &KdTreeSettings {
        &self.settings
    }

    /// Box around the whole mesh, if it has any triangles.
    pub fn bounds(&self) -> Option<&AxisAlignedBox> {
        self.root().map(KdNode::bounds)
    }

    /// Root node, if any.
    pub fn root(&self) -> Option<&KdNode> {
        self.nodes.get(ROOT)
    }

    /// All nodes; children are addressed by index into this slice.
    pub fn nodes(&self) -> &[KdNode] {
        &self.nodes
    }

    /// Triangles in tree order. The order is an artifact of construction.
    pub fn triangles(&self) -> &[TriangleRef] {
        &self.triangles
    }

    /// Every leaf with the triangles it owns.
    pub fn leaves(&self) -> impl Iterator<Item = (&AxisAlignedBox, &[TriangleRef])> + '_ {
        self.nodes.iter().filter_map(move |node| match node {
            KdNode::Leaf { bounds, start, end } => Some((bounds, &self.triangles[*start..*end])),
            KdNode::Internal { .. } => None,
        })
    }

    /// Shape summary.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            nodes: self.nodes.len(),
            ..Default::default()
        };
        for (_, tris) in self.leaves() {
            stats.leaves += 1;
            stats.max_leaf_len = stats.max_leaf_len.max(tris.len());
        }
        if !self.nodes.is_empty() {
            stats.depth = self.depth_below(ROOT);
        }
        stats
    }

    fn depth_below(&self, id: usize) -> usize {
        match self.nodes[id] {
            KdNode::Leaf { .. } => 1,
            KdNode::Internal { left, right, .. } => {
                1 + self.depth_below(left).max(self.depth_below(right))
            }
        }
    }
}

/// Sort key for a child's box entry distance; misses go last.
#[inline]
fn entry_key(d: Option<Real>) -> Real {
    d.unwrap_or(Real::INFINITY)
}

/// Validate the mesh arrays and materialize one reference per triangle.
fn collect_triangles(positions: &[Real], indices: &[u32]) -> Result<Vec<TriangleRef>> {
    if positions.len() % 3 != 0 {
        return Err(PickError::PositionCountNotMultipleOfThree(positions.len()));
    }
    if indices.len() % 3 != 0 {
        return Err(PickError::IndexCountNotMultipleOfThree(indices.len()));
    }

    let vertex_count = positions.len() / 3;
    indices
        .chunks_exact(3)
        .enumerate()
        .map(|(ordinal, tri)| {
            let corners = [tri[0], tri[1], tri[2]];
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(PickError::IndexOutOfRange {
                    triangle: ordinal,
                    index,
                    vertex_count,
                });
            }
            Ok(TriangleRef::new(ordinal, corners))
        })
        .collect()
}

/// Top-down construction state.
struct Builder<'a> {
    positions: &'a [Real],
    triangles: &'a mut [TriangleRef],
    nodes: &'a mut Vec<KdNode>,
    settings: &'a KdTreeSettings,
}

impl Builder<'_> {
    /// Build the subtree over `triangles[start..end]` (non-empty) and return
    /// its arena index.
    fn build_node(&mut self, start: usize, end: usize) -> usize {
        let bounds = self.range_bounds(start, end);
        let id = self.nodes.len();

        let len = end - start;
        if len <= self.settings.leaf_size {
            self.nodes.push(KdNode::Leaf { bounds, start, end });
            return id;
        }

        let axis = bounds.longest_axis();
        let half = len / 2;
        partition(
            self.positions,
            self.settings.split,
            &mut self.triangles[start..end],
            half,
            axis,
        );

        // Reserve the slot; children are filled in below.
        self.nodes.push(KdNode::Internal {
            bounds,
            left: id,
            right: id,
        });
        let left = self.build_node(start, start + half);
        let right = self.build_node(start + half, end);
        self.nodes[id] = KdNode::Internal {
            bounds,
            left,
            right,
        };
        id
    }

    /// Box seeded from the first vertex of the range and grown over the rest.
    fn range_bounds(&self, start: usize, end: usize) -> AxisAlignedBox {
        let range = &self.triangles[start..end];
        let seed = point_at(self.positions, range[0].offsets()[0]);
        let mut bounds = AxisAlignedBox::from_point(seed);
        for tri in range {
            tri.grow_bounds(self.positions, &mut bounds);
        }
        bounds
    }
}

/// Put the `half` triangles with the smallest minimum coordinate on `axis` at
/// the front of `range`.
///
/// Ties on the coordinate fall back to the triangle ordinal, so both
/// strategies choose the same two halves.
fn partition(
    positions: &[Real],
    split: SplitStrategy,
    range: &mut [TriangleRef],
    half: usize,
    axis: Axis,
) {
    let cmp = |a: &TriangleRef, b: &TriangleRef| -> Ordering {
        a.min_coordinate(positions, axis)
            .total_cmp(&b.min_coordinate(positions, axis))
            .then(a.ordinal().cmp(&b.ordinal()))
    };
    match split {
        SplitStrategy::Sort => range.sort_by(cmp),
        SplitStrategy::Select => {
            range.select_nth_unstable_by(half, cmp);
        }
    }
}
