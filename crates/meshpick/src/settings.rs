//! Build and traversal parameters.

use serde::{Deserialize, Serialize};

use crate::error::{PickError, Result};

/// How a node's triangle range is divided at its midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Fully sort the range on the split axis before halving it.
    Sort,
    /// Select the midpoint in linear time; only the two halves are ordered
    /// relative to each other.
    Select,
}

/// Order in which the two children of an internal node are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// Always descend into `left` first.
    LeftFirst,
    /// Descend first into the child whose box the ray enters sooner.
    NearestFirst,
}

/// Parameters for [`KdTree::build_with`](crate::KdTree::build_with).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdTreeSettings {
    /// Ranges holding at most this many triangles become leaves.
    pub leaf_size: usize,
    /// Midpoint partitioning algorithm.
    pub split: SplitStrategy,
    /// Child visit order during queries.
    pub traversal: TraversalOrder,
}

impl KdTreeSettings {
    /// Default leaf bucket size.
    pub const DEFAULT_LEAF_SIZE: usize = 10;

    /// Check that the settings can build a tree.
    pub fn validate(&self) -> Result<()> {
        if self.leaf_size == 0 {
            return Err(PickError::InvalidSettings(
                "leaf_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for KdTreeSettings {
    fn default() -> Self {
        Self {
            leaf_size: Self::DEFAULT_LEAF_SIZE,
            split: SplitStrategy::Select,
            traversal: TraversalOrder::NearestFirst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = KdTreeSettings::default();
        assert_eq!(settings.leaf_size, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_leaf_size_rejected() {
        let settings = KdTreeSettings {
            leaf_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(PickError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings: KdTreeSettings =
            serde_json::from_str(r#"{ "traversal": "left_first" }"#).unwrap();
        assert_eq!(settings.traversal, TraversalOrder::LeftFirst);
        assert_eq!(settings.leaf_size, KdTreeSettings::DEFAULT_LEAF_SIZE);
        assert_eq!(settings.split, SplitStrategy::Select);
    }

    #[test]
    fn test_json_names_are_snake_case() {
        let json = serde_json::to_string(&KdTreeSettings::default()).unwrap();
        assert!(json.contains(r#""split":"select""#));
        assert!(json.contains(r#""traversal":"nearest_first""#));
    }
}
