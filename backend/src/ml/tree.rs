//! CART decision tree for the binary irrigation label
//!
//! Splits minimize weighted Gini impurity; thresholds are midpoints between
//! consecutive distinct feature values. Recursion works on index slices so
//! no feature data is copied while building.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Matrix, MlError};

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        label: bool,
        samples: usize,
    },
}

/// Decision tree classifier over a binary label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<TreeNode>,
    max_depth: Option<usize>,
    n_features: Option<usize>,
}

impl DecisionTree {
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            n_features: None,
        }
    }

    /// Limit tree depth; the root is depth 0
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Fit the tree to training data
    pub fn fit(&mut self, x: &Matrix, y: &[bool]) -> Result<(), MlError> {
        let (n_rows, n_cols) = x.shape();
        if n_rows != y.len() {
            return Err(MlError::LabelMismatch {
                samples: n_rows,
                labels: y.len(),
            });
        }
        if n_rows == 0 {
            return Err(MlError::EmptyTrainingSet);
        }

        let indices: Vec<usize> = (0..n_rows).collect();
        self.n_features = Some(n_cols);
        self.root = Some(build_node(x, y, &indices, 0, self.max_depth));
        Ok(())
    }

    /// Predict the label for one aligned feature row
    pub fn predict_row(&self, row: &[f32]) -> Result<bool, MlError> {
        let root = self.root.as_ref().ok_or(MlError::NotFitted)?;
        if let Some(expected) = self.n_features {
            if row.len() != expected {
                return Err(MlError::FeatureMismatch {
                    expected,
                    actual: row.len(),
                });
            }
        }

        let mut node = root;
        loop {
            match node {
                TreeNode::Leaf { label, .. } => return Ok(*label),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Predict labels for every row of a matrix
    pub fn predict(&self, x: &Matrix) -> Result<Vec<bool>, MlError> {
        (0..x.n_rows()).map(|r| self.predict_row(x.row(r))).collect()
    }

    /// Tree depth; a lone leaf has depth 0
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, node_depth)
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

fn node_depth(node: &TreeNode) -> usize {
    match node {
        TreeNode::Leaf { .. } => 0,
        TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
    }
}

/// Gini impurity of a binary class distribution
fn gini(n_true: usize, n_false: usize) -> f32 {
    let n = (n_true + n_false) as f32;
    if n == 0.0 {
        return 0.0;
    }
    let p_true = n_true as f32 / n;
    let p_false = n_false as f32 / n;
    1.0 - p_true * p_true - p_false * p_false
}

fn count_true(y: &[bool], indices: &[usize]) -> usize {
    indices.iter().filter(|&&i| y[i]).count()
}

fn majority(y: &[bool], indices: &[usize]) -> bool {
    // Ties resolve to false, the no-action decision.
    2 * count_true(y, indices) > indices.len()
}

fn leaf(y: &[bool], indices: &[usize]) -> TreeNode {
    TreeNode::Leaf {
        label: majority(y, indices),
        samples: indices.len(),
    }
}

fn build_node(
    x: &Matrix,
    y: &[bool],
    indices: &[usize],
    depth: usize,
    max_depth: Option<usize>,
) -> TreeNode {
    let n_true = count_true(y, indices);

    // Pure node
    if n_true == 0 || n_true == indices.len() {
        return TreeNode::Leaf {
            label: n_true == indices.len(),
            samples: indices.len(),
        };
    }

    // Depth limit
    if let Some(max_d) = max_depth {
        if depth >= max_d {
            return leaf(y, indices);
        }
    }

    let Some((feature, threshold)) = best_split(x, y, indices) else {
        return leaf(y, indices);
    };

    let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| x.get(i, feature) <= threshold);

    if left_indices.is_empty() || right_indices.is_empty() {
        return leaf(y, indices);
    }

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build_node(x, y, &left_indices, depth + 1, max_depth)),
        right: Box::new(build_node(x, y, &right_indices, depth + 1, max_depth)),
    }
}

/// Best (feature, threshold) over all features, or None when no split gains
fn best_split(x: &Matrix, y: &[bool], indices: &[usize]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32, f32)> = None;

    for feature in 0..x.n_cols() {
        if let Some((threshold, gain)) = best_split_for_feature(x, y, indices, feature) {
            if best.map_or(true, |(_, _, best_gain)| gain > best_gain) {
                best = Some((feature, threshold, gain));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

/// Best threshold for one feature via a single sorted sweep
fn best_split_for_feature(
    x: &Matrix,
    y: &[bool],
    indices: &[usize],
    feature: usize,
) -> Option<(f32, f32)> {
    let n = indices.len();
    if n < 2 {
        return None;
    }

    let mut order = indices.to_vec();
    order.sort_by(|&a, &b| {
        x.get(a, feature)
            .partial_cmp(&x.get(b, feature))
            .unwrap_or(Ordering::Equal)
    });

    let total_true = count_true(y, &order);
    let parent_impurity = gini(total_true, n - total_true);

    let mut left_true = 0usize;
    let mut best: Option<(f32, f32)> = None;

    for split_at in 1..n {
        if y[order[split_at - 1]] {
            left_true += 1;
        }

        let prev = x.get(order[split_at - 1], feature);
        let next = x.get(order[split_at], feature);
        if next <= prev {
            continue;
        }

        let left_n = split_at;
        let right_n = n - split_at;
        let right_true = total_true - left_true;

        let weighted = (left_n as f32 / n as f32) * gini(left_true, left_n - left_true)
            + (right_n as f32 / n as f32) * gini(right_true, right_n - right_true);
        let gain = parent_impurity - weighted;

        if gain > 0.0 && best.map_or(true, |(_, best_gain)| gain > best_gain) {
            best = Some(((prev + next) / 2.0, gain));
        }
    }

    best
}
