//! Regression trees for the boosting ensemble
//!
//! CART-style least-squares trees over a flat node arena. Trees are fit on
//! the boosting residuals; leaf values start as residual means and are
//! replaced by Newton estimates by the ensemble after fitting.

use serde::{Deserialize, Serialize};

use super::matrix::FeatureMatrix;

/// A tree node in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Terminal node carrying the prediction value
    Leaf {
        /// Prediction value
        value: f64,
    },
    /// Internal binary split: `feature <= threshold` goes left
    Split {
        /// Column index into the feature matrix
        feature: usize,
        /// Split threshold (midpoint between adjacent sorted values)
        threshold: f64,
        /// Arena index of the left child
        left: usize,
        /// Arena index of the right child
        right: usize,
    },
}

/// Structural limits for tree growth
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    /// Maximum depth; the root is depth 0
    pub max_depth: usize,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
    /// Minimum samples each child must keep
    pub min_samples_leaf: usize,
}

/// A fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl RegressionTree {
    /// Fit a least-squares tree to `targets` over the given rows
    ///
    /// Squared-error reductions of the chosen splits are accumulated into
    /// `importance`, indexed by feature column.
    #[must_use]
    pub fn fit(
        matrix: &FeatureMatrix,
        targets: &[f64],
        rows: &[usize],
        params: &TreeParams,
        importance: &mut [f64],
    ) -> Self {
        let mut nodes = vec![Node::Leaf { value: 0.0 }];
        let mut work = vec![(0usize, rows.to_vec(), 0usize)];

        while let Some((slot, node_rows, depth)) = work.pop() {
            let mean = mean_target(targets, &node_rows);

            if depth >= params.max_depth || node_rows.len() < params.min_samples_split {
                nodes[slot] = Node::Leaf { value: mean };
                continue;
            }

            let Some(best) = find_best_split(matrix, targets, &node_rows, params) else {
                nodes[slot] = Node::Leaf { value: mean };
                continue;
            };

            importance[best.feature] += best.gain;

            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = node_rows
                .iter()
                .copied()
                .partition(|&r| matrix.value(r, best.feature) <= best.threshold);

            let left = nodes.len();
            nodes.push(Node::Leaf { value: 0.0 });
            let right = nodes.len();
            nodes.push(Node::Leaf { value: 0.0 });

            nodes[slot] = Node::Split {
                feature: best.feature,
                threshold: best.threshold,
                left,
                right,
            };
            work.push((left, left_rows, depth + 1));
            work.push((right, right_rows, depth + 1));
        }

        Self { nodes }
    }

    /// Arena index of the leaf this row lands in
    #[must_use]
    pub fn leaf_index(&self, matrix: &FeatureMatrix, row: usize) -> usize {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { .. } => return idx,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if matrix.value(row, *feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Predicted value for one row
    #[must_use]
    pub fn predict_row(&self, matrix: &FeatureMatrix, row: usize) -> f64 {
        match &self.nodes[self.leaf_index(matrix, row)] {
            Node::Leaf { value } => *value,
            Node::Split { .. } => unreachable!("leaf_index always lands on a leaf"),
        }
    }

    /// Overwrite the value of a leaf node
    pub fn set_leaf_value(&mut self, leaf: usize, value: f64) {
        if let Node::Leaf { value: v } = &mut self.nodes[leaf] {
            *v = value;
        }
    }
}

fn mean_target(targets: &[f64], rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|&r| targets[r]).sum::<f64>() / rows.len() as f64
}

/// Exhaustive best least-squares split over all features
fn find_best_split(
    matrix: &FeatureMatrix,
    targets: &[f64],
    rows: &[usize],
    params: &TreeParams,
) -> Option<BestSplit> {
    let n = rows.len();
    let total_sum: f64 = rows.iter().map(|&r| targets[r]).sum();
    let total_sq: f64 = rows.iter().map(|&r| targets[r] * targets[r]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n as f64;

    let mut best: Option<BestSplit> = None;

    for feature in 0..matrix.n_features() {
        let mut pairs: Vec<(f64, f64)> = rows
            .iter()
            .map(|&r| (matrix.value(r, feature), targets[r]))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 1..n {
            left_sum += pairs[i - 1].1;
            left_sq += pairs[i - 1].1 * pairs[i - 1].1;

            // Can only split between distinct feature values
            if pairs[i].0 <= pairs[i - 1].0 {
                continue;
            }
            if i < params.min_samples_leaf || n - i < params.min_samples_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let left_sse = left_sq - left_sum * left_sum / i as f64;
            let right_sse = right_sq - right_sum * right_sum / (n - i) as f64;
            let gain = parent_sse - left_sse - right_sse;

            if gain > 1e-12 && best.as_ref().is_none_or(|b| gain > b.gain) {
                best = Some(BestSplit {
                    feature,
                    threshold: (pairs[i - 1].0 + pairs[i].0) / 2.0,
                    gain,
                });
            }
        }
    }

    best
}
