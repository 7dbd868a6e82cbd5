//! Random forest over CART trees
//!
//! Each tree is trained on a bootstrap sample (drawn with replacement); the
//! forest predicts by majority vote. With a seed set, tree `i` draws its
//! bootstrap from `seed + i`, so training is fully reproducible.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::{DecisionTree, Matrix, MlError};

/// Bagged ensemble of decision trees with majority voting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_trees: usize,
    max_depth: Option<usize>,
    seed: Option<u64>,
}

impl RandomForest {
    /// Create an untrained forest with the given number of trees
    pub fn new(n_trees: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_trees,
            max_depth: None,
            seed: None,
        }
    }

    /// Limit the depth of every tree
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Seed the bootstrap sampling for reproducible training
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Fit every tree on its own bootstrap sample
    pub fn fit(&mut self, x: &Matrix, y: &[bool]) -> Result<(), MlError> {
        let n_samples = x.n_rows();
        if n_samples != y.len() {
            return Err(MlError::LabelMismatch {
                samples: n_samples,
                labels: y.len(),
            });
        }
        if n_samples == 0 {
            return Err(MlError::EmptyTrainingSet);
        }

        self.trees = Vec::with_capacity(self.n_trees);
        for i in 0..self.n_trees {
            let tree_seed = self.seed.map(|s| s + i as u64);
            let indices = bootstrap_sample(n_samples, tree_seed);

            let bootstrap_x = x.select_rows(&indices);
            let bootstrap_y: Vec<bool> = indices.iter().map(|&idx| y[idx]).collect();

            let mut tree = match self.max_depth {
                Some(depth) => DecisionTree::new().with_max_depth(depth),
                None => DecisionTree::new(),
            };
            tree.fit(&bootstrap_x, &bootstrap_y)?;
            self.trees.push(tree);
        }

        Ok(())
    }

    /// Majority vote over all trees for one aligned feature row
    pub fn predict_row(&self, row: &[f32]) -> Result<bool, MlError> {
        if self.trees.is_empty() {
            return Err(MlError::NotFitted);
        }

        let mut votes_for = 0usize;
        for tree in &self.trees {
            if tree.predict_row(row)? {
                votes_for += 1;
            }
        }
        Ok(2 * votes_for > self.trees.len())
    }

    /// Predict labels for every row of a matrix
    pub fn predict(&self, x: &Matrix) -> Result<Vec<bool>, MlError> {
        (0..x.n_rows()).map(|r| self.predict_row(x.row(r))).collect()
    }

    /// Fraction of trees voting to irrigate, in [0, 1]
    pub fn vote_fraction(&self, row: &[f32]) -> Result<f32, MlError> {
        if self.trees.is_empty() {
            return Err(MlError::NotFitted);
        }

        let mut votes_for = 0usize;
        for tree in &self.trees {
            if tree.predict_row(row)? {
                votes_for += 1;
            }
        }
        Ok(votes_for as f32 / self.trees.len() as f32)
    }
}

/// Sample indices with replacement; a seed makes the draw deterministic
fn bootstrap_sample(n_samples: usize, seed: Option<u64>) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    let mut indices = Vec::with_capacity(n_samples);

    match seed {
        Some(s) => {
            let mut rng = StdRng::seed_from_u64(s);
            for _ in 0..n_samples {
                indices.push(dist.sample(&mut rng));
            }
        }
        None => {
            let mut rng = rand::thread_rng();
            for _ in 0..n_samples {
                indices.push(dist.sample(&mut rng));
            }
        }
    }

    indices
}
