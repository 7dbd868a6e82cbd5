//! Row-major feature matrix

use serde::{Deserialize, Serialize};

use super::MlError;

/// Dense row-major matrix of f32 features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Build from a flat row-major buffer
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, MlError> {
        if data.len() != rows * cols {
            return Err(MlError::DimensionMismatch);
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from per-sample rows; every row must have the same width
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, MlError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_cols) {
            return Err(MlError::DimensionMismatch);
        }
        let data = rows.iter().flatten().copied().collect();
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// (n_rows, n_cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// One sample as a slice
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Copy out the rows at the given indices, preserving order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &idx in indices {
            data.extend_from_slice(self.row(idx));
        }
        Self {
            rows: indices.len(),
            cols: self.cols,
            data,
        }
    }
}
