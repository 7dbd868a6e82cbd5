//! Train/test splitting with a seeded shuffle

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Matrix, MlError};

/// Shuffle samples and split off a held-out test fraction.
///
/// Returns `(x_train, x_test, y_train, y_test)`. The same seed always
/// produces the same partition.
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &Matrix,
    y: &[bool],
    test_size: f32,
    seed: Option<u64>,
) -> Result<(Matrix, Matrix, Vec<bool>, Vec<bool>), MlError> {
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
    if test_size <= 0.0 || test_size >= 1.0 || !test_size.is_finite() {
        return Err(MlError::InvalidTestSize(test_size));
    }

    let n_test = ((n_samples as f32) * test_size).round() as usize;
    let n_train = n_samples - n_test;
    if n_train == 0 || n_test == 0 {
        return Err(MlError::DegenerateSplit);
    }

    let indices = shuffle_indices(n_samples, seed);
    let train_indices = &indices[..n_train];
    let test_indices = &indices[n_train..];

    let x_train = x.select_rows(train_indices);
    let x_test = x.select_rows(test_indices);
    let y_train = train_indices.iter().map(|&i| y[i]).collect();
    let y_test = test_indices.iter().map(|&i| y[i]).collect();

    Ok((x_train, x_test, y_train, y_test))
}

fn shuffle_indices(n_samples: usize, seed: Option<u64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();

    match seed {
        Some(s) => {
            let mut rng = StdRng::seed_from_u64(s);
            indices.shuffle(&mut rng);
        }
        None => {
            let mut rng = rand::thread_rng();
            indices.shuffle(&mut rng);
        }
    }

    indices
}
