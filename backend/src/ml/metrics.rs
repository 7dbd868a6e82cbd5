//! Evaluation metrics for the binary irrigation classifier

use serde::{Deserialize, Serialize};

/// Confusion-matrix counts for the positive class "irrigate"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    /// Tally predictions against ground truth
    pub fn tally(predictions: &[bool], truth: &[bool]) -> Self {
        assert_eq!(
            predictions.len(),
            truth.len(),
            "predictions and truth must have the same length"
        );

        let mut counts = Self::default();
        for (&predicted, &actual) in predictions.iter().zip(truth.iter()) {
            match (predicted, actual) {
                (true, true) => counts.true_positives += 1,
                (true, false) => counts.false_positives += 1,
                (false, false) => counts.true_negatives += 1,
                (false, true) => counts.false_negatives += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Fraction of correct predictions; 0 on an empty set
    pub fn accuracy(&self) -> f32 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// TP / (TP + FP); 0 when nothing was predicted positive
    pub fn precision(&self) -> f32 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN); 0 when no positives exist
    pub fn recall(&self) -> f32 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall; 0 when both are 0
    pub fn f1(&self) -> f32 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

/// Held-out evaluation summary embedded in the model artifact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy: f32,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    /// Number of held-out samples the report was computed on
    pub support: usize,
}

impl EvaluationReport {
    /// Evaluate predictions against ground truth
    pub fn evaluate(predictions: &[bool], truth: &[bool]) -> Self {
        let counts = ConfusionCounts::tally(predictions, truth);
        Self {
            accuracy: counts.accuracy(),
            precision: counts.precision(),
            recall: counts.recall(),
            f1: counts.f1(),
            support: counts.total(),
        }
    }
}
