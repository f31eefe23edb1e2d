//! Confusion matrix and its row normalization

use crate::core::error::{check_same_length, Error, Result};
use crate::ml::metrics::classification::unique_labels;
use serde::{Deserialize, Serialize};

/// How to normalize a row whose true class has no samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroRowPolicy {
    /// Propagate NaN across the row (0 / 0)
    #[default]
    Nan,
    /// Write an explicit row of zeros
    Zero,
}

/// Counts of (true class, predicted class) pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    labels: Vec<usize>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Class labels in row/column order
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Raw counts, rows = true class, columns = predicted class
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Number of samples counted
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Number of true samples per class
    pub fn row_sums(&self) -> Vec<usize> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Divide each row by its sum so rows describe per-class recall
    pub fn normalized(&self, policy: ZeroRowPolicy) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let sum: usize = row.iter().sum();
                row.iter()
                    .map(|&count| match (sum, policy) {
                        (0, ZeroRowPolicy::Nan) => f64::NAN,
                        (0, ZeroRowPolicy::Zero) => 0.0,
                        _ => count as f64 / sum as f64,
                    })
                    .collect()
            })
            .collect()
    }
}

/// Compute the confusion matrix
///
/// # Arguments
/// * `y_true` - True labels
/// * `y_pred` - Predicted labels
/// * `labels` - Row/column classes; defaults to the sorted union of observed labels
///
/// # Returns
/// * `Result<ConfusionMatrix>` - Samples whose labels are not listed are ignored
pub fn confusion_matrix(
    y_true: &[usize],
    y_pred: &[usize],
    labels: Option<&[usize]>,
) -> Result<ConfusionMatrix> {
    check_same_length("true and predicted labels", y_true.len(), y_pred.len())?;

    if y_true.is_empty() {
        return Err(Error::EmptyData(
            "Cannot build a confusion matrix from empty data".to_string(),
        ));
    }

    let labels = match labels {
        Some(labels) if labels.is_empty() => {
            return Err(Error::InvalidInput("Label list is empty".to_string()))
        }
        Some(labels) => labels.to_vec(),
        None => unique_labels(y_true, y_pred),
    };

    let position = |label: usize| labels.iter().position(|&l| l == label);
    let mut counts = vec![vec![0; labels.len()]; labels.len()];
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        if let (Some(row), Some(col)) = (position(t), position(p)) {
            counts[row][col] += 1;
        }
    }

    Ok(ConfusionMatrix { labels, counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_matrix_counts() {
        let y_true = vec![0, 1, 2, 0, 1, 2];
        let y_pred = vec![0, 1, 1, 0, 2, 2];

        let cm = confusion_matrix(&y_true, &y_pred, None).unwrap();
        assert_eq!(cm.labels(), &[0, 1, 2]);
        assert_eq!(
            cm.counts(),
            &[vec![2, 0, 0], vec![0, 1, 1], vec![0, 1, 1]]
        );
        assert_eq!(cm.total(), 6);
        assert_eq!(cm.row_sums(), vec![2, 2, 2]);
    }

    #[test]
    fn test_rows_normalize_to_one() {
        let y_true = vec![0, 0, 0, 1, 1];
        let y_pred = vec![0, 1, 1, 1, 0];

        let cm = confusion_matrix(&y_true, &y_pred, None).unwrap();
        let norm = cm.normalized(ZeroRowPolicy::Nan);
        for row in &norm {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
        assert!((norm[0][1] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_row_policy() {
        // Class 2 is predicted but never true
        let y_true = vec![0, 1, 1];
        let y_pred = vec![0, 2, 1];

        let cm = confusion_matrix(&y_true, &y_pred, None).unwrap();
        assert_eq!(cm.row_sums(), vec![1, 2, 0]);

        let nan = cm.normalized(ZeroRowPolicy::Nan);
        assert!(nan[2].iter().all(|v| v.is_nan()));
        assert!(!nan[1].iter().any(|v| v.is_nan()));

        let zero = cm.normalized(ZeroRowPolicy::Zero);
        assert_eq!(zero[2], vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_explicit_labels() {
        let cm = confusion_matrix(&[0, 1, 3], &[0, 3, 3], Some(&[3, 0])).unwrap();
        assert_eq!(cm.counts(), &[vec![1, 0], vec![0, 1]]);
        assert_eq!(cm.total(), 2);
    }

    #[test]
    fn test_invalid_input() {
        assert!(confusion_matrix(&[0, 1], &[0], None).is_err());
        assert!(confusion_matrix(&[], &[], None).is_err());
        assert!(confusion_matrix(&[0], &[0], Some(&[])).is_err());
    }
}
