//! Classification model evaluation metrics

use crate::core::error::{check_same_length, Error, Result};
use crate::ml::metrics::curves::{is_degenerate, roc_curve};
use crate::ml::metrics::record::MetricsRecord;

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_accuracy_score() {
        let true_labels = vec![0, 1, 2, 0, 1, 2];
        let pred_labels = vec![0, 1, 1, 0, 2, 2];

        let accuracy = accuracy_score(&true_labels, &pred_labels).unwrap();
        assert!((accuracy - 0.6666666).abs() < 1e-6); // 4/6 = 0.6666...
    }

    #[test]
    fn test_binarize_compares_against_fixed_class() {
        // A loop counter in place of the class would flag sample 2 only
        let y_true = vec![2, 0, 2, 1];
        assert_eq!(binarize_labels(&y_true, 2), vec![true, false, true, false]);
        assert_eq!(binarize_labels(&y_true, 0), vec![false, true, false, false]);
        assert_eq!(binarize_labels(&y_true, 3), vec![false; 4]);
    }

    #[test]
    fn test_binarize_every_sample_every_class() {
        let y_true = vec![1, 1, 0, 3, 2, 0, 1];
        for class in 0..4 {
            let binary = binarize_labels(&y_true, class);
            for (sample, &flag) in binary.iter().enumerate() {
                assert_eq!(flag, y_true[sample] == class);
            }
        }
    }

    #[test]
    fn test_three_class_scores() {
        let y_true = vec![0, 1, 2, 0, 1, 2];
        let y_pred = vec![0, 1, 1, 0, 2, 2];

        let scores = precision_recall_fscore_support(&y_true, &y_pred, None).unwrap();
        assert_eq!(scores.labels, vec![0, 1, 2]);
        assert!(close(&scores.precision, &[1.0, 0.5, 0.5]));
        assert!(close(&scores.recall, &[1.0, 0.5, 0.5]));
        assert!(close(&scores.f1, &[1.0, 0.5, 0.5]));
        assert_eq!(scores.support, vec![2, 2, 2]);
    }

    #[test]
    fn test_absent_class_scores_zero() {
        let y_true = vec![0, 0, 1];
        let y_pred = vec![0, 1, 1];

        let scores = precision_recall_fscore_support(&y_true, &y_pred, Some(&[0, 1, 2])).unwrap();
        assert_eq!(scores.precision[2], 0.0);
        assert_eq!(scores.recall[2], 0.0);
        assert_eq!(scores.f1[2], 0.0);
        assert_eq!(scores.support[2], 0);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        let y_true = vec![0, 1, 2, 3, 0, 1, 2, 3, 3, 3];
        let y_pred = vec![3, 1, 0, 3, 0, 2, 2, 1, 3, 0];

        let scores = precision_recall_fscore_support(&y_true, &y_pred, None).unwrap();
        for values in [&scores.precision, &scores.recall, &scores.f1] {
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_unique_labels() {
        assert_eq!(unique_labels(&[3, 0, 3], &[1, 0, 0]), vec![0, 1, 3]);
    }

    #[test]
    fn test_calculate_metrics_without_scores() {
        let y_true = vec![0, 1, 2, 0, 1, 2];
        let y_pred = vec![0, 1, 1, 0, 2, 2];

        let metrics = calculate_metrics(&y_true, &y_pred, None, None).unwrap();
        assert_eq!(metrics.n_classes(), 3);
        assert!(close(metrics.precision(), &[1.0, 0.5, 0.5]));
        assert!(metrics.auc().is_none());
        assert_eq!(metrics.support(), Some(&[2, 2, 2][..]));
    }

    #[test]
    fn test_calculate_metrics_with_scores() {
        let y_true = vec![0, 1, 0, 1];
        let y_pred = vec![0, 1, 1, 1];
        let y_score = vec![
            vec![0.9, 0.1],
            vec![0.2, 0.8],
            vec![0.4, 0.6],
            vec![0.3, 0.7],
        ];

        let metrics = calculate_metrics(&y_true, &y_pred, Some(&y_score), None).unwrap();
        let auc = metrics.auc().unwrap();
        assert!(close(auc, &[1.0, 1.0]));
    }

    #[test]
    fn test_auc_sentinel_for_missing_class() {
        let y_true = vec![0, 0, 1, 1];
        let y_pred = vec![0, 1, 1, 1];
        let y_score = vec![
            vec![0.7, 0.2, 0.1],
            vec![0.4, 0.5, 0.1],
            vec![0.1, 0.8, 0.1],
            vec![0.2, 0.6, 0.2],
        ];

        let metrics = calculate_metrics(&y_true, &y_pred, Some(&y_score), None).unwrap();
        assert_eq!(metrics.labels(), &[0, 1, 2]);
        assert_eq!(metrics.auc().unwrap()[2], 0.0);
    }

    #[test]
    fn test_auc_sentinel_for_class_in_every_sample() {
        let y_true = vec![1, 1, 1];
        let y_pred = vec![1, 0, 1];
        let y_score = vec![vec![0.2, 0.8], vec![0.6, 0.4], vec![0.1, 0.9]];

        let metrics = calculate_metrics(&y_true, &y_pred, Some(&y_score), None).unwrap();
        assert_eq!(metrics.auc().unwrap(), &[0.0, 0.0]);
    }

    #[test]
    fn test_length_mismatch() {
        let result = calculate_metrics(&[0, 1, 1], &[0, 1], None, None);
        assert!(matches!(result, Err(Error::DimensionMismatch(_))));

        let y_score = vec![vec![0.5, 0.5]];
        let result = calculate_metrics(&[0, 1], &[0, 1], Some(&y_score), None);
        assert!(matches!(result, Err(Error::DimensionMismatch(_))));
    }

    #[test]
    fn test_score_matrix_validation() {
        let ragged = vec![vec![0.5, 0.5], vec![1.0]];
        assert!(matches!(
            score_matrix_width(&[0, 1], &ragged),
            Err(Error::InconsistentArrayLengths {
                expected: 2,
                found: 1
            })
        ));

        let narrow = vec![vec![0.5, 0.5], vec![0.5, 0.5]];
        assert!(matches!(
            score_matrix_width(&[0, 2], &narrow),
            Err(Error::InvalidInput(_))
        ));

        assert_eq!(score_matrix_width(&[0, 1], &narrow).unwrap(), 2);
        assert_eq!(score_column(&narrow, 1), vec![0.5, 0.5]);
    }

    #[test]
    fn test_empty_input() {
        let empty: Vec<usize> = vec![];

        assert!(accuracy_score(&empty, &empty).is_err());
        assert!(precision_recall_fscore_support(&empty, &empty, None).is_err());
    }
}

/// Per-class precision, recall, F1 and support
#[derive(Debug, Clone, PartialEq)]
pub struct ClassScores {
    /// Class labels the scores refer to, in output order
    pub labels: Vec<usize>,
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub f1: Vec<f64>,
    /// Number of true samples per class
    pub support: Vec<usize>,
}

fn check_labels(y_true: &[usize], y_pred: &[usize]) -> Result<()> {
    check_same_length("true and predicted labels", y_true.len(), y_pred.len())?;

    if y_true.is_empty() {
        return Err(Error::EmptyData(
            "Cannot calculate with empty data".to_string(),
        ));
    }
    Ok(())
}

/// Calculate accuracy
///
/// # Arguments
/// * `y_true` - True labels
/// * `y_pred` - Predicted labels
///
/// # Returns
/// * `Result<f64>` - Accuracy (0 to 1)
pub fn accuracy_score<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    check_same_length("true and predicted labels", y_true.len(), y_pred.len())?;

    if y_true.is_empty() {
        return Err(Error::EmptyData(
            "Cannot calculate with empty data".to_string(),
        ));
    }

    let correct_count = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();

    Ok(correct_count as f64 / y_true.len() as f64)
}

/// Sorted union of the labels present in ground truth and predictions
pub fn unique_labels(y_true: &[usize], y_pred: &[usize]) -> Vec<usize> {
    let mut labels: Vec<usize> = y_true.iter().chain(y_pred.iter()).copied().collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

/// One-vs-rest ground truth for a single class
///
/// # Arguments
/// * `y_true` - True labels
/// * `class` - Class treated as positive
///
/// # Returns
/// * `Vec<bool>` - `true` at every sample whose label equals `class`
pub fn binarize_labels(y_true: &[usize], class: usize) -> Vec<bool> {
    y_true.iter().map(|&label| label == class).collect()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Calculate precision, recall, F1 score and support for each class
///
/// # Arguments
/// * `y_true` - True labels
/// * `y_pred` - Predicted labels
/// * `labels` - Classes to report, in order; defaults to the sorted union of
///   observed labels
///
/// # Returns
/// * `Result<ClassScores>` - Scores in `[0, 1]`; a ratio with a zero
///   denominator is reported as 0.0
pub fn precision_recall_fscore_support(
    y_true: &[usize],
    y_pred: &[usize],
    labels: Option<&[usize]>,
) -> Result<ClassScores> {
    check_labels(y_true, y_pred)?;

    let labels = match labels {
        Some(labels) if labels.is_empty() => {
            return Err(Error::InvalidInput("Label list is empty".to_string()))
        }
        Some(labels) => labels.to_vec(),
        None => unique_labels(y_true, y_pred),
    };

    let mut scores = ClassScores {
        labels: labels.clone(),
        precision: Vec::with_capacity(labels.len()),
        recall: Vec::with_capacity(labels.len()),
        f1: Vec::with_capacity(labels.len()),
        support: Vec::with_capacity(labels.len()),
    };

    for &class in &labels {
        let mut tp = 0;
        let mut fp = 0;
        let mut fn_ = 0;
        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            match (t == class, p == class) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        scores.precision.push(precision);
        scores.recall.push(recall);
        scores.f1.push(f1);
        scores.support.push(tp + fn_);
    }

    Ok(scores)
}

/// Validate a score matrix against ground truth and return its class count
///
/// Rows must align with `y_true`, all rows must have the same width, every
/// true label must address a column and every score must be finite.
pub fn score_matrix_width(y_true: &[usize], y_score: &[Vec<f64>]) -> Result<usize> {
    check_same_length("true labels and score rows", y_true.len(), y_score.len())?;

    let width = y_score.first().map(Vec::len).ok_or_else(|| {
        Error::EmptyData("Score matrix has no rows".to_string())
    })?;
    if width == 0 {
        return Err(Error::EmptyData("Score matrix has no columns".to_string()));
    }

    for (sample, row) in y_score.iter().enumerate() {
        if row.len() != width {
            return Err(Error::InconsistentArrayLengths {
                expected: width,
                found: row.len(),
            });
        }
        if let Some(value) = row.iter().find(|v| !v.is_finite()) {
            return Err(Error::InvalidValue(format!(
                "Score row {} contains a non-finite value: {}",
                sample, value
            )));
        }
    }

    if let Some(&label) = y_true.iter().find(|&&label| label >= width) {
        return Err(Error::InvalidInput(format!(
            "Label {} has no score column (score matrix has {} columns)",
            label, width
        )));
    }

    Ok(width)
}

/// Scores of one class across all samples
pub fn score_column(y_score: &[Vec<f64>], class: usize) -> Vec<f64> {
    y_score.iter().map(|row| row[class]).collect()
}

/// One-vs-rest ROC AUC of a single class
///
/// Returns 0.0 when the class is absent from `y_true` or labels every
/// sample, since the curve is undefined then.
pub fn one_vs_rest_auc(y_true: &[usize], y_score: &[Vec<f64>], class: usize) -> Result<f64> {
    let binary = binarize_labels(y_true, class);
    if is_degenerate(&binary) {
        log::debug!(
            "class {} has a single-valued ground truth, reporting AUC 0.0",
            class
        );
        return Ok(0.0);
    }

    roc_curve(&binary, &score_column(y_score, class))?.auc()
}

/// Calculate precision, recall, F1 score and optionally AUC for each class
///
/// # Arguments
/// * `y_true` - True labels
/// * `y_pred` - Predicted labels
/// * `y_score` - Optional score matrix, one column per class
/// * `labels` - Classes to report; defaults to every score column when
///   scores are given, else to the sorted union of observed labels
///
/// # Returns
/// * `Result<MetricsRecord>` - Record with support attached and AUC present
///   iff scores were given
pub fn calculate_metrics(
    y_true: &[usize],
    y_pred: &[usize],
    y_score: Option<&[Vec<f64>]>,
    labels: Option<&[usize]>,
) -> Result<MetricsRecord> {
    check_labels(y_true, y_pred)?;

    let width = match y_score {
        Some(y_score) => Some(score_matrix_width(y_true, y_score)?),
        None => None,
    };

    let default_labels: Vec<usize>;
    let labels = match (labels, width) {
        (Some(labels), _) => Some(labels),
        (None, Some(width)) => {
            default_labels = (0..width).collect();
            Some(default_labels.as_slice())
        }
        (None, None) => None,
    };

    let scores = precision_recall_fscore_support(y_true, y_pred, labels)?;

    let auc = match (y_score, width) {
        (Some(y_score), Some(width)) => {
            let mut auc = Vec::with_capacity(scores.labels.len());
            for &class in &scores.labels {
                if class >= width {
                    return Err(Error::InvalidInput(format!(
                        "Label {} has no score column (score matrix has {} columns)",
                        class, width
                    )));
                }
                auc.push(one_vs_rest_auc(y_true, y_score, class)?);
            }
            Some(auc)
        }
        _ => None,
    };

    MetricsRecord::with_labels(scores.labels, scores.precision, scores.recall, scores.f1, auc)?
        .with_support(scores.support)
}
