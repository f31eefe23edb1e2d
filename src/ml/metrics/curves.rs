//! Threshold curves for binary scoring problems
//!
//! ROC and precision-recall curves are built from the same cumulative
//! true-positive / false-positive counts taken at every distinct score,
//! walking the samples from the highest score to the lowest.

use crate::core::error::{check_same_length, Error, Result};
use std::cmp::Ordering;

/// Receiver operating characteristic curve
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    /// False positive rate at each threshold (non-decreasing, starts at 0)
    pub fpr: Vec<f64>,
    /// True positive rate at each threshold (non-decreasing, starts at 0)
    pub tpr: Vec<f64>,
    /// Score thresholds, decreasing; the first one is `+inf`
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    /// Area under the curve
    pub fn auc(&self) -> Result<f64> {
        auc(&self.fpr, &self.tpr)
    }

    /// Curve as plottable `(fpr, tpr)` points
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.fpr.iter().copied().zip(self.tpr.iter().copied()).collect()
    }
}

/// Precision-recall curve
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionRecallCurve {
    /// Precision at each threshold; the last value is 1.0
    pub precision: Vec<f64>,
    /// Recall at each threshold, non-increasing; the last value is 0.0
    pub recall: Vec<f64>,
    /// Score thresholds, increasing; one fewer than the precision values
    pub thresholds: Vec<f64>,
}

impl PrecisionRecallCurve {
    /// Area under the curve, integrating precision over recall
    pub fn auc(&self) -> Result<f64> {
        auc(&self.recall, &self.precision)
    }

    /// Curve as plottable `(recall, precision)` points
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.recall
            .iter()
            .copied()
            .zip(self.precision.iter().copied())
            .collect()
    }
}

/// Returns `true` when a binary ground truth holds only one of the two values
///
/// Such a class has no defined ROC or precision-recall curve.
pub fn is_degenerate(y_true: &[bool]) -> bool {
    let positives = y_true.iter().filter(|&&t| t).count();
    positives == 0 || positives == y_true.len()
}

/// Cumulative counts at each distinct score, highest score first
struct ThresholdCounts {
    fps: Vec<f64>,
    tps: Vec<f64>,
    thresholds: Vec<f64>,
}

fn binary_clf_curve(y_true: &[bool], y_score: &[f64]) -> Result<ThresholdCounts> {
    check_same_length("binary labels and scores", y_true.len(), y_score.len())?;

    if y_true.is_empty() {
        return Err(Error::EmptyData(
            "Cannot build a curve from empty data".to_string(),
        ));
    }

    if let Some(pos) = y_score.iter().position(|s| !s.is_finite()) {
        return Err(Error::InvalidValue(format!(
            "Score at sample {} is not finite: {}",
            pos, y_score[pos]
        )));
    }

    let mut order: Vec<usize> = (0..y_score.len()).collect();
    order.sort_by(|&a, &b| {
        y_score[b]
            .partial_cmp(&y_score[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut counts = ThresholdCounts {
        fps: Vec::new(),
        tps: Vec::new(),
        thresholds: Vec::new(),
    };
    let mut tp = 0.0;
    let mut fp = 0.0;

    for (rank, &sample) in order.iter().enumerate() {
        if y_true[sample] {
            tp += 1.0;
        } else {
            fp += 1.0;
        }

        // Emit a point only at the last sample sharing this score
        let score = y_score[sample];
        let boundary = order
            .get(rank + 1)
            .map_or(true, |&next| y_score[next] != score);
        if boundary {
            counts.tps.push(tp);
            counts.fps.push(fp);
            counts.thresholds.push(score);
        }
    }

    Ok(counts)
}

/// Compute the ROC curve of a binary ground truth against a score column
///
/// # Arguments
/// * `y_true` - Binary ground truth (`true` = positive)
/// * `y_score` - Score per sample; higher means more likely positive
///
/// # Returns
/// * `Result<RocCurve>` - Curve starting at `(0, 0)` and ending at `(1, 1)`
///
/// Intermediate points that lie on a straight segment are dropped; they do
/// not change the curve shape or its area.
pub fn roc_curve(y_true: &[bool], y_score: &[f64]) -> Result<RocCurve> {
    let counts = binary_clf_curve(y_true, y_score)?;
    if is_degenerate(y_true) {
        return Err(Error::InsufficientData(
            "ROC curve needs both positive and negative samples".to_string(),
        ));
    }

    let last = counts.tps.len() - 1;
    let positives = counts.tps[last];
    let negatives = counts.fps[last];

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];

    for i in 0..=last {
        let interior = i > 0 && i < last;
        if interior {
            let fps_bend = counts.fps[i - 1] - 2.0 * counts.fps[i] + counts.fps[i + 1];
            let tps_bend = counts.tps[i - 1] - 2.0 * counts.tps[i] + counts.tps[i + 1];
            if fps_bend == 0.0 && tps_bend == 0.0 {
                continue;
            }
        }
        fpr.push(counts.fps[i] / negatives);
        tpr.push(counts.tps[i] / positives);
        thresholds.push(counts.thresholds[i]);
    }

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
    })
}

/// Compute the precision-recall curve of a binary ground truth against a score column
///
/// # Arguments
/// * `y_true` - Binary ground truth (`true` = positive)
/// * `y_score` - Score per sample; higher means more likely positive
///
/// # Returns
/// * `Result<PrecisionRecallCurve>` - Points ordered by decreasing recall,
///   terminated by `(recall = 0, precision = 1)`
pub fn precision_recall_curve(y_true: &[bool], y_score: &[f64]) -> Result<PrecisionRecallCurve> {
    let counts = binary_clf_curve(y_true, y_score)?;
    if is_degenerate(y_true) {
        return Err(Error::InsufficientData(
            "Precision-recall curve needs both positive and negative samples".to_string(),
        ));
    }

    let positives = counts.tps[counts.tps.len() - 1];

    let mut precision = Vec::with_capacity(counts.tps.len() + 1);
    let mut recall = Vec::with_capacity(counts.tps.len() + 1);
    let mut thresholds = Vec::with_capacity(counts.tps.len());

    for i in (0..counts.tps.len()).rev() {
        let predicted = counts.tps[i] + counts.fps[i];
        precision.push(if predicted > 0.0 {
            counts.tps[i] / predicted
        } else {
            0.0
        });
        recall.push(counts.tps[i] / positives);
        thresholds.push(counts.thresholds[i]);
    }
    precision.push(1.0);
    recall.push(0.0);

    Ok(PrecisionRecallCurve {
        precision,
        recall,
        thresholds,
    })
}

/// Area under a curve by the trapezoidal rule
///
/// # Arguments
/// * `x` - Monotonic x coordinates (increasing or decreasing)
/// * `y` - y coordinates
///
/// # Returns
/// * `Result<f64>` - Area, positive for both orientations of `x`
pub fn auc(x: &[f64], y: &[f64]) -> Result<f64> {
    check_same_length("curve coordinates", x.len(), y.len())?;

    if x.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "At least 2 points are needed to compute area under curve, got {}",
            x.len()
        )));
    }

    let increasing = x.windows(2).all(|w| w[1] >= w[0]);
    let decreasing = x.windows(2).all(|w| w[1] <= w[0]);
    let direction = match (increasing, decreasing) {
        (true, _) => 1.0,
        (false, true) => -1.0,
        (false, false) => {
            return Err(Error::InvalidValue(
                "x is neither increasing nor decreasing".to_string(),
            ))
        }
    };

    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum();

    Ok(direction * area)
}
