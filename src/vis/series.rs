//! Chart-ready data derived from labels, scores and metrics records
//!
//! Everything here is pure; the plotters backend only draws what these
//! functions return.

use crate::core::error::Result;
use crate::ml::metrics::classification::{binarize_labels, score_column, score_matrix_width};
use crate::ml::metrics::curves::{is_degenerate, precision_recall_curve, roc_curve};
use crate::ml::metrics::record::{validate_history, Metric, MetricsRecord};

/// One class's curve, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct ClassCurve {
    /// Class label (score column)
    pub class: usize,
    /// Curve points in drawing order
    pub points: Vec<(f64, f64)>,
    /// Area under the drawn curve
    pub auc: f64,
}

fn curves_by_class<F>(y_true: &[usize], y_score: &[Vec<f64>], curve: F) -> Result<Vec<ClassCurve>>
where
    F: Fn(&[bool], &[f64]) -> Result<(Vec<(f64, f64)>, f64)>,
{
    let n_classes = score_matrix_width(y_true, y_score)?;
    let mut curves = Vec::with_capacity(n_classes);

    for class in 0..n_classes {
        let binary = binarize_labels(y_true, class);
        if is_degenerate(&binary) {
            log::debug!("skipping class {}: single-valued ground truth", class);
            continue;
        }
        let (points, auc) = curve(&binary, &score_column(y_score, class))?;
        curves.push(ClassCurve { class, points, auc });
    }

    Ok(curves)
}

/// One-vs-rest ROC curves, skipping classes that are absent or universal
pub fn roc_curves_by_class(y_true: &[usize], y_score: &[Vec<f64>]) -> Result<Vec<ClassCurve>> {
    curves_by_class(y_true, y_score, |binary, scores| {
        let roc = roc_curve(binary, scores)?;
        Ok((roc.points(), roc.auc()?))
    })
}

/// One-vs-rest precision-recall curves, skipping classes that are absent or universal
pub fn precision_recall_curves_by_class(
    y_true: &[usize],
    y_score: &[Vec<f64>],
) -> Result<Vec<ClassCurve>> {
    curves_by_class(y_true, y_score, |binary, scores| {
        let pr = precision_recall_curve(binary, scores)?;
        Ok((pr.points(), pr.auc()?))
    })
}

/// Values of one metric across rounds, as `(round, value)` with 1-based rounds
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLine {
    pub metric: Metric,
    pub points: Vec<(i32, f64)>,
}

/// All metric lines of one class; drawn as one subplot
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSeries {
    /// Position of the class in each record
    pub index: usize,
    /// Class label
    pub label: usize,
    pub lines: Vec<MetricLine>,
}

/// Per-class metric lines of a metrics history
///
/// The result holds one entry per class, each with precision, recall and F1
/// lines plus an AUC line when the history carries AUC.
pub fn metrics_over_time_series(history: &[MetricsRecord]) -> Result<Vec<ClassSeries>> {
    let n_classes = validate_history(history)?;
    let first = &history[0];

    let series = (0..n_classes)
        .map(|index| ClassSeries {
            index,
            label: first.labels()[index],
            lines: first
                .metrics()
                .into_iter()
                .map(|metric| MetricLine {
                    metric,
                    points: history
                        .iter()
                        .enumerate()
                        .filter_map(|(round, record)| {
                            record
                                .values(metric)
                                .map(|values| (round as i32 + 1, values[index]))
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Ok(series)
}
