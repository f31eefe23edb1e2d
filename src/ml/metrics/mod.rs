//! Machine learning evaluation metrics module
//!
//! Provides per-class metrics, threshold curves and confusion matrices for
//! evaluating multi-class classifiers.

pub mod classification;
pub mod confusion;
pub mod curves;
pub mod record;

pub use classification::{
    accuracy_score, binarize_labels, calculate_metrics, one_vs_rest_auc,
    precision_recall_fscore_support, score_column, score_matrix_width, unique_labels,
    ClassScores,
};
pub use confusion::{confusion_matrix, ConfusionMatrix, ZeroRowPolicy};
pub use curves::{auc, is_degenerate, precision_recall_curve, roc_curve, PrecisionRecallCurve, RocCurve};
pub use record::{validate_history, Metric, MetricsRecord};
