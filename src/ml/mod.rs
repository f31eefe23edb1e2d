//! Machine Learning Module
//!
//! This module provides evaluation functionality for classification models:
//! per-class precision, recall, F1 and AUC, threshold curves and confusion
//! matrices.

// Feature modules
pub mod metrics;

// Re-export metrics
pub use metrics::classification::{
    accuracy_score, binarize_labels, calculate_metrics, precision_recall_fscore_support,
};
pub use metrics::confusion::{confusion_matrix, ConfusionMatrix, ZeroRowPolicy};
pub use metrics::record::{Metric, MetricsRecord};
