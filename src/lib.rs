//! Classification metrics and diagnostic charts for multi-class classifiers.
//!
//! The `ml::metrics` module computes per-class precision, recall, F1 and
//! one-vs-rest AUC. The `vis` module renders ROC curves, precision-recall
//! curves, metric bar charts, metrics-over-time plots and confusion matrix
//! heatmaps to PNG files (behind the default `visualization` feature).

// Core module with the error type
pub mod core;

pub mod config;
pub mod ml;
pub mod report;
pub mod vis;

// Re-export core types
pub use core::error::{Error, Result};

// Configuration
pub use config::{EvalConfig, TitleConfig};

// Metrics
pub use ml::metrics::classification::{
    accuracy_score, binarize_labels, calculate_metrics, precision_recall_fscore_support,
    unique_labels, ClassScores,
};
pub use ml::metrics::confusion::{confusion_matrix, ConfusionMatrix, ZeroRowPolicy};
pub use ml::metrics::curves::{auc, precision_recall_curve, roc_curve, PrecisionRecallCurve, RocCurve};
pub use ml::metrics::record::{validate_history, Metric, MetricsRecord};

// Visualization
pub use vis::config::{
    ChartOptions, PlotSettings, ReportPlot, CLASSIFICATION_METRICS_FILE,
    CONFUSION_MATRIX_NORMALIZED_FILE, CONFUSION_MATRIX_RAW_FILE, METRICS_OVER_TIME_FILE,
    PRECISION_RECALL_CURVES_FILE, ROC_CURVES_FILE,
};
pub use vis::ensure_dir;
#[cfg(feature = "visualization")]
pub use vis::plotters::{
    plot_confusion_matrix, plot_metrics_bar, plot_metrics_line, plot_precision_recall_curve,
    plot_roc_curve,
};

pub use report::EvaluationReport;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
