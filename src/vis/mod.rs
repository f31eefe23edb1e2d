//! Module providing evaluation chart functionality
//!
//! This module includes the chart configuration, chart-ready data series and,
//! with the `visualization` feature, the Plotters backend that renders them
//! to PNG files.

use std::fs;
use std::path::Path;

use crate::core::error::Result;

// Module structure
pub mod config;
#[cfg(feature = "visualization")]
pub mod plotters;
pub mod series;

// Re-export public items
pub use self::config::{ChartOptions, PlotSettings, ReportPlot};
#[cfg(feature = "visualization")]
pub use self::plotters::{
    plot_confusion_matrix, plot_metrics_bar, plot_metrics_line, plot_precision_recall_curve,
    plot_roc_curve,
};
pub use self::series::{metrics_over_time_series, ClassCurve, ClassSeries, MetricLine};

/// Create the output directory (and missing ancestors) if it does not exist
///
/// Calling this on an existing directory is a no-op.
pub fn ensure_dir<P: AsRef<Path>>(directory: P) -> Result<()> {
    let directory = directory.as_ref();
    if !directory.is_dir() {
        log::debug!("Creating output directory {}", directory.display());
        fs::create_dir_all(directory)?;
    }
    Ok(())
}
