//! Configuration for visualization functionality
//!
//! This module provides the rendering settings shared by every chart and the
//! call-time options (output directory, title, class names) of a single chart.

use crate::core::error::{Error, Result};
use crate::ml::metrics::confusion::ZeroRowPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File written by the ROC curve plot
pub const ROC_CURVES_FILE: &str = "roc_curves.png";
/// File written by the precision-recall curve plot
pub const PRECISION_RECALL_CURVES_FILE: &str = "precision_recall_curves.png";
/// File written by the metrics bar chart
pub const CLASSIFICATION_METRICS_FILE: &str = "classification_metrics.png";
/// File written by the metrics-over-time plot
pub const METRICS_OVER_TIME_FILE: &str = "metrics_over_time.png";
/// Row-normalized confusion matrix heatmap
pub const CONFUSION_MATRIX_NORMALIZED_FILE: &str = "confusion_matrix_normalized.png";
/// Raw-count confusion matrix heatmap
pub const CONFUSION_MATRIX_RAW_FILE: &str = "confusion_matrix_raw.png";

/// Chart kinds produced by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPlot {
    /// One ROC curve per class
    RocCurves,
    /// One precision-recall curve per class
    PrecisionRecallCurves,
    /// Grouped bars of per-class metrics
    MetricsBar,
    /// Per-class metric lines across evaluation rounds
    MetricsOverTime,
    /// Normalized and raw confusion matrix heatmaps
    ConfusionMatrix,
}

impl ReportPlot {
    pub fn default_title(self) -> &'static str {
        match self {
            ReportPlot::RocCurves => "ROC Curves",
            ReportPlot::PrecisionRecallCurves => "Precision-Recall Curves",
            ReportPlot::MetricsBar => "Classification Metrics",
            ReportPlot::MetricsOverTime => "Metrics Over Time",
            ReportPlot::ConfusionMatrix => "Confusion Matrix",
        }
    }

    /// Files the chart writes into its output directory
    pub fn file_names(self) -> &'static [&'static str] {
        match self {
            ReportPlot::RocCurves => &[ROC_CURVES_FILE],
            ReportPlot::PrecisionRecallCurves => &[PRECISION_RECALL_CURVES_FILE],
            ReportPlot::MetricsBar => &[CLASSIFICATION_METRICS_FILE],
            ReportPlot::MetricsOverTime => &[METRICS_OVER_TIME_FILE],
            ReportPlot::ConfusionMatrix => &[
                CONFUSION_MATRIX_NORMALIZED_FILE,
                CONFUSION_MATRIX_RAW_FILE,
            ],
        }
    }
}

/// Rendering settings for evaluation charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Width of the image (pixels)
    pub width: u32,
    /// Height of the image (pixels)
    pub height: u32,
    /// Show legend
    pub show_legend: bool,
    /// Show grid
    pub show_grid: bool,
    /// Font size of chart captions
    pub caption_font_size: u32,
    /// Font size of axis descriptions and legend entries
    pub label_font_size: u32,
    /// Font size of bar and heatmap cell annotations
    pub annotation_font_size: u32,
    /// Color palette, cycled per class or per metric
    pub color_palette: Vec<(u8, u8, u8)>,
    /// Normalization of confusion matrix rows without true samples
    pub zero_row_policy: ZeroRowPolicy,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            width: 1000,
            height: 800,
            show_legend: true,
            show_grid: true,
            caption_font_size: 30,
            label_font_size: 18,
            annotation_font_size: 14,
            color_palette: vec![
                (0, 123, 255),  // Blue
                (255, 99, 71),  // Red
                (46, 204, 113), // Green
                (255, 193, 7),  // Yellow
                (142, 68, 173), // Purple
                (52, 152, 219), // Cyan
                (243, 156, 18), // Orange
                (211, 84, 0),   // Brown
            ],
            zero_row_policy: ZeroRowPolicy::Nan,
        }
    }
}

impl PlotSettings {
    /// Check that an image can be rendered with these settings
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidValue(format!(
                "Image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.color_palette.is_empty() {
            return Err(Error::InvalidValue(
                "Color palette must not be empty".to_string(),
            ));
        }
        if self.caption_font_size == 0 || self.label_font_size == 0 || self.annotation_font_size == 0
        {
            return Err(Error::InvalidValue(
                "Font sizes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Palette entry for the `index`-th series, wrapping around
    pub fn palette_color(&self, index: usize) -> (u8, u8, u8) {
        self.color_palette[index % self.color_palette.len()]
    }
}

/// Default display name of a class label
pub fn default_class_name(label: usize) -> String {
    format!("Class {}", label)
}

/// Call-time options of a single chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Output directory, created when missing
    pub save_dir: PathBuf,
    /// Chart title; each chart falls back to its own default
    pub title: Option<String>,
    /// Display names, one per class in drawing order
    pub class_names: Option<Vec<String>>,
    /// Classes of the confusion matrix; defaults to the observed labels
    pub labels: Option<Vec<usize>>,
    /// Rendering settings
    pub settings: PlotSettings,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions::new("plots")
    }
}

impl ChartOptions {
    pub fn new<P: AsRef<Path>>(save_dir: P) -> Self {
        ChartOptions {
            save_dir: save_dir.as_ref().to_path_buf(),
            title: None,
            class_names: None,
            labels: None,
            settings: PlotSettings::default(),
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_class_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.class_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_labels(mut self, labels: Vec<usize>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_settings(mut self, settings: PlotSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Title to draw for a chart kind
    pub fn title_for(&self, kind: ReportPlot) -> &str {
        self.title.as_deref().unwrap_or_else(|| kind.default_title())
    }

    /// Display names for the classes being drawn
    ///
    /// Caller-supplied names must match the number of classes; otherwise
    /// `"Class <label>"` is synthesized for each label.
    pub fn class_names_for(&self, labels: &[usize]) -> Result<Vec<String>> {
        match &self.class_names {
            Some(names) if names.len() != labels.len() => Err(Error::InvalidInput(format!(
                "Expected {} class names, got {}",
                labels.len(),
                names.len()
            ))),
            Some(names) => Ok(names.clone()),
            None => Ok(labels.iter().map(|&label| default_class_name(label)).collect()),
        }
    }

    /// Path of an output file inside the save directory
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.save_dir.join(file_name)
    }
}
