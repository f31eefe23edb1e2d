//! Configuration management for evaluation reports
//!
//! This module provides file-based configuration with support for:
//! - YAML/TOML configuration files
//! - Configuration validation
//! - Conversion into per-chart call options

use crate::core::error::{Error, Result};
use crate::vis::config::{ChartOptions, PlotSettings, ReportPlot};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod loader;
pub mod validation;

/// Main configuration structure for evaluation reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Directory the charts are written to
    pub save_dir: PathBuf,
    /// Display names, one per class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_names: Option<Vec<String>>,
    /// Chart titles
    pub titles: TitleConfig,
    /// Rendering settings shared by every chart
    pub plot: PlotSettings,
}

/// Title of each chart kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub roc_curves: String,
    pub precision_recall_curves: String,
    pub metrics_bar: String,
    pub metrics_over_time: String,
    pub confusion_matrix: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("plots"),
            class_names: None,
            titles: TitleConfig::default(),
            plot: PlotSettings::default(),
        }
    }
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            roc_curves: ReportPlot::RocCurves.default_title().to_string(),
            precision_recall_curves: ReportPlot::PrecisionRecallCurves
                .default_title()
                .to_string(),
            metrics_bar: ReportPlot::MetricsBar.default_title().to_string(),
            metrics_over_time: ReportPlot::MetricsOverTime.default_title().to_string(),
            confusion_matrix: ReportPlot::ConfusionMatrix.default_title().to_string(),
        }
    }
}

impl TitleConfig {
    /// Configured title of a chart kind
    pub fn get(&self, kind: ReportPlot) -> &str {
        match kind {
            ReportPlot::RocCurves => &self.roc_curves,
            ReportPlot::PrecisionRecallCurves => &self.precision_recall_curves,
            ReportPlot::MetricsBar => &self.metrics_bar,
            ReportPlot::MetricsOverTime => &self.metrics_over_time,
            ReportPlot::ConfusionMatrix => &self.confusion_matrix,
        }
    }
}

impl EvalConfig {
    /// Load configuration from a YAML or TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        loader::load_from_file(path.as_ref())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::save_to_file(self, path.as_ref())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to YAML: {}", e))
        })
    }

    /// Convert to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to TOML: {}", e))
        })
    }

    /// Call options for one chart kind
    pub fn chart_options(&self, kind: ReportPlot) -> ChartOptions {
        let options = ChartOptions::new(&self.save_dir)
            .with_title(self.titles.get(kind))
            .with_settings(self.plot.clone());
        match &self.class_names {
            Some(names) => options.with_class_names(names.clone()),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::metrics::confusion::ZeroRowPolicy;

    #[test]
    fn test_chart_options_from_config() {
        let mut config = EvalConfig::default();
        config.save_dir = PathBuf::from("out/eval");
        config.titles.roc_curves = "Validation ROC".to_string();
        config.class_names = Some(vec!["neg".to_string(), "pos".to_string()]);
        config.plot.zero_row_policy = ZeroRowPolicy::Zero;

        let options = config.chart_options(ReportPlot::RocCurves);
        assert_eq!(options.save_dir, PathBuf::from("out/eval"));
        assert_eq!(options.title_for(ReportPlot::RocCurves), "Validation ROC");
        assert_eq!(options.class_names_for(&[0, 1]).unwrap(), vec!["neg", "pos"]);
        assert_eq!(options.settings.zero_row_policy, ZeroRowPolicy::Zero);

        let options = config.chart_options(ReportPlot::ConfusionMatrix);
        assert_eq!(
            options.title_for(ReportPlot::ConfusionMatrix),
            "Confusion Matrix"
        );
    }

    #[test]
    fn test_default_titles() {
        let titles = TitleConfig::default();
        assert_eq!(titles.get(ReportPlot::MetricsBar), "Classification Metrics");
        assert_eq!(
            titles.get(ReportPlot::PrecisionRecallCurves),
            "Precision-Recall Curves"
        );
    }
}
