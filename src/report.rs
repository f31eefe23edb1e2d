//! One-call evaluation reports
//!
//! Computes the metrics record of one evaluation round and renders every
//! chart that applies to it, using an [`crate::config::EvalConfig`] for paths, titles and
//! rendering settings.

#[cfg(feature = "visualization")]
use crate::config::EvalConfig;
use crate::core::error::Result;
use crate::ml::metrics::classification::calculate_metrics;
use crate::ml::metrics::record::MetricsRecord;
use crate::vis::config::ReportPlot;

/// Metrics and charts of one evaluation round
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    /// Computed per-class metrics
    pub metrics: MetricsRecord,
    /// Charts that were written, in rendering order
    pub plots: Vec<ReportPlot>,
}

impl EvaluationReport {
    /// Compute metrics and render the single-round charts
    ///
    /// Always writes the metrics bar chart and both confusion matrices; the
    /// ROC and precision-recall charts are added when `y_score` is given.
    /// All charts use the classes of the computed record, so with scores a
    /// class absent from the data still gets its confusion matrix row.
    /// Configured class names are checked before any file is written.
    #[cfg(feature = "visualization")]
    pub fn render(
        y_true: &[usize],
        y_pred: &[usize],
        y_score: Option<&[Vec<f64>]>,
        config: &EvalConfig,
    ) -> Result<Self> {
        use crate::vis::plotters::{
            plot_confusion_matrix, plot_metrics_bar, plot_precision_recall_curve, plot_roc_curve,
        };

        config.validate()?;
        let metrics = calculate_metrics(y_true, y_pred, y_score, None)?;

        // Every chart draws the classes of the metrics record
        let options =
            |kind: ReportPlot| config.chart_options(kind).with_labels(metrics.labels().to_vec());
        options(ReportPlot::MetricsBar).class_names_for(metrics.labels())?;

        let mut plots = Vec::new();

        plot_metrics_bar(&metrics, &options(ReportPlot::MetricsBar))?;
        plots.push(ReportPlot::MetricsBar);

        plot_confusion_matrix(y_true, y_pred, &options(ReportPlot::ConfusionMatrix))?;
        plots.push(ReportPlot::ConfusionMatrix);

        if let Some(y_score) = y_score {
            plot_roc_curve(y_true, y_score, &options(ReportPlot::RocCurves))?;
            plots.push(ReportPlot::RocCurves);

            plot_precision_recall_curve(
                y_true,
                y_score,
                &options(ReportPlot::PrecisionRecallCurves),
            )?;
            plots.push(ReportPlot::PrecisionRecallCurves);
        }

        log::info!(
            "Evaluation report for {} samples written to {}",
            y_true.len(),
            config.save_dir.display()
        );

        Ok(EvaluationReport { metrics, plots })
    }

    /// Compute metrics only, without rendering
    pub fn compute(
        y_true: &[usize],
        y_pred: &[usize],
        y_score: Option<&[Vec<f64>]>,
    ) -> Result<Self> {
        Ok(EvaluationReport {
            metrics: calculate_metrics(y_true, y_pred, y_score, None)?,
            plots: Vec::new(),
        })
    }

    /// Every file written by this report
    pub fn files(&self) -> Vec<&'static str> {
        self.plots
            .iter()
            .flat_map(|plot| plot.file_names().iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_only() {
        let report = EvaluationReport::compute(&[0, 1, 1], &[0, 1, 0], None).unwrap();
        assert!(report.plots.is_empty());
        assert!(report.files().is_empty());
        assert_eq!(report.metrics.n_classes(), 2);
        assert_eq!(report.metrics.recall(), &[1.0, 0.5]);
    }
}
