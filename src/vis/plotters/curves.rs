//! ROC and precision-recall curve charts

use plotters::prelude::*;

use super::{draw_legend, font, render_png, rgb, Surface};
use crate::core::error::Result;
use crate::ml::metrics::classification::score_matrix_width;
use crate::vis::config::{
    ChartOptions, ReportPlot, PRECISION_RECALL_CURVES_FILE, ROC_CURVES_FILE,
};
use crate::vis::series::{precision_recall_curves_by_class, roc_curves_by_class, ClassCurve};

/// Layout differences between the two curve charts
struct CurveLayout {
    kind: ReportPlot,
    x_desc: &'static str,
    y_desc: &'static str,
    legend: SeriesLabelPosition,
    diagonal: bool,
}

const ROC_LAYOUT: CurveLayout = CurveLayout {
    kind: ReportPlot::RocCurves,
    x_desc: "False Positive Rate",
    y_desc: "True Positive Rate",
    legend: SeriesLabelPosition::LowerRight,
    diagonal: true,
};

const PR_LAYOUT: CurveLayout = CurveLayout {
    kind: ReportPlot::PrecisionRecallCurves,
    x_desc: "Recall",
    y_desc: "Precision",
    legend: SeriesLabelPosition::LowerLeft,
    diagonal: false,
};

/// Plot one ROC curve per class into `roc_curves.png`
///
/// Classes absent from `y_true`, or present in every sample, are skipped.
/// A dashed diagonal marks the chance level.
pub fn plot_roc_curve(y_true: &[usize], y_score: &[Vec<f64>], options: &ChartOptions) -> Result<()> {
    let curves = roc_curves_by_class(y_true, y_score)?;
    plot_curves(y_true, y_score, &curves, options, &ROC_LAYOUT, ROC_CURVES_FILE)
}

/// Plot one precision-recall curve per class into `precision_recall_curves.png`
///
/// Uses the same skip policy as [`plot_roc_curve`]; the legend reports the
/// area under each precision-recall curve.
pub fn plot_precision_recall_curve(
    y_true: &[usize],
    y_score: &[Vec<f64>],
    options: &ChartOptions,
) -> Result<()> {
    let curves = precision_recall_curves_by_class(y_true, y_score)?;
    plot_curves(
        y_true,
        y_score,
        &curves,
        options,
        &PR_LAYOUT,
        PRECISION_RECALL_CURVES_FILE,
    )
}

fn plot_curves(
    y_true: &[usize],
    y_score: &[Vec<f64>],
    curves: &[ClassCurve],
    options: &ChartOptions,
    layout: &CurveLayout,
    file_name: &str,
) -> Result<()> {
    let n_classes = score_matrix_width(y_true, y_score)?;
    let labels: Vec<usize> = (0..n_classes).collect();
    let names = options.class_names_for(&labels)?;

    let size = (options.settings.width, options.settings.height);
    render_png(options, file_name, size, |root| {
        draw_curves(root, curves, &names, options, layout)
    })
}

fn draw_curves(
    root: &Surface,
    curves: &[ClassCurve],
    names: &[String],
    options: &ChartOptions,
    layout: &CurveLayout,
) -> Result<()> {
    let settings = &options.settings;

    let mut chart = ChartBuilder::on(root)
        .caption(
            options.title_for(layout.kind),
            font(settings.caption_font_size),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, 0.0..1.05)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(layout.x_desc)
        .y_desc(layout.y_desc)
        .axis_desc_style(font(settings.label_font_size))
        .label_style(font(settings.annotation_font_size));
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for curve in curves {
        let color = rgb(settings.palette_color(curve.class));
        chart
            .draw_series(LineSeries::new(
                curve.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(format!("{} (AUC = {:.2})", names[curve.class], curve.auc))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if layout.diagonal {
        chart.draw_series((0..20).map(|i| {
            let start = i as f64 / 20.0;
            let end = start + 0.025;
            PathElement::new(vec![(start, start), (end, end)], BLACK.stroke_width(1))
        }))?;
    }

    draw_legend(&mut chart, settings, layout.legend.clone())
}
