//! Per-class metric lines across evaluation rounds

use plotters::prelude::*;

use super::{draw_legend, font, render_png, Surface};
use crate::core::error::Result;
use crate::ml::metrics::record::{Metric, MetricsRecord};
use crate::vis::config::{ChartOptions, ReportPlot, METRICS_OVER_TIME_FILE};
use crate::vis::series::{metrics_over_time_series, ClassSeries};

/// Line color of each metric
fn metric_color(metric: Metric) -> RGBColor {
    match metric {
        Metric::Precision => BLUE,
        Metric::Recall => RGBColor(0, 128, 0),
        Metric::F1 => RED,
        Metric::Auc => RGBColor(191, 191, 0),
    }
}

/// Plot metrics history as one subplot per class into `metrics_over_time.png`
///
/// Each subplot draws precision, recall, F1 and (when the history has it)
/// AUC against the 1-based round index. Subplots share one row and the
/// figure title.
pub fn plot_metrics_line(history: &[MetricsRecord], options: &ChartOptions) -> Result<()> {
    let series = metrics_over_time_series(history)?;
    let labels: Vec<usize> = series.iter().map(|s| s.label).collect();
    let names = options.class_names_for(&labels)?;

    let size = (options.settings.width, options.settings.height);
    render_png(options, METRICS_OVER_TIME_FILE, size, |root| {
        draw_lines(root, &series, &names, history.len(), options)
    })
}

fn draw_lines(
    root: &Surface,
    series: &[ClassSeries],
    names: &[String],
    rounds: usize,
    options: &ChartOptions,
) -> Result<()> {
    let settings = &options.settings;
    let root = root.titled(
        options.title_for(ReportPlot::MetricsOverTime),
        font(settings.caption_font_size),
    )?;
    let panels = root.split_evenly((1, series.len()));
    let last_round = rounds.max(2) as i32;

    for (panel, class) in panels.iter().zip(series) {
        let mut chart = ChartBuilder::on(panel)
            .caption(&names[class.index], font(settings.label_font_size))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(50)
            .build_cartesian_2d(1..last_round, 0.0..1.05)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc("Epoch")
            .y_desc("Score")
            .axis_desc_style(font(settings.label_font_size))
            .label_style(font(settings.annotation_font_size));
        if !settings.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        for line in &class.lines {
            let color = metric_color(line.metric);
            chart
                .draw_series(LineSeries::new(
                    line.points.iter().copied(),
                    color.stroke_width(2),
                ))?
                .label(line.metric.display_name())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            chart.draw_series(
                line.points
                    .iter()
                    .map(|&point| Circle::new(point, 3, color.filled())),
            )?;
        }

        draw_legend(&mut chart, settings, SeriesLabelPosition::LowerRight)?;
    }

    Ok(())
}
