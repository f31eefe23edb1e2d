//! Grouped bar chart of one metrics record

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{class_name_at, draw_legend, font, render_png, rgb, Surface};
use crate::core::error::Result;
use crate::ml::metrics::record::MetricsRecord;
use crate::vis::config::{ChartOptions, ReportPlot, CLASSIFICATION_METRICS_FILE};

/// Width of a single bar, in units of class spacing
const BAR_WIDTH: f64 = 0.2;

/// Plot precision, recall, F1 and AUC (when present) as grouped bars
///
/// Writes `classification_metrics.png`: one group per class, bars in the
/// order precision, recall, F1, AUC, each annotated with its value to two
/// decimals.
pub fn plot_metrics_bar(metrics: &MetricsRecord, options: &ChartOptions) -> Result<()> {
    metrics.validate()?;
    let names = options.class_names_for(metrics.labels())?;

    let size = (options.settings.width, options.settings.height);
    render_png(options, CLASSIFICATION_METRICS_FILE, size, |root| {
        draw_bars(root, metrics, &names, options)
    })
}

/// Horizontal offset of the `slot`-th bar of a group of `bars`, centered on the class
fn bar_offset(slot: usize, bars: usize) -> f64 {
    (slot as f64 - (bars as f64 - 1.0) / 2.0) * BAR_WIDTH
}

fn draw_bars(
    root: &Surface,
    metrics: &MetricsRecord,
    names: &[String],
    options: &ChartOptions,
) -> Result<()> {
    let settings = &options.settings;
    let n_classes = metrics.n_classes();
    let bars = metrics.metrics();

    let highest = bars
        .iter()
        .filter_map(|&metric| metrics.values(metric))
        .flatten()
        .fold(1.0_f64, |acc, &v| acc.max(v));
    let y_top = highest * 1.15;

    let mut chart = ChartBuilder::on(root)
        .caption(
            options.title_for(ReportPlot::MetricsBar),
            font(settings.caption_font_size),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..n_classes as f64 - 0.5, 0.0..y_top)?;

    let class_label = |x: &f64| class_name_at(names, *x);

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(n_classes)
        .x_label_formatter(&class_label)
        .y_desc("Score")
        .axis_desc_style(font(settings.label_font_size))
        .label_style(font(settings.label_font_size));
    if !settings.show_grid {
        mesh.disable_y_mesh();
    }
    mesh.draw()?;

    let annotation = font(settings.annotation_font_size)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (slot, &metric) in bars.iter().enumerate() {
        let values = match metrics.values(metric) {
            Some(values) => values,
            None => continue,
        };
        let color = rgb(settings.palette_color(slot));
        let offset = bar_offset(slot, bars.len());

        chart
            .draw_series(values.iter().enumerate().map(|(class, &value)| {
                let left = class as f64 + offset - BAR_WIDTH / 2.0;
                let right = class as f64 + offset + BAR_WIDTH / 2.0;
                Rectangle::new([(left, 0.0), (right, value)], color.filled())
            }))?
            .label(metric.display_name())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));

        chart.draw_series(values.iter().enumerate().map(|(class, &value)| {
            Text::new(
                format!("{:.2}", value),
                (class as f64 + offset, value + y_top * 0.005),
                annotation.clone(),
            )
        }))?;
    }

    draw_legend(&mut chart, settings, SeriesLabelPosition::UpperRight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_offsets_are_centered() {
        let four: Vec<f64> = (0..4).map(|slot| bar_offset(slot, 4)).collect();
        let expected = [-0.3, -0.1, 0.1, 0.3];
        for (got, want) in four.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12);
        }
        assert!(bar_offset(1, 3).abs() < 1e-12);
    }
}
