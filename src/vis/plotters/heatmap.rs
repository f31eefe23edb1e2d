//! Confusion matrix heatmaps

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{class_name_at, font, render_png, Surface};
use crate::core::error::Result;
use crate::ml::metrics::confusion::{confusion_matrix, ZeroRowPolicy};
use crate::vis::config::{
    ChartOptions, PlotSettings, ReportPlot, CONFUSION_MATRIX_NORMALIZED_FILE,
    CONFUSION_MATRIX_RAW_FILE,
};

/// Width of the color bar strip (pixels)
const COLORBAR_WIDTH: i32 = 110;
/// Gradient steps drawn in the color bar
const COLORBAR_STEPS: usize = 64;
/// Fill of cells whose value is NaN
const NAN_COLOR: RGBColor = RGBColor(220, 220, 220);

/// Plot the confusion matrix as two heatmaps
///
/// Writes `confusion_matrix_normalized.png` (rows divided by their true
/// sample count) and `confusion_matrix_raw.png` (integer counts, title
/// suffixed with "(Raw Counts)"). The classes are `options.labels` when
/// set, else the sorted union of observed labels. Rows without true samples
/// are normalized according to `options.settings.zero_row_policy`.
pub fn plot_confusion_matrix(
    y_true: &[usize],
    y_pred: &[usize],
    options: &ChartOptions,
) -> Result<()> {
    let cm = confusion_matrix(y_true, y_pred, options.labels.as_deref())?;
    let names = options.class_names_for(cm.labels())?;
    let settings = &options.settings;

    let empty_rows = cm.row_sums().iter().filter(|&&sum| sum == 0).count();
    if empty_rows > 0 && settings.zero_row_policy == ZeroRowPolicy::Nan {
        log::warn!(
            "{} class(es) have no true samples; their normalized rows are NaN",
            empty_rows
        );
    }

    let normalized = cm.normalized(settings.zero_row_policy);
    let counts: Vec<Vec<f64>> = cm
        .counts()
        .iter()
        .map(|row| row.iter().map(|&c| c as f64).collect())
        .collect();

    let title = options.title_for(ReportPlot::ConfusionMatrix);
    let raw_title = format!("{} (Raw Counts)", title);
    let size = (settings.width, settings.height);

    let normalized_map = Heatmap {
        title,
        names: &names,
        annotations: annotate(&normalized, |v| format!("{:.2}", v)),
        cells: &normalized,
    };
    render_png(options, CONFUSION_MATRIX_NORMALIZED_FILE, size, |root| {
        draw_heatmap(root, &normalized_map, settings)
    })?;

    let raw_map = Heatmap {
        title: &raw_title,
        names: &names,
        annotations: annotate(&counts, |v| format!("{}", v as u64)),
        cells: &counts,
    };
    render_png(options, CONFUSION_MATRIX_RAW_FILE, size, |root| {
        draw_heatmap(root, &raw_map, settings)
    })
}

struct Heatmap<'a> {
    title: &'a str,
    names: &'a [String],
    cells: &'a [Vec<f64>],
    annotations: Vec<Vec<String>>,
}

/// Cell labels; NaN cells read "nan"
fn annotate<F>(cells: &[Vec<f64>], format: F) -> Vec<Vec<String>>
where
    F: Fn(f64) -> String,
{
    cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|&v| if v.is_nan() { "nan".to_string() } else { format(v) })
                .collect()
        })
        .collect()
}

/// White-to-blue color scale, `t` in [0, 1]
fn blues(t: f64) -> RGBColor {
    const STOPS: [(f64, (u8, u8, u8)); 3] = [
        (0.0, (247, 251, 255)),
        (0.5, (107, 174, 214)),
        (1.0, (8, 48, 107)),
    ];

    let t = t.clamp(0.0, 1.0);
    let (lo, hi) = if t <= 0.5 {
        (STOPS[0], STOPS[1])
    } else {
        (STOPS[1], STOPS[2])
    };
    let (t0, (r0, g0, b0)) = lo;
    let (t1, (r1, g1, b1)) = hi;
    let f = (t - t0) / (t1 - t0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;

    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Largest finite cell value, used as the top of the color scale
fn scale_max(cells: &[Vec<f64>]) -> f64 {
    let max = cells
        .iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, |acc, &v| acc.max(v));
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn cell_fill(value: f64, max: f64) -> RGBColor {
    if value.is_nan() {
        NAN_COLOR
    } else {
        blues(value / max)
    }
}

fn text_color(value: f64, max: f64) -> RGBColor {
    if !value.is_nan() && value / max > 0.5 {
        WHITE
    } else {
        BLACK
    }
}

/// Axis position of the center of `row`; row 0 is drawn at the top
fn row_center(row: usize, n: usize) -> f64 {
    (n - 1 - row) as f64
}

fn draw_heatmap(root: &Surface, map: &Heatmap, settings: &PlotSettings) -> Result<()> {
    let n = map.names.len();
    let extent = n as f64;
    let max = scale_max(map.cells);

    let root = root.titled(map.title, font(settings.caption_font_size))?;
    let split = (root.dim_in_pixel().0 as i32 - COLORBAR_WIDTH).max(1);
    let (matrix_area, bar_area) = root.split_horizontally(split);

    let mut chart = ChartBuilder::on(&matrix_area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5..extent - 0.5, -0.5..extent - 0.5)?;

    let column_name = |x: &f64| class_name_at(map.names, *x);
    let row_name = |y: &f64| class_name_at(map.names, extent - 1.0 - *y);

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&column_name)
        .y_label_formatter(&row_name)
        .x_desc("Predicted Label")
        .y_desc("True Label")
        .axis_desc_style(font(settings.label_font_size))
        .label_style(font(settings.label_font_size))
        .draw()?;

    chart.draw_series(map.cells.iter().enumerate().flat_map(|(row, values)| {
        let y = row_center(row, n);
        values.iter().enumerate().map(move |(col, &value)| {
            let x = col as f64;
            Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                cell_fill(value, max).filled(),
            )
        })
    }))?;

    let annotation_size = settings.annotation_font_size;
    let cells = map.cells;
    chart.draw_series(map.annotations.iter().enumerate().flat_map(|(row, texts)| {
        let y = row_center(row, n);
        texts.iter().enumerate().map(move |(col, text)| {
            let value = cells[row][col];
            Text::new(
                text.clone(),
                (col as f64, y),
                font(annotation_size)
                    .color(&text_color(value, max))
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            )
        })
    }))?;

    draw_colorbar(&bar_area, max, settings)
}

fn draw_colorbar(area: &Surface, max: f64, settings: &PlotSettings) -> Result<()> {
    let mut bar = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..max)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .label_style(font(settings.annotation_font_size))
        .draw()?;

    let step = max / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let low = i as f64 * step;
        Rectangle::new(
            [(0.0, low), (1.0, low + step)],
            blues((i as f64 + 0.5) / COLORBAR_STEPS as f64).filled(),
        )
    }))?;

    Ok(())
}
