//! High-quality visualization using Plotters
//!
//! Every public function here renders one chart into a PNG file inside the
//! caller's output directory. Each call owns its drawing area for the whole
//! render and releases it before returning, so charts never share state.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::core::error::Result;
use crate::vis::config::{ChartOptions, PlotSettings};
use crate::vis::ensure_dir;

mod bars;
mod curves;
mod heatmap;
mod lines;

pub use self::bars::plot_metrics_bar;
pub use self::curves::{plot_precision_recall_curve, plot_roc_curve};
pub use self::heatmap::plot_confusion_matrix;
pub use self::lines::plot_metrics_line;

/// Drawing surface handed to each chart
type Surface<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FONT_FAMILY: &str = "sans-serif";

/// Font of the configured size
fn font(size: u32) -> FontDesc<'static> {
    (FONT_FAMILY, size as f64).into_font()
}

fn rgb(color: (u8, u8, u8)) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Render one PNG file into the output directory
///
/// The bitmap surface lives only inside this call: it is filled white,
/// handed to `draw`, flushed with `present` and dropped on every exit path.
fn render_png<F>(options: &ChartOptions, file_name: &str, size: (u32, u32), draw: F) -> Result<()>
where
    F: FnOnce(&Surface) -> Result<()>,
{
    options.settings.validate()?;
    ensure_dir(&options.save_dir)?;

    let path = options.output_path(file_name);
    {
        let root = BitMapBackend::new(&path, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }

    log::info!("Saved {}", path.display());
    Ok(())
}

/// Display name of the class centered on `coord`
///
/// Class axes put class `i` at `i`; ticks that do not fall on a class
/// center get no label.
fn class_name_at(names: &[String], coord: f64) -> String {
    let center = coord.round();
    if (coord - center).abs() > 1e-6 || center < 0.0 {
        return String::new();
    }
    names.get(center as usize).cloned().unwrap_or_default()
}

/// Draw the series legend when enabled
fn draw_legend<'a, DB, CT>(
    chart: &mut ChartContext<'a, DB, CT>,
    settings: &PlotSettings,
    position: SeriesLabelPosition,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    CT: CoordTranslate,
{
    if settings.show_legend {
        chart
            .configure_series_labels()
            .position(position)
            .label_font(font(settings.label_font_size))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    Ok(())
}
