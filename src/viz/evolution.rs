//! Evolution view: grouped bar chart of yearly exports and imports.

use crate::format::format_usd;
use crate::series::EvolutionSeries;
use crate::viz::{
    EXPORTS_COLOR, IMPORTS_COLOR, Placeholder, ensure_fonts_registered, render_placeholder,
};
use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::PathBuf;

/// Owns the bar-chart output surface.
///
/// The charting layer cannot reliably rebind axes/series across datasets of
/// different lengths, so every render tears the surface down and rebuilds it
/// from scratch: a fresh backend over the same path, never an in-place
/// mutation of the previous drawing.
#[derive(Debug, Clone)]
pub struct EvolutionView {
    pub out_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl EvolutionView {
    pub fn new(out_path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            out_path: out_path.into(),
            width,
            height,
        }
    }

    /// Render the series as grouped per-year bars: "Exports" (blue) and
    /// "Imports" (red) on one linear value axis anchored at zero. Value
    /// ticks go through the shared compact-currency formatter; the year
    /// axis shows discrete labels with its gridlines suppressed.
    pub fn render(&self, series: &EvolutionSeries) -> Result<()> {
        ensure_fonts_registered();
        let path_string = self.out_path.to_string_lossy().into_owned();
        if self.out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
            let root =
                SVGBackend::new(path_string.as_str(), (self.width, self.height)).into_drawing_area();
            draw_bars(root, series)
        } else {
            let root = BitMapBackend::new(path_string.as_str(), (self.width, self.height))
                .into_drawing_area();
            draw_bars(root, series)
        }
    }

    /// Replace the surface with a placeholder card (loading / no data /
    /// error).
    pub fn render_placeholder(&self, placeholder: Placeholder) -> Result<()> {
        render_placeholder(&self.out_path, self.width, self.height, placeholder)
    }
}

fn draw_bars<DB>(root: DrawingArea<DB, Shift>, series: &EvolutionSeries) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Labels are sorted ascending by the transform.
    let (mut min_year, mut max_year) = (
        *series.labels.first().unwrap_or(&0),
        *series.labels.last().unwrap_or(&0),
    );
    if min_year == max_year {
        min_year -= 1;
        max_year += 1;
    }
    let x_min = min_year as f64 - 0.75;
    let x_max = max_year as f64 + 0.75;

    let max_val = series
        .exports
        .iter()
        .chain(series.imports.iter())
        .cloned()
        .fold(0.0f64, f64::max);
    let y_max = if max_val > 0.0 { max_val * 1.05 } else { 1.0 };

    let x_label_fmt = |x: &f64| (x.round() as i32).to_string();
    let y_label_fmt = |v: &f64| format_usd(*v);

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption("Trade Evolution", (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Year")
        .x_labels(series.len().min(12))
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Two bars per year, fixed order and colors.
    let group_width = 0.8f64;
    let bar_w = group_width / 2.0;
    let flows: [(&[f64], RGBColor, &str); 2] = [
        (&series.exports, EXPORTS_COLOR, "Exports"),
        (&series.imports, IMPORTS_COLOR, "Imports"),
    ];
    for (idx, (values, color, label)) in flows.iter().enumerate() {
        let bars = series.labels.iter().zip(values.iter()).map(|(year, v)| {
            let x0 = *year as f64 - group_width / 2.0 + idx as f64 * bar_w;
            let x1 = x0 + bar_w;
            Rectangle::new([(x0, 0.0), (x1, *v)], color.mix(0.7).filled())
        });
        let legend_color = *color;
        chart
            .draw_series(bars)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .label(*label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], legend_color.mix(0.7).filled())
            });
        // 1px full-opacity borders over the translucent fills.
        let borders = series.labels.iter().zip(values.iter()).map(|(year, v)| {
            let x0 = *year as f64 - group_width / 2.0 + idx as f64 * bar_w;
            let x1 = x0 + bar_w;
            Rectangle::new([(x0, 0.0), (x1, *v)], color.stroke_width(1))
        });
        chart
            .draw_series(borders)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
