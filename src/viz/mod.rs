//! Visualization: render the two trade charts to **SVG** or **PNG**.
//!
//! - Fixed series roles: "Exports" (blue) and "Imports" (red), used
//!   identically by the bar chart and the treemap
//! - Backend picked by output extension (`.svg` -> SVG, anything else ->
//!   bitmap/PNG)
//! - Placeholder cards for the loading / no-data / error states a surface
//!   can be in between renders

pub mod evolution;
pub mod hierarchy;
pub mod text;
pub mod treemap;

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::Once;

/// Series color for exports (#36A2EB).
pub const EXPORTS_COLOR: RGBColor = RGBColor(54, 162, 235);
/// Series color for imports (#FF6384).
pub const IMPORTS_COLOR: RGBColor = RGBColor(255, 99, 132);

/// Fixed color role for a top-level flow name. Everything that is not
/// "Imports" takes the exports color, so the two-category invariant degrades
/// gracefully on unexpected payloads.
pub fn flow_color(name: &str) -> RGBColor {
    if name == "Imports" {
        IMPORTS_COLOR
    } else {
        EXPORTS_COLOR
    }
}

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS
/// fonts.
static INIT_FONTS: Once = Once::new();

pub(crate) fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// The states a chart surface can show in place of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    NoTradeData,
    NoGoodsData,
    Error,
}

impl Placeholder {
    pub fn message(self) -> &'static str {
        match self {
            Placeholder::Loading => "Loading data...",
            Placeholder::NoTradeData => "No trade data available",
            Placeholder::NoGoodsData => "No goods data available",
            Placeholder::Error => "Error loading data",
        }
    }
}

/// Overwrite the surface at `path` with a centered placeholder card.
pub fn render_placeholder(
    path: &Path,
    width: u32,
    height: u32,
    placeholder: Placeholder,
) -> Result<()> {
    ensure_fonts_registered();
    let path_string = path.to_string_lossy().into_owned();
    if path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_placeholder(root, placeholder)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_placeholder(root, placeholder)
    }
}

fn draw_placeholder<DB>(root: DrawingArea<DB, Shift>, placeholder: Placeholder) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let (w, h) = root.dim_in_pixel();
    let style = TextStyle::from((FontFamily::SansSerif, 16))
        .color(&RGBColor(102, 102, 102))
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        placeholder.message(),
        (w as i32 / 2, h as i32 / 2),
        style,
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
