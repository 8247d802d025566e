//! Hierarchy view: squarified treemap of the goods composition.
//!
//! The drawing surface splits into a title band (root name), a category
//! band (depth-1 names in their series color), and the tiled region below.
//! Hover interaction is modeled as data: an optional pointer position goes
//! in, and the tooltip's existence, content, and placement all derive from
//! it through [`tooltip_for`] — there is no retained tooltip state between
//! renders.

use crate::format::format_usd;
use crate::hierarchy::GoodsTree;
use crate::viz::text::{estimate_text_width_px, truncate_to_width};
use crate::viz::treemap::{Cell, Rect, hit_test, layout_tree};
use crate::viz::{Placeholder, ensure_fonts_registered, flow_color, render_placeholder};
use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::PathBuf;

/// Height of the band carrying the root title, in pixels.
pub const TITLE_BAND: f64 = 30.0;
/// Height of the band carrying the category headers, in pixels.
pub const LABEL_BAND: f64 = 25.0;

/// Floating tooltip, fully derived from a hover position. Visibility is
/// binary: a hovered cell produces a tooltip, no hover produces none.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// `"{titlePrefix} - {name}"` of the hovered cell.
    pub title: String,
    /// `"Value: $1.3M"`.
    pub value_line: String,
    /// `"Share: 12.5%"` of the cell's top-level category.
    pub share_line: String,
    /// Top-left corner, offset from the pointer (+10, -28).
    pub x: f64,
    pub y: f64,
}

/// Derive the tooltip for a pointer position, or `None` when the pointer
/// touches no cell. Overlapping cells resolve to the topmost one.
pub fn tooltip_for(tree: &GoodsTree, cells: &[Cell], pointer: (f64, f64)) -> Option<Tooltip> {
    let cell = hit_test(cells, pointer.0, pointer.1)?;
    let share = tree.category_share(&cell.category, cell.value);
    let title = match &cell.title_prefix {
        Some(prefix) => format!("{} - {}", prefix, cell.name),
        None => cell.name.clone(),
    };
    Some(Tooltip {
        title,
        value_line: format!("Value: {}", format_usd(cell.value)),
        share_line: format!("Share: {:.1}%", share),
        x: pointer.0 + 10.0,
        y: pointer.1 - 28.0,
    })
}

/// Owns the treemap output surface. Every render clears the surface and
/// redraws the whole scene; re-rendering is idempotent.
#[derive(Debug, Clone)]
pub struct HierarchyView {
    pub out_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl HierarchyView {
    pub fn new(out_path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            out_path: out_path.into(),
            width,
            height,
        }
    }

    /// Region available to the tiling: everything below the two bands.
    pub fn cell_region(&self) -> Rect {
        Rect::new(
            0.0,
            TITLE_BAND + LABEL_BAND,
            self.width as f64,
            self.height as f64,
        )
    }

    /// Lay out the tree for this surface. Exposed so callers (and the
    /// tooltip derivation) can hit-test without re-rendering.
    pub fn layout(&self, tree: &GoodsTree) -> Vec<Cell> {
        layout_tree(&tree.root, self.cell_region())
    }

    /// Render the tree; when `hover` is set, the derived tooltip is drawn
    /// near the pointer.
    pub fn render(&self, tree: &GoodsTree, hover: Option<(f64, f64)>) -> Result<()> {
        ensure_fonts_registered();
        let path_string = self.out_path.to_string_lossy().into_owned();
        if self.out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
            let root =
                SVGBackend::new(path_string.as_str(), (self.width, self.height)).into_drawing_area();
            self.draw_treemap(root, tree, hover)
        } else {
            let root = BitMapBackend::new(path_string.as_str(), (self.width, self.height))
                .into_drawing_area();
            self.draw_treemap(root, tree, hover)
        }
    }

    /// Replace the surface with a placeholder card (loading / no data /
    /// error).
    pub fn render_placeholder(&self, placeholder: Placeholder) -> Result<()> {
        render_placeholder(&self.out_path, self.width, self.height, placeholder)
    }

    fn draw_treemap<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
        tree: &GoodsTree,
        hover: Option<(f64, f64)>,
    ) -> Result<()>
    where
        DB: DrawingBackend,
    {
        root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let width = self.width as f64;

        // Title band: the root's name, centered.
        let title_style = TextStyle::from((FontFamily::SansSerif, 16))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            tree.root.name.as_str(),
            ((width / 2.0) as i32, (TITLE_BAND / 2.0) as i32),
            title_style,
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        // Category band: depth-1 names in full-opacity series color, one
        // evenly sized slot per category.
        let categories = &tree.root.children;
        for (i, category) in categories.iter().enumerate() {
            let slot = width / categories.len() as f64;
            let x = slot * i as f64 + slot / 2.0;
            let category_color = flow_color(&category.name);
            let style = TextStyle::from((FontFamily::SansSerif, 14))
                .color(&category_color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(
                category.name.as_str(),
                (x as i32, (TITLE_BAND + LABEL_BAND / 2.0) as i32),
                style,
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }

        // Cells: parents first, children overdraw them.
        let cells = self.layout(tree);
        for cell in &cells {
            let color = flow_color(&cell.category);
            let corners = [
                (cell.rect.x0 as i32, cell.rect.y0 as i32),
                (cell.rect.x1 as i32, cell.rect.y1 as i32),
            ];
            root.draw(&Rectangle::new(corners, color.mix(0.3).filled()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            root.draw(&Rectangle::new(corners, WHITE.stroke_width(1)))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            if cell.leaf {
                self.draw_cell_labels(&root, cell)?;
            }
        }

        if let Some(pointer) = hover
            && let Some(tooltip) = tooltip_for(tree, &cells, pointer)
        {
            self.draw_tooltip(&root, &tooltip)?;
        }

        root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(())
    }

    /// Always-visible in-cell labels: title prefix, formatted value below.
    fn draw_cell_labels<DB>(&self, root: &DrawingArea<DB, Shift>, cell: &Cell) -> Result<()>
    where
        DB: DrawingBackend,
    {
        const FONT_PX: u32 = 12;
        let avail = cell.rect.width() as u32;
        if cell.rect.height() < 16.0 || avail < 12 {
            return Ok(());
        }
        let style = TextStyle::from((FontFamily::SansSerif, FONT_PX)).color(&BLACK);
        let x = (cell.rect.x0 + 4.0) as i32;
        if let Some(prefix) = &cell.title_prefix {
            let text = truncate_to_width(prefix, FONT_PX, avail.saturating_sub(8));
            if !text.is_empty() {
                root.draw(&Text::new(text, (x, (cell.rect.y0 + 6.0) as i32), style.clone()))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
        }
        if cell.rect.height() >= 34.0 {
            let value = truncate_to_width(&format_usd(cell.value), FONT_PX, avail.saturating_sub(8));
            if !value.is_empty() {
                root.draw(&Text::new(value, (x, (cell.rect.y0 + 20.0) as i32), style))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
        }
        Ok(())
    }

    fn draw_tooltip<DB>(&self, root: &DrawingArea<DB, Shift>, tooltip: &Tooltip) -> Result<()>
    where
        DB: DrawingBackend,
    {
        const FONT_PX: u32 = 12;
        const PAD: f64 = 8.0;
        const LINE_H: f64 = 16.0;
        let lines = [
            tooltip.title.as_str(),
            tooltip.value_line.as_str(),
            tooltip.share_line.as_str(),
        ];
        let text_w = lines
            .iter()
            .map(|l| estimate_text_width_px(l, FONT_PX))
            .max()
            .unwrap_or(0) as f64;
        let box_w = text_w + PAD * 2.0;
        let box_h = LINE_H * lines.len() as f64 + PAD * 2.0;
        // Keep the box on the surface.
        let x0 = tooltip.x.min(self.width as f64 - box_w).max(0.0);
        let y0 = tooltip.y.min(self.height as f64 - box_h).max(0.0);

        let corners = [
            (x0 as i32, y0 as i32),
            ((x0 + box_w) as i32, (y0 + box_h) as i32),
        ];
        root.draw(&Rectangle::new(corners, WHITE.filled()))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        root.draw(&Rectangle::new(
            corners,
            RGBColor(221, 221, 221).stroke_width(1),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let style = TextStyle::from((FontFamily::SansSerif, FONT_PX)).color(&BLACK);
        for (i, line) in lines.iter().enumerate() {
            root.draw(&Text::new(
                *line,
                ((x0 + PAD) as i32, (y0 + PAD + LINE_H * i as f64) as i32),
                style.clone(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        Ok(())
    }
}
