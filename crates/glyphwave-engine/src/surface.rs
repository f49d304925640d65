//! Drawing surfaces the engine renders onto.

use glyphwave_core::CellMetrics;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};
use tracing::trace;

use crate::grid::SurfaceSize;

/// Color and font metrics used for every glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub font_size: f32,
}

/// A raster target for glyphs.
///
/// Coordinates passed to [`Surface::draw_glyph`] are logical units, the top-left
/// corner of the glyph cell.
pub trait Surface {
    /// Resize to fit the displayed block.
    fn resize(&mut self, size: SurfaceSize);
    /// Erase everything drawn so far.
    fn clear(&mut self);
    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, pen: &Pen);
}

/// Surface backed by a ratatui [`Buffer`], one buffer cell per glyph cell.
///
/// Logical positions are snapped to the nearest buffer cell using the glyph
/// metrics, so sub-cell displacement shows up as whole-cell jumps.
#[derive(Debug, Clone)]
pub struct BufferSurface {
    buffer: Buffer,
    metrics: CellMetrics,
    size: Option<SurfaceSize>,
}

impl BufferSurface {
    pub fn new(metrics: CellMetrics) -> Self {
        Self {
            buffer: Buffer::empty(Rect::ZERO),
            metrics,
            size: None,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    /// Width and height in buffer cells.
    pub fn cell_size(&self) -> (u16, u16) {
        (self.buffer.area.width, self.buffer.area.height)
    }

    /// Buffer cell a logical position falls into.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / self.metrics.cell_width).round();
        let row = (y / self.metrics.line_height).round();
        let area = self.buffer.area;
        if col < 0.0 || row < 0.0 || col >= area.width as f32 || row >= area.height as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

impl Surface for BufferSurface {
    fn resize(&mut self, size: SurfaceSize) {
        let width = (size.logical_width / self.metrics.cell_width).ceil();
        let height = (size.logical_height / self.metrics.line_height).ceil();
        let area = Rect::new(
            0,
            0,
            width.clamp(0.0, u16::MAX as f32) as u16,
            height.clamp(0.0, u16::MAX as f32) as u16,
        );
        trace!(width = area.width, height = area.height, "buffer surface resized");
        self.buffer = Buffer::empty(area);
        self.size = Some(size);
    }

    fn clear(&mut self) {
        self.buffer.reset();
    }

    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, pen: &Pen) {
        let Some((col, row)) = self.to_cell(x, y) else {
            return;
        };
        if let Some(cell) = self.buffer.cell_mut(Position::new(col, row)) {
            cell.set_char(glyph).set_fg(pen.color);
        }
    }
}

impl Widget for &BufferSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let src = self.buffer.area;
        for row in 0..src.height.min(area.height) {
            for col in 0..src.width.min(area.width) {
                let Some(cell) = self.buffer.cell(Position::new(col, row)) else {
                    continue;
                };
                if cell.symbol() == " " {
                    continue;
                }
                if let Some(target) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
                    *target = cell.clone();
                }
            }
        }
    }
}

/// A glyph drawn onto a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnGlyph {
    pub glyph: char,
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

/// Surface that remembers what was drawn since the last clear.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub size: Option<SurfaceSize>,
    pub resizes: usize,
    pub clears: usize,
    pub glyphs: Vec<DrawnGlyph>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: SurfaceSize) {
        self.size = Some(size);
        self.resizes += 1;
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.glyphs.clear();
    }

    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, pen: &Pen) {
        self.glyphs.push(DrawnGlyph {
            glyph,
            x,
            y,
            color: pen.color,
        });
    }
}
