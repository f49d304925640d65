//! Glyph grid built from an art block.

use glyphwave_core::{ArtBlock, BLANK, CellMetrics};

/// One glyph position of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Glyph currently displayed.
    pub glyph: char,
    pub row: usize,
    pub col: usize,
    /// Rest position, fixed until the grid is rebuilt.
    pub rest_x: f32,
    pub rest_y: f32,
    /// Current displayed position.
    pub x: f32,
    pub y: f32,
    /// Velocity in logical units per frame.
    pub vx: f32,
    pub vy: f32,
}

impl Cell {
    fn at_rest(glyph: char, row: usize, col: usize, metrics: &CellMetrics) -> Self {
        let rest_x = col as f32 * metrics.cell_width;
        let rest_y = row as f32 * metrics.line_height;
        Self {
            glyph,
            row,
            col,
            rest_x,
            rest_y,
            x: rest_x,
            y: rest_y,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Blank cells take part in physics and morphing but are never drawn.
    pub fn is_blank(&self) -> bool {
        self.glyph == BLANK
    }

    /// Offset of the displayed position from rest.
    pub fn offset(&self) -> (f32, f32) {
        (self.x - self.rest_x, self.y - self.rest_y)
    }
}

/// Logical and backing dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub logical_width: f32,
    pub logical_height: f32,
    pub backing_width: u32,
    pub backing_height: u32,
    /// Backing pixels per logical unit.
    pub density: f32,
}

/// Flat, row-major collection of cells.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
    metrics: CellMetrics,
}

impl Grid {
    /// Build a grid with one cell per (row, col) of `block`, all at rest.
    pub fn build(block: &ArtBlock, metrics: CellMetrics) -> Self {
        let mut grid = Self {
            cells: Vec::new(),
            rows: 0,
            cols: 0,
            metrics,
        };
        grid.rebuild(block);
        grid
    }

    /// Replace every cell with fresh ones for `block`.
    ///
    /// Any displacement or velocity left from the previous grid is discarded.
    pub fn rebuild(&mut self, block: &ArtBlock) {
        let (rows, cols) = (block.height(), block.width());
        self.cells.clear();
        self.cells.reserve(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                self.cells
                    .push(Cell::at_rest(block.glyph(row, col), row, col, &self.metrics));
            }
        }
        self.rows = rows;
        self.cols = cols;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Content size in logical units.
    pub fn content_size(&self) -> (f32, f32) {
        (
            self.cols as f32 * self.metrics.cell_width,
            self.rows as f32 * self.metrics.line_height,
        )
    }

    /// Surface dimensions for a display with `density` backing pixels per logical unit.
    ///
    /// Logical coordinates are unaffected by the density.
    pub fn surface_size(&self, density: f32) -> SurfaceSize {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            1.0
        };
        let (logical_width, logical_height) = self.content_size();
        SurfaceSize {
            logical_width,
            logical_height,
            backing_width: (logical_width * density).ceil() as u32,
            backing_height: (logical_height * density).ceil() as u32,
            density,
        }
    }

    /// Displayed glyphs as newline separated rows.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for (i, row) in self.cells.chunks(self.cols.max(1)).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|cell| cell.glyph));
        }
        out
    }
}
