//! Character grid and world-to-cell projection

use std::fmt;

use glam::DVec2;

use crate::settings::Settings;

/// Blank cell
pub const BLANK: char = ' ';

/// A fixed-size character grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Frame {
    /// A grid filled with blanks
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Write a cell; coordinates outside the grid are silently dropped
    pub fn set(&mut self, col: i64, row: i64, glyph: char) {
        let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
            return;
        };
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = glyph;
        }
    }

    /// Iterate rows as strings
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().collect())
    }

    /// Number of cells holding `glyph`
    pub fn count(&self, glyph: char) -> usize {
        self.cells.iter().filter(|&&c| c == glyph).count()
    }

    /// Position of the first cell holding `glyph`, as (col, row)
    pub fn find(&self, glyph: char) -> Option<(usize, usize)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .position(|&c| c == glyph)
            .map(|i| (i % width, i / width))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Maps arena coordinates onto grid cells
///
/// The arena center sits on the middle cell. Rows are squashed relative to
/// columns because terminal cells are roughly twice as tall as they are wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub center_col: i64,
    pub center_row: i64,
    /// Columns per world unit
    pub scale: f64,
    /// Rows per column-width
    pub squash: f64,
}

impl Projection {
    pub fn for_grid(width: usize, height: usize, scale: f64, squash: f64) -> Self {
        Self {
            center_col: (width / 2) as i64,
            center_row: (height / 2) as i64,
            scale,
            squash,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::for_grid(
            settings.grid_width,
            settings.grid_height,
            settings.grid_scale,
            settings.grid_squash,
        )
    }

    /// Cell (col, row) for a world point; may lie outside the grid
    pub fn project(&self, point: DVec2) -> (i64, i64) {
        // `as` saturates, so far-off points stay far off instead of wrapping
        let col = self.center_col.saturating_add((point.x * self.scale).round() as i64);
        let row = self
            .center_row
            .saturating_add((point.y * self.scale * self.squash).round() as i64);
        (col, row)
    }
}
