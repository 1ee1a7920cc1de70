//! Terminal stand-in for the LED matrix.
//!
//! Each frame is drawn as a coarse character grid, one cell per 2×4 matrix
//! pixels, continuing the log tree so frames and log lines read together.
//! Bitmaps are drawn as a shaded block; labels in the background colour are
//! outlines and are not drawn. The grid is only repainted when the frame
//! changes.

use anyhow::{Context, Result};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{Stdout, Write};

use crate::common::color::Rgb;
use crate::common::constants::{COLOR_OUTLINE, MATRIX_HEIGHT, MATRIX_WIDTH};
use crate::display::layout::Orientation;
use crate::display::{DisplayFrame, DisplaySink, TextLabel};

const PIXELS_PER_COLUMN: i32 = 2;
const PIXELS_PER_ROW: i32 = 4;
/// Bitmaps are 32×32 pixels.
const IMAGE_SIZE: i32 = 32;
const EMPTY_CELL: char = '·';
const IMAGE_CELL: char = '░';
const IMAGE_COLOR: Rgb = Rgb::new(0x404040);
const EMPTY_COLOR: Rgb = Rgb::new(0x303030);

type Cell = Option<(char, Rgb)>;

pub struct TerminalSink<W: Write> {
    out: W,
    columns: usize,
    rows: usize,
    use_color: bool,
    last: Option<DisplayFrame>,
}

impl TerminalSink<Stdout> {
    pub fn stdout(orientation: Orientation) -> Self {
        Self::new(std::io::stdout(), orientation)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, orientation: Orientation) -> Self {
        let (width, height) = if orientation.is_landscape() {
            (MATRIX_WIDTH, MATRIX_HEIGHT)
        } else {
            (MATRIX_HEIGHT, MATRIX_WIDTH)
        };
        Self {
            out,
            columns: (width / PIXELS_PER_COLUMN) as usize,
            rows: (height / PIXELS_PER_ROW) as usize,
            use_color: true,
            last: None,
        }
    }

    /// Disable ANSI colours, e.g. when output is not a terminal.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn grid(&self, frame: &DisplayFrame) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![None; self.columns]; self.rows];
        let DisplayFrame::Day(day) = frame else {
            return grid;
        };

        let (left, top) = (day.trash.x, day.trash.y);
        for y in (top..top + IMAGE_SIZE).step_by(PIXELS_PER_ROW as usize) {
            for x in (left..left + IMAGE_SIZE).step_by(PIXELS_PER_COLUMN as usize) {
                self.put(&mut grid, x, y, (IMAGE_CELL, IMAGE_COLOR));
            }
        }

        for label in day.labels() {
            self.draw_label(&mut grid, label);
        }
        grid
    }

    fn draw_label(&self, grid: &mut [Vec<Cell>], label: &TextLabel) {
        if label.color == Rgb::new(COLOR_OUTLINE) {
            return;
        }
        for (i, c) in label.text.chars().enumerate() {
            if c != ' ' {
                let x = label.x + i as i32 * PIXELS_PER_COLUMN;
                self.put(grid, x, label.y, (c, label.color));
            }
        }
    }

    fn put(&self, grid: &mut [Vec<Cell>], x: i32, y: i32, cell: (char, Rgb)) {
        if x < 0 || y < 0 {
            return;
        }
        let (column, row) = (
            (x / PIXELS_PER_COLUMN) as usize,
            (y / PIXELS_PER_ROW) as usize,
        );
        if let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(column)) {
            *slot = Some(cell);
        }
    }

    fn write_cell(&mut self, c: char, color: Rgb) -> Result<()> {
        if self.use_color {
            queue!(
                self.out,
                SetForegroundColor(Color::Rgb {
                    r: color.r(),
                    g: color.g(),
                    b: color.b(),
                }),
                Print(c)
            )?;
        } else {
            queue!(self.out, Print(c))?;
        }
        Ok(())
    }

    fn paint(&mut self, frame: &DisplayFrame) -> Result<()> {
        match frame {
            DisplayFrame::Night => {
                queue!(self.out, Print("┃\n┣ Matrix dark (night mode)\n"))?;
            }
            DisplayFrame::Splash { asset_key } => {
                queue!(self.out, Print(format!("┃\n┣ Matrix showing {asset_key}\n")))?;
            }
            DisplayFrame::Day(day) => {
                queue!(self.out, Print(format!("┃\n┣ Matrix ({})\n", day.trash.asset_key)))?;
                for row in self.grid(frame) {
                    queue!(self.out, Print("┃   "))?;
                    for cell in row {
                        let (c, color) = cell.unwrap_or((EMPTY_CELL, EMPTY_COLOR));
                        self.write_cell(c, color)?;
                    }
                    if self.use_color {
                        queue!(self.out, ResetColor)?;
                    }
                    queue!(self.out, Print("\n"))?;
                }
            }
        }
        self.out.flush().context("failed to flush terminal output")?;
        Ok(())
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn show(&mut self, frame: &DisplayFrame) -> Result<()> {
        if self.last.as_ref() == Some(frame) {
            return Ok(());
        }
        self.paint(frame)?;
        self.last = Some(frame.clone());
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "terminal"
    }

    fn cleanup(&mut self) {
        if self.use_color {
            let _ = queue!(self.out, ResetColor);
        }
        let _ = self.out.flush();
    }
}
