//! Terminal surface: scales window pixels onto character cells.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use super::{Rgb, Surface};
use crate::geometry::{is_point_in_circle, Circle, Rect, Vector2};

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Cell range `[start, end)` covering `[lo, hi]` pixels, clipped to the
/// terminal. Anything that touches a cell gets at least that cell.
fn cell_span(lo: f64, hi: f64, scale: f64, cells: u16) -> Option<(u16, u16)> {
    let start = (lo * scale).floor();
    let end = (hi * scale).ceil().max(start + 1.0);
    let start = start.max(0.0);
    let end = end.min(f64::from(cells));
    if start >= end {
        return None;
    }
    Some((start as u16, end as u16))
}

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    window_width: f64,
    window_height: f64,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, window_width: f64, window_height: f64) -> Self {
        Self {
            out,
            cols,
            rows,
            window_width,
            window_height,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn scale_x(&self) -> f64 {
        f64::from(self.cols) / self.window_width
    }

    fn scale_y(&self) -> f64 {
        f64::from(self.rows) / self.window_height
    }

    /// Window pixel at the center of a terminal cell.
    pub fn cell_to_pixel(&self, col: u16, row: u16) -> Vector2 {
        Vector2::new(
            (f64::from(col) + 0.5) / self.scale_x(),
            (f64::from(row) + 0.5) / self.scale_y(),
        )
    }

    /// Cell containing a window pixel, if it is on screen.
    pub fn pixel_to_cell(&self, p: Vector2) -> Option<(u16, u16)> {
        let col = (p.x * self.scale_x()).floor();
        let row = (p.y * self.scale_y()).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(self.cols) || row >= f64::from(self.rows) {
            return None;
        }
        Some((col as u16, row as u16))
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint_cell(&mut self, col: u16, row: u16, color: Rgb) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetBackgroundColor(to_color(color)))?;
        self.out.queue(Print(' '))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self, color: Rgb) -> io::Result<()> {
        let line = " ".repeat(self.cols as usize);
        self.out.queue(style::SetBackgroundColor(to_color(color)))?;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> io::Result<()> {
        let Some((c0, c1)) = cell_span(rect.left, rect.right, self.scale_x(), self.cols) else {
            return Ok(());
        };
        let Some((r0, r1)) = cell_span(rect.top, rect.bottom, self.scale_y(), self.rows) else {
            return Ok(());
        };

        let line = " ".repeat((c1 - c0) as usize);
        self.out.queue(style::SetBackgroundColor(to_color(color)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn fill_circle(&mut self, circle: Circle, color: Rgb) -> io::Result<()> {
        let c = circle.center;
        let r = circle.radius;
        let Some((c0, c1)) = cell_span(c.x - r, c.x + r, self.scale_x(), self.cols) else {
            return Ok(());
        };
        let Some((r0, r1)) = cell_span(c.y - r, c.y + r, self.scale_y(), self.rows) else {
            return Ok(());
        };

        let mut painted = false;
        for row in r0..r1 {
            for col in c0..c1 {
                if is_point_in_circle(self.cell_to_pixel(col, row), circle) {
                    self.paint_cell(col, row, color)?;
                    painted = true;
                }
            }
        }
        // Circles smaller than a cell still show up as one cell.
        if !painted {
            if let Some((col, row)) = self.pixel_to_cell(c) {
                self.paint_cell(col, row, color)?;
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, at: Vector2, text: &str, color: Rgb) -> io::Result<()> {
        let Some((col, row)) = self.pixel_to_cell(at) else {
            return Ok(());
        };
        let room = (self.cols - col) as usize;
        let clipped: String = text.chars().take(room).collect();

        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetBackgroundColor(Color::Reset))?;
        self.out.queue(style::SetForegroundColor(to_color(color)))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
