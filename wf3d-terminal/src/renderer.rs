/// Character-cell canvas for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;
use wf3d_core::{Anchor, Canvas, Color, Viewport};

const POINT_CHAR: char = '●';
const LINE_CHAR: char = '*';

/// Cells drawn later only replace cells of the same or a lower layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Empty,
    Line,
    Point,
    Text,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    color: Color,
    layer: Layer,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::White,
    layer: Layer::Empty,
};

/// Canvas backed by a grid of terminal cells, one canvas pixel per cell
pub struct TerminalCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![BLANK; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Character at a cell, mainly for inspection.
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].ch)
    }

    fn put(&mut self, x: i64, y: i64, ch: char, color: Color, layer: Layer) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let cell = &mut self.cells[y as usize * self.width + x as usize];
        if layer >= cell.layer {
            *cell = Cell { ch, color, layer };
        }
    }

    /// Clip a segment to the canvas rectangle (Liang-Barsky).
    fn clip(&self, from: Point2<f64>, to: Point2<f64>) -> Option<(Point2<f64>, Point2<f64>)> {
        let (max_x, max_y) = (self.width as f64 - 0.5, self.height as f64 - 0.5);
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;

        for (p, q) in [
            (-dx, from.x),
            (dx, max_x - from.x),
            (-dy, from.y),
            (dy, max_y - from.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    t0 = t0.max(r);
                } else {
                    t1 = t1.min(r);
                }
            }
        }

        if t0 > t1 {
            return None;
        }
        Some((
            Point2::new(from.x + t0 * dx, from.y + t0 * dy),
            Point2::new(from.x + t1 * dx, from.y + t1 * dy),
        ))
    }

    /// Write the grid to the terminal
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(term_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn is_finite(p: &Point2<f64>) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::White => TermColor::White,
        Color::Green => TermColor::Green,
        Color::Yellow => TermColor::Yellow,
    }
}

impl Canvas for TerminalCanvas {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as u32, self.height as u32)
    }

    fn draw_point(&mut self, position: Point2<f64>, color: Color) {
        if !is_finite(&position) {
            return;
        }
        self.put(
            position.x.floor() as i64,
            position.y.floor() as i64,
            POINT_CHAR,
            color,
            Layer::Point,
        );
    }

    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Color) {
        if !is_finite(&from) || !is_finite(&to) {
            return;
        }
        let Some((from, to)) = self.clip(from, to) else {
            return;
        };

        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.put(
                (from.x + t * dx).floor() as i64,
                (from.y + t * dy).floor() as i64,
                LINE_CHAR,
                color,
                Layer::Line,
            );
        }
    }

    fn draw_text(&mut self, content: &str, anchor: Anchor, color: Color) {
        let len = content.chars().count() as f64;
        let (col, row) = match anchor {
            Anchor::TopLeft(p) => (p.x.floor(), p.y.floor()),
            Anchor::MidBottom(p) => ((p.x - len / 2.0).round(), p.y.ceil() - 1.0),
        };
        if !col.is_finite() || !row.is_finite() {
            return;
        }

        for (i, ch) in content.chars().enumerate() {
            self.put(col as i64 + i as i64, row as i64, ch, color, Layer::Text);
        }
    }
}
