//! Terminal renderer
//!
//! The field is scaled onto the terminal grid. Each frame is composed into
//! a cell buffer and written out in one pass at `present`.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use super::{Renderer, TextStyle};
use crate::assets::Sprite;

const SOLID: char = '█';
const STAR: char = '.';
/// Background pixels dimmer than this are left blank
const STAR_BRIGHTNESS: u16 = 96;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
    }
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    field: Vec2,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    /// Re-query the terminal size at the start of each frame
    follow_terminal: bool,
}

impl TerminalRenderer<io::BufWriter<io::Stdout>> {
    /// Renderer on stdout, sized to the current terminal
    pub fn stdout(field: Vec2) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut renderer = Self::new(io::BufWriter::new(io::stdout()), field, cols, rows);
        renderer.follow_terminal = true;
        Ok(renderer)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, field: Vec2, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            out,
            field,
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            follow_terminal: false,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![BLANK; self.cols as usize * self.rows as usize];
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Field pixels covered by one cell
    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.field.x / self.cols as f32,
            self.field.y / self.rows as f32,
        )
    }

    fn to_cell(&self, pos: Vec2) -> (i32, i32) {
        let cell = pos / self.cell_size();
        (cell.x.floor() as i32, cell.y.floor() as i32)
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = cell;
    }

    #[cfg(test)]
    fn cell(&self, col: u16, row: u16) -> Cell {
        self.cells[row as usize * self.cols as usize + col as usize]
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin_frame(&mut self) -> io::Result<()> {
        if self.follow_terminal {
            let (cols, rows) = terminal::size()?;
            if (cols, rows) != (self.cols, self.rows) {
                self.resize(cols, rows);
                self.out
                    .queue(terminal::Clear(terminal::ClearType::All))?;
            }
        }
        self.cells.fill(BLANK);
        Ok(())
    }

    fn blit_background(&mut self, sprite: &Sprite) -> io::Result<()> {
        // Sample at each cell center, scaled to the sprite
        let scale = Vec2::new(
            sprite.width() as f32 / self.field.x,
            sprite.height() as f32 / self.field.y,
        );
        let cell = self.cell_size();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let center = (Vec2::new(col as f32, row as f32) + 0.5) * cell * scale;
                let [r, g, b, _] = sprite.pixel(center.x as u32, center.y as u32);
                let brightness = (r as u16 + g as u16 + b as u16) / 3;
                if brightness >= STAR_BRIGHTNESS {
                    self.put(
                        col as i32,
                        row as i32,
                        Cell {
                            ch: STAR,
                            fg: rgb([r, g, b]),
                        },
                    );
                }
            }
        }
        Ok(())
    }

    fn blit(&mut self, sprite: &Sprite, pos: Vec2) -> io::Result<()> {
        // Map every opaque pixel so thin sprites still land in a cell
        for y in 0..sprite.height() {
            for x in 0..sprite.width() {
                if !sprite.is_opaque(x, y) {
                    continue;
                }
                let [r, g, b, _] = sprite.pixel(x, y);
                let (col, row) = self.to_cell(pos + Vec2::new(x as f32, y as f32));
                self.put(
                    col,
                    row,
                    Cell {
                        ch: SOLID,
                        fg: rgb([r, g, b]),
                    },
                );
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) -> io::Result<()> {
        let (col, row) = self.to_cell(pos);
        let fg = rgb(style.color);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, Cell { ch, fg });
        }
        Ok(())
    }

    /// One cell per character; labels are not scaled
    fn text_size(&self, text: &str, _style: &TextStyle) -> Vec2 {
        let cell = self.cell_size();
        Vec2::new(text.chars().count() as f32 * cell.x, cell.y)
    }

    fn present(&mut self) -> io::Result<()> {
        let mut fg = Color::Reset;
        self.out.queue(style::SetForegroundColor(fg))?;

        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let mut line = String::with_capacity(self.cols as usize);
            for cell in &self.cells[start..start + self.cols as usize] {
                if cell.fg != fg && cell.ch != ' ' {
                    if !line.is_empty() {
                        self.out.queue(Print(std::mem::take(&mut line)))?;
                    }
                    fg = cell.fg;
                    self.out.queue(style::SetForegroundColor(fg))?;
                }
                line.push(cell.ch);
            }
            self.out.queue(Print(line))?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
