/// ASCII downsampler for showing wireframe frames in a terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use bpview_core::Frame;

/// Character luminosity ramp for line coverage (emptiest to fullest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: usize = 2;

/// ASCII renderer that maps frame pixels to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    /// Square region of cells the frame is fitted into: (columns, rows)
    pub fn viewport(&self) -> (usize, usize) {
        let rows = self.height.min(self.width / CELL_ASPECT);
        (rows * CELL_ASPECT, rows)
    }

    /// Fill the character buffer from a frame, one cell per pixel block
    pub fn rasterize(&mut self, frame: &Frame) {
        self.clear();

        let (cols, rows) = self.viewport();
        let (fw, fh) = (frame.width() as usize, frame.height() as usize);
        if cols == 0 || rows == 0 || fw == 0 || fh == 0 {
            return;
        }

        for row in 0..rows {
            let y0 = row * fh / rows;
            let y1 = ((row + 1) * fh / rows).max(y0 + 1).min(fh);
            for col in 0..cols {
                let x0 = col * fw / cols;
                let x1 = ((col + 1) * fw / cols).max(x0 + 1).min(fw);

                let mut lit = 0;
                for y in y0..y1 {
                    for x in x0..x1 {
                        if frame.get_pixel(x as u32, y as u32).0 != [0, 0, 0] {
                            lit += 1;
                        }
                    }
                }

                let total = (x1 - x0) * (y1 - y0);
                self.char_buffer[row * self.width + col] = coverage_char(lit, total);
            }
        }
    }

    pub fn char_at(&self, col: usize, row: usize) -> char {
        self.char_buffer[row * self.width + col]
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkYellow,
                    '-' | '=' => Color::Yellow,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Any lit pixel shows at least the faintest mark, so thin lines survive
fn coverage_char(lit: usize, total: usize) -> char {
    if lit == 0 || total == 0 {
        return LUMINOSITY_RAMP[0];
    }
    let steps = LUMINOSITY_RAMP.len() - 1;
    let index = (lit * steps).div_ceil(total).clamp(1, steps);
    LUMINOSITY_RAMP[index]
}
