//! Per-pixel ink storage and plane packing

use std::fmt::Write;

use duo_core::CanvasSize;

/// What a single panel pixel shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ink {
    #[default]
    Paper,
    Black,
    Accent,
}

impl Ink {
    fn glyph(self) -> char {
        match self {
            Ink::Paper => '.',
            Ink::Black => '#',
            Ink::Accent => 'r',
        }
    }
}

/// Canvas-sized grid of inks, row-major, starting as blank paper
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InkBitmap {
    width: u32,
    height: u32,
    pixels: Vec<Ink>,
}

impl InkBitmap {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            pixels: vec![Ink::Paper; canvas.width as usize * canvas.height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Ink at `(x, y)`, or `None` off the canvas
    pub fn get(&self, x: i32, y: i32) -> Option<Ink> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Paint one pixel. Off-canvas writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, ink: Ink) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = ink;
        }
    }

    /// Paint the inclusive span between two corners, clipped to the canvas.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, ink: Ink) {
        let (left, right) = (x0.min(x1).max(0), x0.max(x1));
        let (top, bottom) = (y0.min(y1).max(0), y0.max(y1));
        let right = right.min(self.width as i32 - 1);
        let bottom = bottom.min(self.height as i32 - 1);

        for y in top..=bottom {
            for x in left..=right {
                self.set(x, y, ink);
            }
        }
    }

    /// Blank the whole canvas
    pub fn clear(&mut self) {
        self.pixels.fill(Ink::Paper);
    }

    /// Number of pixels showing `ink`
    pub fn count(&self, ink: Ink) -> usize {
        self.pixels.iter().filter(|&&p| p == ink).count()
    }

    /// One bit per pixel, set where the pixel shows `ink`.
    ///
    /// Bits are packed MSB first; each row starts on a fresh byte.
    pub fn pack_plane(&self, ink: Ink) -> Vec<u8> {
        let stride = (self.width as usize + 7) / 8;
        let mut plane = vec![0u8; stride * self.height as usize];

        for (row, pixels) in self.pixels.chunks(self.width.max(1) as usize).enumerate() {
            for (col, &pixel) in pixels.iter().enumerate() {
                if pixel == ink {
                    plane[row * stride + col / 8] |= 0x80 >> (col % 8);
                }
            }
        }
        plane
    }

    /// Text rendering, one character per pixel: `.` paper, `#` black, `r` accent
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.pixels.len() + self.height as usize);
        for row in self.pixels.chunks(self.width.max(1) as usize) {
            for &pixel in row {
                out.push(pixel.glyph());
            }
            let _ = writeln!(out);
        }
        out
    }
}
