use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    color::Rgba,
    error::{MandelbrotError, Result},
    plane::pixel_count,
    Mandelbrot,
};

/// Row-major RGBA pixels, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Wrap existing pixels. Any non-empty size is accepted, including the
    /// single-row and single-column shapes a [`Mandelbrot`] refuses to render.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self> {
        let expected = match pixel_count(width, height) {
            Some(expected) if expected > 0 => expected,
            _ => return Err(MandelbrotError::InvalidDimensions { width, height }),
        };
        if pixels.len() != expected {
            return Err(MandelbrotError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        self.pixels.chunks_exact(self.width)
    }

    /// Flat `[r, g, b, a, r, g, b, a, ...]` bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|pixel| pixel.to_array()).collect()
    }

    pub fn into_pixels(self) -> Vec<Rgba> {
        self.pixels
    }
}

impl Mandelbrot {
    /// Classify every pixel and paint it with the inside or outside color.
    pub fn render(&self) -> PixelBuffer {
        let mut pixels = vec![self.outside_color; self.len()];
        self.paint(&mut pixels);
        PixelBuffer {
            width: self.width(),
            height: self.height(),
            pixels,
        }
    }

    /// Same output as [`Mandelbrot::render`], with rows spread over the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn render_parallel(&self) -> PixelBuffer {
        let started = Instant::now();
        log::trace!("rendering {}x{} in parallel", self.width(), self.height());

        let mut pixels = vec![self.outside_color; self.len()];
        let inside = pixels
            .par_chunks_mut(self.width())
            .enumerate()
            .map(|(y, row)| self.paint_row(y, row))
            .sum::<usize>();

        self.log_rendered(inside, started);
        PixelBuffer {
            width: self.width(),
            height: self.height(),
            pixels,
        }
    }

    /// Render into a caller-owned buffer of exactly `width * height` pixels.
    pub fn render_into(&self, pixels: &mut [Rgba]) -> Result<()> {
        if pixels.len() != self.len() {
            return Err(MandelbrotError::BufferSize {
                expected: self.len(),
                actual: pixels.len(),
            });
        }
        self.paint(pixels);
        Ok(())
    }

    fn paint(&self, pixels: &mut [Rgba]) {
        let started = Instant::now();
        log::trace!("rendering {}x{}", self.width(), self.height());

        let inside = pixels
            .chunks_exact_mut(self.width())
            .enumerate()
            .map(|(y, row)| self.paint_row(y, row))
            .sum::<usize>();

        self.log_rendered(inside, started);
    }

    /// Paint row `y`, returning how many of its pixels are inside.
    fn paint_row(&self, y: usize, row: &mut [Rgba]) -> usize {
        let c_im = self.plane.im(y);
        let mut inside = 0;

        for (x, pixel) in row.iter_mut().enumerate() {
            if crate::escape::is_inside(self.plane.re(x), c_im, self.max_iterations) {
                *pixel = self.inside_color;
                inside += 1;
            } else {
                *pixel = self.outside_color;
            }
        }

        inside
    }

    fn log_rendered(&self, inside: usize, started: Instant) {
        log::debug!(
            "rendered {}x{} ({} iterations): {} of {} pixels inside in {:?}",
            self.width(),
            self.height(),
            self.max_iterations,
            inside,
            self.len(),
            started.elapsed()
        );
    }

    // cannot overflow, `Plane::new` checked it
    fn len(&self) -> usize {
        self.width() * self.height()
    }
}
