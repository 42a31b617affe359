pub mod color;
pub mod error;
pub mod escape;
pub mod image;
pub mod plane;
#[cfg(feature = "serialize")]
mod serialize;

pub use color::Rgba;
pub use error::{MandelbrotError, Result};
pub use image::PixelBuffer;
pub use plane::{Bounds, Plane};

/// Escape-time renderer for a region of the Mandelbrot set.
///
/// The vertical extent of the region is derived from the real span and the
/// image aspect ratio, so it cannot be set directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Mandelbrot {
    plane: Plane,
    max_iterations: usize,
    inside_color: Rgba,
    outside_color: Rgba,
}

impl Mandelbrot {
    /// Default plane bounds, black inside, white outside.
    pub fn new(width: usize, height: usize, max_iterations: usize) -> Result<Self> {
        Self::builder(width, height, max_iterations).build()
    }

    pub fn builder(width: usize, height: usize, max_iterations: usize) -> MandelbrotBuilder {
        MandelbrotBuilder::new(width, height, max_iterations)
    }

    /// Whether the orbit of pixel `(x, y)` stays bounded.
    pub fn classify(&self, x: usize, y: usize) -> bool {
        self.escape_iteration(x, y).is_none()
    }

    /// Iteration at which pixel `(x, y)` escaped, `None` if it is inside.
    pub fn escape_iteration(&self, x: usize, y: usize) -> Option<usize> {
        let (c_re, c_im) = self.plane.point(x, y);
        escape::escape_iteration(c_re, c_im, self.max_iterations)
    }

    /// Complex coordinate of pixel `(x, y)`.
    pub fn point(&self, x: usize, y: usize) -> (f64, f64) {
        self.plane.point(x, y)
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn width(&self) -> usize {
        self.plane.width
    }

    pub fn height(&self) -> usize {
        self.plane.height
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn min_re(&self) -> f64 {
        self.plane.bounds.min_re
    }

    pub fn max_re(&self) -> f64 {
        self.plane.bounds.max_re
    }

    pub fn min_im(&self) -> f64 {
        self.plane.bounds.min_im
    }

    pub fn max_im(&self) -> f64 {
        self.plane.max_im
    }

    pub fn re_step(&self) -> f64 {
        self.plane.re_step
    }

    pub fn im_step(&self) -> f64 {
        self.plane.im_step
    }

    pub fn inside_color(&self) -> Rgba {
        self.inside_color
    }

    pub fn outside_color(&self) -> Rgba {
        self.outside_color
    }

    pub fn settings(&self) -> Settings {
        Settings {
            width: self.width(),
            height: self.height(),
            max_iterations: self.max_iterations,
            bounds: self.plane.bounds,
            inside_color: self.inside_color,
            outside_color: self.outside_color,
        }
    }
}

/// Collects overrides for a [`Mandelbrot`]. Overrides apply in call order, so
/// a later call wins over an earlier one touching the same field.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotBuilder {
    settings: Settings,
}

impl MandelbrotBuilder {
    pub fn new(width: usize, height: usize, max_iterations: usize) -> Self {
        Self {
            settings: Settings {
                width,
                height,
                max_iterations,
                ..Default::default()
            },
        }
    }

    pub fn colors(mut self, inside: Rgba, outside: Rgba) -> Self {
        self.settings.inside_color = inside;
        self.settings.outside_color = outside;
        self
    }

    pub fn inside_color(mut self, color: Rgba) -> Self {
        self.settings.inside_color = color;
        self
    }

    pub fn outside_color(mut self, color: Rgba) -> Self {
        self.settings.outside_color = color;
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.settings.bounds = bounds;
        self
    }

    pub fn real_range(mut self, min_re: f64, max_re: f64) -> Self {
        self.settings.bounds.min_re = min_re;
        self.settings.bounds.max_re = max_re;
        self
    }

    pub fn min_im(mut self, min_im: f64) -> Self {
        self.settings.bounds.min_im = min_im;
        self
    }

    /// Apply a reusable option, e.g. a palette shared between renders.
    pub fn option(mut self, option: impl FnOnce(&mut Self)) -> Self {
        option(&mut self);
        self
    }

    /// Apply options in order.
    pub fn options<F: FnOnce(&mut Self)>(self, options: impl IntoIterator<Item = F>) -> Self {
        options
            .into_iter()
            .fold(self, |builder, option| builder.option(option))
    }

    pub fn build(self) -> Result<Mandelbrot> {
        self.settings.build()
    }
}

/// Option setting both colors, usable with [`MandelbrotBuilder::option`].
pub fn colors(inside: Rgba, outside: Rgba) -> impl FnOnce(&mut MandelbrotBuilder) {
    move |builder| {
        builder.settings.inside_color = inside;
        builder.settings.outside_color = outside;
    }
}

/// Plain record of everything a [`Mandelbrot`] is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub max_iterations: usize,
    #[cfg_attr(feature = "serialize", serde(default))]
    pub bounds: Bounds,
    #[cfg_attr(feature = "serialize", serde(default = "Settings::default_inside"))]
    pub inside_color: Rgba,
    #[cfg_attr(feature = "serialize", serde(default = "Settings::default_outside"))]
    pub outside_color: Rgba,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            max_iterations: 30,
            bounds: Bounds::default(),
            inside_color: Self::default_inside(),
            outside_color: Self::default_outside(),
        }
    }
}

impl Settings {
    fn default_inside() -> Rgba {
        Rgba::BLACK
    }

    fn default_outside() -> Rgba {
        Rgba::WHITE
    }

    pub fn build(self) -> Result<Mandelbrot> {
        let plane = Plane::new(self.bounds, self.width, self.height)?;

        log::debug!(
            "mandelbrot {}x{}, {} iterations: re [{}, {}] im [{}, {}], step {} x {}",
            self.width,
            self.height,
            self.max_iterations,
            plane.bounds.min_re,
            plane.bounds.max_re,
            plane.bounds.min_im,
            plane.max_im,
            plane.re_step,
            plane.im_step
        );

        Ok(Mandelbrot {
            plane,
            max_iterations: self.max_iterations,
            inside_color: self.inside_color,
            outside_color: self.outside_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn test_new() {
        for (w, h, i, max_im, re_step, im_step) in [
            (320, 256, 15, 1.2, 0.009404388714733543, 0.009411764705882352),
            (800, 600, 32, 1.05, 0.0037546933667083854, 0.0037562604340567614),
        ] {
            let m = Mandelbrot::new(w, h, i).unwrap();

            assert_eq!(m.width(), w);
            assert_eq!(m.height(), h);
            assert_eq!(m.max_iterations(), i);
            assert_eq!(m.min_re(), -2.0);
            assert_eq!(m.max_re(), 1.0);
            assert_eq!(m.min_im(), -1.2);
            assert_close(m.max_im(), max_im);
            assert_close(m.re_step(), re_step);
            assert_close(m.im_step(), im_step);
            assert_eq!(m.inside_color(), Rgba::BLACK);
            assert_eq!(m.outside_color(), Rgba::WHITE);
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        let side = 1usize << (usize::BITS / 2);
        for (w, h) in [(1, 256), (320, 1), (1, 1), (0, 10), (side, side)] {
            assert_eq!(
                Mandelbrot::new(w, h, 15),
                Err(MandelbrotError::InvalidDimensions {
                    width: w,
                    height: h
                })
            );
        }
    }

    #[test]
    fn test_option_last_wins() {
        let (w, h, i) = (32, 32, 15);
        let blue = Rgba::rgb(0, 0, 0xff);

        let m = Mandelbrot::builder(w, h, i)
            .option(colors(Rgba::BLACK, Rgba::WHITE))
            .option(colors(blue, Rgba::rgb(0xff, 0, 0)))
            .build()
            .unwrap();

        assert_eq!(m.inside_color(), blue);
        assert_eq!(m.outside_color(), Rgba::rgb(0xff, 0, 0));

        let image = m.render();
        assert_eq!(image.width(), w);
        assert_eq!(image.height(), h);
        assert_eq!(image.get(w / 2, h / 2), Some(blue));
    }

    #[test]
    fn test_options_in_order() {
        let red = Rgba::rgb(0xff, 0, 0);
        let m = Mandelbrot::builder(8, 8, 4)
            .options([colors(Rgba::BLACK, Rgba::WHITE), colors(red, red)])
            .build()
            .unwrap();
        assert_eq!(m.inside_color(), red);
        assert_eq!(m.outside_color(), red);

        let m = Mandelbrot::builder(8, 8, 4)
            .colors(red, red)
            .outside_color(Rgba::BLACK)
            .build()
            .unwrap();
        assert_eq!(m.inside_color(), red);
        assert_eq!(m.outside_color(), Rgba::BLACK);
    }

    #[test]
    fn test_bounds_override() {
        let m = Mandelbrot::builder(100, 50, 10)
            .real_range(-1.0, 1.0)
            .min_im(-0.5)
            .build()
            .unwrap();

        assert_close(m.max_im(), 0.5);
        assert_close(m.re_step(), 2.0 / 99.0);
        assert_close(m.im_step(), 1.0 / 49.0);
        assert_eq!(m.point(0, 0), (-1.0, m.max_im()));

        assert!(matches!(
            Mandelbrot::builder(10, 10, 10).real_range(1.0, -1.0).build(),
            Err(MandelbrotError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_classify() {
        let m = Mandelbrot::builder(101, 101, 100)
            .bounds(Bounds::new(-2.0, 2.0, -2.0).unwrap())
            .build()
            .unwrap();

        // (50, 50) is the origin
        assert_eq!(m.point(50, 50), (0.0, 0.0));
        assert!(m.classify(50, 50));
        // top-left corner, -2 + 2i
        assert!(!m.classify(0, 0));
        assert_eq!(m.escape_iteration(0, 0), Some(0));
    }

    #[test]
    fn test_settings_round_trip() {
        let m = Mandelbrot::builder(64, 32, 12)
            .colors(Rgba::rgb(1, 2, 3), Rgba::rgb(4, 5, 6))
            .build()
            .unwrap();
        assert_eq!(m.settings().build().unwrap(), m);
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mandelbrot>();
        assert_send_sync::<PixelBuffer>();
    }
}
