use crate::{
    color::Rgba,
    error::{MandelbrotError, Result},
};

/// Region of the complex plane to render.
///
/// The top of the region is not part of the bounds: it follows from the
/// real span and the pixel aspect ratio, so that square pixels cover square
/// areas of the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_re: f64,
    pub max_re: f64,
    pub min_im: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_re: -2.0,
            max_re: 1.0,
            min_im: -1.2,
        }
    }
}

impl Bounds {
    pub fn new(min_re: f64, max_re: f64, min_im: f64) -> Result<Self> {
        let bounds = Self {
            min_re,
            max_re,
            min_im,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    fn validate(&self) -> Result<()> {
        let finite = self.min_re.is_finite() && self.max_re.is_finite() && self.min_im.is_finite();
        if !finite || self.max_re <= self.min_re {
            return Err(MandelbrotError::InvalidBounds {
                min_re: self.min_re,
                max_re: self.max_re,
                min_im: self.min_im,
            });
        }
        Ok(())
    }
}

/// Mapping from pixel coordinates to the complex plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub(crate) bounds: Bounds,
    pub(crate) max_im: f64,
    pub(crate) re_step: f64,
    pub(crate) im_step: f64,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl Plane {
    /// Fails with `InvalidDimensions` when either side is below 2 pixels or
    /// a `width * height` pixel buffer could not be allocated.
    pub fn new(bounds: Bounds, width: usize, height: usize) -> Result<Self> {
        if width <= 1 || height <= 1 || pixel_count(width, height).is_none() {
            return Err(MandelbrotError::InvalidDimensions { width, height });
        }
        bounds.validate()?;

        let Bounds {
            min_re,
            max_re,
            min_im,
        } = bounds;

        let max_im = min_im + (max_re - min_re) * height as f64 / width as f64;
        let re_step = (max_re - min_re) / (width - 1) as f64;
        let im_step = (max_im - min_im) / (height - 1) as f64;

        Ok(Self {
            bounds,
            max_im,
            re_step,
            im_step,
            width,
            height,
        })
    }

    /// Complex coordinate of pixel `(x, y)`. Rows grow downwards, so the
    /// imaginary part decreases with `y`.
    #[inline]
    pub fn point(&self, x: usize, y: usize) -> (f64, f64) {
        (self.re(x), self.im(y))
    }

    #[inline]
    pub(crate) fn re(&self, x: usize) -> f64 {
        self.bounds.min_re + x as f64 * self.re_step
    }

    #[inline]
    pub(crate) fn im(&self, y: usize) -> f64 {
        self.max_im - y as f64 * self.im_step
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn max_im(&self) -> f64 {
        self.max_im
    }

    pub fn re_step(&self) -> f64 {
        self.re_step
    }

    pub fn im_step(&self) -> f64 {
        self.im_step
    }
}

/// `width * height`, or `None` when the pixel buffer would exceed the
/// address space.
pub(crate) fn pixel_count(width: usize, height: usize) -> Option<usize> {
    let count = width.checked_mul(height)?;
    let bytes = count.checked_mul(std::mem::size_of::<Rgba>())?;
    (bytes <= isize::MAX as usize).then_some(count)
}
