/// Squared escape radius. Once `|z|^2` exceeds it the orbit diverges.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Iterate `z -> z^2 + c` starting from `z = c`.
///
/// Returns the iteration at which `|z|` exceeded 2, or `None` if the orbit
/// stayed bounded for all `max_iterations` steps.
#[inline]
pub fn escape_iteration(c_re: f64, c_im: f64, max_iterations: usize) -> Option<usize> {
    let (mut z_re, mut z_im) = (c_re, c_im);

    for n in 0..max_iterations {
        let z_re2 = z_re * z_re;
        let z_im2 = z_im * z_im;

        if z_re2 + z_im2 > ESCAPE_RADIUS_SQ {
            return Some(n);
        }

        // squares were taken before either component moved
        z_im = 2.0 * z_re * z_im + c_im;
        z_re = z_re2 - z_im2 + c_re;
    }

    None
}

#[inline]
pub fn is_inside(c_re: f64, c_im: f64, max_iterations: usize) -> bool {
    escape_iteration(c_re, c_im, max_iterations).is_none()
}
