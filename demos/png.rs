//! Render the set to a PNG.
//!
//! cargo run --example png -- [width] [height] [iterations] [inside] [outside] [filename]
//!
//! Arguments are positional. In order they are width (640), height (480),
//! iteration count (30), inside color (`000000`), outside color (`ffffff`)
//! and output file (`mandelbrot.png`).

use mandelbrot::{Mandelbrot, Rgba};

fn main() {
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let arg = |i: usize| args.get(i).map(String::as_str);

    let width: usize = arg(0).map_or(640, |v| v.parse().expect("width must be an integer"));
    let height: usize = arg(1).map_or(480, |v| v.parse().expect("height must be an integer"));
    let iterations = arg(2).map_or(30, |v| v.parse().expect("iterations must be an integer"));
    let inside = color_or(arg(3), Rgba::BLACK);
    let outside = color_or(arg(4), Rgba::WHITE);
    let filename = arg(5).unwrap_or("mandelbrot.png");

    let (Ok(image_width), Ok(image_height)) = (u32::try_from(width), u32::try_from(height)) else {
        fail(format!("{width}x{height} is too large for a PNG"));
    };

    let mandelbrot = Mandelbrot::builder(width, height, iterations)
        .colors(inside, outside)
        .build()
        .unwrap_or_else(|err| fail(err));

    let pixels = mandelbrot.render_parallel();

    let Some(image_buf) = image::RgbaImage::from_raw(image_width, image_height, pixels.to_rgba8())
    else {
        fail(format!("{width}x{height} pixels do not fit an image buffer"));
    };
    if let Err(err) = image_buf.save(filename) {
        fail(format!("cannot write {filename}: {err}"));
    }

    log::info!("wrote {filename}");
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn color_or(spec: Option<&str>, fallback: Rgba) -> Rgba {
    match spec.map(str::parse::<Rgba>) {
        None => fallback,
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            log::warn!("{err}, using {fallback}");
            fallback
        }
    }
}
