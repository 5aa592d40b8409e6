use clap::Parser;
use std::path::PathBuf;

use ifs::image::{ImageSize, PixelBuffer};
use ifs::imgproc::{
    canvas::{Canvas, PolarTransform},
    parallel::ExecutionStrategy,
    warp::warp_affine_into,
};
use ifs::io;

/// Warp an image through a polar-style affine map and save it as PNG.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PNG; a quadrant test pattern is generated when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path where the output PNG is written
    #[arg(short, long, default_value = "warped.png")]
    output: PathBuf,

    /// Width of the generated test pattern
    #[arg(long, default_value_t = 256)]
    width: usize,

    /// Height of the generated test pattern
    #[arg(long, default_value_t = 256)]
    height: usize,

    /// Scale of the x axis
    #[arg(short, long, default_value_t = 1.0)]
    r: f32,

    /// Scale of the y axis
    #[arg(short, long, default_value_t = 1.0)]
    s: f32,

    /// Rotation of the x axis in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    theta: f32,

    /// Rotation of the y axis in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    phi: f32,

    /// Translation along x as a fraction of the width
    #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
    e: f32,

    /// Translation along y as a fraction of the height
    #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
    f: f32,

    /// Resample rows in parallel
    #[arg(long)]
    parallel: bool,
}

fn test_pattern(size: ImageSize) -> Result<PixelBuffer, Box<dyn std::error::Error>> {
    let mut canvas = Canvas::new(size)?;
    let (w, h) = (size.width as i64, size.height as i64);
    let (hw, hh) = (w / 2, h / 2);

    canvas.fill_rect(0, 0, hw, hh, [230, 60, 50, 255]);
    canvas.fill_rect(hw, 0, w - hw, hh, [60, 180, 75, 255]);
    canvas.fill_rect(0, hh, hw, h - hh, [0, 130, 200, 255]);
    canvas.fill_rect(hw, hh, w - hw, h - hh, [255, 225, 25, 255]);

    Ok(canvas.into_image())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let src = match &args.input {
        Some(path) => io::read_image_png_rgba8(path)?,
        None => test_pattern(ImageSize {
            width: args.width,
            height: args.height,
        })?,
    };
    log::info!("source image: {}", src.size());

    let polar =
        PolarTransform::from_degrees(args.r, args.s, args.theta, args.phi, args.e, args.f);
    let params = polar.to_affine(src.size());
    log::info!("affine parameters: {:?}", params);

    let strategy = if args.parallel {
        ExecutionStrategy::ParallelRows
    } else {
        ExecutionStrategy::Serial
    };

    let start = std::time::Instant::now();
    let mut dst = PixelBuffer::from_size_val(src.size(), 0)?;
    let mapped = warp_affine_into(&src, &mut dst, &params, strategy)?;
    log::info!(
        "warped {} of {} pixels in {:?}",
        mapped,
        src.size().area(),
        start.elapsed()
    );

    io::write_image_png_rgba8(&args.output, &dst)?;
    println!("Wrote {}", args.output.display());

    Ok(())
}
