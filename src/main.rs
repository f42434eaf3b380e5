use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use phong_tracer::{demo, render::canvas::ImageFormat};

const DEFAULT_WIDTH: usize = 200;
const DEFAULT_HEIGHT: usize = 100;
const DEFAULT_FOV: f64 = std::f64::consts::FRAC_PI_3;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Phong raytracer
/// Renders the sample scene of three spheres standing in a corner of a room
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Width (in pixels) of the output image.
    #[clap(help = format!("Width (in pixels) of the output image. Defaults to {}", DEFAULT_WIDTH))]
    width: Option<usize>,

    /// Height (in pixels) of the output image.
    #[clap(help = format!("Height (in pixels) of the output image.
If only the width is given, the image is square. Defaults to {}", DEFAULT_HEIGHT))]
    height: Option<usize>,

    /// Field of view of the camera in radians.
    /// Defaults to π/3
    #[clap(long, default_value_t = DEFAULT_FOV)]
    fov: f64,

    /// The format of the output image
    #[clap(short = 'f', long, default_value = "png")]
    image_format: ImageFormat,

    /// The output path of the rendered image.
    /// By default it's `./raytrace.<image_format>`
    #[clap(short, long)]
    output_path: Option<PathBuf>,

    /// Verbosity of the log output, `RUST_LOG` is honoured as well
    #[clap(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Args {
    fn dimensions(&self) -> (usize, usize) {
        match (self.width, self.height) {
            (Some(width), Some(height)) => (width, height),
            (Some(width), None) => (width, width),
            _ => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        }
    }
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let (width, height) = args.dimensions();
    let scene = demo::scene().context("Failed to build the scene")?;
    let camera = demo::camera(width, height, args.fov).context("Failed to set up the camera")?;

    let canvas = camera.render(&scene).context("Failed to render the scene")?;

    let output_path = args.output_path.unwrap_or_else(|| {
        let mut path = PathBuf::from("raytrace");
        path.set_extension(args.image_format.to_string());
        path
    });
    canvas
        .save_to_path(&output_path, args.image_format)
        .with_context(|| format!("Failed to save image to {:?}", output_path))?;
    log::info!("Image saved to {:?}", output_path);
    Ok(())
}
