use std::{
    convert::Infallible,
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use clap::ValueEnum;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use super::color::Color;

/// Output encodings of a rendered canvas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Ppm,
    Png,
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Ppm => write!(f, "ppm"),
            ImageFormat::Png => write!(f, "png"),
        }
    }
}

/// Row-major grid of unclamped colors.
/// Clamping to 8 bit channels happens only when the canvas is encoded.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn with_color(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self::with_color(width, height, Color::black())
    }

    fn pixel_id(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside of {}x{} canvas",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        self.pixels[self.pixel_id(x, y)]
    }

    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        let id = self.pixel_id(x, y);
        self.pixels[id] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Evaluates `fun` for every pixel in parallel; each call writes only its own pixel.
    pub fn set_each_pixel<F>(&mut self, fun: F, progressbar: indicatif::ProgressBar)
    where
        F: Fn(usize, usize) -> Color + Sync,
    {
        let result = self.try_set_each_pixel(|x, y| Ok::<_, Infallible>(fun(x, y)), progressbar);
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Like [`Canvas::set_each_pixel`], but stops at the first error `fun` returns.
    /// Pixels not reached by then are left unchanged.
    pub fn try_set_each_pixel<F, E>(
        &mut self,
        fun: F,
        progressbar: indicatif::ProgressBar,
    ) -> Result<(), E>
    where
        F: Fn(usize, usize) -> Result<Color, E> + Sync,
        E: Send,
    {
        let width = self.width;

        self.pixels
            .par_iter_mut()
            .enumerate()
            .progress_with(progressbar)
            .try_for_each(|(id, pixel)| {
                *pixel = fun(id % width, id / width)?;
                Ok(())
            })
    }

    /// Clamped 8 bit RGB triples, row by row.
    pub fn as_u8_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(Color::as_scaled_values)
            .collect()
    }
}

/// PPM (plain P3) encoding
impl Canvas {
    const PPM_MAX_LINE_LEN: usize = 70;

    fn ppm_header(&self) -> String {
        format!("P3\n{} {}\n255\n", self.width, self.height)
    }

    /// Every image row starts on a new line; rows longer than the line limit wrap.
    fn ppm_data(&self) -> String {
        let mut data = String::new();

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut line_len = 0;
            for value in row.iter().flat_map(Color::as_scaled_values) {
                let value = value.to_string();
                if line_len > 0 {
                    if line_len + 1 + value.len() > Self::PPM_MAX_LINE_LEN {
                        data.push('\n');
                        line_len = 0;
                    } else {
                        data.push(' ');
                        line_len += 1;
                    }
                }
                data.push_str(&value);
                line_len += value.len();
            }
            data.push('\n');
        }
        data
    }

    pub fn to_ppm(&self) -> String {
        self.ppm_header() + &self.ppm_data()
    }

    pub fn save_to_ppm(&self, mut file: File) -> std::io::Result<()> {
        file.write_all(self.to_ppm().as_bytes())
    }
}

/// PNG encoding and saving
impl Canvas {
    pub fn save_to_png(&self, file: File) -> std::io::Result<()> {
        let mut encoder = png::Encoder::new(
            BufWriter::new(file),
            self.width as u32,
            self.height as u32,
        );
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.as_u8_rgb())?;
        writer.finish()?;
        Ok(())
    }

    pub fn save_to_file(&self, file: File, format: ImageFormat) -> std::io::Result<()> {
        match format {
            ImageFormat::Ppm => self.save_to_ppm(file),
            ImageFormat::Png => self.save_to_png(file),
        }
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>, format: ImageFormat) -> std::io::Result<()> {
        self.save_to_file(File::create(path)?, format)
    }
}
