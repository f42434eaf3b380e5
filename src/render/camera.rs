use std::time::Instant;

use crate::{
    error::Result,
    primitive::{matrix::Matrix, point::Point, tuple::Tuple, vector::Vector},
};

use super::{canvas::Canvas, ray::Ray, scene::Scene};

// camera looks toward -z direction from point zero
// this makes +x to be on the left
#[derive(PartialEq, Debug, Clone)]
pub struct Camera {
    target_width: usize,
    target_height: usize,
    field_of_view: f64,
    transformation: Matrix,
    inverse_transformation: Matrix,

    pixel_size: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    pub fn new(target_width: usize, target_height: usize, field_of_view: f64) -> Self {
        let half_view = (field_of_view / 2.).tan();
        let h_v_aspect = target_width as f64 / target_height as f64;

        let (half_width, half_height) = match h_v_aspect >= 1. {
            true => (half_view, half_view / h_v_aspect),
            false => (half_view * h_v_aspect, half_view),
        };

        let pixel_size = 2. * half_width / target_width as f64;

        Self {
            target_width,
            target_height,
            field_of_view,
            transformation: Matrix::identity(),
            inverse_transformation: Matrix::identity(),

            pixel_size,
            half_width,
            half_height,
        }
    }

    pub fn with_transformation(
        target_width: usize,
        target_height: usize,
        field_of_view: f64,
        transformation: Matrix,
    ) -> Result<Self> {
        let mut camera = Self::new(target_width, target_height, field_of_view);
        camera.set_transformation(transformation)?;
        Ok(camera)
    }

    /// Sets the world-to-camera transformation; fails if it can't be inverted.
    pub fn set_transformation(&mut self, transformation: Matrix) -> Result<()> {
        self.inverse_transformation = transformation.inverse()?;
        self.transformation = transformation;
        Ok(())
    }

    /// Places the eye at `from`, looking at `to`, with `up_v` roughly pointing up.
    pub fn set_view_transform(&mut self, from: Point, to: Point, up_v: Vector) -> Result<()> {
        self.set_transformation(Matrix::view_transformation(from, to, up_v)?)
    }

    pub fn ray_for_pixel(&self, x: usize, y: usize) -> Result<Ray> {
        let x_offset_to_center = (x as f64 + 0.5) * self.pixel_size;
        let y_offset_to_center = (y as f64 + 0.5) * self.pixel_size;

        let world_x = self.half_width - x_offset_to_center;
        let world_y = self.half_height - y_offset_to_center;

        let pixel = self.inverse_transformation * Point::new(world_x, world_y, -1.);
        let origin = self.inverse_transformation * Point::zero();
        let direction = pixel - origin;

        Ok(Ray::new(origin, direction.normalize()?))
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.target_width, self.target_height)
    }

    /// Colors every pixel of a new canvas by the ray cast through it.
    /// Pixels are shaded in parallel; the first error aborts the render.
    pub fn render(&self, scene: &Scene) -> Result<Canvas> {
        let mut image = self.canvas();
        let ray_count = image.width() * image.height();

        log::info!(
            "rendering image with {}x{} resolution",
            image.width(),
            image.height()
        );
        log::info!(
            "rendering {} objects lit by {} light sources",
            scene.objects_count(),
            scene.light_sources_count()
        );
        log::debug!("with {} primary rays", ray_count);

        let now = Instant::now();

        let style = indicatif::ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} pixels shaded: {human_pos}/{human_len} {percent}% ({eta})",
        )
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar());
        let pb = indicatif::ProgressBar::new(ray_count as u64).with_style(style);

        image.try_set_each_pixel(
            |x, y| scene.color_at(&self.ray_for_pixel(x, y)?),
            pb,
        )?;

        let elapsed = now.elapsed();
        log::info!("render time: {:?}", elapsed);
        let rays_per_sec = ray_count as f64 / elapsed.as_secs_f64();
        log::info!("rays per second: {}", rays_per_sec.round());
        Ok(image)
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }

    pub fn target_height(&self) -> usize {
        self.target_height
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn transformation(&self) -> &Matrix {
        &self.transformation
    }
}
