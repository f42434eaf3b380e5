use crate::primitive::point::Point;

use super::color::Color;

/// Light without extent, emitting `intensity` from a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLightSource {
    position: Point,
    intensity: Color,
}

impl PointLightSource {
    pub fn new(position: Point, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// White light at `position`.
    pub fn white(position: Point) -> Self {
        Self::new(position, Color::white())
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }

    pub fn position(&self) -> Point {
        self.position
    }
}
