use std::ops;

use crate::approx_eq::ApproxEq;

/// Unclamped linear RGB. Values outside `[0, 1]` are kept through shading
/// and only clamped when converted to 8-bit channels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
    pub fn black() -> Self {
        Self::new(0., 0., 0.)
    }
    pub fn red() -> Self {
        Self::new(1., 0., 0.)
    }
    pub fn green() -> Self {
        Self::new(0., 1., 0.)
    }
    pub fn blue() -> Self {
        Self::new(0., 0., 1.)
    }
    pub fn white() -> Self {
        Self::new(1., 1., 1.)
    }
    pub fn r(&self) -> f64 {
        self.r
    }
    pub fn g(&self) -> f64 {
        self.g
    }
    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn clamped(&self) -> Self {
        Self::new(
            self.r.clamp(0., 1.),
            self.g.clamp(0., 1.),
            self.b.clamp(0., 1.),
        )
    }

    fn scale_val_to_u8(v: f64) -> u8 {
        let v = v.clamp(0., 1.);
        (v * 255.).round() as u8
    }

    pub fn as_scaled_values(&self) -> [u8; 3] {
        [
            Self::scale_val_to_u8(self.r),
            Self::scale_val_to_u8(self.g),
            Self::scale_val_to_u8(self.b),
        ]
    }
}

impl ApproxEq for Color {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.r.approx_eq_epsilon(&other.r, epsilon)
            && self.g.approx_eq_epsilon(&other.g, epsilon)
            && self.b.approx_eq_epsilon(&other.b, epsilon)
    }
}

impl ops::Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Color {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
        }
    }
}

impl ops::Sub for Color {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Color {
            r: self.r - rhs.r,
            g: self.g - rhs.g,
            b: self.b - rhs.b,
        }
    }
}

impl ops::Mul for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Color {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
        }
    }
}

impl ops::Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Color {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
        }
    }
}

impl ops::Div<f64> for Color {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Color {
            r: self.r / rhs,
            g: self.g / rhs,
            b: self.b / rhs,
        }
    }
}

impl std::iter::Sum for Color {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Color::black(), |acc, c| acc + c)
    }
}
