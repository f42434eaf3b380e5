use derive_builder::Builder;

use crate::{
    approx_eq::ApproxEq,
    error::Result,
    primitive::{point::Point, vector::Vector},
};

use super::{color::Color, light::PointLightSource};

/// Phong surface parameters.
#[derive(Clone, Copy, Debug, PartialEq, Builder)]
#[builder(build_fn(skip))]
pub struct Material {
    pub color: Color,
    pub ambient: f64,   // <0;1>
    pub diffuse: f64,   // <0;1>
    pub specular: f64,  // <0;1>
    pub shininess: f64, // <10;inf) (typically up to 200.0)
}

impl MaterialBuilder {
    pub fn build(&self) -> Material {
        let default = Material::default();
        Material {
            color: self.color.unwrap_or(default.color),
            ambient: self.ambient.unwrap_or(default.ambient),
            diffuse: self.diffuse.unwrap_or(default.diffuse),
            specular: self.specular.unwrap_or(default.specular),
            shininess: self.shininess.unwrap_or(default.shininess),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::with_color(Color::white())
    }
}

impl Material {
    pub fn new(color: Color, ambient: f64, diffuse: f64, specular: f64, shininess: f64) -> Self {
        Self {
            color,
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    pub fn with_color(color: Color) -> Self {
        Self::new(color, 0.1, 0.9, 0.9, 200.)
    }

    pub fn matte_with_color(color: Color) -> Self {
        Self::new(color, 0.1, 0.9, 0., 200.)
    }

    /// Phong reflection of `light` at `point`, seen along `eye_v`.
    /// Points in shadow only receive the ambient term.
    pub fn lighting(
        &self,
        light: &PointLightSource,
        point: Point,
        eye_v: Vector,
        normal_v: Vector,
        in_shadow: bool,
    ) -> Result<Color> {
        // combine surface color with light's intensity (color)
        let effective_color = self.color * light.intensity();
        let ambient = effective_color * self.ambient;

        if in_shadow {
            return Ok(ambient);
        }

        let light_v = (light.position() - point).normalize()?;
        let light_dot_normal = light_v.dot(normal_v);

        // light is on the other side of the surface
        if light_dot_normal < 0. {
            return Ok(ambient);
        }
        let diffuse = effective_color * self.diffuse * light_dot_normal;

        let reflect_v = (-light_v).reflect(normal_v);
        let reflect_dot_eye = reflect_v.dot(eye_v);

        // light reflects away from the eye
        let specular = if reflect_dot_eye <= 0. {
            Color::black()
        } else {
            light.intensity() * self.specular * reflect_dot_eye.powf(self.shininess)
        };

        Ok(ambient + diffuse + specular)
    }
}

impl ApproxEq for Material {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.color.approx_eq_epsilon(&other.color, epsilon)
            && self.ambient.approx_eq_epsilon(&other.ambient, epsilon)
            && self.diffuse.approx_eq_epsilon(&other.diffuse, epsilon)
            && self.specular.approx_eq_epsilon(&other.specular, epsilon)
            && self.shininess.approx_eq_epsilon(&other.shininess, epsilon)
    }
}
