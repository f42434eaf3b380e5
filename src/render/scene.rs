use crate::{
    error::Result,
    primitive::{matrix::Matrix, point::Point, tuple::Tuple},
};

use super::{
    color::Color,
    intersection::{IntersecComputations, Intersections},
    light::PointLightSource,
    material::Material,
    object::{Object, shape::Shape},
    ray::Ray,
};

/// Objects and light sources, read only while rendering.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object>,
    light_sources: Vec<PointLightSource>,
}

impl Scene {
    pub fn new(objects: Vec<Object>, light_sources: Vec<PointLightSource>) -> Self {
        Self {
            objects,
            light_sources,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn add_obj(&mut self, obj: Object) {
        self.objects.push(obj);
    }

    pub fn add_light(&mut self, light_source: PointLightSource) {
        self.light_sources.push(light_source);
    }

    pub fn set_light_sources(&mut self, light_sources: Vec<PointLightSource>) {
        self.light_sources = light_sources;
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn objects_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_sources(&self) -> &[PointLightSource] {
        &self.light_sources
    }

    pub fn light_source(&self, index: usize) -> Option<&PointLightSource> {
        self.light_sources.get(index)
    }

    pub fn light_sources_count(&self) -> usize {
        self.light_sources.len()
    }

    /// Intersections of `ray` with every object, merged in ascending time order.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let mut intersections = Intersections::new();
        for obj in &self.objects {
            obj.intersect(ray, &mut intersections);
        }
        intersections
    }

    pub fn color_at(&self, ray: &Ray) -> Result<Color> {
        match self.intersect(ray).hit_computations(ray) {
            Some(hit_comps) => self.shade_hit(&hit_comps?),
            None => Ok(Color::black()),
        }
    }

    /// Sum of contributions of every light source at the hit point.
    pub fn shade_hit(&self, hit_comps: &IntersecComputations) -> Result<Color> {
        self.light_sources
            .iter()
            .try_fold(Color::black(), |acc, light_source| {
                let in_shadow = self.is_point_shadowed(light_source, hit_comps.over_point())?;
                let surface = hit_comps.object().material().lighting(
                    light_source,
                    hit_comps.point(),
                    hit_comps.eye_v(),
                    hit_comps.normal_v(),
                    in_shadow,
                )?;
                Ok(acc + surface)
            })
    }

    /// True if any object lies between `point` and the light source.
    /// Objects behind the light don't cast a shadow.
    pub fn is_point_shadowed(&self, light_source: &PointLightSource, point: Point) -> Result<bool> {
        let v = light_source.position() - point;
        let distance = v.magnitude();
        let ray = Ray::new(point, v.normalize()?);

        Ok(self
            .intersect(&ray)
            .hit()
            .is_some_and(|inter| inter.time() < distance))
    }
}

// Default testing scene
impl Scene {
    pub fn default_testing() -> Result<Self> {
        let sphere1 = Object::with_material(
            Shape::Sphere,
            Material {
                color: Color::new(0.8, 1.0, 0.6),
                diffuse: 0.7,
                specular: 0.2,
                ..Default::default()
            },
        );
        let sphere2 = Object::with_transformation(Shape::Sphere, Matrix::scaling_uniform(0.5))?;

        let lights = vec![PointLightSource::white(Point::new(-10., 10., -10.))];
        Ok(Self::new(vec![sphere1, sphere2], lights))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        assert_approx_eq,
        primitive::vector::Vector,
        render::intersection::Intersection,
    };

    use super::*;

    #[test]
    fn empty_scene() {
        let scene = Scene::empty();

        assert_eq!(scene.objects_count(), 0);
        assert_eq!(scene.light_sources_count(), 0);
        assert!(scene.object(0).is_none());
        assert_eq!(scene, Scene::default());
    }

    #[test]
    fn default_testing_scene() {
        let scene = Scene::default_testing().unwrap();

        assert_eq!(scene.objects_count(), 2);
        assert_eq!(scene.light_sources_count(), 1);
        assert_approx_eq!(
            scene.light_source(0).unwrap().position(),
            Point::new(-10., 10., -10.)
        );
        assert_approx_eq!(scene.objects()[0].material().color, Color::new(0.8, 1., 0.6));
        assert_approx_eq!(
            scene.object(1).unwrap().transformation(),
            &Matrix::scaling(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn intersect_scene_with_ray() {
        let scene = Scene::default_testing().unwrap();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        assert_eq!(scene.intersect(&ray).times_vec(), vec![4., 4.5, 5.5, 6.]);
    }

    #[test]
    fn shade_intersection() {
        let scene = Scene::default_testing().unwrap();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let inter = Intersection::new(4., &scene.objects()[0]);
        let comps = inter.computations(&ray).unwrap();

        assert_approx_eq!(
            scene.shade_hit(&comps).unwrap(),
            Color::new(0.38066, 0.47583, 0.2855)
        );
    }

    #[test]
    fn shade_intersection_from_inside() {
        let mut scene = Scene::default_testing().unwrap();
        scene.set_light_sources(vec![PointLightSource::white(Point::new(0., 0.25, 0.))]);

        let ray = Ray::new(Point::zero(), Vector::new(0., 0., 1.));
        let inter = Intersection::new(0.5, &scene.objects()[1]);
        let comps = inter.computations(&ray).unwrap();

        assert_approx_eq!(
            scene.shade_hit(&comps).unwrap(),
            Color::new(0.90498, 0.90498, 0.90498)
        );
    }

    #[test]
    fn color_when_ray_misses() {
        let scene = Scene::default_testing().unwrap();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 1., 0.));

        assert_approx_eq!(scene.color_at(&ray).unwrap(), Color::black());
    }

    #[test]
    fn color_when_ray_hits() {
        let scene = Scene::default_testing().unwrap();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        assert_approx_eq!(
            scene.color_at(&ray).unwrap(),
            Color::new(0.38066, 0.47583, 0.2855)
        );
    }

    #[test]
    fn color_with_intersection_behind_ray() {
        let mut scene = Scene::default_testing().unwrap();
        let outer = Material {
            ambient: 1.,
            ..*scene.objects()[0].material()
        };
        let inner = Material {
            ambient: 1.,
            ..*scene.objects()[1].material()
        };
        let objects = vec![
            Object::with_material(Shape::Sphere, outer),
            Object::primitive(Shape::Sphere, inner, Matrix::scaling_uniform(0.5)).unwrap(),
        ];
        scene = Scene::new(objects, scene.light_sources().to_vec());

        let ray = Ray::new(Point::new(0., 0., 0.75), Vector::new(0., 0., -1.));

        assert_approx_eq!(scene.color_at(&ray).unwrap(), inner.color);
    }

    #[test]
    fn no_shadow_when_nothing_is_collinear_with_point_and_light() {
        let scene = Scene::default_testing().unwrap();
        let light = &scene.light_sources()[0];

        assert!(!scene.is_point_shadowed(light, Point::new(0., 10., 0.)).unwrap());
    }

    #[test]
    fn shadow_when_object_is_between_point_and_light() {
        let scene = Scene::default_testing().unwrap();
        let light = &scene.light_sources()[0];

        assert!(scene.is_point_shadowed(light, Point::new(10., -10., 10.)).unwrap());
    }

    #[test]
    fn no_shadow_when_object_is_behind_light() {
        let scene = Scene::default_testing().unwrap();
        let light = &scene.light_sources()[0];

        assert!(!scene.is_point_shadowed(light, Point::new(-20., 20., -20.)).unwrap());
    }

    #[test]
    fn no_shadow_when_object_is_behind_point() {
        let scene = Scene::default_testing().unwrap();
        let light = &scene.light_sources()[0];

        assert!(!scene.is_point_shadowed(light, Point::new(-2., 2., -2.)).unwrap());
    }

    #[test]
    fn shadowing_point_at_light_position_fails() {
        let scene = Scene::default_testing().unwrap();
        let light = &scene.light_sources()[0];

        assert!(scene.is_point_shadowed(light, light.position()).is_err());
    }

    #[test]
    fn shadow_rays_start_above_surface() {
        let mut scene = Scene::empty();
        scene.add_obj(Object::plane());
        scene.add_light(PointLightSource::white(Point::new(0., 10., 0.)));

        let ray = Ray::new(Point::new(0., 1., 0.), Vector::new(0., -1., 0.));
        let intersections = scene.intersect(&ray);
        let comps = intersections.hit_computations(&ray).unwrap().unwrap();
        let light = &scene.light_sources()[0];

        // the surface point itself is hit again at time zero
        assert!(scene.is_point_shadowed(light, comps.point()).unwrap());
        assert!(!scene.is_point_shadowed(light, comps.over_point()).unwrap());
        assert_approx_eq!(scene.shade_hit(&comps).unwrap(), Color::new(1.9, 1.9, 1.9));
        assert_approx_eq!(scene.color_at(&ray).unwrap(), Color::new(1.9, 1.9, 1.9));
    }

    #[test]
    fn shade_hit_intersection_in_shadow() {
        let mut scene = Scene::empty();
        scene.add_light(PointLightSource::white(Point::new(0., 0., -10.)));

        scene.add_obj(Object::sphere());
        scene.add_obj(
            Object::with_transformation(Shape::Sphere, Matrix::translation(0., 0., 10.)).unwrap(),
        );

        let ray = Ray::new(Point::new(0., 0., 5.), Vector::new(0., 0., 1.));
        let inter = Intersection::new(4., &scene.objects()[1]);
        let comps = inter.computations(&ray).unwrap();

        assert_approx_eq!(scene.shade_hit(&comps).unwrap(), Color::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn light_contributions_add_up() {
        let mut scene = Scene::default_testing().unwrap();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let single = scene.color_at(&ray).unwrap();

        scene.add_light(PointLightSource::white(Point::new(-10., 10., -10.)));

        assert_approx_eq!(scene.color_at(&ray).unwrap(), single * 2.);
    }

    #[test]
    fn scene_without_lights_is_black() {
        let mut scene = Scene::default_testing().unwrap();
        scene.set_light_sources(Vec::new());
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        assert_approx_eq!(scene.color_at(&ray).unwrap(), Color::black());
    }
}
