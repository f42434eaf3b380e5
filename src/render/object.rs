pub mod plane;
pub mod shape;
pub mod sphere;

use derive_builder::Builder;

use crate::{
    approx_eq::ApproxEq,
    error::Result,
    primitive::{matrix::Matrix, point::Point, vector::Vector},
    transformation::Transform,
};

use super::{
    intersection::{IntersectionCollector, Intersections},
    material::Material,
    ray::Ray,
};
use shape::Shape;

/// A shape placed in the world: local geometry, its object-to-world
/// transformation and the material it's shaded with.
///
/// The inverse transformation is cached, and the setter rejects
/// non-invertible matrices, so an `Object` can always be intersected.
#[derive(Clone, Debug, PartialEq, Builder)]
#[builder(build_fn(skip))]
pub struct Object {
    shape: Shape,
    material: Material,
    transformation: Matrix,
    #[builder(setter(skip))]
    inverse_transformation: Matrix,
}

impl ObjectBuilder {
    pub fn build(&self) -> Result<Object> {
        Object::primitive(
            self.shape.unwrap_or_default(),
            self.material.unwrap_or_default(),
            self.transformation.unwrap_or_default(),
        )
    }
}

impl Object {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            material: Material::default(),
            transformation: Matrix::identity(),
            inverse_transformation: Matrix::identity(),
        }
    }

    pub fn with_transformation(shape: Shape, transformation: Matrix) -> Result<Self> {
        Self::primitive(shape, Material::default(), transformation)
    }

    pub fn with_material(shape: Shape, material: Material) -> Self {
        Self {
            material,
            ..Self::new(shape)
        }
    }

    pub fn primitive(shape: Shape, material: Material, transformation: Matrix) -> Result<Self> {
        let mut obj = Self::with_material(shape, material);
        obj.set_transformation(transformation)?;
        Ok(obj)
    }

    pub fn sphere() -> Self {
        Self::new(Shape::Sphere)
    }

    pub fn plane() -> Self {
        Self::new(Shape::Plane)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn transformation(&self) -> &Matrix {
        &self.transformation
    }

    pub fn inverse_transformation(&self) -> &Matrix {
        &self.inverse_transformation
    }

    /// Leaves the object untouched when `transformation` is not invertible.
    pub fn set_transformation(&mut self, transformation: Matrix) -> Result<()> {
        self.inverse_transformation = transformation.inverse()?;
        self.transformation = transformation;
        Ok(())
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Adds every intersection of `world_ray` with this object to `intersections`.
    pub fn intersect<'a>(&'a self, world_ray: &Ray, intersections: &mut Intersections<'a>) {
        let object_ray = world_ray.transform_new(&self.inverse_transformation);
        let mut collector = IntersectionCollector::new(self, intersections);
        self.shape.local_intersect(&object_ray, &mut collector);
    }

    pub fn intersections(&self, world_ray: &Ray) -> Intersections<'_> {
        let mut intersections = Intersections::new();
        self.intersect(world_ray, &mut intersections);
        intersections
    }

    pub fn normal_at(&self, world_point: Point) -> Result<Vector> {
        let object_point = self.inverse_transformation * world_point;
        let object_normal = self.shape.local_normal_at(object_point);

        // inverse transpose keeps the normal perpendicular under non-uniform scaling;
        // vectors ignore its translation row
        let world_normal = self.inverse_transformation.transpose() * object_normal;
        world_normal.normalize()
    }
}

impl ApproxEq for Object {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.shape == other.shape
            && self
                .transformation
                .approx_eq_epsilon(&other.transformation, epsilon)
            && self.material.approx_eq_epsilon(&other.material, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert_approx_eq,
        error::Error,
        primitive::tuple::Tuple,
        render::color::Color,
    };

    #[test]
    fn identity_matrix_is_obj_default_transformation() {
        let obj = Object::sphere();

        assert_approx_eq!(obj.transformation(), &Matrix::identity());
        assert_approx_eq!(obj.inverse_transformation(), &Matrix::identity());
    }

    #[test]
    fn default_material() {
        assert_approx_eq!(Object::plane().material(), &Material::default());
    }

    #[test]
    fn set_transformation() {
        let mut obj = Object::sphere();
        let t = Matrix::translation(2., 3., 4.);
        obj.set_transformation(t).unwrap();

        assert_approx_eq!(obj.transformation(), &t);
        assert_approx_eq!(
            obj.inverse_transformation(),
            &Matrix::translation(-2., -3., -4.)
        );
    }

    #[test]
    fn non_invertible_transformation_is_rejected() {
        let mut obj = Object::sphere();
        obj.set_transformation(Matrix::translation(1., 0., 0.))
            .unwrap();

        assert_eq!(
            obj.set_transformation(Matrix::scaling(0., 1., 1.)),
            Err(Error::NotInvertible)
        );
        assert_approx_eq!(obj.transformation(), &Matrix::translation(1., 0., 0.));
        assert!(Object::with_transformation(Shape::Plane, Matrix::empty()).is_err());
    }

    #[test]
    fn assign_material() {
        let mut obj = Object::sphere();
        let material = Material {
            ambient: 1.,
            ..Default::default()
        };
        obj.set_material(material);

        assert_approx_eq!(obj.material(), &material);

        obj.material_mut().diffuse = 0.2;
        assert_approx_eq!(obj.material().diffuse, 0.2);
    }

    #[test]
    fn builder() {
        let material = Material::with_color(Color::red());
        let obj = ObjectBuilder::default()
            .shape(Shape::Plane)
            .material(material)
            .transformation(Matrix::scaling(2., 2., 2.))
            .build()
            .unwrap();

        assert_eq!(obj.shape(), Shape::Plane);
        assert_approx_eq!(obj.material(), &material);
        assert_approx_eq!(
            obj.inverse_transformation(),
            &Matrix::scaling(0.5, 0.5, 0.5)
        );

        assert_approx_eq!(ObjectBuilder::default().build().unwrap(), Object::sphere());
        assert!(
            ObjectBuilder::default()
                .transformation(Matrix::empty())
                .build()
                .is_err()
        );
    }

    #[test]
    fn equality_compares_shape_transformation_and_material() {
        let a = Object::with_transformation(Shape::Sphere, Matrix::scaling_uniform(0.5)).unwrap();
        let b = Object::with_transformation(Shape::Sphere, Matrix::scaling_uniform(0.5)).unwrap();
        let plane = Object::with_transformation(Shape::Plane, Matrix::scaling_uniform(0.5)).unwrap();

        assert_approx_eq!(a, b);
        assert!(!a.approx_eq(&plane));
        assert!(!a.approx_eq(&Object::sphere()));
    }

    #[test]
    fn intersecting_transforms_ray_to_object_space() {
        let obj = Object::with_transformation(Shape::Sphere, Matrix::translation(0., 0., 5.))
            .unwrap();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        assert_eq!(obj.intersections(&ray).times_vec(), vec![9., 11.]);
    }
}
