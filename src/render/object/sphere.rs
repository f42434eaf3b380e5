use crate::{
    primitive::{point::Point, vector::Vector},
    render::{intersection::IntersectionCollector, ray::Ray},
};

pub struct UnitSphere;

impl UnitSphere {
    pub fn local_normal_at(object_point: Point) -> Vector {
        object_point - Point::ORIGIN
    }

    /// Both roots are reported, also when negative or equal (tangent ray).
    pub fn local_intersect(object_ray: &Ray, collector: &mut IntersectionCollector) {
        let vector_sphere_to_ray = *object_ray.origin() - Point::ORIGIN;

        let a = object_ray.direction().dot(*object_ray.direction());
        let b = 2. * object_ray.direction().dot(vector_sphere_to_ray);
        let c = vector_sphere_to_ray.dot(vector_sphere_to_ray) - 1.;

        let discriminant = b * b - 4. * a * c;
        if discriminant < 0. || a == 0. {
            return;
        }

        let delta_sqrt = discriminant.sqrt();
        collector.add((-b - delta_sqrt) / (2. * a));
        collector.add((-b + delta_sqrt) / (2. * a));
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use crate::{
        approx_eq::ApproxEq,
        assert_approx_eq,
        primitive::{matrix::Matrix, point::Point, tuple::Tuple, vector::Vector},
        render::{
            object::{Object, shape::Shape},
            ray::Ray,
        },
        transformation::Transform,
    };

    #[test]
    fn ray_intersects_sphere_at_two_points() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let obj = Object::new(Shape::Sphere);

        assert_eq!(obj.intersections(&ray).times_vec(), vec![4., 6.]);
    }

    #[test]
    fn ray_intersects_sphere_at_tangent() {
        let ray = Ray::new(Point::new(0., 1., -5.), Vector::new(0., 0., 1.));
        let obj = Object::new(Shape::Sphere);

        assert_eq!(obj.intersections(&ray).times_vec(), vec![5., 5.]);
    }

    #[test]
    fn ray_misses_sphere() {
        let ray = Ray::new(Point::new(0., 2., -5.), Vector::new(0., 0., 1.));
        let obj = Object::new(Shape::Sphere);

        assert!(obj.intersections(&ray).is_empty());
    }

    #[test]
    fn ray_originates_inside_sphere() {
        let ray = Ray::new(Point::new(0., 0., 0.), Vector::new(0., 0., 1.));
        let obj = Object::new(Shape::Sphere);

        assert_eq!(obj.intersections(&ray).times_vec(), vec![-1., 1.]);
    }

    #[test]
    fn sphere_is_behind_ray() {
        let ray = Ray::new(Point::new(0., 0., 5.), Vector::new(0., 0., 1.));
        let obj = Object::new(Shape::Sphere);

        assert_eq!(obj.intersections(&ray).times_vec(), vec![-6., -4.]);
    }

    #[test]
    fn intersections_reference_the_intersected_object() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let obj = Object::new(Shape::Sphere);
        let intersections = obj.intersections(&ray);

        assert_eq!(intersections.len(), 2);
        assert!(
            intersections
                .iter()
                .all(|inter| std::ptr::eq(inter.object(), &obj))
        );
    }

    #[test]
    fn intersect_scaled_sphere() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let obj = Object::with_transformation(Shape::Sphere, Matrix::scaling_uniform(2.)).unwrap();

        assert_eq!(obj.intersections(&ray).times_vec(), vec![3., 7.]);
    }

    #[test]
    fn intersect_translated_sphere() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let obj =
            Object::with_transformation(Shape::Sphere, Matrix::translation(5., 0., 0.)).unwrap();

        assert!(obj.intersections(&ray).is_empty());
    }

    #[test]
    fn normal_on_sphere_x_axis() {
        let sphere_obj = Object::new(Shape::Sphere);

        assert_approx_eq!(
            sphere_obj.normal_at(Point::new(1., 0., 0.)).unwrap(),
            Vector::new(1., 0., 0.)
        );
    }

    #[test]
    fn normal_on_sphere_y_axis() {
        let sphere_obj = Object::new(Shape::Sphere);

        assert_approx_eq!(
            sphere_obj.normal_at(Point::new(0., 1., 0.)).unwrap(),
            Vector::new(0., 1., 0.)
        );
    }

    #[test]
    fn normal_on_sphere_z_axis() {
        let sphere_obj = Object::new(Shape::Sphere);

        assert_approx_eq!(
            sphere_obj.normal_at(Point::new(0., 0., 1.)).unwrap(),
            Vector::new(0., 0., 1.)
        );
    }

    #[test]
    fn normal_on_sphere_at_nonaxial_point() {
        let sphere_obj = Object::new(Shape::Sphere);

        let frac_sqrt_3_3 = 3_f64.sqrt() / 3.;
        let normal = sphere_obj
            .normal_at(Point::new(frac_sqrt_3_3, frac_sqrt_3_3, frac_sqrt_3_3))
            .unwrap();
        assert_approx_eq!(
            normal,
            Vector::new(frac_sqrt_3_3, frac_sqrt_3_3, frac_sqrt_3_3)
        );
        assert_approx_eq!(normal, normal.normalize().unwrap());
    }

    #[test]
    fn normal_is_unit_length_under_any_transformation() {
        let obj = Object::with_transformation(
            Shape::Sphere,
            Matrix::scaling(3., 0.2, 1.5)
                .rotate_y(1.1)
                .translate(4., -2., 9.)
                .transformed(),
        )
        .unwrap();

        let point = Point::new(4., -1.8, 9.);
        assert!(obj.normal_at(point).unwrap().magnitude().approx_eq(&1.));
    }

    #[test]
    fn normal_on_translated_sphere() {
        let sphere_obj =
            Object::with_transformation(Shape::Sphere, Matrix::translation(0., 1., 0.)).unwrap();

        assert_approx_eq!(
            sphere_obj
                .normal_at(Point::new(0., 1. + FRAC_1_SQRT_2, -FRAC_1_SQRT_2))
                .unwrap(),
            Vector::new(0., FRAC_1_SQRT_2, -FRAC_1_SQRT_2)
        );
    }

    #[test]
    fn normal_on_transformed_sphere() {
        let sphere_obj = Object::with_transformation(
            Shape::Sphere,
            Matrix::scaling(1., 0.5, 1.) * Matrix::rotation_z(PI / 5.),
        )
        .unwrap();

        assert_approx_eq!(
            sphere_obj
                .normal_at(Point::new(0., FRAC_1_SQRT_2, -FRAC_1_SQRT_2))
                .unwrap(),
            Vector::new(0., 0.97014, -0.24254)
        );
    }
}
