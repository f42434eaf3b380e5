//! The sample scene rendered by the binary: three spheres standing in a room
//! whose floor and walls are flattened spheres.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::{
    error::Result,
    primitive::{matrix::Matrix, point::Point, tuple::Tuple, vector::Vector},
    render::{
        camera::Camera,
        color::Color,
        light::PointLightSource,
        material::{Material, MaterialBuilder},
        object::{Object, ObjectBuilder},
        scene::Scene,
    },
    transformation::Transform,
};

fn wall_transformation(y_angle: f64) -> Matrix {
    Matrix::scaling(10., 0.01, 10.)
        .rotate_x(FRAC_PI_2)
        .rotate_y(y_angle)
        .translate(0., 0., 5.)
        .transformed()
}

fn sphere_material(color: Color) -> Material {
    MaterialBuilder::default()
        .color(color)
        .diffuse(0.7)
        .specular(0.3)
        .build()
}

fn sphere(material: Material, transformation: Matrix) -> Result<Object> {
    ObjectBuilder::default()
        .material(material)
        .transformation(transformation)
        .build()
}

pub fn scene() -> Result<Scene> {
    let room = MaterialBuilder::default()
        .color(Color::new(1., 0.9, 0.9))
        .specular(0.)
        .build();

    let floor = sphere(room, Matrix::scaling(10., 0.01, 10.))?;
    let left_wall = sphere(room, wall_transformation(-FRAC_PI_4))?;
    let right_wall = sphere(room, wall_transformation(FRAC_PI_4))?;

    let large_sphere = sphere(
        sphere_material(Color::new(0.1, 1., 0.5)),
        Matrix::translation(-0.5, 1., 0.5),
    )?;
    let medium_sphere = sphere(
        sphere_material(Color::new(0.5, 1., 0.1)),
        Matrix::scaling_uniform(0.5)
            .translate(1.5, 0.5, -0.5)
            .transformed(),
    )?;
    let small_sphere = sphere(
        sphere_material(Color::new(1., 0.8, 0.1)),
        Matrix::scaling_uniform(0.33)
            .translate(-1.5, 0.33, -0.75)
            .transformed(),
    )?;

    Ok(Scene::new(
        vec![
            floor,
            left_wall,
            right_wall,
            large_sphere,
            medium_sphere,
            small_sphere,
        ],
        vec![PointLightSource::white(Point::new(-10., 10., -10.))],
    ))
}

pub fn camera(width: usize, height: usize, field_of_view: f64) -> Result<Camera> {
    let mut camera = Camera::new(width, height, field_of_view);
    camera.set_view_transform(
        Point::new(0., 1.5, -5.),
        Point::new(0., 1., 0.),
        Vector::new(0., 1., 0.),
    )?;
    Ok(camera)
}
