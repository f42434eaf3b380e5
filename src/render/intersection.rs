use std::ops;

use crate::{
    approx_eq::EPSILON,
    error::Result,
    primitive::{point::Point, vector::Vector},
};

use super::{object::Object, ray::Ray};

/// Distance along the surface normal by which shadow rays are lifted off the surface.
pub const OVER_POINT_BIAS: f64 = EPSILON * 16.;

#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    time: f64,
    object: &'a Object,
}

impl<'a> Intersection<'a> {
    pub fn new(time: f64, object: &'a Object) -> Self {
        Self { time, object }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    /// Shading inputs at this intersection, for the ray that produced it.
    pub fn computations(&self, ray: &Ray) -> Result<IntersecComputations<'a>> {
        IntersecComputations::new(self.time, self.object, ray)
    }
}

/// Intersections of a single ray, kept in ascending order of time.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    vec: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    pub fn new() -> Self {
        Self { vec: Vec::new() }
    }

    pub fn from_times_and_obj(times: impl IntoIterator<Item = f64>, object: &'a Object) -> Self {
        let mut intersections = Self::new();
        for time in times {
            intersections.add(time, object);
        }
        intersections
    }

    /// Inserts after every entry with time less or equal, so ties keep insertion order.
    pub fn add(&mut self, time: f64, object: &'a Object) {
        let index = self.vec.partition_point(|inter| inter.time <= time);
        self.vec.insert(index, Intersection::new(time, object));
    }

    /// First intersection with non negative time; zero counts as a hit.
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.vec.iter().find(|inter| inter.time >= 0.)
    }

    pub fn hit_computations(&self, ray: &Ray) -> Option<Result<IntersecComputations<'a>>> {
        self.hit().map(|hit| hit.computations(ray))
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection<'a>> {
        self.vec.iter()
    }

    pub fn times_vec(&self) -> Vec<f64> {
        self.vec.iter().map(Intersection::time).collect()
    }
}

impl<'a> ops::Index<usize> for Intersections<'a> {
    type Output = Intersection<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vec[index]
    }
}

impl<'a, 'b> IntoIterator for &'b Intersections<'a> {
    type Item = &'b Intersection<'a>;
    type IntoIter = std::slice::Iter<'b, Intersection<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Handed to shapes while they are intersected in their local space.
/// Shapes only report times; the collector pairs them with the object being intersected.
pub struct IntersectionCollector<'a, 'b> {
    object: &'a Object,
    intersections: &'b mut Intersections<'a>,
}

impl<'a, 'b> IntersectionCollector<'a, 'b> {
    pub fn new(object: &'a Object, intersections: &'b mut Intersections<'a>) -> Self {
        Self {
            object,
            intersections,
        }
    }

    pub fn add(&mut self, time: f64) {
        self.intersections.add(time, self.object);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct IntersecComputations<'a> {
    time: f64,
    object: &'a Object,
    point: Point,
    over_point: Point,
    eye_v: Vector,
    normal_v: Vector,
    inside: bool,
}

impl<'a> IntersecComputations<'a> {
    pub fn new(time: f64, object: &'a Object, ray: &Ray) -> Result<Self> {
        let point = ray.position(time);
        let eye_v = -*ray.direction();
        let mut normal_v = object.normal_at(point)?;

        let inside = normal_v.dot(eye_v) < 0.;
        if inside {
            normal_v = -normal_v;
        }
        let over_point = point + normal_v * OVER_POINT_BIAS;

        Ok(Self {
            time,
            object,
            point,
            over_point,
            eye_v,
            normal_v,
            inside,
        })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// `point` moved slightly along the normal, used as the origin of shadow rays.
    pub fn over_point(&self) -> Point {
        self.over_point
    }

    pub fn eye_v(&self) -> Vector {
        self.eye_v
    }

    pub fn normal_v(&self) -> Vector {
        self.normal_v
    }

    pub fn inside(&self) -> bool {
        self.inside
    }
}
