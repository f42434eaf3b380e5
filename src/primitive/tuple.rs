/// Shared accessors of points and vectors.
/// `w` is the homogeneous coordinate: 1 for points, 0 for vectors,
/// so that matrix multiplication applies translation only to points.
pub trait Tuple {
    fn new(x: f64, y: f64, z: f64) -> Self;

    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;
    fn w(&self) -> f64;
}
