use std::ops;

use super::{point::Point, tuple::Tuple, vector::Vector};
use crate::{
    approx_eq::ApproxEq,
    error::{Error, Result},
    transformation::Transform,
};

/// Row-major 4x4 matrix of homogeneous transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    data: [f64; 16],
}

impl Transform for Matrix {
    fn transform(&mut self, matrix: &Matrix) {
        *self = matrix * (self as &Matrix);
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub fn new(data: [f64; 16]) -> Self {
        Self { data }
    }

    /// Builds a matrix out of exactly 4 rows of 4 values each.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.len() != 4 || rows.iter().any(|row| row.as_ref().len() != 4) {
            return Err(Error::InvalidMatrixShape {
                rows: rows.len(),
                cols,
            });
        }

        let mut res = Self::empty();
        for (row, values) in rows.iter().enumerate() {
            res.data[row * 4..row * 4 + 4].copy_from_slice(values.as_ref());
        }
        Ok(res)
    }

    pub fn empty() -> Self {
        Self::new([0.; 16])
    }

    #[rustfmt::skip]
    pub fn identity() -> Self {
        Self::new([
            1., 0., 0., 0.,
            0., 1., 0., 0.,
            0., 0., 1., 0.,
            0., 0., 0., 1.,
        ])
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        if row > 3 || col > 3 {
            return Err(Error::IndexOutOfBounds { row, col });
        }
        Ok(self.data[row * 4 + col])
    }

    pub fn transpose(&self) -> Self {
        let mut res = *self;

        res.data.swap(1, 4);
        res.data.swap(2, 8);

        res.data.swap(3, 12);
        res.data.swap(6, 9);

        res.data.swap(7, 13);
        res.data.swap(11, 14);

        res
    }

    fn submatrix(&self, row_to_del: usize, col_to_del: usize) -> [f64; 9] {
        let mut res = [0.; 9];
        let mut id = 0;

        for row in (0..4).filter(|&row| row != row_to_del) {
            for col in (0..4).filter(|&col| col != col_to_del) {
                res[id] = self[(row, col)];
                id += 1;
            }
        }
        res
    }

    fn minor(&self, row: usize, col: usize) -> f64 {
        let [a, b, c, d, e, f, g, h, i] = self.submatrix(row, col);
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let minor = self.minor(row, col);
        if (row + col) % 2 == 1 { -minor } else { minor }
    }

    pub fn determinant(&self) -> f64 {
        (0..4).map(|col| self[(0, col)] * self.cofactor(0, col)).sum()
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.
    }

    pub fn inverse(&self) -> Result<Matrix> {
        let determinant = self.determinant();
        if determinant == 0. {
            return Err(Error::NotInvertible);
        }
        let mut res = Matrix::empty();

        for row in 0..4 {
            for col in 0..4 {
                // transposed on purpose: inverse is the adjugate over the determinant
                res[(col, row)] = self.cofactor(row, col) / determinant;
            }
        }
        Ok(res)
    }

    #[rustfmt::skip]
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        Matrix::new([
            1., 0., 0., x,
            0., 1., 0., y,
            0., 0., 1., z,
            0., 0., 0., 1.,
        ])
    }

    #[rustfmt::skip]
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
        Matrix::new([
            x, 0., 0., 0.,
            0., y, 0., 0.,
            0., 0., z, 0.,
            0., 0., 0., 1.,
        ])
    }

    pub fn scaling_uniform(f: f64) -> Matrix {
        Self::scaling(f, f, f)
    }

    #[rustfmt::skip]
    pub fn rotation_x(radians: f64) -> Matrix {
        let sin_r = radians.sin();
        let cos_r = radians.cos();
        Matrix::new([
            1., 0., 0., 0.,
            0., cos_r, -sin_r, 0.,
            0., sin_r, cos_r, 0.,
            0., 0., 0., 1.,
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_y(radians: f64) -> Matrix {
        let sin_r = radians.sin();
        let cos_r = radians.cos();
        Matrix::new([
            cos_r, 0., sin_r, 0.,
            0., 1., 0., 0.,
            -sin_r, 0., cos_r, 0.,
            0., 0., 0., 1.,
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_z(radians: f64) -> Matrix {
        let sin_r = radians.sin();
        let cos_r = radians.cos();
        Matrix::new([
            cos_r, -sin_r, 0., 0.,
            sin_r, cos_r, 0., 0.,
            0., 0., 1., 0.,
            0., 0., 0., 1.,
        ])
    }

    #[rustfmt::skip]
    pub fn shearing(
        x_prop_y: f64,
        x_prop_z: f64,
        y_prop_x: f64,
        y_prop_z: f64,
        z_prop_x: f64,
        z_prop_y: f64,
    ) -> Matrix {
        Matrix::new([
            1., x_prop_y, x_prop_z, 0.,
            y_prop_x, 1., y_prop_z, 0.,
            z_prop_x, z_prop_y, 1., 0.,
            0., 0., 0., 1.,
        ])
    }

    /// Orients the world relative to an eye at `from` looking at `to`.
    /// Fails when `from == to` or `up_v` is zero.
    pub fn view_transformation(from: Point, to: Point, up_v: Vector) -> Result<Matrix> {
        let forward_v = (to - from).normalize()?;
        let left_v = forward_v.cross(up_v.normalize()?);
        let true_up_v = left_v.cross(forward_v);

        #[rustfmt::skip]
        let orientation = Matrix::new([
            left_v.x(), left_v.y(), left_v.z(), 0.,
            true_up_v.x(), true_up_v.y(), true_up_v.z(), 0.,
            -forward_v.x(), -forward_v.y(), -forward_v.z(), 0.,
            0., 0., 0., 1.,
        ]);

        Ok(orientation * Matrix::translation(-from.x(), -from.y(), -from.z()))
    }
}

impl ApproxEq for Matrix {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(x, y)| x.approx_eq_epsilon(y, epsilon))
    }
}

impl ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < 4 && col < 4, "index [{row}, {col}] not in [0-3, 0-3]");
        &self.data[row * 4 + col]
    }
}

impl ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < 4 && col < 4, "index [{row}, {col}] not in [0-3, 0-3]");
        &mut self.data[row * 4 + col]
    }
}

impl ops::Mul<Matrix> for Matrix {
    type Output = Self;
    fn mul(self, rhs: Matrix) -> Self::Output {
        &self * &rhs
    }
}

impl ops::Mul<&Matrix> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Self::Output {
        let mut output = Self::Output::empty();
        for row in 0..4 {
            for col in 0..4 {
                output[(row, col)] = self[(row, 0)] * rhs[(0, col)]
                    + self[(row, 1)] * rhs[(1, col)]
                    + self[(row, 2)] * rhs[(2, col)]
                    + self[(row, 3)] * rhs[(3, col)];
            }
        }
        output
    }
}

impl<T> ops::Mul<T> for &Matrix
where
    T: Tuple,
{
    type Output = T;
    fn mul(self, rhs: T) -> Self::Output {
        T::new(
            self[(0, 0)] * rhs.x()
                + self[(0, 1)] * rhs.y()
                + self[(0, 2)] * rhs.z()
                + self[(0, 3)] * rhs.w(),
            self[(1, 0)] * rhs.x()
                + self[(1, 1)] * rhs.y()
                + self[(1, 2)] * rhs.z()
                + self[(1, 3)] * rhs.w(),
            self[(2, 0)] * rhs.x()
                + self[(2, 1)] * rhs.y()
                + self[(2, 2)] * rhs.z()
                + self[(2, 3)] * rhs.w(),
        )
    }
}

impl<T> ops::Mul<T> for Matrix
where
    T: Tuple,
{
    type Output = T;
    #[allow(clippy::op_ref)]
    fn mul(self, rhs: T) -> Self::Output {
        &self * rhs
    }
}
