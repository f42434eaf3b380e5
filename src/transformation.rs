use crate::primitive::matrix::Matrix;

/// Fluent application of transforms.
///
/// Every call left-multiplies the new transform onto the current state,
/// so chained calls read in the order they are applied:
/// `Matrix::scaling(..).rotate_x(..).translate(..)` scales first and translates last.
pub trait Transform: Sized + Clone {
    fn transform(&mut self, matrix: &Matrix);

    fn transform_new(&self, matrix: &Matrix) -> Self {
        let mut copy = self.clone();
        copy.transform(matrix);
        copy
    }

    fn transformed(&self) -> Self {
        self.clone()
    }

    fn transform_chain(&mut self, matrix: &Matrix) -> &mut Self {
        self.transform(matrix);
        self
    }

    fn translate(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.transform_chain(&Matrix::translation(x, y, z))
    }

    fn scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.transform_chain(&Matrix::scaling(x, y, z))
    }

    fn scale_uniform(&mut self, factor: f64) -> &mut Self {
        self.transform_chain(&Matrix::scaling_uniform(factor))
    }

    fn rotate_x(&mut self, radians: f64) -> &mut Self {
        self.transform_chain(&Matrix::rotation_x(radians))
    }

    fn rotate_y(&mut self, radians: f64) -> &mut Self {
        self.transform_chain(&Matrix::rotation_y(radians))
    }

    fn rotate_z(&mut self, radians: f64) -> &mut Self {
        self.transform_chain(&Matrix::rotation_z(radians))
    }

    fn shear(
        &mut self,
        x_prop_y: f64,
        x_prop_z: f64,
        y_prop_x: f64,
        y_prop_z: f64,
        z_prop_x: f64,
        z_prop_y: f64,
    ) -> &mut Self {
        self.transform_chain(&Matrix::shearing(
            x_prop_y, x_prop_z, y_prop_x, y_prop_z, z_prop_x, z_prop_y,
        ))
    }
}
