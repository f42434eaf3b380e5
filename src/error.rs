use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("matrix with zero determinant is not invertible")]
    NotInvertible,

    #[error("can't normalize a vector with zero magnitude")]
    ZeroMagnitude,

    #[error("index [{row}, {col}] not in [0-3, 0-3]")]
    IndexOutOfBounds { row: usize, col: usize },

    #[error("invalid matrix initializer size [{rows}][{cols}]")]
    InvalidMatrixShape { rows: usize, cols: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
