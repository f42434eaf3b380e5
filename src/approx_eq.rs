pub const EPSILON: f64 = 1.0e-4;

/// Equality within a tolerance, for values that accumulate floating point error
/// through transform chains.
pub trait ApproxEq<Rhs = Self> {
    fn approx_eq_epsilon(&self, rhs: &Rhs, epsilon: f64) -> bool;

    fn approx_eq(&self, rhs: &Rhs) -> bool {
        self.approx_eq_epsilon(rhs, EPSILON)
    }
}

impl ApproxEq for f64 {
    fn approx_eq_epsilon(&self, rhs: &Self, epsilon: f64) -> bool {
        (self - rhs).abs() < epsilon
    }
}

impl<T: ApproxEq> ApproxEq for &T {
    fn approx_eq_epsilon(&self, rhs: &Self, epsilon: f64) -> bool {
        (*self).approx_eq_epsilon(*rhs, epsilon)
    }
}

#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                assert!(
                    $crate::approx_eq::ApproxEq::approx_eq(left, right),
                    "assertion failed: `left ≈ right`\n  left: `{:?}`\n right: `{:?}`",
                    left,
                    right
                );
            }
        }
    };
}
