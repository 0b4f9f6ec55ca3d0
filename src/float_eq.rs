//! Utilities to compare floating-point numbers and paths.

use float_cmp::ApproxEq;

use crate::path_builder::Segment;

/// Absolute tolerance used when comparing computed coordinates.
///
/// Path coordinates that went through trigonometry or sampling are only
/// meaningful up to a few decimals, which is also the default serialization
/// precision.
pub const PATH_EPSILON: f64 = 1e-6;

/// Checks whether two numbers are equal up to [`PATH_EPSILON`] or 1 ULP.
pub trait ApproxEqPath: ApproxEq {
    fn approx_eq_path(self, other: Self) -> bool;
}

impl ApproxEqPath for f64 {
    fn approx_eq_path(self, other: f64) -> bool {
        self.approx_eq(other, (PATH_EPSILON, 1))
    }
}

impl ApproxEqPath for &Segment {
    fn approx_eq_path(self, other: &Segment) -> bool {
        self.approx_eq(other, (PATH_EPSILON, 1))
    }
}

impl<'a> ApproxEq for &'a Segment {
    type Margin = float_cmp::F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        let margin = margin.into();

        self.command == other.command
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(other.params.iter())
                .all(|(a, b)| a.approx_eq(*b, margin))
    }
}

/// Compares two command sequences segment by segment.
pub fn paths_approx_eq(a: &[Segment], b: &[Segment]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.approx_eq_path(y))
}

// Macro for usage in unit tests
#[doc(hidden)]
#[macro_export]
macro_rules! assert_approx_eq_path {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (l, r) => {
                if !$crate::float_eq::paths_approx_eq(&l[..], &r[..]) {
                    panic!(
                        r#"assertion failed: `(left == right)`
  left: `{}`,
 right: `{}`"#,
                        $crate::PathArray::from(l[..].to_vec()),
                        $crate::PathArray::from(r[..].to_vec()),
                    )
                }
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_approx_equal() {
        assert!(1.0_f64.approx_eq_path(1.0000001_f64));
        assert!(!1.0_f64.approx_eq_path(1.0001_f64));
        assert!(0.0_f64.approx_eq_path(-0.0_f64));
    }

    #[test]
    fn segments_approx_equal() {
        let a = Segment::new('C', &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Segment::new('C', &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0000001]);
        let c = Segment::new('c', &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert!(a.approx_eq_path(&b));
        assert!(!a.approx_eq_path(&c));
    }

    #[test]
    fn assert_approx_eq_path_should_not_panic() {
        let a = vec![Segment::new('M', &[0.0, 0.0]), Segment::new('L', &[1.0, 1.0])];
        let b = vec![Segment::new('M', &[0.0, 0.0]), Segment::new('L', &[1.0, 1.0000000001])];
        assert_approx_eq_path!(a, b);
    }

    #[test]
    #[should_panic]
    fn assert_approx_eq_path_should_panic() {
        let a = vec![Segment::new('M', &[0.0, 0.0])];
        let b = vec![Segment::new('M', &[0.0, 1.0])];
        assert_approx_eq_path!(a, b);
    }
}
