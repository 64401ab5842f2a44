/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::std::fmt;
use ::failure::Fail;

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

/// `assert_close!(rel=1e-6, abs=1e-8, left, right)`, with both tolerances optional.
///
/// Works on anything implementing `CheckClose`.
#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        $crate::assert_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_NONZERO_TOL] [@abs 0.0]]}
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! assert_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]]);
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]]);
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        $crate::assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt "not nearly equal!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        $crate::assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt $($fmt)+])
    };
    (@expand [$([@$which:ident $tol:expr])*] [@comp $a:expr, $b:expr] [@fmt $($fmt:tt)+]) => {
        #[allow(unused_mut)]
        #[allow(unused_assignments)]
        {
            let a = $a;
            let b = $b;

            let mut tol = $crate::Tolerances { abs: 0.0, rel: 0.0 };
            $( $crate::assert_close_impl!(@assign tol $which $tol); )*

            if let Err(e) = $crate::CheckClose::check_close(&a, &b, tol) {
                panic!(
                    "{} (tolerances: rel={}, abs={})\n{}",
                    format!($($fmt)+), tol.rel, tol.abs, e,
                );
            }
        }
    };
    (@assign $tol:ident rel $value:expr) => { $tol.rel = $value; };
    (@assign $tol:ident abs $value:expr) => { $tol.abs = $value; };
}

/// Python's `math.isclose`, with `abs` and `rel` both in play.
#[doc(hidden)]
#[inline]
pub fn __is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // infinities of the same sign
    if a == b { return true; }
    if a.is_infinite() || b.is_infinite() { return false; }

    // NaN lands here and fails
    (a - b).abs() <= abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

/// The first pair of values that were not close.
#[derive(Debug)]
pub struct CheckCloseError<T> {
    /// Where in the container the values were found, outermost first.
    pub position: Vec<usize>,
    pub values: (T, T),
    pub tol: Tolerances,
}

impl<T: fmt::Debug> fmt::Display for CheckCloseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (ref left, ref right) = self.values;
        write!(f, "failed at {:?}:\n  left: {:?}\n right: {:?}", self.position, left, right)
    }
}

impl<T> Fail for CheckCloseError<T>
where T: fmt::Debug + Send + Sync + 'static,
{}

impl<T> CheckCloseError<T> {
    /// Records that the failure happened inside element `index` of an outer container.
    pub fn at(mut self, index: usize) -> Self
    { self.position.insert(0, index); self }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    type Scalar;

    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>;
}

macro_rules! impl_float {
    ($($T:ident)*) => {$(
        impl CheckClose for $T {
            type Scalar = $T;

            #[inline]
            fn check_close(&self, other: &$T, tol: Tolerances) -> Result<(), CheckCloseError<$T>> {
                match __is_close(f64::from(*self), f64::from(*other), tol) {
                    true => Ok(()),
                    false => Err(CheckCloseError { position: vec![], values: (*self, *other), tol }),
                }
            }
        }
    )*};
}

impl_float!{ f32 f64 }

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { CheckClose::check_close(*self, *other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    {
        assert_eq!(self.len(), other.len(), "cannot compare slices of different length");
        for (i, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| e.at(i))?;
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Vec<T>, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose<[T]> for Vec<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { self[..].check_close(other, tol) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn macro_output_can_compile() {
        assert_close!(1.0, 1.0);
        assert_close!(abs=1e-8, 1.0, 1.0);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0);
        assert_close!(1.0, 1.0,);
        assert_close!(abs=1e-8, 1.0, 1.0,);
        assert_close!(rel=1e-8, abs=1e-8, 1.0f32, 1.0f32, "{}", "hello");
    }

    #[test]
    fn f32_uses_relative_tolerance() {
        assert_close!(rel=1e-6, 81628267.0f32, 81628270.0f32);
        assert!(81628267.0f32.check_close(&81700000.0, Tolerances { abs: 0.0, rel: 1e-6 }).is_err());
    }

    #[test]
    fn slices_report_position() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![1.0, 2.5, 3.0];
        let err = a.check_close(&b, Tolerances { abs: 1e-3, rel: 0.0 }).unwrap_err();
        assert_eq!(err.position, vec![1]);
        assert_eq!(err.values, (2.0, 2.5));

        let nested = vec![vec![1.0], vec![2.0, 3.0]];
        let other = vec![vec![1.0], vec![2.0, 4.0]];
        let err = nested.check_close(&other, Tolerances { abs: 1e-3, rel: 0.0 }).unwrap_err();
        assert_eq!(err.position, vec![1, 1]);
    }

    #[test]
    fn infinities_and_nan() {
        let tol = Tolerances { abs: 1.0, rel: 1.0 };
        assert!(::std::f64::INFINITY.check_close(&::std::f64::INFINITY, tol).is_ok());
        assert!(::std::f64::INFINITY.check_close(&::std::f64::NEG_INFINITY, tol).is_err());
        assert!(::std::f64::NAN.check_close(&::std::f64::NAN, tol).is_err());
    }

    #[test]
    #[should_panic(expected = "not nearly equal")]
    fn not_close() {
        assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }
}
