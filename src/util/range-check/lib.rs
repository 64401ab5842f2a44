/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Overflow guard for scalar multiplication.
//!
//! [`check_multiply`] decides whether `op1 * op2` is representable in the
//! operands' type *before* the multiplication is performed. The product
//! itself is never computed, because for integers it may wrap (or panic)
//! before the check gets a chance to run.
//!
//! [`check_multiply`]: fn.check_multiply.html

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

use ::std::fmt;
use ::failure::Fail;

/// The operands of a multiplication whose result would not fit in `T`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValueRangeExceeded<T> {
    pub op1: T,
    pub op2: T,
}

impl<T: fmt::Display> fmt::Display for ValueRangeExceeded<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "product of {} and {} leaves the range of its type", self.op1, self.op2)
    }
}

// (written by hand because the derive can't put bounds on T)
impl<T> Fail for ValueRangeExceeded<T>
where T: fmt::Debug + fmt::Display + Send + Sync + 'static,
{}

mod private {
    pub trait Sealed {}
}

/// Scalar types with a multiplication range check.
///
/// This is implemented for the signed integer and floating point primitives,
/// and cannot be implemented outside of this crate. Code that is generic over
/// `MulRangeCheck` therefore cannot be instantiated with an unsupported type.
pub trait MulRangeCheck: Copy + private::Sealed {
    /// Fails if `self * other` is not representable in `Self`.
    fn check_mul(self, other: Self) -> Result<(), ValueRangeExceeded<Self>>;
}

/// Fails if `op1 * op2` is not representable in `T`.
#[inline]
pub fn check_multiply<T: MulRangeCheck>(op1: T, op2: T) -> Result<(), ValueRangeExceeded<T>>
{ op1.check_mul(op2) }

// We want  MIN <= op1 * op2 <= MAX.  Dividing the bounds through by op2 instead
// keeps every intermediate in range, but a negative divisor flips both
// inequalities. Truncating division rounds each bound toward zero, which is the
// direction that keeps the test exact.
//
// op2 == -1 gets its own case because MIN / -1 is itself unrepresentable.
macro_rules! impl_signed_int {
    ($($T:ident)*) => {$(
        impl private::Sealed for $T {}

        impl MulRangeCheck for $T {
            #[inline]
            fn check_mul(self, other: $T) -> Result<(), ValueRangeExceeded<$T>> {
                let (op1, op2) = (self, other);
                let (min, max) = ($T::MIN, $T::MAX);

                let overflow = if op2 < -1 {
                    !(min / op2 >= op1 && max / op2 <= op1)
                } else if op2 >= 1 {
                    !(min / op2 <= op1 && max / op2 >= op1)
                } else {
                    // op2 is 0 or -1
                    op2 == -1 && op1 == min
                };

                match overflow {
                    true => Err(ValueRangeExceeded { op1, op2 }),
                    false => Ok(()),
                }
            }
        }
    )*};
}

impl_signed_int!{ i8 i16 i32 i64 i128 isize }

// Same idea as for integers, with `lowest` (= -MAX) as the lower bound. Each
// branch divides by whichever operand keeps the comparison on the correct side.
//
// Known gaps:
// * Products that underflow into (or below) the subnormal range are not reported.
// * Near MAX, the verdict follows the rounding of the division rather than that
//   of the true product, so a product that rounds to exactly MAX may go either way.
// * NaN operands are never reported; NaN just propagates. Neither is a zero
//   times an infinity, which is NaN as well.
macro_rules! impl_float {
    ($($T:ident)*) => {$(
        impl private::Sealed for $T {}

        impl MulRangeCheck for $T {
            #[inline]
            fn check_mul(self, other: $T) -> Result<(), ValueRangeExceeded<$T>> {
                let (op1, op2) = (self, other);
                let (lowest, max) = ($T::MIN, $T::MAX);

                if op1 == 0.0 || op2 == 0.0 || op1.is_nan() || op2.is_nan() {
                    return Ok(());
                }
                // the divisions below lose infinities once the other operand is below 1
                if op1.is_infinite() || op2.is_infinite() {
                    return Err(ValueRangeExceeded { op1, op2 });
                }

                let in_range = match (op1 < 0.0, op2 < 0.0) {
                    (true, false) => lowest / op2 <= op1,
                    (true, true) => max / op2 <= op1,
                    (false, false) => max / op2 >= op1,
                    (false, true) => lowest / op1 <= op2,
                };

                match in_range {
                    true => Ok(()),
                    false => Err(ValueRangeExceeded { op1, op2 }),
                }
            }
        }
    )*};
}

impl_float!{ f32 f64 }

/// Whether arithmetic should run the multiplication guard.
///
/// The default is chosen at compile time by the `range-check` cargo feature.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RangeCheck {
    /// Every multiply-accumulate step is checked, and the first overflow
    /// aborts the whole operation.
    Enabled,
    /// No checks. Integers wrap around and floats overflow to infinity.
    Disabled,
}

impl Default for RangeCheck {
    #[cfg(feature = "range-check")]
    fn default() -> Self { RangeCheck::Enabled }

    #[cfg(not(feature = "range-check"))]
    fn default() -> Self { RangeCheck::Disabled }
}

impl RangeCheck {
    pub fn is_enabled(self) -> bool
    { self == RangeCheck::Enabled }

    /// Runs the guard on `op1 * op2` if enabled.
    #[inline(always)]
    pub fn check<T: MulRangeCheck>(self, op1: T, op2: T) -> Result<(), ValueRangeExceeded<T>>
    {
        match self {
            RangeCheck::Enabled => check_multiply(op1, op2),
            RangeCheck::Disabled => Ok(()),
        }
    }
}
