/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::std::fmt;
use ::num_traits::Zero;
use ::toyla_range_check::MulRangeCheck;

/// Element types of `ToyMatrix` and `ToyVector`.
///
/// The `native_*` operations never panic: integers wrap around and floats
/// follow IEEE semantics. Whether an overflowing product is allowed to get
/// that far is decided by `RangeCheck`.
///
/// Since `MulRangeCheck` is sealed, so is this.
pub trait Scalar
    : MulRangeCheck + Zero + PartialEq
    + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    fn native_add(self, other: Self) -> Self;
    fn native_sub(self, other: Self) -> Self;
    fn native_mul(self, other: Self) -> Self;
}

macro_rules! impl_int {
    ($($T:ident)*) => {$(
        impl Scalar for $T {
            #[inline(always)] fn native_add(self, other: $T) -> $T { self.wrapping_add(other) }
            #[inline(always)] fn native_sub(self, other: $T) -> $T { self.wrapping_sub(other) }
            #[inline(always)] fn native_mul(self, other: $T) -> $T { self.wrapping_mul(other) }
        }
    )*};
}

macro_rules! impl_float {
    ($($T:ident)*) => {$(
        impl Scalar for $T {
            #[inline(always)] fn native_add(self, other: $T) -> $T { self + other }
            #[inline(always)] fn native_sub(self, other: $T) -> $T { self - other }
            #[inline(always)] fn native_mul(self, other: $T) -> $T { self * other }
        }
    )*};
}

impl_int!{ i8 i16 i32 i64 i128 isize }
impl_float!{ f32 f64 }
