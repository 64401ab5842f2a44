/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense matrices and vectors with O(1) transposition.
//!
//! Products are range-checked according to a `RangeCheck` switch. With the
//! check enabled, any multiplication whose exact result would not fit the
//! element type aborts the operation with `ValueRangeExceeded`, and the
//! destination is left untouched.

#[macro_use] extern crate log;
#[cfg(test)] #[macro_use] extern crate toyla_assert_close;

mod index;
mod scalar;
mod errors;
mod matrix;
mod vector;

pub use crate::index::{index, Shape};
pub use crate::scalar::Scalar;
pub use crate::errors::{ArithError, ShapeMismatch};
pub use crate::matrix::ToyMatrix;
pub use crate::vector::{ToyVector, Orientation};

pub use ::toyla_range_check::{RangeCheck, ValueRangeExceeded, MulRangeCheck, check_multiply};
