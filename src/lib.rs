/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense matrices and vectors whose products refuse to overflow.
//!
//! ```
//! use toyla::{ToyMatrix, RangeCheck, ArithError};
//!
//! let a = ToyMatrix::from_row_major_data((1, 1), vec![i32::max_value()]);
//! let b = ToyMatrix::from_row_major_data((1, 1), vec![2]);
//! match a.matmul_with(&b, RangeCheck::Enabled) {
//!     Err(ArithError::RangeExceeded(e)) => assert_eq!((e.op1, e.op2), (i32::max_value(), 2)),
//!     _ => panic!(),
//! }
//! ```

#[macro_use] extern crate log;

pub use ::toyla_matrix::{
    index, Shape, Scalar,
    ToyMatrix, ToyVector, Orientation,
    ArithError, ShapeMismatch,
};
pub use ::toyla_range_check::{RangeCheck, ValueRangeExceeded, MulRangeCheck, check_multiply};
pub use ::toyla_config::{Settings, YamlRead};

pub type FailResult<T> = Result<T, ::failure::Error>;

/// Read `Settings` from a YAML file and return the range-check switch it selects.
pub fn range_check_from_path(path: impl AsRef<::std::path::Path>) -> FailResult<RangeCheck>
{
    let settings = Settings::from_path(path)?;
    info!("Range checking is {:?}", settings.range_check);
    Ok(settings.range_check)
}
