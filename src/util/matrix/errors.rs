/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::std::fmt;
use ::failure::Fail;
use ::toyla_range_check::ValueRangeExceeded;

/// Operand shapes that are incompatible for an operation.
#[derive(Debug, Fail, Copy, Clone, PartialEq, Eq)]
#[fail(display = "cannot {} operands of shape {:?} and {:?}", op, left, right)]
pub struct ShapeMismatch {
    pub op: &'static str,
    pub left: (usize, usize),
    pub right: (usize, usize),
}

impl ShapeMismatch {
    pub(crate) fn check(op: &'static str, ok: bool, left: (usize, usize), right: (usize, usize)) -> Result<(), Self>
    {
        match ok {
            true => Ok(()),
            false => Err(ShapeMismatch { op, left, right }),
        }
    }
}

/// Failure of a range-checked product.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ArithError<T> {
    RangeExceeded(ValueRangeExceeded<T>),
    ShapeMismatch(ShapeMismatch),
}

impl<T> From<ValueRangeExceeded<T>> for ArithError<T> {
    fn from(e: ValueRangeExceeded<T>) -> Self { ArithError::RangeExceeded(e) }
}

impl<T> From<ShapeMismatch> for ArithError<T> {
    fn from(e: ShapeMismatch) -> Self { ArithError::ShapeMismatch(e) }
}

impl<T: fmt::Display> fmt::Display for ArithError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArithError::RangeExceeded(e) => fmt::Display::fmt(e, f),
            ArithError::ShapeMismatch(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl<T> Fail for ArithError<T>
where T: fmt::Debug + fmt::Display + Send + Sync + 'static,
{
    fn cause(&self) -> Option<&dyn Fail> {
        match self {
            ArithError::RangeExceeded(e) => Some(e),
            ArithError::ShapeMismatch(e) => Some(e),
        }
    }
}
