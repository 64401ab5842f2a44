/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{ArithError, ShapeMismatch, Scalar, Shape, ToyMatrix};
use ::std::ops::{Index, IndexMut};
use ::itertools::zip_eq;
use ::toyla_range_check::{RangeCheck, ValueRangeExceeded};
use ::toyla_assert_close::{CheckClose, CheckCloseError, Tolerances};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation { Column, Row }

/// Owned dense vector; a column vector unless transposed.
///
/// Linear indexing (`v[i]`) does not care about orientation. The orientation
/// only matters to the products, which follow the usual matrix rules.
#[derive(Debug)]
pub struct ToyVector<T = f64> {
    data: Vec<T>,
    // (len, 1), or (1, len) when transposed
    shape: Shape,
}

impl<T: Scalar> ToyVector<T> {
    /// A zero-filled column vector.
    pub fn new(len: usize) -> Self
    { ToyVector::from_data(vec![T::zero(); len]) }
}

impl<T> ToyVector<T> {
    /// A column vector.
    pub fn from_data(data: Vec<T>) -> Self
    {
        let shape = Shape::new((data.len(), 1));
        ToyVector { data, shape }
    }

    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
    pub fn dims(&self) -> (usize, usize) { self.shape.dims() }
    pub fn num_rows(&self) -> usize { self.shape.num_rows() }
    pub fn num_cols(&self) -> usize { self.shape.num_cols() }
    pub fn is_transposed(&self) -> bool { self.shape.is_transposed() }
    pub fn as_slice(&self) -> &[T] { &self.data }

    pub fn orientation(&self) -> Orientation
    {
        match self.is_transposed() {
            false => Orientation::Column,
            true => Orientation::Row,
        }
    }

    /// Switch between column and row vector. Returns the new orientation.
    pub fn transpose(&mut self) -> Orientation
    {
        self.shape.transpose();
        self.orientation()
    }
}

impl<T: Copy> ToyVector<T> {
    /// Element access as a `num_rows` by `num_cols` matrix.
    pub fn get(&self, row: usize, col: usize) -> T
    { self.data[self.shape.offset(row, col)] }
}

impl<T: Scalar> Default for ToyVector<T> {
    fn default() -> Self { ToyVector::new(4) }
}

impl<T: Clone> Clone for ToyVector<T> {
    fn clone(&self) -> Self
    { ToyVector { data: self.data.clone(), shape: self.shape } }

    fn clone_from(&mut self, source: &Self)
    {
        if self.data.capacity() < source.data.len() {
            trace!("Reallocating vector buffer for {} -> {} elements", self.len(), source.len());
        }
        self.data.clone_from(&source.data);
        self.shape = source.shape;
    }
}

impl<T: PartialEq> PartialEq for ToyVector<T> {
    fn eq(&self, other: &Self) -> bool
    { self.shape == other.shape && self.data == other.data }
}

impl<T> Index<usize> for ToyVector<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, i: usize) -> &T { &self.data[i] }
}

impl<T> IndexMut<usize> for ToyVector<T> {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut T { &mut self.data[i] }
}

// ---------------------------------------------------------------------------
// elementwise

impl<T: Scalar> ToyVector<T> {
    pub fn add(&self, rhs: &Self) -> Result<Self, ShapeMismatch>
    {
        let mut out = self.clone();
        out.add_assign(rhs)?;
        Ok(out)
    }

    pub fn sub(&self, rhs: &Self) -> Result<Self, ShapeMismatch>
    {
        let mut out = self.clone();
        out.sub_assign(rhs)?;
        Ok(out)
    }

    pub fn add_assign(&mut self, rhs: &Self) -> Result<(), ShapeMismatch>
    { self.zip_in_place("add", rhs, T::native_add) }

    pub fn sub_assign(&mut self, rhs: &Self) -> Result<(), ShapeMismatch>
    { self.zip_in_place("subtract", rhs, T::native_sub) }

    fn zip_in_place(&mut self, op: &'static str, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<(), ShapeMismatch>
    {
        ShapeMismatch::check(op, self.dims() == rhs.dims(), self.dims(), rhs.dims())?;

        for (a, &b) in zip_eq(&mut self.data, &rhs.data) {
            *a = f(*a, b);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// products

impl<T: Scalar> ToyVector<T> {
    pub fn dot(&self, rhs: &Self) -> Result<T, ArithError<T>>
    { self.dot_with(rhs, RangeCheck::default()) }

    /// Dot product of two vectors of equal length, whatever their orientation.
    pub fn dot_with(&self, rhs: &Self, check: RangeCheck) -> Result<T, ArithError<T>>
    {
        ShapeMismatch::check("dot", self.len() == rhs.len(), self.dims(), rhs.dims())?;

        let mut acc = T::zero();
        for (&a, &b) in zip_eq(&self.data, &rhs.data) {
            check.check(a, b)?;
            acc = acc.native_add(a.native_mul(b));
        }
        Ok(acc)
    }

    pub fn inner(&self, rhs: &Self) -> Result<T, ArithError<T>>
    { self.inner_with(rhs, RangeCheck::default()) }

    /// Row vector times column vector.
    pub fn inner_with(&self, rhs: &Self, check: RangeCheck) -> Result<T, ArithError<T>>
    {
        let ok = {
            self.orientation() == Orientation::Row
            && rhs.orientation() == Orientation::Column
            && self.len() == rhs.len()
        };
        ShapeMismatch::check("multiply", ok, self.dims(), rhs.dims())?;
        self.dot_with(rhs, check)
    }

    pub fn vecmat(&self, rhs: &ToyMatrix<T>) -> Result<Self, ArithError<T>>
    { self.vecmat_with(rhs, RangeCheck::default()) }

    /// Row vector times matrix, giving a row vector.
    pub fn vecmat_with(&self, rhs: &ToyMatrix<T>, check: RangeCheck) -> Result<Self, ArithError<T>>
    {
        ShapeMismatch::check("multiply", self.dims() == (1, rhs.num_rows()), self.dims(), rhs.dims())?;

        let mut out = ToyVector::<T>::new(rhs.num_cols());
        out.transpose();
        for col in 0..rhs.num_cols() {
            for k in 0..rhs.num_rows() {
                let (a, b) = (self.data[k], rhs[(k, col)]);
                if let Err(e) = check.check(a, b) {
                    debug!("Aborted vector-matrix product with {:?} at column {}: {}", rhs.dims(), col, e);
                    return Err(e.into());
                }
                out.data[col] = out.data[col].native_add(a.native_mul(b));
            }
        }
        Ok(out)
    }

    pub fn scale(&mut self, factor: T) -> Result<(), ValueRangeExceeded<T>>
    { self.scale_with(factor, RangeCheck::default()) }

    /// Multiply every element by `factor`.
    ///
    /// Every product is checked before any element is written.
    pub fn scale_with(&mut self, factor: T, check: RangeCheck) -> Result<(), ValueRangeExceeded<T>>
    {
        if check.is_enabled() {
            for &x in &self.data {
                check.check(x, factor)?;
            }
        }
        for x in &mut self.data {
            *x = x.native_mul(factor);
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for ToyVector<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    {
        assert_eq!(self.dims(), other.dims(), "cannot compare vectors of different shape");
        self.as_slice().check_close(other.as_slice(), tol)
    }
}
