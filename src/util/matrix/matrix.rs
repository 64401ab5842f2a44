/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{ArithError, ShapeMismatch, Scalar, Shape, ToyVector};
use ::std::ops::{Index, IndexMut};
use ::toyla_range_check::RangeCheck;
use ::toyla_assert_close::{CheckClose, CheckCloseError, Tolerances};

/// Owned dense matrix with lazy transposition.
///
/// `transpose` only swaps the recorded extents and flips a flag; the buffer
/// keeps its original row-major layout, and every element access goes through
/// [`index`](fn.index.html).
#[derive(Debug)]
pub struct ToyMatrix<T = f64> {
    // row-major in the untransposed orientation.
    // invariant: data.len() == shape.len()
    data: Vec<T>,
    shape: Shape,
}

impl<T: Scalar> ToyMatrix<T> {
    /// A zero-filled, untransposed matrix.
    pub fn new(dims: (usize, usize)) -> Self
    { ToyMatrix { data: vec![T::zero(); dims.0 * dims.1], shape: Shape::new(dims) } }
}

impl<T> ToyMatrix<T> {
    pub fn from_row_major_data((rows, cols): (usize, usize), data: Vec<T>) -> Self
    {
        assert_eq!(data.len(), rows * cols, "data does not fit a {}x{} matrix", rows, cols);
        ToyMatrix { data, shape: Shape::new((rows, cols)) }
    }

    pub fn shape(&self) -> Shape { self.shape }
    pub fn dims(&self) -> (usize, usize) { self.shape.dims() }
    pub fn num_rows(&self) -> usize { self.shape.num_rows() }
    pub fn num_cols(&self) -> usize { self.shape.num_cols() }
    pub fn is_square(&self) -> bool { self.num_rows() == self.num_cols() }
    pub fn is_transposed(&self) -> bool { self.shape.is_transposed() }

    /// Transpose in O(1). Returns whether the matrix is now transposed.
    pub fn transpose(&mut self) -> bool
    { self.shape.transpose() }

    /// The buffer, in the row-major order of the untransposed matrix.
    pub fn physical_data(&self) -> &[T] { &self.data }
}

impl<T: Copy> ToyMatrix<T> {
    /// Elements in row-major order of the matrix as it currently reads.
    pub fn to_row_major_vec(&self) -> Vec<T>
    {
        let mut out = Vec::with_capacity(self.data.len());
        for r in 0..self.num_rows() {
            for c in 0..self.num_cols() {
                out.push(self[(r, c)]);
            }
        }
        out
    }
}

impl<T: Scalar> Default for ToyMatrix<T> {
    fn default() -> Self { ToyMatrix::new((4, 4)) }
}

impl<T: Clone> Clone for ToyMatrix<T> {
    fn clone(&self) -> Self
    { ToyMatrix { data: self.data.clone(), shape: self.shape } }

    /// Assignment. The existing buffer is reused when it has room for the source.
    fn clone_from(&mut self, source: &Self)
    {
        if self.data.capacity() < source.data.len() {
            trace!("Reallocating matrix buffer for {:?} -> {:?}", self.dims(), source.dims());
        }
        self.data.clone_from(&source.data);
        self.shape = source.shape;
    }
}

/// Equal dimensions and elements, regardless of how each side is stored.
impl<T: Copy + PartialEq> PartialEq for ToyMatrix<T> {
    fn eq(&self, other: &Self) -> bool
    {
        if self.dims() != other.dims() {
            return false;
        }
        match self.shape == other.shape {
            true => self.data == other.data,
            false => self.to_row_major_vec() == other.to_row_major_vec(),
        }
    }
}

impl<T> Index<(usize, usize)> for ToyMatrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (r, c): (usize, usize)) -> &T
    { &self.data[self.shape.offset(r, c)] }
}

impl<T> IndexMut<(usize, usize)> for ToyMatrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T
    { &mut self.data[self.shape.offset(r, c)] }
}

// ---------------------------------------------------------------------------
// elementwise

impl<T: Scalar> ToyMatrix<T> {
    pub fn add(&self, rhs: &Self) -> Result<Self, ShapeMismatch>
    { self.zip_new("add", rhs, T::native_add) }

    pub fn sub(&self, rhs: &Self) -> Result<Self, ShapeMismatch>
    { self.zip_new("subtract", rhs, T::native_sub) }

    pub fn add_assign(&mut self, rhs: &Self) -> Result<(), ShapeMismatch>
    { self.zip_in_place("add", rhs, T::native_add) }

    pub fn sub_assign(&mut self, rhs: &Self) -> Result<(), ShapeMismatch>
    { self.zip_in_place("subtract", rhs, T::native_sub) }

    fn zip_new(&self, op: &'static str, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self, ShapeMismatch>
    {
        ShapeMismatch::check(op, self.dims() == rhs.dims(), self.dims(), rhs.dims())?;

        let mut out = ToyMatrix::new(self.dims());
        for r in 0..self.num_rows() {
            for c in 0..self.num_cols() {
                out[(r, c)] = f(self[(r, c)], rhs[(r, c)]);
            }
        }
        Ok(out)
    }

    fn zip_in_place(&mut self, op: &'static str, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<(), ShapeMismatch>
    {
        ShapeMismatch::check(op, self.dims() == rhs.dims(), self.dims(), rhs.dims())?;

        for r in 0..self.num_rows() {
            for c in 0..self.num_cols() {
                self[(r, c)] = f(self[(r, c)], rhs[(r, c)]);
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// products

impl<T: Scalar> ToyMatrix<T> {
    /// `self * rhs`, range-checked according to `RangeCheck::default()`.
    pub fn matmul(&self, rhs: &Self) -> Result<Self, ArithError<T>>
    { self.matmul_with(rhs, RangeCheck::default()) }

    /// `self * rhs`.
    ///
    /// With the check enabled, the first product that would overflow aborts
    /// the whole multiplication.
    pub fn matmul_with(&self, rhs: &Self, check: RangeCheck) -> Result<Self, ArithError<T>>
    {
        ShapeMismatch::check("multiply", self.num_cols() == rhs.num_rows(), self.dims(), rhs.dims())?;

        let mut out = ToyMatrix::<T>::new((self.num_rows(), rhs.num_cols()));
        for row in 0..out.num_rows() {
            for col in 0..out.num_cols() {
                for k in 0..self.num_cols() {
                    let (a, b) = (self[(row, k)], rhs[(k, col)]);
                    if let Err(e) = check.check(a, b) {
                        debug!("Aborted {:?} x {:?} product at ({}, {}): {}", self.dims(), rhs.dims(), row, col, e);
                        return Err(e.into());
                    }
                    out[(row, col)] = out[(row, col)].native_add(a.native_mul(b));
                }
            }
        }
        Ok(out)
    }

    pub fn matmul_assign(&mut self, rhs: &Self) -> Result<(), ArithError<T>>
    { self.matmul_assign_with(rhs, RangeCheck::default()) }

    /// `self = self * rhs`. The result is not transposed.
    ///
    /// On failure, `self` is left exactly as it was.
    pub fn matmul_assign_with(&mut self, rhs: &Self, check: RangeCheck) -> Result<(), ArithError<T>>
    {
        *self = self.matmul_with(rhs, check)?;
        Ok(())
    }

    pub fn mul_vector(&self, rhs: &ToyVector<T>) -> Result<ToyVector<T>, ArithError<T>>
    { self.mul_vector_with(rhs, RangeCheck::default()) }

    /// `self * rhs` for a column vector `rhs`.
    pub fn mul_vector_with(&self, rhs: &ToyVector<T>, check: RangeCheck) -> Result<ToyVector<T>, ArithError<T>>
    {
        ShapeMismatch::check("multiply", rhs.dims() == (self.num_cols(), 1), self.dims(), rhs.dims())?;

        let mut out = ToyVector::<T>::new(self.num_rows());
        for row in 0..self.num_rows() {
            for k in 0..self.num_cols() {
                let (a, b) = (self[(row, k)], rhs[k]);
                if let Err(e) = check.check(a, b) {
                    debug!("Aborted {:?} matrix-vector product at row {}: {}", self.dims(), row, e);
                    return Err(e.into());
                }
                out[row] = out[row].native_add(a.native_mul(b));
            }
        }
        Ok(out)
    }
}

impl<T: CheckClose> CheckClose for ToyMatrix<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    {
        assert_eq!(self.dims(), other.dims(), "cannot compare matrices of different shape");
        for r in 0..self.num_rows() {
            for c in 0..self.num_cols() {
                self[(r, c)].check_close(&other[(r, c)], tol).map_err(|e| e.at(c).at(r))?;
            }
        }
        Ok(())
    }
}
