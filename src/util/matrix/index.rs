/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

/// Offset of element `(row, col)` of a possibly-transposed matrix in its buffer.
///
/// `rows` and `cols` are the extents as currently recorded for the matrix,
/// i.e. *after* any transposition has swapped them. The buffer itself is
/// always row-major in the untransposed orientation, so a transposed matrix
/// is read in column-major order.
///
/// The flag selects one of the two terms arithmetically; the other one is
/// multiplied by zero. There is no branch on `transposed`.
///
/// `row < rows` and `col < cols` are only checked in debug builds.
#[inline(always)]
pub fn index(row: usize, col: usize, rows: usize, cols: usize, transposed: bool) -> usize
{
    debug_assert!(
        row < rows && col < cols,
        "index ({}, {}) out of bounds for {}x{} matrix", row, col, rows, cols,
    );
    let t = transposed as usize;
    (1 - t) * (row * cols + col) + t * (col * rows + row)
}

/// The logical extents of a matrix, and whether it is stored transposed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    transposed: bool,
}

impl Shape {
    /// An untransposed shape.
    pub fn new((rows, cols): (usize, usize)) -> Self
    { Shape { rows, cols, transposed: false } }

    pub fn num_rows(&self) -> usize { self.rows }
    pub fn num_cols(&self) -> usize { self.cols }
    pub fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }
    pub fn is_transposed(&self) -> bool { self.transposed }
    pub fn len(&self) -> usize { self.rows * self.cols }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Extents of the buffer's row-major layout. These never change on transpose.
    pub fn physical_dims(&self) -> (usize, usize)
    {
        match self.transposed {
            false => (self.rows, self.cols),
            true => (self.cols, self.rows),
        }
    }

    /// Swap the logical extents and flip the flag. Returns the new flag.
    pub fn transpose(&mut self) -> bool
    {
        ::std::mem::swap(&mut self.rows, &mut self.cols);
        self.transposed = !self.transposed;
        self.transposed
    }

    pub fn transposed(mut self) -> Self
    { self.transpose(); self }

    #[inline(always)]
    pub fn offset(&self, row: usize, col: usize) -> usize
    { index(row, col, self.rows, self.cols, self.transposed) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use ::rand::Rng;

    #[test]
    fn untransposed_is_row_major() {
        assert_eq!(index(0, 0, 2, 3, false), 0);
        assert_eq!(index(0, 2, 2, 3, false), 2);
        assert_eq!(index(1, 0, 2, 3, false), 3);
        assert_eq!(index(1, 2, 2, 3, false), 5);
    }

    #[test]
    fn transposed_is_column_major() {
        // a 2x3 buffer viewed as 3x2
        assert_eq!(index(0, 0, 3, 2, true), 0);
        assert_eq!(index(0, 1, 3, 2, true), 3);
        assert_eq!(index(1, 0, 3, 2, true), 1);
        assert_eq!(index(2, 1, 3, 2, true), 5);
    }

    #[test]
    fn transposed_index_mirrors_untransposed() {
        for rows in 1..7 {
            for cols in 1..7 {
                for r in 0..rows {
                    for c in 0..cols {
                        assert_eq!(
                            index(r, c, rows, cols, false),
                            index(c, r, cols, rows, true),
                            "({}, {}) in {}x{}", r, c, rows, cols,
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn transposed_offsets_cover_buffer_once() {
        let shape = Shape::new((4, 7)).transposed();
        let mut seen = vec![false; shape.len()];
        for r in 0..shape.num_rows() {
            for c in 0..shape.num_cols() {
                let k = shape.offset(r, c);
                assert!(!seen[k], "offset {} hit twice", k);
                seen[k] = true;
            }
        }
        assert!(seen.iter().all(|&x| x));
    }

    #[test]
    fn random_transposes_round_trip() {
        let mut rng = ::rand::thread_rng();
        for _ in 0..1000 {
            let dims = (rng.gen_range(1, 40), rng.gen_range(1, 40));
            let (r, c) = (rng.gen_range(0, dims.0), rng.gen_range(0, dims.1));
            let shape = Shape::new(dims);

            // reading (c, r) through the transpose finds the same slot
            let flipped = shape.transposed();
            assert_eq!(flipped.dims(), (dims.1, dims.0));
            assert_eq!(flipped.offset(c, r), shape.offset(r, c));

            let mut back = flipped;
            for _ in 0..rng.gen_range(0, 4) * 2 {
                back.transpose();
            }
            assert_eq!(back.offset(c, r), flipped.offset(c, r));
            assert_eq!(back.transposed(), shape);
        }
    }

    #[test]
    fn shape_transpose() {
        let mut shape = Shape::new((2, 5));
        assert_eq!(shape.physical_dims(), (2, 5));

        assert!(shape.transpose());
        assert_eq!(shape.dims(), (5, 2));
        assert_eq!(shape.physical_dims(), (2, 5));
        assert_eq!(shape.len(), 10);

        assert!(!shape.transpose());
        assert_eq!(shape, Shape::new((2, 5)));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "out of bounds"))]
    fn col_past_the_end() {
        // lands on (1, 0) in release builds
        assert_eq!(Shape::new((2, 3)).offset(0, 3), 3);
    }
}
