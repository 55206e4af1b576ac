use std::{
    fmt::Display,
    ops::{Index, IndexMut},
    slice::Chunks,
};

use smallvec::SmallVec;

use crate::{printer::MatrixPrinter, rings::Field};

/// A matrix with entries that are elements of a field `F`, stored row-major.
///
/// The shape is fixed at construction: the elementary row operations only
/// ever rearrange or recombine entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<F: Field> {
    pub(crate) shape: (u32, u32),
    pub(crate) data: SmallVec<[F::Element; 25]>,
    pub(crate) field: F,
}

/// Errors that can occur when building or solving with a matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    Empty,
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    DataLengthMismatch {
        len: usize,
        nrows: u32,
        ncols: u32,
    },
    AugmentationOutOfRange {
        augmented_columns: u32,
        ncols: u32,
    },
    NotAugmented,
    NoUnknowns,
    Inconsistent,
    Underdetermined {
        rank: u32,
        free_columns: Vec<u32>,
    },
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::Empty => write!(f, "The matrix needs at least one row and one column"),
            MatrixError::NotRectangular {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} entries instead of {}",
                row + 1,
                found,
                expected
            ),
            MatrixError::DataLengthMismatch { len, nrows, ncols } => write!(
                f,
                "Data length does not match matrix dimensions: {} vs ({},{})",
                len, nrows, ncols
            ),
            MatrixError::AugmentationOutOfRange {
                augmented_columns,
                ncols,
            } => write!(
                f,
                "Cannot augment {} columns of a matrix with {} columns",
                augmented_columns, ncols
            ),
            MatrixError::NotAugmented => write!(f, "The matrix has no augmented columns"),
            MatrixError::NoUnknowns => {
                write!(f, "Every column is augmented, so there are no unknowns to solve for")
            }
            MatrixError::Inconsistent => write!(f, "The system is inconsistent"),
            MatrixError::Underdetermined { rank, free_columns } => {
                write!(f, "The system is underdetermined with rank {}", rank)?;
                if !free_columns.is_empty() {
                    write!(f, "; free columns:")?;
                    for c in free_columns {
                        write!(f, " {}", c + 1)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for MatrixError {}

impl<F: Field> Matrix<F> {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    /// Panics when either dimension is zero.
    pub fn new(nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        assert!(
            nrows > 0 && ncols > 0,
            "Cannot create a matrix of shape ({},{})",
            nrows,
            ncols
        );

        Matrix {
            shape: (nrows, ncols),
            data: (0..nrows as usize * ncols as usize)
                .map(|_| field.zero())
                .collect(),
            field,
        }
    }

    /// Convert a linear representation of a matrix to a `Matrix`.
    pub fn from_linear(
        data: Vec<F::Element>,
        nrows: u32,
        ncols: u32,
        field: F,
    ) -> Result<Matrix<F>, MatrixError> {
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::Empty);
        }

        if data.len() != nrows as usize * ncols as usize {
            return Err(MatrixError::DataLengthMismatch {
                len: data.len(),
                nrows,
                ncols,
            });
        }

        Ok(Matrix {
            shape: (nrows, ncols),
            data: SmallVec::from_vec(data),
            field,
        })
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec(matrix: Vec<Vec<F::Element>>, field: F) -> Result<Matrix<F>, MatrixError> {
        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);
        if cols == 0 {
            return Err(MatrixError::Empty);
        }

        let nrows = matrix.len() as u32;
        let mut data = SmallVec::with_capacity(matrix.len() * cols);
        for (row, d) in matrix.into_iter().enumerate() {
            if d.len() != cols {
                return Err(MatrixError::NotRectangular {
                    row,
                    expected: cols,
                    found: d.len(),
                });
            }

            data.extend(d);
        }

        Ok(Matrix {
            shape: (nrows, cols as u32),
            data,
            field,
        })
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.shape.0 as usize
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> usize {
        self.shape.1 as usize
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, F::Element> {
        self.data.chunks(self.shape.1 as usize)
    }

    /// Get the `i`th row of the matrix.
    pub fn row(&self, i: u32) -> &[F::Element] {
        let c = self.shape.1 as usize;
        &self.data[i as usize * c..(i as usize + 1) * c]
    }

    /// Swap rows `m` and `n`: `R_m <-> R_n`.
    pub fn swap_rows(&mut self, m: u32, n: u32) {
        assert_ne!(m, n, "Cannot swap row {} with itself", m);

        let c = self.shape.1 as usize;
        for l in 0..c {
            self.data.swap(m as usize * c + l, n as usize * c + l);
        }
    }

    /// Multiply every entry of row `m` by `k`: `k R_m -> R_m`.
    pub fn scale_row(&mut self, m: u32, k: &F::Element) {
        assert!(!F::is_zero(k), "Cannot scale row {} by zero", m);

        let c = self.shape.1 as usize;
        for e in &mut self.data[m as usize * c..(m as usize + 1) * c] {
            self.field.mul_assign(e, k);
        }
    }

    /// Add `k` times row `n` to row `m`: `R_m + k R_n -> R_m`.
    pub fn add_scaled_row(&mut self, m: u32, n: u32, k: &F::Element) {
        assert_ne!(m, n, "Cannot add a multiple of row {} to itself", m);
        assert!(!F::is_zero(k), "Cannot add a zero multiple of row {}", n);

        let c = self.shape.1 as usize;
        for l in 0..c {
            let e = self.field.mul(&self.data[n as usize * c + l], k);
            self.field.add_assign(&mut self.data[m as usize * c + l], &e);
        }
    }

    /// Return the column of the leading entry of every nonzero row.
    pub fn pivot_columns(&self) -> Vec<u32> {
        self.row_iter()
            .filter_map(|r| r.iter().position(|e| !F::is_zero(e)))
            .map(|c| c as u32)
            .collect()
    }

    /// Return true iff the matrix is in reduced row echelon form.
    pub fn is_row_reduced(&self) -> bool {
        let mut last_pivot = None;
        let mut seen_zero_row = false;

        for (i, r) in self.row_iter().enumerate() {
            let Some(j) = r.iter().position(|e| !F::is_zero(e)) else {
                seen_zero_row = true;
                continue;
            };

            if seen_zero_row || last_pivot.is_some_and(|p| j <= p) || !self.field.is_one(&r[j]) {
                return false;
            }

            if (0..self.shape.0)
                .filter(|&k| k as usize != i)
                .any(|k| !F::is_zero(&self[(k, j as u32)]))
            {
                return false;
            }

            last_pivot = Some(j);
        }

        true
    }
}

impl<F: Field> Index<(u32, u32)> for Matrix<F> {
    type Output = F::Element;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[(index.0 * self.shape.1 + index.1) as usize]
    }
}

impl<F: Field> IndexMut<(u32, u32)> for Matrix<F> {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut F::Element {
        &mut self.data[(index.0 * self.shape.1 + index.1) as usize]
    }
}

impl<F: Field> Display for Matrix<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

#[cfg(test)]
mod test {
    use crate::rings::rational::{Rational, RationalField, Q};

    use super::{Matrix, MatrixError};

    fn row(r: &[i64]) -> Vec<Rational> {
        r.iter().map(|&x| Rational::from(x)).collect()
    }

    fn m(rows: &[&[i64]]) -> Matrix<RationalField> {
        Matrix::from_nested_vec(rows.iter().map(|r| row(r)).collect(), Q).unwrap()
    }

    #[test]
    fn construction() {
        let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!((a.nrows(), a.ncols()), (2, 3));
        assert_eq!(a[(1, 2)], 6.into());
        assert_eq!(a.row(1), row(&[4, 5, 6]).as_slice());
        assert_eq!(a.to_string(), "{{1,2,3},{4,5,6}}");

        assert_eq!(
            Matrix::from_nested_vec(vec![vec![1.into(), 2.into()], vec![3.into()]], Q),
            Err(MatrixError::NotRectangular {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Matrix::<RationalField>::from_nested_vec(vec![], Q),
            Err(MatrixError::Empty)
        );
        assert_eq!(
            Matrix::from_linear(vec![1.into(), 2.into(), 3.into()], 2, 2, Q),
            Err(MatrixError::DataLengthMismatch {
                len: 3,
                nrows: 2,
                ncols: 2
            })
        );
        assert_eq!(Matrix::new(2, 2, Q).pivot_columns(), Vec::<u32>::new());
        assert_eq!(Matrix::new(1, 2, Q).to_string(), "{{0,0}}");
    }

    #[test]
    #[should_panic(expected = "Cannot create a matrix of shape (2,0)")]
    fn new_without_columns() {
        Matrix::new(2, 0, Q);
    }

    #[test]
    #[should_panic(expected = "Cannot create a matrix of shape (0,3)")]
    fn new_without_rows() {
        Matrix::new(0, 3, Q);
    }

    #[test]
    fn row_operations() {
        let mut a = m(&[&[1, 2], &[3, 4], &[5, 6]]);

        a.swap_rows(0, 2);
        assert_eq!(a, m(&[&[5, 6], &[3, 4], &[1, 2]]));

        a.scale_row(1, &(1, 2).into());
        assert_eq!(a.row(1), &[Rational::from((3, 2)), 2.into()]);

        a.add_scaled_row(0, 2, &(-5).into());
        assert_eq!(a.row(0), row(&[0, -4]).as_slice());
        assert_eq!(a.row(2), row(&[1, 2]).as_slice());
    }

    #[test]
    #[should_panic(expected = "Cannot swap row 1 with itself")]
    fn swap_with_itself() {
        m(&[&[1, 2], &[3, 4]]).swap_rows(1, 1);
    }

    #[test]
    #[should_panic(expected = "Cannot scale row 0 by zero")]
    fn scale_by_zero() {
        m(&[&[1, 2], &[3, 4]]).scale_row(0, &0.into());
    }

    #[test]
    #[should_panic(expected = "Cannot add a zero multiple")]
    fn add_zero_multiple() {
        m(&[&[1, 2], &[3, 4]]).add_scaled_row(0, 1, &0.into());
    }

    #[test]
    #[should_panic(expected = "to itself")]
    fn add_to_itself() {
        m(&[&[1, 2], &[3, 4]]).add_scaled_row(0, 0, &1.into());
    }

    #[test]
    fn echelon_predicates() {
        assert!(m(&[&[1, 0, 2], &[0, 1, 3]]).is_row_reduced());
        assert!(m(&[&[0, 1], &[0, 0]]).is_row_reduced());
        assert!(!m(&[&[1, 1], &[0, 1]]).is_row_reduced());
        assert!(!m(&[&[2, 0], &[0, 1]]).is_row_reduced());
        assert!(!m(&[&[0, 0], &[1, 0]]).is_row_reduced());
        assert!(!m(&[&[0, 1], &[1, 0]]).is_row_reduced());

        assert_eq!(m(&[&[0, 3, 1], &[0, 0, 0], &[1, 0, 0]]).pivot_columns(), vec![1, 0]);
    }
}
