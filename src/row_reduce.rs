//! Gauss-Jordan elimination that records every elementary row operation it applies.
//!
//! The pivot search walks a row pointer and a column pointer from the top-left corner:
//! - a nonzero pivot is scaled to one and cleared from every other row, top to bottom,
//!   after which both pointers advance;
//! - a zero pivot is replaced by the first nonzero entry below it through a row swap;
//! - a column without any nonzero entry at or below the row pointer is skipped.
//!
//! The resulting [Trace] can be rendered as a LaTeX derivation:
//!
//! ```
//! use rref_latex::{rings::rational::Q, tensors::matrix::Matrix};
//!
//! let m = Matrix::from_nested_vec(vec![vec![0.into(), 1.into()], vec![1.into(), 0.into()]], Q)
//!     .unwrap();
//! let reduction = m.row_reduce_traced(0).unwrap();
//! assert_eq!(reduction.trace.operations().count(), 1);
//! assert!(reduction.trace.to_latex().contains("R_{2} \\leftrightarrow R_{1}"));
//! ```

use std::fmt::Display;

use tracing::{debug, instrument};

use crate::{
    printer::{MatrixPrinter, OperationPrinter, TracePrinter},
    rings::Field,
    tensors::matrix::{Matrix, MatrixError},
};

/// An elementary row operation. Rows are indexed from zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowOperation<F: Field> {
    /// `factor R_row -> R_row`
    Scale { row: u32, factor: F::Element },
    /// `R_target + factor R_source -> R_target`
    Combine {
        target: u32,
        source: u32,
        factor: F::Element,
    },
    /// `R_first <-> R_second`
    Swap { first: u32, second: u32 },
}

impl<F: Field> RowOperation<F> {
    /// The row that is overwritten, if the operation has a single one.
    pub fn target_row(&self) -> Option<u32> {
        match self {
            RowOperation::Scale { row, .. } => Some(*row),
            RowOperation::Combine { target, .. } => Some(*target),
            RowOperation::Swap { .. } => None,
        }
    }

    /// Apply the operation to `matrix` in place.
    pub fn apply(&self, matrix: &mut Matrix<F>) {
        match self {
            RowOperation::Scale { row, factor } => matrix.scale_row(*row, factor),
            RowOperation::Combine {
                target,
                source,
                factor,
            } => matrix.add_scaled_row(*target, *source, factor),
            RowOperation::Swap { first, second } => matrix.swap_rows(*first, *second),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent<F: Field> {
    Snapshot(Matrix<F>),
    Operation(RowOperation<F>),
}

/// The derivation of a reduced row echelon form.
///
/// Snapshots and operations alternate: every operation is preceded by the
/// matrix it was applied to, and the last event is the reduced matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace<F: Field> {
    field: F,
    augmented_columns: u32,
    events: Vec<TraceEvent<F>>,
}

impl<F: Field> Trace<F> {
    fn new(field: F, augmented_columns: u32) -> Trace<F> {
        Trace {
            field,
            augmented_columns,
            events: vec![],
        }
    }

    fn record(&mut self, matrix: &Matrix<F>, operation: Option<&RowOperation<F>>) {
        self.events.push(TraceEvent::Snapshot(matrix.clone()));
        if let Some(op) = operation {
            self.events.push(TraceEvent::Operation(op.clone()));
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// The number of trailing columns printed right of the separator.
    pub fn augmented_columns(&self) -> u32 {
        self.augmented_columns
    }

    pub fn events(&self) -> &[TraceEvent<F>] {
        &self.events
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Matrix<F>> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Snapshot(m) => Some(m),
            TraceEvent::Operation(_) => None,
        })
    }

    pub fn operations(&self) -> impl Iterator<Item = &RowOperation<F>> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Snapshot(_) => None,
            TraceEvent::Operation(op) => Some(op),
        })
    }

    /// Render the derivation as a LaTeX `align*` environment.
    pub fn to_latex(&self) -> String {
        TracePrinter::new(self).to_string()
    }
}

impl<F: Field> Display for Trace<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TracePrinter::new(self).fmt(f)
    }
}

/// A matrix in reduced row echelon form together with its derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction<F: Field> {
    pub matrix: Matrix<F>,
    pub trace: Trace<F>,
}

impl<F: Field> Reduction<F> {
    /// The number of pivots, including pivots in augmented columns.
    pub fn rank(&self) -> usize {
        self.matrix.pivot_columns().len()
    }

    /// Read off the solution of the linear system whose right-hand sides are the
    /// augmented columns. The result has one row per unknown and one column per
    /// right-hand side.
    pub fn solution(&self) -> Result<Matrix<F>, MatrixError> {
        let aug = self.trace.augmented_columns;
        if aug == 0 {
            return Err(MatrixError::NotAugmented);
        }

        let nvars = self.matrix.shape.1 - aug;
        if nvars == 0 {
            return Err(MatrixError::NoUnknowns);
        }

        let pivots = self.matrix.pivot_columns();

        // a pivot in the augmented block is an equation 0 = 1
        if pivots.iter().any(|&c| c >= nvars) {
            return Err(MatrixError::Inconsistent);
        }

        if pivots.len() < nvars as usize {
            return Err(MatrixError::Underdetermined {
                rank: pivots.len() as u32,
                free_columns: (0..nvars).filter(|c| !pivots.contains(c)).collect(),
            });
        }

        let mut m = Matrix::new(nvars, aug, self.matrix.field);
        for i in 0..nvars {
            for j in 0..aug {
                m[(i, j)] = self.matrix[(i, nvars + j)].clone();
            }
        }

        Ok(m)
    }
}

impl<F: Field> Matrix<F> {
    /// Bring the matrix into reduced row echelon form. `step` sees the matrix
    /// before every row operation, and once more when the reduction is done.
    fn gauss_jordan(&mut self, mut step: impl FnMut(&Matrix<F>, Option<&RowOperation<F>>)) {
        let (nrows, ncols) = self.shape;
        let (mut row, mut col) = (0, 0);

        while row < nrows && col < ncols {
            if F::is_zero(&self[(row, col)]) {
                match (row + 1..nrows).find(|&r| !F::is_zero(&self[(r, col)])) {
                    Some(r) => self.apply_step(
                        RowOperation::Swap {
                            first: r,
                            second: row,
                        },
                        &mut step,
                    ),
                    None => col += 1,
                }
                continue;
            }

            if !self.field.is_one(&self[(row, col)]) {
                let factor = match self.field.inv(&self[(row, col)]) {
                    Ok(inv) => inv,
                    Err(e) => unreachable!("Pivot {} has no inverse: {}", self[(row, col)], e),
                };
                self.apply_step(RowOperation::Scale { row, factor }, &mut step);
            }

            for r in 0..nrows {
                if r != row && !F::is_zero(&self[(r, col)]) {
                    let factor = self.field.neg(&self[(r, col)]);
                    self.apply_step(
                        RowOperation::Combine {
                            target: r,
                            source: row,
                            factor,
                        },
                        &mut step,
                    );
                }
            }

            row += 1;
            col += 1;
        }

        step(self, None);
    }

    fn apply_step(
        &mut self,
        op: RowOperation<F>,
        step: &mut impl FnMut(&Matrix<F>, Option<&RowOperation<F>>),
    ) {
        debug!("{}", OperationPrinter::new(&self.field, &op));
        step(self, Some(&op));
        op.apply(self);
    }

    /// Row-reduce the matrix and record every step. The last `augmented_columns`
    /// columns are only set apart when the derivation is printed.
    #[instrument(level = "debug", skip(self))]
    pub fn row_reduce_traced(mut self, augmented_columns: u32) -> Result<Reduction<F>, MatrixError> {
        if augmented_columns > self.shape.1 {
            return Err(MatrixError::AugmentationOutOfRange {
                augmented_columns,
                ncols: self.shape.1,
            });
        }

        debug!(
            "Reducing {}",
            MatrixPrinter::new(&self).with_augmented_columns(augmented_columns)
        );

        let mut trace = Trace::new(self.field, augmented_columns);
        self.gauss_jordan(|m, op| trace.record(m, op));

        debug!(
            "Reduced to {} with {} operations",
            MatrixPrinter::new(&self).with_augmented_columns(augmented_columns),
            trace.operations().count()
        );

        Ok(Reduction {
            matrix: self,
            trace,
        })
    }

    /// Row-reduce the matrix in-place and return the rank.
    pub fn row_reduce(&mut self) -> usize {
        self.gauss_jordan(|_, _| {});
        self.pivot_columns().len()
    }

    /// Get the rank of the matrix.
    pub fn rank(&self) -> usize {
        self.clone().row_reduce()
    }
}
