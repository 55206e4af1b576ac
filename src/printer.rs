use std::fmt::{self, Display, Write};

use crate::{
    rings::{Field, Ring},
    row_reduce::{RowOperation, Trace, TraceEvent},
    tensors::matrix::Matrix,
};

/// The overall print mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PrintMode {
    #[default]
    Plain,
    Latex,
}

/// Options for printing numbers, matrices and derivations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub mode: PrintMode,
}

impl PrintOptions {
    /// Print `n/d` fractions and brace-delimited matrices.
    pub const fn plain() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Plain,
        }
    }

    /// Print the output in a LaTeX input format.
    pub const fn latex() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Latex,
        }
    }

    pub fn is_latex(&self) -> bool {
        self.mode == PrintMode::Latex
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::plain()
    }
}

/// The context an element is printed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PrintState {
    /// Always write a sign, `+` for non-negative values.
    pub in_sum: bool,
    /// Write a unit as its sign only.
    pub suppress_one: bool,
}

impl PrintState {
    pub const fn new() -> PrintState {
        PrintState {
            in_sum: false,
            suppress_one: false,
        }
    }

    /// The state of a coefficient multiplying a row, as in `R_{2} -\frac{1}{2} R_{1}`.
    pub const fn coefficient() -> PrintState {
        PrintState {
            in_sum: true,
            suppress_one: true,
        }
    }
}

/// A printer for a single ring element.
pub struct ElementPrinter<'a, R: Ring> {
    pub ring: &'a R,
    pub element: &'a R::Element,
    pub opts: PrintOptions,
    pub state: PrintState,
}

impl<'a, R: Ring> ElementPrinter<'a, R> {
    pub fn new(ring: &'a R, element: &'a R::Element) -> ElementPrinter<'a, R> {
        ElementPrinter {
            ring,
            element,
            opts: PrintOptions::default(),
            state: PrintState::new(),
        }
    }

    pub fn new_with_options(
        ring: &'a R,
        element: &'a R::Element,
        opts: PrintOptions,
        state: PrintState,
    ) -> ElementPrinter<'a, R> {
        ElementPrinter {
            ring,
            element,
            opts,
            state,
        }
    }
}

impl<'a, R: Ring> Display for ElementPrinter<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ring.format(self.element, &self.opts, self.state, f)
    }
}

/// A printer for a matrix, with an optional block of augmented columns on the right.
pub struct MatrixPrinter<'a, F: Field> {
    pub matrix: &'a Matrix<F>,
    pub opts: PrintOptions,
    pub augmented_columns: u32,
}

impl<'a, F: Field> MatrixPrinter<'a, F> {
    pub fn new(matrix: &'a Matrix<F>) -> MatrixPrinter<'a, F> {
        MatrixPrinter {
            matrix,
            opts: PrintOptions::default(),
            augmented_columns: 0,
        }
    }

    pub fn new_with_options(matrix: &'a Matrix<F>, opts: PrintOptions) -> MatrixPrinter<'a, F> {
        MatrixPrinter {
            matrix,
            opts,
            augmented_columns: 0,
        }
    }

    pub fn with_augmented_columns(mut self, augmented_columns: u32) -> Self {
        self.augmented_columns = augmented_columns;
        self
    }

    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (_, ncols) = self.matrix.shape;
        let aug = self.augmented_columns.min(ncols);

        f.write_str("\\left[\\begin{array}{@{}")?;
        for _ in 0..ncols - aug {
            f.write_char('c')?;
        }
        if aug > 0 {
            f.write_char('|')?;
            for _ in 0..aug {
                f.write_char('r')?;
            }
        }
        f.write_str("@{}}\n")?;

        for row in self.matrix.row_iter() {
            for (i, e) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" & ")?;
                }
                self.matrix
                    .field
                    .format(e, &self.opts, PrintState::new(), f)?;
            }
            f.write_str("\\\\\n")?;
        }

        f.write_str("\\end{array}\\right]\n")
    }

    fn fmt_plain(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (nrows, ncols) = self.matrix.shape;
        let first_augmented = ncols - self.augmented_columns.min(ncols);

        f.write_char('{')?;
        for (ri, r) in self.matrix.row_iter().enumerate() {
            f.write_char('{')?;
            for (ci, c) in r.iter().enumerate() {
                if ci > 0 {
                    f.write_char(if ci as u32 == first_augmented { '|' } else { ',' })?;
                }
                self.matrix
                    .field
                    .format(c, &self.opts, PrintState::new(), f)?;
            }
            f.write_char('}')?;
            if ri + 1 < nrows as usize {
                f.write_char(',')?;
            }
        }
        f.write_char('}')
    }
}

impl<'a, F: Field> Display for MatrixPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.opts.mode {
            PrintMode::Latex => self.fmt_latex(f),
            PrintMode::Plain => self.fmt_plain(f),
        }
    }
}

/// A printer for a single elementary row operation.
///
/// In LaTeX mode this is the label written over the arrow between two steps.
/// Rows are numbered from one.
pub struct OperationPrinter<'a, F: Field> {
    pub field: &'a F,
    pub operation: &'a RowOperation<F>,
    pub opts: PrintOptions,
}

impl<'a, F: Field> OperationPrinter<'a, F> {
    pub fn new(field: &'a F, operation: &'a RowOperation<F>) -> OperationPrinter<'a, F> {
        OperationPrinter {
            field,
            operation,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(
        field: &'a F,
        operation: &'a RowOperation<F>,
        opts: PrintOptions,
    ) -> OperationPrinter<'a, F> {
        OperationPrinter {
            field,
            operation,
            opts,
        }
    }

    fn fmt_row(&self, row: u32, f: &mut fmt::Formatter) -> fmt::Result {
        match self.opts.mode {
            PrintMode::Latex => write!(f, "R_{{{}}}", row + 1),
            PrintMode::Plain => write!(f, "R{}", row + 1),
        }
    }
}

impl<'a, F: Field> Display for OperationPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.operation {
            RowOperation::Scale { row, factor } => {
                self.field.format(factor, &self.opts, PrintState::new(), f)?;
                f.write_char(' ')?;
                self.fmt_row(*row, f)?;
            }
            RowOperation::Combine {
                target,
                source,
                factor,
            } => {
                self.fmt_row(*target, f)?;
                f.write_char(' ')?;
                self.field
                    .format(factor, &self.opts, PrintState::coefficient(), f)?;
                f.write_char(' ')?;
                self.fmt_row(*source, f)?;
            }
            RowOperation::Swap { first, second } => {
                self.fmt_row(*first, f)?;
                f.write_str(if self.opts.is_latex() {
                    " \\leftrightarrow "
                } else {
                    " <-> "
                })?;
                self.fmt_row(*second, f)?;
            }
        }

        if !self.opts.is_latex() {
            if let Some(row) = self.operation.target_row() {
                f.write_str(" -> ")?;
                self.fmt_row(row, f)?;
            }
        }

        Ok(())
    }
}

/// A printer for a full derivation as a LaTeX `align*` environment.
pub struct TracePrinter<'a, F: Field> {
    pub trace: &'a Trace<F>,
}

impl<'a, F: Field> TracePrinter<'a, F> {
    pub fn new(trace: &'a Trace<F>) -> TracePrinter<'a, F> {
        TracePrinter { trace }
    }
}

impl<'a, F: Field> Display for TracePrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\\begin{align*}\n")?;

        for event in self.trace.events() {
            match event {
                TraceEvent::Snapshot(m) => {
                    f.write_char('&')?;
                    MatrixPrinter::new_with_options(m, PrintOptions::latex())
                        .with_augmented_columns(self.trace.augmented_columns())
                        .fmt(f)?;
                }
                TraceEvent::Operation(op) => {
                    f.write_str("\\\\\n\\overset{")?;
                    OperationPrinter::new_with_options(self.trace.field(), op, PrintOptions::latex())
                        .fmt(f)?;
                    f.write_str("}{\\longrightarrow}\n")?;
                }
            }
        }

        f.write_str("\\end{align*}")
    }
}

#[cfg(test)]
mod test {
    use crate::{
        rings::rational::{Rational, RationalField, Q},
        row_reduce::RowOperation,
        tensors::matrix::Matrix,
    };

    use super::{ElementPrinter, MatrixPrinter, OperationPrinter, PrintOptions, PrintState};

    fn latex(r: Rational) -> String {
        ElementPrinter::new_with_options(&Q, &r, PrintOptions::latex(), PrintState::new())
            .to_string()
    }

    fn coefficient(r: Rational) -> String {
        ElementPrinter::new_with_options(&Q, &r, PrintOptions::latex(), PrintState::coefficient())
            .to_string()
    }

    #[test]
    fn rational_latex() {
        assert_eq!(latex(3.into()), "3");
        assert_eq!(latex((-4).into()), "-4");
        assert_eq!(latex(0.into()), "0");
        assert_eq!(latex((1, 3).into()), "\\frac{1}{3}");
        assert_eq!(latex((-2, 5).into()), "-\\frac{2}{5}");
        assert_eq!(latex((6, -4).into()), "-\\frac{3}{2}");
    }

    #[test]
    fn coefficient_latex() {
        assert_eq!(coefficient(1.into()), "+");
        assert_eq!(coefficient((-1).into()), "-");
        assert_eq!(coefficient(2.into()), "+2");
        assert_eq!(coefficient((-3).into()), "-3");
        assert_eq!(coefficient((1, 2).into()), "+\\frac{1}{2}");
        assert_eq!(coefficient((-1, 2).into()), "-\\frac{1}{2}");
    }

    #[test]
    fn matrix_latex() {
        let m = Matrix::from_nested_vec(
            vec![
                vec![1.into(), 2.into(), 5.into()],
                vec![3.into(), (1, 3).into(), (-6).into()],
            ],
            Q,
        )
        .unwrap();

        assert_eq!(
            MatrixPrinter::new_with_options(&m, PrintOptions::latex()).to_string(),
            "\\left[\\begin{array}{@{}ccc@{}}\n\
             1 & 2 & 5\\\\\n\
             3 & \\frac{1}{3} & -6\\\\\n\
             \\end{array}\\right]\n"
        );

        assert_eq!(
            MatrixPrinter::new_with_options(&m, PrintOptions::latex())
                .with_augmented_columns(1)
                .to_string(),
            "\\left[\\begin{array}{@{}cc|r@{}}\n\
             1 & 2 & 5\\\\\n\
             3 & \\frac{1}{3} & -6\\\\\n\
             \\end{array}\\right]\n"
        );

        assert!(MatrixPrinter::new_with_options(&m, PrintOptions::latex())
            .with_augmented_columns(3)
            .to_string()
            .starts_with("\\left[\\begin{array}{@{}|rrr@{}}\n"));

        assert_eq!(
            MatrixPrinter::new(&m).with_augmented_columns(1).to_string(),
            "{{1,2|5},{3,1/3|-6}}"
        );
    }

    #[test]
    fn operation_labels() {
        let scale = RowOperation::Scale {
            row: 0,
            factor: (1, 2).into(),
        };
        let combine = RowOperation::Combine {
            target: 1,
            source: 0,
            factor: (-1).into(),
        };
        let combine_frac = RowOperation::Combine {
            target: 0,
            source: 2,
            factor: (2, 3).into(),
        };
        let swap = RowOperation::<RationalField>::Swap {
            first: 1,
            second: 0,
        };

        let l = |op: &RowOperation<RationalField>| {
            OperationPrinter::new_with_options(&Q, op, PrintOptions::latex()).to_string()
        };
        assert_eq!(l(&scale), "\\frac{1}{2} R_{1}");
        assert_eq!(l(&combine), "R_{2} - R_{1}");
        assert_eq!(l(&combine_frac), "R_{1} +\\frac{2}{3} R_{3}");
        assert_eq!(l(&swap), "R_{2} \\leftrightarrow R_{1}");

        assert_eq!(OperationPrinter::new(&Q, &scale).to_string(), "1/2 R1 -> R1");
        assert_eq!(OperationPrinter::new(&Q, &combine).to_string(), "R2 - R1 -> R2");
        assert_eq!(OperationPrinter::new(&Q, &swap).to_string(), "R2 <-> R1");
    }
}
