//! The interactive front end: read a matrix from a line-based input, print its derivation.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::{
    parser::{
        parse_augmented_columns, parse_dimension, parse_row, parse_yes_no, InputError,
    },
    rings::rational::Q,
    tensors::matrix::Matrix,
};

/// Print `message` and read one line of the answer, without its line ending.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<String, InputError> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::UnexpectedEnd);
    }

    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Ask for the dimensions, the rows and the augmentation of a matrix,
/// then write the LaTeX derivation of its reduced row echelon form to `output`.
///
/// For an augmented matrix the solution of the linear system is printed after the derivation,
/// or the reason why there is no unique one.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<(), InputError> {
    writeln!(output, "Matrix RREF calculator")?;
    writeln!(output)?;

    let nrows = parse_dimension(&prompt(&mut input, &mut output, "Number of rows: ")?)?;
    let ncols = parse_dimension(&prompt(&mut input, &mut output, "Number of cols: ")?)?;

    writeln!(output)?;
    writeln!(
        output,
        "Enter the entries of each row separated by spaces. Fractions are written as a/b."
    )?;
    writeln!(output)?;

    let mut rows = Vec::with_capacity(nrows as usize);
    for i in 0..nrows as usize {
        let line = prompt(&mut input, &mut output, &format!("Enter row {}: ", i + 1))?;
        rows.push(parse_row(&line, ncols as usize, i)?);
    }

    let augmented = prompt(
        &mut input,
        &mut output,
        "Is your matrix an augmented matrix? [yn] ",
    )?;
    let augmented_columns = if parse_yes_no(&augmented) {
        let answer = prompt(
            &mut input,
            &mut output,
            "Enter number of augmented columns: ",
        )?;
        parse_augmented_columns(&answer, ncols)?
    } else {
        0
    };

    debug!(nrows, ncols, augmented_columns, "Read matrix");

    let reduction = Matrix::from_nested_vec(rows, Q)?.row_reduce_traced(augmented_columns)?;

    writeln!(output)?;
    writeln!(output, "==LATEX OUTPUT==")?;
    writeln!(output)?;
    writeln!(output, "{}", reduction.trace)?;

    if augmented_columns > 0 {
        writeln!(output)?;
        match reduction.solution() {
            Ok(s) => {
                writeln!(output, "Solution:")?;
                for (i, r) in s.row_iter().enumerate() {
                    write!(output, "  x{} =", i + 1)?;
                    for e in r {
                        write!(output, " {}", e)?;
                    }
                    writeln!(output)?;
                }
            }
            Err(e) => writeln!(output, "No unique solution: {}", e)?,
        }
    }

    Ok(())
}
