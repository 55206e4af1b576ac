//! Gauss-Jordan elimination over exact rational numbers that produces a
//! step-by-step LaTeX derivation of the reduced row echelon form.
//!
//! For example:
//!
//! ```
//! use rref_latex::{rings::rational::Q, tensors::matrix::Matrix};
//!
//! let m = Matrix::from_nested_vec(
//!     vec![
//!         vec![1.into(), 2.into(), 5.into()],
//!         vec![3.into(), 4.into(), 6.into()],
//!     ],
//!     Q,
//! )
//! .unwrap();
//!
//! let reduction = m.row_reduce_traced(1).unwrap();
//! println!("{}", reduction.trace);
//!
//! let solution = reduction.solution().unwrap();
//! assert_eq!(solution.to_string(), "{{-4},{9/2}}");
//! ```
//!
//! Every matrix in the derivation is printed as a bracketed `array`, and every
//! row operation as a label over an arrow, so the output can be pasted into any
//! LaTeX document that loads `amsmath`.

pub mod parser;
pub mod printer;
pub mod rings;
pub mod row_reduce;
pub mod shell;
pub mod tensors;
pub mod utils;
