pub mod rational;

use std::fmt::{Debug, Display, Write};

use crate::printer::{PrintOptions, PrintState};

/// Errors raised by exact field arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticError {
    DivisionByZero,
}

impl Display for ArithmeticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticError::DivisionByZero => f.write_str("Division by zero"),
        }
    }
}

impl std::error::Error for ArithmeticError {}

pub trait Ring: Clone + Copy + PartialEq + Debug + Display {
    type Element: Clone + PartialEq + Eq + Debug + Display;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;

    /// Write `element` to `f`. The `state` decides whether a sign is forced
    /// and whether a unit is collapsed to its sign.
    fn format<W: Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> std::fmt::Result;
}

pub trait Field: Ring {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element, ArithmeticError>;
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) -> Result<(), ArithmeticError>;
    fn inv(&self, a: &Self::Element) -> Result<Self::Element, ArithmeticError>;
}
