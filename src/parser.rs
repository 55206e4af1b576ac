use std::fmt::Display;

use rug::Integer as ArbitraryPrecisionInteger;

use crate::{rings::rational::Rational, tensors::matrix::MatrixError};

/// Errors in user supplied input. They are caught before a matrix is built.
#[derive(Debug)]
pub enum InputError {
    Io(std::io::Error),
    UnexpectedEnd,
    InvalidDimension(String),
    InvalidNumber(String),
    ZeroDenominator(String),
    WrongColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    AugmentationOutOfRange {
        augmented_columns: u32,
        ncols: u32,
    },
    Matrix(MatrixError),
}

impl Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(e) => write!(f, "Could not read input: {}", e),
            InputError::UnexpectedEnd => write!(f, "Input ended unexpectedly"),
            InputError::InvalidDimension(s) => {
                write!(f, "Please enter valid numbers: '{}' is not a positive integer", s)
            }
            InputError::InvalidNumber(s) => {
                write!(f, "'{}' is not an integer, decimal or fraction a/b", s)
            }
            InputError::ZeroDenominator(s) => write!(f, "'{}' has a zero denominator", s),
            InputError::WrongColumnCount {
                row,
                expected,
                found,
            } => write!(
                f,
                "Wrong number of columns: row {} has {} entries instead of {}",
                row + 1,
                found,
                expected
            ),
            InputError::AugmentationOutOfRange {
                augmented_columns,
                ncols,
            } => write!(
                f,
                "Cannot augment {} columns of a matrix with {} columns",
                augmented_columns, ncols
            ),
            InputError::Matrix(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(e) => Some(e),
            InputError::Matrix(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        InputError::Io(e)
    }
}

impl From<MatrixError> for InputError {
    fn from(e: MatrixError) -> Self {
        InputError::Matrix(e)
    }
}

/// Parse an optionally signed string of decimal digits.
fn parse_integer(s: &str) -> Option<ArbitraryPrecisionInteger> {
    let digits = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    s.parse().ok()
}

/// Parse `n`, `n/d` or a terminating decimal `n.ddd` into an exact rational.
pub fn parse_rational(token: &str) -> Result<Rational, InputError> {
    let invalid = || InputError::InvalidNumber(token.to_string());

    let (num, den) = if let Some((num, den)) = token.split_once('/') {
        (
            parse_integer(num).ok_or_else(invalid)?,
            parse_integer(den).ok_or_else(invalid)?,
        )
    } else if let Some((int, frac)) = token.split_once('.') {
        if frac.is_empty() {
            return Err(invalid());
        }

        let digits = if int.is_empty() || int == "-" || int == "+" {
            format!("{}0{}", int, frac)
        } else {
            format!("{}{}", int, frac)
        };

        (
            parse_integer(&digits).ok_or_else(invalid)?,
            parse_integer(&format!("1{}", "0".repeat(frac.len()))).ok_or_else(invalid)?,
        )
    } else {
        (parse_integer(token).ok_or_else(invalid)?, 1.into())
    };

    Rational::from_integers(num, den).map_err(|_| InputError::ZeroDenominator(token.to_string()))
}

/// Parse a row or column count.
pub fn parse_dimension(s: &str) -> Result<u32, InputError> {
    match s.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(InputError::InvalidDimension(s.trim().to_string())),
    }
}

/// Parse the whitespace separated entries of row `row`, which must have exactly `ncols` of them.
pub fn parse_row(line: &str, ncols: usize, row: usize) -> Result<Vec<Rational>, InputError> {
    let tokens: Vec<_> = line.split_whitespace().collect();
    if tokens.len() != ncols {
        return Err(InputError::WrongColumnCount {
            row,
            expected: ncols,
            found: tokens.len(),
        });
    }

    tokens.into_iter().map(parse_rational).collect()
}

/// Interpret an answer to a yes/no question. Anything not starting with `y` is a no.
pub fn parse_yes_no(s: &str) -> bool {
    s.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

/// Parse the number of augmented columns, at most `ncols`.
pub fn parse_augmented_columns(s: &str, ncols: u32) -> Result<u32, InputError> {
    let augmented_columns = s
        .trim()
        .parse::<u32>()
        .map_err(|_| InputError::InvalidNumber(s.trim().to_string()))?;

    if augmented_columns > ncols {
        return Err(InputError::AugmentationOutOfRange {
            augmented_columns,
            ncols,
        });
    }

    Ok(augmented_columns)
}

#[cfg(test)]
mod test {
    use crate::rings::rational::Rational;

    use super::{
        parse_augmented_columns, parse_dimension, parse_rational, parse_row, parse_yes_no,
        InputError,
    };

    #[test]
    fn rationals() {
        assert_eq!(parse_rational("3").unwrap(), 3.into());
        assert_eq!(parse_rational("-3").unwrap(), (-3).into());
        assert_eq!(parse_rational("+3").unwrap(), 3.into());
        assert_eq!(parse_rational("2/4").unwrap(), (1, 2).into());
        assert_eq!(parse_rational("1/-3").unwrap(), (-1, 3).into());
        assert_eq!(parse_rational("-0.25").unwrap(), (-1, 4).into());
        assert_eq!(parse_rational(".5").unwrap(), (1, 2).into());
        assert_eq!(parse_rational("1.10").unwrap(), (11, 10).into());
        assert_eq!(
            parse_rational("123456789012345678901234567890").unwrap(),
            Rational::from_integers(
                "123456789012345678901234567890".parse().unwrap(),
                1.into()
            )
            .unwrap()
        );
    }

    #[test]
    fn invalid_rationals() {
        for s in ["", "x", "1/", "/2", "1/2/3", "1.", "1.2.3", "- 1", "1_000", "1e3", "0.-5"] {
            assert!(
                matches!(parse_rational(s), Err(InputError::InvalidNumber(_))),
                "{} should not parse",
                s
            );
        }

        assert!(matches!(
            parse_rational("1/0"),
            Err(InputError::ZeroDenominator(_))
        ));
    }

    #[test]
    fn dimensions() {
        assert_eq!(parse_dimension(" 3\n").unwrap(), 3);
        assert!(matches!(
            parse_dimension("0"),
            Err(InputError::InvalidDimension(_))
        ));
        assert!(matches!(
            parse_dimension("-2"),
            Err(InputError::InvalidDimension(_))
        ));
        assert!(matches!(
            parse_dimension("two"),
            Err(InputError::InvalidDimension(_))
        ));
    }

    #[test]
    fn rows() {
        assert_eq!(
            parse_row("1  1/2\t-3", 3, 0).unwrap(),
            vec![Rational::from(1), (1, 2).into(), (-3).into()]
        );
        assert!(matches!(
            parse_row("1 2", 3, 1),
            Err(InputError::WrongColumnCount {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            parse_row("1 a 2", 3, 0),
            Err(InputError::InvalidNumber(s)) if s == "a"
        ));
    }

    #[test]
    fn answers() {
        assert!(parse_yes_no("y"));
        assert!(parse_yes_no("Yes"));
        assert!(!parse_yes_no("n"));
        assert!(!parse_yes_no(""));

        assert_eq!(parse_augmented_columns("1", 3).unwrap(), 1);
        assert_eq!(parse_augmented_columns("0", 3).unwrap(), 0);
        assert!(matches!(
            parse_augmented_columns("4", 3),
            Err(InputError::AugmentationOutOfRange {
                augmented_columns: 4,
                ncols: 3
            })
        ));
        assert!(matches!(
            parse_augmented_columns("-1", 3),
            Err(InputError::InvalidNumber(_))
        ));
    }
}
