use std::{
    cmp::Ordering,
    fmt::{Display, Write},
};

use rug::{Integer as ArbitraryPrecisionInteger, Rational as ArbitraryPrecisionRational};

use crate::{
    printer::{PrintMode, PrintOptions, PrintState},
    utils,
};

use super::{ArithmeticError, Field, Ring};

/// The field of rational numbers.
pub const Q: RationalField = RationalField;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RationalField;

impl RationalField {
    pub fn new() -> RationalField {
        RationalField
    }
}

/// An exact rational number in lowest terms with a positive denominator.
///
/// Numbers whose numerator and denominator both fit in an `i64` are always
/// stored as `Natural`, so two rationals are equal iff their values are.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Rational {
    Natural(i64, i64),
    Large(ArbitraryPrecisionRational),
}

impl Rational {
    /// Create the normalized fraction `num/den`.
    pub fn new(num: i64, den: i64) -> Result<Rational, ArithmeticError> {
        if den == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }

        Ok(Rational::from_i128(num as i128, den as i128))
    }

    /// Create the normalized fraction `num/den` from arbitrary precision integers.
    pub fn from_integers(
        num: ArbitraryPrecisionInteger,
        den: ArbitraryPrecisionInteger,
    ) -> Result<Rational, ArithmeticError> {
        if den.cmp0() == Ordering::Equal {
            return Err(ArithmeticError::DivisionByZero);
        }

        Ok(Rational::from_large(ArbitraryPrecisionRational::from((
            num, den,
        ))))
    }

    /// Normalize `num/den`, where `den` is nonzero.
    fn from_i128(num: i128, den: i128) -> Rational {
        if let Ok(g) = i128::try_from(utils::gcd_signed_i128(num, den)) {
            let (n, d) = if den < 0 {
                ((num / g).checked_neg(), (den / g).checked_neg())
            } else {
                (Some(num / g), Some(den / g))
            };

            if let (Some(n), Some(d)) = (n, d) {
                if let (Ok(n), Ok(d)) = (i64::try_from(n), i64::try_from(d)) {
                    return Rational::Natural(n, d);
                }
            }
        }

        Rational::from_large(ArbitraryPrecisionRational::from((num, den)))
    }

    /// Downcast to `Natural` whenever possible.
    fn from_large(r: ArbitraryPrecisionRational) -> Rational {
        if let (Some(n), Some(d)) = (r.numer().to_i64(), r.denom().to_i64()) {
            Rational::Natural(n, d)
        } else {
            Rational::Large(r)
        }
    }

    fn to_large(&self) -> ArbitraryPrecisionRational {
        match self {
            Rational::Natural(n, d) => ArbitraryPrecisionRational::from((*n, *d)),
            Rational::Large(r) => r.clone(),
        }
    }

    pub fn numerator(&self) -> ArbitraryPrecisionInteger {
        match self {
            Rational::Natural(n, _) => ArbitraryPrecisionInteger::from(*n),
            Rational::Large(r) => r.numer().clone(),
        }
    }

    pub fn denominator(&self) -> ArbitraryPrecisionInteger {
        match self {
            Rational::Natural(_, d) => ArbitraryPrecisionInteger::from(*d),
            Rational::Large(r) => r.denom().clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Rational::Natural(n, _) => *n == 0,
            Rational::Large(r) => r.cmp0() == Ordering::Equal,
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Rational::Natural(n, d) => *n == 1 && *d == 1,
            Rational::Large(r) => *r.numer() == 1 && *r.denom() == 1,
        }
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Rational::Natural(_, d) => *d == 1,
            Rational::Large(r) => *r.denom() == 1,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Rational::Natural(n, _) => *n < 0,
            Rational::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    /// Write the absolute value, without any sign.
    fn write_abs<W: Write>(&self, mode: PrintMode, f: &mut W) -> std::fmt::Result {
        match self {
            Rational::Natural(n, d) => {
                write_fraction(n.unsigned_abs(), (*d != 1).then_some(*d), mode, f)
            }
            Rational::Large(r) => write_fraction(
                r.numer().clone().abs(),
                (*r.denom() != 1).then_some(r.denom()),
                mode,
                f,
            ),
        }
    }
}

fn write_fraction<W: Write, N: Display, D: Display>(
    num: N,
    den: Option<D>,
    mode: PrintMode,
    f: &mut W,
) -> std::fmt::Result {
    match (den, mode) {
        (None, _) => write!(f, "{}", num),
        (Some(den), PrintMode::Latex) => write!(f, "\\frac{{{}}}{{{}}}", num, den),
        (Some(den), PrintMode::Plain) => write!(f, "{}/{}", num, den),
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::Natural(n, 1)
    }
}

impl From<(i64, i64)> for Rational {
    /// Create `num/den`. Panics when `den` is zero.
    fn from((num, den): (i64, i64)) -> Self {
        match Rational::new(num, den) {
            Ok(r) => r,
            Err(e) => panic!("Cannot create {}/{}: {}", num, den, e),
        }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Q.format(self, &PrintOptions::plain(), PrintState::new(), f)
    }
}

impl Display for RationalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('Q')
    }
}

impl Ring for RationalField {
    type Element = Rational;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if let (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) = (a, b) {
            let (n1, d1, n2, d2) = (*n1 as i128, *d1 as i128, *n2 as i128, *d2 as i128);
            if let Some(num) = (n1 * d2).checked_add(n2 * d1) {
                return Rational::from_i128(num, d1 * d2);
            }
        }

        Rational::from_large(a.to_large() + b.to_large())
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match (a, b) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => Rational::from_i128(
                *n1 as i128 * *n2 as i128,
                *d1 as i128 * *d2 as i128,
            ),
            _ => Rational::from_large(a.to_large() * b.to_large()),
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        match a {
            Rational::Natural(n, d) => match n.checked_neg() {
                Some(neg) => Rational::Natural(neg, *d),
                None => Rational::from_large(-a.to_large()),
            },
            Rational::Large(r) => Rational::from_large(-r.clone()),
        }
    }

    fn zero(&self) -> Self::Element {
        Rational::Natural(0, 1)
    }

    fn one(&self) -> Self::Element {
        Rational::Natural(1, 1)
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn format<W: Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> std::fmt::Result {
        if state.suppress_one {
            if element.is_one() {
                return if state.in_sum { f.write_char('+') } else { Ok(()) };
            }
            if self.neg(element).is_one() {
                return f.write_char('-');
            }
        }

        if element.is_negative() {
            f.write_char('-')?;
        } else if state.in_sum {
            f.write_char('+')?;
        }

        element.write_abs(opts.mode, f)
    }
}

impl Field for RationalField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element, ArithmeticError> {
        Ok(self.mul(a, &self.inv(b)?))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) -> Result<(), ArithmeticError> {
        *a = self.div(a, b)?;
        Ok(())
    }

    fn inv(&self, a: &Self::Element) -> Result<Self::Element, ArithmeticError> {
        if a.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }

        Ok(match a {
            Rational::Natural(n, d) => Rational::from_i128(*d as i128, *n as i128),
            Rational::Large(r) => Rational::from_large(r.clone().recip()),
        })
    }
}

#[cfg(test)]
mod test {
    use crate::rings::{ArithmeticError, Field, Ring};

    use super::{Rational, Q};

    #[test]
    fn normalization() {
        assert_eq!(Rational::new(6, -4), Ok(Rational::Natural(-3, 2)));
        assert_eq!(Rational::new(0, -5), Ok(Rational::Natural(0, 1)));
        assert_eq!(Rational::new(1, 0), Err(ArithmeticError::DivisionByZero));
        assert_eq!(Rational::from((2, 4)), Rational::from((1, 2)));
        assert!(matches!(
            Rational::new(i64::MIN, -1).unwrap(),
            Rational::Large(_)
        ));
    }

    #[test]
    fn arithmetic() {
        let a: Rational = (1, 3).into();
        let b: Rational = (1, 6).into();

        assert_eq!(Q.add(&a, &b), (1, 2).into());
        assert_eq!(Q.sub(&b, &a), (-1, 6).into());
        assert_eq!(Q.mul(&a, &b), (1, 18).into());
        assert_eq!(Q.div(&a, &b).unwrap(), 2.into());
        assert_eq!(Q.neg(&a), (-1, 3).into());
        assert_eq!(Q.inv(&(-2).into()).unwrap(), (-1, 2).into());
        assert!(Q.is_one(&Q.mul(&a, &3.into())));
        assert!(Q.sub(&a, &a).is_zero());

        let mut c = a.clone();
        Q.sub_assign(&mut c, &b);
        assert_eq!(c, (1, 6).into());
        Q.div_assign(&mut c, &a).unwrap();
        assert_eq!(c, (1, 2).into());
        assert_eq!(
            Q.div_assign(&mut c, &0.into()),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(c, (1, 2).into());
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(Q.inv(&Q.zero()), Err(ArithmeticError::DivisionByZero));
        assert_eq!(
            Q.div(&1.into(), &0.into()),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn overflow_promotes_and_demotes() {
        let a: Rational = i64::MAX.into();
        let s = Q.add(&a, &a);
        assert!(matches!(s, Rational::Large(_)));
        assert_eq!(s.to_string(), "18446744073709551614");

        assert_eq!(Q.sub(&s, &a), a);

        let tiny = Q.inv(&s).unwrap();
        assert!(matches!(tiny, Rational::Large(_)));
        assert_eq!(Q.mul(&tiny, &s), 1.into());
        assert_eq!(Q.neg(&i64::MIN.into()).to_string(), "9223372036854775808");
    }

    #[test]
    fn queries() {
        let r: Rational = (-7, 3).into();
        assert!(r.is_negative());
        assert!(!r.is_integer());
        assert_eq!(r.numerator(), -7);
        assert_eq!(r.denominator(), 3);
        assert_eq!(r.to_string(), "-7/3");
        assert!(Rational::from(4).is_integer());
    }
}
