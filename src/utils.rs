/// Compute the non-negative greatest common divisor of `a` and `b`.
pub fn gcd_signed_i128(mut a: i128, mut b: i128) -> u128 {
    let mut c;
    while a != 0 {
        c = a;
        // only wraps when i128::MIN % -1 and that still yields 0
        a = b.wrapping_rem(a);
        b = c;
    }
    b.unsigned_abs()
}

#[cfg(test)]
mod test {
    use super::gcd_signed_i128;

    #[test]
    fn gcd() {
        assert_eq!(gcd_signed_i128(12, -18), 6);
        assert_eq!(gcd_signed_i128(0, -7), 7);
        assert_eq!(gcd_signed_i128(0, 0), 0);
        assert_eq!(gcd_signed_i128(i128::MIN, 2), 2);
        assert_eq!(gcd_signed_i128(-(1 << 100), 1 << 80), 1 << 80);
    }
}
