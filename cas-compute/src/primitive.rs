//! Functions to construct [`Integer`]s, [`Rational`]s, [`Float`]s, and [`Complex`] numbers from
//! various types.

use rug::{Assign, Complex, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string of decimal digits. Returns [`None`] if the string is not
/// a valid integer.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice. Returns [`None`] if the string is not a valid number.
pub fn float_from_str(s: &str) -> Option<Float> {
    Float::parse(s).ok().map(|parsed| Float::with_val(PRECISION, parsed))
}

/// Creates a [`Complex`] with the given value.
pub fn complex<T>(n: T) -> Complex
where
    Complex: Assign<T>,
{
    Complex::with_val(PRECISION, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numbers() {
        assert_eq!(int_from_str("123456789012345678901234567890").unwrap().to_string(), "123456789012345678901234567890");
        assert!(int_from_str("12a").is_none());
        assert_eq!(float_from_str("2.5").unwrap(), 2.5);
        assert_eq!(float_from_str(".5").unwrap(), 0.5);
        assert_eq!(float_from_str("1e3").unwrap(), 1000.0);
        assert!(float_from_str("abc").is_none());
    }

    #[test]
    fn rational_reduces() {
        assert_eq!(rational((6, 4)), rational((3, 2)));
        assert_eq!(rational(5).denom(), &1);
    }
}
