// Marshaling between the word engine and the host side: num-bigint values,
// decimal/radix strings and BigInt literal text.

use crate::bigint::{JsBigInt, Sign};
use crate::error::BigIntError;
use crate::syntax_error_here;
use crate::range_error_here;
use num_bigint::{BigInt, BigUint};
use num_traits::Num;
use std::fmt;
use std::str::FromStr;

impl From<&BigInt> for JsBigInt {
    fn from(value: &BigInt) -> Self {
        let (sign, words) = value.to_u64_digits();
        match sign {
            num_bigint::Sign::NoSign => JsBigInt::zero(),
            num_bigint::Sign::Plus => JsBigInt::from_parts(Sign::Positive, words),
            num_bigint::Sign::Minus => JsBigInt::from_parts(Sign::Negative, words),
        }
    }
}

impl From<BigInt> for JsBigInt {
    fn from(value: BigInt) -> Self {
        JsBigInt::from(&value)
    }
}

impl From<&JsBigInt> for BigInt {
    fn from(value: &JsBigInt) -> Self {
        let sign = match value.sign() {
            Sign::Negative => num_bigint::Sign::Minus,
            Sign::Zero => num_bigint::Sign::NoSign,
            Sign::Positive => num_bigint::Sign::Plus,
        };
        // num-bigint builds from 32-bit digits, low half first
        let digits: Vec<u32> = value.magnitude().iter().flat_map(|&w| [w as u32, (w >> 32) as u32]).collect();
        BigInt::from_slice(sign, &digits)
    }
}

impl From<JsBigInt> for BigInt {
    fn from(value: JsBigInt) -> Self {
        BigInt::from(&value)
    }
}

impl fmt::Display for JsBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&BigInt::from(self), f)
    }
}

impl JsBigInt {
    /// `BigInt.prototype.toString(radix)`.
    pub fn to_str_radix(&self, radix: u32) -> Result<String, BigIntError> {
        if !(2..=36).contains(&radix) {
            return Err(range_error_here!("toString() radix must be between 2 and 36"));
        }
        Ok(BigInt::from(self).to_str_radix(radix))
    }
}

/// Parses BigInt literal text: decimal with an optional sign, or `0x`/`0o`/`0b` prefixed digits,
/// with an optional trailing `n` and surrounding whitespace. Blank input is zero.
pub fn parse_bigint_literal(text: &str) -> Result<JsBigInt, BigIntError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(JsBigInt::zero());
    }
    let body = trimmed.strip_suffix('n').unwrap_or(trimmed);

    let (radix, digits) = if let Some(rest) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, rest)
    } else if let Some(rest) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
        (8, rest)
    } else if let Some(rest) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, rest)
    } else {
        (10, body)
    };

    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) if radix == 10 => (Sign::Negative, rest),
        _ => (Sign::Positive, digits.strip_prefix('+').filter(|_| radix == 10).unwrap_or(digits)),
    };

    // from_str_radix would also accept '_' separators and a second sign
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(syntax_error_here!(format!("Cannot convert {trimmed} to a BigInt")));
    }
    let magnitude =
        BigUint::from_str_radix(digits, radix).map_err(|e| syntax_error_here!(format!("Cannot convert {trimmed} to a BigInt: {e}")))?;
    log::trace!("parsed BigInt literal {trimmed:?} (radix {radix})");
    Ok(JsBigInt::from_parts(sign, magnitude.to_u64_digits()))
}

impl FromStr for JsBigInt {
    type Err = BigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bigint_literal(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_bigint_round_trip_keeps_words() {
        let n = BigInt::parse_bytes(b"-340282366920938463463374607431768211457", 10).unwrap();
        let v = JsBigInt::from(&n);
        assert!(v.is_negative());
        assert_eq!(v.magnitude(), &[1, 0, 1]);
        assert_eq!(BigInt::from(&v), n);
    }

    #[test]
    fn zero_maps_to_no_sign() {
        let n = BigInt::from(&JsBigInt::zero());
        assert_eq!(n.sign(), num_bigint::Sign::NoSign);
        assert!(JsBigInt::from(BigInt::from(0)).is_zero());
    }

    #[test]
    fn display_and_radix() {
        assert_eq!(JsBigInt::from_i64(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(JsBigInt::from_u64(255).to_str_radix(16).unwrap(), "ff");
        assert_eq!(JsBigInt::from_i64(-5).to_str_radix(2).unwrap(), "-101");
        assert!(matches!(JsBigInt::zero().to_str_radix(37), Err(BigIntError::RangeError { .. })));
    }

    #[test]
    fn literal_prefixes() {
        assert_eq!(parse_bigint_literal("0x10n").unwrap(), JsBigInt::from_u64(16));
        assert_eq!(parse_bigint_literal("0O17").unwrap(), JsBigInt::from_u64(15));
        assert_eq!(parse_bigint_literal("0b101").unwrap(), JsBigInt::from_u64(5));
        assert_eq!(parse_bigint_literal("  -42n ").unwrap(), JsBigInt::from_i64(-42));
        assert_eq!(parse_bigint_literal("+7").unwrap(), JsBigInt::from_u64(7));
        assert!(parse_bigint_literal("-0").unwrap().is_zero());
    }

    #[test]
    fn literal_rejects_malformed_text() {
        for bad in ["n", "0x", "1_000", "12a", "0x-1", "--1", "-0x1", "0b2", "1.5"] {
            let err = parse_bigint_literal(bad).expect_err(bad);
            assert!(matches!(err, BigIntError::SyntaxError { .. }), "{bad}: {err:?}");
        }
    }
}
