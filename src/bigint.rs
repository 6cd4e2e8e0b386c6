use crate::error::BigIntError;
use crate::range_error_here;
use std::cmp::Ordering;
use std::ops::{Neg, Shl};

const WORD_BITS: usize = u64::BITS as usize;

/// Largest bit length a BigInt may reach through the checked operations (`checked_shift_left`, `from_words`, `as_uint_n`).
pub const MAX_LENGTH_BITS: usize = 1 << 30;

/// `MAX_LENGTH_BITS` expressed in 64-bit words.
pub const MAX_LENGTH_WORDS: usize = MAX_LENGTH_BITS / WORD_BITS;

/// Sign of a BigInt. `Zero` is its own sign, never `Positive` with an empty magnitude.
///
/// Variants are declared in numeric order so the derived `Ord` sorts values by sign first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Negative,
    #[default]
    Zero,
    Positive,
}

/// Immutable arbitrary-precision integer stored as sign and magnitude.
///
/// The magnitude is a little-endian sequence of 64-bit words with no most-significant zero word,
/// and it is empty exactly when the sign is `Zero`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct JsBigInt {
    sign: Sign,
    magnitude: Vec<u64>,
}

impl JsBigInt {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Builds a value from a sign and raw magnitude words, stripping high zero words.
    pub(crate) fn from_parts(sign: Sign, mut magnitude: Vec<u64>) -> Self {
        while let Some(&0) = magnitude.last() {
            magnitude.pop();
        }
        if magnitude.is_empty() {
            return Self::zero();
        }
        debug_assert_ne!(sign, Sign::Zero, "non-empty magnitude with Zero sign");
        Self { sign, magnitude }
    }

    pub fn from_i64(value: i64) -> Self {
        // unsigned_abs keeps i64::MIN exact (2^63 does not fit in i64)
        match value.cmp(&0) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => Self {
                sign: Sign::Positive,
                magnitude: vec![value.unsigned_abs()],
            },
            Ordering::Less => Self {
                sign: Sign::Negative,
                magnitude: vec![value.unsigned_abs()],
            },
        }
    }

    pub fn from_u64(value: u64) -> Self {
        if value == 0 {
            return Self::zero();
        }
        Self {
            sign: Sign::Positive,
            magnitude: vec![value],
        }
    }

    /// Creates a value from little-endian magnitude words and a sign bit.
    ///
    /// High zero words are ignored and an all-zero input yields zero whatever `sign_bit` says.
    pub fn from_words(sign_bit: bool, words: &[u64]) -> Result<Self, BigIntError> {
        let len = words.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1);
        if len > MAX_LENGTH_WORDS {
            return Err(range_error_here!("Maximum BigInt size exceeded"));
        }
        log::trace!("from_words: sign_bit={sign_bit} input_words={} significant_words={len}", words.len());
        let sign = if sign_bit { Sign::Negative } else { Sign::Positive };
        Ok(Self::from_parts(sign, words[..len].to_vec()))
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    /// Magnitude words, least significant first.
    pub fn magnitude(&self) -> &[u64] {
        &self.magnitude
    }

    /// Number of 64-bit words needed to hold the magnitude; zero for the value zero.
    pub fn word_count(&self) -> usize {
        self.magnitude.len()
    }

    /// Position of the highest set bit of the magnitude, counting from one.
    pub fn bit_length(&self) -> usize {
        match self.magnitude.last() {
            Some(&top) => (self.magnitude.len() - 1) * WORD_BITS + (u64::BITS - top.leading_zeros()) as usize,
            None => 0,
        }
    }

    /// Multiplies the value by `2^bits`.
    ///
    /// Whole words are prepended as zeros, the remaining bits are shifted word by word with the
    /// carry moving into the next word, and a new top word is only allocated for a non-zero carry.
    pub fn shift_left(&self, bits: usize) -> Self {
        if self.is_zero() || bits == 0 {
            return self.clone();
        }
        let word_shift = bits / WORD_BITS;
        let bit_shift = (bits % WORD_BITS) as u32;

        let mut magnitude = Vec::with_capacity(word_shift + self.magnitude.len() + 1);
        magnitude.resize(word_shift, 0);
        if bit_shift == 0 {
            magnitude.extend_from_slice(&self.magnitude);
        } else {
            let mut carry = 0u64;
            for &word in &self.magnitude {
                magnitude.push((word << bit_shift) | carry);
                carry = word >> (u64::BITS - bit_shift);
            }
            if carry != 0 {
                magnitude.push(carry);
            }
        }
        log::trace!("shift_left by {bits}: {} -> {} words", self.magnitude.len(), magnitude.len());

        Self {
            sign: self.sign,
            magnitude,
        }
    }

    /// Like `shift_left`, but refuses to grow past `MAX_LENGTH_BITS`.
    pub fn checked_shift_left(&self, bits: usize) -> Result<Self, BigIntError> {
        if !self.is_zero() && self.bit_length().checked_add(bits).is_none_or(|len| len > MAX_LENGTH_BITS) {
            return Err(range_error_here!("Maximum BigInt size exceeded"));
        }
        Ok(self.shift_left(bits))
    }

    /// Low 64 bits of the two's-complement form, reinterpreted as `i64`.
    ///
    /// The flag is true when the value lies in `[i64::MIN, i64::MAX]`.
    pub fn to_i64_wrapping(&self) -> (i64, bool) {
        let lossless = match (self.sign, self.magnitude.as_slice()) {
            (Sign::Zero, _) => true,
            (Sign::Positive, &[word]) => word <= i64::MAX as u64,
            (Sign::Negative, &[word]) => word <= i64::MIN.unsigned_abs(),
            _ => false,
        };
        (self.low_word() as i64, lossless)
    }

    /// Low 64 bits of the two's-complement form, reinterpreted as `u64`.
    ///
    /// The flag is true when the value lies in `[0, u64::MAX]`.
    pub fn to_u64_wrapping(&self) -> (u64, bool) {
        let lossless = match self.sign {
            Sign::Zero => true,
            Sign::Positive => self.magnitude.len() == 1,
            Sign::Negative => false,
        };
        (self.low_word(), lossless)
    }

    /// Low 64 bits of the two's-complement form. Higher words never reach these bits: negating
    /// `m` modulo 2^64 only depends on `m mod 2^64`.
    fn low_word(&self) -> u64 {
        let low = self.magnitude.first().copied().unwrap_or(0);
        if self.is_negative() { (!low).wrapping_add(1) } else { low }
    }

    /// `BigInt.asUintN`: the value modulo `2^bits`.
    pub fn as_uint_n(&self, bits: usize) -> Result<Self, BigIntError> {
        if bits == 0 || self.is_zero() {
            return Ok(Self::zero());
        }
        if !self.is_negative() && self.bit_length() <= bits {
            return Ok(self.clone());
        }
        // a negative input becomes 2^bits - |value|, which is as wide as `bits`
        if bits.div_ceil(WORD_BITS) > MAX_LENGTH_WORDS {
            return Err(range_error_here!("Maximum BigInt size exceeded"));
        }
        Ok(Self::from_parts(Sign::Positive, self.twos_complement_low_bits(bits)))
    }

    /// `BigInt.asIntN`: the value modulo `2^bits`, read back as a signed `bits`-wide integer.
    pub fn as_int_n(&self, bits: usize) -> Self {
        if bits == 0 || self.is_zero() {
            return Self::zero();
        }
        if self.bit_length() < bits {
            return self.clone();
        }
        let mut words = self.twos_complement_low_bits(bits);
        let top = bits - 1;
        if (words[top / WORD_BITS] >> (top % WORD_BITS)) & 1 == 0 {
            return Self::from_parts(Sign::Positive, words);
        }
        negate_words(&mut words);
        mask_to_bits(&mut words, bits);
        Self::from_parts(Sign::Negative, words)
    }

    /// `ceil(bits / 64)` words holding the low `bits` bits of the infinite two's-complement form.
    fn twos_complement_low_bits(&self, bits: usize) -> Vec<u64> {
        let len = bits.div_ceil(WORD_BITS);
        let mut words: Vec<u64> = (0..len).map(|i| self.magnitude.get(i).copied().unwrap_or(0)).collect();
        if self.is_negative() {
            negate_words(&mut words);
        }
        mask_to_bits(&mut words, bits);
        words
    }

    /// Copies the lowest `min(words.len(), word_count())` magnitude words into `words`.
    ///
    /// Returns the sign bit and the written prefix of `words`.
    pub fn to_words_array<'a>(&self, words: &'a mut [u64]) -> (bool, &'a mut [u64]) {
        let count = words.len().min(self.magnitude.len());
        words[..count].copy_from_slice(&self.magnitude[..count]);
        (self.is_negative(), &mut words[..count])
    }
}

/// Two's-complement negation in place: invert every word, then add one with carry.
fn negate_words(words: &mut [u64]) {
    let mut carry = true;
    for word in words.iter_mut() {
        let (sum, overflow) = (!*word).overflowing_add(u64::from(carry));
        *word = sum;
        carry = overflow;
    }
}

fn mask_to_bits(words: &mut [u64], bits: usize) {
    let rem = bits % WORD_BITS;
    if rem != 0
        && let Some(top) = words.last_mut()
    {
        *top &= (1u64 << rem) - 1;
    }
}

fn cmp_magnitude(lhs: &[u64], rhs: &[u64]) -> Ordering {
    lhs.len().cmp(&rhs.len()).then_with(|| lhs.iter().rev().cmp(rhs.iter().rev()))
}

impl Ord for JsBigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sign.cmp(&other.sign).then_with(|| {
            let by_magnitude = cmp_magnitude(&self.magnitude, &other.magnitude);
            if self.is_negative() { by_magnitude.reverse() } else { by_magnitude }
        })
    }
}

impl PartialOrd for JsBigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Neg for &JsBigInt {
    type Output = JsBigInt;

    fn neg(self) -> JsBigInt {
        -self.clone()
    }
}

impl Neg for JsBigInt {
    type Output = JsBigInt;

    fn neg(self) -> JsBigInt {
        let sign = match self.sign {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        };
        JsBigInt {
            sign,
            magnitude: self.magnitude,
        }
    }
}

impl Shl<usize> for &JsBigInt {
    type Output = JsBigInt;

    fn shl(self, bits: usize) -> JsBigInt {
        self.shift_left(bits)
    }
}

impl Shl<usize> for JsBigInt {
    type Output = JsBigInt;

    fn shl(self, bits: usize) -> JsBigInt {
        self.shift_left(bits)
    }
}

impl From<i64> for JsBigInt {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<u64> for JsBigInt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<i32> for JsBigInt {
    fn from(value: i32) -> Self {
        Self::from_i64(i64::from(value))
    }
}

impl From<u32> for JsBigInt {
    fn from(value: u32) -> Self {
        Self::from_u64(u64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_its_own_sign() {
        let z = JsBigInt::from_i64(0);
        assert_eq!(z.sign(), Sign::Zero);
        assert!(z.magnitude().is_empty());
        assert_eq!(z, JsBigInt::from_u64(0));
        assert_eq!(z, JsBigInt::zero());
        assert_eq!(z.bit_length(), 0);
    }

    #[test]
    fn min_i64_magnitude_is_two_to_the_63() {
        let v = JsBigInt::from_i64(i64::MIN);
        assert_eq!(v.sign(), Sign::Negative);
        assert_eq!(v.magnitude(), &[1u64 << 63]);
        assert_eq!(v.bit_length(), 64);
    }

    #[test]
    fn from_parts_strips_high_zero_words() {
        let v = JsBigInt::from_parts(Sign::Positive, vec![5, 0, 0]);
        assert_eq!(v.magnitude(), &[5]);
        let z = JsBigInt::from_parts(Sign::Negative, vec![0, 0]);
        assert_eq!(z.sign(), Sign::Zero);
    }

    #[test]
    fn shift_carries_into_new_word() {
        let v = JsBigInt::from_u64(u64::MAX).shift_left(1);
        assert_eq!(v.magnitude(), &[u64::MAX - 1, 1]);

        let v = JsBigInt::from_u64(1).shift_left(63);
        assert_eq!(v.magnitude(), &[1u64 << 63]);
        assert_eq!(v.shift_left(1).magnitude(), &[0, 1]);
    }

    #[test]
    fn shift_by_whole_words() {
        let v = JsBigInt::from_i64(-3).shift_left(128);
        assert_eq!(v.sign(), Sign::Negative);
        assert_eq!(v.magnitude(), &[0, 0, 3]);
        assert!(JsBigInt::zero().shift_left(1000).is_zero());
    }

    #[test]
    fn checked_shift_rejects_oversized_results() {
        let one = JsBigInt::from_u64(1);
        assert_eq!(one.checked_shift_left(64), Ok(one.shift_left(64)));
        assert!(matches!(one.checked_shift_left(MAX_LENGTH_BITS), Err(BigIntError::RangeError { .. })));
        assert!(one.checked_shift_left(usize::MAX).is_err());
        assert!(JsBigInt::zero().checked_shift_left(usize::MAX).is_ok());
    }

    #[test]
    fn low_word_of_negative_multiword_value() {
        // -(2^64) has all-zero low bits
        let v = -JsBigInt::from_u64(1).shift_left(64);
        assert_eq!(v.to_u64_wrapping(), (0, false));
        assert_eq!(v.to_i64_wrapping(), (0, false));

        // -(2^64 + 5) truncates like -5
        let v = -JsBigInt::from_parts(Sign::Positive, vec![5, 1]);
        assert_eq!(v.to_i64_wrapping(), (-5, false));
    }

    #[test]
    fn negate_words_wraps_across_words() {
        let mut words = [0u64, 1];
        negate_words(&mut words);
        assert_eq!(words, [0, u64::MAX]);
    }

    #[test]
    fn ordering_follows_sign_then_magnitude() {
        let mut values: Vec<JsBigInt> = [5i64, -1, 0, i64::MIN, i64::MAX].into_iter().map(JsBigInt::from).collect();
        values.push(JsBigInt::from_u64(1).shift_left(70));
        values.push(-JsBigInt::from_u64(1).shift_left(70));
        values.sort();
        let big = JsBigInt::from_u64(1).shift_left(70);
        assert_eq!(values.first(), Some(&-&big));
        assert_eq!(values.last(), Some(&big));
        assert_eq!(values[1], JsBigInt::from_i64(i64::MIN));
        assert_eq!(values[3], JsBigInt::zero());
    }
}
