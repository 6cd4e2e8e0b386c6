//! Word-oriented BigInt engine with the semantics of a JavaScript engine's embedder API:
//! construction from fixed-width integers, left shifts, word counts, and truncating
//! 64-bit conversions that report whether they were lossless.
//!
//! ```
//! use bigint_words::JsBigInt;
//!
//! let max = JsBigInt::from_i64(i64::MAX);
//! let past_max = JsBigInt::from_u64(1).shift_left(63);
//! assert_eq!(max.to_i64_wrapping(), (i64::MAX, true));
//! assert_eq!(past_max.to_i64_wrapping(), (i64::MIN, false));
//! assert_eq!(past_max.shift_left(1).word_count(), 2);
//! ```

pub(crate) mod bigint;
pub(crate) mod error;
pub(crate) mod host;

pub use bigint::{JsBigInt, MAX_LENGTH_BITS, MAX_LENGTH_WORDS, Sign};
pub use error::BigIntError;
pub use host::parse_bigint_literal;
