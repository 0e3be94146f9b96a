//! Fixed-capacity sign-magnitude integers.
//!
//! A [`BigInt`] stores its magnitude in [`LIMBS`] little-endian 64-bit limbs,
//! which is enough for every decimal literal of up to 154 digits. Arithmetic
//! never wraps: operations that would exceed the capacity report [`Overflow`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;
use num_traits::{FromPrimitive, ToPrimitive};
use thiserror::Error;

pub const LIMBS: usize = 8;

/// Largest power of ten that fits in a limb.
const CHUNK: u64 = 10_000_000_000_000_000_000;
const CHUNK_DIGITS: usize = 19;

type Magnitude = [u64; LIMBS];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BigInt {
  limbs: Magnitude,
  /// never set for zero
  negative: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("integer does not fit in {} bits", LIMBS * 64)]
pub struct Overflow;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBigIntError {
  #[error("cannot parse integer from empty string")]
  Empty,
  #[error("invalid digit {found:?} at position {index}")]
  InvalidDigit {
    index: usize,
    found: char,
  },
  #[error(transparent)]
  Overflow(#[from] Overflow),
}

impl BigInt {
  pub const ZERO: BigInt = BigInt {
    limbs: [0; LIMBS],
    negative: false,
  };

  pub fn zero() -> Self {
    Self::ZERO
  }

  pub fn is_zero(&self) -> bool {
    self.limbs.iter().all(|&limb| limb == 0)
  }

  pub fn is_negative(&self) -> bool {
    self.negative
  }

  /// Compares magnitudes, ignoring signs.
  pub fn abs_cmp(&self, other: &BigInt) -> Ordering {
    cmp_magnitude(&self.limbs, &other.limbs)
  }

  pub fn checked_add(&self, other: &BigInt) -> Result<BigInt, Overflow> {
    if self.negative == other.negative {
      let limbs = add_magnitude(&self.limbs, &other.limbs).ok_or(Overflow)?;
      return Ok(BigInt::from_parts(limbs, self.negative));
    }

    match self.abs_cmp(other) {
      Ordering::Less => {
        let limbs = sub_magnitude(&other.limbs, &self.limbs);
        Ok(BigInt::from_parts(limbs, other.negative))
      }
      _ => {
        let limbs = sub_magnitude(&self.limbs, &other.limbs);
        Ok(BigInt::from_parts(limbs, self.negative))
      }
    }
  }

  pub fn checked_sub(&self, other: &BigInt) -> Result<BigInt, Overflow> {
    self.checked_add(&-*other)
  }

  fn from_parts(limbs: Magnitude, negative: bool) -> BigInt {
    let mut n = BigInt {
      limbs,
      negative,
    };
    if n.is_zero() {
      n.negative = false;
    }
    n
  }

  /// Decimal digits of the magnitude, most significant first.
  fn magnitude_digits(&self) -> String {
    if self.is_zero() {
      return "0".to_owned();
    }

    let mut limbs = self.limbs;
    let mut chunks = vec![];
    while limbs.iter().any(|&limb| limb != 0) {
      chunks.push(div_small(&mut limbs, CHUNK));
    }

    let mut buf = String::with_capacity(chunks.len() * CHUNK_DIGITS);
    let mut chunks = chunks.into_iter().rev();
    if let Some(first) = chunks.next() {
      buf.push_str(&first.to_string());
    }
    for chunk in chunks {
      buf.push_str(&format!("{:019}", chunk));
    }
    buf
  }
}

fn cmp_magnitude(a: &Magnitude, b: &Magnitude) -> Ordering {
  a.iter().rev().cmp(b.iter().rev())
}

fn add_magnitude(a: &Magnitude, b: &Magnitude) -> Option<Magnitude> {
  let mut out = [0; LIMBS];
  let mut carry = false;
  for i in 0..LIMBS {
    let (sum, c1) = a[i].overflowing_add(b[i]);
    let (sum, c2) = sum.overflowing_add(carry as u64);
    out[i] = sum;
    carry = c1 || c2;
  }
  if carry {
    None
  } else {
    Some(out)
  }
}

/// `a - b`, where `|a| >= |b|`.
fn sub_magnitude(a: &Magnitude, b: &Magnitude) -> Magnitude {
  let mut out = [0; LIMBS];
  let mut borrow = false;
  for i in 0..LIMBS {
    let (diff, b1) = a[i].overflowing_sub(b[i]);
    let (diff, b2) = diff.overflowing_sub(borrow as u64);
    out[i] = diff;
    borrow = b1 || b2;
  }
  debug_assert!(!borrow);
  out
}

/// `limbs = limbs * mul + add`; returns `false` on overflow.
fn mul_small_add(limbs: &mut Magnitude, mul: u64, add: u64) -> bool {
  let mut carry = add as u128;
  for limb in limbs.iter_mut() {
    let x = *limb as u128 * mul as u128 + carry;
    *limb = x as u64;
    carry = x >> 64;
  }
  carry == 0
}

/// `limbs /= div`, returning the remainder.
fn div_small(limbs: &mut Magnitude, div: u64) -> u64 {
  let mut rem = 0u128;
  for limb in limbs.iter_mut().rev() {
    let x = (rem << 64) | *limb as u128;
    *limb = (x / div as u128) as u64;
    rem = x % div as u128;
  }
  rem as u64
}

impl Neg for BigInt {
  type Output = BigInt;

  fn neg(self) -> BigInt {
    BigInt::from_parts(self.limbs, !self.negative)
  }
}

impl Ord for BigInt {
  fn cmp(&self, other: &BigInt) -> Ordering {
    match (self.negative, other.negative) {
      (false, true) => Ordering::Greater,
      (true, false) => Ordering::Less,
      (false, false) => self.abs_cmp(other),
      (true, true) => other.abs_cmp(self),
    }
  }
}

impl PartialOrd for BigInt {
  fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl FromStr for BigInt {
  type Err = ParseBigIntError;

  fn from_str(s: &str) -> Result<BigInt, ParseBigIntError> {
    let (negative, digits, offset) = match s.as_bytes().first() {
      Some(b'-') => (true, &s[1..], 1),
      Some(b'+') => (false, &s[1..], 1),
      _ => (false, s, 0),
    };

    if digits.is_empty() {
      return Err(ParseBigIntError::Empty);
    }

    let mut limbs = [0; LIMBS];
    for (i, c) in digits.char_indices() {
      let digit = c.to_digit(10).ok_or(ParseBigIntError::InvalidDigit {
        index: i + offset,
        found: c,
      })?;
      if !mul_small_add(&mut limbs, 10, digit as u64) {
        return Err(Overflow.into());
      }
    }

    Ok(BigInt::from_parts(limbs, negative))
  }
}

impl fmt::Display for BigInt {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.pad_integral(!self.negative, "", &self.magnitude_digits())
  }
}

impl fmt::Debug for BigInt {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "BigInt({})", self)
  }
}

impl From<i64> for BigInt {
  fn from(n: i64) -> BigInt {
    let mut limbs = [0; LIMBS];
    limbs[0] = n.unsigned_abs();
    BigInt::from_parts(limbs, n < 0)
  }
}

impl From<u64> for BigInt {
  fn from(n: u64) -> BigInt {
    let mut limbs = [0; LIMBS];
    limbs[0] = n;
    BigInt::from_parts(limbs, false)
  }
}

impl ToPrimitive for BigInt {
  fn to_i64(&self) -> Option<i64> {
    if self.limbs[1..].iter().any(|&limb| limb != 0) {
      return None;
    }

    let m = self.limbs[0];
    if self.negative {
      if m <= i64::MIN.unsigned_abs() {
        Some((m as i64).wrapping_neg())
      } else {
        None
      }
    } else {
      i64::try_from(m).ok()
    }
  }

  fn to_u64(&self) -> Option<u64> {
    if self.negative || self.limbs[1..].iter().any(|&limb| limb != 0) {
      None
    } else {
      Some(self.limbs[0])
    }
  }
}

impl FromPrimitive for BigInt {
  fn from_i64(n: i64) -> Option<BigInt> {
    Some(n.into())
  }

  fn from_u64(n: u64) -> Option<BigInt> {
    Some(n.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn big(s: &str) -> BigInt {
    s.parse().unwrap()
  }

  #[test]
  fn zero_is_canonical() {
    assert_eq!(BigInt::zero().to_string(), "0");
    assert_eq!(big("-0").to_string(), "0");
    assert_eq!(big("-0"), BigInt::zero());
    assert!(!big("-000").is_negative());
  }

  #[test]
  fn parse_and_print() {
    assert_eq!(big("00042").to_string(), "42");
    assert_eq!(big("+7").to_string(), "7");
    assert_eq!(big("-12345678901234567890").to_string(), "-12345678901234567890");
    assert_eq!(big("10000000000000000000").to_string(), "10000000000000000000");
  }

  #[test]
  fn long_literal_round_trips() {
    let digits = "123456789012345678901234567890123456789012345678901234567890\
                  987654321098765432109876543210987654321098765432109876543210";
    assert_eq!(digits.len(), 120);

    let n = big(digits);
    assert_eq!(n.to_string(), digits);
    assert_eq!(n.to_i64(), None);

    let neg = format!("-{}", digits);
    assert_eq!(big(&neg).to_string(), neg);
  }

  #[test]
  fn rejects_malformed_input() {
    assert_eq!("".parse::<BigInt>(), Err(ParseBigIntError::Empty));
    assert_eq!("-".parse::<BigInt>(), Err(ParseBigIntError::Empty));
    assert_eq!(
      "12a4".parse::<BigInt>(),
      Err(ParseBigIntError::InvalidDigit { index: 2, found: 'a' }));
    assert_eq!(
      "-1 ".parse::<BigInt>(),
      Err(ParseBigIntError::InvalidDigit { index: 2, found: ' ' }));

    let huge = "9".repeat(160);
    assert_eq!(huge.parse::<BigInt>(), Err(ParseBigIntError::Overflow(Overflow)));
  }

  #[test]
  fn add_and_sub_across_signs() {
    let cases = [
      ("5", "3", "8", "2"),
      ("-5", "3", "-2", "-8"),
      ("5", "-3", "2", "8"),
      ("-5", "-3", "-8", "-2"),
      ("3", "5", "8", "-2"),
      ("18446744073709551615", "1", "18446744073709551616", "18446744073709551614"),
      ("7", "7", "14", "0"),
    ];

    for &(a, b, sum, diff) in &cases {
      assert_eq!(big(a).checked_add(&big(b)).unwrap().to_string(), sum, "{} + {}", a, b);
      assert_eq!(big(a).checked_sub(&big(b)).unwrap().to_string(), diff, "{} - {}", a, b);
    }
  }

  #[test]
  fn add_reports_overflow() {
    let max = BigInt::from_parts([u64::MAX; LIMBS], false);
    assert_eq!(max.checked_add(&BigInt::from(1i64)), Err(Overflow));
    assert_eq!((-max).checked_sub(&BigInt::from(1i64)), Err(Overflow));
    assert_eq!(max.checked_sub(&max), Ok(BigInt::zero()));
  }

  #[test]
  fn comparisons() {
    assert_eq!(big("-10").abs_cmp(&big("9")), Ordering::Greater);
    assert_eq!(big("-10").cmp(&big("9")), Ordering::Less);
    assert_eq!(big("-10").cmp(&big("-9")), Ordering::Less);
    assert_eq!(big("123").abs_cmp(&big("-123")), Ordering::Equal);
    assert!(big("100000000000000000000") > big("99999999999999999999"));
  }

  #[test]
  fn narrowing() {
    assert_eq!(BigInt::from(i64::MIN).to_i64(), Some(i64::MIN));
    assert_eq!(BigInt::from(i64::MAX).to_i64(), Some(i64::MAX));
    assert_eq!(big("9223372036854775808").to_i64(), None);
    assert_eq!(big("-9223372036854775808").to_i64(), Some(i64::MIN));
    assert_eq!(big("-9223372036854775809").to_i64(), None);
    assert_eq!(big("-1").to_u64(), None);
    assert_eq!(BigInt::from_u64(u64::MAX).unwrap().to_u64(), Some(u64::MAX));
  }

  #[test]
  fn display_honours_padding() {
    assert_eq!(format!("{:>5}", big("-42")), "  -42");
    assert_eq!(format!("{:?}", big("17")), "BigInt(17)");
  }
}
