use std::{
    fmt,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::error::ParseErrorKind;

pub const MAX_WHOLE_DIGITS: usize = 3;

/// A decimal with exactly one fractional digit, stored as tenths.
///
/// Readings and their running sums share this type. All arithmetic stays on
/// the scaled integer so that a sum over billions of readings is exact.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Temperature(i64);

impl Temperature {
    pub const ZERO: Self = Self(0);

    pub const fn from_tenths(tenths: i64) -> Self {
        Self(tenths)
    }

    pub const fn tenths(self) -> i64 {
        self.0
    }

    /// Parses `-?[0-9]{1,3}(\.[0-9])?` in one left-to-right pass.
    #[inline(always)]
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseErrorKind> {
        let (negative, digits) = match bytes {
            [] => return Err(ParseErrorKind::EmptyTemperature),
            [b'-', rest @ ..] => (true, rest),
            _ => (false, bytes),
        };

        let mut value: i64 = 0;
        let mut whole_digits = 0;
        let mut seen_dot = false;
        let mut fraction_digits = 0;

        for &b in digits {
            match b {
                b'0'..=b'9' if seen_dot => {
                    if fraction_digits == 1 {
                        return Err(ParseErrorKind::ExtraFraction);
                    }
                    fraction_digits += 1;
                    value = value * 10 + (b - b'0') as i64;
                }
                b'0'..=b'9' => {
                    if whole_digits == MAX_WHOLE_DIGITS {
                        return Err(ParseErrorKind::TooManyDigits);
                    }
                    whole_digits += 1;
                    value = value * 10 + (b - b'0') as i64;
                }
                b'.' if seen_dot => return Err(ParseErrorKind::RepeatedDecimalPoint),
                b'.' => {
                    if whole_digits == 0 {
                        return Err(ParseErrorKind::MissingDigits);
                    }
                    seen_dot = true;
                }
                b'-' => return Err(ParseErrorKind::MisplacedSign),
                other => return Err(ParseErrorKind::InvalidByte(other)),
            }
        }

        if whole_digits == 0 {
            return Err(ParseErrorKind::MissingDigits);
        }
        match (seen_dot, fraction_digits) {
            (true, 0) => return Err(ParseErrorKind::MissingFraction),
            (false, _) => value *= 10,
            _ => {}
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Mean of `count` readings summing to `sum`, rounded half away from zero
    /// on the first discarded digit.
    pub fn mean(sum: Temperature, count: u64) -> Temperature {
        debug_assert!(count > 0, "mean of zero readings");
        let count = count as i128;
        let sum = sum.0 as i128;

        let mut tenths = sum / count;
        let rounding_digit = sum * 10 / count % 10;
        if rounding_digit >= 5 {
            tenths += 1;
        } else if rounding_digit <= -5 {
            tenths -= 1;
        }

        Self(tenths as i64)
    }
}

impl Add for Temperature {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Temperature {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl FromStr for Temperature {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}
