use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub},
    str::FromStr,
};

use crate::EngineError;

/// Signed money amount represented as **integer kuruş** (1/100 TL).
///
/// Use this type for every amount in the planner (line items, totals, net
/// balance) so sums never drift the way floating point does.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34 TL");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    /// Largest magnitude accepted from input or the wire: one trillion TL.
    pub const MAX: Money = Money(100_000_000_000_000);

    /// Creates a new amount from minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts a decimal amount as sent by the API (JSON number) into minor
    /// units, rounding to the nearest kuruş.
    pub fn from_major(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "non-finite amount: {value}"
            )));
        }
        let minor = (value * 100.0).round();
        if minor.abs() > Self::MAX.0 as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Self(minor as i64))
    }

    /// Decimal representation used on the wire.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses user input and rejects negative values.
    ///
    /// Line item amounts are always `>= 0`; the kind decides the sign.
    pub fn parse_non_negative(input: &str) -> Result<Self, EngineError> {
        let amount: Money = input.parse()?;
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must be >= 0".to_string(),
            ));
        }
        Ok(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let lira = abs / 100;
        let kurus = abs % 100;
        write!(f, "{sign}{lira}.{kurus:02} TL")
    }
}

/// Saturates at the `i64` bounds instead of wrapping.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - the sign must touch the digits (rejects `- 5`)
    /// - magnitude at most [`Money::MAX`]
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let whole_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if whole_str.is_empty() || !whole_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = whole_str.parse().map_err(|_| overflow())?;

        let frac: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .filter(|total| *total <= Self::MAX.0)
            .ok_or_else(overflow)?;

        Ok(Money(sign * total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_lira() {
        assert_eq!(Money::new(0).to_string(), "0.00 TL");
        assert_eq!(Money::new(5).to_string(), "0.05 TL");
        assert_eq!(Money::new(100_000).to_string(), "1000.00 TL");
        assert_eq!(Money::new(-1050).to_string(), "-10.50 TL");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("+1.00".parse::<Money>().unwrap().minor(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor(), 230);
        assert_eq!("7.".parse::<Money>().unwrap().minor(), 700);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("   ".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!(".5".parse::<Money>().is_err());
        assert!("- 5".parse::<Money>().is_err());
        assert!("+ 5".parse::<Money>().is_err());
    }

    #[test]
    fn parse_caps_magnitude() {
        assert_eq!("1000000000000".parse::<Money>().unwrap(), Money::MAX);
        assert!("1000000000000.01".parse::<Money>().is_err());
        assert!("92233720368547758".parse::<Money>().is_err());
        assert!(Money::from_major(1.0e13).is_err());
    }

    #[test]
    fn arithmetic_saturates() {
        let big = Money::new(i64::MAX - 1);
        assert_eq!(big + Money::new(10), Money::new(i64::MAX));
        assert_eq!(Money::new(i64::MIN + 1) - Money::new(10), Money::new(i64::MIN));
    }

    #[test]
    fn parse_non_negative_rejects_negative() {
        assert!(Money::parse_non_negative("-1").is_err());
        assert_eq!(Money::parse_non_negative("0").unwrap(), Money::ZERO);
    }

    #[test]
    fn major_conversion_rounds_to_minor_units() {
        assert_eq!(Money::from_major(1000.0).unwrap().minor(), 100_000);
        assert_eq!(Money::from_major(0.1 + 0.2).unwrap().minor(), 30);
        assert_eq!(Money::new(40_050).to_major(), 400.5);
        assert!(Money::from_major(f64::NAN).is_err());
        assert!(Money::from_major(f64::INFINITY).is_err());
    }

    #[test]
    fn sums_over_iterators() {
        let total: Money = [Money::new(100), Money::new(250)].into_iter().sum();
        assert_eq!(total, Money::new(350));
    }
}
