use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use thiserror::Error;

/// Monetary amount in integer cents. Prices travel through the system in
/// this form; the `$`-string representation exists only at the boundary
/// (CSV reference data in, JSON responses out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

#[derive(Debug, Error, PartialEq)]
#[error("invalid price {0:?}: expected '$' followed by a non-negative decimal")]
pub struct ParseMoneyError(pub String);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn zero() -> Self {
        Money(0)
    }

    // None on i64 overflow; amounts come from operator-supplied CSV, so
    // absurd values must surface instead of wrapping.
    pub fn checked_mul(self, count: i64) -> Option<Money> {
        self.0.checked_mul(count).map(Money)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    // Accepts "$10", "$10.5" and "$10.50". No sign, at most two decimals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError(s.to_string());

        let value = s.strip_prefix('$').ok_or_else(err)?;
        let (whole, frac) = match value.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (value, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let mut cents = whole
            .parse::<i64>()
            .ok()
            .and_then(|v| v.checked_mul(100))
            .ok_or_else(err)?;

        if let Some(frac) = frac {
            if frac.is_empty() || frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            let minor = frac.parse::<i64>().map_err(|_| err())?;
            let minor = if frac.len() == 1 { minor * 10 } else { minor };
            cents = cents.checked_add(minor).ok_or_else(err)?;
        }

        Ok(Money(cents))
    }
}

// Whole amounts render without a decimal part ("$70"), fractional ones
// with exactly two places ("$10.50").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dollars, cents) = (self.0 / 100, self.0 % 100);
        if cents == 0 {
            write!(f, "${dollars}")
        } else {
            write!(f, "${dollars}.{cents:02}")
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_and_decimal_forms() {
        assert_eq!("$10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("$10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("$10.50".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("$0.05".parse::<Money>().unwrap().cents(), 5);
        assert_eq!("$0".parse::<Money>().unwrap().cents(), 0);
    }

    #[test]
    fn rejects_malformed_prices() {
        for bad in ["10", "$-1", "$x", "$", "$10.", "$10.505", "$1 0", "-$1"] {
            assert!(bad.parse::<Money>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn formats_whole_amounts_without_decimals() {
        assert_eq!(Money::from_cents(7000).to_string(), "$70");
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(1005).to_string(), "$10.05");
        assert_eq!(Money::zero().to_string(), "$0");
    }

    #[test]
    fn arithmetic() {
        let total = Money::from_cents(1000).checked_mul(2).unwrap() + Money::from_cents(5000);
        assert_eq!(total.cents(), 7000);

        let mut sum = Money::zero();
        sum += Money::from_cents(1050);
        assert_eq!(sum.to_string(), "$10.50");
    }

    #[test]
    fn checked_arithmetic_surfaces_overflow() {
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
        assert_eq!(
            Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)),
            None
        );
        assert_eq!(
            Money::from_cents(100).checked_mul(3),
            Some(Money::from_cents(300))
        );
    }

    #[test]
    fn parse_rejects_amounts_beyond_i64_cents() {
        // whole part alone overflows once scaled to cents
        assert!("$92233720368547759".parse::<Money>().is_err());
        // fits in dollars but the minor part tips it over i64::MAX cents
        assert!("$92233720368547758.08".parse::<Money>().is_err());
        // largest representable amount still parses
        assert_eq!(
            "$92233720368547758.07".parse::<Money>().unwrap().cents(),
            i64::MAX
        );
    }
}
