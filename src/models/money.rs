//! Money type for expense amounts
//!
//! Amounts are held as whole cents in an `i64`, so totals over any number of
//! expenses are exact. Derived figures (averages, percentages) are computed
//! from cents and rounded back to two decimals at the edge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A monetary amount stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create an amount from cents
    ///
    /// # Examples
    /// ```
    /// use spendtrack::models::Money;
    /// let amount = Money::from_cents(2550); // 25.50
    /// assert_eq!(amount.to_decimal(), 25.5);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create an amount from a decimal value, rounding to the nearest cent
    pub fn from_decimal(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// The zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount as a decimal number of currency units
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Divide by a count and round to the nearest cent (halves away from zero)
    ///
    /// Returns zero when the divisor is zero.
    pub fn div_round(&self, divisor: u32) -> Self {
        if divisor == 0 {
            return Self::zero();
        }
        Self((self.0 as f64 / divisor as f64).round() as i64)
    }

    /// This amount as a percentage of `whole`, rounded to two decimals
    ///
    /// Returns `0.0` unless `whole` is strictly positive.
    pub fn percent_of(&self, whole: Money) -> f64 {
        if !whole.is_positive() {
            return 0.0;
        }
        round2(self.0 as f64 / whole.0 as f64 * 100.0)
    }

    /// Parse an amount from user input
    ///
    /// Accepts "25.50", "$25.50", "25", "25.5" and a leading minus sign.
    /// More than two fraction digits, or an amount that does not fit in
    /// cents, is rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest).replace(',', "");

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (units, fraction) = rest.split_once('.').unwrap_or((rest.as_str(), ""));
        if !fraction.chars().all(|c| c.is_ascii_digit()) || fraction.len() > 2 {
            return Err(invalid());
        }
        if units.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let units: i64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| invalid())?
        };
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

/// Round to two decimal places, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Serialize `Money` as a decimal number (`37.5`) for presenter output
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        Ok(Money::from_decimal(f64::deserialize(deserializer)?))
    }

    /// Same as the parent module, for optional amounts (`null` stays `null`)
    pub mod option {
        use super::Money;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(money) => serializer.serialize_some(&money.to_decimal()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            Ok(Option::<f64>::deserialize(deserializer)?.map(Money::from_decimal))
        }
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
