//! Amount type for expense magnitudes
//!
//! Amounts are currency-agnostic, non-negative decimal quantities stored as
//! `f64` and persisted as bare JSON numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A non-negative, finite expense amount
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Create an amount, rejecting NaN, infinities and negative values
    pub fn new(value: f64) -> Result<Self, AmountParseError> {
        if !value.is_finite() {
            return Err(AmountParseError::NotFinite);
        }
        if value < 0.0 {
            return Err(AmountParseError::Negative(value));
        }
        // -0.0 passes the sign check
        if value == 0.0 {
            return Ok(Self::zero());
        }
        Ok(Self(value))
    }

    /// Whole-unit amount; always valid
    pub fn whole(units: u32) -> Self {
        Self(f64::from(units))
    }

    pub const fn zero() -> Self {
        Self(0.0)
    }

    pub const fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Parse an amount from user input
    ///
    /// Accepts plain decimal numbers such as "15", "15.5" or "0.75", with
    /// surrounding whitespace ignored.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let value: f64 = s
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;

        Self::new(value)
    }

    /// Format with a currency symbol, e.g. "₹1864" or "₹12.50"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
    NotFinite,
    Negative(f64),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Amount is required"),
            Self::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            Self::NotFinite => write!(f, "Amount must be a finite number"),
            Self::Negative(v) => write!(f, "Amount cannot be negative: {}", v),
        }
    }
}

impl std::error::Error for AmountParseError {}
