//! Money in whole currency units.
//!
//! Every authored price in the catalog is a whole number of pounds, so amounts
//! are plain `u64` values and never pass through floating point.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};
use serde::{Deserialize, Serialize};

/// ISO currency of an amount. The catalog is authored in GBP only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Gbp,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Gbp => "£",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
        }
    }
}

/// An amount in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtraction that stops at zero (savings, remaining balances).
    pub fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }

    /// Grouped amount with symbol: `£68,000`.
    pub fn display(self, currency: Currency) -> String {
        format!("{}{}", currency.symbol(), group_thousands(self.0))
    }

    /// Compact amount used by range presets: `£10k`, `£500`.
    pub fn compact(self, currency: Currency) -> String {
        if self.0 >= 1000 {
            // Rounded to the nearest thousand, like the slider labels.
            format!("{}{}k", currency.symbol(), (self.0 + 500) / 1000)
        } else {
            format!("{}{}", currency.symbol(), self.0)
        }
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.display(Currency::Gbp))
    }
}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
