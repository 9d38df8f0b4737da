//! Monetary amounts.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Price of a single unit, in roubles.
///
/// Stored as a float because catalog prices arrive as free-form decimals
/// (`100.5`, `180000.0`). Rendering keeps a trailing `.0` on whole amounts so
/// catalog lines read `180000.0 руб.`, never `180000 руб.`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Only strictly positive prices may be written to a product.
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Value of `quantity` units at this price.
    pub fn times(self, quantity: u32) -> Price {
        Price(self.0 * f64::from(quantity))
    }

    pub fn max(self, other: Price) -> Price {
        if other.0 > self.0 { other } else { self }
    }
}

impl ValueObject for Price {}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl core::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

/// Decimal exponents outside `[-4, 16)` render in scientific notation.
const FIXED_EXPONENTS: core::ops::Range<i32> = -4..16;

// Shortest round-trip digits. Inside the fixed range whole amounts keep one
// decimal place; outside it the exponent is signed and at least two digits
// wide (`1e+16`, `1.5e-07`).
impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
        }

        let scientific = format!("{v:e}");
        let (mantissa, exponent) = match scientific.split_once('e') {
            Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
            None => (scientific.as_str(), 0),
        };

        if !FIXED_EXPONENTS.contains(&exponent) {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        } else if v.fract() == 0.0 {
            write!(f, "{v:.1}")
        } else {
            write!(f, "{v}")
        }
    }
}
