//! Fixed-point value type: an arbitrary-precision integer paired with an
//! explicit decimal exponent.
//!
//! The exponent is data, not context. Adding, subtracting, or comparing two
//! values with different exponents is a contract violation and returns
//! `ScaleError::DecimalMismatch`; crossing exponents requires an explicit
//! `rescale` or one of the conversion functions in `engine::convert`.
//! Division truncates toward zero everywhere.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Violation of the decimal-exponent contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("decimal exponent mismatch: {left} vs {right}")]
    DecimalMismatch { left: u32, right: u32 },
}

/// `10^decimals` as a big integer.
pub fn pow10(decimals: u32) -> BigInt {
    num_traits::pow(BigInt::from(10), decimals as usize)
}

/// An integer scaled by `10^decimals`.
///
/// `ScaledAmount::expand(5, 6)` is five whole units of a 6-decimal token,
/// stored as `5_000_000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaledAmount {
    #[serde(with = "bigint_str")]
    value: BigInt,
    decimals: u32,
}

impl ScaledAmount {
    /// Wrap a raw scaled integer.
    pub fn new(value: BigInt, decimals: u32) -> Self {
        ScaledAmount { value, decimals }
    }

    /// Zero at the given exponent.
    pub fn zero(decimals: u32) -> Self {
        ScaledAmount {
            value: BigInt::zero(),
            decimals,
        }
    }

    /// One whole unit (`10^decimals`).
    pub fn unit(decimals: u32) -> Self {
        ScaledAmount {
            value: pow10(decimals),
            decimals,
        }
    }

    /// Lift a bare integer into `decimals`-decimal representation:
    /// `n * 10^decimals`.
    pub fn expand(n: i128, decimals: u32) -> Self {
        ScaledAmount {
            value: BigInt::from(n) * pow10(decimals),
            decimals,
        }
    }

    /// Wrap a raw scaled integer given as `i128`.
    pub fn from_raw(value: i128, decimals: u32) -> Self {
        ScaledAmount {
            value: BigInt::from(value),
            decimals,
        }
    }

    /// The raw scaled integer.
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// The decimal exponent.
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.value.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    /// Absolute value at the same exponent.
    pub fn abs(&self) -> Self {
        ScaledAmount {
            value: self.value.abs(),
            decimals: self.decimals,
        }
    }

    /// Negation at the same exponent.
    pub fn neg(&self) -> Self {
        ScaledAmount {
            value: -&self.value,
            decimals: self.decimals,
        }
    }

    fn require_same_exponent(&self, rhs: &Self) -> Result<(), ScaleError> {
        if self.decimals != rhs.decimals {
            return Err(ScaleError::DecimalMismatch {
                left: self.decimals,
                right: rhs.decimals,
            });
        }
        Ok(())
    }

    /// Sum of two values at the same exponent.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, ScaleError> {
        self.require_same_exponent(rhs)?;
        Ok(ScaledAmount {
            value: &self.value + &rhs.value,
            decimals: self.decimals,
        })
    }

    /// Difference of two values at the same exponent.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, ScaleError> {
        self.require_same_exponent(rhs)?;
        Ok(ScaledAmount {
            value: &self.value - &rhs.value,
            decimals: self.decimals,
        })
    }

    /// Ordering of two values at the same exponent.
    pub fn try_cmp(&self, rhs: &Self) -> Result<Ordering, ScaleError> {
        self.require_same_exponent(rhs)?;
        Ok(self.value.cmp(&rhs.value))
    }

    /// The larger of two values at the same exponent.
    pub fn checked_max(&self, rhs: &Self) -> Result<Self, ScaleError> {
        Ok(match self.try_cmp(rhs)? {
            Ordering::Less => rhs.clone(),
            _ => self.clone(),
        })
    }

    /// Re-express this value at a different exponent.
    ///
    /// Upscaling is exact; downscaling truncates toward zero.
    pub fn rescale(&self, decimals: u32) -> Self {
        if decimals == self.decimals {
            return self.clone();
        }
        let value = if decimals > self.decimals {
            &self.value * pow10(decimals - self.decimals)
        } else {
            &self.value / pow10(self.decimals - decimals)
        };
        ScaledAmount { value, decimals }
    }
}

impl fmt::Display for ScaledAmount {
    /// Canonical decimal rendering: no exponent notation, trailing fraction
    /// zeros trimmed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.value.is_negative() { "-" } else { "" };
        let digits = self.value.abs().to_string();
        let d = self.decimals as usize;
        let (int_part, frac_part) = if digits.len() > d {
            let split = digits.len() - d;
            (digits[..split].to_string(), digits[split..].to_string())
        } else {
            ("0".to_string(), format!("{:0>width$}", digits, width = d))
        };
        let frac_trimmed = frac_part.trim_end_matches('0');
        if frac_trimmed.is_empty() {
            write!(f, "{}{}", sign, int_part)
        } else {
            write!(f, "{}{}.{}", sign, int_part, frac_trimmed)
        }
    }
}

/// Serde helpers encoding big integers as base-10 strings.
pub mod bigint_str {
    use num_bigint::BigInt;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let s = String::deserialize(deserializer)?;
        BigInt::from_str(&s).map_err(de::Error::custom)
    }
}

/// Like [`bigint_str`], for optional fields.
pub mod bigint_str_opt {
    use num_bigint::BigInt;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(
        value: &Option<BigInt>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigInt>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) => BigInt::from_str(&s).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
