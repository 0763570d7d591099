//! Kubernetes-style resource quantities.
//!
//! Only the forms the fleet descriptors use are accepted: millicore or
//! whole-core CPU, and binary-suffixed or plain-byte memory. Anything else is
//! rejected instead of being guessed at.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

const MEMORY_UNITS: [(&str, u64); 4] = [("Ti", TIB), ("Gi", GIB), ("Mi", MIB), ("Ki", KIB)];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("empty quantity")]
    Empty,
    #[error("invalid number in quantity {0:?}")]
    InvalidNumber(String),
    #[error("unsupported unit {suffix:?} in quantity {input:?}")]
    UnsupportedSuffix { input: String, suffix: String },
}

/// Split `"512Mi"` into `("512", "Mi")`.
fn split_number(input: &str) -> (&str, &str) {
    let idx = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    input.split_at(idx)
}

fn parse_non_negative(number: &str, input: &str) -> Result<f64, QuantityError> {
    let value: f64 = number
        .parse()
        .map_err(|_| QuantityError::InvalidNumber(input.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(QuantityError::InvalidNumber(input.to_string()));
    }
    Ok(value)
}

/// CPU amount in millicores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct CpuQuantity(u64);

impl CpuQuantity {
    pub const fn from_millicores(millicores: u64) -> Self {
        Self(millicores)
    }

    pub const fn millicores(&self) -> u64 {
        self.0
    }

    pub const fn scaled(&self, factor: u64) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl FromStr for CpuQuantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(QuantityError::Empty);
        }
        let (number, suffix) = split_number(input);
        if number.is_empty() {
            return Err(QuantityError::InvalidNumber(input.to_string()));
        }
        match suffix {
            "m" => number
                .parse::<u64>()
                .map(Self)
                .map_err(|_| QuantityError::InvalidNumber(input.to_string())),
            "" => {
                let cores = parse_non_negative(number, input)?;
                Ok(Self((cores * 1000.0).round() as u64))
            }
            other => Err(QuantityError::UnsupportedSuffix {
                input: input.to_string(),
                suffix: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CpuQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

/// Memory amount in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct MemoryQuantity(u64);

impl MemoryQuantity {
    pub const fn from_mib(mib: u64) -> Self {
        Self(mib.saturating_mul(MIB))
    }

    pub const fn from_gib(gib: u64) -> Self {
        Self(gib.saturating_mul(GIB))
    }

    pub const fn bytes(&self) -> u64 {
        self.0
    }

    pub fn as_gib(&self) -> f64 {
        self.0 as f64 / GIB as f64
    }
}

impl FromStr for MemoryQuantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(QuantityError::Empty);
        }
        let (number, suffix) = split_number(input);
        if number.is_empty() {
            return Err(QuantityError::InvalidNumber(input.to_string()));
        }
        if suffix.is_empty() {
            return number
                .parse::<u64>()
                .map(Self)
                .map_err(|_| QuantityError::InvalidNumber(input.to_string()));
        }
        let multiplier = MEMORY_UNITS
            .iter()
            .find(|(unit, _)| *unit == suffix)
            .map(|(_, multiplier)| *multiplier)
            .ok_or_else(|| QuantityError::UnsupportedSuffix {
                input: input.to_string(),
                suffix: suffix.to_string(),
            })?;
        let value = parse_non_negative(number, input)?;
        Ok(Self((value * multiplier as f64).round() as u64))
    }
}

impl fmt::Display for MemoryQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            for (unit, multiplier) in MEMORY_UNITS {
                if self.0 % multiplier == 0 {
                    return write!(f, "{}{unit}", self.0 / multiplier);
                }
            }
        }
        write!(f, "{}", self.0)
    }
}

macro_rules! quantity_serde {
    ($ty:ident, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct QuantityVisitor;

                impl Visitor<'_> for QuantityVisitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<$ty, E> {
                        v.parse().map_err(E::custom)
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<$ty, E> {
                        self.visit_str(&v.to_string())
                    }

                    fn visit_i64<E: de::Error>(self, v: i64) -> Result<$ty, E> {
                        self.visit_str(&v.to_string())
                    }

                    fn visit_f64<E: de::Error>(self, v: f64) -> Result<$ty, E> {
                        self.visit_str(&v.to_string())
                    }
                }

                deserializer.deserialize_any(QuantityVisitor)
            }
        }
    };
}

quantity_serde!(CpuQuantity, "a CPU quantity such as \"500m\" or \"2\"");
quantity_serde!(MemoryQuantity, "a memory quantity such as \"512Mi\" or \"2Gi\"");
