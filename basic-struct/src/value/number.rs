use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use ordered_float::OrderedFloat;

/// A numeric field value.
///
/// Integers and floats are one numeric kind: they compare and hash
/// numerically across variants, so `Number::from(2)` and `Number::from(2.0)`
/// are equal and hash identically. NaN is admitted, equal to itself, and
/// ordered after every other number, giving a total order.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Float(OrderedFloat<f64>),
}

/// `2^63` as an `f64`; the smallest float strictly greater than every `i64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

impl Number {
    /// Returns the numeric value as an `i64` if it is an integer or an
    /// integral float in range.
    pub fn as_i64(self) -> Option<i64> {
        match self.canonical() {
            Canonical::Int(value) => Some(value),
            Canonical::Float(_) => None,
        }
    }

    /// Returns the numeric value as an `f64`, rounding large integers.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value.into_inner(),
        }
    }

    /// The representation equality and hashing agree on: integral floats in
    /// `i64` range collapse to their integer form.
    fn canonical(self) -> Canonical {
        match self {
            Self::Int(value) => Canonical::Int(value),
            Self::Float(value) => {
                let float = value.into_inner();
                if float.fract() == 0.0 && float >= -I64_END && float < I64_END {
                    Canonical::Int(float as i64)
                } else {
                    Canonical::Float(value)
                }
            }
        }
    }
}

enum Canonical {
    Int(i64),
    Float(OrderedFloat<f64>),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(OrderedFloat(value))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(lhs), Self::Int(rhs)) => lhs.cmp(rhs),
            (Self::Float(lhs), Self::Float(rhs)) => lhs.cmp(rhs),
            (Self::Int(lhs), Self::Float(rhs)) => cmp_int_float(*lhs, rhs.into_inner()),
            (Self::Float(lhs), Self::Int(rhs)) => cmp_int_float(*rhs, lhs.into_inner()).reverse(),
        }
    }
}

/// Compares an integer to a float without rounding the integer.
///
/// NaN sorts after every integer, matching [`OrderedFloat`]'s total order.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() || float >= I64_END {
        return Ordering::Less;
    }
    if float < -I64_END {
        return Ordering::Greater;
    }

    match int.cmp(&(float.trunc() as i64)) {
        Ordering::Equal if float.fract() > 0.0 => Ordering::Less,
        Ordering::Equal if float.fract() < 0.0 => Ordering::Greater,
        ordering => ordering,
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.canonical() {
            Canonical::Int(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            Canonical::Float(value) => {
                1u8.hash(state);
                value.hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{:?}", value.into_inner()),
        }
    }
}
