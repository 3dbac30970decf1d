use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// A PKO value that remembers whether it was written as an integer or a
/// float.
///
/// The distinction is part of the canonical transaction string: `10` and
/// `10.0` render differently and therefore hash differently. Arithmetic
/// follows the usual numeric promotion rules (int + int stays an int,
/// anything involving a float becomes a float), and floats render in their
/// shortest round-trip form with a trailing `.0` when whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Int(i64),
    Float(f64),
}

impl Amount {
    pub const ZERO: Amount = Amount::Int(0);

    pub fn as_f64(&self) -> f64 {
        match *self {
            Amount::Int(value) => value as f64,
            Amount::Float(value) => value,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.as_f64() < 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.as_f64().is_finite()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        match (self, rhs) {
            (Amount::Int(a), Amount::Int(b)) => match a.checked_add(b) {
                Some(sum) => Amount::Int(sum),
                None => Amount::Float(a as f64 + b as f64),
            },
            (a, b) => Amount::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Int(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::Int(i64::from(value))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount::Int(i64::from(value))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Float(value)
    }
}

impl FromStr for Amount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<i64>() {
            return Ok(Amount::Int(value));
        }
        s.parse::<f64>()
            .map(Amount::Float)
            .map_err(|e| format!("Invalid amount {s:?}: {e}"))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Amount::Int(value) => write!(f, "{value}"),
            Amount::Float(value) => write_float(f, value),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return write!(f, "nan");
    }
    if value.is_infinite() {
        return write!(f, "{}", if value < 0.0 { "-inf" } else { "inf" });
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        // scientific form: at least two exponent digits, explicit sign
        let rendered = format!("{value:e}");
        let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return write!(f, "{mantissa}e{sign}{digits:0>2}");
    }

    if value.fract() == 0.0 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}
