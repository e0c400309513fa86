use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::object::lookup_str;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("invalid quantity {0:?}")]
    InvalidQuantity(String),
    #[error("unknown suffix {0:?}")]
    UnknownSuffix(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Float(f64),
    Int(i128),
}

impl Scalar {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Float(value) => value,
            Self::Int(value) => value as f64,
        }
    }
}

const DECIMAL_UNITS: [(i128, &str); 7] = [
    (1_000_000_000_000_000_000, "E"),
    (1_000_000_000_000_000, "P"),
    (1_000_000_000_000, "T"),
    (1_000_000_000, "G"),
    (1_000_000, "M"),
    (1_000, "k"),
    (1, ""),
];

const BINARY_UNITS: [(i128, &str); 7] = [
    (1_i128 << 60, "Ei"),
    (1_i128 << 50, "Pi"),
    (1_i128 << 40, "Ti"),
    (1_i128 << 30, "Gi"),
    (1_i128 << 20, "Mi"),
    (1_i128 << 10, "Ki"),
    (1, ""),
];

// Scan backward past the last character that can belong to the numeric
// literal; a string with no numeric part at all has no suffix.
fn find_suffix(quantity: &str) -> &str {
    match quantity.rfind(|c: char| c.is_ascii_digit() || c == '.') {
        Some(ix) => &quantity[ix + 1..],
        None => "",
    }
}

pub fn parse_quantity(quantity: &str) -> Result<Scalar, QuantityError> {
    if quantity.is_empty() {
        return Ok(Scalar::Float(0.0));
    }

    let suffix = find_suffix(quantity);
    let number = &quantity[..quantity.len() - suffix.len()];

    match suffix {
        "" => parse_float(quantity, 1.0),
        "n" => parse_float(number, 1_000_000_000.0),
        "u" => parse_float(number, 1_000_000.0),
        "m" => parse_float(number, 1_000.0),
        "k" => parse_int(number, 1_000),
        "M" => parse_int(number, 1_000_000),
        "G" => parse_int(number, 1_000_000_000),
        "T" => parse_int(number, 1_000_000_000_000),
        "P" => parse_int(number, 1_000_000_000_000_000),
        "E" => parse_int(number, 1_000_000_000_000_000_000),
        "Ki" => parse_int(number, 1_i128 << 10),
        "Mi" => parse_int(number, 1_i128 << 20),
        "Gi" => parse_int(number, 1_i128 << 30),
        "Ti" => parse_int(number, 1_i128 << 40),
        "Pi" => parse_int(number, 1_i128 << 50),
        "Ei" => parse_int(number, 1_i128 << 60),
        other => Err(QuantityError::UnknownSuffix(other.to_string())),
    }
}

fn parse_float(number: &str, divisor: f64) -> Result<Scalar, QuantityError> {
    let value = number
        .parse::<f64>()
        .map_err(|_| QuantityError::InvalidQuantity(number.to_string()))?;
    if !value.is_finite() {
        return Err(QuantityError::InvalidQuantity(number.to_string()));
    }
    Ok(Scalar::Float(value / divisor))
}

// Fractional literals with a multiplicative suffix fail here rather than
// silently truncating; so does anything that would overflow i128.
fn parse_int(number: &str, multiplier: i128) -> Result<Scalar, QuantityError> {
    let value = number
        .parse::<i128>()
        .map_err(|_| QuantityError::InvalidQuantity(number.to_string()))?;
    value
        .checked_mul(multiplier)
        .map(Scalar::Int)
        .ok_or_else(|| QuantityError::InvalidQuantity(number.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledValue {
    pub value: f64,
    pub unit: &'static str,
}

pub fn format_with_decimal_prefix(value: i128) -> ScaledValue {
    scale(value, &DECIMAL_UNITS)
}

pub fn format_with_binary_prefix(value: i128) -> ScaledValue {
    scale(value, &BINARY_UNITS)
}

fn scale(value: i128, units: &[(i128, &'static str)]) -> ScaledValue {
    for (threshold, unit) in units.iter().copied() {
        if value >= threshold {
            return ScaledValue {
                value: value as f64 / threshold as f64,
                unit,
            };
        }
    }
    ScaledValue {
        value: value as f64,
        unit: "",
    }
}

// Null in, null out; a malformed quantity degrades the one cell that reads
// it and leaves a trace in the log.
pub fn scalar_at(object: &Value, path: &[&str]) -> Option<Scalar> {
    let text = lookup_str(object, path)?;
    match parse_quantity(text) {
        Ok(scalar) => Some(scalar),
        Err(error) => {
            warn!(%error, path = %path.join("."), "dropping unparseable quantity");
            None
        }
    }
}

pub fn ratio(numerator: Option<Scalar>, denominator: Option<Scalar>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(numerator), Some(denominator)) => Some(numerator.as_f64() / denominator.as_f64()),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    pub value: i64,
    pub unit: TimeUnit,
}

// Approximate bucketing on purpose: months are days/30 and years days/365,
// not calendar-exact.
pub fn relative_time(now_ms: i64, timestamp_ms: i64) -> RelativeTime {
    let timestamp_ms = timestamp_ms.max(0);

    let seconds = (now_ms - timestamp_ms).div_euclid(1_000);
    if seconds < 60 {
        return RelativeTime {
            value: seconds,
            unit: TimeUnit::Second,
        };
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return RelativeTime {
            value: minutes,
            unit: TimeUnit::Minute,
        };
    }

    let hours = minutes / 60;
    if hours < 24 {
        return RelativeTime {
            value: hours,
            unit: TimeUnit::Hour,
        };
    }

    let days = hours / 24;
    if days < 7 {
        return RelativeTime {
            value: days,
            unit: TimeUnit::Day,
        };
    }

    let weeks = days / 7;
    if weeks < 5 {
        return RelativeTime {
            value: weeks,
            unit: TimeUnit::Week,
        };
    }

    let months = days / 30;
    if months < 12 {
        return RelativeTime {
            value: months,
            unit: TimeUnit::Month,
        };
    }

    RelativeTime {
        value: days / 365,
        unit: TimeUnit::Year,
    }
}
