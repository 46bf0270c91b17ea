use std::{cmp::Ordering, fmt};

/// Millisecond-resolution instant with an optional sub-millisecond part.
///
/// Instants are absolute: time-zone information is never stored here, so two
/// timestamps compare equal exactly when they denote the same point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    millisecond: i64,
    nano_of_millisecond: u32,
}

impl Timestamp {
    /// Nanoseconds in one millisecond.
    pub const NANOS_PER_MILLISECOND: u32 = 1_000_000;

    /// Creates a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub const fn from_epoch_millis(millisecond: i64) -> Self {
        Self {
            millisecond,
            nano_of_millisecond: 0,
        }
    }

    /// Creates a timestamp from epoch milliseconds plus a nanosecond fraction.
    ///
    /// # Panics
    ///
    /// Panics if `nano_of_millisecond` does not fit within one millisecond.
    #[must_use]
    pub fn from_epoch_millis_and_nanos(millisecond: i64, nano_of_millisecond: u32) -> Self {
        assert!(
            nano_of_millisecond < Self::NANOS_PER_MILLISECOND,
            "nano_of_millisecond must be below one millisecond"
        );
        Self {
            millisecond,
            nano_of_millisecond,
        }
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn epoch_millis(&self) -> i64 {
        self.millisecond
    }

    /// Nanoseconds past [`Timestamp::epoch_millis`].
    #[must_use]
    pub const fn nano_of_millisecond(&self) -> u32 {
        self.nano_of_millisecond
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nano_of_millisecond == 0 {
            write!(f, "ts:{}ms", self.millisecond)
        } else {
            write!(f, "ts:{}ms+{}ns", self.millisecond, self.nano_of_millisecond)
        }
    }
}

/// Fixed-point decimal stored as an unscaled integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: i128,
    precision: u8,
    scale: u8,
}

impl Decimal {
    /// Creates a decimal from its unscaled value, precision and scale.
    #[must_use]
    pub const fn from_unscaled(unscaled: i128, precision: u8, scale: u8) -> Self {
        Self {
            unscaled,
            precision,
            scale,
        }
    }

    /// Unscaled integer value.
    #[must_use]
    pub const fn unscaled(&self) -> i128 {
        self.unscaled
    }

    /// Total number of decimal digits.
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// Digits to the right of the decimal point.
    #[must_use]
    pub const fn scale(&self) -> u8 {
        self.scale
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.unscaled);
        }
        let divisor = 10i128.pow(u32::from(self.scale));
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let magnitude = self.unscaled.unsigned_abs();
        let divisor = divisor.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:0width$}",
            magnitude / divisor,
            magnitude % divisor,
            width = usize::from(self.scale)
        )
    }
}

/// Literal values carried by predicate leaves, in storage representation.
///
/// Predicates never carry `NULL` literals; null checks are expressed with
/// dedicated leaves instead.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// Boolean literal.
    Boolean(bool),
    /// Signed 8-bit integer.
    TinyInt(i8),
    /// Signed 16-bit integer.
    SmallInt(i16),
    /// Signed 32-bit integer.
    Int(i32),
    /// Signed 64-bit integer.
    BigInt(i64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// Fixed-point decimal.
    Decimal(Decimal),
    /// UTF-8 text.
    String(String),
    /// Binary blob.
    Binary(Vec<u8>),
    /// Days since the Unix epoch.
    Date(i32),
    /// Milliseconds of the day.
    Time(i32),
    /// Absolute instant.
    Timestamp(Timestamp),
}

impl ScalarValue {
    /// Compares this scalar with another, returning the ordering when both sides are comparable.
    ///
    /// Only literals of the same variant compare; decimals must also share a scale.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        use ScalarValue::*;
        match (self, other) {
            (Boolean(lhs), Boolean(rhs)) => Some(lhs.cmp(rhs)),
            (TinyInt(lhs), TinyInt(rhs)) => Some(lhs.cmp(rhs)),
            (SmallInt(lhs), SmallInt(rhs)) => Some(lhs.cmp(rhs)),
            (Int(lhs), Int(rhs)) => Some(lhs.cmp(rhs)),
            (BigInt(lhs), BigInt(rhs)) => Some(lhs.cmp(rhs)),
            (Float(lhs), Float(rhs)) => lhs.partial_cmp(rhs),
            (Double(lhs), Double(rhs)) => lhs.partial_cmp(rhs),
            (Decimal(lhs), Decimal(rhs)) if lhs.scale() == rhs.scale() => {
                Some(lhs.unscaled().cmp(&rhs.unscaled()))
            }
            (String(lhs), String(rhs)) => Some(lhs.cmp(rhs)),
            (Binary(lhs), Binary(rhs)) => Some(lhs.cmp(rhs)),
            (Date(lhs), Date(rhs)) => Some(lhs.cmp(rhs)),
            (Time(lhs), Time(rhs)) => Some(lhs.cmp(rhs)),
            (Timestamp(lhs), Timestamp(rhs)) => Some(lhs.cmp(rhs)),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Boolean(value) => write!(f, "{value}"),
            ScalarValue::TinyInt(value) => write!(f, "{value}"),
            ScalarValue::SmallInt(value) => write!(f, "{value}"),
            ScalarValue::Int(value) => write!(f, "{value}"),
            ScalarValue::BigInt(value) => write!(f, "{value}"),
            ScalarValue::Float(value) => write!(f, "{value}"),
            ScalarValue::Double(value) => write!(f, "{value}"),
            ScalarValue::Decimal(value) => write!(f, "{value}"),
            ScalarValue::String(value) => write!(f, "'{value}'"),
            ScalarValue::Binary(value) => {
                f.write_str("x'")?;
                for byte in value {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("'")
            }
            ScalarValue::Date(value) => write!(f, "date:{value}"),
            ScalarValue::Time(value) => write!(f, "time:{value}ms"),
            ScalarValue::Timestamp(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<i8> for ScalarValue {
    fn from(value: i8) -> Self {
        ScalarValue::TinyInt(value)
    }
}

impl From<i16> for ScalarValue {
    fn from(value: i16) -> Self {
        ScalarValue::SmallInt(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::BigInt(value)
    }
}

impl From<f32> for ScalarValue {
    fn from(value: f32) -> Self {
        ScalarValue::Float(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Double(value)
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::String(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::String(value.to_owned())
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(value: Vec<u8>) -> Self {
        ScalarValue::Binary(value)
    }
}

impl From<&[u8]> for ScalarValue {
    fn from(value: &[u8]) -> Self {
        ScalarValue::Binary(value.to_vec())
    }
}

impl From<Timestamp> for ScalarValue {
    fn from(value: Timestamp) -> Self {
        ScalarValue::Timestamp(value)
    }
}

impl From<Decimal> for ScalarValue {
    fn from(value: Decimal) -> Self {
        ScalarValue::Decimal(value)
    }
}
