use std::fmt;

use crate::schema::{DataType, MAX_VARIABLE_LENGTH};

/// Type of a query-engine column, which also fixes how its literals are encoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EngineType {
    /// Carried as [`EngineValue::Boolean`](super::EngineValue::Boolean).
    Boolean,
    /// Carried as a widened long.
    TinyInt,
    /// Carried as a widened long.
    SmallInt,
    /// Carried as a widened long.
    Integer,
    /// Carried as a long.
    BigInt,
    /// Raw `f32` bits carried as a long.
    Real,
    /// Carried as a double.
    Double,
    /// Long unscaled value when short, otherwise `i128`.
    Decimal {
        /// Total number of digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// Padded character data, carried as a UTF-8 slice.
    Char(u32),
    /// Bounded or unbounded varchar.
    VarChar(Option<u32>),
    /// Carried as a byte slice.
    VarBinary,
    /// Days since the epoch, carried as a long.
    Date,
    /// Picoseconds of the day, carried as a long.
    Time(u8),
    /// Epoch micros when short, otherwise a [`LongTimestamp`](super::LongTimestamp).
    Timestamp(u8),
    /// Epoch millis when short, otherwise a packed
    /// [`LongTimestampWithTimeZone`](super::LongTimestampWithTimeZone).
    TimestampWithTimeZone(u8),
    /// Nested list.
    Array(Box<EngineType>),
    /// Nested map.
    Map(Box<EngineType>, Box<EngineType>),
    /// Nested struct.
    Row(Vec<EngineType>),
}

impl EngineType {
    /// Largest timestamp precision whose literals fit in a single `i64`.
    pub const MAX_SHORT_TIMESTAMP_PRECISION: u8 = 6;
    /// Largest timestamp-with-time-zone precision packed as plain epoch millis.
    pub const MAX_SHORT_TIMESTAMP_TZ_PRECISION: u8 = 3;
    /// Largest decimal precision whose unscaled value fits in a single `i64`.
    pub const MAX_SHORT_DECIMAL_PRECISION: u8 = 18;

    /// True when literals of this type are carried as a single `i64`.
    pub fn is_short(&self) -> bool {
        match self {
            EngineType::TinyInt
            | EngineType::SmallInt
            | EngineType::Integer
            | EngineType::BigInt
            | EngineType::Real
            | EngineType::Date
            | EngineType::Time(_) => true,
            EngineType::Decimal { precision, .. } => {
                *precision <= Self::MAX_SHORT_DECIMAL_PRECISION
            }
            EngineType::Timestamp(precision) => *precision <= Self::MAX_SHORT_TIMESTAMP_PRECISION,
            EngineType::TimestampWithTimeZone(precision) => {
                *precision <= Self::MAX_SHORT_TIMESTAMP_TZ_PRECISION
            }
            _ => false,
        }
    }
}

impl From<&DataType> for EngineType {
    fn from(data_type: &DataType) -> Self {
        match data_type {
            DataType::Boolean => EngineType::Boolean,
            DataType::TinyInt => EngineType::TinyInt,
            DataType::SmallInt => EngineType::SmallInt,
            DataType::Int => EngineType::Integer,
            DataType::BigInt => EngineType::BigInt,
            DataType::Float => EngineType::Real,
            DataType::Double => EngineType::Double,
            DataType::Decimal { precision, scale } => EngineType::Decimal {
                precision: *precision,
                scale: *scale,
            },
            DataType::Char(len) => EngineType::Char(*len),
            DataType::VarChar(len) if *len == MAX_VARIABLE_LENGTH => EngineType::VarChar(None),
            DataType::VarChar(len) => EngineType::VarChar(Some(*len)),
            DataType::Binary(_) | DataType::VarBinary(_) => EngineType::VarBinary,
            DataType::Date => EngineType::Date,
            DataType::Time(precision) => EngineType::Time(*precision),
            DataType::Timestamp(precision) => EngineType::Timestamp(*precision),
            DataType::LocalZonedTimestamp(precision) => {
                EngineType::TimestampWithTimeZone(*precision)
            }
            DataType::Array(element) => EngineType::Array(Box::new(element.as_ref().into())),
            DataType::Map(key, value) => {
                EngineType::Map(Box::new(key.as_ref().into()), Box::new(value.as_ref().into()))
            }
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineType::Boolean => f.write_str("boolean"),
            EngineType::TinyInt => f.write_str("tinyint"),
            EngineType::SmallInt => f.write_str("smallint"),
            EngineType::Integer => f.write_str("integer"),
            EngineType::BigInt => f.write_str("bigint"),
            EngineType::Real => f.write_str("real"),
            EngineType::Double => f.write_str("double"),
            EngineType::Decimal { precision, scale } => write!(f, "decimal({precision},{scale})"),
            EngineType::Char(len) => write!(f, "char({len})"),
            EngineType::VarChar(Some(len)) => write!(f, "varchar({len})"),
            EngineType::VarChar(None) => f.write_str("varchar"),
            EngineType::VarBinary => f.write_str("varbinary"),
            EngineType::Date => f.write_str("date"),
            EngineType::Time(precision) => write!(f, "time({precision})"),
            EngineType::Timestamp(precision) => write!(f, "timestamp({precision})"),
            EngineType::TimestampWithTimeZone(precision) => {
                write!(f, "timestamp({precision}) with time zone")
            }
            EngineType::Array(element) => write!(f, "array({element})"),
            EngineType::Map(key, value) => write!(f, "map({key}, {value})"),
            EngineType::Row(fields) => {
                f.write_str("row(")?;
                for (idx, field) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
        }
    }
}
