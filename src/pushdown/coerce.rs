//! Engine literal to storage literal coercion.
//!
//! Dispatch is on the domain's declared [`EngineType`]; the literal is then
//! destructured for that type's encoding.

use std::str::Utf8Error;

use lakefilter_predicate::{Decimal, ScalarValue, Timestamp};
use thiserror::Error;

use crate::engine::{EngineType, EngineValue};

const MICROSECONDS_PER_MILLISECOND: i64 = 1_000;
const NANOSECONDS_PER_MICROSECOND: i64 = 1_000;
const PICOSECONDS_PER_NANOSECOND: u32 = 1_000;
const PICOSECONDS_PER_MILLISECOND: i64 = 1_000_000_000;

/// Failure to turn one engine literal into a storage literal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    /// The engine type has no storage literal.
    #[error("no storage literal for engine type {0}")]
    UnsupportedType(EngineType),
    /// The literal is not in the encoding its engine type requires.
    #[error("expected a {expected} literal, got {actual}")]
    LiteralMismatch {
        /// Required encoding.
        expected: &'static str,
        /// Encoding received.
        actual: &'static str,
    },
    /// A widened integer does not fit the narrower type.
    #[error("value {value} does not fit {target}")]
    ValueOutOfRange {
        /// Offending value.
        value: i128,
        /// Type it was narrowed to.
        target: EngineType,
    },
    /// Character bytes are not UTF-8.
    #[error("character literal is not valid utf-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

/// Converts `value`, encoded as `engine_type`, into the storage literal.
pub fn coerce(engine_type: &EngineType, value: &EngineValue) -> Result<ScalarValue, CoerceError> {
    let scalar = match engine_type {
        EngineType::Boolean => ScalarValue::Boolean(expect_boolean(value)?),
        EngineType::TinyInt => ScalarValue::TinyInt(narrow(expect_long(value)?, engine_type)?),
        EngineType::SmallInt => ScalarValue::SmallInt(narrow(expect_long(value)?, engine_type)?),
        EngineType::Integer => ScalarValue::Int(narrow(expect_long(value)?, engine_type)?),
        EngineType::BigInt => ScalarValue::BigInt(expect_long(value)?),
        EngineType::Real => {
            // Raw float bits widened to a long.
            let bits: i32 = narrow(expect_long(value)?, engine_type)?;
            ScalarValue::Float(f32::from_bits(bits as u32))
        }
        EngineType::Double => match value {
            EngineValue::Double(v) => ScalarValue::Double(*v),
            other => return Err(mismatch("double", other)),
        },
        EngineType::Decimal { precision, scale } => {
            let unscaled = if engine_type.is_short() {
                i128::from(expect_long(value)?)
            } else {
                match value {
                    EngineValue::Int128(v) => *v,
                    other => return Err(mismatch("int128", other)),
                }
            };
            ScalarValue::Decimal(Decimal::from_unscaled(unscaled, *precision, *scale))
        }
        EngineType::Char(_) | EngineType::VarChar(_) => {
            ScalarValue::String(std::str::from_utf8(expect_slice(value)?)?.to_owned())
        }
        EngineType::VarBinary => ScalarValue::Binary(expect_slice(value)?.to_vec()),
        EngineType::Date => ScalarValue::Date(narrow(expect_long(value)?, engine_type)?),
        EngineType::Time(_) => {
            let picos = expect_long(value)?;
            ScalarValue::Time(narrow(picos / PICOSECONDS_PER_MILLISECOND, engine_type)?)
        }
        EngineType::Timestamp(_) => {
            let (epoch_micros, picos_of_micro) = if engine_type.is_short() {
                (expect_long(value)?, 0)
            } else {
                match value {
                    EngineValue::LongTimestamp(ts) => (ts.epoch_micros(), ts.picos_of_micro()),
                    other => return Err(mismatch("long timestamp", other)),
                }
            };
            ScalarValue::Timestamp(timestamp_from_micros(epoch_micros, picos_of_micro))
        }
        EngineType::TimestampWithTimeZone(_) => {
            // Only the absolute instant matters for filtering; the zone is dropped.
            let timestamp = if engine_type.is_short() {
                Timestamp::from_epoch_millis(expect_long(value)?)
            } else {
                match value {
                    EngineValue::LongTimestampWithTimeZone(ts) => {
                        Timestamp::from_epoch_millis_and_nanos(
                            ts.epoch_millis(),
                            ts.picos_of_milli() / PICOSECONDS_PER_NANOSECOND,
                        )
                    }
                    other => return Err(mismatch("long timestamp with time zone", other)),
                }
            };
            ScalarValue::Timestamp(timestamp)
        }
        EngineType::Array(_) | EngineType::Map(..) | EngineType::Row(_) => {
            return Err(CoerceError::UnsupportedType(engine_type.clone()))
        }
    };
    Ok(scalar)
}

/// Floors to the millisecond and keeps the rest as nanoseconds, so negative
/// instants stay exact. Sub-nanosecond picos are dropped.
fn timestamp_from_micros(epoch_micros: i64, picos_of_micro: u32) -> Timestamp {
    let millis = epoch_micros.div_euclid(MICROSECONDS_PER_MILLISECOND);
    let micros_of_milli = epoch_micros.rem_euclid(MICROSECONDS_PER_MILLISECOND);
    let nanos = micros_of_milli * NANOSECONDS_PER_MICROSECOND
        + i64::from(picos_of_micro / PICOSECONDS_PER_NANOSECOND);
    // rem_euclid keeps nanos in 0..1_000_000
    Timestamp::from_epoch_millis_and_nanos(millis, nanos as u32)
}

fn mismatch(expected: &'static str, actual: &EngineValue) -> CoerceError {
    CoerceError::LiteralMismatch {
        expected,
        actual: actual.kind_name(),
    }
}

fn expect_long(value: &EngineValue) -> Result<i64, CoerceError> {
    match value {
        EngineValue::Long(v) => Ok(*v),
        other => Err(mismatch("long", other)),
    }
}

fn expect_boolean(value: &EngineValue) -> Result<bool, CoerceError> {
    match value {
        EngineValue::Boolean(v) => Ok(*v),
        other => Err(mismatch("boolean", other)),
    }
}

fn expect_slice(value: &EngineValue) -> Result<&[u8], CoerceError> {
    match value {
        EngineValue::Slice(bytes) => Ok(bytes),
        other => Err(mismatch("slice", other)),
    }
}

fn narrow<T>(value: i64, target: &EngineType) -> Result<T, CoerceError>
where
    T: TryFrom<i64>,
{
    T::try_from(value).map_err(|_| CoerceError::ValueOutOfRange {
        value: i128::from(value),
        target: target.clone(),
    })
}
