//! Query-engine side of the pushdown boundary: engine types, their literal
//! encodings, and column domains.

mod domain;
mod types;
mod value;

pub use domain::{Bound, ColumnHandle, DiscreteValues, Domain, Range, TupleDomain, ValueSet};
pub use types::EngineType;
pub use value::{EngineValue, LongTimestamp, LongTimestampWithTimeZone, TimeZoneKey, UTC_KEY};
