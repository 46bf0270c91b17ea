/// Identifier of the session time zone a timestamp was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeZoneKey(pub u16);

/// Key of the UTC zone.
pub const UTC_KEY: TimeZoneKey = TimeZoneKey(0);

const PICOSECONDS_PER_MICROSECOND: u32 = 1_000_000;
const PICOSECONDS_PER_MILLISECOND: u32 = 1_000_000_000;

/// Timestamp literal for precisions finer than microseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LongTimestamp {
    epoch_micros: i64,
    picos_of_micro: u32,
}

impl LongTimestamp {
    /// Timestamp from epoch micros plus a picosecond fraction.
    ///
    /// # Panics
    ///
    /// Panics if `picos_of_micro` is not below one microsecond.
    pub fn new(epoch_micros: i64, picos_of_micro: u32) -> Self {
        assert!(
            picos_of_micro < PICOSECONDS_PER_MICROSECOND,
            "picos_of_micro must be below one microsecond"
        );
        Self {
            epoch_micros,
            picos_of_micro,
        }
    }

    /// Microseconds since the epoch.
    pub fn epoch_micros(&self) -> i64 {
        self.epoch_micros
    }

    /// Picoseconds past [`LongTimestamp::epoch_micros`].
    pub fn picos_of_micro(&self) -> u32 {
        self.picos_of_micro
    }
}

/// Packed timestamp-with-time-zone literal used above millisecond precision.
///
/// The instant is absolute; the zone key only affects rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LongTimestampWithTimeZone {
    epoch_millis: i64,
    picos_of_milli: u32,
    time_zone_key: TimeZoneKey,
}

impl LongTimestampWithTimeZone {
    /// Packs an instant and the zone it was written in.
    ///
    /// # Panics
    ///
    /// Panics if `picos_of_milli` is not below one millisecond.
    pub fn from_epoch_millis_and_fraction(
        epoch_millis: i64,
        picos_of_milli: u32,
        time_zone_key: TimeZoneKey,
    ) -> Self {
        assert!(
            picos_of_milli < PICOSECONDS_PER_MILLISECOND,
            "picos_of_milli must be below one millisecond"
        );
        Self {
            epoch_millis,
            picos_of_milli,
            time_zone_key,
        }
    }

    /// Milliseconds since the epoch.
    pub fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// Picoseconds past [`LongTimestampWithTimeZone::epoch_millis`].
    pub fn picos_of_milli(&self) -> u32 {
        self.picos_of_milli
    }

    /// Zone the value was written in.
    pub fn time_zone_key(&self) -> TimeZoneKey {
        self.time_zone_key
    }
}

/// Engine-native literal. Its meaning depends on the domain's engine type.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineValue {
    /// Any type carried in a single `i64`.
    Long(i64),
    /// `DOUBLE` value.
    Double(f64),
    /// `BOOLEAN` value.
    Boolean(bool),
    /// Unscaled long decimal.
    Int128(i128),
    /// Character or binary bytes.
    Slice(Vec<u8>),
    /// Timestamp above microsecond precision.
    LongTimestamp(LongTimestamp),
    /// Zoned timestamp above millisecond precision.
    LongTimestampWithTimeZone(LongTimestampWithTimeZone),
}

impl EngineValue {
    /// Short name of the literal encoding, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            EngineValue::Long(_) => "long",
            EngineValue::Double(_) => "double",
            EngineValue::Boolean(_) => "boolean",
            EngineValue::Int128(_) => "int128",
            EngineValue::Slice(_) => "slice",
            EngineValue::LongTimestamp(_) => "long timestamp",
            EngineValue::LongTimestampWithTimeZone(_) => "long timestamp with time zone",
        }
    }
}

impl From<i64> for EngineValue {
    fn from(value: i64) -> Self {
        EngineValue::Long(value)
    }
}

impl From<f64> for EngineValue {
    fn from(value: f64) -> Self {
        EngineValue::Double(value)
    }
}

impl From<bool> for EngineValue {
    fn from(value: bool) -> Self {
        EngineValue::Boolean(value)
    }
}

impl From<i128> for EngineValue {
    fn from(value: i128) -> Self {
        EngineValue::Int128(value)
    }
}

impl From<&str> for EngineValue {
    fn from(value: &str) -> Self {
        EngineValue::Slice(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for EngineValue {
    fn from(value: Vec<u8>) -> Self {
        EngineValue::Slice(value)
    }
}

impl From<LongTimestamp> for EngineValue {
    fn from(value: LongTimestamp) -> Self {
        EngineValue::LongTimestamp(value)
    }
}

impl From<LongTimestampWithTimeZone> for EngineValue {
    fn from(value: LongTimestampWithTimeZone) -> Self {
        EngineValue::LongTimestampWithTimeZone(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_timestamp_keeps_components() {
        let ts = LongTimestampWithTimeZone::from_epoch_millis_and_fraction(
            1_695_645_403_000,
            250,
            TimeZoneKey(7),
        );
        assert_eq!(ts.epoch_millis(), 1_695_645_403_000);
        assert_eq!(ts.picos_of_milli(), 250);
        assert_eq!(ts.time_zone_key(), TimeZoneKey(7));
    }

    #[test]
    #[should_panic(expected = "picos_of_milli must be below one millisecond")]
    fn packed_timestamp_rejects_oversized_fraction() {
        let _ = LongTimestampWithTimeZone::from_epoch_millis_and_fraction(
            0,
            PICOSECONDS_PER_MILLISECOND,
            UTC_KEY,
        );
    }

    #[test]
    #[should_panic(expected = "picos_of_micro must be below one microsecond")]
    fn long_timestamp_rejects_oversized_fraction() {
        let _ = LongTimestamp::new(0, PICOSECONDS_PER_MICROSECOND);
    }

    #[test]
    fn slices_come_from_text() {
        assert_eq!(
            EngineValue::from("abc"),
            EngineValue::Slice(b"abc".to_vec())
        );
        assert_eq!(EngineValue::from(3i64).kind_name(), "long");
    }
}
