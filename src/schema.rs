//! Storage-side table schema.
//!
//! A [`RowType`] is the ordered list of fields the storage engine scans. The
//! position of a field is the identity predicates use to address it, so the
//! order here must match the order of the files being pruned.

use std::{fmt, sync::Arc};

use arrow::datatypes::{
    DataType as ArrowDataType, Field, Fields, Schema as ArrowSchema, TimeUnit,
};
use lakefilter_predicate::ColumnRef;
use thiserror::Error;

/// Largest declared length of variable-width character and binary columns.
pub const MAX_VARIABLE_LENGTH: u32 = i32::MAX as u32;

/// Logical storage type of a column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// `BOOLEAN`.
    Boolean,
    /// 8-bit signed integer.
    TinyInt,
    /// 16-bit signed integer.
    SmallInt,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    BigInt,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Fixed-point decimal.
    Decimal {
        /// Total number of digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// Fixed-length character data of the given length.
    Char(u32),
    /// Character data up to the given length.
    VarChar(u32),
    /// Fixed-length binary data of the given length.
    Binary(u32),
    /// Binary data up to the given length.
    VarBinary(u32),
    /// Days since the Unix epoch.
    Date,
    /// Time of day with fractional-second precision.
    Time(u8),
    /// Timestamp without time zone, with fractional-second precision.
    Timestamp(u8),
    /// Absolute instant rendered in the session time zone.
    LocalZonedTimestamp(u8),
    /// List of elements of one type.
    Array(Box<DataType>),
    /// Key/value map.
    Map(Box<DataType>, Box<DataType>),
}

impl DataType {
    /// Arrow type the storage engine uses to materialise this column.
    #[must_use]
    pub fn to_arrow(&self) -> ArrowDataType {
        match self {
            DataType::Boolean => ArrowDataType::Boolean,
            DataType::TinyInt => ArrowDataType::Int8,
            DataType::SmallInt => ArrowDataType::Int16,
            DataType::Int => ArrowDataType::Int32,
            DataType::BigInt => ArrowDataType::Int64,
            DataType::Float => ArrowDataType::Float32,
            DataType::Double => ArrowDataType::Float64,
            DataType::Decimal { precision, scale } => {
                ArrowDataType::Decimal128(*precision, i8::try_from(*scale).unwrap_or(i8::MAX))
            }
            DataType::Char(_) | DataType::VarChar(_) => ArrowDataType::Utf8,
            DataType::Binary(len) => {
                ArrowDataType::FixedSizeBinary(i32::try_from(*len).unwrap_or(i32::MAX))
            }
            DataType::VarBinary(_) => ArrowDataType::Binary,
            DataType::Date => ArrowDataType::Date32,
            DataType::Time(precision) => match precision {
                0..=3 => ArrowDataType::Time32(TimeUnit::Millisecond),
                4..=6 => ArrowDataType::Time64(TimeUnit::Microsecond),
                _ => ArrowDataType::Time64(TimeUnit::Nanosecond),
            },
            DataType::Timestamp(precision) => {
                ArrowDataType::Timestamp(timestamp_unit(*precision), None)
            }
            DataType::LocalZonedTimestamp(precision) => {
                ArrowDataType::Timestamp(timestamp_unit(*precision), Some("UTC".into()))
            }
            DataType::Array(element) => ArrowDataType::List(Arc::new(Field::new(
                "element",
                element.to_arrow(),
                true,
            ))),
            DataType::Map(key, value) => {
                let entries = Fields::from(vec![
                    Field::new("key", key.to_arrow(), false),
                    Field::new("value", value.to_arrow(), true),
                ]);
                ArrowDataType::Map(
                    Arc::new(Field::new("entries", ArrowDataType::Struct(entries), false)),
                    false,
                )
            }
        }
    }
}

fn timestamp_unit(precision: u8) -> TimeUnit {
    match precision {
        0..=3 => TimeUnit::Millisecond,
        4..=6 => TimeUnit::Microsecond,
        _ => TimeUnit::Nanosecond,
    }
}

fn unit_precision(unit: &TimeUnit) -> u8 {
    match unit {
        TimeUnit::Second => 0,
        TimeUnit::Millisecond => 3,
        TimeUnit::Microsecond => 6,
        TimeUnit::Nanosecond => 9,
    }
}

impl TryFrom<&ArrowDataType> for DataType {
    type Error = SchemaError;

    fn try_from(datatype: &ArrowDataType) -> Result<Self, Self::Error> {
        let converted = match datatype {
            ArrowDataType::Boolean => DataType::Boolean,
            ArrowDataType::Int8 => DataType::TinyInt,
            ArrowDataType::Int16 => DataType::SmallInt,
            ArrowDataType::Int32 => DataType::Int,
            ArrowDataType::Int64 => DataType::BigInt,
            ArrowDataType::Float32 => DataType::Float,
            ArrowDataType::Float64 => DataType::Double,
            ArrowDataType::Decimal128(precision, scale) => DataType::Decimal {
                precision: *precision,
                scale: u8::try_from(*scale)
                    .map_err(|_| SchemaError::UnsupportedArrowType(datatype.clone()))?,
            },
            ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 => {
                DataType::VarChar(MAX_VARIABLE_LENGTH)
            }
            ArrowDataType::Binary | ArrowDataType::LargeBinary => {
                DataType::VarBinary(MAX_VARIABLE_LENGTH)
            }
            ArrowDataType::FixedSizeBinary(len) => DataType::Binary(
                u32::try_from(*len)
                    .map_err(|_| SchemaError::UnsupportedArrowType(datatype.clone()))?,
            ),
            ArrowDataType::Date32 => DataType::Date,
            ArrowDataType::Time32(unit) | ArrowDataType::Time64(unit) => {
                DataType::Time(unit_precision(unit))
            }
            ArrowDataType::Timestamp(unit, None) => DataType::Timestamp(unit_precision(unit)),
            ArrowDataType::Timestamp(unit, Some(_)) => {
                DataType::LocalZonedTimestamp(unit_precision(unit))
            }
            ArrowDataType::List(element) | ArrowDataType::LargeList(element) => {
                DataType::Array(Box::new(DataType::try_from(element.data_type())?))
            }
            ArrowDataType::Map(entries, _) => match entries.data_type() {
                ArrowDataType::Struct(fields) if fields.len() == 2 => DataType::Map(
                    Box::new(DataType::try_from(fields[0].data_type())?),
                    Box::new(DataType::try_from(fields[1].data_type())?),
                ),
                _ => return Err(SchemaError::UnsupportedArrowType(datatype.clone())),
            },
            other => return Err(SchemaError::UnsupportedArrowType(other.clone())),
        };
        Ok(converted)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => f.write_str("BOOLEAN"),
            DataType::TinyInt => f.write_str("TINYINT"),
            DataType::SmallInt => f.write_str("SMALLINT"),
            DataType::Int => f.write_str("INT"),
            DataType::BigInt => f.write_str("BIGINT"),
            DataType::Float => f.write_str("FLOAT"),
            DataType::Double => f.write_str("DOUBLE"),
            DataType::Decimal { precision, scale } => write!(f, "DECIMAL({precision}, {scale})"),
            DataType::Char(len) => write!(f, "CHAR({len})"),
            DataType::VarChar(len) => write!(f, "VARCHAR({len})"),
            DataType::Binary(len) => write!(f, "BINARY({len})"),
            DataType::VarBinary(len) => write!(f, "VARBINARY({len})"),
            DataType::Date => f.write_str("DATE"),
            DataType::Time(precision) => write!(f, "TIME({precision})"),
            DataType::Timestamp(precision) => write!(f, "TIMESTAMP({precision})"),
            DataType::LocalZonedTimestamp(precision) => {
                write!(f, "TIMESTAMP({precision}) WITH LOCAL TIME ZONE")
            }
            DataType::Array(element) => write!(f, "ARRAY<{element}>"),
            DataType::Map(key, value) => write!(f, "MAP<{key}, {value}>"),
        }
    }
}

/// Errors raised while deriving a [`RowType`] from an Arrow schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The arrow type has no storage counterpart.
    #[error("arrow type {0:?} has no storage counterpart")]
    UnsupportedArrowType(ArrowDataType),
}

/// A named, typed column of a [`RowType`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataField {
    /// Stable field id assigned by the table.
    pub id: i32,
    /// Column name.
    pub name: Arc<str>,
    /// Storage type.
    pub data_type: DataType,
    /// Whether the column may hold null.
    pub nullable: bool,
}

impl DataField {
    /// Nullable field.
    pub fn new(id: i32, name: impl Into<Arc<str>>, data_type: DataType) -> Self {
        Self {
            id,
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Marks the field as `NOT NULL`.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    fn arrow_field(&self) -> Field {
        Field::new(self.name.as_ref(), self.data_type.to_arrow(), self.nullable)
    }
}

/// Ordered list of fields scanned by the storage engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowType {
    fields: Vec<DataField>,
}

impl RowType {
    /// Row type over `fields`, in scan order.
    pub fn new(fields: Vec<DataField>) -> Self {
        Self { fields }
    }

    /// Fields in scan order.
    pub fn fields(&self) -> &[DataField] {
        &self.fields
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field at `index`, if any.
    pub fn field(&self, index: usize) -> Option<&DataField> {
        self.fields.get(index)
    }

    /// Position of the first field named `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| field.name.as_ref() == name)
    }

    /// Predicate column reference for the field at `index`.
    pub fn column_ref(&self, index: usize) -> Option<ColumnRef> {
        self.field(index)
            .map(|field| ColumnRef::new(index, field.name.clone()))
    }

    /// Arrow schema with the same field order.
    pub fn to_arrow_schema(&self) -> ArrowSchema {
        ArrowSchema::new(
            self.fields
                .iter()
                .map(DataField::arrow_field)
                .collect::<Vec<_>>(),
        )
    }
}

impl TryFrom<&ArrowSchema> for RowType {
    type Error = SchemaError;

    /// Field ids follow arrow field positions.
    fn try_from(schema: &ArrowSchema) -> Result<Self, Self::Error> {
        let mut fields = Vec::with_capacity(schema.fields().len());
        for (id, field) in (0i32..).zip(schema.fields().iter()) {
            let mut data_field =
                DataField::new(id, field.name().as_str(), DataType::try_from(field.data_type())?);
            data_field.nullable = field.is_nullable();
            fields.push(data_field);
        }
        Ok(RowType::new(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row_type() -> RowType {
        RowType::new(vec![
            DataField::new(0, "id", DataType::Int).not_null(),
            DataField::new(1, "code", DataType::Char(10)),
            DataField::new(2, "ts", DataType::Timestamp(3)),
            DataField::new(3, "ts_ltz", DataType::LocalZonedTimestamp(6)),
            DataField::new(4, "tags", DataType::Array(Box::new(DataType::VarChar(16)))),
        ])
    }

    #[test]
    fn field_lookup_by_name_and_position() {
        let row_type = sample_row_type();
        assert_eq!(row_type.field_count(), 5);
        assert_eq!(row_type.field_index("ts"), Some(2));
        assert_eq!(row_type.field_index("missing"), None);
        assert_eq!(row_type.column_ref(1), Some(ColumnRef::new(1, "code")));
        assert_eq!(row_type.column_ref(9), None);
    }

    #[test]
    fn arrow_schema_preserves_order_and_types() {
        let schema = sample_row_type().to_arrow_schema();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(names, vec!["id", "code", "ts", "ts_ltz", "tags"]);
        assert!(!schema.field(0).is_nullable());
        assert_eq!(schema.field(1).data_type(), &ArrowDataType::Utf8);
        assert_eq!(
            schema.field(2).data_type(),
            &ArrowDataType::Timestamp(TimeUnit::Millisecond, None)
        );
        assert_eq!(
            schema.field(3).data_type(),
            &ArrowDataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
        );
    }

    #[test]
    fn row_type_from_arrow_schema() {
        let schema = ArrowSchema::new(vec![
            Field::new("a", ArrowDataType::Int8, false),
            Field::new("b", ArrowDataType::Decimal128(10, 2), true),
            Field::new(
                "c",
                ArrowDataType::Timestamp(TimeUnit::Nanosecond, Some("+08:00".into())),
                true,
            ),
        ]);
        let row_type = RowType::try_from(&schema).expect("convertible schema");
        assert_eq!(
            row_type.fields(),
            &[
                DataField::new(0, "a", DataType::TinyInt).not_null(),
                DataField::new(
                    1,
                    "b",
                    DataType::Decimal {
                        precision: 10,
                        scale: 2
                    }
                ),
                DataField::new(2, "c", DataType::LocalZonedTimestamp(9)),
            ]
        );
    }

    #[test]
    fn unsupported_arrow_type_is_rejected() {
        let schema = ArrowSchema::new(vec![Field::new("u", ArrowDataType::UInt32, true)]);
        assert_eq!(
            RowType::try_from(&schema),
            Err(SchemaError::UnsupportedArrowType(ArrowDataType::UInt32))
        );
    }

    #[test]
    fn map_round_trips_through_arrow() {
        let map = DataType::Map(Box::new(DataType::VarChar(8)), Box::new(DataType::BigInt));
        let arrow = map.to_arrow();
        assert_eq!(
            DataType::try_from(&arrow),
            Ok(DataType::Map(
                Box::new(DataType::VarChar(MAX_VARIABLE_LENGTH)),
                Box::new(DataType::BigInt)
            ))
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(DataType::Char(10).to_string(), "CHAR(10)");
        assert_eq!(
            DataType::LocalZonedTimestamp(3).to_string(),
            "TIMESTAMP(3) WITH LOCAL TIME ZONE"
        );
    }
}
