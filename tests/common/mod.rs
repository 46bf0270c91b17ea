//! Shared helpers for converter integration tests.

use lakefilter::{
    engine::{ColumnHandle, Domain, TupleDomain},
    schema::{DataField, DataType, RowType},
    ConverterConfig, FilterConverter, Predicate,
};

/// Converter over a single column named `id`.
pub fn single_column(data_type: DataType) -> FilterConverter {
    FilterConverter::with_config(
        RowType::new(vec![DataField::new(0, "id", data_type)]),
        ConverterConfig::default().with_index_validation(true),
    )
}

/// Converts one domain on the `id` column.
pub fn convert_single(data_type: DataType, domain: Domain) -> Option<Predicate> {
    let converter = single_column(data_type.clone());
    let tuple: TupleDomain<ColumnHandle> = [(ColumnHandle::of("id", data_type), domain)]
        .into_iter()
        .collect();
    converter
        .convert(&tuple)
        .expect("conversion should succeed")
}
