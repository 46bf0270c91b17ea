//! Translation of engine column domains into storage scan predicates.
//!
//! [`FilterConverter`] walks the storage schema in field order, reduces each
//! constrained column's [`Domain`] to a predicate and ANDs the results. A
//! result of `None` means the scan cannot be narrowed.

mod coerce;
mod config;
mod decompose;
mod error;
mod validate;

use std::collections::HashMap;

use lakefilter_predicate::Predicate;
use log::Level;

pub use coerce::{coerce, CoerceError};
pub use config::{ConverterConfig, UnsupportedPolicy};
pub use error::ConvertError;
pub use validate::validate_field_indices;

use self::decompose::decompose;
use crate::{
    engine::{ColumnHandle, Domain, TupleDomain},
    logging::lakefilter_log,
    schema::RowType,
};

/// Converts [`TupleDomain`]s over a fixed storage schema.
#[derive(Clone, Debug)]
pub struct FilterConverter {
    row_type: RowType,
    config: ConverterConfig,
}

impl FilterConverter {
    /// Converter with the default [`ConverterConfig`].
    pub fn new(row_type: RowType) -> Self {
        Self::with_config(row_type, ConverterConfig::default())
    }

    /// Converter with an explicit config.
    pub fn with_config(row_type: RowType, config: ConverterConfig) -> Self {
        Self { row_type, config }
    }

    /// Storage schema predicates are built against.
    pub fn row_type(&self) -> &RowType {
        &self.row_type
    }

    /// Active configuration.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Builds the scan predicate for `tuple_domain`.
    ///
    /// Returns `Ok(None)` when no column is constrained. A single constrained
    /// column yields its predicate unwrapped; several are combined with `AND`
    /// in schema order.
    pub fn convert(
        &self,
        tuple_domain: &TupleDomain<ColumnHandle>,
    ) -> Result<Option<Predicate>, ConvertError> {
        let Some(domains) = tuple_domain.domains() else {
            lakefilter_log!(
                Level::Debug,
                "pushdown_unsatisfiable",
                "fields={}",
                self.row_type.field_count()
            );
            return Ok(Some(Predicate::always_false()));
        };

        let mut unknown = Vec::new();
        let mut duplicates = Vec::new();
        let mut by_name: HashMap<&str, (&ColumnHandle, &Domain)> =
            HashMap::with_capacity(domains.len());
        for (handle, domain) in domains {
            if self.row_type.field_index(handle.name()).is_none() {
                unknown.push(handle.name());
            } else if by_name.insert(handle.name(), (handle, domain)).is_some() {
                duplicates.push(handle.name());
            }
        }
        // Handles sharing a name would leave the surviving domain up to map order.
        duplicates.sort_unstable();
        if let Some(name) = duplicates.first() {
            return Err(ConvertError::DuplicateColumn(name.to_string()));
        }
        unknown.sort_unstable();
        unknown.dedup();
        for name in unknown {
            self.reject_or_skip(ConvertError::UnknownColumn(name.to_string()))?;
        }

        let mut conjuncts = Vec::new();
        for (index, field) in self.row_type.fields().iter().enumerate() {
            let Some((handle, domain)) = by_name.get(field.name.as_ref()) else {
                continue;
            };
            if handle.data_type() != &field.data_type {
                return Err(ConvertError::TypeMismatch {
                    column: field.name.to_string(),
                    expected: field.data_type.clone(),
                    actual: handle.data_type().clone(),
                });
            }
            match self.convert_domain(index, domain) {
                Ok(Some(predicate)) => conjuncts.push(predicate),
                Ok(None) => {}
                Err(err) => self.reject_or_skip(err)?,
            }
        }

        let predicate = Predicate::conjunction(conjuncts);
        if self.config.validate_indices {
            if let Some(predicate) = &predicate {
                validate_field_indices(predicate, &self.row_type)?;
            }
        }
        lakefilter_log!(
            Level::Debug,
            "pushdown_convert",
            "constrained_columns={} predicate={}",
            domains.len(),
            predicate
                .as_ref()
                .map_or_else(|| "none".to_string(), ToString::to_string)
        );
        Ok(predicate)
    }

    /// Reduces one domain for the field at `field_index`.
    pub fn convert_domain(
        &self,
        field_index: usize,
        domain: &Domain,
    ) -> Result<Option<Predicate>, ConvertError> {
        let column = self.row_type.column_ref(field_index).ok_or_else(|| {
            ConvertError::FieldIndexOutOfRange {
                index: field_index,
                field_count: self.row_type.field_count(),
            }
        })?;
        decompose(&column, domain)
    }

    fn reject_or_skip(&self, err: ConvertError) -> Result<(), ConvertError> {
        if self.config.skips_unsupported() && err.is_skippable() {
            lakefilter_log!(Level::Debug, "pushdown_skip_column", "reason=\"{}\"", err);
            Ok(())
        } else {
            Err(err)
        }
    }
}
