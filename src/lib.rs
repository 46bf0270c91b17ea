#![deny(missing_docs)]
//! Predicate pushdown from a query engine into a lake storage scan.
//!
//! The engine hands over a [`TupleDomain`]: for each constrained column, the
//! set of values that rows passing its filter may hold. [`FilterConverter`]
//! rewrites it as a storage [`Predicate`] addressed by field position, so the
//! scan planner can skip files and row groups before reading them.
//!
//! ```
//! use lakefilter::{
//!     engine::{ColumnHandle, Domain, EngineType, TupleDomain},
//!     schema::{DataField, DataType, RowType},
//!     FilterConverter,
//! };
//!
//! let row_type = RowType::new(vec![DataField::new(0, "id", DataType::Int)]);
//! let tuple: TupleDomain<ColumnHandle> = [(
//!     ColumnHandle::of("id", DataType::Int),
//!     Domain::single_value(EngineType::Integer, 7i64),
//! )]
//! .into_iter()
//! .collect();
//!
//! let predicate = FilterConverter::new(row_type).convert(&tuple).unwrap();
//! assert_eq!(predicate.unwrap().to_string(), "id#0 = 7");
//! ```

mod logging;

/// Engine-side column domains.
pub mod engine;

/// File status adapters.
pub mod fs;

/// Domain to predicate conversion.
pub mod pushdown;

/// Storage schema and its Arrow mapping.
pub mod schema;

pub use lakefilter_predicate::{
    ColumnRef, ComparisonOp, Decimal, Predicate, PredicateBuilder, PredicateInner, PredicateLeaf,
    PredicateNode, PredicateVisitor, ScalarValue, Timestamp,
};

pub use crate::{
    engine::{Domain, TupleDomain},
    pushdown::{ConvertError, ConverterConfig, FilterConverter, UnsupportedPolicy},
    schema::RowType,
};
