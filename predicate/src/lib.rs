#![deny(missing_docs)]
//! Storage predicate facade crate.
//!
//! Predicates built here address columns by their position in the table
//! schema and carry literals already converted into the storage engine's
//! internal representation. Nothing in this crate evaluates a predicate; the
//! tree is a contract handed to the scan planner for file and row-group
//! pruning.

mod core;

pub use core::{
    ColumnRef, ComparisonOp, Decimal, Predicate, PredicateBuilder, PredicateInner, PredicateLeaf,
    PredicateNode, PredicateVisitor, ScalarValue, Timestamp,
};
