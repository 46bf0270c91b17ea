//! Per-column constraint model handed over by the query engine.
//!
//! A [`Domain`] describes every value a column may hold for the rows that
//! satisfy a filter: a [`ValueSet`] for the non-null part plus a flag for
//! null. A [`TupleDomain`] is the conjunction of domains over many columns.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use super::{EngineType, EngineValue};
use crate::schema::DataType;

/// One end of a [`Range`].
#[derive(Clone, Debug, PartialEq)]
pub struct Bound {
    /// Bound literal, encoded per the domain's engine type.
    pub value: EngineValue,
    /// Whether `value` itself is inside the range.
    pub inclusive: bool,
}

impl Bound {
    /// Closed bound.
    pub fn inclusive(value: EngineValue) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    /// Open bound.
    pub fn exclusive(value: EngineValue) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

/// Interval over an ordered type. A missing bound is unbounded on that side.
#[derive(Clone, Debug, PartialEq)]
pub struct Range {
    low: Option<Bound>,
    high: Option<Bound>,
}

impl Range {
    /// Range between optional bounds.
    pub fn new(low: Option<Bound>, high: Option<Bound>) -> Self {
        Self { low, high }
    }

    /// Unbounded on both sides.
    pub fn all() -> Self {
        Self::new(None, None)
    }

    /// `(-inf, value)`.
    pub fn less_than(value: impl Into<EngineValue>) -> Self {
        Self::new(None, Some(Bound::exclusive(value.into())))
    }

    /// `(-inf, value]`.
    pub fn less_than_or_equal(value: impl Into<EngineValue>) -> Self {
        Self::new(None, Some(Bound::inclusive(value.into())))
    }

    /// `(value, +inf)`.
    pub fn greater_than(value: impl Into<EngineValue>) -> Self {
        Self::new(Some(Bound::exclusive(value.into())), None)
    }

    /// `[value, +inf)`.
    pub fn greater_than_or_equal(value: impl Into<EngineValue>) -> Self {
        Self::new(Some(Bound::inclusive(value.into())), None)
    }

    /// Single-point range `[value, value]`.
    pub fn equal(value: impl Into<EngineValue>) -> Self {
        let value = value.into();
        Self::new(
            Some(Bound::inclusive(value.clone())),
            Some(Bound::inclusive(value)),
        )
    }

    /// Range bounded on both sides.
    pub fn range(
        low: impl Into<EngineValue>,
        low_inclusive: bool,
        high: impl Into<EngineValue>,
        high_inclusive: bool,
    ) -> Self {
        Self::new(
            Some(Bound {
                value: low.into(),
                inclusive: low_inclusive,
            }),
            Some(Bound {
                value: high.into(),
                inclusive: high_inclusive,
            }),
        )
    }

    /// Lower bound, `None` when unbounded below.
    pub fn low(&self) -> Option<&Bound> {
        self.low.as_ref()
    }

    /// Upper bound, `None` when unbounded above.
    pub fn high(&self) -> Option<&Bound> {
        self.high.as_ref()
    }

    /// True when unbounded on both sides.
    pub fn is_all(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// The point of a `[v, v]` range.
    pub fn single_value(&self) -> Option<&EngineValue> {
        match (&self.low, &self.high) {
            (Some(low), Some(high))
                if low.inclusive && high.inclusive && low.value == high.value =>
            {
                Some(&low.value)
            }
            _ => None,
        }
    }
}

/// Explicit set of literals, either allowed (`inclusive`) or excluded.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscreteValues {
    inclusive: bool,
    values: Vec<EngineValue>,
}

impl DiscreteValues {
    /// Allowed (`inclusive`) or excluded `values`.
    pub fn new(inclusive: bool, values: Vec<EngineValue>) -> Self {
        Self { inclusive, values }
    }

    /// True when the values are the allowed ones.
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Values in the order the engine supplied them.
    pub fn values(&self) -> &[EngineValue] {
        &self.values
    }
}

/// Non-null part of a [`Domain`].
#[derive(Clone, Debug, PartialEq)]
pub enum ValueSet {
    /// Every non-null value.
    All,
    /// No non-null value.
    None,
    /// Explicit allowed or excluded values.
    Discrete(DiscreteValues),
    /// Union of ranges.
    Ranges(Vec<Range>),
}

impl ValueSet {
    /// Inclusive discrete set.
    pub fn of(values: Vec<EngineValue>) -> Self {
        ValueSet::Discrete(DiscreteValues::new(true, values))
    }

    /// Every value except `values`.
    pub fn excluding(values: Vec<EngineValue>) -> Self {
        ValueSet::Discrete(DiscreteValues::new(false, values))
    }

    /// Union of `ranges`.
    pub fn of_ranges(ranges: Vec<Range>) -> Self {
        ValueSet::Ranges(ranges)
    }

    /// True for every encoding that admits all non-null values.
    pub fn is_all(&self) -> bool {
        match self {
            ValueSet::All => true,
            ValueSet::None => false,
            ValueSet::Discrete(discrete) => !discrete.inclusive && discrete.values.is_empty(),
            ValueSet::Ranges(ranges) => ranges.iter().any(Range::is_all),
        }
    }

    /// True when no non-null value qualifies.
    pub fn is_none(&self) -> bool {
        matches!(self, ValueSet::None)
    }

}

/// Set of values a column may take, including whether null qualifies.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    engine_type: EngineType,
    values: ValueSet,
    null_allowed: bool,
}

impl Domain {
    /// Domain of `engine_type` values in `values`, plus null when allowed.
    pub fn create(engine_type: EngineType, values: ValueSet, null_allowed: bool) -> Self {
        Self {
            engine_type,
            values,
            null_allowed,
        }
    }

    /// Every value, null included.
    pub fn all(engine_type: EngineType) -> Self {
        Self::create(engine_type, ValueSet::All, true)
    }

    /// No value at all.
    pub fn none(engine_type: EngineType) -> Self {
        Self::create(engine_type, ValueSet::None, false)
    }

    /// Null and nothing else.
    pub fn only_null(engine_type: EngineType) -> Self {
        Self::create(engine_type, ValueSet::None, true)
    }

    /// Every non-null value.
    pub fn not_null(engine_type: EngineType) -> Self {
        Self::create(engine_type, ValueSet::All, false)
    }

    /// Exactly one non-null value.
    pub fn single_value(engine_type: EngineType, value: impl Into<EngineValue>) -> Self {
        Self::create(engine_type, ValueSet::of(vec![value.into()]), false)
    }

    /// Any of `values`, null excluded.
    pub fn multiple_values<I>(engine_type: EngineType, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<EngineValue>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::create(engine_type, ValueSet::of(values), false)
    }

    /// Type the domain's literals are encoded in.
    pub fn engine_type(&self) -> &EngineType {
        &self.engine_type
    }

    /// Non-null part.
    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    /// Whether null qualifies.
    pub fn is_null_allowed(&self) -> bool {
        self.null_allowed
    }

    /// True when the domain does not constrain the column.
    pub fn is_all(&self) -> bool {
        self.null_allowed && self.values.is_all()
    }

    /// True when no value, null included, qualifies.
    pub fn is_none(&self) -> bool {
        !self.null_allowed && self.values.is_none()
    }

    /// True when only null qualifies.
    pub fn is_only_null(&self) -> bool {
        self.null_allowed && self.values.is_none()
    }
}

/// Column of the query engine's table handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnHandle {
    name: Arc<str>,
    data_type: DataType,
}

impl ColumnHandle {
    /// Handle for the column `name` of storage type `data_type`.
    pub fn of(name: impl Into<Arc<str>>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Column name, matched against the storage schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage type the engine saw when planning.
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }
}

/// Conjunction of per-column domains.
///
/// `None` means no row can match. Columns without an entry are unconstrained,
/// so an empty map matches every row.
#[derive(Clone, Debug, PartialEq)]
pub struct TupleDomain<C: Eq + Hash> {
    domains: Option<HashMap<C, Domain>>,
}

impl<C: Eq + Hash> TupleDomain<C> {
    /// No constraint on any column.
    pub fn all() -> Self {
        Self {
            domains: Some(HashMap::new()),
        }
    }

    /// Matches no row.
    pub fn none() -> Self {
        Self { domains: None }
    }

    /// Collapses to [`TupleDomain::none`] if any domain is empty and drops
    /// domains that do not constrain anything.
    pub fn with_column_domains(domains: HashMap<C, Domain>) -> Self {
        if domains.values().any(Domain::is_none) {
            return Self::none();
        }
        let domains = domains
            .into_iter()
            .filter(|(_, domain)| !domain.is_all())
            .collect();
        Self {
            domains: Some(domains),
        }
    }

    /// True when no column is constrained.
    pub fn is_all(&self) -> bool {
        self.domains.as_ref().is_some_and(HashMap::is_empty)
    }

    /// True when no row can match.
    pub fn is_none(&self) -> bool {
        self.domains.is_none()
    }

    /// Per-column domains, or `None` when nothing can match.
    pub fn domains(&self) -> Option<&HashMap<C, Domain>> {
        self.domains.as_ref()
    }
}

impl<C: Eq + Hash> FromIterator<(C, Domain)> for TupleDomain<C> {
    fn from_iter<T: IntoIterator<Item = (C, Domain)>>(iter: T) -> Self {
        Self::with_column_domains(iter.into_iter().collect())
    }
}
