//! Reduces one column's [`Domain`] to an optional predicate.

use std::cmp::Ordering;

use lakefilter_predicate::{ColumnRef, Predicate, PredicateBuilder, ScalarValue};

use super::{coerce::coerce, ConvertError};
use crate::engine::{DiscreteValues, Domain, EngineType, EngineValue, Range, ValueSet};

/// `None` means the domain does not constrain the column.
pub(crate) fn decompose(
    column: &ColumnRef,
    domain: &Domain,
) -> Result<Option<Predicate>, ConvertError> {
    if domain.is_all() {
        return Ok(None);
    }
    let decomposer = Decomposer {
        column,
        engine_type: domain.engine_type(),
    };
    if domain.is_only_null() {
        return Ok(Some(decomposer.is_null()));
    }
    let values = match domain.values() {
        ValueSet::None => return Ok(Some(Predicate::always_false())),
        ValueSet::All => decomposer.is_not_null(),
        ValueSet::Discrete(discrete) => decomposer.discrete(discrete)?,
        ValueSet::Ranges(ranges) => decomposer.ranges(ranges)?,
    };

    if domain.is_null_allowed() {
        Ok(Some(
            PredicateBuilder::or()
                .predicate(values)
                .is_null(column.clone())
                .build(),
        ))
    } else {
        Ok(Some(values))
    }
}

struct Decomposer<'a> {
    column: &'a ColumnRef,
    engine_type: &'a EngineType,
}

impl Decomposer<'_> {
    fn coerce(&self, value: &EngineValue) -> Result<ScalarValue, ConvertError> {
        coerce(self.engine_type, value)
            .map_err(|source| ConvertError::coerce(&self.column.name, source))
    }

    fn coerce_all<'v, I>(&self, values: I) -> Result<Vec<ScalarValue>, ConvertError>
    where
        I: IntoIterator<Item = &'v EngineValue>,
    {
        values.into_iter().map(|value| self.coerce(value)).collect()
    }

    fn is_null(&self) -> Predicate {
        PredicateBuilder::leaf().is_null(self.column.clone()).build()
    }

    fn is_not_null(&self) -> Predicate {
        PredicateBuilder::leaf().is_not_null(self.column.clone()).build()
    }

    /// `Equal`/`In` for allowed values, `NotEqual`/`NotIn` for excluded ones.
    fn discrete(&self, discrete: &DiscreteValues) -> Result<Predicate, ConvertError> {
        let mut literals = self.coerce_all(discrete.values())?;
        let column = self.column.clone();
        let builder = PredicateBuilder::leaf();
        let predicate = match (discrete.is_inclusive(), literals.len()) {
            (true, 0) => {
                return Err(ConvertError::shape(
                    &self.column.name,
                    "discrete value set is empty",
                ))
            }
            (false, 0) => builder.is_not_null(column),
            (true, 1) => builder.equals(column, literals.remove(0)),
            (false, 1) => builder.not_equals(column, literals.remove(0)),
            (true, _) => builder.in_list(column, literals),
            (false, _) => builder.not_in_list(column, literals),
        };
        Ok(predicate.build())
    }

    /// Disjunction of the ranges. Points are gathered into one `Equal`/`In`
    /// leaf placed after the proper ranges.
    fn ranges(&self, ranges: &[Range]) -> Result<Predicate, ConvertError> {
        if ranges.is_empty() {
            return Err(ConvertError::shape(&self.column.name, "range set is empty"));
        }
        if ranges.iter().any(Range::is_all) {
            return Ok(self.is_not_null());
        }

        let mut disjunction = PredicateBuilder::or();
        let mut points = Vec::new();
        for range in ranges {
            match range.single_value() {
                Some(point) => points.push(self.coerce(point)?),
                None => disjunction = disjunction.predicate(self.range(range)?),
            }
        }
        match points.len() {
            0 => {}
            1 => disjunction = disjunction.equals(self.column.clone(), points.remove(0)),
            _ => disjunction = disjunction.in_list(self.column.clone(), points),
        }
        Ok(disjunction.build())
    }

    fn range(&self, range: &Range) -> Result<Predicate, ConvertError> {
        let low = range
            .low()
            .map(|bound| Ok::<_, ConvertError>((self.coerce(&bound.value)?, bound.inclusive)))
            .transpose()?;
        let high = range
            .high()
            .map(|bound| Ok::<_, ConvertError>((self.coerce(&bound.value)?, bound.inclusive)))
            .transpose()?;

        if let (Some((low, _)), Some((high, _))) = (&low, &high) {
            if low.compare(high) == Some(Ordering::Greater) {
                return Err(ConvertError::shape(
                    &self.column.name,
                    format!("range low bound {low} is above high bound {high}"),
                ));
            }
        }

        let column = self.column.clone();
        let mut conjunction = PredicateBuilder::and();
        if let Some((value, inclusive)) = low {
            conjunction = if inclusive {
                conjunction.greater_than_or_equal(column.clone(), value)
            } else {
                conjunction.greater_than(column.clone(), value)
            };
        }
        if let Some((value, inclusive)) = high {
            conjunction = if inclusive {
                conjunction.less_than_or_equal(column, value)
            } else {
                conjunction.less_than(column, value)
            };
        }
        Ok(conjunction.build())
    }
}

#[cfg(test)]
mod tests {
    use lakefilter_predicate::{ComparisonOp, Timestamp};

    use super::*;

    fn id() -> ColumnRef {
        ColumnRef::new(0, "id")
    }

    fn int(value: i32) -> ScalarValue {
        ScalarValue::Int(value)
    }

    fn compare(op: ComparisonOp, value: i32) -> Predicate {
        Predicate::compare(id(), op, int(value))
    }

    fn ranges(ranges: Vec<Range>, null_allowed: bool) -> Domain {
        Domain::create(EngineType::Integer, ValueSet::of_ranges(ranges), null_allowed)
    }

    #[test]
    fn trivial_domains() {
        assert_eq!(decompose(&id(), &Domain::all(EngineType::Integer)), Ok(None));
        assert_eq!(
            decompose(&id(), &Domain::none(EngineType::Integer)),
            Ok(Some(Predicate::always_false()))
        );
        assert_eq!(
            decompose(&id(), &Domain::only_null(EngineType::Integer)),
            Ok(Some(Predicate::is_null(id(), false)))
        );
        assert_eq!(
            decompose(&id(), &Domain::not_null(EngineType::Integer)),
            Ok(Some(Predicate::is_null(id(), true)))
        );
    }

    #[test]
    fn discrete_sets() {
        assert_eq!(
            decompose(&id(), &Domain::single_value(EngineType::Integer, 1i64)),
            Ok(Some(compare(ComparisonOp::Equal, 1)))
        );
        assert_eq!(
            decompose(
                &id(),
                &Domain::multiple_values(EngineType::Integer, [3i64, 1, 2])
            ),
            Ok(Some(Predicate::in_list(id(), [int(3), int(1), int(2)], false)))
        );
    }

    #[test]
    fn excluded_values() {
        let one = Domain::create(
            EngineType::Integer,
            ValueSet::excluding(vec![EngineValue::Long(1)]),
            false,
        );
        assert_eq!(
            decompose(&id(), &one),
            Ok(Some(compare(ComparisonOp::NotEqual, 1)))
        );
        let many = Domain::create(
            EngineType::Integer,
            ValueSet::excluding(vec![EngineValue::Long(1), EngineValue::Long(2)]),
            false,
        );
        assert_eq!(
            decompose(&id(), &many),
            Ok(Some(Predicate::in_list(id(), [int(1), int(2)], true)))
        );
    }

    #[test]
    fn half_bounded_ranges() {
        let cases = [
            (Range::less_than(1i64), ComparisonOp::LessThan),
            (Range::less_than_or_equal(1i64), ComparisonOp::LessThanOrEqual),
            (Range::greater_than(1i64), ComparisonOp::GreaterThan),
            (
                Range::greater_than_or_equal(1i64),
                ComparisonOp::GreaterThanOrEqual,
            ),
        ];
        for (range, op) in cases {
            assert_eq!(
                decompose(&id(), &ranges(vec![range], false)),
                Ok(Some(compare(op, 1)))
            );
        }
    }

    #[test]
    fn bounded_range_is_conjunction() {
        let domain = ranges(vec![Range::range(1i64, true, 10i64, false)], false);
        assert_eq!(
            decompose(&id(), &domain),
            Ok(Some(Predicate::and([
                compare(ComparisonOp::GreaterThanOrEqual, 1),
                compare(ComparisonOp::LessThan, 10),
            ])))
        );
    }

    #[test]
    fn point_range_matches_single_value() {
        let point = ranges(vec![Range::equal(7i64)], false);
        let single = Domain::single_value(EngineType::Integer, 7i64);
        assert_eq!(decompose(&id(), &point), decompose(&id(), &single));
    }

    #[test]
    fn range_union_with_null() {
        let domain = ranges(
            vec![
                Range::equal(0i64),
                Range::less_than(-10i64),
                Range::equal(5i64),
                Range::range(10i64, false, 20i64, true),
            ],
            true,
        );
        let expected = Predicate::or([
            compare(ComparisonOp::LessThan, -10),
            Predicate::and([
                compare(ComparisonOp::GreaterThan, 10),
                compare(ComparisonOp::LessThanOrEqual, 20),
            ]),
            Predicate::in_list(id(), [int(0), int(5)], false),
            Predicate::is_null(id(), false),
        ]);
        assert_eq!(decompose(&id(), &domain), Ok(Some(expected)));
    }

    #[test]
    fn single_value_with_null() {
        let domain = Domain::create(
            EngineType::Integer,
            ValueSet::of(vec![EngineValue::Long(4)]),
            true,
        );
        assert_eq!(
            decompose(&id(), &domain),
            Ok(Some(Predicate::or([
                compare(ComparisonOp::Equal, 4),
                Predicate::is_null(id(), false),
            ])))
        );
    }

    #[test]
    fn unbounded_range_is_not_null() {
        let domain = ranges(vec![Range::less_than(3i64), Range::all()], false);
        assert_eq!(
            decompose(&id(), &domain),
            Ok(Some(Predicate::is_null(id(), true)))
        );
        assert_eq!(
            decompose(&id(), &ranges(vec![Range::all()], true)),
            Ok(None)
        );
    }

    #[test]
    fn malformed_shapes() {
        assert!(matches!(
            decompose(&id(), &ranges(Vec::new(), false)),
            Err(ConvertError::UnsupportedDomainShape { .. })
        ));
        assert!(matches!(
            decompose(&id(), &Domain::multiple_values(EngineType::Integer, Vec::<i64>::new())),
            Err(ConvertError::UnsupportedDomainShape { .. })
        ));
        assert!(matches!(
            decompose(&id(), &ranges(vec![Range::range(9i64, true, 1i64, true)], false)),
            Err(ConvertError::UnsupportedDomainShape { .. })
        ));
    }

    #[test]
    fn coercion_errors_name_the_column() {
        let column = ColumnRef::new(2, "tags");
        let domain = Domain::not_null(EngineType::Array(Box::new(EngineType::Integer)));
        // Value-less domains never reach coercion.
        assert_eq!(
            decompose(&column, &domain),
            Ok(Some(Predicate::is_null(column.clone(), true)))
        );

        let domain = Domain::single_value(EngineType::Array(Box::new(EngineType::Integer)), 1i64);
        match decompose(&column, &domain) {
            Err(ConvertError::UnsupportedType { column, .. }) => assert_eq!(column, "tags"),
            other => panic!("expected unsupported type, got {other:?}"),
        }

        let domain = Domain::single_value(EngineType::TinyInt, 300i64);
        assert!(matches!(
            decompose(&column, &domain),
            Err(ConvertError::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn timestamp_ranges_use_coerced_literals() {
        let column = ColumnRef::new(1, "ts");
        let domain = Domain::create(
            EngineType::Timestamp(3),
            ValueSet::of_ranges(vec![Range::greater_than_or_equal(1_000_000i64)]),
            false,
        );
        assert_eq!(
            decompose(&column, &domain),
            Ok(Some(Predicate::compare(
                column.clone(),
                ComparisonOp::GreaterThanOrEqual,
                ScalarValue::Timestamp(Timestamp::from_epoch_millis(1_000)),
            )))
        );
    }
}
