//! Builder for composing predicate trees.

use super::{ColumnRef, ComparisonOp, Predicate, ScalarValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BuilderCombine {
    Leaf,
    Conjunction,
    Disjunction,
}

/// Builder for composing predicates incrementally.
#[derive(Debug)]
pub struct PredicateBuilder {
    combine: BuilderCombine,
    clauses: Vec<Predicate>,
}

impl PredicateBuilder {
    const fn new(combine: BuilderCombine) -> Self {
        Self {
            combine,
            clauses: Vec::new(),
        }
    }

    /// Creates a builder that expects a single clause.
    #[must_use]
    pub fn leaf() -> Self {
        Self::new(BuilderCombine::Leaf)
    }

    /// Creates a builder that emits an `AND` of all clauses.
    #[must_use]
    pub fn and() -> Self {
        Self::new(BuilderCombine::Conjunction)
    }

    /// Creates a builder that emits an `OR` of all clauses.
    #[must_use]
    pub fn or() -> Self {
        Self::new(BuilderCombine::Disjunction)
    }

    /// Adds an existing predicate to the builder.
    #[must_use]
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.clauses.push(predicate);
        self
    }

    /// Adds a comparison predicate.
    #[must_use]
    pub fn compare<V>(mut self, column: ColumnRef, op: ComparisonOp, value: V) -> Self
    where
        V: Into<ScalarValue>,
    {
        self.clauses.push(Predicate::compare(column, op, value.into()));
        self
    }

    /// Adds an equality predicate.
    #[must_use]
    pub fn equals<V>(self, column: ColumnRef, value: V) -> Self
    where
        V: Into<ScalarValue>,
    {
        self.compare(column, ComparisonOp::Equal, value)
    }

    /// Adds an inequality predicate.
    #[must_use]
    pub fn not_equals<V>(self, column: ColumnRef, value: V) -> Self
    where
        V: Into<ScalarValue>,
    {
        self.compare(column, ComparisonOp::NotEqual, value)
    }

    /// Adds a `<` comparison predicate.
    #[must_use]
    pub fn less_than<V>(self, column: ColumnRef, value: V) -> Self
    where
        V: Into<ScalarValue>,
    {
        self.compare(column, ComparisonOp::LessThan, value)
    }

    /// Adds a `<=` comparison predicate.
    #[must_use]
    pub fn less_than_or_equal<V>(self, column: ColumnRef, value: V) -> Self
    where
        V: Into<ScalarValue>,
    {
        self.compare(column, ComparisonOp::LessThanOrEqual, value)
    }

    /// Adds a `>` comparison predicate.
    #[must_use]
    pub fn greater_than<V>(self, column: ColumnRef, value: V) -> Self
    where
        V: Into<ScalarValue>,
    {
        self.compare(column, ComparisonOp::GreaterThan, value)
    }

    /// Adds a `>=` comparison predicate.
    #[must_use]
    pub fn greater_than_or_equal<V>(self, column: ColumnRef, value: V) -> Self
    where
        V: Into<ScalarValue>,
    {
        self.compare(column, ComparisonOp::GreaterThanOrEqual, value)
    }

    /// Adds an `IN` predicate.
    #[must_use]
    pub fn in_list<I>(mut self, column: ColumnRef, list: I) -> Self
    where
        I: IntoIterator<Item = ScalarValue>,
    {
        self.clauses.push(Predicate::in_list(column, list, false));
        self
    }

    /// Adds a `NOT IN` predicate.
    #[must_use]
    pub fn not_in_list<I>(mut self, column: ColumnRef, list: I) -> Self
    where
        I: IntoIterator<Item = ScalarValue>,
    {
        self.clauses.push(Predicate::in_list(column, list, true));
        self
    }

    /// Adds an `IS NULL` predicate.
    #[must_use]
    pub fn is_null(mut self, column: ColumnRef) -> Self {
        self.clauses.push(Predicate::is_null(column, false));
        self
    }

    /// Adds an `IS NOT NULL` predicate.
    #[must_use]
    pub fn is_not_null(mut self, column: ColumnRef) -> Self {
        self.clauses.push(Predicate::is_null(column, true));
        self
    }

    /// Consumes the builder and returns the composed predicate.
    ///
    /// # Panics
    ///
    /// Panics if no clause was added, or if a leaf builder holds more than one.
    #[must_use]
    pub fn build(self) -> Predicate {
        assert!(
            !self.clauses.is_empty(),
            "PredicateBuilder requires at least one clause"
        );
        match self.combine {
            BuilderCombine::Leaf => {
                assert!(
                    self.clauses.len() == 1,
                    "PredicateBuilder::leaf must contain exactly one clause"
                );
                self.clauses
                    .into_iter()
                    .next()
                    .expect("length checked for leaf builder")
            }
            BuilderCombine::Conjunction => Predicate::and(self.clauses),
            BuilderCombine::Disjunction => Predicate::or(self.clauses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PredicateInner, PredicateNode};

    #[test]
    #[should_panic(expected = "PredicateBuilder requires at least one clause")]
    fn leaf_builder_requires_clause() {
        let _ = PredicateBuilder::leaf().build();
    }

    #[test]
    #[should_panic(expected = "PredicateBuilder::leaf must contain exactly one clause")]
    fn leaf_builder_rejects_multiple_clauses() {
        let column = ColumnRef::new(0, "col");
        let _ = PredicateBuilder::leaf()
            .equals(column.clone(), 1i32)
            .equals(column, 2i32)
            .build();
    }

    #[test]
    #[should_panic(expected = "PredicateBuilder requires at least one clause")]
    fn and_builder_requires_clause() {
        let _ = PredicateBuilder::and().build();
    }

    #[test]
    #[should_panic(expected = "PredicateBuilder requires at least one clause")]
    fn or_builder_requires_clause() {
        let _ = PredicateBuilder::or().build();
    }

    #[test]
    fn single_clause_conjunction_is_the_clause() {
        let column = ColumnRef::new(0, "id");
        let built = PredicateBuilder::and().less_than(column.clone(), 5i32).build();
        assert_eq!(
            built,
            Predicate::compare(column, ComparisonOp::LessThan, ScalarValue::Int(5))
        );
    }

    #[test]
    fn disjunction_accepts_nested_predicates() {
        let a = ColumnRef::new(0, "a");
        let range = PredicateBuilder::and()
            .greater_than(a.clone(), 1i64)
            .less_than(a.clone(), 9i64)
            .build();
        let built = PredicateBuilder::or()
            .predicate(range)
            .is_null(a.clone())
            .build();

        let PredicateNode::Inner(PredicateInner::Or(children)) = built.kind() else {
            panic!("expected disjunction, got {built:?}");
        };
        assert_eq!(children.len(), 2);
        assert!(matches!(
            children[0].kind(),
            PredicateNode::Inner(PredicateInner::And(_))
        ));
        assert_eq!(children[1], Predicate::is_null(a, false));
    }
}
