#![deny(missing_docs)]
//! Core predicate structures shared by the pushdown translator and scan planners.

mod builder;
mod value;
mod visitor;

use std::{fmt, ops, sync::Arc};

pub use builder::PredicateBuilder;
pub use value::{Decimal, ScalarValue, Timestamp};
pub use visitor::PredicateVisitor;

/// Reference identifying a column used inside predicates.
///
/// The index is the column's position in the table schema and is the identity
/// scan planners use; the name is carried for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Ordinal of the column within the table schema.
    pub index: usize,
    /// Canonical column name.
    pub name: Arc<str>,
}

impl ColumnRef {
    /// Creates a new column reference from a schema position and a name.
    #[must_use]
    pub fn new<N>(index: usize, name: N) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.index)
    }
}

/// Comparison operator used by binary predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Equals (`=`).
    Equal,
    /// Not equals (`!=`).
    NotEqual,
    /// Less than (`<`).
    LessThan,
    /// Less than or equal to (`<=`).
    LessThanOrEqual,
    /// Greater than (`>`).
    GreaterThan,
    /// Greater than or equal to (`>=`).
    GreaterThanOrEqual,
}

impl ComparisonOp {
    /// Returns a textual representation of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessThanOrEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterThanOrEqual => ">=",
        }
    }

    /// Returns true for the four ordering operators.
    #[must_use]
    pub fn is_range(self) -> bool {
        matches!(
            self,
            ComparisonOp::LessThan
                | ComparisonOp::LessThanOrEqual
                | ComparisonOp::GreaterThan
                | ComparisonOp::GreaterThanOrEqual
        )
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical predicate handed to the storage scan planner.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    kind: PredicateNode,
}

impl Predicate {
    /// Returns a reference to the underlying node.
    #[must_use]
    pub fn kind(&self) -> &PredicateNode {
        &self.kind
    }

    /// Builds a `column op value` comparison leaf.
    #[must_use]
    pub fn compare(column: ColumnRef, op: ComparisonOp, value: ScalarValue) -> Self {
        Self::from_leaf(PredicateLeaf::Compare { column, op, value })
    }

    /// Builds an `IN` (or `NOT IN` when `negated`) leaf.
    #[must_use]
    pub fn in_list<I>(column: ColumnRef, list: I, negated: bool) -> Self
    where
        I: IntoIterator<Item = ScalarValue>,
    {
        Self::from_leaf(PredicateLeaf::InList {
            column,
            list: list.into_iter().collect(),
            negated,
        })
    }

    /// Builds an `IS NULL` (or `IS NOT NULL` when `negated`) leaf.
    #[must_use]
    pub fn is_null(column: ColumnRef, negated: bool) -> Self {
        Self::from_leaf(PredicateLeaf::IsNull { column, negated })
    }

    /// Predicate that no row satisfies.
    #[must_use]
    pub fn always_false() -> Self {
        Self::from_leaf(PredicateLeaf::AlwaysFalse)
    }

    /// Returns true when this predicate is the unsatisfiable leaf.
    #[must_use]
    pub fn is_always_false(&self) -> bool {
        matches!(self.kind, PredicateNode::Leaf(PredicateLeaf::AlwaysFalse))
    }

    /// Builds a conjunction from the supplied clauses.
    ///
    /// Nested conjunctions are flattened and a single clause is returned as-is.
    ///
    /// # Panics
    ///
    /// Panics if no clauses are provided.
    #[must_use]
    pub fn and<I>(clauses: I) -> Self
    where
        I: IntoIterator<Item = Predicate>,
    {
        let mut acc = Vec::new();
        for clause in clauses {
            match clause.into_kind() {
                PredicateNode::Inner(PredicateInner::And(mut nested)) => acc.append(&mut nested),
                other => acc.push(Predicate::from_kind(other)),
            }
        }

        assert!(!acc.is_empty(), "Predicate::and requires at least one clause");

        if acc.len() == 1 {
            acc.pop().expect("length checked")
        } else {
            Self::from_kind(PredicateNode::Inner(PredicateInner::And(acc)))
        }
    }

    /// Builds a disjunction from the supplied clauses.
    ///
    /// Nested disjunctions are flattened and a single clause is returned as-is.
    ///
    /// # Panics
    ///
    /// Panics if no clauses are provided.
    #[must_use]
    pub fn or<I>(clauses: I) -> Self
    where
        I: IntoIterator<Item = Predicate>,
    {
        let mut acc = Vec::new();
        for clause in clauses {
            match clause.into_kind() {
                PredicateNode::Inner(PredicateInner::Or(mut nested)) => acc.append(&mut nested),
                other => acc.push(Predicate::from_kind(other)),
            }
        }

        assert!(!acc.is_empty(), "Predicate::or requires at least one clause");

        if acc.len() == 1 {
            acc.pop().expect("length checked")
        } else {
            Self::from_kind(PredicateNode::Inner(PredicateInner::Or(acc)))
        }
    }

    /// Builds a conjunction from the supplied predicates, if any are provided.
    ///
    /// An unsatisfiable clause absorbs the whole conjunction.
    #[must_use]
    pub fn conjunction(predicates: Vec<Predicate>) -> Option<Predicate> {
        if predicates.iter().any(Predicate::is_always_false) {
            return Some(Predicate::always_false());
        }
        if predicates.is_empty() {
            None
        } else {
            Some(Predicate::and(predicates))
        }
    }

    /// Builds a predicate directly from a leaf node.
    #[must_use]
    pub fn from_leaf(leaf: PredicateLeaf) -> Self {
        Self::from_kind(PredicateNode::Leaf(leaf))
    }

    /// Accepts a visitor that walks the predicate tree bottom-up.
    pub fn accept<V>(&self, visitor: &mut V) -> Result<V::Value, V::Error>
    where
        V: PredicateVisitor + ?Sized,
    {
        visitor.visit_predicate(self)
    }

    fn from_kind(kind: PredicateNode) -> Self {
        Self { kind }
    }

    fn into_kind(self) -> PredicateNode {
        self.kind
    }
}

impl ops::Not for Predicate {
    type Output = Predicate;

    /// Wraps the predicate in a logical negation.
    fn not(self) -> Self::Output {
        Predicate::from_kind(PredicateNode::Inner(PredicateInner::Not(Box::new(self))))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PredicateNode::Leaf(leaf) => write!(f, "{leaf}"),
            PredicateNode::Inner(PredicateInner::Not(inner)) => write!(f, "NOT ({inner})"),
            PredicateNode::Inner(PredicateInner::And(children)) => {
                write_joined(f, children, " AND ")
            }
            PredicateNode::Inner(PredicateInner::Or(children)) => write_joined(f, children, " OR "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (idx, child) in children.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}

/// Categorises a predicate node as leaf or branch.
#[derive(Clone, Debug, PartialEq)]
pub enum PredicateNode {
    /// Leaf predicates without child expressions.
    Leaf(PredicateLeaf),
    /// Branch predicates with one or more child predicates.
    Inner(PredicateInner),
}

/// Leaf predicates encode terminal expressions with no child nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum PredicateLeaf {
    /// Comparison between a column and a literal.
    Compare {
        /// Column under comparison.
        column: ColumnRef,
        /// Operator.
        op: ComparisonOp,
        /// Literal right-hand side.
        value: ScalarValue,
    },
    /// Membership test against a literal list.
    InList {
        /// Column under inspection.
        column: ColumnRef,
        /// Literal candidates.
        list: Vec<ScalarValue>,
        /// True when representing `NOT IN`.
        negated: bool,
    },
    /// Null check (`IS NULL` / `IS NOT NULL`).
    IsNull {
        /// Column under inspection.
        column: ColumnRef,
        /// True when representing `IS NOT NULL`.
        negated: bool,
    },
    /// Matches no row at all.
    AlwaysFalse,
}

impl PredicateLeaf {
    /// Column referenced by the leaf, if any.
    #[must_use]
    pub fn column(&self) -> Option<&ColumnRef> {
        match self {
            PredicateLeaf::Compare { column, .. }
            | PredicateLeaf::InList { column, .. }
            | PredicateLeaf::IsNull { column, .. } => Some(column),
            PredicateLeaf::AlwaysFalse => None,
        }
    }
}

impl fmt::Display for PredicateLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateLeaf::Compare { column, op, value } => write!(f, "{column} {op} {value}"),
            PredicateLeaf::InList {
                column,
                list,
                negated,
            } => {
                let keyword = if *negated { "NOT IN" } else { "IN" };
                write!(f, "{column} {keyword} [")?;
                for (idx, value) in list.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            PredicateLeaf::IsNull { column, negated } => {
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                write!(f, "{column} {keyword}")
            }
            PredicateLeaf::AlwaysFalse => f.write_str("FALSE"),
        }
    }
}

/// Branch predicates contain one or more child predicates.
#[derive(Clone, Debug, PartialEq)]
pub enum PredicateInner {
    /// Logical negation.
    Not(Box<Predicate>),
    /// Conjunction over multiple predicates.
    And(Vec<Predicate>),
    /// Disjunction over multiple predicates.
    Or(Vec<Predicate>),
}
