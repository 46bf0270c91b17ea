use super::{Predicate, PredicateInner, PredicateLeaf, PredicateNode};

/// Visitor that walks predicate trees bottom-up and folds them into a value.
pub trait PredicateVisitor {
    /// Error type used when a visit fails.
    type Error;
    /// Concrete value type produced while walking the predicate.
    type Value;

    /// Evaluates a leaf predicate and returns its result.
    fn visit_leaf(&mut self, leaf: &PredicateLeaf) -> Result<Self::Value, Self::Error>;

    /// Combines the result of a negated child predicate.
    fn combine_not(
        &mut self,
        original: &Predicate,
        child: Self::Value,
    ) -> Result<Self::Value, Self::Error>;

    /// Combines an `AND` clause from the supplied child results.
    fn combine_and(
        &mut self,
        original: &Predicate,
        children: Vec<Self::Value>,
    ) -> Result<Self::Value, Self::Error>;

    /// Combines an `OR` clause from the supplied child results.
    fn combine_or(
        &mut self,
        original: &Predicate,
        children: Vec<Self::Value>,
    ) -> Result<Self::Value, Self::Error>;

    /// Visits the supplied predicate by walking the expression tree.
    fn visit_predicate(&mut self, predicate: &Predicate) -> Result<Self::Value, Self::Error> {
        self.visit_node(predicate.kind(), predicate)
    }

    /// Internal helper that evaluates a predicate node recursively.
    fn visit_node(
        &mut self,
        node: &PredicateNode,
        original: &Predicate,
    ) -> Result<Self::Value, Self::Error> {
        match node {
            PredicateNode::Leaf(leaf) => self.visit_leaf(leaf),
            PredicateNode::Inner(PredicateInner::Not(inner)) => {
                let child = self.visit_predicate(inner)?;
                self.combine_not(original, child)
            }
            PredicateNode::Inner(PredicateInner::And(clauses)) => {
                debug_assert!(
                    !clauses.is_empty(),
                    "Predicate::and enforces at least one clause"
                );
                let mut children = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    children.push(self.visit_predicate(clause)?);
                }
                self.combine_and(original, children)
            }
            PredicateNode::Inner(PredicateInner::Or(clauses)) => {
                debug_assert!(
                    !clauses.is_empty(),
                    "Predicate::or enforces at least one clause"
                );
                let mut children = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    children.push(self.visit_predicate(clause)?);
                }
                self.combine_or(original, children)
            }
        }
    }
}
