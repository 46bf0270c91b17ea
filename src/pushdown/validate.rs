use lakefilter_predicate::{Predicate, PredicateLeaf, PredicateVisitor};

use super::ConvertError;
use crate::schema::RowType;

/// Checks that every column a predicate references sits at its index in
/// `row_type`.
pub fn validate_field_indices(
    predicate: &Predicate,
    row_type: &RowType,
) -> Result<(), ConvertError> {
    predicate.accept(&mut FieldIndexValidator { row_type })
}

struct FieldIndexValidator<'a> {
    row_type: &'a RowType,
}

impl PredicateVisitor for FieldIndexValidator<'_> {
    type Error = ConvertError;
    type Value = ();

    fn visit_leaf(&mut self, leaf: &PredicateLeaf) -> Result<(), ConvertError> {
        let Some(column) = leaf.column() else {
            return Ok(());
        };
        match self.row_type.field(column.index) {
            Some(field) if field.name == column.name => Ok(()),
            _ => Err(ConvertError::InvalidFieldIndex {
                column: column.name.to_string(),
                index: column.index,
            }),
        }
    }

    fn combine_not(&mut self, _original: &Predicate, _child: ()) -> Result<(), ConvertError> {
        Ok(())
    }

    fn combine_and(
        &mut self,
        _original: &Predicate,
        _children: Vec<()>,
    ) -> Result<(), ConvertError> {
        Ok(())
    }

    fn combine_or(
        &mut self,
        _original: &Predicate,
        _children: Vec<()>,
    ) -> Result<(), ConvertError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lakefilter_predicate::{ColumnRef, ComparisonOp, ScalarValue};

    use super::*;
    use crate::schema::{DataField, DataType};

    fn row_type() -> RowType {
        RowType::new(vec![
            DataField::new(0, "id", DataType::Int),
            DataField::new(1, "name", DataType::VarChar(8)),
        ])
    }

    #[test]
    fn accepts_matching_columns() {
        let predicate = Predicate::or([
            Predicate::compare(ColumnRef::new(0, "id"), ComparisonOp::Equal, ScalarValue::Int(1)),
            !Predicate::is_null(ColumnRef::new(1, "name"), false),
            Predicate::always_false(),
        ]);
        assert_eq!(validate_field_indices(&predicate, &row_type()), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let predicate = Predicate::is_null(ColumnRef::new(5, "id"), false);
        assert_eq!(
            validate_field_indices(&predicate, &row_type()),
            Err(ConvertError::InvalidFieldIndex {
                column: "id".into(),
                index: 5
            })
        );
    }

    #[test]
    fn rejects_misplaced_name() {
        let predicate = Predicate::and([
            Predicate::is_null(ColumnRef::new(0, "id"), true),
            Predicate::is_null(ColumnRef::new(0, "name"), false),
        ]);
        assert!(matches!(
            validate_field_indices(&predicate, &row_type()),
            Err(ConvertError::InvalidFieldIndex { index: 0, .. })
        ));
    }
}
