//! Shared row decoding and update-statement helpers.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::domain::shared::{Assignments, FieldValue, StoreError};

/// Read one column, naming it in the error when absent or mistyped.
pub(crate) fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get::<T, _>(name)
        .map_err(|e| StoreError::MissingField(format!("{name}: {e}")))
}

/// Read a decimal stored as TEXT.
pub(crate) fn decimal_column(row: &SqliteRow, name: &str) -> Result<Decimal, StoreError> {
    let text: String = column(row, name)?;
    Decimal::from_str(&text).map_err(|e| StoreError::Serialization(format!("{name}: {e}")))
}

/// Read a list of strings stored as a JSON array.
pub(crate) fn text_list_column(row: &SqliteRow, name: &str) -> Result<Vec<String>, StoreError> {
    let text: String = column(row, name)?;
    Ok(serde_json::from_str(&text)?)
}

/// Append `SET col = ?, col = ?` for every assignment.
pub(crate) fn push_assignments(
    builder: &mut QueryBuilder<'_, Sqlite>,
    changes: &Assignments,
) -> Result<(), StoreError> {
    builder.push(" SET ");
    let mut set = builder.separated(", ");
    for assignment in changes {
        set.push(assignment.column);
        set.push_unseparated(" = ");
        match &assignment.value {
            FieldValue::Text(value) => set.push_bind_unseparated(value.clone()),
            FieldValue::Bool(value) => set.push_bind_unseparated(*value),
            FieldValue::Decimal(value) => set.push_bind_unseparated(value.to_string()),
            FieldValue::TextList(values) => {
                set.push_bind_unseparated(serde_json::to_string(values)?)
            }
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::AssignmentsBuilder;

    #[test]
    fn assignments_render_in_order_with_placeholders() {
        let changes = AssignmentsBuilder::new()
            .set("name", Some(FieldValue::Text("Miznon".to_string())))
            .set("cuisines", Some(FieldValue::TextList(vec!["Israeli".to_string()])))
            .build()
            .unwrap();

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE restaurants");
        push_assignments(&mut builder, &changes).unwrap();
        builder.push(" WHERE id = ").push_bind(1_i64);

        assert_eq!(
            builder.sql(),
            "UPDATE restaurants SET name = ?, cuisines = ? WHERE id = ?"
        );
    }
}
