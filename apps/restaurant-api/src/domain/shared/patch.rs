//! Partial-update assignments.
//!
//! A patch type (e.g. `RestaurantPatch`) lists only the fields a client sent.
//! It is lowered into an ordered list of `(column, value)` pairs which the
//! persistence layer turns into a single `UPDATE ... SET` statement. Column
//! names are compile-time constants owned by each patch type.

use rust_decimal::Decimal;

use super::errors::DomainError;

/// A value destined for one column of an `UPDATE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain text column.
    Text(String),
    /// Boolean column.
    Bool(bool),
    /// Decimal stored in its canonical string form.
    Decimal(Decimal),
    /// List of strings stored as a JSON array.
    TextList(Vec<String>),
}

/// One `column = value` pair of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Column name.
    pub column: &'static str,
    /// New value.
    pub value: FieldValue,
}

/// A non-empty, ordered list of assignments.
///
/// Only [`AssignmentsBuilder::build`] creates one, so holders never see an
/// empty `SET` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignments(Vec<Assignment>);

#[allow(clippy::len_without_is_empty)]
impl Assignments {
    /// Iterate the assignments in the order fields were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.0.iter()
    }

    /// Number of columns being updated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> IntoIterator for &'a Assignments {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collects assignments for the fields present in a patch.
#[derive(Debug, Default)]
pub struct AssignmentsBuilder {
    assignments: Vec<Assignment>,
}

impl AssignmentsBuilder {
    /// Start an empty assignment list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `column = value` when the field was supplied.
    #[must_use]
    pub fn set(mut self, column: &'static str, value: Option<FieldValue>) -> Self {
        if let Some(value) = value {
            self.assignments.push(Assignment { column, value });
        }
        self
    }

    /// Finish the list, rejecting a patch that carries no fields.
    pub fn build(self) -> Result<Assignments, DomainError> {
        if self.assignments.is_empty() {
            return Err(DomainError::EmptyPatch);
        }
        Ok(Assignments(self.assignments))
    }
}
