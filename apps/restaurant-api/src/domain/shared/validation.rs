//! Basic shape checks shared by the entity constructors.

use super::errors::DomainError;

/// Unwrap a required text field and reject blank values.
pub fn required_text(field: &str, value: Option<String>) -> Result<String, DomainError> {
    let value = value.ok_or_else(|| DomainError::missing(field))?;
    non_blank(field, value)
}

/// Reject a text value that is empty after trimming. The value is kept as sent.
pub fn non_blank(field: &str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(field, "must not be empty"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn required_text_passes_through_value() {
        let value = required_text("name", Some("Shawarma King".to_string())).unwrap();
        assert_eq!(value, "Shawarma King");
    }

    #[test]
    fn required_text_reports_missing_field() {
        let err = required_text("name", None).unwrap_err();
        assert_eq!(err, DomainError::missing("name"));
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\t\n" ; "whitespace")]
    fn blank_text_is_rejected(input: &str) {
        let err = non_blank("description", input.to_string()).unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }
}
