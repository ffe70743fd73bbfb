//! Request-boundary validation.
//!
//! Validation returns typed results: `Ok(())` or the full list of
//! field-level problems, never a single opaque message.

use serde::Serialize;

use crate::list::ListQuery;

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path of the offending field (e.g. `name`, `filters[color]`).
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks every filter and sort key in `query` against the resource's
/// allow-lists, reporting each offending key by name.
pub fn validate_list_query(
    query: &ListQuery,
    filterable: &[&str],
    sortable: &[&str],
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    for field in query.filters.keys() {
        if !filterable.contains(&field.as_str()) {
            errors.push(FieldError::new(
                format!("filters[{}]", field),
                "unknown filter field",
            ));
        }
    }

    for (field, _) in query.sort.iter() {
        if !sortable.contains(&field) {
            errors.push(FieldError::new(
                format!("sort[{}]", field),
                "unknown sort field",
            ));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::SortDirection;
    use crate::pet::Pet;

    #[test]
    fn test_allowed_fields_pass() {
        let query = ListQuery::default()
            .with_filter("name", "Rex")
            .with_filter("tag", "dog")
            .with_sort("createdAt", SortDirection::Desc);
        assert!(
            validate_list_query(&query, Pet::FILTERABLE_FIELDS, Pet::SORTABLE_FIELDS).is_ok()
        );
    }

    #[test]
    fn test_unknown_fields_named() {
        let query = ListQuery::default()
            .with_filter("color", "red")
            .with_sort("weight", SortDirection::Asc);
        let errors =
            validate_list_query(&query, Pet::FILTERABLE_FIELDS, Pet::SORTABLE_FIELDS)
                .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "filters[color]");
        assert_eq!(errors[1].field, "sort[weight]");
    }

    #[test]
    fn test_empty_query_passes() {
        let query = ListQuery::default();
        assert!(
            validate_list_query(&query, Pet::FILTERABLE_FIELDS, Pet::SORTABLE_FIELDS).is_ok()
        );
    }
}
