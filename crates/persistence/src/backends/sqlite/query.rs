//! Translation of list queries into SQL fragments.

use petstore_model::{ListQuery, SortDirection};

use crate::error::{StorageResult, ValidationError};

/// API field name to column mapping for equality filters.
const FILTER_COLUMNS: &[(&str, &str)] = &[("name", "name"), ("tag", "tag")];

/// API field name to column mapping for sort keys.
const SORT_COLUMNS: &[(&str, &str)] = &[
    ("name", "name"),
    ("tag", "tag"),
    ("createdAt", "created_at"),
];

/// A WHERE clause with its positional parameters, ready to append to a
/// SELECT over the `pets` table.
#[derive(Debug)]
pub(super) struct WhereClause {
    pub sql: String,
    pub params: Vec<String>,
}

/// Build the WHERE clause for a query's equality filters.
///
/// The REST layer validates field names against the allow-list before a
/// query reaches storage, but the translation re-checks here so the
/// backend never interpolates an unvetted name into SQL.
pub(super) fn build_where(query: &ListQuery) -> StorageResult<WhereClause> {
    let mut predicates = Vec::new();
    let mut params = Vec::new();
    let mut unknown = Vec::new();

    for (field, value) in &query.filters {
        match FILTER_COLUMNS.iter().find(|(api, _)| *api == field.as_str()) {
            Some((_, column)) => {
                predicates.push(format!("{column} = ?{}", params.len() + 1));
                params.push(value.clone());
            }
            None => unknown.push(field.clone()),
        }
    }

    if !unknown.is_empty() {
        return Err(ValidationError::UnknownFilterFields { fields: unknown }.into());
    }

    let sql = if predicates.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", predicates.join(" AND "))
    };
    Ok(WhereClause { sql, params })
}

/// Build the ORDER BY clause for a query's sort keys.
///
/// Keys apply in the order given. A trailing `rowid` key keeps the
/// ordering total so pagination never shuffles ties between pages.
pub(super) fn build_order_by(query: &ListQuery) -> StorageResult<String> {
    let mut terms = Vec::new();
    let mut unknown = Vec::new();

    for (field, direction) in query.sort.iter() {
        match SORT_COLUMNS.iter().find(|(api, _)| *api == field) {
            Some((_, column)) => {
                let dir = match direction {
                    SortDirection::Asc => "ASC",
                    SortDirection::Desc => "DESC",
                };
                terms.push(format!("{column} {dir}"));
            }
            None => unknown.push(field.to_string()),
        }
    }

    if !unknown.is_empty() {
        return Err(ValidationError::UnknownSortFields { fields: unknown }.into());
    }

    terms.push("rowid ASC".to_string());
    Ok(format!(" ORDER BY {}", terms.join(", ")))
}
