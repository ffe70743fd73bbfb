//! List/query types: pagination, filtering, and sorting.
//!
//! A [`ListQuery`] describes a page request; a [`ListPage`] is the resolved
//! page, echoing the query fields verbatim alongside the items and the
//! total count over the filtered, unpaginated set.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Default page size when the caller does not supply a limit.
pub const DEFAULT_LIMIT: u64 = 20;

/// Sort direction for a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parses `asc`/`desc`, the only accepted spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// An ordered multi-key sort specification.
///
/// Key order is significant (first key is the primary sort), so this is a
/// sequence of pairs rather than a map; it still serializes as a JSON
/// object, preserving the request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec(Vec<(String, SortDirection)>);

impl SortSpec {
    /// Creates an empty sort specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sort key. A repeated field replaces the earlier entry
    /// (last occurrence wins), keeping the serialized object free of
    /// duplicate keys.
    pub fn push(&mut self, field: impl Into<String>, direction: SortDirection) {
        let field = field.into();
        self.0.retain(|(existing, _)| *existing != field);
        self.0.push((field, direction));
    }

    /// Returns true if no sort keys were requested.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of sort keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the keys in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SortDirection)> {
        self.0.iter().map(|(f, d)| (f.as_str(), *d))
    }
}

impl FromIterator<(String, SortDirection)> for SortSpec {
    fn from_iter<I: IntoIterator<Item = (String, SortDirection)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for SortSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, direction) in &self.0 {
            map.serialize_entry(field, direction)?;
        }
        map.end()
    }
}

/// A declarative page request: pagination window plus filter and sort maps.
///
/// Field names in `filters` and `sort` are restricted to the resource's
/// allow-list; validation happens at the request boundary before a query
/// reaches storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// Number of items to skip. Defaults to 0.
    pub offset: u64,

    /// Maximum number of items to return. Defaults to [`DEFAULT_LIMIT`].
    pub limit: u64,

    /// Equality predicates, one per field.
    pub filters: BTreeMap<String, String>,

    /// Multi-key ordering, stable, ties broken by natural storage order.
    pub sort: SortSpec,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            filters: BTreeMap::new(),
            sort: SortSpec::new(),
        }
    }
}

impl ListQuery {
    /// Creates a query with the given window and no filters or sort.
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }

    /// Adds an equality filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Appends a sort key.
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push(field, direction);
        self
    }
}

/// A resolved page of a resource collection.
///
/// `offset`, `limit`, `filters`, and `sort` are echoed back from the query
/// unchanged; `count` is the total over the filtered set independent of
/// pagination, and `items` holds at most `limit` entries.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    /// Echo of the requested offset.
    pub offset: u64,

    /// Echo of the requested limit.
    pub limit: u64,

    /// Echo of the requested filters.
    pub filters: BTreeMap<String, String>,

    /// Echo of the requested sort.
    pub sort: SortSpec,

    /// Total number of items matching `filters`, independent of pagination.
    pub count: u64,

    /// The page of items, at most `limit` long.
    pub items: Vec<T>,
}

impl<T> ListPage<T> {
    /// Builds a page from a query and its resolved items and count.
    pub fn resolved(query: ListQuery, items: Vec<T>, count: u64) -> Self {
        Self {
            offset: query.offset,
            limit: query.limit,
            filters: query.filters,
            sort: query.sort,
            count,
            items,
        }
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Maps the items to a different type, keeping the envelope.
    pub fn map<U, F>(self, f: F) -> ListPage<U>
    where
        F: FnMut(T) -> U,
    {
        ListPage {
            offset: self.offset,
            limit: self.limit,
            filters: self.filters,
            sort: self.sort,
            count: self.count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert!(query.filters.is_empty());
        assert!(query.sort.is_empty());
    }

    #[test]
    fn test_sort_spec_preserves_order() {
        let mut sort = SortSpec::new();
        sort.push("tag", SortDirection::Desc);
        sort.push("name", SortDirection::Asc);

        let keys: Vec<_> = sort.iter().map(|(f, _)| f.to_string()).collect();
        assert_eq!(keys, vec!["tag", "name"]);

        let json = serde_json::to_string(&sort).unwrap();
        assert_eq!(json, r#"{"tag":"desc","name":"asc"}"#);
    }

    #[test]
    fn test_sort_spec_repeated_key_last_wins() {
        let mut sort = SortSpec::new();
        sort.push("name", SortDirection::Asc);
        sort.push("tag", SortDirection::Asc);
        sort.push("name", SortDirection::Desc);

        assert_eq!(sort.len(), 2);
        let json = serde_json::to_string(&sort).unwrap();
        assert_eq!(json, r#"{"tag":"asc","name":"desc"}"#);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("ASC"), None);
        assert_eq!(SortDirection::parse("up"), None);
    }

    #[test]
    fn test_page_echoes_query() {
        let query = ListQuery::new(5, 10)
            .with_filter("name", "x")
            .with_sort("name", SortDirection::Asc);
        let echo = query.clone();

        let page = ListPage::resolved(query, vec!["a", "b"], 42);
        assert_eq!(page.offset, echo.offset);
        assert_eq!(page.limit, echo.limit);
        assert_eq!(page.filters, echo.filters);
        assert_eq!(page.sort, echo.sort);
        assert_eq!(page.count, 42);
    }

    #[test]
    fn test_page_map() {
        let page = ListPage::resolved(ListQuery::default(), vec![1, 2, 3], 3);
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.count, 3);
    }
}
