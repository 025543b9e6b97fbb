//! Offset-based pagination for list queries.
//!
//! [`Pagination`] bounds a result window with a skip offset and a maximum row
//! count. Both arrive as optional text (query-string values) and default to
//! `skip = 0`, `limit = 10`.

use crate::{
    error::{PageParam, QueryError},
    query::QueryBuilder,
};

/// Skip offset used when the caller supplies none.
pub const DEFAULT_SKIP: u64 = 0;
/// Maximum row count used when the caller supplies none.
pub const DEFAULT_LIMIT: u64 = 10;

/// A bounded result window.
///
/// # Example
///
/// ```ignore
/// use census_core::page::Pagination;
///
/// let page = Pagination::parse(Some("20"), None)?;
/// assert_eq!(page.skip, 20);
/// assert_eq!(page.limit, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of matching documents to skip.
    pub skip: u64,
    /// Maximum number of documents to return. Zero yields an empty page.
    pub limit: u64,
}

impl Pagination {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Parses textual `skip` and `limit` values, applying defaults for absent ones.
    ///
    /// A present value must be a non-negative base-10 integer. An empty string is
    /// present, so it fails like any other non-number. No upper bound is applied
    /// to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPagination`] naming the first parameter that
    /// failed, checking `skip` before `limit`.
    pub fn parse(skip: Option<&str>, limit: Option<&str>) -> Result<Self, QueryError> {
        Ok(Self {
            skip: parse_param(PageParam::Skip, skip, DEFAULT_SKIP)?,
            limit: parse_param(PageParam::Limit, limit, DEFAULT_LIMIT)?,
        })
    }

    /// Applies this window to a query under construction.
    pub fn apply(&self, builder: QueryBuilder) -> QueryBuilder {
        builder.offset(self.skip).limit(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: DEFAULT_SKIP, limit: DEFAULT_LIMIT }
    }
}

fn parse_param(param: PageParam, raw: Option<&str>, default: u64) -> Result<u64, QueryError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<u64>()
            .map_err(|_| QueryError::InvalidPagination { param, value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;

    #[test]
    fn defaults_apply_when_omitted() {
        assert_eq!(Pagination::parse(None, None), Ok(Pagination::new(0, 10)));
        assert_eq!(Pagination::default(), Pagination::new(0, 10));
    }

    #[test]
    fn parses_supplied_values() {
        assert_eq!(
            Pagination::parse(Some("30"), Some("100")),
            Ok(Pagination::new(30, 100))
        );
        assert_eq!(Pagination::parse(None, Some("0")), Ok(Pagination::new(0, 0)));
    }

    #[test]
    fn unparseable_skip_names_skip() {
        let err = Pagination::parse(Some("x"), Some("y")).unwrap_err();

        assert_eq!(
            err,
            QueryError::InvalidPagination { param: PageParam::Skip, value: "x".to_string() }
        );
    }

    #[test]
    fn unparseable_limit_names_limit() {
        let err = Pagination::parse(Some("5"), Some("ten")).unwrap_err();

        assert!(matches!(
            err,
            QueryError::InvalidPagination { param: PageParam::Limit, .. }
        ));
    }

    #[test]
    fn negative_and_empty_values_are_rejected() {
        assert!(Pagination::parse(Some("-1"), None).is_err());
        assert!(Pagination::parse(None, Some("-10")).is_err());
        assert!(Pagination::parse(Some(""), None).is_err());
    }

    #[test]
    fn large_limits_are_not_clamped() {
        let page = Pagination::parse(None, Some("1000000")).unwrap();

        assert_eq!(page.limit, 1_000_000);
    }

    #[test]
    fn apply_sets_query_window() {
        let query = Pagination::new(20, 5).apply(Query::builder()).build();

        assert_eq!(query.offset, Some(20));
        assert_eq!(query.limit, Some(5));
    }
}
