//! Page request and its builder.
//!
//! The [`PageRequest`] struct is the declarative input of the engine. It
//! serializes with the wire names `page`, `pageSize`, `filters` and `sorts`,
//! and offers a fluent builder for requests built in code.

use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;
use crate::op::Operation;
use crate::pager::{PageResult, Pager};
use crate::record::Record;
use crate::sort::SortSpec;

/// A filter, sort and page request.
///
/// Filters are AND-combined in order; sorts are applied left to right; the
/// page window is taken last.
///
/// # Example
///
/// ```
/// use mempage::{Operation, PageRequest};
///
/// let request = PageRequest::new()
///     .and_like("name", "ra")
///     .and("status", Operation::In, ["open,review"])
///     .and_not_null("owner.email")
///     .order_desc("priority")
///     .order_asc("name")
///     .page(2)
///     .page_size(20)
///     .build();
///
/// assert_eq!(request.filters.len(), 3);
/// assert_eq!(request.sorts.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    /// Items per page; zero means the configured default.
    pub page_size: i64,
    /// Filters, AND-combined in order.
    pub filters: Vec<FilterSpec>,
    /// Sort keys, most significant first.
    pub sorts: Vec<SortSpec>,
}

impl PageRequest {
    /// Creates an empty request.
    ///
    /// An empty request matches every record and, with page 0, produces no
    /// window; set [`page`](Self::page) to get one.
    pub fn new() -> Self {
        PageRequest::default()
    }

    // ========================================================================
    // Window
    // ========================================================================

    /// Sets the 1-based page number.
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Adds a filter.
    pub fn and<I, S>(mut self, key: &str, op: Operation, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(FilterSpec::new(key, op, values));
        self
    }

    /// Adds an exact-match filter.
    pub fn and_eq(self, key: &str, value: &str) -> Self {
        self.and(key, Operation::Eq, [value])
    }

    /// Adds a not-equal filter.
    pub fn and_ne(self, key: &str, value: &str) -> Self {
        self.and(key, Operation::Ne, [value])
    }

    /// Adds a substring filter.
    pub fn and_like(self, key: &str, value: &str) -> Self {
        self.and(key, Operation::Like, [value])
    }

    /// Adds a filter matching any of the values as a substring.
    pub fn and_in<I, S>(self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.and(key, Operation::In, values)
    }

    /// Adds a filter excluding exact matches of the values.
    pub fn and_not_in<I, S>(self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.and(key, Operation::NotIn, values)
    }

    /// Adds an is-empty check.
    pub fn and_null(self, key: &str) -> Self {
        self.and(key, Operation::IsNull, Vec::<String>::new())
    }

    /// Adds a not-empty check.
    pub fn and_not_null(self, key: &str) -> Self {
        self.and(key, Operation::NotNull, Vec::<String>::new())
    }

    // ========================================================================
    // Sorts
    // ========================================================================

    /// Adds an ascending sort key.
    pub fn order_asc(mut self, key: &str) -> Self {
        self.sorts.push(SortSpec::asc(key));
        self
    }

    /// Adds a descending sort key.
    pub fn order_desc(mut self, key: &str) -> Self {
        self.sorts.push(SortSpec::desc(key));
        self
    }

    /// Finalizes the request.
    ///
    /// This is a no-op that makes builder chains read naturally.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs this request over a collection with the default configuration.
    pub fn run<'a, T: Record>(&self, records: &'a [T]) -> PageResult<'a, T> {
        Pager::default().page(self, records)
    }
}
