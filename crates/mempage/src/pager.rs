//! Request orchestration.
//!
//! A [`Pager`] runs the three stages of a request in their fixed order:
//! filter (which also fixes the total count), sort, then paginate.

use serde::Serialize;
use tracing::trace;

use crate::config::PageConfig;
use crate::diagnostics::Diagnostics;
use crate::filter::filter_records;
use crate::paginate::window;
use crate::record::Record;
use crate::request::PageRequest;
use crate::sort::sort_records;

/// Runs [`PageRequest`]s over in-memory collections.
///
/// A pager holds only its [`PageConfig`]; it is cheap to copy and can be
/// shared across threads. Changing the configuration needs `&mut self`.
///
/// # Example
///
/// ```
/// use mempage::{PageConfig, PageRequest, Pager, Record};
///
/// #[derive(Record)]
/// struct Task {
///     title: String,
///     done: bool,
/// }
///
/// let tasks: Vec<Task> = (1..=12)
///     .map(|n| Task { title: format!("task {n:02}"), done: n % 3 == 0 })
///     .collect();
///
/// let pager = Pager::new(PageConfig::default().with_default_page_size(3));
/// let request = PageRequest::new().and_eq("done", "false").order_desc("title").page(1);
/// let page = pager.page(&request, &tasks);
///
/// assert_eq!(page.total_count, 8);
/// let titles: Vec<&str> = page.items().iter().map(|t| t.title.as_str()).collect();
/// assert_eq!(titles, vec!["task 11", "task 10", "task 08"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    config: PageConfig,
}

impl Pager {
    /// Creates a pager with the given configuration.
    pub fn new(config: PageConfig) -> Self {
        Pager { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: PageConfig) {
        self.config = config;
    }

    /// Runs a request over a collection.
    pub fn page<'a, T: Record>(&self, request: &PageRequest, records: &'a [T]) -> PageResult<'a, T> {
        let mut diagnostics = Diagnostics::new();

        let mut items = filter_records(records, &request.filters, &mut diagnostics);
        let total_count = items.len();
        trace!(input = records.len(), total_count, "filtered");

        sort_records(&mut items, &request.sorts, &mut diagnostics);

        let page_size = self.config.effective_page_size(request.page_size);
        let result = window(total_count, request.page, request.page_size, &self.config)
            .map(|range| items[range].to_vec());
        trace!(
            page = request.page,
            page_size,
            window = result.as_ref().map(Vec::len),
            "paginated"
        );

        PageResult {
            result,
            total_count,
            page_size,
            diagnostics,
        }
    }

    /// Runs a request over a single record, treated as a one-element
    /// collection.
    pub fn page_one<'a, T: Record>(&self, request: &PageRequest, record: &'a T) -> PageResult<'a, T> {
        self.page(request, std::slice::from_ref(record))
    }
}

/// Output of a request.
///
/// Serializes as `{"result": [...] | null, "totalCount": n}`; the effective
/// page size and the diagnostics are not part of the wire form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<'a, T> {
    /// The page window, or `None` when the request named no valid page.
    pub result: Option<Vec<&'a T>>,
    /// Number of records that passed the filters.
    pub total_count: usize,
    /// Page size after default substitution.
    #[serde(skip)]
    pub page_size: i64,
    /// Anomalies observed while serving the request.
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

impl<'a, T> PageResult<'a, T> {
    /// The page window, empty when none was produced.
    pub fn items(&self) -> &[&'a T] {
        self.result.as_deref().unwrap_or(&[])
    }

    /// Returns `true` when a window was produced, even an empty one.
    pub fn has_window(&self) -> bool {
        self.result.is_some()
    }

    /// Clones the window out of the borrowed collection.
    pub fn into_owned(self) -> Option<Vec<T>>
    where
        T: Clone,
    {
        self.result
            .map(|items| items.into_iter().cloned().collect())
    }
}

impl<T> Clone for PageResult<'_, T> {
    fn clone(&self) -> Self {
        PageResult {
            result: self.result.clone(),
            total_count: self.total_count,
            page_size: self.page_size,
            diagnostics: self.diagnostics.clone(),
        }
    }
}
