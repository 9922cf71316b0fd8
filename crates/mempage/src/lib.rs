//! Mempage - filter, sort and paginate in-memory record collections.
//!
//! Mempage answers list-view requests over plain Rust collections: keep the
//! records matching a set of filters, order them by one or more keys, then
//! cut out a 1-based page window. Records are addressed by their serialized
//! field names, so a request coming from a JSON client can name the same keys
//! it sees on the wire.
//!
//! # Quick Start
//!
//! ```rust
//! use mempage::{PageRequest, Record};
//! use serde::Serialize;
//!
//! #[derive(Serialize, Record)]
//! #[serde(rename_all = "camelCase")]
//! struct Ticket {
//!     title: String,
//!     priority: i64,
//!     is_open: bool,
//! }
//!
//! let tickets = vec![
//!     Ticket { title: "Crash on save".into(), priority: 1, is_open: true },
//!     Ticket { title: "Typo in footer".into(), priority: 3, is_open: true },
//!     Ticket { title: "Slow startup".into(), priority: 2, is_open: false },
//!     Ticket { title: "Save dialog flickers".into(), priority: 2, is_open: true },
//! ];
//!
//! let page = PageRequest::new()
//!     .and_eq("isOpen", "true")
//!     .order_asc("priority")
//!     .page(1)
//!     .page_size(2)
//!     .run(&tickets);
//!
//! assert_eq!(page.total_count, 3);
//! let titles: Vec<&str> = page.items().iter().map(|t| t.title.as_str()).collect();
//! assert_eq!(titles, vec!["Crash on save", "Save dialog flickers"]);
//! ```
//!
//! # Request Semantics
//!
//! A request runs three stages in a fixed order:
//!
//! ```text
//! filtered = records matching every filter (input order kept)
//! total    = len(filtered)
//! sorted   = stable sort of filtered by the sort keys, left to right
//! result   = sorted[size * (page - 1) .. size * page]   (clamped)
//! ```
//!
//! A page below 1 produces no window at all (`result` is `None`), which is
//! distinct from a page past the end (an empty window). A page size of zero
//! means the configured default, 10 unless changed; a negative page size
//! produces no window either.
//!
//! # Operations
//!
//! | Wire name | Operation | Matches when |
//! |-----------|-----------|--------------|
//! | `like` | [`Operation::Like`] | the value contains any filter value |
//! | `eq` | [`Operation::Eq`] | the value equals any filter value |
//! | `ne` | [`Operation::Ne`] | the value equals no filter value |
//! | `in` | [`Operation::In`] | the value contains any comma-separated filter value |
//! | `not in` | [`Operation::NotIn`] | the value equals none of the comma-separated filter values |
//! | `is null` | [`Operation::IsNull`] | the value is empty |
//! | `not null` | [`Operation::NotNull`] | the value is not empty |
//!
//! Boolean and 64-bit integer fields parse the filter values instead of
//! matching text; `is null` and `not null` settle the whole record on the
//! first such filter. See [`FilterSpec`] for the full rules.
//!
//! # Key Resolution
//!
//! Keys are matched against serialized names (`#[serde(rename)]`,
//! `rename_all`, aliases). Fields of flattened sub-records answer to their
//! own names; a dotted key such as `owner.email` descends through fields
//! marked `#[record(nested)]`. A key that cannot be resolved excludes the
//! record from the filter stage and sorts as equal in the sort stage; both
//! cases are reported in [`PageResult::diagnostics`].

mod compare;
mod config;
mod diagnostics;
mod error;
mod filter;
mod op;
mod pager;
mod paginate;
mod record;
mod request;
mod resolve;
mod sort;
mod value;

// Re-export public API
pub use compare::compare_values;
pub use config::{PageConfig, DEFAULT_PAGE_SIZE, PAGE_SIZE_VAR};
pub use diagnostics::{Diagnostic, Diagnostics, Stage};
pub use error::{ConfigError, ResolveError, Result};
pub use filter::{count_matches, filter_records, matches, parse_bool, FilterSpec, Verdict};
pub use op::Operation;
pub use pager::{PageResult, Pager};
pub use paginate::{paginate, window};
pub use record::{FieldId, FieldPath, Nested, Record};
pub use request::PageRequest;
pub use resolve::resolve;
pub use sort::{sort_records, SortSpec};
pub use value::{FieldValue, Float, Int, Timestamp, Value};

#[cfg(feature = "derive")]
pub use mempage_macros::Record;
