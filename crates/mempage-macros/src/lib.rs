//! Proc macros for mempage.
//!
//! This crate provides `#[derive(Record)]`, which implements mempage's
//! `Record` trait from a struct's serialized field names. It is re-exported
//! by `mempage` under the default `derive` feature; depend on `mempage`
//! rather than on this crate directly.
//!
//! # Examples
//!
//! For working examples, see `mempage/tests/derive.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `Record` (and `Nested`) for a struct with named fields.
///
/// Fields are addressed by the name serde would serialize them under, so
/// existing `#[serde(...)]` annotations are honored without repetition.
///
/// # Serde Attributes Read
///
/// | Attribute | Effect |
/// |-----------|--------|
/// | `rename_all = "..."` (container) | Case rule for every field name |
/// | `rename = "..."` | Serialized name of the field |
/// | `rename(deserialize = "...")` | Extra name the field answers to |
/// | `alias = "..."` | Extra name the field answers to |
/// | `skip`, `skip_serializing` | Field cannot be addressed |
/// | `flatten` | Fields of the sub-record are promoted |
///
/// Any other serde key is ignored.
///
/// # Record Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `rename_all = "..."` (container) | Overrides serde's `rename_all` |
/// | `rename = "..."` | Overrides the serialized name |
/// | `alias = "..."` | Extra name the field answers to |
/// | `skip` | Exclude this field |
/// | `nested` | The field holds a sub-record reachable by dotted keys |
/// | `flatten` | Promote the sub-record's fields, as serde's `flatten` |
/// | `opaque` | Carry the field as an unsupported value; it never matches text |
///
/// Plain fields must implement `FieldValue`; `nested` and `flatten` fields
/// must implement `Nested`, which every derived record does, including
/// through `Box`, `Rc`, `Arc` and `Option`.
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Serialized-name constants (e.g., `Task::DUE_DATE` for `"dueDate"`)
/// 2. Implementation of `Record::resolve_tag()` and `Record::read_field()`
/// 3. Implementation of `Nested` for the struct itself
///
/// # Example
///
/// ```ignore
/// use mempage::{PageRequest, Record};
/// use serde::Serialize;
///
/// #[derive(Serialize, Record)]
/// #[serde(rename_all = "camelCase")]
/// struct Task {
///     title: String,
///     due_date: Option<chrono::DateTime<chrono::Utc>>,
///
///     #[record(nested)]
///     assignee: Option<Box<Person>>,
///
///     #[serde(skip)]
///     internal_id: u64,
/// }
///
/// #[derive(Serialize, Record)]
/// struct Person {
///     email: String,
/// }
///
/// let page = PageRequest::new()
///     .and_like("assignee.email", "@example.com")
///     .order_asc(Task::DUE_DATE)
///     .page(1)
///     .run(&tasks);
/// ```
#[proc_macro_derive(Record, attributes(record, serde))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
