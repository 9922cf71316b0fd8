//! The record access capability.
//!
//! The engine never inspects record types directly. It asks a [`Record`]
//! for the structural field behind a serialized name, then asks it to read
//! that field. `#[derive(Record)]` implements both from the serde naming of
//! the struct, but the trait can also be implemented by hand.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::value::Value;

/// A structured value the engine can query by serialized field name.
///
/// # Derive Usage
///
/// ```
/// use mempage::{PageRequest, Record};
/// use serde::Serialize;
///
/// #[derive(Serialize, Record)]
/// #[serde(rename_all = "camelCase")]
/// struct User {
///     display_name: String,
///     login_count: i64,
/// }
///
/// let users = vec![
///     User { display_name: "ada".into(), login_count: 3 },
///     User { display_name: "grace".into(), login_count: 7 },
/// ];
///
/// let page = PageRequest::new().and_eq("loginCount", "7").run(&users);
/// assert_eq!(page.total_count, 1);
/// ```
///
/// # Manual Implementation
///
/// ```
/// use mempage::{FieldId, FieldPath, FieldValue, Record, Value};
///
/// struct Tag {
///     label: String,
/// }
///
/// impl Record for Tag {
///     fn resolve_tag(&self, tag: &str) -> Option<FieldId> {
///         (tag == "label").then(|| FieldId::new("label"))
///     }
///
///     fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>> {
///         match field.split_first()? {
///             ("label", rest) if rest.is_empty() => Some(self.label.field_value()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Finds the structural field whose serialized name is `tag`.
    ///
    /// Fields of flattened sub-records are searched depth-first in
    /// declaration order; the first match wins.
    fn resolve_tag(&self, tag: &str) -> Option<FieldId>;

    /// Reads the field identified by a previous [`resolve_tag`](Record::resolve_tag).
    fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>>;

    /// Name of the record type, for diagnostics.
    fn record_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn resolve_tag(&self, tag: &str) -> Option<FieldId> {
        (**self).resolve_tag(tag)
    }

    fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>> {
        (**self).read_field(field)
    }

    fn record_name(&self) -> &'static str {
        (**self).record_name()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn resolve_tag(&self, tag: &str) -> Option<FieldId> {
        (**self).resolve_tag(tag)
    }

    fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>> {
        (**self).read_field(field)
    }

    fn record_name(&self) -> &'static str {
        (**self).record_name()
    }
}

impl<T: Record + ?Sized> Record for Rc<T> {
    fn resolve_tag(&self, tag: &str) -> Option<FieldId> {
        (**self).resolve_tag(tag)
    }

    fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>> {
        (**self).read_field(field)
    }

    fn record_name(&self) -> &'static str {
        (**self).record_name()
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn resolve_tag(&self, tag: &str) -> Option<FieldId> {
        (**self).resolve_tag(tag)
    }

    fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>> {
        (**self).read_field(field)
    }

    fn record_name(&self) -> &'static str {
        (**self).record_name()
    }
}

/// Access to a sub-record held by a field, through any pointer wrapping.
///
/// `#[derive(Record)]` implements this for the deriving type itself; the
/// impls below let a field hold it behind `Box`, `Rc`, `Arc` or `Option`.
/// An empty `Option` has no sub-record.
pub trait Nested {
    fn nested_record(&self) -> Option<&dyn Record>;
}

impl<T: Nested + ?Sized> Nested for &T {
    fn nested_record(&self) -> Option<&dyn Record> {
        (**self).nested_record()
    }
}

impl<T: Nested + ?Sized> Nested for Box<T> {
    fn nested_record(&self) -> Option<&dyn Record> {
        (**self).nested_record()
    }
}

impl<T: Nested + ?Sized> Nested for Rc<T> {
    fn nested_record(&self) -> Option<&dyn Record> {
        (**self).nested_record()
    }
}

impl<T: Nested + ?Sized> Nested for Arc<T> {
    fn nested_record(&self) -> Option<&dyn Record> {
        (**self).nested_record()
    }
}

impl<T: Nested> Nested for Option<T> {
    fn nested_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(|inner| inner.nested_record())
    }
}

/// Identifies a structural field of a record.
///
/// A field promoted from a flattened sub-record carries the chain of
/// structural names leading to it, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    path: Vec<&'static str>,
}

impl FieldId {
    /// A field declared directly on the record.
    pub fn new(field: &'static str) -> Self {
        FieldId { path: vec![field] }
    }

    /// A field reached through the sub-record held in `field`.
    pub fn nested(field: &'static str, inner: FieldId) -> Self {
        let mut path = Vec::with_capacity(inner.path.len() + 1);
        path.push(field);
        path.extend(inner.path);
        FieldId { path }
    }

    /// Borrows this identifier as a path for [`Record::read_field`].
    pub fn as_path(&self) -> FieldPath<'_> {
        FieldPath(&self.path)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path.join("."))
    }
}

/// Borrowed view of a [`FieldId`], consumed one structural name at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath<'a>(&'a [&'static str]);

impl<'a> FieldPath<'a> {
    /// Splits off the outermost structural name.
    pub fn split_first(self) -> Option<(&'static str, FieldPath<'a>)> {
        let (head, rest) = self.0.split_first()?;
        Some((*head, FieldPath(rest)))
    }

    /// Returns `true` when no structural names are left.
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    struct Address {
        city: String,
    }

    impl Record for Address {
        fn resolve_tag(&self, tag: &str) -> Option<FieldId> {
            (tag == "city").then(|| FieldId::new("city"))
        }

        fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>> {
            match field.split_first()? {
                ("city", rest) if rest.is_empty() => Some(self.city.field_value()),
                _ => None,
            }
        }
    }

    impl Nested for Address {
        fn nested_record(&self) -> Option<&dyn Record> {
            Some(self)
        }
    }

    #[test]
    fn field_id_display() {
        let id = FieldId::nested("home", FieldId::nested("address", FieldId::new("city")));
        assert_eq!(id.to_string(), "home.address.city");
    }

    #[test]
    fn field_path_split() {
        let id = FieldId::nested("address", FieldId::new("city"));
        let (head, rest) = id.as_path().split_first().unwrap();
        assert_eq!(head, "address");
        assert!(!rest.is_empty());
        let (head, rest) = rest.split_first().unwrap();
        assert_eq!(head, "city");
        assert!(rest.is_empty());
        assert!(rest.split_first().is_none());
    }

    #[test]
    fn pointer_records_forward() {
        let address = Box::new(Address {
            city: "Lisbon".to_string(),
        });
        let id = address.resolve_tag("city").unwrap();
        assert_eq!(address.read_field(id.as_path()), Some(Value::String("Lisbon")));
        assert!(address.record_name().ends_with("Address"));
    }

    #[test]
    fn nested_through_option() {
        let present = Some(Arc::new(Address {
            city: "Oslo".to_string(),
        }));
        let absent: Option<Arc<Address>> = None;
        assert!(present.nested_record().is_some());
        assert!(absent.nested_record().is_none());
    }
}
