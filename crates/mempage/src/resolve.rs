//! Dotted-path property resolution.
//!
//! A key such as `owner.address.city` is resolved one segment at a time:
//! each segment is looked up by serialized name on the current record and
//! every segment but the last must land on a nested record.

use crate::error::ResolveError;
use crate::record::Record;
use crate::value::Value;

/// Resolves a dotted path against a record.
///
/// Failure is an expected outcome (a typo in a request key, an empty
/// pointer on the way) and is reported as a [`ResolveError`], never a panic.
/// A resolved empty string or [`Value::Null`] is a success.
///
/// # Example
///
/// ```
/// use mempage::{resolve, Record, Value};
///
/// #[derive(Record)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Record)]
/// struct User {
///     #[record(nested)]
///     address: Option<Box<Address>>,
/// }
///
/// let user = User { address: Some(Box::new(Address { city: "Porto".into() })) };
/// assert_eq!(resolve(&user, "address.city"), Ok(Value::String("Porto")));
/// assert!(resolve(&user, "address.zip").is_err());
/// ```
pub fn resolve<'a>(record: &'a dyn Record, path: &str) -> Result<Value<'a>, ResolveError> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut current = record;
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            let value = resolve_segment(current, segment)?;
            current = value
                .as_record()
                .ok_or_else(|| ResolveError::NotARecord {
                    segment: segment.to_owned(),
                    found: value.kind_name(),
                })?;
        }
    }
    resolve_segment(current, leaf)
}

fn resolve_segment<'a>(record: &'a dyn Record, tag: &str) -> Result<Value<'a>, ResolveError> {
    let field = record
        .resolve_tag(tag)
        .ok_or_else(|| ResolveError::UnknownTag {
            tag: tag.to_owned(),
            record: record.record_name(),
        })?;

    record
        .read_field(field.as_path())
        .ok_or_else(|| ResolveError::UnreadableField {
            field: field.to_string(),
            record: record.record_name(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldId, FieldPath, Nested};
    use crate::value::{FieldValue, Int};

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

        fn record_name(&self) -> &'static str {
            "Address"
        }
    }

    impl Nested for Address {
        fn nested_record(&self) -> Option<&dyn Record> {
            Some(self)
        }
    }

    // `home` is addressable by path; `work` is flattened, so its fields are
    // promoted onto the person.
    struct Person {
        name: String,
        age: i64,
        home: Option<Box<Address>>,
        work: Option<Address>,
    }

    impl Record for Person {
        fn resolve_tag(&self, tag: &str) -> Option<FieldId> {
            match tag {
                "name" => return Some(FieldId::new("name")),
                "age" => return Some(FieldId::new("age")),
                "home" => return Some(FieldId::new("home")),
                _ => {}
            }
            if let Some(inner) = self.work.nested_record().and_then(|r| r.resolve_tag(tag)) {
                return Some(FieldId::nested("work", inner));
            }
            None
        }

        fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>> {
            let (head, rest) = field.split_first()?;
            match head {
                "name" if rest.is_empty() => Some(self.name.field_value()),
                "age" if rest.is_empty() => Some(self.age.field_value()),
                "home" if rest.is_empty() => Some(
                    self.home
                        .nested_record()
                        .map_or(Value::Null, Value::Record),
                ),
                "home" => self.home.nested_record()?.read_field(rest),
                "work" => self.work.nested_record()?.read_field(rest),
                _ => None,
            }
        }

        fn record_name(&self) -> &'static str {
            "Person"
        }
    }

    fn person(home: Option<&str>, work: Option<&str>) -> Person {
        Person {
            name: "Ada".to_string(),
            age: 36,
            home: home.map(|city| {
                Box::new(Address {
                    city: city.to_string(),
                })
            }),
            work: work.map(|city| Address {
                city: city.to_string(),
            }),
        }
    }

    #[test]
    fn resolves_top_level_fields() {
        let p = person(None, None);
        assert_eq!(resolve(&p, "name"), Ok(Value::String("Ada")));
        assert_eq!(resolve(&p, "age"), Ok(Value::Int(Int::I64(36))));
    }

    #[test]
    fn resolves_through_pointer() {
        let p = person(Some("Lisbon"), None);
        assert_eq!(resolve(&p, "home.city"), Ok(Value::String("Lisbon")));
    }

    #[test]
    fn resolves_promoted_field() {
        let p = person(None, Some("Berlin"));
        assert_eq!(resolve(&p, "city"), Ok(Value::String("Berlin")));
    }

    #[test]
    fn unknown_tag() {
        let p = person(None, None);
        assert_eq!(
            resolve(&p, "nmae"),
            Err(ResolveError::UnknownTag {
                tag: "nmae".to_string(),
                record: "Person",
            })
        );
        assert_eq!(
            resolve(&p, "city"),
            Err(ResolveError::UnknownTag {
                tag: "city".to_string(),
                record: "Person",
            })
        );
    }

    #[test]
    fn empty_pointer_is_null_leaf() {
        let p = person(None, None);
        assert_eq!(resolve(&p, "home"), Ok(Value::Null));
        assert!(resolve(&p, "home").unwrap().is_null());

        let p = person(Some("Lisbon"), None);
        let home = resolve(&p, "home").unwrap();
        assert!(!home.is_null());
        assert_eq!(home.as_record().map(|r| r.record_name()), Some("Address"));
    }

    #[test]
    fn descending_into_empty_pointer_fails() {
        let p = person(None, None);
        assert_eq!(
            resolve(&p, "home.city"),
            Err(ResolveError::NotARecord {
                segment: "home".to_string(),
                found: "null",
            })
        );
    }

    #[test]
    fn descending_into_leaf_fails() {
        let p = person(None, None);
        assert_eq!(
            resolve(&p, "name.first"),
            Err(ResolveError::NotARecord {
                segment: "name".to_string(),
                found: "string",
            })
        );
    }

    #[test]
    fn empty_segments_fail() {
        let p = person(Some("Lisbon"), None);
        assert!(resolve(&p, "").is_err());
        assert!(resolve(&p, "home.").is_err());
        assert!(resolve(&p, ".name").is_err());
        assert!(resolve(&p, "home..city").is_err());
    }
}
