//! Filter predicates and the filter engine.
//!
//! A [`FilterSpec`] names a dotted key, an [`Operation`] and a list of raw
//! string values. A record matches a list of filters when every filter
//! passes, evaluated in order and stopping at the first failure.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostics, Stage};
use crate::op::Operation;
use crate::record::Record;
use crate::resolve::resolve;
use crate::value::{Int, Value};

/// A single filter predicate.
///
/// How the values are matched depends on the kind of the resolved field:
///
/// | Field kind | Rule |
/// |------------|------|
/// | `bool` | equals any value parsed as a bool; operation ignored |
/// | `i64` | equals any value parsed as an `i64`; operation ignored |
/// | string | per [`Operation`] |
/// | anything else | per [`Operation`], as if the field were `""` |
///
/// # Example
///
/// ```
/// use mempage::{FilterSpec, Operation, Value, Verdict, Diagnostics};
///
/// let spec = FilterSpec::new("status", Operation::In, ["open,review"]);
/// let mut diagnostics = Diagnostics::new();
/// assert_eq!(spec.evaluate(&Value::String("in review"), &mut diagnostics), Verdict::Pass);
/// assert_eq!(spec.evaluate(&Value::String("closed"), &mut diagnostics), Verdict::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Dotted path of serialized field names.
    pub key: String,
    /// How values are matched.
    #[serde(default)]
    pub op: Operation,
    /// Raw values to match against.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Outcome of evaluating one [`FilterSpec`] against a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// This filter passes; continue with the next one.
    Pass,
    /// This filter fails; the record is excluded.
    Reject,
    /// A null check decided the whole match, regardless of later filters.
    Decide(bool),
}

impl FilterSpec {
    /// Creates a new filter.
    pub fn new<I, S>(key: impl Into<String>, op: Operation, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterSpec {
            key: key.into(),
            op,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluates this filter against a resolved field value.
    ///
    /// Values that do not parse as the field's kind never match and are
    /// recorded in `diagnostics`.
    pub fn evaluate(&self, value: &Value<'_>, diagnostics: &mut Diagnostics) -> Verdict {
        let matched = match value {
            Value::Bool(actual) => {
                self.any_parsed(diagnostics, "bool", parse_bool, |parsed| parsed == *actual)
            }
            Value::Int(Int::I64(actual)) => self.any_parsed(
                diagnostics,
                "i64",
                |raw| raw.parse::<i64>().ok(),
                |parsed| parsed == *actual,
            ),
            _ => {
                let text = value.as_str().unwrap_or("");
                match self.op {
                    Operation::IsNull => return Verdict::Decide(text.is_empty()),
                    Operation::NotNull => return Verdict::Decide(!text.is_empty()),
                    Operation::Eq => self.values.iter().any(|v| v.as_str() == text),
                    Operation::Ne => !self.values.iter().any(|v| v.as_str() == text),
                    Operation::In => self.sub_values().any(|v| text.contains(v)),
                    Operation::NotIn => !self.sub_values().any(|v| v == text),
                    Operation::Like => self.values.iter().any(|v| text.contains(v.as_str())),
                }
            }
        };

        if matched {
            Verdict::Pass
        } else {
            Verdict::Reject
        }
    }

    /// Every value split on commas.
    fn sub_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().flat_map(|v| v.split(','))
    }

    /// Parses every value and reports whether any parsed value is a hit.
    fn any_parsed<V, P, H>(
        &self,
        diagnostics: &mut Diagnostics,
        expected: &'static str,
        parse: P,
        mut hit: H,
    ) -> bool
    where
        P: Fn(&str) -> Option<V>,
        H: FnMut(V) -> bool,
    {
        let mut matched = false;
        for raw in &self.values {
            match parse(raw) {
                Some(parsed) => matched |= hit(parsed),
                None => diagnostics.malformed(&self.key, raw, expected),
            }
        }
        matched
    }
}

/// Parses the boolean spellings `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Checks a record against a list of filters.
///
/// An empty list matches every record. A key that does not resolve
/// excludes the record, even for null checks.
pub fn matches(record: &dyn Record, filters: &[FilterSpec]) -> bool {
    matches_at(record, 0, filters, &mut Diagnostics::new())
}

pub(crate) fn matches_at(
    record: &dyn Record,
    index: usize,
    filters: &[FilterSpec],
    diagnostics: &mut Diagnostics,
) -> bool {
    for spec in filters {
        let value = match resolve(record, &spec.key) {
            Ok(value) => value,
            Err(err) => {
                diagnostics.unresolved(Stage::Filter, index, &spec.key, err);
                return false;
            }
        };

        match spec.evaluate(&value, diagnostics) {
            Verdict::Pass => {}
            Verdict::Reject => return false,
            Verdict::Decide(result) => return result,
        }
    }
    true
}

/// Selects the records matching every filter, preserving input order.
pub fn filter_records<'a, T: Record>(
    records: &'a [T],
    filters: &[FilterSpec],
    diagnostics: &mut Diagnostics,
) -> Vec<&'a T> {
    if filters.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .enumerate()
        .filter(|&(index, record)| matches_at(record, index, filters, diagnostics))
        .map(|(_, record)| record)
        .collect()
}

/// Counts the records matching every filter without collecting them.
///
/// Diagnostics are not kept; use [`filter_records`] to observe them.
pub fn count_matches<T: Record>(records: &[T], filters: &[FilterSpec]) -> usize {
    if filters.is_empty() {
        return records.len();
    }

    records
        .iter()
        .filter(|record| matches(*record, filters))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldId, FieldPath};
    use crate::value::{FieldValue, Float};

    struct Pet {
        name: &'static str,
        age: i64,
    }

    impl Record for Pet {
        fn resolve_tag(&self, tag: &str) -> Option<FieldId> {
            match tag {
                "name" => Some(FieldId::new("name")),
                "age" => Some(FieldId::new("age")),
                _ => None,
            }
        }

        fn read_field(&self, field: FieldPath<'_>) -> Option<Value<'_>> {
            match field.split_first()? {
                ("name", _) => Some(self.name.field_value()),
                ("age", _) => Some(self.age.field_value()),
                _ => None,
            }
        }
    }

    fn pets() -> Vec<Pet> {
        vec![
            Pet { name: "Rex", age: 3 },
            Pet { name: "", age: 7 },
            Pet { name: "Tom", age: 3 },
        ]
    }

    fn eval(spec: &FilterSpec, value: Value<'_>) -> Verdict {
        spec.evaluate(&value, &mut Diagnostics::new())
    }

    #[test]
    fn bool_matches_any_value() {
        let spec = FilterSpec::new("done", Operation::Ne, ["false", "TRUE"]);
        assert_eq!(eval(&spec, Value::Bool(true)), Verdict::Pass);
        assert_eq!(eval(&spec, Value::Bool(false)), Verdict::Pass);

        let spec = FilterSpec::new("done", Operation::Eq, ["t"]);
        assert_eq!(eval(&spec, Value::Bool(false)), Verdict::Reject);
    }

    #[test]
    fn bool_ignores_null_checks() {
        let spec = FilterSpec::new("done", Operation::IsNull, ["1"]);
        assert_eq!(eval(&spec, Value::Bool(true)), Verdict::Pass);
        assert_eq!(eval(&spec, Value::Bool(false)), Verdict::Reject);
    }

    #[test]
    fn malformed_bool_never_matches() {
        let spec = FilterSpec::new("done", Operation::Eq, ["nope", "0"]);
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            spec.evaluate(&Value::Bool(false), &mut diagnostics),
            Verdict::Pass
        );
        assert_eq!(
            spec.evaluate(&Value::Bool(true), &mut diagnostics),
            Verdict::Reject
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn i64_matches_any_value() {
        let spec = FilterSpec::new("count", Operation::Like, ["3", "+42"]);
        assert_eq!(eval(&spec, Value::Int(Int::I64(42))), Verdict::Pass);
        assert_eq!(eval(&spec, Value::Int(Int::I64(4))), Verdict::Reject);
    }

    #[test]
    fn malformed_i64_reports_and_skips() {
        let spec = FilterSpec::new("count", Operation::Eq, ["0x10", "16"]);
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            spec.evaluate(&Value::Int(Int::I64(16)), &mut diagnostics),
            Verdict::Pass
        );
        assert_eq!(
            spec.evaluate(&Value::Int(Int::I64(0)), &mut diagnostics),
            Verdict::Reject
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn other_widths_read_as_blank() {
        let spec = FilterSpec::new("count", Operation::Eq, ["7"]);
        assert_eq!(eval(&spec, Value::Int(Int::I32(7))), Verdict::Reject);

        let spec = FilterSpec::new("ratio", Operation::IsNull, Vec::<String>::new());
        assert_eq!(eval(&spec, Value::Float(Float::F64(0.5))), Verdict::Decide(true));
        assert_eq!(eval(&spec, Value::Null), Verdict::Decide(true));
    }

    #[test]
    fn null_checks_decide() {
        let is_null = FilterSpec::new("name", Operation::IsNull, Vec::<String>::new());
        assert_eq!(eval(&is_null, Value::String("")), Verdict::Decide(true));
        assert_eq!(eval(&is_null, Value::String("x")), Verdict::Decide(false));

        let not_null = FilterSpec::new("name", Operation::NotNull, Vec::<String>::new());
        assert_eq!(eval(&not_null, Value::String("x")), Verdict::Decide(true));
        assert_eq!(eval(&not_null, Value::String("")), Verdict::Decide(false));
    }

    #[test]
    fn eq_and_ne_are_exact() {
        let eq = FilterSpec::new("name", Operation::Eq, ["Ada", "Grace"]);
        assert_eq!(eval(&eq, Value::String("Grace")), Verdict::Pass);
        assert_eq!(eval(&eq, Value::String("ada")), Verdict::Reject);

        let ne = FilterSpec::new("name", Operation::Ne, ["Ada", "Grace"]);
        assert_eq!(eval(&ne, Value::String("Grace")), Verdict::Reject);
        assert_eq!(eval(&ne, Value::String("Gra")), Verdict::Pass);
    }

    #[test]
    fn in_is_substring_over_comma_split() {
        let spec = FilterSpec::new("tag", Operation::In, ["red,green", "blue"]);
        assert_eq!(eval(&spec, Value::String("dark green")), Verdict::Pass);
        assert_eq!(eval(&spec, Value::String("blueish")), Verdict::Pass);
        assert_eq!(eval(&spec, Value::String("yellow")), Verdict::Reject);
    }

    #[test]
    fn not_in_is_exact_over_comma_split() {
        let spec = FilterSpec::new("tag", Operation::NotIn, ["red,green", "blue"]);
        assert_eq!(eval(&spec, Value::String("green")), Verdict::Reject);
        assert_eq!(eval(&spec, Value::String("dark green")), Verdict::Pass);
    }

    #[test]
    fn in_and_not_in_are_not_complements() {
        let is_in = FilterSpec::new("code", Operation::In, ["ab"]);
        let not_in = FilterSpec::new("code", Operation::NotIn, ["ab"]);
        assert_eq!(eval(&is_in, Value::String("abcd")), Verdict::Pass);
        assert_eq!(eval(&not_in, Value::String("abcd")), Verdict::Pass);
    }

    #[test]
    fn like_is_substring() {
        let spec = FilterSpec::new("name", Operation::Like, ["ra", "zz"]);
        assert_eq!(eval(&spec, Value::String("Grace")), Verdict::Pass);
        assert_eq!(eval(&spec, Value::String("Ada")), Verdict::Reject);
    }

    #[test]
    fn no_values_match_nothing_except_negations() {
        let none: Vec<String> = Vec::new();
        assert_eq!(
            eval(&FilterSpec::new("n", Operation::Like, none.clone()), Value::String("x")),
            Verdict::Reject
        );
        assert_eq!(
            eval(&FilterSpec::new("n", Operation::Ne, none.clone()), Value::String("x")),
            Verdict::Pass
        );
        assert_eq!(
            eval(&FilterSpec::new("n", Operation::NotIn, none), Value::String("x")),
            Verdict::Pass
        );
    }

    #[test]
    fn parse_bool_spellings() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("tRuE"), None);
    }

    #[test]
    fn records_filtered_in_order() {
        let pets = pets();
        let filters = vec![FilterSpec::new("age", Operation::Eq, ["3"])];
        let mut diagnostics = Diagnostics::new();
        let kept = filter_records(&pets, &filters, &mut diagnostics);
        let names: Vec<&str> = kept.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Rex", "Tom"]);
        assert!(diagnostics.is_empty());
        assert_eq!(count_matches(&pets, &filters), 2);
    }

    #[test]
    fn unresolved_key_excludes_and_reports() {
        let pets = pets();
        let filters = vec![FilterSpec::new("owner", Operation::IsNull, Vec::<String>::new())];
        let mut diagnostics = Diagnostics::new();
        assert!(filter_records(&pets, &filters, &mut diagnostics).is_empty());
        assert_eq!(diagnostics.len(), 3);
        assert!(!matches(&pets[1], &filters));
    }

    #[test]
    fn later_filters_skipped_after_null_check() {
        let pets = pets();
        let filters = vec![
            FilterSpec::new("name", Operation::IsNull, Vec::<String>::new()),
            FilterSpec::new("missing", Operation::Eq, ["x"]),
        ];
        assert!(matches(&pets[1], &filters));
        assert!(!matches(&pets[0], &filters));
        assert_eq!(count_matches(&pets, &filters), 1);
    }

    #[test]
    fn empty_filters_keep_everything() {
        let pets = pets();
        assert_eq!(count_matches(&pets, &[]), 3);
        assert!(matches(&pets[0], &[]));
    }
}
