//! Sort keys and the stable multi-key sorter.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::compare::compare_values;
use crate::diagnostics::{Diagnostics, Stage};
use crate::record::Record;
use crate::resolve::resolve;
use crate::value::Value;

/// A single sort key: a dotted path and a direction.
///
/// On the wire the direction is `"ascending"`; the older spelling
/// `"asceding"` is accepted when reading. A missing direction reads as
/// descending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Dotted path of serialized field names.
    pub key: String,
    /// `true` for smallest first.
    #[serde(default, alias = "asceding")]
    pub ascending: bool,
}

impl SortSpec {
    /// Creates an ascending sort key.
    pub fn asc(key: impl Into<String>) -> Self {
        SortSpec {
            key: key.into(),
            ascending: true,
        }
    }

    /// Creates a descending sort key.
    pub fn desc(key: impl Into<String>) -> Self {
        SortSpec {
            key: key.into(),
            ascending: false,
        }
    }

    /// Applies this key's direction to an ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// Compares two records' pre-resolved sort values, key by key.
///
/// `None` marks a key that did not resolve; it ends the comparison as a tie
/// even if later keys would decide. Incomparable values fall through to the
/// next key.
fn compare_resolved(a: &[Option<Value<'_>>], b: &[Option<Value<'_>>], sorts: &[SortSpec]) -> Ordering {
    for ((a, b), spec) in a.iter().zip(b).zip(sorts) {
        let (Some(a), Some(b)) = (a, b) else {
            break;
        };
        match compare_values(a, b) {
            Some(Ordering::Equal) | None => continue,
            Some(ordering) => return spec.apply(ordering),
        }
    }
    Ordering::Equal
}

/// Stably sorts records by a list of sort keys.
///
/// Each key is resolved once per record. Records tied on every key keep
/// their relative order.
pub fn sort_records<'a, T: Record>(
    items: &mut Vec<&'a T>,
    sorts: &[SortSpec],
    diagnostics: &mut Diagnostics,
) {
    if sorts.is_empty() || items.len() < 2 {
        return;
    }

    let resolved: Vec<Vec<Option<Value<'a>>>> = items
        .iter()
        .enumerate()
        .map(|(index, &item)| {
            sorts
                .iter()
                .map(|spec| match resolve(item, &spec.key) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        diagnostics.unresolved(Stage::Sort, index, &spec.key, err);
                        None
                    }
                })
                .collect()
        })
        .collect();

    let mut order: Vec<usize> = (0..items.len()).collect();
    stable_sort_by(&mut order, |&a, &b| compare_resolved(&resolved[a], &resolved[b], sorts));

    let sorted: Vec<&'a T> = order.into_iter().map(|index| items[index]).collect();
    *items = sorted;
}

/// Bottom-up merge sort.
///
/// Unlike `slice::sort_by` it accepts comparators that are not a total
/// order, which unresolved and incomparable keys produce, without
/// panicking. Ties keep the left (earlier) element first.
fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buffer = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(
                &items[start..mid],
                &items[mid..end],
                &mut buffer[start..end],
                &mut compare,
            );
            start = end;
        }
        items.copy_from_slice(&buffer);
        width *= 2;
    }
}

fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_right = j < right.len()
            && (i >= left.len() || compare(&right[j], &left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}
