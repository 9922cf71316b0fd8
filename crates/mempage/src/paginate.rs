//! Page window computation.

use std::ops::Range;

use crate::config::PageConfig;

/// Computes the window of a page over `total` items.
///
/// A `page_size` of zero is replaced by the configured default. When, after
/// that, `page < 1` or `page_size < 1` there is no window at all (`None`),
/// which is distinct from an empty window. A page past the end yields an
/// empty range at `total`.
///
/// # Example
///
/// ```
/// use mempage::{window, PageConfig};
///
/// let config = PageConfig::default();
/// assert_eq!(window(25, 2, 10, &config), Some(10..20));
/// assert_eq!(window(25, 3, 10, &config), Some(20..25));
/// assert_eq!(window(25, 4, 10, &config), Some(25..25));
/// assert_eq!(window(25, 0, 10, &config), None);
/// ```
pub fn window(total: usize, page: i64, page_size: i64, config: &PageConfig) -> Option<Range<usize>> {
    let page_size = config.effective_page_size(page_size);
    if page < 1 || page_size < 1 {
        return None;
    }

    let total_i = i64::try_from(total).unwrap_or(i64::MAX);
    let clamp = |bound: Option<i64>| -> usize {
        let bound = bound.map_or(total_i, |b| b.min(total_i));
        usize::try_from(bound).unwrap_or(total)
    };

    let start = clamp(page_size.checked_mul(page - 1));
    let end = clamp(page_size.checked_mul(page));
    Some(start..end)
}

/// Slices the page window out of `items`.
pub fn paginate<'s, T>(items: &'s [T], page: i64, page_size: i64, config: &PageConfig) -> Option<&'s [T]> {
    window(items.len(), page, page_size, config).map(|range| &items[range])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_uses_default() {
        let config = PageConfig::default();
        assert_eq!(window(100, 1, 0, &config), window(100, 1, 10, &config));
        assert_eq!(window(100, 3, 0, &config), Some(20..30));

        let config = PageConfig::default().with_default_page_size(4);
        assert_eq!(window(100, 2, 0, &config), Some(4..8));
    }

    #[test]
    fn invalid_page_or_size_has_no_window() {
        let config = PageConfig::default();
        assert_eq!(window(10, 0, 5, &config), None);
        assert_eq!(window(10, -2, 5, &config), None);
        assert_eq!(window(10, 1, -5, &config), None);

        let zero_default = PageConfig::default().with_default_page_size(0);
        assert_eq!(window(10, 1, 0, &zero_default), None);
    }

    #[test]
    fn last_partial_page() {
        let config = PageConfig::default();
        assert_eq!(window(25, 3, 10, &config), Some(20..25));
    }

    #[test]
    fn page_past_end_is_empty() {
        let config = PageConfig::default();
        assert_eq!(window(25, 9, 10, &config), Some(25..25));
        assert_eq!(window(0, 1, 10, &config), Some(0..0));
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let config = PageConfig::default();
        assert_eq!(window(25, i64::MAX, i64::MAX, &config), Some(25..25));
        assert_eq!(window(25, 1, i64::MAX, &config), Some(0..25));
    }

    #[test]
    fn paginate_slices() {
        let items: Vec<u32> = (0..25).collect();
        let config = PageConfig::default();
        assert_eq!(paginate(&items, 2, 10, &config), Some(&items[10..20]));
        assert_eq!(paginate(&items, 0, 10, &config), None);
        assert_eq!(paginate(&items, 4, 10, &config), Some(&items[25..25]));
    }
}
