// ============================================================
// PAGINATION USE CASE
// ============================================================
// Slice a record sequence into a fixed-size page from a 1-based
// `page` request parameter

use serde::Serialize;
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::RecordSet;

/// Fixed page size
pub const PER_PAGE: usize = 25;

/// String lookup over a request's query parameters. Implemented for the
/// map that `actix_web::web::Query<HashMap<String, String>>` dereferences
/// to, so handlers can pass their query straight through.
pub trait RequestParams {
    fn param(&self, name: &str) -> Option<&str>;
}

impl RequestParams for std::collections::HashMap<String, String> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub number: i64,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

/// Read the `page` parameter (default `"1"`) and return that page of the
/// record sequence.
///
/// A non-integer `page` is a [`AppError::NotFound`], meant to map to a
/// 404 rather than a generic parse error. Pages past the end come back
/// empty without error. Non-positive pages are accepted; their negative
/// start offsets clamp to an empty slice.
pub fn paginate<R, S>(request: &impl RequestParams, records: &S) -> Result<Page<R>>
where
    S: RecordSet<R> + ?Sized,
{
    let raw = request.param("page").unwrap_or("1");
    let page: i64 = raw
        .parse()
        .map_err(|_| AppError::NotFound(format!("no such page: {}", raw)))?;

    let total = records.count() as i64;
    // Saturate the offset math: an i64 page number near the type bounds
    // must come back as an empty page, not an overflow panic
    let start = page.saturating_sub(1).saturating_mul(PER_PAGE as i64);
    let end = start.saturating_add(PER_PAGE as i64);

    let prev_page = if page.saturating_sub(1) > 0 {
        Some(page - 1)
    } else {
        None
    };
    let next_page = if end < total {
        Some(page.saturating_add(1))
    } else {
        None
    };

    let items = records.slice(start.max(0) as usize, end.max(0) as usize);
    debug!(page, total, returned = items.len(), "paginated record set");

    Ok(Page {
        items,
        number: page,
        next_page,
        prev_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn query(page: &str) -> HashMap<String, String> {
        HashMap::from([("page".to_string(), page.to_string())])
    }

    fn records(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_first_page_of_thirty() {
        let page = paginate(&query("1"), &records(30)).unwrap();
        assert_eq!(page.items, (0..25).collect::<Vec<_>>());
        assert_eq!(page.number, 1);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.prev_page, None);
    }

    #[test]
    fn test_second_page_of_thirty() {
        let page = paginate(&query("2"), &records(30)).unwrap();
        assert_eq!(page.items, (25..30).collect::<Vec<_>>());
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(1));
    }

    #[test]
    fn test_missing_param_defaults_to_first_page() {
        let empty: HashMap<String, String> = HashMap::new();
        let page = paginate(&empty, &records(30)).unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.items.len(), 25);
    }

    #[test]
    fn test_non_integer_page_is_not_found() {
        assert!(matches!(
            paginate(&query("abc"), &records(30)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = paginate(&query("5"), &records(30)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(4));
    }

    #[test]
    fn test_exact_boundary_has_no_next() {
        // 50 records fill page 2 exactly, so there is no page 3
        let page = paginate(&query("2"), &records(50)).unwrap();
        assert_eq!(page.items.len(), 25);
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_extreme_page_numbers_come_back_empty() {
        // Offsets near the i64 bounds saturate instead of overflowing
        let page = paginate(&query("9223372036854775807"), &records(30)).unwrap();
        assert_eq!(page.number, i64::MAX);
        assert!(page.items.is_empty());
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(i64::MAX - 1));

        let page = paginate(&query("-9223372036854775808"), &records(30)).unwrap();
        assert_eq!(page.number, i64::MIN);
        assert!(page.items.is_empty());
        assert_eq!(page.prev_page, None);
        assert_eq!(page.next_page, Some(i64::MIN + 1));
    }

    #[test]
    fn test_non_positive_page_is_accepted() {
        // Page 0 parses fine; its negative start offset clamps to an
        // empty slice
        let page = paginate(&query("0"), &records(30)).unwrap();
        assert_eq!(page.number, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.prev_page, None);
        assert_eq!(page.next_page, Some(1));
    }
}
