//! This modules defines the common functionality for paging data.

use serde::Serialize;

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: usize,
    /// The number of items per page when not specified in a request.
    pub default_page_size: usize,
    /// The largest page size a request may ask for, or `None` for no limit.
    pub max_page_size: Option<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: None,
        }
    }
}

/// Read the integer at the start of `value`, ignoring leading whitespace and
/// anything after the digits, e.g. "2.5" is 2 and "10abc" is 10.
///
/// Returns `None` if `value` does not start with a positive integer. Numbers
/// too large for a `usize` saturate.
fn parse_leading_integer(value: &str) -> Option<usize> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let digits = &value[..digits_end];

    if digits.is_empty() {
        return None;
    }

    Some(digits.parse().unwrap_or(usize::MAX)).filter(|&number| number > 0)
}

/// A validated request for one page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The 1-based page number.
    pub page: usize,
    /// The number of items per page, at least one.
    pub per_page: usize,
}

impl PageRequest {
    /// Build a page request from the raw `page` and `perPage` query parameters.
    ///
    /// Values are read up to the first character that is not a digit, so
    /// "2.5" is page 2. Missing, non-numeric, zero and negative values fall
    /// back to the defaults in `config`. The page size is capped at
    /// `config.max_page_size` when it is set.
    pub fn from_query(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Self {
        let page = page
            .and_then(parse_leading_integer)
            .unwrap_or(config.default_page)
            .max(1);
        let per_page = per_page
            .and_then(parse_leading_integer)
            .unwrap_or(config.default_page_size)
            .max(1);
        let per_page = match config.max_page_size {
            Some(max_page_size) => per_page.min(max_page_size.max(1)),
            None => per_page,
        };

        Self { page, per_page }
    }

    /// The first page with the default page size from `config`.
    pub fn first_page(config: &PaginationConfig) -> Self {
        Self::from_query(None, None, config)
    }
}

/// One page of items and where it sits in the full list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The number of items across all pages.
    pub total_items: usize,
    /// The 1-based number of this page.
    pub current_page: usize,
    /// The maximum number of items on a page.
    pub per_page: usize,
    /// The number of pages needed to show every item.
    pub total_pages: usize,
    /// The items on this page.
    pub data: Vec<T>,
}

/// Take the page of `items` described by `request`.
///
/// Pages past the end are empty rather than an error.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total_items = items.len();
    let start = (request.page - 1).saturating_mul(request.per_page);
    let end = start.saturating_add(request.per_page).min(total_items);

    let data = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        total_items,
        current_page: request.page,
        per_page: request.per_page,
        total_pages: total_items.div_ceil(request.per_page),
        data,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::pagination::{PageRequest, PaginationConfig, paginate};

    fn request(page: usize, per_page: usize) -> PageRequest {
        PageRequest { page, per_page }
    }

    #[test]
    fn defaults_when_missing() {
        let config = PaginationConfig::default();

        let got = PageRequest::from_query(None, None, &config);

        assert_eq!(got, request(1, 10));
    }

    #[test]
    fn defaults_when_not_numeric_or_zero() {
        let config = PaginationConfig::default();

        assert_eq!(PageRequest::from_query(Some("abc"), Some(""), &config), request(1, 10));
        assert_eq!(PageRequest::from_query(Some("0"), Some("0"), &config), request(1, 10));
        assert_eq!(PageRequest::from_query(Some("-2"), Some("-5"), &config), request(1, 10));
    }

    #[test]
    fn parses_numbers() {
        let config = PaginationConfig::default();

        let got = PageRequest::from_query(Some("3"), Some(" 25 "), &config);

        assert_eq!(got, request(3, 25));
    }

    #[test]
    fn reads_leading_integer() {
        let config = PaginationConfig::default();

        assert_eq!(PageRequest::from_query(Some("2.5"), Some("10abc"), &config), request(2, 10));
        assert_eq!(PageRequest::from_query(Some("+3"), Some("7.9"), &config), request(3, 7));
        assert_eq!(PageRequest::from_query(Some("x2"), Some(".5"), &config), request(1, 10));
    }

    #[test]
    fn huge_numbers_saturate() {
        let config = PaginationConfig::default();

        let got = PageRequest::from_query(Some("99999999999999999999999"), None, &config);

        assert_eq!(got, request(usize::MAX, 10));
    }

    #[test]
    fn page_size_is_not_capped_by_default() {
        let config = PaginationConfig::default();

        let got = PageRequest::from_query(Some("1"), Some("150"), &config);

        assert_eq!(got, request(1, 150));
    }

    #[test]
    fn caps_page_size_when_configured() {
        let config = PaginationConfig {
            max_page_size: Some(50),
            ..Default::default()
        };

        let got = PageRequest::from_query(Some("1"), Some("1000"), &config);

        assert_eq!(got, request(1, 50));
    }

    #[test]
    fn first_page() {
        let items: Vec<u32> = (1..=25).collect();

        let got = paginate(&items, request(1, 10));

        assert_eq!(got.total_items, 25);
        assert_eq!(got.current_page, 1);
        assert_eq!(got.per_page, 10);
        assert_eq!(got.total_pages, 3);
        assert_eq!(got.data, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_is_clipped() {
        let items: Vec<u32> = (1..=25).collect();

        let got = paginate(&items, request(3, 10));

        assert_eq!(got.data, vec![21, 22, 23, 24, 25]);
        assert_eq!(got.total_pages, 3);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (1..=25).collect();

        let got = paginate(&items, request(4, 10));

        assert!(got.data.is_empty());
        assert_eq!(got.total_items, 25);
        assert_eq!(got.total_pages, 3);
        assert_eq!(got.current_page, 4);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let items: Vec<u32> = (1..=5).collect();

        let got = paginate(&items, request(usize::MAX, 10));

        assert!(got.data.is_empty());
        assert_eq!(got.total_pages, 1);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let items: Vec<u32> = Vec::new();

        let got = paginate(&items, request(1, 10));

        assert!(got.data.is_empty());
        assert_eq!(got.total_pages, 0);
    }

    #[test]
    fn serializes_in_camel_case() {
        let got = paginate(&["a", "b", "c"], request(2, 2));

        assert_eq!(
            serde_json::to_value(&got).unwrap(),
            json!({
                "totalItems": 3,
                "currentPage": 2,
                "perPage": 2,
                "totalPages": 2,
                "data": ["c"]
            })
        );
    }
}
