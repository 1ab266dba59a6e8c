//! Page/limit normalization for car listings.

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Pagination parameters as received from the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub limit: u32,
}

impl Pagination {
    /// Parses raw query values. Missing, non-numeric and zero values fall
    /// back to the defaults; negative pages become the first page.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        fn parse(raw: Option<&str>) -> Option<i64> {
            raw.and_then(|v| v.trim().parse::<i64>().ok()).filter(|v| *v != 0)
        }

        let page = parse(page).map_or(DEFAULT_PAGE, |p| u32::try_from(p.max(1)).unwrap_or(u32::MAX));
        let limit = parse(limit).map_or(DEFAULT_PAGE_LIMIT, |l| {
            u32::try_from(l.clamp(1, i64::from(MAX_PAGE_LIMIT))).unwrap_or(MAX_PAGE_LIMIT)
        });
        Self { page, limit }
    }

    /// Clamps page to at least 1 and limit into `1..=MAX_PAGE_LIMIT`.
    pub fn normalize(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Number of pages needed for `count` records.
    pub fn pages_for(&self, count: i64) -> i64 {
        let limit = i64::from(self.limit.max(1));
        (count + limit - 1) / limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn missing_or_garbage_values_use_defaults() {
        assert_eq!(Pagination::from_query(None, None), Pagination { page: 1, limit: 5 });
        assert_eq!(
            Pagination::from_query(Some("abc"), Some("")),
            Pagination { page: 1, limit: 5 }
        );
        assert_eq!(
            Pagination::from_query(Some("0"), Some("0")),
            Pagination { page: 1, limit: 5 }
        );
    }

    #[test]
    fn limit_is_clamped_to_ten_and_page_to_one() {
        assert_eq!(
            Pagination::from_query(Some("-3"), Some("20")),
            Pagination { page: 1, limit: 10 }
        );
        assert_eq!(
            Pagination::from_query(Some("2"), Some("-4")),
            Pagination { page: 2, limit: 1 }
        );
        assert_eq!(
            Pagination { page: 0, limit: 50 }.normalize(),
            Pagination { page: 1, limit: 10 }
        );
    }

    #[test]
    fn offset_and_pages() {
        let p = Pagination { page: 3, limit: 4 };
        assert_eq!(p.offset(), 8);
        assert_eq!(p.pages_for(0), 0);
        assert_eq!(p.pages_for(8), 2);
        assert_eq!(p.pages_for(9), 3);
    }
}
