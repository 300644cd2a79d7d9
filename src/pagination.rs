pub(crate) const DEFAULT_LIMIT: i64 = 50;
pub(crate) const MAX_LIMIT: i64 = 200;

/// A normalized paging window. Raw request text never leaves this module:
/// whatever the client sent, `page >= 1` and `1 <= limit <= 200` hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Page {
    pub(crate) page: i64,
    pub(crate) limit: i64,
}

impl Page {
    /// Resolves raw `page`/`limit` query text. Absent or non-numeric values
    /// fall back to the defaults (1 and 50) rather than rejecting the
    /// request; out-of-range values are clamped, never errors.
    pub(crate) fn resolve(raw_page: Option<&str>, raw_limit: Option<&str>) -> Page {
        let page = parse_i64(raw_page).unwrap_or(1).max(1);
        let limit = parse_i64(raw_limit)
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        Page { page, limit }
    }

    /// Rows to skip before this page begins.
    pub(crate) fn offset(self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

// Whole-token integer parse: `"2.5"` and `"10abc"` are non-numeric and fall
// to the caller's default, never salvaged for a leading number.
fn parse_i64(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<i64>().ok())
}
