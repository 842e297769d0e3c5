//! Offset and limit pagination primitives.
//!
//! List endpoints accept caller-supplied `limit` and `offset` values. This
//! crate owns the clamping rules so every vertical pages the same way:
//!
//! - a `limit` of zero or below falls back to [`DEFAULT_LIMIT`];
//! - a `limit` above [`MAX_LIMIT`] is capped at [`MAX_LIMIT`];
//! - a negative `offset` becomes zero.
//!
//! [`PageParams`] is the lenient wire form used by query strings. Values that
//! fail to parse as integers are treated as absent.

use serde::Deserialize;

/// Page size used when the caller omits `limit` or supplies a non-positive one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// A clamped page window.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let page = PageRequest::new(500, -3);
/// assert_eq!(page.limit(), 100);
/// assert_eq!(page.offset(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: i64,
    offset: i64,
}

impl PageRequest {
    /// Build a page window, clamping `limit` and `offset` into range.
    #[must_use]
    pub const fn new(requested_limit: i64, requested_offset: i64) -> Self {
        let limit = if requested_limit <= 0 {
            DEFAULT_LIMIT
        } else if requested_limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            requested_limit
        };
        let offset = if requested_offset < 0 {
            0
        } else {
            requested_offset
        };
        Self { limit, offset }
    }

    /// Maximum number of records in the page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of records skipped before the page starts.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Page window as `usize` bounds for in-memory slicing.
    ///
    /// Both values are non-negative after clamping, so the conversion only
    /// saturates on targets narrower than 64 bits.
    #[must_use]
    pub fn as_bounds(&self) -> (usize, usize) {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        (offset, limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

/// Raw `limit`/`offset` query parameters.
///
/// # Examples
/// ```
/// use pagination::{PageParams, PageRequest};
///
/// let params = PageParams {
///     limit: Some("abc".to_owned()),
///     offset: Some("20".to_owned()),
/// };
/// assert_eq!(params.to_page_request(), PageRequest::new(10, 20));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    /// Requested page size.
    #[serde(default)]
    pub limit: Option<String>,
    /// Requested number of skipped records.
    #[serde(default)]
    pub offset: Option<String>,
}

impl PageParams {
    /// Parse and clamp the parameters.
    #[must_use]
    pub fn to_page_request(&self) -> PageRequest {
        let limit = parse_or(self.limit.as_deref(), DEFAULT_LIMIT);
        let offset = parse_or(self.offset.as_deref(), 0);
        PageRequest::new(limit, offset)
    }
}

fn parse_or(raw: Option<&str>, fallback: i64) -> i64 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(fallback)
}
