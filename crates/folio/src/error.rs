//! Error types for folio.

/// Result type alias for pagination operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the pagination layer.
///
/// All of these are synchronous, caller-facing validation failures:
/// arguments are checked before any controller state is touched, so a
/// returned error never leaves a pager partially updated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A page size of zero was supplied.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// Page zero was requested; page numbers are 1-based.
    #[error("page numbers are 1-based; page 0 is out of range")]
    PageOutOfRange,

    /// A page beyond the last one was requested.
    #[error("page {page} exceeds the current page count of {count}")]
    PageExceedsCount { page: usize, count: usize },

    /// An index resolved outside the bounds of the underlying collection,
    /// or pagination was queried while the collection is empty.
    #[error("index {index} is out of bounds for a collection of {len} element(s)")]
    IndexOutOfRange { index: usize, len: usize },
}
