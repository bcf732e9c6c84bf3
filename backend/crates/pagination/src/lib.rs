//! Offset pagination primitives shared by the backend endpoints.
//!
//! Pages are 1-indexed. A [`PageRequest`] translates a page number and a
//! [`PageSize`] into the `OFFSET`/`LIMIT` pair used by persistence adapters,
//! and [`Page`] is the serialisable envelope returned to clients.
//!
//! Out-of-range requests are not errors: page `0` and any page beyond the
//! last one resolve to an empty page that still reports the total counts.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageRequest, PageSize};
//!
//! let size = PageSize::new(6).expect("valid page size");
//! let request = PageRequest::new(3, size);
//! assert_eq!(request.offset(), Some(12));
//!
//! let page = Page::new(vec!["last"], request, 13);
//! assert_eq!(page.total_pages(), 3);
//! ```

use std::num::NonZeroU32;

use serde::Serialize;
use thiserror::Error;

/// Page size used when callers do not ask for a specific one.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Largest page size accepted by [`PageSize::new`].
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// The size was zero.
    #[error("page size must be greater than zero")]
    Zero,
    /// The size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}")]
    TooLarge {
        /// Upper bound that was exceeded.
        max: u32,
    },
}

/// Number of items per page, bounded to `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::Zero`] for `0` and
    /// [`PageSizeError::TooLarge`] above [`MAX_PAGE_SIZE`].
    pub fn new(size: u32) -> Result<Self, PageSizeError> {
        let Some(non_zero) = NonZeroU32::new(size) else {
            return Err(PageSizeError::Zero);
        };
        if size > MAX_PAGE_SIZE {
            return Err(PageSizeError::TooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self(non_zero))
    }

    /// Raw page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        match NonZeroU32::new(DEFAULT_PAGE_SIZE) {
            Some(size) => Self(size),
            None => Self(NonZeroU32::MIN),
        }
    }
}

/// Number of pages needed to hold `total_items` at the given size.
///
/// # Examples
///
/// ```
/// use pagination::{PageSize, total_pages};
///
/// let size = PageSize::new(6).expect("valid page size");
/// assert_eq!(total_pages(13, size), 3);
/// assert_eq!(total_pages(0, size), 0);
/// ```
#[must_use]
pub const fn total_pages(total_items: u64, size: PageSize) -> u64 {
    total_items.div_ceil(size.get() as u64)
}

/// A request for one 1-indexed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: PageSize,
}

impl PageRequest {
    /// Build a request for `page` (1-indexed) of `size` items.
    #[must_use]
    pub const fn new(page: u32, size: PageSize) -> Self {
        Self { page, size }
    }

    /// Requested page number as supplied by the caller.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Number of rows to skip, or `None` for page `0`.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        let index = self.page.checked_sub(1)?;
        Some(u64::from(index) * u64::from(self.size.get()))
    }

    /// Maximum number of rows on the page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.size.get())
    }

    /// Whether the page falls inside `1..=total_pages` for `total_items`.
    #[must_use]
    pub fn is_within(&self, total_items: u64) -> bool {
        self.page >= 1 && u64::from(self.page) <= total_pages(total_items, self.size)
    }
}

/// One page of items plus the counts clients need to render navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    page_size: u32,
    total_items: u64,
    total_pages: u64,
}

impl<T> Page<T> {
    /// Wrap `items` fetched for `request` out of `total_items`.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.size().get(),
            total_items,
            total_pages: total_pages(total_items, request.size()),
        }
    }

    /// An empty page for requests outside the available range.
    #[must_use]
    pub fn empty(request: PageRequest, total_items: u64) -> Self {
        Self::new(Vec::new(), request, total_items)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Requested page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size used for the request.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Convert the items while keeping the counts.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page arithmetic.
    use super::*;
    use rstest::rstest;

    fn size(value: u32) -> PageSize {
        PageSize::new(value).expect("valid page size")
    }

    #[rstest]
    #[case(0, PageSizeError::Zero)]
    #[case(101, PageSizeError::TooLarge { max: MAX_PAGE_SIZE })]
    fn page_size_rejects_out_of_bounds(#[case] value: u32, #[case] expected: PageSizeError) {
        assert_eq!(PageSize::new(value), Err(expected));
    }

    #[rstest]
    fn default_page_size_is_six() {
        assert_eq!(PageSize::default().get(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(6, 1)]
    #[case(7, 2)]
    #[case(13, 3)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] expected: u64) {
        assert_eq!(total_pages(total, size(6)), expected);
    }

    #[rstest]
    #[case(1, Some(0))]
    #[case(3, Some(12))]
    #[case(0, None)]
    fn offset_is_zero_based(#[case] page: u32, #[case] expected: Option<u64>) {
        assert_eq!(PageRequest::new(page, size(6)).offset(), expected);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(3, true)]
    #[case(4, false)]
    fn range_check_uses_total_pages(#[case] page: u32, #[case] expected: bool) {
        assert_eq!(PageRequest::new(page, size(6)).is_within(13), expected);
    }

    #[rstest]
    fn empty_page_keeps_counts() {
        let page: Page<u8> = Page::empty(PageRequest::new(4, size(6)), 13);
        assert!(page.items().is_empty());
        assert_eq!(page.page(), 4);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_items(), 13);
    }

    #[rstest]
    fn page_serialises_in_camel_case() {
        let page = Page::new(vec![1_u8], PageRequest::new(1, size(6)), 1);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(value["pageSize"], 6);
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["totalItems"], 1);
        assert_eq!(value["items"][0], 1);
    }

    #[rstest]
    fn map_preserves_counts() {
        let page = Page::new(vec![1_u8, 2], PageRequest::new(1, size(6)), 2).map(u32::from);
        assert_eq!(page.items(), &[1_u32, 2]);
        assert_eq!(page.total_items(), 2);
    }
}
