//! Pagination: slices an ordered sequence into fixed-size pages.
//!
//! Stateless. The requested page is clamped into range on every call and
//! the clamped value comes back in [`PageMeta::page`], so the caller can
//! resynchronize its own page state after the result set shrinks.

use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Page sizes offered to the user.
pub const ALLOWED_PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

/// A page size drawn from [`ALLOWED_PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Accept `size` only if it is in [`ALLOWED_PAGE_SIZES`].
    pub fn new(size: usize) -> Result<Self, InvalidPageSize> {
        if ALLOWED_PAGE_SIZES.contains(&size) {
            Ok(Self(size))
        } else {
            Err(InvalidPageSize(size))
        }
    }

    /// Rows per page.
    pub fn get(self) -> usize {
        self.0
    }

    /// The size as the non-zero count [`paginate`] works with.
    pub fn as_nonzero(self) -> NonZeroUsize {
        NonZeroUsize::new(self.0).unwrap_or(NonZeroUsize::MIN)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// A page size outside [`ALLOWED_PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Page size {0} is not one of {allowed:?}", allowed = ALLOWED_PAGE_SIZES)]
pub struct InvalidPageSize(pub usize);

/// Requested page number (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// Requested page, 1-based. Clamped when used.
    pub page: usize,
    /// Rows per page.
    pub size: PageSize,
}

impl PageSpec {
    /// Spec for `page` at `size`.
    pub fn new(page: usize, size: PageSize) -> Self {
        Self { page, size }
    }

    /// First page at the given size.
    pub fn first(size: PageSize) -> Self {
        Self::new(1, size)
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::first(PageSize::default())
    }
}

/// Display metadata for one page.
///
/// `start_index`/`end_index` are 1-based and inclusive ("showing X to Y of
/// Z"); both are 0 when there are no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Clamped page, 1-based.
    pub page: usize,
    /// Page count, at least 1.
    pub total_pages: usize,
    /// Items across all pages.
    pub total_items: usize,
    /// Rows per page.
    pub page_size: usize,
    /// First item shown, 1-based; 0 when empty.
    pub start_index: usize,
    /// Last item shown, inclusive; 0 when empty.
    pub end_index: usize,
}

impl PageMeta {
    /// Compute metadata for `page` over `total_items` items.
    pub fn compute(total_items: usize, page: usize, page_size: NonZeroUsize) -> Self {
        let page_size = page_size.get();
        let total_pages = total_items.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);
        let (start_index, end_index) = if total_items == 0 {
            (0, 0)
        } else {
            ((page - 1) * page_size + 1, (page * page_size).min(total_items))
        };
        Self {
            page,
            total_pages,
            total_items,
            page_size,
            start_index,
            end_index,
        }
    }

    /// Zero-based half-open range of the page within the full sequence.
    pub fn range(&self) -> std::ops::Range<usize> {
        if self.total_items == 0 {
            0..0
        } else {
            (self.start_index - 1)..self.end_index
        }
    }

    /// Whether a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a page follows this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing X to Y of Z entries".
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} entries",
            self.start_index, self.end_index, self.total_items
        )
    }
}

/// One page of records plus its metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a> {
    /// Records on this page.
    pub items: &'a [Record],
    /// Position of this page.
    pub meta: PageMeta,
}

/// Slice `records` to the requested page.
///
/// An empty input is "page 1 of 1" with an empty slice. Out-of-range pages
/// (including 0) are clamped, never rejected. Any non-zero size works here;
/// restricting sizes to [`ALLOWED_PAGE_SIZES`] is [`PageSize`]'s job.
pub fn paginate(records: &[Record], page: usize, page_size: NonZeroUsize) -> Page<'_> {
    let meta = PageMeta::compute(records.len(), page, page_size);
    let items = records.get(meta.range()).unwrap_or_default();
    Page { items, meta }
}
