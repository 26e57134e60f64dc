//! Query-and-view engine (pure).
//!
//! Three referentially transparent stages: filter, sort, paginate. None of
//! them keeps state between calls or mutates the records it is given.

pub mod filter;
pub mod pagination;
pub mod sort;

// Re-export for convenience
pub use filter::{filter, parse_date_bound, BoundSide, FilterCriteria, InvalidCriteria, Selector};
pub use pagination::{
    paginate, InvalidPageSize, Page, PageMeta, PageSize, PageSpec, ALLOWED_PAGE_SIZES,
};
pub use sort::{sort, InvalidSortField, SortDirection, SortField, SortSpec};
