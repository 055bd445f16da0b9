//! Query state for server-driven record lists.
//!
//! A table's data request is driven entirely by its [`QueryState`]: the
//! combination of pagination, sorting, and per-column filters. Every mutating
//! operation produces a new value, so a `QueryState` doubles as a
//! change-detection key for deciding whether to refetch.
//!
//! # Shared Types
//!
//! - [`Pagination`] - Page index and size
//! - [`SortSpec`] - Insertion-ordered multi-column sort
//! - [`FilterMap`] - Stable-keyed column filter values
//!
//! # Example
//!
//! ```
//! use salesdesk_lib::query::QueryState;
//!
//! let query = QueryState::new()
//!     .with_page_size(10)
//!     .toggle_sort("score")
//!     .with_filter("status", "NEW");
//!
//! assert_eq!(query.page_index(), 0);
//! ```

mod filter;
mod order;
mod page;
mod state;

pub use filter::FilterMap;
pub use order::Direction;
pub use order::SortSpec;
pub use page::DEFAULT_PAGE_SIZE;
pub use page::Pagination;
pub use state::QueryState;
