//! The query state driving a table's data request.

use super::FilterMap;
use super::Pagination;
use super::SortSpec;

/// Pagination, sorting, and filter state for one record list.
///
/// Each table instance owns exactly one `QueryState`; mutations go through
/// the consuming builder-style operations below, each of which returns a new
/// value. Because the type is `PartialEq + Hash`, the value itself serves as
/// the change-detection key that decides whether a refetch is needed.
///
/// Invariant: the page index resets to 0 whenever the page size or any
/// filter changes, so a stale page number is never combined with a new
/// result-set size.
///
/// # Example
///
/// ```
/// use salesdesk_lib::query::QueryState;
///
/// let query = QueryState::new()
///     .with_page(2)
///     .with_filter("status", "NEW");
///
/// // Changing a filter snapped the page back to the start.
/// assert_eq!(query.page_index(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryState {
    pagination: Pagination,
    sorting: SortSpec,
    filters: FilterMap,
}

impl QueryState {
    /// Creates a query state with default pagination and no sort or filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 0-based page index.
    #[must_use]
    pub fn with_page(mut self, page_index: usize) -> Self {
        self.pagination.page_index = page_index;
        self
    }

    /// Sets the page size and resets the page index to 0.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination.page_size = page_size.max(1);
        self.pagination.page_index = 0;
        self
    }

    /// Cycles the sort state of a column (unsorted → asc → desc → unsorted).
    ///
    /// Other active sort columns are untouched; multi-column order is the
    /// order in which columns were first toggled.
    #[must_use]
    pub fn toggle_sort(mut self, column: &str) -> Self {
        self.sorting.toggle(column);
        self
    }

    /// Upserts a filter value for a column and resets the page index to 0.
    ///
    /// Setting an empty value clears the filter while keeping its key in the
    /// map, so the key set stays stable across transitions.
    #[must_use]
    pub fn with_filter(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.set(column, value);
        self.pagination.page_index = 0;
        self
    }

    /// Clears a filter (equivalent to setting it to the empty value).
    #[must_use]
    pub fn without_filter(self, column: &str) -> Self {
        self.with_filter(column, "")
    }

    /// Returns a fresh default query state.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Returns the 0-based page index.
    pub fn page_index(&self) -> usize {
        self.pagination.page_index
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.pagination.page_size
    }

    /// Returns the sort specification.
    pub fn sorting(&self) -> &SortSpec {
        &self.sorting
    }

    /// Returns the filter map.
    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    /// Serializes into REST query parameters.
    ///
    /// Produces `page` and `size`, a comma-joined `sortBy` when sorted, and
    /// one `<column>Filter=<value>` pair per active filter.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.pagination.page_index.to_string()),
            ("size".to_string(), self.pagination.page_size.to_string()),
        ];

        if let Some(sort) = self.sorting.to_param() {
            params.push(("sortBy".to_string(), sort));
        }

        for (column, value) in self.filters.active() {
            params.push((format!("{}Filter", column), value.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Direction;

    #[test]
    fn page_size_change_resets_page_index() {
        let query = QueryState::new().with_page(4).with_page_size(50);
        assert_eq!(query.page_index(), 0);
        assert_eq!(query.page_size(), 50);
    }

    #[test]
    fn filter_change_resets_page_index() {
        let query = QueryState::new().with_page(4).with_filter("status", "NEW");
        assert_eq!(query.page_index(), 0);

        // Clearing a filter is also a filter change.
        let query = query.with_page(2).without_filter("status");
        assert_eq!(query.page_index(), 0);
    }

    #[test]
    fn plain_page_change_keeps_everything_else() {
        let query = QueryState::new()
            .with_filter("status", "NEW")
            .toggle_sort("name")
            .with_page(3);

        assert_eq!(query.page_index(), 3);
        assert!(query.filters().is_active("status"));
        assert_eq!(query.sorting().direction_of("name"), Some(Direction::Asc));
    }

    #[test]
    fn transitions_produce_distinct_change_detection_keys() {
        let a = QueryState::new();
        let b = a.clone().with_page(1);
        let c = b.clone().with_page(1);

        assert_ne!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn serializes_the_documented_request_shape() {
        let query = QueryState::new()
            .with_page_size(10)
            .with_filter("status", "NEW");

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string()),
                ("statusFilter".to_string(), "NEW".to_string()),
            ]
        );
    }

    #[test]
    fn inactive_filters_are_not_serialized() {
        let query = QueryState::new()
            .with_filter("status", "NEW")
            .without_filter("status")
            .toggle_sort("score")
            .toggle_sort("score");

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "25".to_string()),
                ("sortBy".to_string(), "score:desc".to_string()),
            ]
        );
    }
}
