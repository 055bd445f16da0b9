//! Sort ordering for query results.

/// Sort direction for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the wire representation (`asc` / `desc`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// An insertion-ordered multi-column sort specification.
///
/// Toggling a column cycles it through unsorted → ascending → descending →
/// unsorted. Toggling one column never disturbs the others; when several
/// columns are active, they keep the order in which they
/// were first toggled, and the server applies each as a stable secondary
/// sort key.
///
/// # Example
///
/// ```
/// use salesdesk_lib::query::{Direction, SortSpec};
///
/// let mut sort = SortSpec::new();
/// sort.toggle("score");
/// sort.toggle("score");
/// sort.toggle("name");
/// assert_eq!(sort.direction_of("score"), Some(Direction::Desc));
/// assert_eq!(sort.to_param().as_deref(), Some("score:desc,name:asc"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortSpec {
    columns: Vec<(String, Direction)>,
}

impl SortSpec {
    /// Creates an empty sort specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycles the sort state of a column: unsorted → asc → desc → unsorted.
    pub fn toggle(&mut self, column: &str) {
        match self.columns.iter().position(|(c, _)| c == column) {
            None => self.columns.push((column.to_string(), Direction::Asc)),
            Some(idx) => match self.columns[idx].1 {
                Direction::Asc => self.columns[idx].1 = Direction::Desc,
                Direction::Desc => {
                    self.columns.remove(idx);
                }
            },
        }
    }

    /// Returns the direction of a column, or `None` when unsorted.
    pub fn direction_of(&self, column: &str) -> Option<Direction> {
        self.columns
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, d)| *d)
    }

    /// Returns the 0-based position of a column in the multi-sort order.
    pub fn position_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|(c, _)| c == column)
    }

    /// Returns the active sort columns in insertion order.
    pub fn columns(&self) -> &[(String, Direction)] {
        &self.columns
    }

    /// Returns `true` if no column is sorted.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Serializes to the `sortBy` parameter value: comma-joined
    /// `field:direction` pairs, or `None` when unsorted.
    pub fn to_param(&self) -> Option<String> {
        if self.columns.is_empty() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|(c, d)| format!("{}:{}", c, d.as_str()))
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_through_states() {
        let mut sort = SortSpec::new();
        assert_eq!(sort.direction_of("name"), None);

        sort.toggle("name");
        assert_eq!(sort.direction_of("name"), Some(Direction::Asc));

        sort.toggle("name");
        assert_eq!(sort.direction_of("name"), Some(Direction::Desc));

        sort.toggle("name");
        assert_eq!(sort.direction_of("name"), None);
        assert!(sort.is_empty());
    }

    #[test]
    fn multi_column_order_is_insertion_order() {
        let mut sort = SortSpec::new();
        sort.toggle("score");
        sort.toggle("name");
        sort.toggle("score"); // score -> desc, stays first

        assert_eq!(sort.position_of("score"), Some(0));
        assert_eq!(sort.position_of("name"), Some(1));
        assert_eq!(sort.to_param().as_deref(), Some("score:desc,name:asc"));
    }

    #[test]
    fn toggling_one_column_keeps_the_others() {
        let mut sort = SortSpec::new();
        sort.toggle("score");
        sort.toggle("name");
        // Cycle score all the way out.
        sort.toggle("score");
        sort.toggle("score");

        assert_eq!(sort.direction_of("score"), None);
        assert_eq!(sort.direction_of("name"), Some(Direction::Asc));
        assert_eq!(sort.to_param().as_deref(), Some("name:asc"));
    }
}
