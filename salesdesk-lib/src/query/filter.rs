//! Column filter values with a stable key set.

/// Insertion-ordered mapping of column id to filter value.
///
/// Removing a filter means setting its value to the empty string rather than
/// deleting the key, so the key set stays stable and two filter maps can be
/// diffed key-by-key. Only non-empty values are considered active and
/// serialized to the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterMap {
    entries: Vec<(String, String)>,
}

impl FilterMap {
    /// Creates an empty filter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a filter value for a column.
    ///
    /// An empty value deactivates the filter but keeps the key.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column.to_string(), value)),
        }
    }

    /// Returns the value for a column, including inactive (empty) values.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if the column has a non-empty filter value.
    pub fn is_active(&self, column: &str) -> bool {
        self.get(column).is_some_and(|v| !v.is_empty())
    }

    /// Iterates over the active (non-empty) filters in insertion order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Returns `true` if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Returns every known key, active or not, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_keeps_the_key() {
        let mut filters = FilterMap::new();
        filters.set("status", "NEW");
        filters.set("status", "");

        assert!(!filters.is_active("status"));
        assert_eq!(filters.keys().collect::<Vec<_>>(), vec!["status"]);
        assert_eq!(filters.active().count(), 0);
    }

    #[test]
    fn upsert_replaces_value_in_place() {
        let mut filters = FilterMap::new();
        filters.set("status", "NEW");
        filters.set("company", "acme");
        filters.set("status", "LOST");

        let active: Vec<_> = filters.active().collect();
        assert_eq!(active, vec![("status", "LOST"), ("company", "acme")]);
    }
}
