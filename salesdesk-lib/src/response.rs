//! List response envelope decoding.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::fetch::FetchResult;

/// Pagination metadata block of a list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Requested page size.
    pub size: usize,
    /// 0-based page number.
    pub number: usize,
    /// Total records matching the active filters.
    pub total_elements: u64,
    /// Total number of pages for the active filters.
    pub total_pages: u64,
}

/// Raw list envelope as returned by the data source.
///
/// The backend spells the row array either `items` or `content` depending on
/// the entity; both are accepted. They are modeled as two optional fields
/// because serde field aliases are not honored next to a flattened field.
/// Entity-specific aggregate counts (`allCount`, `upcomingCount`, ...)
/// arrive as extra top-level keys and are collected verbatim.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ListEnvelope<T> {
    #[serde(default)]
    items: Option<Vec<T>>,
    #[serde(default)]
    content: Option<Vec<T>>,
    page: PageMeta,
    /// Server echo of the filters it actually applied.
    #[serde(default)]
    applied_filters: BTreeMap<String, String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl<T: DeserializeOwned> ListEnvelope<T> {
    /// Materializes the envelope into a [`FetchResult`].
    ///
    /// `total` prefers the unfiltered `allCount` aggregate when the entity
    /// provides one, falling back to the filtered element count.
    pub fn into_result(self) -> FetchResult<T> {
        let rows = self.items.or(self.content).unwrap_or_default();
        let aggregates: BTreeMap<String, i64> = self
            .extra
            .into_iter()
            .filter_map(|(k, v)| v.as_i64().map(|n| (k, n)))
            .collect();

        let total = aggregates
            .get("allCount")
            .map(|n| *n as u64)
            .unwrap_or(self.page.total_elements);

        FetchResult {
            rows,
            page_index: self.page.number,
            page_size: self.page.size,
            total,
            total_filtered: self.page.total_elements,
            total_pages: self.page.total_pages,
            applied_filters: self.applied_filters,
            aggregates,
        }
    }
}

/// Error body shape used by the data source for rejections.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

/// The `error` object inside an [`ErrorBody`].
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        name: String,
    }

    #[test]
    fn decodes_items_with_aggregates_and_filter_echo() {
        let json = r#"{
            "items": [{"name": "a"}, {"name": "b"}],
            "page": {"size": 10, "number": 0, "totalElements": 25, "totalPages": 3},
            "appliedFilters": {"status": "NEW"},
            "allCount": 40,
            "upcomingCount": 7
        }"#;

        let envelope: ListEnvelope<Row> = serde_json::from_str(json).unwrap();
        let result = envelope.into_result();

        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.page_index, 0);
        assert_eq!(result.total_filtered, 25);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total, 40);
        assert_eq!(result.aggregates.get("upcomingCount"), Some(&7));
        assert_eq!(
            result.applied_filters.get("status").map(String::as_str),
            Some("NEW")
        );
    }

    #[test]
    fn accepts_content_spelling() {
        let json = r#"{
            "content": [{"name": "a"}],
            "page": {"size": 25, "number": 0, "totalElements": 1, "totalPages": 1}
        }"#;

        let envelope: ListEnvelope<Row> = serde_json::from_str(json).unwrap();
        let result = envelope.into_result();

        assert_eq!(result.rows, vec![Row { name: "a".into() }]);
        assert_eq!(result.total, 1);
        assert!(result.applied_filters.is_empty());
    }
}
