//! Meeting endpoints.

use serde_json::json;
use uuid::Uuid;

use crate::client::CrmClient;
use crate::error::FetchError;
use crate::fetch::FetchResult;
use crate::model::Meeting;
use crate::query::QueryState;

/// Lists one page of meetings.
///
/// The result carries the `allCount` and `upcomingCount` aggregates.
pub async fn list(
    client: &CrmClient,
    query: &QueryState,
) -> Result<FetchResult<Meeting>, FetchError> {
    super::fetch_list(client, "meetings", query).await
}

/// Commits a single-field inline edit.
pub async fn update_field(
    client: &CrmClient,
    id: Uuid,
    field: &str,
    value: serde_json::Value,
) -> Result<(), FetchError> {
    client
        .patch_json(&format!("meetings/{id}"), &json!({ field: value }))
        .await
}

/// Deletes one meeting.
pub async fn delete(client: &CrmClient, id: Uuid) -> Result<(), FetchError> {
    client.delete(&format!("meetings/{id}")).await
}
