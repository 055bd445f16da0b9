//! Sales officer endpoints.

use serde_json::json;
use uuid::Uuid;

use crate::client::CrmClient;
use crate::error::FetchError;
use crate::fetch::FetchResult;
use crate::model::SalesOfficer;
use crate::query::QueryState;

/// Lists one page of sales officers.
pub async fn list(
    client: &CrmClient,
    query: &QueryState,
) -> Result<FetchResult<SalesOfficer>, FetchError> {
    super::fetch_list(client, "officers", query).await
}

/// Loads every active officer, for assignment pickers.
pub async fn options(client: &CrmClient) -> Result<Vec<SalesOfficer>, FetchError> {
    let query = QueryState::new()
        .with_page_size(500)
        .with_filter("active", "true");
    Ok(super::fetch_list(client, "officers", &query).await?.rows)
}

/// Commits a single-field inline edit.
pub async fn update_field(
    client: &CrmClient,
    id: Uuid,
    field: &str,
    value: serde_json::Value,
) -> Result<(), FetchError> {
    client
        .patch_json(&format!("officers/{id}"), &json!({ field: value }))
        .await
}

/// Deletes one officer.
pub async fn delete(client: &CrmClient, id: Uuid) -> Result<(), FetchError> {
    client.delete(&format!("officers/{id}")).await
}
