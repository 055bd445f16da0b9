//! Lead endpoints.

use serde_json::json;
use uuid::Uuid;

use crate::client::CrmClient;
use crate::error::FetchError;
use crate::fetch::FetchResult;
use crate::model::Lead;
use crate::query::QueryState;

/// Lists one page of leads.
pub async fn list(client: &CrmClient, query: &QueryState) -> Result<FetchResult<Lead>, FetchError> {
    super::fetch_list(client, "leads", query).await
}

/// Commits a single-field inline edit.
///
/// The field name is the wire name of the column (`email`, `phone`,
/// `status`, `score`, ...).
pub async fn update_field(
    client: &CrmClient,
    id: Uuid,
    field: &str,
    value: serde_json::Value,
) -> Result<(), FetchError> {
    client
        .patch_json(&format!("leads/{id}"), &json!({ field: value }))
        .await
}

/// Commits a whole-object edit (for cells that send the complete record).
pub async fn update(
    client: &CrmClient,
    id: Uuid,
    patch: &serde_json::Value,
) -> Result<(), FetchError> {
    client.patch_json(&format!("leads/{id}"), patch).await
}

/// Deletes one lead.
pub async fn delete(client: &CrmClient, id: Uuid) -> Result<(), FetchError> {
    client.delete(&format!("leads/{id}")).await
}

/// Deletes a batch of leads.
pub async fn bulk_delete(client: &CrmClient, ids: &[Uuid]) -> Result<(), FetchError> {
    client
        .post_json("leads/bulk-delete", &json!({ "ids": ids }))
        .await
}

/// Assigns a batch of leads to a sales officer.
pub async fn bulk_assign(
    client: &CrmClient,
    ids: &[Uuid],
    officer_id: Uuid,
) -> Result<(), FetchError> {
    client
        .post_json(
            "leads/bulk-assign",
            &json!({ "ids": ids, "officerId": officer_id }),
        )
        .await
}

/// Merges a duplicate lead into a primary one.
///
/// The duplicate's notes and meetings are re-attached server-side; the
/// duplicate record itself is removed.
pub async fn merge(client: &CrmClient, primary: Uuid, duplicate: Uuid) -> Result<(), FetchError> {
    client
        .post_json(
            "leads/merge",
            &json!({ "primaryId": primary, "duplicateId": duplicate }),
        )
        .await
}
