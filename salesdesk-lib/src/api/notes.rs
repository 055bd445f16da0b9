//! Note endpoints.

use serde_json::json;
use uuid::Uuid;

use crate::client::CrmClient;
use crate::error::FetchError;
use crate::fetch::FetchResult;
use crate::model::Note;
use crate::query::QueryState;

/// Lists one page of notes.
pub async fn list(client: &CrmClient, query: &QueryState) -> Result<FetchResult<Note>, FetchError> {
    super::fetch_list(client, "notes", query).await
}

/// Creates a note on a lead.
pub async fn create(client: &CrmClient, lead_id: Uuid, body: &str) -> Result<(), FetchError> {
    client
        .post_json("notes", &json!({ "leadId": lead_id, "body": body }))
        .await
}

/// Deletes one note.
pub async fn delete(client: &CrmClient, id: Uuid) -> Result<(), FetchError> {
    client.delete(&format!("notes/{id}")).await
}
