//! File listing endpoints.

use uuid::Uuid;

use crate::client::CrmClient;
use crate::error::FetchError;
use crate::fetch::FetchResult;
use crate::model::FileEntry;
use crate::query::QueryState;

/// Lists one page of files.
pub async fn list(
    client: &CrmClient,
    query: &QueryState,
) -> Result<FetchResult<FileEntry>, FetchError> {
    super::fetch_list(client, "files", query).await
}

/// Deletes one file.
pub async fn delete(client: &CrmClient, id: Uuid) -> Result<(), FetchError> {
    client.delete(&format!("files/{id}")).await
}
