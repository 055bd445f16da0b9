//! User, role, and current-user endpoints.

use serde_json::json;
use uuid::Uuid;

use crate::client::CrmClient;
use crate::error::FetchError;
use crate::fetch::FetchResult;
use crate::model::CurrentUser;
use crate::model::Role;
use crate::model::UserAccount;
use crate::query::QueryState;

/// Lists one page of user accounts.
pub async fn list(
    client: &CrmClient,
    query: &QueryState,
) -> Result<FetchResult<UserAccount>, FetchError> {
    super::fetch_list(client, "users", query).await
}

/// Lists one page of roles.
pub async fn list_roles(
    client: &CrmClient,
    query: &QueryState,
) -> Result<FetchResult<Role>, FetchError> {
    super::fetch_list(client, "roles", query).await
}

/// Loads every role, for the role-assignment picker.
pub async fn role_options(client: &CrmClient) -> Result<Vec<Role>, FetchError> {
    let query = QueryState::new().with_page_size(200);
    Ok(super::fetch_list(client, "roles", &query).await?.rows)
}

/// Commits a single-field inline edit (e.g. role assignment).
pub async fn update_field(
    client: &CrmClient,
    id: Uuid,
    field: &str,
    value: serde_json::Value,
) -> Result<(), FetchError> {
    client
        .patch_json(&format!("users/{id}"), &json!({ field: value }))
        .await
}

/// Retrieves the acting user.
pub async fn current(client: &CrmClient) -> Result<CurrentUser, FetchError> {
    client.get_json("me", &[]).await
}

/// Retrieves the acting user's granted capability tokens.
pub async fn authorities(client: &CrmClient) -> Result<Vec<String>, FetchError> {
    client.get_json("me/authorities", &[]).await
}
