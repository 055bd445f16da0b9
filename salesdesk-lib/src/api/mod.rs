//! Typed endpoints, one module per entity.
//!
//! Every entity exposes a `list` operation driven by a
//! [`QueryState`](crate::query::QueryState); mutating operations exist where
//! the UI offers them (inline field commits, deletes, bulk actions).

pub mod files;
pub mod leads;
pub mod meetings;
pub mod notes;
pub mod officers;
pub mod users;

use serde::de::DeserializeOwned;

use crate::client::CrmClient;
use crate::error::FetchError;
use crate::fetch::FetchResult;
use crate::query::QueryState;
use crate::response::ListEnvelope;

/// Fetches one page of an entity list for the given query state.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    client: &CrmClient,
    path: &str,
    query: &QueryState,
) -> Result<FetchResult<T>, FetchError> {
    let envelope: ListEnvelope<T> = client.get_json(path, &query.to_params()).await?;
    Ok(envelope.into_result())
}
