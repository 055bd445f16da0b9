//! User, role, and current-user types.

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// An application user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Name of the role granted to this user.
    pub role: String,
    /// Coarse account kind hint (`ADMIN`, `OFFICER`, ...).
    #[serde(default)]
    pub user_type: Option<String>,
    pub active: bool,
}

/// A role with its granted capability tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Capability tokens granted by this role.
    #[serde(default)]
    pub authorities: Vec<String>,
}

/// The acting user, as reported by `/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub user_type: Option<String>,
}
