//! The acting user's session: identity plus granted capabilities.
//!
//! The session is an explicitly-initialized context object with a defined
//! lifecycle: populated on login via [`Session::establish`], dropped on
//! logout. UI affordances consult it through [`Session::allows`] and
//! [`Session::allows_for`]; a denial suppresses the affordance and is never
//! surfaced as an error.

pub mod capability;

use std::collections::HashSet;

use uuid::Uuid;

use crate::api::users;
use crate::client::CrmClient;
use crate::error::Error;
use crate::model::CurrentUser;

/// The acting user and their granted capability token set.
#[derive(Debug, Clone)]
pub struct Session {
    user: CurrentUser,
    capabilities: HashSet<String>,
}

impl Session {
    /// Builds a session from an already-loaded user and capability set.
    pub fn new(user: CurrentUser, capabilities: impl IntoIterator<Item = String>) -> Self {
        Self {
            user,
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Loads the acting user and their authorities from the backend.
    pub async fn establish(client: &CrmClient) -> Result<Self, Error> {
        let user = users::current(client).await?;
        let capabilities = users::authorities(client).await?;
        log::info!(
            "session established for {} ({} capabilities)",
            user.username,
            capabilities.len()
        );
        Ok(Self::new(user, capabilities))
    }

    /// Returns the acting user.
    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// Returns the acting user's id.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Returns `true` if the capability token is granted.
    pub fn allows(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns `true` if the capability is granted **or** the acting user
    /// owns the resource.
    ///
    /// This is the check behind ownership-scoped affordances such as "can
    /// edit only records assigned to the acting user".
    pub fn allows_for(&self, capability: &str, owner: Option<Uuid>) -> bool {
        self.allows(capability) || owner == Some(self.user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Uuid) -> CurrentUser {
        CurrentUser {
            id,
            username: "jsmith".into(),
            email: "jsmith@example.com".into(),
            role: "OFFICER".into(),
            user_type: None,
        }
    }

    #[test]
    fn capability_or_ownership_activates_the_affordance() {
        let me = Uuid::new_v4();
        let someone_else = Uuid::new_v4();

        let session = Session::new(user(me), vec![]);
        // No capability, no ownership: suppressed.
        assert!(!session.allows_for(capability::LEADS_EDIT, Some(someone_else)));
        assert!(!session.allows_for(capability::LEADS_EDIT, None));
        // Ownership alone is enough.
        assert!(session.allows_for(capability::LEADS_EDIT, Some(me)));

        let session = Session::new(user(me), vec![capability::LEADS_EDIT.to_string()]);
        // Capability alone is enough.
        assert!(session.allows_for(capability::LEADS_EDIT, Some(someone_else)));
    }
}
