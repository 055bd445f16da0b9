//! Capability token names granted through roles.

pub const LEADS_EDIT: &str = "leads.edit";
pub const LEADS_DELETE: &str = "leads.delete";
pub const LEADS_ASSIGN: &str = "leads.assign";
pub const LEADS_MERGE: &str = "leads.merge";
pub const OFFICERS_EDIT: &str = "officers.edit";
pub const OFFICERS_DELETE: &str = "officers.delete";
pub const MEETINGS_EDIT: &str = "meetings.edit";
pub const MEETINGS_DELETE: &str = "meetings.delete";
pub const NOTES_CREATE: &str = "notes.create";
pub const NOTES_DELETE: &str = "notes.delete";
pub const FILES_DELETE: &str = "files.delete";
pub const USERS_MANAGE: &str = "users.manage";
