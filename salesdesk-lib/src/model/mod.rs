//! Typed wire model for the CRM entities.

mod file;
mod lead;
mod meeting;
mod note;
mod officer;
mod user;

pub use file::FileEntry;
pub use lead::Lead;
pub use lead::LeadStatus;
pub use meeting::Meeting;
pub use meeting::MeetingStatus;
pub use note::Note;
pub use officer::SalesOfficer;
pub use user::CurrentUser;
pub use user::Role;
pub use user::UserAccount;
