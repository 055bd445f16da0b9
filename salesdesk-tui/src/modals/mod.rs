//! Modal dialogs.

mod confirm;

pub use confirm::AssignPicker;
pub use confirm::ChallengeModal;
pub use confirm::ConfirmModal;
pub use confirm::Modal;
pub use confirm::ModalOutcome;
pub use confirm::NoteEntry;
pub use confirm::PendingAction;
