//! Small reusable widgets.

mod spinner;
mod text_input;

pub use spinner::Spinner;
pub use text_input::TextInput;
