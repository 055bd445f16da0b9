//! The data-grid engine: column definitions, grid state, cell editing, and
//! column filter entry.
//!
//! The grid is strictly server-driven: rows render in the order the fetch
//! returned them, columns render in definition order, and sorting/filtering
//! only mutate the owning screen's query state.

mod column;
mod editor;
mod filter;
mod grid;

pub use column::Accessor;
pub use column::Column;
pub use column::CustomEditorFactory;
pub use column::EditorKind;
pub use column::EditorSpec;
pub use column::FilterKind;
pub use editor::CellEditor;
pub use editor::EditOutcome;
pub use editor::EditSession;
pub use editor::EditorEvent;
pub use filter::FilterOutcome;
pub use filter::FilterSession;
pub use grid::GridState;
pub use grid::render_grid;
pub use grid::render_popup;
