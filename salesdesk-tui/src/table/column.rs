//! Column definitions.

use std::sync::Arc;

use salesdesk_lib::validation::CellValue;

use super::editor::CellEditor;

/// Extracts the display text of a cell from a row.
pub type Accessor<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

/// Builds a custom cell editor seeded with the current display text.
pub type CustomEditorFactory = Arc<dyn Fn(&str) -> Box<dyn CellEditor> + Send + Sync>;

/// One column of a data grid.
///
/// Immutable once the table is constructed; owned by the screen that
/// configures it. Column order in the definition sequence is render order.
pub struct Column<R> {
    /// Stable identifier; doubles as the sort/filter column id on the wire.
    pub id: &'static str,
    pub header: &'static str,
    accessor: Accessor<R>,
    /// Preferred width in cells; 0 means "take the remaining space".
    pub width: u16,
    pub sortable: bool,
    /// Filter entry descriptor; `Some` makes the column filterable.
    pub filter: Option<FilterKind>,
    /// Editor descriptor; `Some` makes the column editable.
    pub editor: Option<EditorSpec<R>>,
}

impl<R> Column<R> {
    /// Creates a plain display column.
    pub fn new(
        id: &'static str,
        header: &'static str,
        accessor: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            header,
            accessor: Box::new(accessor),
            width: 0,
            sortable: false,
            filter: None,
            editor: None,
        }
    }

    /// Sets the preferred width in cells.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Marks the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Makes the column filterable with the given filter entry UI.
    pub fn filterable(mut self, kind: FilterKind) -> Self {
        self.filter = Some(kind);
        self
    }

    /// Makes the column editable.
    pub fn editable(mut self, spec: EditorSpec<R>) -> Self {
        self.editor = Some(spec);
        self
    }

    /// Returns the display text for a row.
    pub fn display(&self, row: &R) -> String {
        (self.accessor)(row)
    }
}

/// How the filter affordance collects a value for a column.
pub enum FilterKind {
    /// Free-text entry.
    Text,
    /// Enumerated choice of `(label, wire value)` pairs.
    Choice(Vec<(String, String)>),
}

/// Declares a column's inline editor.
pub struct EditorSpec<R> {
    pub kind: EditorKind,
    /// Wire field name committed values are written to.
    pub field: &'static str,
    /// Validation registry key applied on commit.
    pub validator: Option<&'static str>,
    /// Commit the whole row object instead of the single field.
    pub send_complete_object: bool,
    /// Per-cell enablement; `None` means always enabled.
    pub enabled: Option<fn(&R) -> bool>,
    /// Extracts the current value the editor is seeded with.
    ///
    /// Defaults to the column's display text as a text value.
    pub seed: Option<Box<dyn Fn(&R) -> CellValue + Send + Sync>>,
}

impl<R> EditorSpec<R> {
    /// Creates an editor spec writing to the given wire field.
    pub fn new(kind: EditorKind, field: &'static str) -> Self {
        Self {
            kind,
            field,
            validator: None,
            send_complete_object: false,
            enabled: None,
            seed: None,
        }
    }

    /// Applies a registry validator on commit.
    pub fn validator(mut self, key: &'static str) -> Self {
        self.validator = Some(key);
        self
    }

    /// Commits the complete row object instead of just the field.
    pub fn send_complete_object(mut self) -> Self {
        self.send_complete_object = true;
        self
    }

    /// Restricts editing to rows where the predicate holds.
    pub fn enabled_when(mut self, pred: fn(&R) -> bool) -> Self {
        self.enabled = Some(pred);
        self
    }

    /// Sets the current-value extractor the editor is seeded with.
    pub fn seed_with(mut self, seed: impl Fn(&R) -> CellValue + Send + Sync + 'static) -> Self {
        self.seed = Some(Box::new(seed));
        self
    }

    /// Returns `true` if the cell is enabled for this row.
    pub fn is_enabled(&self, row: &R) -> bool {
        self.enabled.map(|pred| pred(row)).unwrap_or(true)
    }
}

/// The input type an editor presents.
pub enum EditorKind {
    /// Plain text entry.
    Text,
    /// Single-select over `(label, wire value)` pairs.
    Select(Vec<(String, String)>),
    /// Multi-select with an optional maximum selection count.
    MultiSelect {
        options: Vec<(String, String)>,
        max: Option<usize>,
    },
    /// ISO date entry.
    Date,
    /// Radio group over `(label, wire value)` pairs.
    Radio(Vec<(String, String)>),
    /// Injected custom editor.
    Custom(CustomEditorFactory),
}
