//! Command system for editor actions.
//!
//! ## Learning: The Command Pattern
//!
//! Commands encapsulate actions as values:
//! - Actions become first-class values
//! - Can be stored, queued and replayed
//! - Enables key bindings and macros without touching the editor
//!
//! `Editor::execute` is the single place a command turns into buffer
//! edits, so every keystroke goes through the same undo classification.

/// Built-in editor commands.
///
/// ## Learning: Exhaustive Enums
///
/// With `#[non_exhaustive]`, we signal that new variants may be added.
/// Match arms outside this crate should include `_ =>` for future variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Command {
    // File commands
    Save,
    SaveAs { path: String },

    // Edit commands
    InsertText { text: String },
    NewLine,
    Backspace,
    Delete,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,

    // Cursor movement
    MoveLeft,
    MoveRight,
    MoveToLineStart,
    MoveToLineEnd,
    MoveToFileStart,
    MoveToFileEnd,
}

impl Command {
    /// Returns the command's display name.
    pub fn display_name(&self) -> &str {
        match self {
            Command::Save => "Save",
            Command::SaveAs { .. } => "Save As",
            Command::InsertText { .. } => "Insert Text",
            Command::NewLine => "New Line",
            Command::Backspace => "Backspace",
            Command::Delete => "Delete",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::SelectAll => "Select All",
            Command::MoveLeft => "Move Left",
            Command::MoveRight => "Move Right",
            Command::MoveToLineStart => "Move to Line Start",
            Command::MoveToLineEnd => "Move to Line End",
            Command::MoveToFileStart => "Move to File Start",
            Command::MoveToFileEnd => "Move to File End",
        }
    }

    /// Returns true if the command may change the document.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::InsertText { .. }
                | Command::NewLine
                | Command::Backspace
                | Command::Delete
                | Command::Undo
                | Command::Redo
                | Command::Cut
                | Command::Paste
        )
    }
}
