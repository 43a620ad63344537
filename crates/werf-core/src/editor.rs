//! Main editor orchestration.
//!
//! ## Learning: The Facade Pattern
//!
//! `Editor` acts as a facade over a `TextBuffer` and the working selection.
//! External code sends commands or calls the methods below and never picks
//! an undo classification itself: the editor decides whether an edit is
//! typing, backspacing, deleting or a plain replacement.

use std::cmp::Ordering;
use std::path::Path;

use tracing::debug;
use werf_buffer::{Address, OpKind, Range, TextBuffer};

use crate::command::Command;
use crate::config::Config;
use crate::{CoreError, CoreResult};

/// The main editor state.
///
/// ## Thread Safety
///
/// `Editor` is designed to be owned by a single thread. It holds no shared
/// state, so separate editors on separate threads never interact.
#[derive(Debug, Clone)]
pub struct Editor {
    /// The document being edited
    buffer: TextBuffer,

    /// Current selection; a caret when empty
    range: Range,

    /// Whether the selection was made from end to start
    backward: bool,

    /// Editor configuration
    config: Config,

    /// Clipboard content
    clipboard: Vec<u8>,
}

impl Editor {
    /// Creates a new editor instance.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an editor with custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self::with_buffer(TextBuffer::with_config(config.buffer_config()), config)
    }

    /// Creates an editor over an existing buffer.
    pub fn with_buffer(buffer: TextBuffer, config: Config) -> Self {
        Self {
            buffer,
            range: Range::default(),
            backward: false,
            config,
            clipboard: Vec::new(),
        }
    }

    // ==================== File Operations ====================

    /// Opens a file, replacing the current document.
    pub fn open(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();

        if let Some(limit) = self.config.max_file_bytes() {
            let size = std::fs::metadata(path)?.len();
            if size > limit {
                return Err(CoreError::FileTooLarge {
                    path: path.display().to_string(),
                    size,
                    limit,
                });
            }
        }

        self.buffer = TextBuffer::from_file_with_config(path, self.config.buffer_config())?;
        self.range = Range::default();
        self.backward = false;
        debug!(path = %path.display(), "opened document");
        Ok(())
    }

    /// Saves the document to its file.
    pub fn save(&mut self) -> CoreResult<()> {
        self.buffer.save()?;
        Ok(())
    }

    /// Saves the document to a new path.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        self.buffer.save_as(path)?;
        Ok(())
    }

    // ==================== Commands ====================

    /// Executes a command.
    pub fn execute(&mut self, cmd: &Command) -> CoreResult<()> {
        debug!(command = cmd.display_name(), "execute");
        match cmd {
            Command::Save => self.save(),
            Command::SaveAs { path } => self.save_as(path),
            Command::InsertText { text } => self.type_text(text.as_bytes()),
            Command::NewLine => self.new_line(),
            Command::Backspace => self.backspace(),
            Command::Delete => self.delete(),
            Command::Undo => self.undo().map(drop),
            Command::Redo => self.redo().map(drop),
            Command::Cut => self.cut(),
            Command::Copy => self.copy(),
            Command::Paste => self.paste(),
            Command::SelectAll => {
                self.select_all();
                Ok(())
            }
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveToLineStart => {
                self.move_to_line_start();
                Ok(())
            }
            Command::MoveToLineEnd => self.move_to_line_end(),
            Command::MoveToFileStart => {
                self.move_to_file_start();
                Ok(())
            }
            Command::MoveToFileEnd => {
                self.move_to_file_end();
                Ok(())
            }
        }
    }

    // ==================== Text Editing ====================

    /// Types text over the selection.
    ///
    /// Keystrokes on a caret merge into one undo step unless
    /// `coalesce_typing` is off. Typing over a selection always starts a
    /// new step.
    pub fn type_text(&mut self, text: &[u8]) -> CoreResult<()> {
        let kind = if self.config.editor.coalesce_typing && self.range.is_caret() {
            OpKind::Char
        } else {
            OpKind::Replace
        };
        self.apply(text, kind)
    }

    /// Breaks the line at the caret.
    pub fn new_line(&mut self) -> CoreResult<()> {
        self.type_text(b"\n")
    }

    /// Deletes the selection, or the character before the caret.
    pub fn backspace(&mut self) -> CoreResult<()> {
        if !self.range.is_caret() {
            return self.apply(b"", OpKind::Replace);
        }
        let prev = self.buffer.file().prev_boundary(self.range.start)?;
        if prev == self.range.start {
            return Ok(());
        }
        self.range.start = prev;
        self.apply(b"", OpKind::Backspace)
    }

    /// Deletes the selection, or the character after the caret.
    pub fn delete(&mut self) -> CoreResult<()> {
        if !self.range.is_caret() {
            return self.apply(b"", OpKind::Replace);
        }
        let next = self.buffer.file().next_boundary(self.range.end)?;
        if next == self.range.end {
            return Ok(());
        }
        self.range.end = next;
        self.apply(b"", OpKind::Delete)
    }

    /// Undoes the last edit and selects what it replaced.
    ///
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> CoreResult<bool> {
        let undone = self.buffer.undo(&mut self.range)?;
        self.backward = false;
        Ok(undone)
    }

    /// Redoes the last undone edit.
    ///
    /// Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> CoreResult<bool> {
        let redone = self.buffer.redo(&mut self.range)?;
        self.backward = false;
        Ok(redone)
    }

    fn apply(&mut self, text: &[u8], kind: OpKind) -> CoreResult<()> {
        self.buffer.edit(&mut self.range, text, kind)?;
        self.backward = false;
        Ok(())
    }

    // ==================== Cursor Movement ====================

    /// Moves the caret one character left, or collapses the selection to
    /// its start.
    pub fn move_left(&mut self) -> CoreResult<()> {
        let target = if self.range.is_caret() {
            self.buffer.file().prev_boundary(self.range.start)?
        } else {
            self.range.start
        };
        self.move_to(target);
        Ok(())
    }

    /// Moves the caret one character right, or collapses the selection to
    /// its end.
    pub fn move_right(&mut self) -> CoreResult<()> {
        let target = if self.range.is_caret() {
            self.buffer.file().next_boundary(self.range.end)?
        } else {
            self.range.end
        };
        self.move_to(target);
        Ok(())
    }

    /// Moves the caret to the start of its line.
    pub fn move_to_line_start(&mut self) {
        self.move_to(Address::new(self.head().line, 0));
    }

    /// Moves the caret to the end of its line's content.
    pub fn move_to_line_end(&mut self) -> CoreResult<()> {
        let line = self.head().line;
        let offset = self.buffer.file().content_len(line)?;
        self.move_to(Address::new(line, offset));
        Ok(())
    }

    pub fn move_to_file_start(&mut self) {
        self.move_to(Address::ZERO);
    }

    pub fn move_to_file_end(&mut self) {
        self.move_to(self.buffer.end());
    }

    /// Places a caret, clearing any selection.
    pub fn move_to(&mut self, at: Address) {
        self.range = Range::caret(at);
        self.backward = false;
    }

    // ==================== Selection ====================

    /// Selects from `anchor` to `head`, in either direction.
    pub fn select(&mut self, anchor: Address, head: Address) -> CoreResult<()> {
        let (range, order) = Range::from_addresses(anchor, head);
        self.buffer.file().check_range(&range)?;
        self.range = range;
        self.backward = order == Ordering::Greater;
        Ok(())
    }

    /// Selects all text.
    pub fn select_all(&mut self) {
        self.range = self.buffer.file().full_range();
        self.backward = false;
    }

    /// The moving end of the selection.
    pub fn head(&self) -> Address {
        if self.backward {
            self.range.start
        } else {
            self.range.end
        }
    }

    /// Returns the selected bytes.
    pub fn selected_text(&self) -> CoreResult<Vec<u8>> {
        Ok(self.buffer.selected(&self.range)?)
    }

    /// Copies selection to clipboard.
    pub fn copy(&mut self) -> CoreResult<()> {
        if !self.range.is_caret() {
            self.clipboard = self.selected_text()?;
        }
        Ok(())
    }

    /// Cuts selection to clipboard.
    pub fn cut(&mut self) -> CoreResult<()> {
        if self.range.is_caret() {
            return Ok(());
        }
        self.copy()?;
        self.apply(b"", OpKind::Replace)
    }

    /// Pastes from clipboard.
    pub fn paste(&mut self) -> CoreResult<()> {
        if self.clipboard.is_empty() && self.range.is_caret() {
            return Ok(());
        }
        self.buffer.edit(&mut self.range, &self.clipboard, OpKind::Replace)?;
        self.backward = false;
        Ok(())
    }

    // ==================== State ====================

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Current selection.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Returns true if the selection runs from end to start.
    pub fn is_backward(&self) -> bool {
        self.backward
    }

    pub fn clipboard(&self) -> &[u8] {
        &self.clipboard
    }

    /// Returns the editor configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Updates the configuration.
    pub fn set_config(&mut self, config: Config) -> CoreResult<()> {
        self.buffer.set_config(config.buffer_config())?;
        self.config = config;
        Ok(())
    }

    /// Returns true if the document has unsaved changes.
    pub fn has_unsaved_changes(&self) -> bool {
        self.buffer.is_modified()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
