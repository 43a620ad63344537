//! Editing session: a file together with its undo and redo logs.
//!
//! ## Learning: Splitting Borrows
//!
//! `TextBuffer::undo` hands `&mut self.file`, `&mut self.undo` and
//! `&mut self.redo` to one call at the same time. The borrow checker allows
//! it because the three are distinct fields:
//!
//! ```rust,ignore
//! self.undo.undo(&mut self.file, &mut self.redo, range)  // OK: disjoint fields
//! self.undo.undo(&mut self.file, &mut self.undo, range)  // ERROR: `undo` borrowed twice
//! ```

use std::borrow::Cow;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::history::{OpKind, UndoLog};
use crate::{Address, BufferResult, File, Range};

/// A document open for editing.
///
/// Loading content does not record history. Every edit made through
/// [`TextBuffer::edit`] can be undone, and undone edits can be redone until
/// the next fresh edit.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The line store
    file: File,

    /// Edits that can be undone
    undo: UndoLog,

    /// Undone edits that can be reapplied
    redo: UndoLog,

    /// Whether the buffer has unsaved changes
    modified: bool,

    /// Associated file path (if any)
    file_path: Option<PathBuf>,

    /// Buffer-specific settings
    config: BufferConfig,
}

/// Configuration for buffer behavior
#[derive(Debug, Clone)]
pub struct BufferConfig {
    /// Maximum undo entries to keep, 0 for no limit
    pub max_history: usize,

    /// Bytes requested per read when loading
    pub read_chunk_size: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            max_history: 1000,
            read_chunk_size: 8192,
        }
    }
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use werf_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates a buffer with custom configuration.
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            file: File::new(),
            undo: UndoLog::with_limit(config.max_history),
            redo: UndoLog::with_limit(config.max_history),
            modified: false,
            file_path: None,
            config,
        }
    }

    /// Loads a buffer from a reader.
    pub fn from_reader<R: Read>(reader: R, config: BufferConfig) -> BufferResult<Self> {
        let mut buffer = Self::with_config(config);
        buffer.load(reader)?;
        Ok(buffer)
    }

    /// Loads a buffer from a file.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        Self::from_file_with_config(path, BufferConfig::default())
    }

    /// Loads a buffer from a file with custom configuration.
    pub fn from_file_with_config(
        path: impl AsRef<Path>,
        config: BufferConfig,
    ) -> BufferResult<Self> {
        let path = path.as_ref();
        let mut buffer = Self::from_reader(fs::File::open(path)?, config)?;
        buffer.file_path = Some(path.to_path_buf());
        debug!(path = %path.display(), lines = buffer.len_lines(), "loaded file");
        Ok(buffer)
    }

    /// Appends everything `reader` yields to the end of the buffer.
    ///
    /// Nothing is recorded in the undo log.
    pub fn load<R: Read>(&mut self, reader: R) -> BufferResult<usize> {
        let mut range = Range::caret(self.file.end());
        self.file.read_from(&mut range, reader, self.config.read_chunk_size)
    }

    /// Saves the buffer to its associated file.
    pub fn save(&mut self) -> BufferResult<()> {
        let path = self.file_path.clone().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No file path set")
        })?;
        self.save_as(&path)
    }

    /// Saves the buffer to a specific path.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> BufferResult<()> {
        let path = path.as_ref();

        // Write to a temporary file first, then rename (atomic write)
        let temp_path = path.with_extension("tmp");
        let written = self.write_to(fs::File::create(&temp_path)?)?;
        fs::rename(&temp_path, path)?;

        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        debug!(path = %path.display(), bytes = written, "saved file");
        Ok(())
    }

    /// Streams the whole document to `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> BufferResult<usize> {
        let mut range = self.file.full_range();
        self.file.write_to(&mut range, writer, self.config.read_chunk_size)
    }

    // ==================== Text Access ====================

    /// The underlying line store.
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Returns the entire text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.file.to_bytes()).into_owned()
    }

    /// Returns the raw bytes of the document.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.file.to_bytes()
    }

    /// Returns a line, replacing invalid UTF-8.
    pub fn line(&self, line_idx: usize) -> BufferResult<Cow<'_, str>> {
        self.file.line(line_idx).map(String::from_utf8_lossy)
    }

    /// Returns the bytes covered by a range.
    pub fn selected(&self, range: &Range) -> BufferResult<Vec<u8>> {
        self.file.slice(range)
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }

    pub fn len_bytes(&self) -> usize {
        self.file.len_bytes()
    }

    pub fn len_lines(&self) -> usize {
        self.file.len_lines()
    }

    /// Address just past the last byte of content.
    pub fn end(&self) -> Address {
        self.file.end()
    }

    // ==================== Editing ====================

    /// Replaces `range` with `text` and records the edit for undo.
    ///
    /// A fresh edit discards anything that could have been redone. On
    /// return `range` is the caret after the inserted text.
    pub fn edit(&mut self, range: &mut Range, text: &[u8], kind: OpKind) -> BufferResult<()> {
        kind.check_text(text)?;
        self.file.check_range(range)?;
        self.redo.clear();
        self.undo.push(&mut self.file, range, text, kind)?;
        self.modified = true;
        Ok(())
    }

    // ==================== Undo/Redo ====================

    /// Undoes the last edit, setting `range` to the selection it replaced.
    ///
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self, range: &mut Range) -> BufferResult<bool> {
        let undone = self.undo.undo(&mut self.file, &mut self.redo, range)?;
        if undone {
            self.modified = true;
            debug!(remaining = self.undo.len(), "undo");
        }
        Ok(undone)
    }

    /// Reapplies the last undone edit.
    ///
    /// Returns false if there is nothing to redo.
    pub fn redo(&mut self, range: &mut Range) -> BufferResult<bool> {
        let redone = self.redo.undo(&mut self.file, &mut self.undo, range)?;
        if redone {
            self.modified = true;
            debug!(remaining = self.redo.len(), "redo");
        }
        Ok(redone)
    }

    /// Returns true if there are edits to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns true if there are edits to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// The undo log, for inspection.
    pub fn history(&self) -> &UndoLog {
        &self.undo
    }

    // ==================== State ====================

    /// Returns true if the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the associated file path.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the buffer configuration.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Updates the buffer configuration, trimming history to the new limit.
    pub fn set_config(&mut self, config: BufferConfig) -> BufferResult<()> {
        if config.max_history != self.undo.max_entries() {
            self.undo.set_max_entries(config.max_history)?;
            self.redo.set_max_entries(config.max_history)?;
        }
        self.config = config;
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&[u8]> for TextBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            file: File::from(bytes),
            ..Self::new()
        }
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
