//! Undo/redo log.
//!
//! ## Learning: Packed Arenas
//!
//! Instead of a `Vec<Edit>` where every edit owns a `String`, the log keeps
//! two flat arrays: fixed-size entry headers and one byte arena holding
//! every entry's saved text back to back. An entry refers to its payload by
//! offset, and to the entry before it by index, so undoing is a pop from
//! both arrays and nothing is allocated per edit.
//!
//! Each entry records the text a range held *before* an edit, where that
//! text used to live (`dst` after the edit, covering whatever replaced
//! it) and the caret to restore (`src`). Undoing an entry is itself an
//! edit, pushed onto the opposite log, which is how redo falls out for
//! free.
//!
//! ## Coalescing
//!
//! Consecutive edits of the same kind that touch end to end extend the
//! last entry instead of starting a new one, so typing a word or holding
//! backspace undoes in one step.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{BufferError, BufferResult, File, GrowArray, Range};

/// How an edit was produced. Drives coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpKind {
    /// No edit yet, or the chain was broken by an undo
    #[default]
    None,
    /// Deleting the character before the caret
    Backspace,
    /// Deleting the character after the caret
    Delete,
    /// Typing
    Char,
    /// Anything else: pastes, cuts, external substitutions
    Replace,
}

impl OpKind {
    /// Returns true if consecutive edits of this kind may merge.
    pub fn coalesces(self) -> bool {
        !matches!(self, OpKind::None | OpKind::Replace)
    }

    /// Deletions only remove; text to insert needs another kind.
    pub(crate) fn check_text(self, text: &[u8]) -> BufferResult<()> {
        match self {
            OpKind::Backspace | OpKind::Delete if !text.is_empty() => {
                Err(BufferError::TextWithDeletion { kind: self })
            }
            _ => Ok(()),
        }
    }
}

/// One undoable step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UndoEntry {
    /// Index of the entry pushed before this one
    pub prev: Option<usize>,
    pub kind: OpKind,
    /// Range to restore as the selection after undoing
    pub src: Range,
    /// Span currently occupied by the text that replaced the saved bytes
    pub dst: Range,
    offset: usize,
    len: usize,
}

impl UndoEntry {
    /// Size of the saved text in bytes.
    pub fn payload_len(&self) -> usize {
        self.len
    }
}

/// A linear log of undoable edits.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    entries: GrowArray<UndoEntry>,
    bytes: GrowArray<u8>,
    last: Option<usize>,
    last_kind: OpKind,
    max_entries: usize,
}

impl UndoLog {
    /// Creates an unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log that keeps at most `max_entries` entries, dropping the
    /// oldest first. Zero means unbounded.
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Applies `text` to `range` in `file`, recording what it replaced.
    ///
    /// `range` is left as the post-edit caret. Nothing is recorded or
    /// changed if the range is invalid, or if a `Backspace` or `Delete`
    /// edit carries text.
    pub fn push(
        &mut self,
        file: &mut File,
        range: &mut Range,
        text: &[u8],
        kind: OpKind,
    ) -> BufferResult<()> {
        kind.check_text(text)?;
        file.check_range(range)?;

        let idx = match self.coalesce_target(range, kind) {
            Some(idx) => {
                trace!(?kind, entry = idx, "coalescing edit");
                idx
            }
            None => self.begin_entry(range, kind)?,
        };

        // Backspace runs grow toward the start of the document, so each
        // capture goes in front of what the entry already holds.
        let mut at = if kind == OpKind::Backspace {
            self.entries[idx].offset
        } else {
            self.bytes.len()
        };
        let mut captured = 0;
        for segment in file.segments(*range) {
            self.bytes.fragment_replace(at as isize, at as isize, segment)?;
            at += segment.len();
            captured += segment.len();
        }

        file.replace(range, text)?;

        let entry = &mut self.entries[idx];
        entry.len += captured;
        if matches!(kind, OpKind::Backspace | OpKind::Delete) {
            entry.dst.start = range.start;
        }
        entry.dst.end = range.start;
        Ok(())
    }

    /// Reverts the most recent entry, recording the reversal in `opposite`.
    ///
    /// On success `range` holds the entry's original selection. Returns
    /// false if the log is empty.
    pub fn undo(
        &mut self,
        file: &mut File,
        opposite: &mut UndoLog,
        range: &mut Range,
    ) -> BufferResult<bool> {
        let Some(idx) = self.last else {
            return Ok(false);
        };
        let entry = self.entries[idx];
        let mut dst = entry.dst;
        let payload = &self.bytes[entry.offset..entry.offset + entry.payload_len()];
        opposite.push(file, &mut dst, payload, OpKind::Replace)?;

        *range = entry.src;
        self.bytes.shrink_by(entry.len)?;
        self.entries.shrink_by(1)?;
        self.last = entry.prev;
        self.last_kind = OpKind::None;
        trace!(kind = ?entry.kind, bytes = entry.len, "undid entry");
        Ok(true)
    }

    /// Forgets every entry.
    pub fn clear(&mut self) {
        self.entries.truncate(0);
        self.bytes.truncate(0);
        self.last = None;
        self.last_kind = OpKind::None;
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Kind of the newest entry, or `None` after an undo broke the chain.
    pub fn last_kind(&self) -> OpKind {
        self.last_kind
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Changes the entry limit, dropping old entries if needed.
    pub fn set_max_entries(&mut self, max_entries: usize) -> BufferResult<()> {
        self.max_entries = max_entries;
        self.enforce_limit()
    }

    /// Iterates entries from newest to oldest by following `prev` links.
    pub fn entries(&self) -> impl Iterator<Item = &UndoEntry> + '_ {
        std::iter::successors(self.last.map(|idx| &self.entries[idx]), move |entry| {
            entry.prev.map(|idx| &self.entries[idx])
        })
    }

    /// Saved text of an entry.
    pub fn payload(&self, entry: &UndoEntry) -> &[u8] {
        &self.bytes[entry.offset..entry.offset + entry.len]
    }

    /// Total bytes of saved text.
    pub fn payload_bytes(&self) -> usize {
        self.bytes.len()
    }

    fn coalesce_target(&self, range: &Range, kind: OpKind) -> Option<usize> {
        let idx = self.last?;
        if !kind.coalesces() || kind != self.last_kind {
            return None;
        }
        let last = &self.entries[idx];
        let abuts = match kind {
            OpKind::Backspace => range.end == last.dst.start,
            _ => last.dst.end == range.start,
        };
        abuts.then_some(idx)
    }

    fn begin_entry(&mut self, range: &Range, kind: OpKind) -> BufferResult<usize> {
        let src = match kind {
            OpKind::Backspace => Range::caret(range.end),
            OpKind::Delete => Range::caret(range.start),
            _ => *range,
        };
        self.entries.push(UndoEntry {
            prev: self.last,
            kind,
            src,
            dst: Range::caret(range.start),
            offset: self.bytes.len(),
            len: 0,
        });
        self.last = Some(self.entries.len() - 1);
        self.last_kind = kind;
        self.enforce_limit()?;
        trace!(?kind, entries = self.entries.len(), "new undo entry");
        Ok(self.entries.len() - 1)
    }

    fn enforce_limit(&mut self) -> BufferResult<()> {
        if self.max_entries == 0 || self.entries.len() <= self.max_entries {
            return Ok(());
        }
        let excess = self.entries.len() - self.max_entries;
        let dropped: usize = self.entries[..excess].iter().map(|e| e.len).sum();

        self.entries.fragment_resize(0, excess as isize, 0)?;
        self.bytes.fragment_resize(0, dropped as isize, 0)?;
        self.entries.fragment_apply(0, -1, |entry| {
            entry.offset -= dropped;
            entry.prev = entry.prev.and_then(|prev| prev.checked_sub(excess));
        })?;
        self.last = self.last.and_then(|last| last.checked_sub(excess));

        trace!(excess, dropped, "history limit reached");
        Ok(())
    }
}
