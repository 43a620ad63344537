//! The range editor: replace, copy and stream a range of the file.
//!
//! `replace` is the single mutation primitive. Insertion is replacing a
//! caret, deletion is replacing a selection with nothing. The text is
//! applied one chunk at a time, each chunk ending at a `\n` or at the end
//! of the text, followed by one final empty chunk that settles any line
//! join left pending.
//!
//! Every call leaves the range collapsed to a caret just after the
//! inserted text, so consecutive calls on the same range append in order.

use std::io::{self, Read, Write};

use tracing::trace;

use crate::file::Line;
use crate::{Address, BufferResult, File, Range};

impl File {
    /// Replaces the bytes in `range` with `text`.
    ///
    /// On return `range` is a caret after the inserted text.
    pub fn replace(&mut self, range: &mut Range, text: &[u8]) -> BufferResult<()> {
        self.check_range(range)?;
        for chunk in text.split_inclusive(|&b| b == b'\n') {
            self.replace_chunk(range, chunk)?;
        }
        self.replace_chunk(range, &[])
    }

    fn replace_chunk(&mut self, range: &mut Range, chunk: &[u8]) -> BufferResult<()> {
        let at = range.start;
        let single_line = !range.is_multiline();
        let breaks_line = chunk.last() == Some(&b'\n');
        let line_len = self.lines[at.line].len();
        let end_offset = if single_line { range.end.offset } else { line_len };
        let rest_len = line_len - end_offset;

        // A multi-line range consumes its first line to the end, so only a
        // single-line range leaves a tail to carry onto the new line.
        if breaks_line && single_line {
            let rest = Line::from(&self.lines[at.line][end_offset..]);
            self.lines[at.line].truncate(end_offset);
            self.splice_line(at.line + 1, rest)?;
        }

        self.lines[at.line].fragment_replace(at.offset as isize, end_offset as isize, chunk)?;

        if breaks_line {
            range.start = Address::new(at.line + 1, 0);
            range.fix_end();
            return Ok(());
        }

        range.start.offset += chunk.len();
        if rest_len == 0 && range.start.line + 1 < self.lines.len() {
            if single_line {
                range.end = Address::new(range.end.line + 1, 0);
            }
            let joined = std::mem::take(&mut self.lines[range.end.line]);
            let caret = range.start;
            let tail = &joined[range.end.offset..];
            self.lines[caret.line].fragment_replace(caret.offset as isize, -1, tail)?;
            self.lines.fragment_resize(caret.line as isize + 1, range.end.line as isize + 1, 0)?;
            trace!(line = caret.line, removed = range.end.line - caret.line, "joined lines");
        }
        range.end = range.start;
        Ok(())
    }

    /// Copies bytes from the range into `buf`, advancing `range.start`.
    ///
    /// Returns the number of bytes written, which is 0 once the range has
    /// been exhausted. Repeated calls stream the range in order.
    pub fn copy(&self, range: &mut Range, buf: &mut [u8]) -> BufferResult<usize> {
        self.check_range(range)?;
        let mut written = 0;
        while written < buf.len() && range.start < range.end {
            let line = &self.lines[range.start.line];
            let stop = if range.is_multiline() {
                line.len()
            } else {
                range.end.offset
            };
            let n = (stop - range.start.offset).min(buf.len() - written);
            let from = range.start.offset;
            buf[written..written + n].copy_from_slice(&line[from..from + n]);
            written += n;
            range.start.offset += n;

            if range.start.offset == line.len() && range.start.line < range.end.line {
                range.start = Address::new(range.start.line + 1, 0);
            }
        }
        Ok(written)
    }

    /// Returns the bytes of a range.
    pub fn slice(&self, range: &Range) -> BufferResult<Vec<u8>> {
        self.check_range(range)?;
        let mut bytes = Vec::new();
        for segment in self.segments(*range) {
            bytes.extend_from_slice(segment);
        }
        Ok(bytes)
    }

    /// Reads `reader` to the end, replacing `range` with the data one
    /// chunk at a time.
    ///
    /// After the first chunk the range is a caret, so later chunks are
    /// inserted after earlier ones. Returns the number of bytes read.
    pub fn read_from<R: Read>(
        &mut self,
        range: &mut Range,
        mut reader: R,
        chunk_size: usize,
    ) -> BufferResult<usize> {
        let mut buf = vec![0u8; chunk_size.max(1)];
        let mut total = 0;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.replace(range, &buf[..n])?;
            total += n;
        }
        trace!(bytes = total, lines = self.len_lines(), "read complete");
        Ok(total)
    }

    /// Writes the range to `writer`, streaming it through a `chunk_size`
    /// buffer. Returns the number of bytes written.
    pub fn write_to<W: Write>(
        &self,
        range: &mut Range,
        mut writer: W,
        chunk_size: usize,
    ) -> BufferResult<usize> {
        let mut buf = vec![0u8; chunk_size.max(1)];
        let mut total = 0;
        loop {
            let n = self.copy(range, &mut buf)?;
            if n == 0 {
                break;
            }
            writer.write_all(&buf[..n])?;
            total += n;
        }
        writer.flush()?;
        Ok(total)
    }
}
