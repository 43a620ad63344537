//! The line store: a document held as an ordered array of byte lines.
//!
//! Every line except possibly the last ends with `\n`, and a file always
//! holds at least one line. The range editor maintains that invariant;
//! `File` itself only stores lines and answers questions about them.

use crate::{Address, BufferError, BufferResult, GrowArray, Range};

/// One line of text, including its trailing `\n` if any.
pub type Line = GrowArray<u8>;

/// A document as an array of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub(crate) lines: GrowArray<Line>,
}

impl File {
    /// Creates a file holding a single empty line.
    pub fn new() -> Self {
        let mut lines = GrowArray::new();
        lines.push(Line::new());
        Self { lines }
    }

    /// Builds a file from raw lines.
    ///
    /// If the last line ends with `\n`, an empty line is appended so the
    /// end of the document stays addressable.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut file = Self {
            lines: GrowArray::new(),
        };
        for line in lines {
            file.lines.push(Line::from(line));
        }
        let open_ended = file.lines.last().is_some_and(|l| l.last() != Some(&b'\n'));
        if !open_ended {
            file.lines.push(Line::new());
        }
        file
    }

    /// Number of lines. Never zero.
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// Total size of the document in bytes.
    pub fn len_bytes(&self) -> usize {
        self.lines.iter().map(|line| line.len()).sum()
    }

    /// Returns true if the document holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Returns the bytes of a line, including its `\n`.
    pub fn line(&self, idx: usize) -> BufferResult<&[u8]> {
        self.lines
            .get(idx)
            .map(|line| line.as_slice())
            .ok_or(BufferError::LineOutOfRange {
                line: idx,
                len: self.lines.len(),
            })
    }

    /// Length of a line in bytes, including its `\n`.
    pub fn line_len(&self, idx: usize) -> BufferResult<usize> {
        self.line(idx).map(<[u8]>::len)
    }

    /// Length of a line without its trailing `\n`.
    pub fn content_len(&self, idx: usize) -> BufferResult<usize> {
        self.line(idx).map(content_len)
    }

    /// Iterates over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.lines.iter().map(|line| line.as_slice())
    }

    /// Address of the first byte.
    pub fn start(&self) -> Address {
        Address::ZERO
    }

    /// Address just past the last byte of content.
    pub fn end(&self) -> Address {
        let line = self.lines.len().saturating_sub(1);
        let offset = self.lines.last().map_or(0, |l| content_len(l));
        Address::new(line, offset)
    }

    /// Range covering the whole document.
    pub fn full_range(&self) -> Range {
        Range::new(self.start(), self.end())
    }

    /// Concatenates every line.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len_bytes());
        for line in self.lines() {
            bytes.extend_from_slice(line);
        }
        bytes
    }

    /// Inserts a new line before index `at`, which may equal the line count.
    pub fn insert_line(&mut self, at: usize, bytes: &[u8]) -> BufferResult<()> {
        if at > self.lines.len() {
            return Err(BufferError::LineOutOfRange {
                line: at,
                len: self.lines.len(),
            });
        }
        self.splice_line(at, Line::from(bytes))
    }

    /// Removes lines `[start, end)`.
    ///
    /// Removing every line leaves a single empty one.
    pub fn remove_lines(&mut self, start: usize, end: usize) -> BufferResult<()> {
        let len = self.lines.len();
        if start > end || end > len {
            return Err(BufferError::LineOutOfRange { line: end, len });
        }
        if start == 0 && end == len {
            self.clear();
            return Ok(());
        }
        self.lines.fragment_resize(start as isize, end as isize, 0)?;
        Ok(())
    }

    /// Drops every line and starts over with a single empty one.
    pub fn clear(&mut self) {
        self.lines.truncate(0);
        self.lines.push(Line::new());
    }

    /// Checks that an address points into the file.
    ///
    /// Offsets may reach the end of a line's content but never past its
    /// `\n`.
    pub fn check_address(&self, at: &Address) -> BufferResult<()> {
        match self.lines.get(at.line) {
            Some(line) if at.offset <= content_len(line) => Ok(()),
            _ => Err(BufferError::IndexOutOfRange {
                line: at.line,
                offset: at.offset,
            }),
        }
    }

    /// Byte position of an address counted from the start of the document.
    pub fn position_of(&self, at: &Address) -> BufferResult<usize> {
        self.check_address(at)?;
        let before: usize = self.lines[..at.line].iter().map(|line| line.len()).sum();
        Ok(before + at.offset)
    }

    /// Address of a byte position counted from the start of the document.
    ///
    /// A position just past a `\n` resolves to the start of the next line.
    /// Positions past the end of the document are rejected.
    pub fn address_at(&self, pos: usize) -> BufferResult<Address> {
        let mut rest = pos;
        for (idx, line) in self.lines.iter().enumerate() {
            if rest <= content_len(line) {
                return Ok(Address::new(idx, rest));
            }
            rest -= line.len();
        }
        Err(BufferError::IndexOutOfRange {
            line: self.lines.len(),
            offset: pos,
        })
    }

    /// Checks that a range is ordered and both ends point into the file.
    pub fn check_range(&self, range: &Range) -> BufferResult<()> {
        if range.start > range.end {
            return Err(BufferError::ReversedRange {
                start: range.start,
                end: range.end,
            });
        }
        self.check_address(&range.start)?;
        self.check_address(&range.end)
    }

    /// Per-line byte segments covered by a validated range, in order.
    pub(crate) fn segments(&self, range: Range) -> impl Iterator<Item = &[u8]> + '_ {
        (range.start.line..=range.end.line).map(move |idx| {
            let line = &self.lines[idx];
            let from = if idx == range.start.line { range.start.offset } else { 0 };
            let to = if idx == range.end.line { range.end.offset } else { line.len() };
            &line[from..to]
        })
    }

    pub(crate) fn splice_line(&mut self, at: usize, line: Line) -> BufferResult<()> {
        let slot = self.lines.fragment_resize(at as isize, at as isize, 1)?;
        self.lines[slot.start] = line;
        Ok(())
    }
}

impl Default for File {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&[u8]> for File {
    /// Splits `text` into lines after each `\n`.
    fn from(text: &[u8]) -> Self {
        Self::from_lines(text.split_inclusive(|&b| b == b'\n'))
    }
}

impl From<&str> for File {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

/// Length of `line` without a trailing `\n`.
pub(crate) fn content_len(line: &[u8]) -> usize {
    match line.last() {
        Some(b'\n') => line.len() - 1,
        _ => line.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_file_has_one_empty_line() {
        let file = File::new();
        assert_eq!(file.len_lines(), 1);
        assert_eq!(file.line(0).unwrap(), b"");
        assert!(file.is_empty());
        assert_eq!(file.end(), Address::ZERO);
    }

    #[test]
    fn test_from_lines_keeps_end_addressable() {
        let file = File::from_lines([&b"ab\n"[..], b"cd"]);
        assert_eq!(file.len_lines(), 2);
        assert_eq!(file.end(), Address::new(1, 2));

        let file = File::from_lines([&b"ab\n"[..], b"cd\n"]);
        assert_eq!(file.len_lines(), 3);
        assert_eq!(file.end(), Address::new(2, 0));
        assert_eq!(file.to_bytes(), b"ab\ncd\n");
    }

    #[test]
    fn test_from_text() {
        let file = File::from("one\ntwo\n");
        assert_eq!(file.len_lines(), 3);
        assert_eq!(file.line(1).unwrap(), b"two\n");
        assert_eq!(file.line(2).unwrap(), b"");

        assert_eq!(File::from(""), File::new());
    }

    #[test]
    fn test_insert_line() {
        let mut file = File::from_lines([&b"a\n"[..], b"c"]);
        file.insert_line(1, b"b\n").unwrap();
        assert_eq!(file.to_bytes(), b"a\nb\nc");

        file.insert_line(0, b"0\n").unwrap();
        assert_eq!(file.line(0).unwrap(), b"0\n");
        assert_eq!(file.len_lines(), 4);
    }

    #[test]
    fn test_insert_line_past_end_fails() {
        let mut file = File::new();
        let err = file.insert_line(2, b"x").unwrap_err();
        assert!(matches!(err, BufferError::LineOutOfRange { line: 2, len: 1 }));
    }

    #[test]
    fn test_remove_lines() {
        let mut file = File::from_lines([&b"a\n"[..], b"b\n", b"c\n", b"d"]);
        file.remove_lines(1, 3).unwrap();
        assert_eq!(file.to_bytes(), b"a\nd");

        file.remove_lines(0, 2).unwrap();
        assert_eq!(file.len_lines(), 1);
        assert!(file.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut file = File::from_lines([&b"hello\n"[..], b"world"]);
        file.clear();
        assert_eq!(file, File::new());
    }

    #[test]
    fn test_content_len_excludes_newline() {
        let file = File::from_lines([&b"abc\n"[..], b"de"]);
        assert_eq!(file.line_len(0).unwrap(), 4);
        assert_eq!(file.content_len(0).unwrap(), 3);
        assert_eq!(file.content_len(1).unwrap(), 2);
        assert!(file.content_len(2).is_err());
    }

    #[test]
    fn test_check_address() {
        let file = File::from_lines([&b"abc\n"[..], b"de"]);
        assert!(file.check_address(&Address::new(0, 3)).is_ok());
        assert!(file.check_address(&Address::new(1, 2)).is_ok());
        // Past the newline.
        assert!(file.check_address(&Address::new(0, 4)).is_err());
        assert!(file.check_address(&Address::new(1, 3)).is_err());
        assert!(file.check_address(&Address::new(2, 0)).is_err());
    }

    #[test]
    fn test_check_range_rejects_reversed() {
        let file = File::from_lines([&b"abc\n"[..], b"de"]);
        let range = Range::new(Address::new(1, 0), Address::new(0, 1));
        assert!(matches!(
            file.check_range(&range),
            Err(BufferError::ReversedRange { .. })
        ));
    }

    #[test]
    fn test_position_of() {
        let file = File::from("ab\ncde\n");
        assert_eq!(file.position_of(&Address::ZERO).unwrap(), 0);
        assert_eq!(file.position_of(&Address::new(0, 2)).unwrap(), 2);
        assert_eq!(file.position_of(&Address::new(1, 1)).unwrap(), 4);
        assert_eq!(file.position_of(&file.end()).unwrap(), file.len_bytes());
        assert!(file.position_of(&Address::new(0, 3)).is_err());
    }

    #[test]
    fn test_address_at() {
        let file = File::from("ab\ncde\n");
        assert_eq!(file.address_at(2).unwrap(), Address::new(0, 2));
        // Just past the newline.
        assert_eq!(file.address_at(3).unwrap(), Address::new(1, 0));
        assert_eq!(file.address_at(7).unwrap(), Address::new(2, 0));
        assert!(matches!(
            file.address_at(8),
            Err(BufferError::IndexOutOfRange { line: 3, offset: 8 })
        ));

        assert_eq!(File::new().address_at(0).unwrap(), Address::ZERO);
        assert!(File::new().address_at(1).is_err());
    }

    #[test]
    fn test_position_round_trip() {
        let file = File::from("one\n\ntwo three\nfour");
        for pos in 0..=file.len_bytes() {
            let at = file.address_at(pos).unwrap();
            assert_eq!(file.position_of(&at).unwrap(), pos);
        }
        for line in 0..file.len_lines() {
            for offset in 0..=file.content_len(line).unwrap() {
                let at = Address::new(line, offset);
                assert_eq!(file.address_at(file.position_of(&at).unwrap()).unwrap(), at);
            }
        }
    }

    #[test]
    fn test_segments() {
        let file = File::from_lines([&b"abc\n"[..], b"def\n", b"ghi"]);
        let range = Range::new(Address::new(0, 1), Address::new(2, 2));
        let segments: Vec<&[u8]> = file.segments(range).collect();
        assert_eq!(segments, vec![&b"bc\n"[..], b"def\n", b"gh"]);
    }
}
