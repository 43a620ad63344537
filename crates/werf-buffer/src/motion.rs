//! Grapheme-aware caret motion.
//!
//! Lines are raw bytes. When a line is valid UTF-8, motion steps over
//! whole grapheme clusters so a caret never lands inside an emoji sequence
//! or between a base letter and its combining mark. Otherwise it steps one
//! decoded scalar at a time, treating each byte of a malformed sequence as
//! its own character.

use unicode_segmentation::UnicodeSegmentation;

use crate::file::content_len;
use crate::{Address, BufferResult, File};

impl File {
    /// Address one user-perceived character before `at`.
    ///
    /// From the start of a line this moves to the end of the previous
    /// line's content. The start of the file stays put.
    pub fn prev_boundary(&self, at: Address) -> BufferResult<Address> {
        self.check_address(&at)?;
        if at.offset > 0 {
            let line = &self.lines[at.line];
            let content = &line[..content_len(line)];
            return Ok(Address::new(at.line, grapheme_left(content, at.offset)));
        }
        if at.line == 0 {
            return Ok(at);
        }
        let prev = at.line - 1;
        Ok(Address::new(prev, content_len(&self.lines[prev])))
    }

    /// Address one user-perceived character after `at`.
    ///
    /// From the end of a line's content this moves to the start of the next
    /// line. The end of the file stays put.
    pub fn next_boundary(&self, at: Address) -> BufferResult<Address> {
        self.check_address(&at)?;
        let line = &self.lines[at.line];
        let content = &line[..content_len(line)];
        if at.offset < content.len() {
            return Ok(Address::new(at.line, grapheme_right(content, at.offset)));
        }
        if at.line + 1 < self.lines.len() {
            return Ok(Address::new(at.line + 1, 0));
        }
        Ok(at)
    }
}

/// Decodes the UTF-8 character at the start of `bytes`.
///
/// Returns the character and its encoded length. A malformed or truncated
/// sequence yields `(None, 1)` so callers can always make progress; empty
/// input yields `(None, 0)`.
pub fn decode_char(bytes: &[u8]) -> (Option<char>, usize) {
    let Some(&lead) = bytes.first() else {
        return (None, 0);
    };
    let width = match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return (None, 1),
    };
    match bytes.get(..width).map(std::str::from_utf8) {
        Some(Ok(s)) => (s.chars().next(), width),
        _ => (None, 1),
    }
}

fn grapheme_left(content: &[u8], offset: usize) -> usize {
    let offset = offset.min(content.len());
    if offset == 0 {
        return 0;
    }
    // ASCII before the caret is always a cluster of its own.
    if content[offset - 1].is_ascii() {
        return offset - 1;
    }

    match std::str::from_utf8(content) {
        Ok(text) => text
            .grapheme_indices(true)
            .map(|(start, _)| start)
            .take_while(|&start| start < offset)
            .last()
            .unwrap_or(0),
        Err(_) => {
            let mut pos = 0;
            let mut prev = 0;
            while pos < offset {
                prev = pos;
                pos += decode_char(&content[pos..]).1.max(1);
            }
            prev
        }
    }
}

fn grapheme_right(content: &[u8], offset: usize) -> usize {
    if offset >= content.len() {
        return content.len();
    }
    let next_is_ascii = content.get(offset + 1).is_none_or(u8::is_ascii);
    if content[offset].is_ascii() && next_is_ascii {
        return offset + 1;
    }

    match std::str::from_utf8(content) {
        Ok(text) => text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .find(|&end| end > offset)
            .unwrap_or(content.len()),
        Err(_) => (offset + decode_char(&content[offset..]).1.max(1)).min(content.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(lines: &[&str]) -> File {
        File::from_lines(lines.iter().map(|l| l.as_bytes()))
    }

    #[test]
    fn test_decode_char() {
        assert_eq!(decode_char(b"a"), (Some('a'), 1));
        assert_eq!(decode_char("é!".as_bytes()), (Some('é'), 2));
        assert_eq!(decode_char("€".as_bytes()), (Some('€'), 3));
        assert_eq!(decode_char("🦀".as_bytes()), (Some('🦀'), 4));
        assert_eq!(decode_char(b""), (None, 0));
        assert_eq!(decode_char(&[0xFF, b'a']), (None, 1));
        // Truncated three-byte sequence.
        assert_eq!(decode_char(&[0xE2, 0x82]), (None, 1));
    }

    #[test]
    fn test_ascii_motion() {
        let f = file(&["abc\n", "de"]);
        assert_eq!(f.next_boundary(Address::new(0, 1)).unwrap(), Address::new(0, 2));
        assert_eq!(f.prev_boundary(Address::new(0, 1)).unwrap(), Address::new(0, 0));
    }

    #[test]
    fn test_motion_crosses_lines() {
        let f = file(&["abc\n", "de"]);
        assert_eq!(f.next_boundary(Address::new(0, 3)).unwrap(), Address::new(1, 0));
        assert_eq!(f.prev_boundary(Address::new(1, 0)).unwrap(), Address::new(0, 3));
    }

    #[test]
    fn test_motion_stops_at_document_edges() {
        let f = file(&["abc\n", "de"]);
        assert_eq!(f.prev_boundary(Address::ZERO).unwrap(), Address::ZERO);
        assert_eq!(f.next_boundary(Address::new(1, 2)).unwrap(), Address::new(1, 2));
    }

    #[test]
    fn test_combining_mark_is_one_step() {
        // "e" + COMBINING ACUTE ACCENT
        let f = file(&["ae\u{301}b"]);
        assert_eq!(f.next_boundary(Address::new(0, 1)).unwrap(), Address::new(0, 4));
        assert_eq!(f.prev_boundary(Address::new(0, 4)).unwrap(), Address::new(0, 1));
    }

    #[test]
    fn test_zwj_sequence_is_one_step() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let f = file(&[&format!("x{family}y")]);
        let end = 1 + family.len();
        assert_eq!(f.next_boundary(Address::new(0, 1)).unwrap(), Address::new(0, end));
        assert_eq!(f.prev_boundary(Address::new(0, end)).unwrap(), Address::new(0, 1));
    }

    #[test]
    fn test_invalid_utf8_steps_by_byte() {
        let f = File::from_lines([&[b'a', 0xFF, 0xFE, b'b'][..]]);
        assert_eq!(f.next_boundary(Address::new(0, 1)).unwrap(), Address::new(0, 2));
        assert_eq!(f.prev_boundary(Address::new(0, 3)).unwrap(), Address::new(0, 2));
    }

    #[test]
    fn test_motion_rejects_invalid_address() {
        let f = file(&["abc"]);
        assert!(f.next_boundary(Address::new(0, 7)).is_err());
        assert!(f.prev_boundary(Address::new(3, 0)).is_err());
    }
}
