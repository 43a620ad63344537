//! Addresses: (line, byte offset) coordinates into a [`File`](crate::File).
//!
//! ## Learning: Newtype Pattern
//!
//! `Address` wraps the two coordinates instead of passing `(usize, usize)`
//! around, so a line index can never be swapped for an offset by accident
//! and ordering is defined once, here.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A position in the file.
///
/// Both fields are 0-indexed. `offset` counts bytes, not characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Address {
    /// Line index
    pub line: usize,
    /// Byte offset within the line
    pub offset: usize,
}

impl Address {
    /// Address of the first byte of the file.
    pub const ZERO: Address = Address { line: 0, offset: 0 };

    pub const fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }

    /// Lexicographic comparison on (line, offset).
    pub fn compare(&self, other: &Address) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.offset.cmp(&other.offset))
    }

    /// Returns true if this address is before another.
    pub fn is_before(&self, other: &Address) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Returns true if this address is after another.
    pub fn is_after(&self, other: &Address) -> bool {
        other.is_before(self)
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.offset)
    }
}

impl From<(usize, usize)> for Address {
    fn from((line, offset): (usize, usize)) -> Self {
        Self::new(line, offset)
    }
}
