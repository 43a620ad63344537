//! Ranges: ordered pairs of addresses delimiting a selection or edit span.
//!
//! ## Learning: Range Types
//!
//! Like `std::ops::Range`, a `Range` is half-open: `start` is included and
//! `end` is not. A caret is simply a range with `start == end`, so the
//! same type serves as cursor, selection and edit target.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::Address;

/// A span of the file from `start` (inclusive) to `end` (exclusive).
///
/// Ranges are plain values owned by the caller. Editing operations take
/// `&mut Range` and leave it describing the post-edit caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Address,
    pub end: Address,
}

impl Range {
    /// Creates a range from two addresses, which must already be ordered.
    pub const fn new(start: Address, end: Address) -> Self {
        Self { start, end }
    }

    /// Creates a zero-width range.
    pub const fn caret(at: Address) -> Self {
        Self { start: at, end: at }
    }

    /// Builds a range from an unordered pair of addresses.
    ///
    /// The returned ordering compares the inputs as given: `Greater` means
    /// `a1` came after `a2`, i.e. the selection was made backward.
    pub fn from_addresses(a1: Address, a2: Address) -> (Self, Ordering) {
        let order = a1.compare(&a2);
        let range = if order == Ordering::Greater {
            Self::new(a2, a1)
        } else {
            Self::new(a1, a2)
        };
        (range, order)
    }

    /// Returns true if this is a zero-width range.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the range spans multiple lines.
    pub fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }

    /// Returns true if an address lies within this range.
    pub fn contains(&self, at: Address) -> bool {
        at >= self.start && at < self.end
    }

    /// Pulls `start` back to `end` if it moved past it.
    pub fn fix_start(&mut self) {
        if self.start > self.end {
            self.start = self.end;
        }
    }

    /// Pushes `end` forward to `start` if it fell behind it.
    pub fn fix_end(&mut self) {
        if self.end < self.start {
            self.end = self.start;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_addresses_forward() {
        let (range, order) = Range::from_addresses(Address::new(1, 3), Address::new(2, 5));
        assert_eq!(range.start, Address::new(1, 3));
        assert_eq!(range.end, Address::new(2, 5));
        assert_eq!(order, Ordering::Less);
    }

    #[test]
    fn test_from_addresses_backward() {
        let (range, order) = Range::from_addresses(Address::new(2, 5), Address::new(1, 3));
        assert_eq!(range.start, Address::new(1, 3));
        assert_eq!(range.end, Address::new(2, 5));
        assert_eq!(order, Ordering::Greater);
    }

    #[test]
    fn test_from_addresses_equal() {
        let at = Address::new(0, 4);
        let (range, order) = Range::from_addresses(at, at);
        assert!(range.is_caret());
        assert_eq!(order, Ordering::Equal);
    }

    #[test]
    fn test_fix_endpoints() {
        let mut range = Range::new(Address::new(0, 2), Address::new(0, 5));
        range.start = Address::new(1, 0);
        range.fix_end();
        assert_eq!(range.end, Address::new(1, 0));

        let mut range = Range::new(Address::new(0, 2), Address::new(0, 5));
        range.start = Address::new(0, 9);
        range.fix_start();
        assert_eq!(range.start, Address::new(0, 5));
    }

    #[test]
    fn test_fix_is_noop_when_ordered() {
        let mut range = Range::new(Address::new(0, 2), Address::new(3, 0));
        range.fix_start();
        range.fix_end();
        assert_eq!(range, Range::new(Address::new(0, 2), Address::new(3, 0)));
    }

    #[test]
    fn test_contains() {
        let range = Range::new(Address::new(1, 0), Address::new(1, 10));
        assert!(range.contains(Address::new(1, 5)));
        assert!(!range.contains(Address::new(1, 10)));
        assert!(!range.contains(Address::new(2, 0)));
    }

    #[test]
    fn test_is_multiline() {
        assert!(!Range::new(Address::new(1, 0), Address::new(1, 10)).is_multiline());
        assert!(Range::new(Address::new(1, 4), Address::new(2, 0)).is_multiline());
        assert!(!Range::caret(Address::new(3, 3)).is_multiline());
    }
}
