//! # Werf Buffer
//!
//! Text store organized as an array of byte lines, with range editing and a
//! coalescing undo/redo log.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `File` owns its lines, and every line owns its bytes
//! - A `Range` is a plain `Copy` value owned by the caller; edits take
//!   `&mut Range` and leave the post-edit caret in it
//! - Any `&mut` call may move line storage, so slices borrowed from a
//!   `File` cannot outlive the next edit
//!
//! ### Memory Safety
//! - Storage grows and shrinks through `GrowArray`, never by hand
//! - Addresses are validated once at the public boundary, so the editor's
//!   inner loop can index without re-checking

mod address;
mod array;
mod buffer;
mod edit;
mod file;
mod history;
mod motion;
mod range;

pub use address::Address;
pub use array::{GrowArray, MIN_CAPACITY, next_size};
pub use buffer::{BufferConfig, TextBuffer};
pub use file::{File, Line};
pub use history::{OpKind, UndoEntry, UndoLog};
pub use motion::decode_char;
pub use range::Range;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Fragment [{start}, {end}) is invalid for length {len}")]
    InvalidRange { start: isize, end: isize, len: usize },

    #[error("Range is invalid: start {start} is after end {end}")]
    ReversedRange { start: Address, end: Address },

    #[error("Address {line}:{offset} is out of bounds")]
    IndexOutOfRange { line: usize, offset: usize },

    #[error("Line {line} is out of bounds ({len} lines)")]
    LineOutOfRange { line: usize, len: usize },

    #[error("A {kind:?} edit cannot insert text")]
    TextWithDeletion { kind: OpKind },

    #[error("Cannot shrink by {requested}, only {len} elements")]
    Underflow { requested: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
