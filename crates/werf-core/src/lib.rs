//! # Werf Core
//!
//! Command layer and editor state on top of `werf-buffer`.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   Editor                     │
//! │  ┌──────────┐ ┌───────────┐ ┌─────────────┐  │
//! │  │  Config  │ │ Selection │ │  Clipboard  │  │
//! │  └──────────┘ └───────────┘ └─────────────┘  │
//! │         │                                    │
//! │  ┌──────┴───────────────────────────────┐    │
//! │  │              TextBuffer              │    │
//! │  │  ┌──────┐ ┌───────────┐ ┌──────────┐ │    │
//! │  │  │ File │ │ Undo log  │ │ Redo log │ │    │
//! │  │  └──────┘ └───────────┘ └──────────┘ │    │
//! │  └──────────────────────────────────────┘    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Learning: Module Organization
//!
//! Rust modules map to files:
//! - `mod foo;` looks for `foo.rs` or `foo/mod.rs`
//! - `pub use` re-exports items for cleaner public APIs

pub mod command;
pub mod config;
pub mod editor;

pub use command::Command;
pub use config::{Config, ConfigError};
pub use editor::Editor;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("File too large: {path} is {size} bytes, limit is {limit}")]
    FileTooLarge { path: String, size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] werf_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
