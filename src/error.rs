//! Crate-level error type.
//!
//! Startup failures (terminal acquisition, color resources, buffer
//! allocation) are fatal and propagate to `main`; everything else is
//! handled at the component where it occurs.

use std::io;

use thiserror::Error;

/// Errors surfaced by evalpad's construction and terminal layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal I/O failure (raw mode, alternate screen, writes).
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    /// A configured color string could not be parsed.
    #[error("unknown color {name:?}")]
    Color { name: String },

    /// A buffer was requested with non-positive dimensions.
    #[error("invalid buffer dimensions {width}x{height}")]
    BufferSize { width: i32, height: i32 },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
