//! Error types and handling for csrender-core operations.
//!
//! Rendering itself is infallible once a response has been recognized: missing
//! optional data (no results, no snippet, no children) produces a readable
//! document instead of an error. The variants below cover the boundaries of
//! the crate:
//!
//! - **Response errors**: a compound response that carries no payload, or a
//!   payload that does not have the expected shape
//! - **Call graph errors**: expanding a node that is not part of the tree
//! - **Configuration errors**: unreadable or invalid config files
//! - **I/O and serialization errors**: reading config files, decoding
//!   response JSON and config TOML
//!
//! Contract violations inside the renderer (a jump target on source line 0, a
//! resolved column that would be negative) are bugs in the caller and panic
//! instead of producing an `Error`.
//!
//! ```rust
//! use csrender_core::{CompoundResponse, Config, Error, render_compound_response};
//!
//! let empty = CompoundResponse::default();
//! match render_compound_response(&empty, "query", &Config::default()) {
//!     Err(Error::UnrecognizedResponse) => {},
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// The main error type for csrender-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The compound response populated none of the known payloads.
    ///
    /// Raised by [`render_compound_response`](crate::render_compound_response)
    /// instead of silently producing an empty document.
    #[error("Unrecognized response: no search, cross-reference, or call graph payload")]
    UnrecognizedResponse,

    /// A payload was present but did not have the expected shape.
    ///
    /// ## Common Causes
    ///
    /// - More than one search/xref/call graph response in a single compound response
    /// - A call graph response without a root node
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No node in a call graph carries the requested signature.
    #[error("No call graph node with signature: {0}")]
    SignatureNotFound(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - An unparseable value in an environment override
    /// - No platform config directory
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed.
    ///
    /// Only the config loader touches the filesystem; rendering never does.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    ///
    /// Occurs when a response JSON document or a config file is not valid
    /// JSON/TOML or does not match the expected schema.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might go away when the operation is retried.
    ///
    /// Only interrupted or timed-out I/O qualifies. Response and configuration
    /// errors are properties of the input and will fail the same way again.
    ///
    /// ```rust
    /// use csrender_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "eintr")).is_recoverable());
    /// assert!(!Error::UnrecognizedResponse.is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier for logging.
    ///
    /// - `"response"` - unrecognized or malformed responses
    /// - `"call_graph"` - call graph tree operations
    /// - `"config"` - configuration and settings
    /// - `"io"` - file system operations
    /// - `"serialization"` - JSON/TOML conversion
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::UnrecognizedResponse | Self::MalformedResponse(_) => "response",
            Self::SignatureNotFound(_) => "call_graph",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
