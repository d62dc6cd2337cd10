//! Key/value properties for errors
//!
//! This crate attaches arbitrary key/value metadata to an error without
//! changing its message or its cause chain, and finds that metadata again
//! by walking the chain of causes.
//!
//! # Modules
//!
//! - `capability` - Optional error capabilities (cause, stack trace, local properties, formatting)
//! - `property` - Opaque property keys and values
//! - `decorator` - `PropError`, the immutable property-carrying decorator
//! - `lookup` - Property lookup along the cause chain
//! - `format` - Flag-aware rendering of decorated errors
//! - `traced` - Message errors with a captured stack trace
//! - `context` - Fluent decoration of `Result` errors
//! - `config` - Stack trace capture configuration
//!
//! # Example
//!
//! ```rust
//! use errprops::Traced;
//!
//! fn do_thing() -> Result<(), Traced> {
//!     Err(Traced::new("fail"))
//! }
//!
//! fn do_thing_with_context(id: u32) -> Result<(), errprops::PropError> {
//!     do_thing().map_err(|e| errprops::from(e).with_value("id", id))
//! }
//!
//! let err = do_thing_with_context(42).unwrap_err();
//! assert_eq!(errprops::get_optional::<u32>(&err, "id"), Some(&42));
//! assert_eq!(err.to_string(), "fail");
//! assert_eq!(format!("{}", err.render()), "[id=42] fail");
//! ```
//!
//! Properties are found through any wrapper that reports its cause, and
//! values set closer to the queried error shadow deeper ones:
//!
//! ```rust
//! use errprops::Traced;
//!
//! let root = errprops::from(Traced::new("root cause")).with_value("key", "rootValue");
//! let wrapped = errprops::from(Traced::wrap(root.clone(), "wrapped"))
//!     .with_value("key", "wrappedValue");
//!
//! assert_eq!(errprops::get_optional::<&str>(&root, "key"), Some(&"rootValue"));
//! assert_eq!(errprops::get_optional::<&str>(&wrapped, "key"), Some(&"wrappedValue"));
//! ```

pub mod capability;
pub mod config;
pub mod context;
pub mod decorator;
pub mod format;
pub mod lookup;
pub mod property;
pub mod traced;

pub use capability::{FlagAwareFormat, HasCause, HasLocalProperties, HasStacktrace};
pub use context::PropResultExt;
pub use decorator::{from, Pairs, PropError};
pub use format::{render, Flags, Render, Verb};
pub use lookup::{causes, get, get_optional, lookup, root_cause, Causes};
pub use property::{Key, Value};
pub use traced::Traced;

use thiserror::Error;

/// Errors that can occur while configuring the crate
#[derive(Debug, Error)]
pub enum ErrPropsError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// An environment variable holds an unusable value
    #[error("Invalid value '{value}' for environment variable {key}: {reason}")]
    InvalidEnv {
        /// Variable name
        key: String,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ErrPropsError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
