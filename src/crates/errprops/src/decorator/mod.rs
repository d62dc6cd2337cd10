//! Property-carrying error decorator
//!
//! [`PropError`] wraps an arbitrary error and carries an immutable chain of
//! key/value properties on top of it. The wrapped error's message and cause
//! are passed through untouched: properties only show up through
//! [`PropError::get`], [`crate::get`] and the flag-aware rendering.
//!
//! # Example
//!
//! ```rust
//! use errprops::PropError;
//!
//! fn load(id: u32) -> Result<(), PropError> {
//!     std::fs::read_to_string("/definitely/not/here")
//!         .map(|_| ())
//!         .map_err(|e| errprops::from(e).with_value("id", id))
//! }
//!
//! let err = load(42).unwrap_err();
//! assert_eq!(errprops::get_optional::<u32>(&err, "id"), Some(&42));
//! ```

mod node;

pub use node::Pairs;

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::capability::{self, FlagAwareFormat, HasLocalProperties, HasStacktrace};
use crate::format::{Flags, Render, Verb};
use crate::property::{Key, Value};
use node::Link;

type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// An error decorated with key/value properties.
///
/// `PropError` values are immutable: [`with_value`](Self::with_value)
/// returns a new error and leaves the receiver as it was. Cloning is cheap
/// and clones share their whole chain.
///
/// Prefer returning plain error types (or a boxed error) from functions and
/// decorating at the call site; `PropError` is meant to travel as an opaque
/// error value.
#[derive(Clone)]
pub struct PropError {
    base: SharedError,
    head: Option<Arc<Link>>,
}

/// Returns a [`PropError`] wrapping `err`, ready to carry properties.
///
/// The original error is not modified. Intended for a fluent style:
///
/// ```rust
/// let err = errprops::from(std::io::Error::other("disk full"))
///     .with_value("path", "/var/data")
///     .with_value("attempt", 3);
///
/// assert_eq!(err.to_string(), "disk full");
/// ```
pub fn from<E>(err: E) -> PropError
where
    E: StdError + Send + Sync + 'static,
{
    PropError::new(err)
}

impl PropError {
    /// Wrap `err` in a chain root that holds no properties of its own.
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            base: Arc::new(err),
            head: None,
        }
    }

    /// Wrap an already boxed error.
    pub fn from_boxed(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self {
            base: Arc::from(err),
            head: None,
        }
    }

    /// Returns a copy of this error with `key` set to `value`.
    ///
    /// Does not modify `self`. A key that is already set is shadowed, not
    /// replaced: lookups see the new value while the old pair stays in the
    /// chain and keeps being rendered.
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Key,
        V: Value,
    {
        let link = Link {
            key: Box::new(key),
            value: Box::new(value),
            prev: self.head.clone(),
        };
        Self {
            base: self.base.clone(),
            head: Some(Arc::new(link)),
        }
    }

    /// Returns the value stored under `key` on this error.
    ///
    /// Only this error's own properties are consulted, never its cause. Use
    /// [`crate::get`] to search the whole cause chain.
    pub fn get(&self, key: impl Key) -> Option<&dyn Value> {
        self.local_property(&key)
    }

    /// The error this decorator wraps.
    pub fn wrapped(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.base
    }

    /// The key/value pairs of this error, newest first.
    ///
    /// Shadowed pairs are included. Properties of a decorated error wrapped
    /// by this one are not.
    pub fn properties(&self) -> Pairs<'_> {
        Pairs {
            link: self.head.as_deref(),
        }
    }

    /// The stack trace of the wrapped error, if it carries one.
    pub fn stacktrace(&self) -> Option<&Backtrace> {
        capability::stacktrace(self.wrapped())
    }

    /// Adapter rendering this error's properties followed by the wrapped error.
    ///
    /// Format it with `{}`, `{:+}` or `{:#}` (see [`crate::format`]).
    pub fn render(&self) -> Render<'_, Self> {
        Render(self)
    }

    fn fmt_base(&self, f: &mut fmt::Formatter<'_>, verb: Verb) -> fmt::Result {
        let base = self.wrapped();
        if let Some(inner) = capability::formatter(base) {
            return inner.fmt_flagged(f, verb);
        }
        match verb {
            Verb::Display => fmt::Display::fmt(base, f),
            Verb::Debug => fmt::Debug::fmt(base, f),
        }
    }
}

impl HasLocalProperties for PropError {
    fn local_property(&self, key: &dyn Key) -> Option<&dyn Value> {
        let mut link = self.head.as_deref();
        let mut base = &self.base;
        loop {
            match link {
                Some(current) => {
                    if current.key.key_eq(key) {
                        return Some(&*current.value);
                    }
                    link = current.prev.as_deref();
                }
                // The Base forwards to a decorated error it wraps.
                None => {
                    let inner = base.downcast_ref::<PropError>()?;
                    link = inner.head.as_deref();
                    base = &inner.base;
                }
            }
        }
    }
}

impl HasStacktrace for PropError {
    fn stacktrace(&self) -> Option<&Backtrace> {
        PropError::stacktrace(self)
    }
}

impl FlagAwareFormat for PropError {
    fn fmt_flagged(&self, f: &mut fmt::Formatter<'_>, verb: Verb) -> fmt::Result {
        let flags = Flags::of(f);
        let mut pairs = self.properties().peekable();
        if pairs.peek().is_some() {
            f.write_str("[")?;
            for (i, (key, value)) in pairs.enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                flags.write(f, verb, key)?;
                f.write_str("=")?;
                flags.write(f, verb, value)?;
            }
            f.write_str("] ")?;
        }
        self.fmt_base(f, verb)
    }
}

impl fmt::Display for PropError {
    /// The wrapped error's message; properties are never part of it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.wrapped(), f)
    }
}

impl fmt::Debug for PropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_flagged(f, Verb::Debug)
    }
}

impl StdError for PropError {
    /// The wrapped error's cause. The wrapped error itself is skipped: a
    /// decorator never adds a level to the cause chain.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.wrapped().source()
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for PropError {
    fn from(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self::from_boxed(err)
    }
}
