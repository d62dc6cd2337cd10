//! Error capability interfaces
//!
//! An error value may optionally support any of four capabilities:
//!
//! - [`HasCause`] - reports the error that caused it
//! - [`HasStacktrace`] - carries a captured stack trace
//! - [`HasLocalProperties`] - holds key/value properties of its own
//! - [`FlagAwareFormat`] - renders itself according to format flags
//!
//! Rust errors report their cause through [`std::error::Error::source`], so
//! `HasCause` is available on every error. The other capabilities are
//! discovered at runtime with the probe functions in this module, which
//! dynamically cast an error trait object to the types implementing them.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;

use crate::decorator::PropError;
use crate::format::Verb;
use crate::property::{Key, Value};
use crate::traced::Traced;

/// An error that may have been caused by another error.
pub trait HasCause {
    /// The immediate cause of this error, or `None` if there is none.
    ///
    /// Named apart from the deprecated `Error::cause` so both traits can be
    /// in scope together.
    fn caused_by(&self) -> Option<&(dyn StdError + 'static)>;
}

impl<E> HasCause for E
where
    E: StdError + ?Sized,
{
    fn caused_by(&self) -> Option<&(dyn StdError + 'static)> {
        self.source()
    }
}

/// An error that may carry a stack trace.
pub trait HasStacktrace {
    /// The captured stack trace, or `None` if none was captured.
    fn stacktrace(&self) -> Option<&Backtrace>;
}

/// An error holding key/value properties of its own.
pub trait HasLocalProperties {
    /// Returns the value stored under `key` on this error.
    ///
    /// Implementations must *not* recurse into the error's cause; walking the
    /// cause chain is [`crate::lookup`]'s job.
    fn local_property(&self, key: &dyn Key) -> Option<&dyn Value>;
}

/// An error that renders itself according to the active format flags.
pub trait FlagAwareFormat {
    /// Render this error into `f` using the given verb.
    ///
    /// The flags of `f` (`+`, `#`, width, ...) are the caller's and must be
    /// honored or forwarded unchanged.
    fn fmt_flagged(&self, f: &mut fmt::Formatter<'_>, verb: Verb) -> fmt::Result;
}

/// Probe `err` for the local properties capability.
pub fn local_properties<'a>(
    err: &'a (dyn StdError + 'static),
) -> Option<&'a dyn HasLocalProperties> {
    err.downcast_ref::<PropError>().map(|e| e as &dyn HasLocalProperties)
}

/// Probe `err` for the stack trace capability.
pub fn stacktrace_capability<'a>(
    err: &'a (dyn StdError + 'static),
) -> Option<&'a dyn HasStacktrace> {
    if let Some(e) = err.downcast_ref::<PropError>() {
        return Some(e as &dyn HasStacktrace);
    }
    err.downcast_ref::<Traced>().map(|e| e as &dyn HasStacktrace)
}

/// Probe `err` for the flag-aware formatting capability.
pub fn formatter<'a>(
    err: &'a (dyn StdError + 'static),
) -> Option<&'a dyn FlagAwareFormat> {
    if let Some(e) = err.downcast_ref::<PropError>() {
        return Some(e as &dyn FlagAwareFormat);
    }
    err.downcast_ref::<Traced>().map(|e| e as &dyn FlagAwareFormat)
}

/// The stack trace of `err`, if it supports the capability and one was captured.
pub fn stacktrace<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Backtrace> {
    stacktrace_capability(err).and_then(|e| e.stacktrace())
}

pub(crate) fn captured(backtrace: &Backtrace) -> Option<&Backtrace> {
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer {
        inner: std::io::Error,
    }

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn test_cause_follows_source() {
        let err = Outer {
            inner: std::io::Error::other("inner"),
        };
        let cause = err.caused_by().map(|c| c.to_string());
        assert_eq!(cause.as_deref(), Some("inner"));
    }

    #[test]
    fn test_plain_error_has_no_cause() {
        let err = std::io::Error::other("plain");
        assert!(err.caused_by().is_none());
    }

    #[test]
    fn test_plain_error_has_no_optional_capabilities() {
        let err = std::io::Error::other("plain");
        assert!(local_properties(&err).is_none());
        assert!(stacktrace_capability(&err).is_none());
        assert!(formatter(&err).is_none());
        assert!(stacktrace(&err).is_none());
    }

    #[test]
    fn test_prop_error_capabilities() {
        let err = crate::from(std::io::Error::other("plain")).with_value("k", 1);
        assert!(local_properties(&err).is_some());
        assert!(stacktrace_capability(&err).is_some());
        assert!(formatter(&err).is_some());
    }

    #[test]
    fn test_traced_capabilities() {
        let err = Traced::new("traced");
        assert!(local_properties(&err).is_none());
        assert!(stacktrace_capability(&err).is_some());
        assert!(formatter(&err).is_some());
    }
}
