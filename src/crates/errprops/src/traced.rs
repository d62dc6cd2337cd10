//! Message errors with a captured stack trace
//!
//! [`Traced`] is a small error type that records where it was created. It
//! supports every capability except local properties, which makes it a
//! convenient root or intermediate wrapper in a decorated cause chain.
//!
//! ```rust
//! use errprops::Traced;
//!
//! let cause = Traced::new("connection reset");
//! let err = Traced::wrap(cause, "fetch failed");
//!
//! assert_eq!(err.to_string(), "fetch failed");
//! assert_eq!(format!("{}", err.render()), "fetch failed: connection reset");
//! ```

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use tracing::trace;

use crate::capability::{self, FlagAwareFormat, HasStacktrace};
use crate::config::{self, CaptureMode};
use crate::format::{Flags, Render, Verb};

/// An error message with an optional source and a stack trace.
pub struct Traced {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Traced {
    /// Create an error with `message`, capturing a stack trace according to
    /// the global capture mode.
    pub fn new(message: impl Into<String>) -> Self {
        Self::new_with(message, config::global().capture_mode())
    }

    /// Create an error with `message`, capturing a stack trace according to `mode`.
    pub fn new_with(message: impl Into<String>, mode: CaptureMode) -> Self {
        Self {
            message: message.into(),
            source: None,
            backtrace: capture(mode),
        }
    }

    /// Wrap `source` with `message`, capturing a stack trace according to
    /// the global capture mode.
    pub fn wrap<E>(source: E, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
            backtrace: capture(config::global().capture_mode()),
        }
    }

    /// The message of this error alone, without its causes.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The captured stack trace, if one was captured.
    pub fn stacktrace(&self) -> Option<&Backtrace> {
        capability::captured(&self.backtrace)
    }

    /// Adapter rendering this error and its causes.
    pub fn render(&self) -> Render<'_, Self> {
        Render(self)
    }
}

fn capture(mode: CaptureMode) -> Backtrace {
    match mode {
        CaptureMode::Always => {
            trace!("capturing backtrace");
            Backtrace::force_capture()
        }
        CaptureMode::Env => Backtrace::capture(),
        CaptureMode::Never => Backtrace::disabled(),
    }
}

impl HasStacktrace for Traced {
    fn stacktrace(&self) -> Option<&Backtrace> {
        Traced::stacktrace(self)
    }
}

impl FlagAwareFormat for Traced {
    fn fmt_flagged(&self, f: &mut fmt::Formatter<'_>, verb: Verb) -> fmt::Result {
        let flags = Flags::of(f);
        match verb {
            Verb::Display => {
                f.write_str(&self.message)?;
                let mut cause = self.source();
                while let Some(err) = cause {
                    write!(f, ": {}", err)?;
                    cause = err.source();
                }
                if flags.plus {
                    if let Some(backtrace) = self.stacktrace() {
                        write!(f, "\n{}", backtrace)?;
                    }
                }
                Ok(())
            }
            Verb::Debug => {
                let mut s = f.debug_struct("Traced");
                s.field("message", &self.message);
                s.field("source", &self.source);
                if flags.plus {
                    s.field("backtrace", &self.backtrace);
                }
                s.finish()
            }
        }
    }
}

impl fmt::Display for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_flagged(f, Verb::Debug)
    }
}

impl StdError for Traced {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}
