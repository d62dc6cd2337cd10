//! Flag-aware formatting protocol
//!
//! A decorated error renders as its properties, newest first, in a single
//! bracket section followed by the wrapped error:
//!
//! ```text
//! [b=2,a=1] cause
//! ```
//!
//! The verb (`Display` or `Debug`) and the detail flags of the caller's
//! formatter are threaded through every key, every value and the wrapped
//! error itself:
//!
//! | Format | Verb | Flag |
//! |---|---|---|
//! | `{}` | Display | - |
//! | `{:+}` | Display | plus |
//! | `{:#}` | Display | sharp |
//! | `{:?}` | Debug | - |
//! | `{:+?}` | Debug | plus |
//! | `{:#?}` | Debug | sharp |
//!
//! When both flags are set, `plus` wins.

use std::fmt;

use crate::capability::FlagAwareFormat;

/// The formatting trait a rendering was requested through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `{}` and its flagged variants
    Display,
    /// `{:?}` and its flagged variants
    Debug,
}

/// Detail flags of a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    /// Verbose rendering, `{:+}`.
    pub plus: bool,
    /// Alternate rendering, `{:#}`.
    pub sharp: bool,
}

impl Flags {
    /// Read the detail flags of `f`.
    pub fn of(f: &fmt::Formatter<'_>) -> Self {
        Self {
            plus: f.sign_plus(),
            sharp: f.alternate(),
        }
    }

    /// Write `value` to `f` with this verb and these flags only.
    ///
    /// Width, precision and fill of `f` are not applied.
    pub fn write<T>(&self, f: &mut fmt::Formatter<'_>, verb: Verb, value: &T) -> fmt::Result
    where
        T: fmt::Display + fmt::Debug + ?Sized,
    {
        match (verb, self.plus, self.sharp) {
            (Verb::Display, true, _) => write!(f, "{:+}", value),
            (Verb::Display, false, true) => write!(f, "{:#}", value),
            (Verb::Display, false, false) => write!(f, "{}", value),
            (Verb::Debug, true, _) => write!(f, "{:+?}", value),
            (Verb::Debug, false, true) => write!(f, "{:#?}", value),
            (Verb::Debug, false, false) => write!(f, "{:?}", value),
        }
    }
}

/// Display adapter for the flag-aware rendering of an error.
///
/// `Display` renders with [`Verb::Display`] and `Debug` with [`Verb::Debug`];
/// flags pass through untouched.
///
/// # Example
///
/// ```rust
/// let err = errprops::from(std::io::Error::other("cause"))
///     .with_value("a", 1)
///     .with_value("b", 2);
///
/// assert_eq!(err.render().to_string(), "[b=2,a=1] cause");
/// ```
pub struct Render<'a, T: ?Sized>(pub(crate) &'a T);

impl<T: FlagAwareFormat + ?Sized> fmt::Display for Render<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_flagged(f, Verb::Display)
    }
}

impl<T: FlagAwareFormat + ?Sized> fmt::Debug for Render<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_flagged(f, Verb::Debug)
    }
}

/// Wrap `value` in a [`Render`] adapter.
pub fn render<T: FlagAwareFormat + ?Sized>(value: &T) -> Render<'_, T> {
    Render(value)
}
