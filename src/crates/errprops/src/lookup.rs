//! Property lookup along the cause chain
//!
//! [`get`] resolves a key by checking the queried error's own properties,
//! then those of its cause, then its cause's cause, and so on. Errors that
//! carry no properties (plain `std` errors, `anyhow` contexts, ...) are
//! still walked through, so a property set deep in a chain of arbitrary
//! wrappers is found from the top.

use std::any::Any;
use std::error::Error as StdError;

use tracing::trace;

use crate::capability::{self, HasCause};
use crate::property::{Key, Value};

/// Returns the value associated with `key` on `err` or on its causes.
///
/// Rules, in order:
///
/// 1. If `err` has local properties (it is a [`crate::PropError`]) and one of
///    them is `key`, the most recently set value wins.
/// 2. Otherwise the search continues on `err`'s cause.
///
/// Values set closer to `err` therefore shadow values set deeper in the
/// cause chain.
///
/// # Example
///
/// ```rust
/// let root = errprops::from(std::io::Error::other("root")).with_value("id", 42);
///
/// assert_eq!(errprops::get(&root, "id").map(|v| v.to_string()).as_deref(), Some("42"));
/// assert!(errprops::get(&root, "missing").is_none());
/// ```
pub fn get<'a>(err: &'a (dyn StdError + 'static), key: impl Key) -> Option<&'a dyn Value> {
    lookup(Some(err), &key)
}

/// [`get`] for a possibly absent error and a type-erased key.
///
/// An absent error has no properties.
pub fn lookup<'a>(
    err: Option<&'a (dyn StdError + 'static)>,
    key: &dyn Key,
) -> Option<&'a dyn Value> {
    for (depth, current) in (Causes { next: err }).enumerate() {
        let found =
            capability::local_properties(current).and_then(|props| props.local_property(key));
        if let Some(value) = found {
            trace!(key = %key, depth, "property resolved");
            return Some(value);
        }
    }
    None
}

/// Like [`get`], but returns the value as a `&T`.
///
/// Convenient in single-value contexts. A missing key and a value of another
/// type both give `None`.
///
/// ```rust
/// let err = errprops::from(std::io::Error::other("fail")).with_value("id", 42u32);
///
/// assert_eq!(errprops::get_optional::<u32>(&err, "id"), Some(&42));
/// assert_eq!(errprops::get_optional::<String>(&err, "id"), None);
/// ```
pub fn get_optional<'a, T: Any>(
    err: &'a (dyn StdError + 'static),
    key: impl Key,
) -> Option<&'a T> {
    get(err, key).and_then(|value| value.downcast_ref::<T>())
}

/// Iterate over `err` and its causes.
///
/// Each step follows [`HasCause::caused_by`]. A decorated error is
/// transparent here: its cause is the cause of the error it wraps.
pub fn causes<'a>(err: &'a (dyn StdError + 'static)) -> Causes<'a> {
    Causes { next: Some(err) }
}

/// Iterator returned by [`causes`].
#[derive(Clone)]
pub struct Causes<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.caused_by();
        Some(current)
    }
}

/// Get the root cause of an error chain
///
/// Walks the cause chain until reaching the bottom.
pub fn root_cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut current = err;
    while let Some(cause) = current.caused_by() {
        current = cause;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traced::Traced;

    fn io(msg: &str) -> std::io::Error {
        std::io::Error::other(msg.to_string())
    }

    fn text(value: Option<&dyn Value>) -> Option<String> {
        value.map(|v| v.to_string())
    }

    #[test]
    fn test_absent_error() {
        assert!(lookup(None, &"id").is_none());
    }

    #[test]
    fn test_key_never_set() {
        let err = crate::from(io("hello"));
        assert!(get(&err, "nope").is_none());
        assert!(get(&err, 0u8).is_none());
    }

    #[test]
    fn test_plain_error() {
        let err = io("plain");
        assert!(get(&err, "id").is_none());
    }

    #[test]
    fn test_intermediate_cause_has_property() {
        let cause = Traced::new("root cause");
        let middle = crate::from(Traced::wrap(cause, "")).with_value("foo", "bar");
        let err = Traced::wrap(middle, "");

        assert_eq!(text(get(&err, "foo")).as_deref(), Some("bar"));

        // Wrapping with another decorator doesn't change the result.
        let err = crate::from(err);
        assert!(err.get("foo").is_none());
        assert_eq!(text(get(&err, "foo")).as_deref(), Some("bar"));
    }

    #[test]
    fn test_root_cause_has_property() {
        let cause = crate::from(Traced::new("root cause")).with_value("foo", "bar");
        let middle = Traced::wrap(cause, "");
        let err = Traced::wrap(middle, "");

        assert_eq!(text(get(&err, "foo")).as_deref(), Some("bar"));

        let err = crate::from(err);
        assert!(err.get("foo").is_none());
        assert_eq!(text(get(&err, "foo")).as_deref(), Some("bar"));
    }

    #[test]
    fn test_outer_value_shadows_inner() {
        let root = crate::from(Traced::new("root cause")).with_value("key", "rootValue");
        let wrapped =
            crate::from(Traced::wrap(root.clone(), "wrapped")).with_value("key", "wrappedValue");

        assert_eq!(text(get(&root, "key")).as_deref(), Some("rootValue"));
        assert_eq!(text(get(&wrapped, "key")).as_deref(), Some("wrappedValue"));
    }

    #[test]
    fn test_keys_from_different_levels() {
        let root = crate::from(Traced::new("root cause")).with_value("rootKey", "rootValue");
        let wrapped =
            crate::from(Traced::wrap(root, "wrapped")).with_value("wrappedKey", "wrappedValue");

        assert_eq!(text(get(&wrapped, "rootKey")).as_deref(), Some("rootValue"));
        assert_eq!(text(get(&wrapped, "wrappedKey")).as_deref(), Some("wrappedValue"));
    }

    #[test]
    fn test_get_optional_typed() {
        let err = crate::from(io("fail"))
            .with_value("key", "value")
            .with_value("count", 3usize);

        assert_eq!(get_optional::<&'static str>(&err, "key"), Some(&"value"));
        assert_eq!(get_optional::<usize>(&err, "count"), Some(&3));
        assert_eq!(get_optional::<u32>(&err, "count"), None);
        assert_eq!(get_optional::<usize>(&err, "missing"), None);
    }

    #[test]
    fn test_found_value_that_is_none() {
        let err = crate::from(io("fail")).with_value("maybe", OptionalText(None));
        let value = get(&err, "maybe");
        assert!(value.is_some());
        assert_eq!(
            get_optional::<OptionalText>(&err, "maybe"),
            Some(&OptionalText(None))
        );
    }

    #[derive(Debug, PartialEq)]
    struct OptionalText(Option<&'static str>);

    impl std::fmt::Display for OptionalText {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0.unwrap_or("<none>"))
        }
    }

    #[test]
    fn test_results_borrow_only_the_error() {
        let err = crate::from(Traced::wrap(io("root"), "outer")).with_value("id", 9u32);

        let found = {
            let key = String::from("id");
            get(&err, key)
        };
        let typed = get_optional::<u32>(&err, String::from("id"));
        let first = causes(&err).next();
        let root = root_cause(&err);

        assert_eq!(text(found).as_deref(), Some("9"));
        assert_eq!(typed, Some(&9));
        assert_eq!(first.map(|e| e.to_string()).as_deref(), Some("outer"));
        assert_eq!(root.to_string(), "root");

        let quiet = Traced::new_with("quiet", crate::config::CaptureMode::Never);
        let trace = crate::capability::stacktrace(&quiet);
        assert!(trace.is_none());
    }

    #[test]
    fn test_causes_and_root_cause() {
        let err = Traced::wrap(Traced::wrap(Traced::new("cause"), "middle"), "outer");
        let messages: Vec<String> = causes(&err).map(|e| e.to_string()).collect();
        assert_eq!(messages, vec!["outer", "middle", "cause"]);
        assert_eq!(root_cause(&err).to_string(), "cause");
    }

    #[test]
    fn test_decorator_is_transparent_in_cause_chain() {
        let err = crate::from(Traced::wrap(Traced::new("cause"), "outer")).with_value("k", 1);
        let messages: Vec<String> = causes(&err).map(|e| e.to_string()).collect();
        assert_eq!(messages, vec!["outer", "cause"]);
    }

    #[test]
    fn test_single_error_chain() {
        let err = io("single error");
        assert_eq!(causes(&err).count(), 1);
        assert_eq!(root_cause(&err).to_string(), "single error");
    }
}
