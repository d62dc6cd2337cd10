//! Fluent decoration of `Result` errors
//!
//! Provides [`PropResultExt`] for attaching properties to the error side of
//! a `Result` right where it is produced.

use std::error::Error as StdError;

use crate::decorator::PropError;
use crate::property::{Key, Value};

/// Trait for attaching properties to the error of a `Result`
///
/// # Example
///
/// ```rust
/// use errprops::PropResultExt;
///
/// fn read_config(path: &str) -> Result<String, errprops::PropError> {
///     std::fs::read_to_string(path).prop("path", path.to_string())
/// }
///
/// let err = read_config("/no/such/config.toml").unwrap_err();
/// assert_eq!(
///     errprops::get_optional::<String>(&err, "path").map(String::as_str),
///     Some("/no/such/config.toml")
/// );
/// ```
pub trait PropResultExt<T> {
    /// Set `key` to `value` on the error, if there is one
    ///
    /// An error that already is a [`PropError`] gets the property added to
    /// its chain; any other error is wrapped first.
    fn prop<K, V>(self, key: K, value: V) -> Result<T, PropError>
    where
        K: Key,
        V: Value;

    /// Set `key` to a lazily computed value on the error, if there is one
    ///
    /// Useful when the value is expensive to compute and should only be
    /// built if an error actually occurs.
    fn with_prop<K, V, F>(self, key: K, f: F) -> Result<T, PropError>
    where
        K: Key,
        V: Value,
        F: FnOnce() -> V;
}

impl<T, E> PropResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn prop<K, V>(self, key: K, value: V) -> Result<T, PropError>
    where
        K: Key,
        V: Value,
    {
        self.map_err(|e| decorate(e).with_value(key, value))
    }

    fn with_prop<K, V, F>(self, key: K, f: F) -> Result<T, PropError>
    where
        K: Key,
        V: Value,
        F: FnOnce() -> V,
    {
        self.map_err(|e| decorate(e).with_value(key, f()))
    }
}

fn decorate<E>(err: E) -> PropError
where
    E: StdError + Send + Sync + 'static,
{
    let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(err);
    match boxed.downcast::<PropError>() {
        Ok(prop) => *prop,
        Err(other) => PropError::from_boxed(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{get, get_optional};

    fn inner_operation() -> Result<(), std::io::Error> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ))
    }

    fn middle_operation() -> Result<(), PropError> {
        inner_operation().prop("file", "config.json")
    }

    fn outer_operation() -> Result<(), PropError> {
        middle_operation().prop("stage", "init")
    }

    #[test]
    fn test_prop() {
        let err = middle_operation().unwrap_err();
        assert_eq!(err.to_string(), "File not found");
        assert_eq!(get_optional::<&'static str>(&err, "file"), Some(&"config.json"));
    }

    #[test]
    fn test_prop_extends_existing_chain() {
        let err = outer_operation().unwrap_err();
        assert_eq!(err.properties().count(), 2);
        assert_eq!(
            format!("{}", err.render()),
            "[stage=init,file=config.json] File not found"
        );
        assert_eq!(err.wrapped().to_string(), "File not found");
    }

    #[test]
    fn test_with_prop_is_lazy() {
        let ok: Result<u32, std::io::Error> = Ok(1);
        let result = ok.with_prop("never", || -> String { panic!("evaluated on success") });
        assert_eq!(result.unwrap(), 1);

        let err = inner_operation()
            .with_prop("attempt", || 3u8)
            .unwrap_err();
        assert_eq!(get(&err, "attempt").map(|v| v.to_string()).as_deref(), Some("3"));
    }

    #[test]
    fn test_ok_passes_through() {
        let ok: Result<&str, std::io::Error> = Ok("fine");
        assert_eq!(ok.prop("k", 1).unwrap(), "fine");
    }
}
