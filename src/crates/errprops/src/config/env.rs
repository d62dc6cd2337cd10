//! Environment variable access for configuration

use crate::{ErrPropsError, Result};
use std::env;
use std::str::FromStr;

/// Read `key`, or `None` when it is not set.
///
/// A value that is not valid UTF-8 is an [`ErrPropsError::InvalidEnv`].
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(raw)) => Err(ErrPropsError::InvalidEnv {
            key: key.to_string(),
            value: raw.to_string_lossy().into_owned(),
            reason: "invalid UTF-8".to_string(),
        }),
    }
}

/// Read and parse `key`, ignoring surrounding whitespace.
///
/// An unset variable is `Ok(None)`; one that fails to parse is an
/// [`ErrPropsError::InvalidEnv`] carrying the parser's message.
///
/// ```rust,ignore
/// let mode: Option<CaptureMode> = get_env_parse("ERRPROPS_CAPTURE")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(key)? {
        Some(val) => {
            let parsed = val.trim().parse::<T>().map_err(|e| ErrPropsError::InvalidEnv {
                key: key.to_string(),
                value: val.clone(),
                reason: e.to_string(),
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// `prefix` followed by the uppercased `name`.
pub fn build_env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}
