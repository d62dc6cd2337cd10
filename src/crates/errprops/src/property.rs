//! Opaque property keys and values
//!
//! Keys and values are type-erased so a single decoration chain can carry
//! properties of any type. Keys only need equality; values only need to be
//! printable and downcastable.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A property key.
///
/// Implemented for every `'static` type with `PartialEq`, `Display` and
/// `Debug`. Two keys are equal when they have the same type and compare
/// equal. String keys are the exception: `&'static str`, `String`,
/// `Box<str>`, `Arc<str>` and `Cow<'static, str>` all compare by their text,
/// so a key set with a literal can be looked up with an owned string.
///
/// # Example
///
/// ```rust
/// use errprops::Key;
///
/// assert!("id".key_eq(&String::from("id")));
/// assert!(!"id".key_eq(&1u32));
/// ```
pub trait Key: Any + fmt::Debug + fmt::Display + Send + Sync {
    /// Returns this key as a `&dyn Any` to allow downcasting.
    fn key_any(&self) -> &dyn Any;

    /// Returns true when `other` denotes the same key as `self`.
    fn key_eq(&self, other: &dyn Key) -> bool;
}

impl<T> Key for T
where
    T: Any + PartialEq + fmt::Debug + fmt::Display + Send + Sync,
{
    fn key_any(&self) -> &dyn Any {
        self
    }

    fn key_eq(&self, other: &dyn Key) -> bool {
        let other = Key::key_any(other);
        if let (Some(a), Some(b)) = (str_key(self), str_key(other)) {
            return a == b;
        }
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

fn str_key(any: &dyn Any) -> Option<&str> {
    if let Some(s) = any.downcast_ref::<&'static str>() {
        return Some(*s);
    }
    if let Some(s) = any.downcast_ref::<String>() {
        return Some(s.as_str());
    }
    if let Some(s) = any.downcast_ref::<Box<str>>() {
        return Some(&**s);
    }
    if let Some(s) = any.downcast_ref::<Arc<str>>() {
        return Some(&**s);
    }
    any.downcast_ref::<Cow<'static, str>>().map(|s| &**s)
}

/// A property value.
///
/// Implemented for every `'static` type with `Display` and `Debug`.
pub trait Value: Any + fmt::Debug + fmt::Display + Send + Sync {
    /// Returns this value as a `&dyn Any` to allow downcasting.
    fn value_any(&self) -> &dyn Any;
}

impl<T> Value for T
where
    T: Any + fmt::Debug + fmt::Display + Send + Sync,
{
    fn value_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Value {
    /// Returns true if the value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        Value::value_any(self).is::<T>()
    }

    /// Returns the value as a `&T` if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        Value::value_any(self).downcast_ref::<T>()
    }
}
