//! Decoration chain links
//!
//! A chain is a singly linked list of [`Link`]s; the end of the list is the
//! chain's Base. Links are shared through `Arc` and never mutated once
//! built, so chains created from a common predecessor share that suffix.

use std::sync::Arc;

use crate::property::{Key, Value};

pub(crate) struct Link {
    pub(crate) key: Box<dyn Key>,
    pub(crate) value: Box<dyn Value>,
    pub(crate) prev: Option<Arc<Link>>,
}

impl Drop for Link {
    fn drop(&mut self) {
        // Unlink uniquely owned predecessors one at a time so dropping a long
        // chain does not recurse once per link.
        let mut prev = self.prev.take();
        while let Some(link) = prev {
            match Arc::try_unwrap(link) {
                Ok(mut link) => prev = link.prev.take(),
                Err(_) => break,
            }
        }
    }
}

/// Iterator over the key/value pairs of one decoration chain, newest first.
pub struct Pairs<'a> {
    pub(crate) link: Option<&'a Link>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a dyn Key, &'a dyn Value);

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.link?;
        self.link = link.prev.as_deref();
        Some((&*link.key, &*link.value))
    }
}
