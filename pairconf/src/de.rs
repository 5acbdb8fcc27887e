//! Decoding pairs into structures

use std::str::FromStr;

use crate::error::BoxError;
use crate::store::EnvironmentStore;
use crate::{codec, path, Error, Field, Kind, Options, Pairs, Value};

/// Walks a structure and writes the values found in a pairs snapshot.
///
/// A decoder lives for one top-level call. The snapshot and the options are
/// fixed; the only state that changes during the walk is whether the field
/// being visited is marked `delenv`, or sits below one that is.
pub struct Decoder<'a> {
    pairs: &'a Pairs,
    options: &'a Options,
    store: Option<&'a mut dyn EnvironmentStore>,
    delenv: bool,
}

impl<'a> Decoder<'a> {
    /// Decoder over an explicit pairs table.
    pub fn new(pairs: &'a Pairs, options: &'a Options) -> Self {
        Self {
            pairs,
            options,
            store: None,
            delenv: false,
        }
    }

    /// Delete keys consumed by `delenv` fields from `store`.
    pub fn with_store<S: EnvironmentStore>(mut self, store: &'a mut S) -> Self {
        self.store = Some(store);
        self
    }

    /// Decode into `root`, which must be a struct.
    ///
    /// Returns whether any node was populated from a key.
    pub fn decode<T: Value>(&mut self, root: &mut T) -> Result<bool, Error> {
        if T::KIND != Kind::Struct {
            return Err(Error::invalid_root::<T>());
        }

        tracing::debug!(
            root = std::any::type_name::<T>(),
            prefix = %self.options.prefix,
            pairs = self.pairs.len(),
            "decoding pairs"
        );
        let prefix = self.options.prefix.clone();
        let found = root.decode(self, &prefix, None)?;
        tracing::debug!(found, "decoded pairs");
        Ok(found)
    }

    /// The snapshot being decoded.
    pub fn pairs(&self) -> &'a Pairs {
        self.pairs
    }

    /// The options of this call.
    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// Path separator.
    pub fn separator(&self) -> &'a str {
        let options: &'a Options = self.options;
        &options.separator
    }

    /// Raw value stored at `key`.
    pub fn lookup(&self, key: &str) -> Option<&'a str> {
        let pairs: &'a Pairs = self.pairs;
        let raw = pairs.get(key);
        tracing::trace!(key, present = raw.is_some(), "lookup");
        raw
    }

    /// Decode one struct field below `parent`.
    pub fn field<T: Value>(&mut self, value: &mut T, parent: &str, field: &Field) -> Result<bool, Error> {
        let key = field.key(parent, self.separator(), self.options.preserve_case);
        let raw = self.lookup(&key);

        let delenv = self.delenv || field.delenv;
        let outer = std::mem::replace(&mut self.delenv, delenv);
        let found = value.decode(self, &key, raw);
        self.delenv = outer;
        found
    }

    /// Decode one struct field with its `FromStr` implementation.
    pub fn text_field<T>(&mut self, value: &mut T, parent: &str, field: &Field) -> Result<bool, Error>
    where
        T: FromStr,
        T::Err: Into<BoxError>,
    {
        let key = field.key(parent, self.separator(), self.options.preserve_case);
        let raw = self.lookup(&key);

        let delenv = self.delenv || field.delenv;
        let outer = std::mem::replace(&mut self.delenv, delenv);
        let found = codec::decode_text(value, self, &key, raw);
        self.delenv = outer;
        found
    }

    /// Record that `key` was read. Deletes it from the backing store when
    /// the current field is marked `delenv` or nested in one that is.
    pub fn consume(&mut self, key: &str) {
        if !self.delenv {
            return;
        }
        if let Some(store) = self.store.as_deref_mut() {
            tracing::trace!(key, "delenv");
            store.delete(key);
        }
    }

    /// Report a node of type `T` at `key` that has no decode rule.
    ///
    /// Returns `Ok(())` when unknown types are ignored.
    pub fn unsupported<T>(&self, key: &str) -> Result<(), Error> {
        if self.options.ignore_unknown {
            tracing::debug!(key, ty = std::any::type_name::<T>(), "skipping unsupported type");
            return Ok(());
        }
        Err(Error::unsupported::<T>(key))
    }
}

/// Decode vector elements at `key_0`, `key_1`, ...
///
/// Existing elements are decoded in place. One index past the end is tried
/// at a time and appended when found, so growth stops at the first gap
/// beyond the current length.
pub(crate) fn decode_elements<T: Value>(
    items: &mut Vec<T>,
    de: &mut Decoder<'_>,
    key: &str,
) -> Result<bool, Error> {
    let mut found = false;
    let mut index = 0;

    while index <= items.len() {
        let item_key = path::index(key, index, de.separator());
        let raw = de.lookup(&item_key);

        if let Some(item) = items.get_mut(index) {
            found |= item.decode(de, &item_key, raw)?;
        } else {
            let mut item = T::zero();
            if item.decode(de, &item_key, raw)? {
                items.push(item);
                found = true;
            }
        }
        index += 1;
    }

    Ok(found)
}

/// Decode map entries discovered below `key`, handing each found one to
/// `insert`.
pub(crate) fn decode_entries<K, V>(
    de: &mut Decoder<'_>,
    key: &str,
    mut insert: impl FnMut(K, V),
) -> Result<bool, Error>
where
    K: Value,
    V: Value,
{
    let sep = de.separator();
    let children = de.pairs().children(key, sep);
    if children.is_empty() {
        return Ok(false);
    }
    if !K::KIND.is_leaf() {
        de.unsupported::<K>(key)?;
        return Ok(false);
    }

    let mut found = false;
    for (segment, direct) in children {
        // The key comes from the path, not from a stored pair: nothing to delete.
        let mut map_key = K::zero();
        let outer = std::mem::replace(&mut de.delenv, false);
        let decoded = map_key.decode(de, key, Some(segment));
        de.delenv = outer;
        decoded?;

        let entry_key = path::member(key, segment, sep);
        if direct == Some("") {
            // Present but empty: the entry exists with a zero value.
            de.consume(&entry_key);
            insert(map_key, V::zero());
            found = true;
            continue;
        }

        let mut value = V::zero();
        if value.decode(de, &entry_key, direct)? {
            insert(map_key, value);
            found = true;
        }
    }

    Ok(found)
}
