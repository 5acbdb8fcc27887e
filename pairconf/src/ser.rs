//! Encoding structures into pairs

use std::fmt::Display;

use crate::{codec, path, Error, Field, Kind, Options, Pairs, Value};

/// Walks a structure and collects its contents as pairs.
///
/// The only state that changes during the walk is whether the field being
/// visited is marked `omitempty`; vector elements and map values inherit it.
pub struct Encoder<'a> {
    options: &'a Options,
    omit_empty: bool,
}

impl<'a> Encoder<'a> {
    /// Encoder with the given options.
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            omit_empty: false,
        }
    }

    /// Encode `root`, which must be a struct.
    pub fn encode<T: Value>(&mut self, root: &T) -> Result<Pairs, Error> {
        if T::KIND != Kind::Struct {
            return Err(Error::invalid_root::<T>());
        }

        let options = self.options;
        let mut out = Pairs::new();
        root.encode(self, &options.prefix, &mut out)?;
        tracing::debug!(
            root = std::any::type_name::<T>(),
            pairs = out.len(),
            "encoded pairs"
        );
        Ok(out)
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

    /// Encode one struct field below `parent`.
    pub fn field<T: Value>(&mut self, value: &T, parent: &str, field: &Field, out: &mut Pairs) -> Result<(), Error> {
        let key = field.key(parent, self.separator(), self.options.preserve_case);

        let outer = std::mem::replace(&mut self.omit_empty, field.omit_empty);
        let result = self.emit(value, &key, out);
        self.omit_empty = outer;
        result
    }

    /// Encode one struct field with its `Display` implementation.
    pub fn text_field<T: Display>(&mut self, value: &T, parent: &str, field: &Field, out: &mut Pairs) -> Result<(), Error> {
        let key = field.key(parent, self.separator(), self.options.preserve_case);
        if field.omit_empty && codec::text_is_zero(value) {
            return Ok(());
        }
        codec::encode_text(value, &key, out);
        Ok(())
    }

    /// Encode `value` at `key` unless it is zero and `omitempty` is active.
    pub fn emit<T: Value>(&mut self, value: &T, key: &str, out: &mut Pairs) -> Result<(), Error> {
        if self.omit_empty && value.is_zero() {
            return Ok(());
        }
        value.encode(self, key, out)
    }
}

/// Encode vector elements at `key_0`, `key_1`, ...
pub(crate) fn encode_elements<T: Value>(
    items: &[T],
    en: &mut Encoder<'_>,
    key: &str,
    out: &mut Pairs,
) -> Result<(), Error> {
    for (index, item) in items.iter().enumerate() {
        let item_key = path::index(key, index, en.separator());
        en.emit(item, &item_key, out)?;
    }
    Ok(())
}

/// Encode map entries at `key_<entry key>`.
///
/// Each entry key is rendered through its own encoder at `key` and must
/// produce exactly that one pair, with a non-empty value: an empty segment
/// could not be read back.
pub(crate) fn encode_entries<'m, K, V>(
    entries: impl Iterator<Item = (&'m K, &'m V)>,
    en: &mut Encoder<'_>,
    key: &str,
    out: &mut Pairs,
) -> Result<(), Error>
where
    K: Value + 'm,
    V: Value + 'm,
{
    let sep = en.separator();
    for (entry_key, value) in entries {
        if !K::KIND.is_leaf() {
            return Err(Error::unsupported::<K>(key));
        }

        let mut rendered = Pairs::new();
        let outer = std::mem::replace(&mut en.omit_empty, false);
        let result = entry_key.encode(en, key, &mut rendered);
        en.omit_empty = outer;
        result?;

        let segment = match rendered.remove(key) {
            Some(segment) if rendered.is_empty() && !segment.is_empty() => segment,
            _ => return Err(Error::unsupported::<K>(key)),
        };
        en.emit(value, &path::member(key, &segment, sep), out)?;
    }
    Ok(())
}
