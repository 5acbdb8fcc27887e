//! The `Value` trait: how one node of a structure maps to pairs
//!
//! Every type the walker can reach implements [`Value`]. Scalars, options,
//! vectors and maps are implemented here and in [`coerce`](crate::coerce);
//! structs and capability types get theirs from `#[derive(PairConf)]`.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::{de, ser, Decoder, Encoder, Error, Pairs};

/// Shape of a node, declared once per type.
///
/// The kind replaces runtime type inspection: the decoder checks it to
/// validate roots and map keys, and the derive macro picks it from the
/// container attributes (`custom` before `text` before `binary`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Decoded and encoded by [`UnmarshalEnv`](crate::codec::UnmarshalEnv)
    /// and [`MarshalEnv`](crate::codec::MarshalEnv).
    Custom,
    /// Decoded with `FromStr`, encoded with `Display`.
    Text,
    /// Decoded and encoded by [`BinaryCodec`](crate::codec::BinaryCodec).
    Binary,
    /// `Option<T>`: allocated only when something below it is found.
    Pointer,
    /// A derived struct; each field owns a path segment.
    Struct,
    /// A vector addressed by index segments.
    Slice,
    /// A map addressed by key segments.
    Map,
    /// A leaf converted by the coercion table.
    Scalar,
    /// A value whose shape is only known at runtime (`serde_json::Value`).
    Dynamic,
}

impl Kind {
    /// Whether the node maps to exactly one key, which is what map keys need.
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Custom | Self::Text | Self::Binary | Self::Scalar)
    }
}

/// A node the walker can decode into and encode from.
pub trait Value: Sized {
    /// Shape of this type.
    const KIND: Kind;

    /// Kind of a `Vec<Self>`. Only `u8` overrides it, to make byte vectors
    /// a single scalar.
    #[doc(hidden)]
    const SEQ_KIND: Kind = Kind::Slice;

    /// The value a freshly allocated node starts from.
    fn zero() -> Self;

    /// Whether this value counts as empty for `omitempty`.
    fn is_zero(&self) -> bool;

    /// Decode pairs at `key` into `self`.
    ///
    /// `raw` is the value stored at exactly `key`, if the key is present.
    /// Returns whether anything was populated.
    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error>;

    /// Encode `self` into `out`, rooted at `key`.
    fn encode(&self, en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error>;

    #[doc(hidden)]
    fn decode_vec(
        items: &mut Vec<Self>,
        de: &mut Decoder<'_>,
        key: &str,
        _raw: Option<&str>,
    ) -> Result<bool, Error> {
        de::decode_elements(items, de, key)
    }

    #[doc(hidden)]
    fn encode_slice(
        items: &[Self],
        en: &mut Encoder<'_>,
        key: &str,
        out: &mut Pairs,
    ) -> Result<(), Error> {
        ser::encode_elements(items, en, key, out)
    }
}

impl<T: Value> Value for Option<T> {
    const KIND: Kind = Kind::Pointer;

    fn zero() -> Self {
        None
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        // A present but empty value does not allocate.
        let raw = raw.filter(|v| !v.is_empty());
        match self {
            Some(inner) => inner.decode(de, key, raw),
            None => {
                let mut inner = T::zero();
                let found = inner.decode(de, key, raw)?;
                if found {
                    *self = Some(inner);
                }
                Ok(found)
            }
        }
    }

    fn encode(&self, en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        match self {
            Some(inner) => en.emit(inner, key, out),
            None => Ok(()),
        }
    }
}

/// Boxes are transparent, which is what recursive structures need.
impl<T: Value> Value for Box<T> {
    const KIND: Kind = T::KIND;

    fn zero() -> Self {
        Box::new(T::zero())
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        (**self).decode(de, key, raw)
    }

    fn encode(&self, en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        (**self).encode(en, key, out)
    }
}

impl<T: Value> Value for Vec<T> {
    const KIND: Kind = T::SEQ_KIND;

    fn zero() -> Self {
        Vec::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        T::decode_vec(self, de, key, raw)
    }

    fn encode(&self, en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        T::encode_slice(self, en, key, out)
    }
}

impl<K, V, S> Value for HashMap<K, V, S>
where
    K: Value + Eq + Hash,
    V: Value,
    S: BuildHasher + Default,
{
    const KIND: Kind = Kind::Map;

    fn zero() -> Self {
        HashMap::default()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, _raw: Option<&str>) -> Result<bool, Error> {
        de::decode_entries(de, key, |k, v| {
            self.insert(k, v);
        })
    }

    fn encode(&self, en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        ser::encode_entries(self.iter(), en, key, out)
    }
}

impl<K, V> Value for BTreeMap<K, V>
where
    K: Value + Ord,
    V: Value,
{
    const KIND: Kind = Kind::Map;

    fn zero() -> Self {
        BTreeMap::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, _raw: Option<&str>) -> Result<bool, Error> {
        de::decode_entries(de, key, |k, v| {
            self.insert(k, v);
        })
    }

    fn encode(&self, en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        ser::encode_entries(self.iter(), en, key, out)
    }
}
