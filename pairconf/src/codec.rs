//! Capability codecs that take over a node's conversion
//!
//! A type opts into one capability with a container attribute on
//! `#[derive(PairConf)]`:
//!
//! - `#[conf(custom)]`: [`UnmarshalEnv`] + [`MarshalEnv`], full control over
//!   the key and the pairs it produces
//! - `#[conf(text)]`: `FromStr` + `Display`
//! - `#[conf(binary)]`: [`BinaryCodec`]
//!
//! When several are listed the first in that order wins. The helpers below
//! are what the generated `Value` implementations call.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::BoxError;
use crate::{Decoder, Encoder, Error, Pairs};

/// Parse one key yourself.
///
/// Called whenever the key is present, even when its value is empty. The
/// snapshot is passed along so one value can be assembled from several keys.
///
/// ```
/// use pairconf::codec::{MarshalEnv, UnmarshalEnv};
/// use pairconf::{BoxError, PairConf, Pairs};
/// use std::time::Duration;
///
/// /// A duration multiplied by the optional `<KEY>_X` variable.
/// #[derive(Debug, Default, PairConf)]
/// #[conf(custom)]
/// struct TimeX(Duration);
///
/// impl UnmarshalEnv for TimeX {
///     fn unmarshal_env(&mut self, key: &str, value: &str, pairs: &Pairs) -> Result<(), BoxError> {
///         let times: u32 = pairs.get(&format!("{key}_X")).unwrap_or("1").parse()?;
///         self.0 = pairconf::duration::parse(value)? * times;
///         Ok(())
///     }
/// }
///
/// impl MarshalEnv for TimeX {
///     fn marshal_env(&self, key: &str) -> Result<Pairs, BoxError> {
///         Ok([(key.to_string(), pairconf::duration::format(self.0))].into_iter().collect())
///     }
/// }
///
/// #[derive(Debug, PairConf)]
/// #[conf(prefix = "APP")]
/// struct AppConfig {
///     name: String,
///     #[conf(name = "in")]
///     special: TimeX,
/// }
///
/// let pairs: Pairs = [("APP_IN", "5m"), ("APP_IN_X", "10"), ("APP_NAME", "myApp")]
///     .into_iter()
///     .collect();
/// let config = AppConfig::from_pairs(&pairs)?;
/// assert_eq!(config.special.0, Duration::from_secs(3000));
/// # Ok::<(), pairconf::Error>(())
/// ```
pub trait UnmarshalEnv {
    /// Decode `value`, found at `key`, into `self`.
    fn unmarshal_env(&mut self, key: &str, value: &str, pairs: &Pairs) -> Result<(), BoxError>;
}

/// Produce your own pairs for one node.
pub trait MarshalEnv {
    /// Pairs describing `self`, rooted at `key`.
    fn marshal_env(&self, key: &str) -> Result<Pairs, BoxError>;

    /// Whether `omitempty` may drop this value. Never, unless overridden.
    fn is_unset(&self) -> bool {
        false
    }
}

/// Convert to and from opaque bytes carried as text.
pub trait BinaryCodec {
    /// Replace `self` with the value encoded in `bytes`.
    fn from_binary(&mut self, bytes: &[u8]) -> Result<(), BoxError>;

    /// Bytes representing `self`. Must be valid UTF-8 to be stored.
    fn to_binary(&self) -> Result<Vec<u8>, BoxError>;
}

/// Decode through [`UnmarshalEnv`] when `key` is present.
pub fn decode_custom<T: UnmarshalEnv>(
    value: &mut T,
    de: &mut Decoder<'_>,
    key: &str,
    raw: Option<&str>,
) -> Result<bool, Error> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    de.consume(key);
    value
        .unmarshal_env(key, raw, de.pairs())
        .map_err(|e| Error::codec(key, "custom", e))?;
    Ok(true)
}

/// Encode through [`MarshalEnv`].
pub fn encode_custom<T: MarshalEnv>(value: &T, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
    let pairs = value
        .marshal_env(key)
        .map_err(|e| Error::codec(key, "custom", e))?;
    out.merge(pairs);
    Ok(())
}

/// Decode with `FromStr` when a non-empty value is present.
pub fn decode_text<T>(value: &mut T, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
        return Ok(false);
    };
    de.consume(key);
    *value = raw
        .parse()
        .map_err(|e: T::Err| Error::codec(key, "text", e.into()))?;
    Ok(true)
}

/// Encode with `Display`.
pub fn encode_text<T: Display + ?Sized>(value: &T, key: &str, out: &mut Pairs) {
    out.set(key, value.to_string());
}

/// A text value is zero when it displays as nothing.
pub fn text_is_zero<T: Display + ?Sized>(value: &T) -> bool {
    value.to_string().is_empty()
}

/// Decode with [`BinaryCodec`] when a non-empty value is present.
pub fn decode_binary<T: BinaryCodec>(
    value: &mut T,
    de: &mut Decoder<'_>,
    key: &str,
    raw: Option<&str>,
) -> Result<bool, Error> {
    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
        return Ok(false);
    };
    de.consume(key);
    value
        .from_binary(raw.as_bytes())
        .map_err(|e| Error::codec(key, "binary", e))?;
    Ok(true)
}

/// Encode with [`BinaryCodec`].
pub fn encode_binary<T: BinaryCodec>(value: &T, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
    let bytes = value
        .to_binary()
        .map_err(|e| Error::codec(key, "binary", e))?;
    let text = String::from_utf8(bytes).map_err(|e| Error::codec(key, "binary", e.into()))?;
    out.set(key, text);
    Ok(())
}

/// A binary value is zero when it encodes to no bytes.
pub fn binary_is_zero<T: BinaryCodec>(value: &T) -> bool {
    value.to_binary().map(|b| b.is_empty()).unwrap_or(false)
}
