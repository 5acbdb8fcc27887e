//! Conversions between leaf values and raw strings
//!
//! Scalars are decoded whenever their key is present, even with an empty
//! value: an empty string is a valid `String` but a failed integer parse.
//! Std types with a text form (addresses, paths) are only decoded from
//! non-empty values, like every other text codec.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::BoxError;
use crate::{codec, duration, path, Decoder, Encoder, Error, Kind, Pairs, Value};

/// A string outside the boolean grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid boolean {0:?}")]
pub struct ParseBoolError(String);

/// Parse `1 t T TRUE true True` or `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, ParseBoolError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError(raw.to_string())),
    }
}

macro_rules! parsed_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Value for $ty {
            const KIND: Kind = Kind::Scalar;

            fn zero() -> Self {
                Self::default()
            }

            fn is_zero(&self) -> bool {
                *self == Self::default()
            }

            fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
                let Some(raw) = raw else {
                    return Ok(false);
                };
                de.consume(key);
                *self = raw.parse().map_err(|e| Error::conversion::<$ty>(key, e))?;
                Ok(true)
            }

            fn encode(&self, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
                out.set(key, self.to_string());
                Ok(())
            }
        }
    )*};
}

parsed_scalar!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize, f32, f64, char);

impl Value for String {
    const KIND: Kind = Kind::Scalar;

    fn zero() -> Self {
        String::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        let Some(raw) = raw else {
            return Ok(false);
        };
        de.consume(key);
        raw.clone_into(self);
        Ok(true)
    }

    fn encode(&self, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        out.set(key, self.as_str());
        Ok(())
    }
}

impl Value for bool {
    const KIND: Kind = Kind::Scalar;

    fn zero() -> Self {
        false
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        let Some(raw) = raw else {
            return Ok(false);
        };
        de.consume(key);
        *self = parse_bool(raw).map_err(|e| Error::conversion::<bool>(key, e))?;
        Ok(true)
    }

    fn encode(&self, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        out.set(key, self.to_string());
        Ok(())
    }
}

impl Value for Duration {
    const KIND: Kind = Kind::Scalar;

    fn zero() -> Self {
        Duration::ZERO
    }

    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        let Some(raw) = raw else {
            return Ok(false);
        };
        de.consume(key);
        *self = duration::parse(raw).map_err(|e| Error::conversion::<Duration>(key, e))?;
        Ok(true)
    }

    fn encode(&self, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        out.set(key, duration::format(*self));
        Ok(())
    }
}

/// A byte is one character, not a number: `"A"` is 65 and `""` is 0.
///
/// `Vec<u8>` is a single key holding the raw bytes.
impl Value for u8 {
    const KIND: Kind = Kind::Scalar;
    const SEQ_KIND: Kind = Kind::Scalar;

    fn zero() -> Self {
        0
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        let Some(raw) = raw else {
            return Ok(false);
        };
        de.consume(key);

        let mut chars = raw.chars();
        *self = match (chars.next(), chars.next()) {
            (None, _) => 0,
            (Some(c), None) => u8::try_from(c).map_err(|_| Error::InvalidByteValue {
                key: key.to_string(),
                value: raw.to_string(),
            })?,
            (Some(_), Some(_)) => {
                return Err(Error::InvalidByteValue {
                    key: key.to_string(),
                    value: raw.to_string(),
                })
            }
        };
        Ok(true)
    }

    fn encode(&self, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        let rendered = match *self {
            0 => String::new(),
            byte => char::from(byte).to_string(),
        };
        out.set(key, rendered);
        Ok(())
    }

    fn decode_vec(items: &mut Vec<Self>, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        let Some(raw) = raw else {
            return Ok(false);
        };
        de.consume(key);
        *items = raw.as_bytes().to_vec();
        Ok(true)
    }

    fn encode_slice(items: &[Self], _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        let text = String::from_utf8(items.to_vec()).map_err(|e| Error::conversion::<Vec<u8>>(key, e))?;
        out.set(key, text);
        Ok(())
    }
}

/// An error field: the raw string becomes the error message.
impl Value for Option<BoxError> {
    const KIND: Kind = Kind::Scalar;

    fn zero() -> Self {
        None
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        let Some(raw) = raw else {
            return Ok(false);
        };
        de.consume(key);
        *self = Some(raw.into());
        Ok(true)
    }

    fn encode(&self, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        if let Some(err) = self {
            out.set(key, err.to_string());
        }
        Ok(())
    }
}

macro_rules! text_scalar {
    ($($ty:ty => $zero:expr),* $(,)?) => {$(
        impl Value for $ty {
            const KIND: Kind = Kind::Text;

            fn zero() -> Self {
                $zero
            }

            fn is_zero(&self) -> bool {
                *self == $zero
            }

            fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
                codec::decode_text(self, de, key, raw)
            }

            fn encode(&self, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
                codec::encode_text(self, key, out);
                Ok(())
            }
        }
    )*};
}

text_scalar! {
    IpAddr => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    Ipv4Addr => Ipv4Addr::UNSPECIFIED,
    Ipv6Addr => Ipv6Addr::UNSPECIFIED,
    SocketAddr => SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)),
    SocketAddrV4 => SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0),
    SocketAddrV6 => SocketAddrV6::new(Ipv6Addr::UNSPECIFIED, 0, 0, 0),
}

impl Value for PathBuf {
    const KIND: Kind = Kind::Text;

    fn zero() -> Self {
        PathBuf::new()
    }

    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        let Some(raw) = raw.filter(|v| !v.is_empty()) else {
            return Ok(false);
        };
        de.consume(key);
        *self = PathBuf::from(raw);
        Ok(true)
    }

    fn encode(&self, _en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        let text = self
            .to_str()
            .ok_or_else(|| Error::conversion::<PathBuf>(key, "path is not valid UTF-8"))?;
        out.set(key, text);
        Ok(())
    }
}

/// Untyped data. There is nothing to decode into, so a present key is an
/// unsupported type; encoding flattens the tree.
impl Value for serde_json::Value {
    const KIND: Kind = Kind::Dynamic;

    fn zero() -> Self {
        serde_json::Value::Null
    }

    fn is_zero(&self) -> bool {
        use serde_json::Value as Json;
        match self {
            Json::Null => true,
            Json::Bool(b) => !b,
            Json::Number(n) => n.as_f64() == Some(0.0),
            Json::String(s) => s.is_empty(),
            Json::Array(items) => items.is_empty(),
            Json::Object(map) => map.is_empty(),
        }
    }

    fn decode(&mut self, de: &mut Decoder<'_>, key: &str, raw: Option<&str>) -> Result<bool, Error> {
        if raw.is_some() {
            de.unsupported::<Self>(key)?;
        }
        Ok(false)
    }

    fn encode(&self, en: &mut Encoder<'_>, key: &str, out: &mut Pairs) -> Result<(), Error> {
        use serde_json::Value as Json;
        let sep = en.separator();
        match self {
            Json::Null => {}
            Json::Bool(b) => {
                out.set(key, b.to_string());
            }
            Json::Number(n) => {
                out.set(key, n.to_string());
            }
            Json::String(s) => {
                out.set(key, s.as_str());
            }
            Json::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    en.emit(item, &path::index(key, index, sep), out)?;
                }
            }
            Json::Object(map) => {
                for (name, item) in map {
                    en.emit(item, &path::member(key, name, sep), out)?;
                }
            }
        }
        Ok(())
    }
}
