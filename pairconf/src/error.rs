//! Error types for walking structures against key/value pairs

/// Boxed error returned by capability handlers (custom, text and binary codecs).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while decoding pairs into a structure or encoding
/// a structure into pairs.
///
/// The first error met during the depth-first walk aborts the whole call.
/// Fields visited before the failure keep whatever was written into them,
/// so decode into a fresh value (see [`PairConf::from_pairs`]) when the
/// result must be all-or-nothing.
///
/// [`PairConf::from_pairs`]: crate::PairConf::from_pairs
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The root handed to the decoder or encoder is not a struct.
    #[error("can only walk a struct root, got {type_name}")]
    InvalidRoot {
        /// Fully qualified type name of the rejected root
        type_name: String,
    },

    /// The node at `key` has no conversion rule in this direction.
    ///
    /// Skipped instead of reported when the decoder runs with
    /// [`Options::ignore_unknown`](crate::Options::ignore_unknown).
    #[error("'{key}': unsupported type {type_name}")]
    UnsupportedType {
        /// Key path of the node
        key: String,
        /// Fully qualified type name of the node
        type_name: String,
    },

    /// A `u8` field received more than one character, or a character
    /// outside the byte range.
    #[error("'{key}': invalid byte value {value:?}")]
    InvalidByteValue {
        /// Key path of the node
        key: String,
        /// Raw value that was rejected
        value: String,
    },

    /// A raw string failed to parse with the grammar of its target type.
    #[error("'{key}': failed to parse as {type_name}: {source}")]
    Conversion {
        /// Key path of the node
        key: String,
        /// Fully qualified type name that parsing was attempted for
        type_name: String,
        /// Underlying parse failure
        #[source]
        source: BoxError,
    },

    /// A custom, text or binary codec returned an error.
    #[error("'{key}': {capability} codec failed: {source}")]
    Codec {
        /// Key path of the node
        key: String,
        /// Which capability failed (`custom`, `text` or `binary`)
        capability: &'static str,
        /// Error returned by the handler, unchanged
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Create a conversion error for target type `T`.
    pub fn conversion<T: ?Sized>(key: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Conversion {
            key: key.into(),
            type_name: std::any::type_name::<T>().to_string(),
            source: source.into(),
        }
    }

    /// Create an unsupported type error for node type `T`.
    pub fn unsupported<T: ?Sized>(key: impl Into<String>) -> Self {
        Self::UnsupportedType {
            key: key.into(),
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Create an invalid root error for root type `T`.
    pub fn invalid_root<T: ?Sized>() -> Self {
        Self::InvalidRoot {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Wrap a capability handler failure.
    pub fn codec(key: impl Into<String>, capability: &'static str, source: BoxError) -> Self {
        Self::Codec {
            key: key.into(),
            capability,
            source,
        }
    }

    /// Key path the error was raised at, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidRoot { .. } => None,
            Self::UnsupportedType { key, .. }
            | Self::InvalidByteValue { key, .. }
            | Self::Conversion { key, .. }
            | Self::Codec { key, .. } => Some(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_carries_type_and_key() {
        let source = "x".parse::<u32>().unwrap_err();
        let err = Error::conversion::<u32>("APP_PORT", source);

        match &err {
            Error::Conversion { key, type_name, .. } => {
                assert_eq!(key, "APP_PORT");
                assert!(type_name.contains("u32"));
            }
            _ => panic!("Expected Conversion error"),
        }
        assert_eq!(err.key(), Some("APP_PORT"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_root_has_no_key() {
        let err = Error::invalid_root::<Option<String>>();
        assert_eq!(err.key(), None);
        assert!(err.to_string().contains("Option"));
    }
}
