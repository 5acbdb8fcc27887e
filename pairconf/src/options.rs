//! Per-call configuration shared by the decoder and the encoder

use crate::path::DEFAULT_SEPARATOR;
use crate::store::{EnvironmentStore, ProcessEnv};
use crate::{Decoder, Encoder, Error, Pairs, Value};

/// How keys are composed and how unknown types are treated.
///
/// ```
/// use pairconf::{Options, PairConf, Pairs};
///
/// #[derive(Debug, PairConf)]
/// struct Config {
///     #[conf(name = "envkey")]
///     key: String,
/// }
///
/// let pairs: Pairs = [("TESTAPP__envkey", "some env value")].into_iter().collect();
/// let mut config = Config { key: String::new() };
///
/// let found = Options::new()
///     .prefix("TESTAPP")
///     .separator("__")
///     .preserve_case(true)
///     .decode(&mut config, &pairs)?;
///
/// assert!(found);
/// assert_eq!(config.key, "some env value");
/// # Ok::<(), pairconf::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Path of the root struct. Every key starts with it.
    pub prefix: String,
    /// Joins path segments. `_` unless configured otherwise.
    pub separator: String,
    /// Keep field names as written instead of upper-casing them.
    pub preserve_case: bool,
    /// Skip nodes without a decode rule instead of failing.
    pub ignore_unknown: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            preserve_case: false,
            ignore_unknown: false,
        }
    }
}

impl Options {
    /// Options with an empty prefix and the `_` separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the path separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Keep field names in their declared case.
    pub fn preserve_case(mut self, preserve: bool) -> Self {
        self.preserve_case = preserve;
        self
    }

    /// Skip nodes without a decode rule instead of failing.
    pub fn ignore_unknown(mut self, ignore: bool) -> Self {
        self.ignore_unknown = ignore;
        self
    }

    /// Decode `pairs` into `root`. `delenv` has no effect here.
    pub fn decode<T: Value>(&self, root: &mut T, pairs: &Pairs) -> Result<bool, Error> {
        Decoder::new(pairs, self).decode(root)
    }

    /// Decode the process environment into `root`.
    ///
    /// Variables starting with the prefix are copied once before walking.
    /// Fields marked `delenv` remove what they consumed from the
    /// environment, so concurrent callers must be serialized.
    pub fn decode_env<T: Value>(&self, root: &mut T) -> Result<bool, Error> {
        self.decode_store(root, &mut ProcessEnv)
    }

    /// Decode a snapshot of `store` into `root`, deleting consumed keys of
    /// `delenv` fields from `store`.
    pub fn decode_store<T, S>(&self, root: &mut T, store: &mut S) -> Result<bool, Error>
    where
        T: Value,
        S: EnvironmentStore,
    {
        let pairs = store.snapshot(&self.prefix);
        Decoder::new(&pairs, self).with_store(store).decode(root)
    }

    /// Encode `root` into pairs.
    pub fn encode<T: Value>(&self, root: &T) -> Result<Pairs, Error> {
        Encoder::new(self).encode(root)
    }
}
