//! Bidirectional codec between nested structs and flat `KEY=value` pairs
//!
//! `pairconf` walks a structure with `#[derive(PairConf)]` and maps every
//! reachable field to a key path such as `APP_SERVER_PORTS_0`. The same walk
//! runs in both directions: decoding writes values found in a [`Pairs`]
//! table (or the process environment) into the structure, encoding collects
//! the structure's contents back into pairs.
//!
//! # Features
//!
//! - **Nested data**: structs, `Option`, `Vec`, `HashMap` and `BTreeMap`, to
//!   any depth
//! - **Vector growth**: `APP_LIST_0`, `APP_LIST_1`, ... append elements
//! - **Map discovery**: map keys are found from the pairs themselves
//! - **Allocation on demand**: an `Option` field stays `None` unless
//!   something below it was found
//! - **Capabilities**: custom, text and binary codecs for your own types
//! - **Round trip**: encoding a decoded structure gives the same pairs back
//!
//! # Example
//!
//! ```rust
//! use pairconf::{PairConf, Pairs};
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! #[derive(Debug, PairConf)]
//! #[conf(prefix = "APP")]
//! struct Config {
//!     name: String,
//!     timeout: Duration,
//!     servers: Vec<Server>,
//!     labels: HashMap<String, String>,
//!     tls: Option<Tls>,
//! }
//!
//! #[derive(Debug, PairConf)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, PairConf)]
//! struct Tls {
//!     cert: String,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let pairs = Pairs::from_env_lines(
//!     "APP",
//!     [
//!         "APP_NAME=gateway",
//!         "APP_TIMEOUT=1m30s",
//!         "APP_SERVERS_0_HOST=alpha",
//!         "APP_SERVERS_0_PORT=8080",
//!         "APP_SERVERS_1_HOST=beta",
//!         "APP_LABELS_team=edge",
//!     ],
//! );
//!
//! let config = Config::from_pairs(&pairs)?;
//! assert_eq!(config.name, "gateway");
//! assert_eq!(config.timeout, Duration::from_secs(90));
//! assert_eq!(config.servers.len(), 2);
//! assert_eq!(config.servers[1].port, 0);
//! assert_eq!(config.labels["team"], "edge");
//! assert!(config.tls.is_none());
//!
//! let encoded = config.to_pairs()?;
//! assert_eq!(encoded.get("APP_SERVERS_1_HOST"), Some("beta"));
//! assert_eq!(encoded.get("APP_TIMEOUT"), Some("1m30s"));
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## Field attributes
//!
//! - `#[conf(name = "key")]`: short key name instead of the field identifier
//! - `#[conf(skip)]`: never read or written
//! - `#[conf(flatten)]`: the field's children share the parent's path
//! - `#[conf(delenv)]`: remove every consumed variable from the environment
//! - `#[conf(omitempty)]`: leave zero values out when encoding
//! - `#[conf(text)]`: use `FromStr` and `Display` for a foreign type
//!
//! Field names are upper-cased unless [`Options::preserve_case`] is set.
//! Map keys are never case-changed.
//!
//! ```rust
//! # use pairconf::{PairConf, Pairs};
//! #[derive(Debug, PairConf)]
//! #[conf(prefix = "SVC")]
//! struct Config {
//!     #[conf(name = "addr")]
//!     listen_address: String,
//!     #[conf(flatten)]
//!     common: Common,
//!     #[conf(skip)]
//!     cache: Vec<String>,
//! }
//!
//! #[derive(Debug, PairConf)]
//! struct Common {
//!     debug: bool,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let pairs: Pairs = [("SVC_ADDR", ":80"), ("SVC_DEBUG", "true")].into_iter().collect();
//! let config = Config::from_pairs(&pairs)?;
//! assert_eq!(config.listen_address, ":80");
//! assert!(config.common.debug);
//! # Ok(())
//! # }
//! ```
//!
//! ## Container attributes
//!
//! - `#[conf(prefix = "APP")]`: root prefix used by [`PairConf`] methods
//! - `#[conf(custom)]`: the type implements
//!   [`UnmarshalEnv`](codec::UnmarshalEnv) and [`MarshalEnv`](codec::MarshalEnv)
//! - `#[conf(text)]`: the type implements `FromStr` and `Display`
//! - `#[conf(binary)]`: the type implements [`BinaryCodec`](codec::BinaryCodec)
//!
//! Capability types also need `Default`.

// Lets generated `::pairconf::` paths resolve inside this crate's own tests.
extern crate self as pairconf;

pub mod codec;
pub mod coerce;
pub mod duration;
pub mod path;

mod de;
mod error;
mod field;
mod options;
mod pairs;
mod ser;
mod store;
mod value;

pub use de::Decoder;
pub use error::{BoxError, Error};
pub use field::Field;
pub use options::Options;
pub use pairconf_derive::PairConf;
pub use pairs::Pairs;
pub use ser::Encoder;
pub use store::{EnvironmentStore, MemoryStore, ProcessEnv};
pub use value::{Kind, Value};

/// A struct that can be loaded from and rendered to pairs.
///
/// Implemented by `#[derive(PairConf)]` for structs with named fields.
pub trait PairConf: Value {
    /// Default root prefix, from `#[conf(prefix = "...")]`.
    const PREFIX: &'static str;

    /// Descriptors of the walked fields, in declaration order.
    const FIELDS: &'static [Field];

    /// Options rooted at [`PREFIX`](Self::PREFIX).
    fn options() -> Options {
        Options::new().prefix(Self::PREFIX)
    }

    /// Load from the process environment.
    ///
    /// Only variables starting with the prefix are read.
    fn from_env() -> Result<Self, Error> {
        let mut root = Self::zero();
        Self::options().decode_env(&mut root)?;
        Ok(root)
    }

    /// Load from an explicit table.
    ///
    /// The value is built from scratch, so an error leaves nothing half
    /// written behind.
    fn from_pairs(pairs: &Pairs) -> Result<Self, Error> {
        let mut root = Self::zero();
        Self::options().decode(&mut root, pairs)?;
        Ok(root)
    }

    /// Render as pairs rooted at the prefix.
    fn to_pairs(&self) -> Result<Pairs, Error> {
        Self::options().encode(self)
    }
}

/// Decode `pairs` into `root`, with keys rooted at `prefix`.
///
/// Returns whether anything was found. `root` must be a struct.
pub fn decode<T: Value>(root: &mut T, pairs: &Pairs, prefix: &str) -> Result<bool, Error> {
    Options::new().prefix(prefix).decode(root, pairs)
}

/// Decode the process environment into `root`, with keys rooted at `prefix`.
pub fn decode_env<T: Value>(root: &mut T, prefix: &str) -> Result<bool, Error> {
    Options::new().prefix(prefix).decode_env(root)
}

/// Encode `root` into pairs rooted at `prefix`.
pub fn encode<T: Value>(root: &T, prefix: &str) -> Result<Pairs, Error> {
    Options::new().prefix(prefix).encode(root)
}
