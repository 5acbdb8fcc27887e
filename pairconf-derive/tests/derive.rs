//! Expansion checks that need the runtime crate

use pairconf::{Kind, PairConf, Pairs, Value};

#[derive(Debug, PairConf)]
#[conf(prefix = "SVC")]
struct Config {
    #[conf(name = "addr")]
    listen: String,
    #[conf(skip)]
    cache: Vec<String>,
    #[conf(flatten)]
    limits: Limits,
    r#type: String,
    wrapped: Wrapper<u32>,
}

#[derive(Debug, PairConf)]
struct Limits {
    #[conf(delenv, omitempty)]
    max: u32,
}

#[derive(Debug, PairConf)]
struct Wrapper<T> {
    inner: T,
}

#[derive(Debug, Default, PartialEq, PairConf)]
#[conf(text)]
struct Level(String);

impl std::str::FromStr for Level {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_lowercase()))
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[test]
fn test_descriptor_table() {
    assert_eq!(Config::PREFIX, "SVC");

    let names: Vec<_> = Config::FIELDS.iter().map(|f| f.name).collect();
    assert_eq!(names, ["addr", "limits", "type", "wrapped"]);
    assert_eq!(Config::FIELDS[0].ident, "listen");
    assert!(Config::FIELDS[1].flatten);

    assert!(Limits::FIELDS[0].delenv);
    assert!(Limits::FIELDS[0].omit_empty);
    assert_eq!(Limits::PREFIX, "");
}

#[test]
fn test_kinds() {
    assert_eq!(<Config as Value>::KIND, Kind::Struct);
    assert_eq!(<Level as Value>::KIND, Kind::Text);
}

#[test]
fn test_zero_and_decode() -> anyhow::Result<()> {
    let zero = Config::zero();
    assert!(zero.is_zero());
    assert!(zero.cache.is_empty());

    let pairs: Pairs = [
        ("SVC_ADDR", ":8080"),
        ("SVC_MAX", "5"),
        ("SVC_TYPE", "edge"),
        ("SVC_WRAPPED_INNER", "7"),
        ("SVC_CACHE_0", "never read"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_pairs(&pairs)?;
    assert_eq!(config.listen, ":8080");
    assert_eq!(config.limits.max, 5);
    assert_eq!(config.r#type, "edge");
    assert_eq!(config.wrapped.inner, 7);
    assert!(config.cache.is_empty());
    assert!(!config.is_zero());
    Ok(())
}

#[test]
fn test_text_capability() -> anyhow::Result<()> {
    #[derive(Debug, PairConf)]
    struct Logging {
        level: Level,
    }

    let pairs: Pairs = [("LOG_LEVEL", "DEBUG")].into_iter().collect();
    let mut logging = Logging::zero();
    assert!(pairconf::decode(&mut logging, &pairs, "LOG")?);
    assert_eq!(logging.level, Level("debug".into()));

    let out = pairconf::encode(&logging, "LOG")?;
    assert_eq!(out.get("LOG_LEVEL"), Some("debug"));
    Ok(())
}
