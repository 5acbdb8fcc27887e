//! Types that decode and encode themselves

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use pairconf::codec::{MarshalEnv, UnmarshalEnv};
use pairconf::{BoxError, PairConf, Pairs};
use tracing_subscriber::EnvFilter;

/// A retry policy read from `<KEY>` (the delay) and `<KEY>_ATTEMPTS`.
#[derive(Debug, Default, PairConf)]
#[conf(custom)]
struct Retry {
    delay: Duration,
    attempts: u32,
}

impl UnmarshalEnv for Retry {
    fn unmarshal_env(&mut self, key: &str, value: &str, pairs: &Pairs) -> Result<(), BoxError> {
        if !value.is_empty() {
            self.delay = pairconf::duration::parse(value)?;
        }
        self.attempts = pairs.get(&format!("{key}_ATTEMPTS")).unwrap_or("3").parse()?;
        Ok(())
    }
}

impl MarshalEnv for Retry {
    fn marshal_env(&self, key: &str) -> Result<Pairs, BoxError> {
        let mut out = Pairs::new();
        out.set(key, pairconf::duration::format(self.delay));
        out.set(format!("{key}_ATTEMPTS"), self.attempts.to_string());
        Ok(out)
    }
}

/// A log level parsed from text.
#[derive(Debug, Default, Clone, Copy, PairConf)]
#[conf(text)]
enum Level {
    Error,
    #[default]
    Info,
    Debug,
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PairConf)]
#[conf(prefix = "WORKER")]
struct Config {
    retry: Retry,
    level: Level,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pairs: Pairs = [
        ("WORKER_RETRY", "250ms"),
        ("WORKER_RETRY_ATTEMPTS", "5"),
        ("WORKER_LEVEL", "DEBUG"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_pairs(&pairs)?;
    println!("{config:?}");

    for line in config.to_pairs()?.env_lines() {
        println!("{line}");
    }

    let bad: Pairs = [("WORKER_LEVEL", "loud")].into_iter().collect();
    if let Err(err) = Config::from_pairs(&bad) {
        println!("rejected: {err}");
    }

    Ok(())
}
