//! Rendering a configuration back into pairs

use std::collections::BTreeMap;
use std::time::Duration;

use pairconf::{Options, PairConf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PairConf)]
#[conf(prefix = "APP")]
struct Config {
    name: String,
    #[conf(omitempty)]
    description: String,
    timeout: Duration,
    #[conf(omitempty)]
    hosts: Vec<String>,
    labels: BTreeMap<String, String>,
    #[conf(skip)]
    runtime_only: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config {
        name: "billing".into(),
        description: String::new(),
        timeout: Duration::from_millis(2500),
        hosts: vec!["a.internal".into(), "b.internal".into()],
        labels: BTreeMap::from([("env".to_string(), "prod".to_string())]),
        runtime_only: 42,
    };

    println!("# env file (runtime_only={} is not rendered)", config.runtime_only);
    for line in config.to_pairs()?.env_lines() {
        println!("{line}");
    }

    println!("# shell, quoted, custom separator");
    let pairs = Options::new()
        .prefix("APP")
        .separator("__")
        .encode(&config)?;
    for line in pairs.quoted_lines() {
        println!("export {line}");
    }

    Ok(())
}
