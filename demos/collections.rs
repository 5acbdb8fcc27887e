//! Vectors, maps and vectors of structs

use std::collections::{BTreeMap, HashMap};

use pairconf::{PairConf, Pairs};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PairConf)]
#[conf(prefix = "LB")]
struct Config {
    // LB_PORTS_0, LB_PORTS_1, ...
    ports: Vec<u16>,
    // LB_LABELS_<name>
    labels: BTreeMap<String, String>,
    // LB_BACKENDS_0_HOST, LB_BACKENDS_0_WEIGHT, ...
    backends: Vec<Backend>,
    // LB_POOLS_<name>_0, ...
    pools: HashMap<String, Vec<String>>,
    // LB_TOKEN is a single key, not a list of characters
    token: Vec<u8>,
}

#[derive(Debug, PairConf)]
struct Backend {
    host: String,
    weight: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let lines = [
        "LB_PORTS_0=80",
        "LB_PORTS_1=443",
        "LB_LABELS_team=edge",
        "LB_LABELS_tier=frontend",
        "LB_BACKENDS_0_HOST=10.0.0.1",
        "LB_BACKENDS_0_WEIGHT=3",
        "LB_BACKENDS_1_HOST=10.0.0.2",
        "LB_POOLS_blue_0=b1",
        "LB_POOLS_blue_1=b2",
        "LB_POOLS_green_0=g1",
        "LB_TOKEN=abc123",
        "UNRELATED=ignored",
    ];
    let pairs = Pairs::from_env_lines("LB", lines);

    let config = Config::from_pairs(&pairs)?;
    println!("{config:#?}");
    println!("token as text: {}", String::from_utf8_lossy(&config.token));

    Ok(())
}
