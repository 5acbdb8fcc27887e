//! Nested structs, optional sections and renamed fields

use std::time::Duration;

use pairconf::{PairConf, Pairs};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PairConf)]
#[conf(prefix = "SVC")]
struct Config {
    #[conf(name = "listen")]
    addr: String,
    timeout: Duration,
    // SVC_DB_HOST, SVC_DB_PORT
    db: Database,
    // Only allocated when a SVC_TLS_* key exists
    tls: Option<Tls>,
    // Fields of Common sit directly under SVC_
    #[conf(flatten)]
    common: Common,
}

#[derive(Debug, PairConf)]
struct Database {
    host: String,
    port: u16,
}

#[derive(Debug, PairConf)]
struct Tls {
    cert: String,
    key: String,
}

#[derive(Debug, PairConf)]
struct Common {
    region: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pairs: Pairs = [
        ("SVC_LISTEN", ":8443"),
        ("SVC_TIMEOUT", "1m30s"),
        ("SVC_DB_HOST", "db.internal"),
        ("SVC_DB_PORT", "5432"),
        ("SVC_REGION", "eu-west-1"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_pairs(&pairs)?;
    println!("{config:#?}");
    assert!(config.tls.is_none());

    let mut with_tls = pairs.clone();
    with_tls.set("SVC_TLS_CERT", "/etc/tls/cert.pem");
    let config = Config::from_pairs(&with_tls)?;
    println!("tls: {:?}", config.tls);

    Ok(())
}
