//! Decoding from the process environment

use std::collections::HashMap;
use std::env;

use pairconf::{PairConf, Pairs, ProcessEnv, Value};
use serial_test::serial;

#[derive(Debug, PairConf)]
#[conf(prefix = "PAIRCONF_APP")]
struct AppConfig {
    name: String,
    port: u16,
    hosts: Vec<String>,
    #[conf(delenv)]
    token: String,
    #[conf(delenv)]
    peers: HashMap<String, String>,
    #[conf(delenv)]
    keys: Vec<String>,
}

fn clear(prefix: &str) {
    for (key, _) in env::vars() {
        if key.starts_with(prefix) {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn test_from_env() {
    clear("PAIRCONF_APP");
    env::set_var("PAIRCONF_APP_NAME", "gateway");
    env::set_var("PAIRCONF_APP_PORT", "8080");
    env::set_var("PAIRCONF_APP_HOSTS_0", "alpha");
    env::set_var("PAIRCONF_APP_HOSTS_1", "beta");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.name, "gateway");
    assert_eq!(config.port, 8080);
    assert_eq!(config.hosts, ["alpha", "beta"]);

    clear("PAIRCONF_APP");
}

#[test]
#[serial]
fn test_delenv_removes_variables() {
    clear("PAIRCONF_APP");
    env::set_var("PAIRCONF_APP_NAME", "gateway");
    env::set_var("PAIRCONF_APP_TOKEN", "s3cr3t");
    env::set_var("PAIRCONF_APP_PEERS_east", "10.0.0.1");
    env::set_var("PAIRCONF_APP_KEYS_0", "k0");
    env::set_var("PAIRCONF_APP_KEYS_1", "k1");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.token, "s3cr3t");
    assert_eq!(config.peers["east"], "10.0.0.1");
    assert_eq!(config.keys, ["k0", "k1"]);

    assert!(env::var("PAIRCONF_APP_TOKEN").is_err());
    assert!(env::var("PAIRCONF_APP_PEERS_east").is_err());
    assert!(env::var("PAIRCONF_APP_KEYS_0").is_err());
    assert!(env::var("PAIRCONF_APP_KEYS_1").is_err());
    assert_eq!(env::var("PAIRCONF_APP_NAME").as_deref(), Ok("gateway"));

    clear("PAIRCONF_APP");
}

#[test]
#[serial]
fn test_decode_env_with_explicit_prefix() {
    #[derive(Debug, PairConf)]
    struct Limits {
        max: u32,
    }

    clear("PAIRCONF_LIM");
    env::set_var("PAIRCONF_LIM_MAX", "12");
    env::set_var("PAIRCONF_LIMX_MAX", "99");

    let mut limits = Limits::zero();
    assert!(pairconf::decode_env(&mut limits, "PAIRCONF_LIM").unwrap());
    assert_eq!(limits.max, 12);

    let mut limits = Limits::zero();
    assert!(!pairconf::decode_env(&mut limits, "PAIRCONF_NOTHING").unwrap());

    clear("PAIRCONF_LIM");
}

#[test]
#[serial]
fn test_env_lines_snapshot() {
    clear("PAIRCONF_LINES");
    env::set_var("PAIRCONF_LINES_URL", "postgres://db/app?sslmode=require");

    let lines: Vec<String> = env::vars().map(|(k, v)| format!("{k}={v}")).collect();
    let pairs = Pairs::from_env_lines("PAIRCONF_LINES", &lines);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs.get("PAIRCONF_LINES_URL"), Some("postgres://db/app?sslmode=require"));

    clear("PAIRCONF_LINES");
}

#[test]
#[serial]
fn test_decode_store_with_process_env() {
    #[derive(Debug, PairConf)]
    struct Secret {
        #[conf(delenv)]
        value: String,
    }

    clear("PAIRCONF_SECRET");
    env::set_var("PAIRCONF_SECRET_VALUE", "hunter2");

    let mut secret = Secret::zero();
    let found = pairconf::Options::new()
        .prefix("PAIRCONF_SECRET")
        .decode_store(&mut secret, &mut ProcessEnv)
        .unwrap();

    assert!(found);
    assert_eq!(secret.value, "hunter2");
    assert!(env::var("PAIRCONF_SECRET_VALUE").is_err());
}
