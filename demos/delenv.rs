//! Removing secrets from the environment once they are read

use pairconf::PairConf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PairConf)]
#[conf(prefix = "VAULT")]
struct Config {
    addr: String,
    #[conf(delenv)]
    token: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    std::env::set_var("VAULT_ADDR", "https://vault.internal:8200");
    std::env::set_var("VAULT_TOKEN", "s.abcdef");

    let config = Config::from_env()?;
    println!("addr: {}", config.addr);
    println!("token loaded: {}", !config.token.is_empty());

    println!("VAULT_ADDR still set: {}", std::env::var("VAULT_ADDR").is_ok());
    println!("VAULT_TOKEN still set: {}", std::env::var("VAULT_TOKEN").is_ok());

    Ok(())
}
