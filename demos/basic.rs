//! Basic usage example

use pairconf::PairConf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PairConf)]
#[conf(prefix = "MYAPP")]
struct Config {
    // Loaded from MYAPP_DATABASE_URL
    database_url: String,

    // Parsed with FromStr
    server_addr: std::net::SocketAddr,

    max_connections: u32,

    debug_mode: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("MYAPP_SERVER_ADDR", "0.0.0.0:3000");
    std::env::set_var("MYAPP_MAX_CONNECTIONS", "10");
    std::env::set_var("MYAPP_DEBUG_MODE", "true");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);

    Ok(())
}
