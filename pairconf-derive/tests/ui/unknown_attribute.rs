// Attributes this derive does not understand are rejected, not ignored

use pairconf::PairConf;

#[derive(PairConf)]
struct Config {
    #[conf(default = 8080)]
    port: u16,
}

fn main() {}
