// A flattened field has no key segment of its own, so a name is meaningless

use pairconf::PairConf;

#[derive(PairConf)]
struct Base {
    debug: bool,
}

#[derive(PairConf)]
struct Config {
    #[conf(flatten, name = "base")]
    base: Base,
}

fn main() {}
