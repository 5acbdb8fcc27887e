// Enums have no fields to walk: they need a capability attribute

use pairconf::PairConf;

#[derive(PairConf)]
enum Level {
    Debug,
    Info,
}

fn main() {}
