// Tuple fields have no names to derive keys from

use pairconf::PairConf;

#[derive(PairConf)]
struct Port(u16);

fn main() {}
