// A codec type is always decoded at its parent's key; a prefix would be ignored

use pairconf::PairConf;

#[derive(Default, PairConf)]
#[conf(text, prefix = "APP")]
struct Level(String);

fn main() {}
