use std::env;

use intensity::configuration::Configuration;
use intensity::manager::manager::IManager;
use intensity::store::segmentstore::SegmentStore;
use intensity::store::stepfunction::StepFunction;

fn main() {
    env_logger::init();

    let mut store = SegmentStore::new();
    store.add(10, 30, 1).unwrap();
    println!("after add(10, 30, 1):  {}", store);
    store.add(20, 40, 1).unwrap();
    println!("after add(20, 40, 1):  {}", store);
    store.add(10, 40, -2).unwrap();
    println!("after add(10, 40, -2): {}", store);
    store.set(15, 35, 0).unwrap();
    println!("after set(15, 35, 0):  {}", store);
    println!("value at 12: {}", store.value_at(12));

    if let Some(config_path) = env::args().nth(1) {
        let configuration = Configuration::new();
        configuration.from_reader(config_path).unwrap();
        let profile_manager = configuration.profile_manager();
        let map = profile_manager.map();
        let mut names: Vec<&String> = map.keys().collect();
        names.sort();
        for name in names {
            println!("{}: {}", name, map[name]);
        }
    }
}
