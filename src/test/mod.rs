mod concurrency;
mod snapshot;

use crate::sim::{OcsSimulator, SimConfig};

/// 固定种子的仿真器，`converters` 个转换器，每链路 `wavelengths` 个波长
fn seeded_sim(wavelengths: usize, converters: u32) -> OcsSimulator {
    OcsSimulator::new(SimConfig {
        wavelengths,
        converters,
        seed: Some(7),
    })
    .expect("valid config")
}

/// A - B - C
fn abc(wavelengths: usize, converters: u32) -> OcsSimulator {
    let sim = seeded_sim(wavelengths, converters);
    for n in ["A", "B", "C"] {
        sim.add_node(n);
    }
    sim.add_link("A", "B").expect("link A-B");
    sim.add_link("B", "C").expect("link B-C");
    sim
}

fn occupancy(sim: &OcsSimulator, a: &str, b: &str) -> Vec<bool> {
    sim.links()
        .into_iter()
        .find(|l| (l.a == a && l.b == b) || (l.a == b && l.b == a))
        .map(|l| l.wavelengths)
        .unwrap_or_else(|| panic!("no link {a}-{b}"))
}
