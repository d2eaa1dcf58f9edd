use std::sync::Arc;
use std::thread;

use super::seeded_sim;
use crate::sim::{Connection, SwitchingMode, TrafficGenerator};
use crate::topo::ring::{RingOpts, build_ring};

#[test]
fn concurrent_callers_never_double_book() {
    let sim = Arc::new(seeded_sim(4, 1));
    build_ring(&*sim, &RingOpts { len: 8, ..RingOpts::default() }).expect("ring");

    let workers: Vec<_> = (0..8u64)
        .map(|t| {
            let sim = Arc::clone(&sim);
            thread::spawn(move || {
                let mut tg = TrafficGenerator::new(Some(100 + t), SwitchingMode::Ocs, t % 2 == 0);
                let mut held: Vec<Connection> = Vec::new();
                for i in 0..150 {
                    if let Some(conn) = tg.step(&*sim).and_then(|r| r.connection().cloned()) {
                        held.push(conn);
                    }
                    if i % 5 == 4 {
                        let _ = sim.fail_node("n2");
                    } else if i % 5 == 0 {
                        let _ = sim.repair_node("n2");
                    }
                }
                held
            })
        })
        .collect();

    let held: Vec<Connection> = workers
        .into_iter()
        .flat_map(|h| h.join().expect("worker panicked"))
        .collect();

    let reserved: usize = sim
        .links()
        .iter()
        .map(|l| l.active.len())
        .sum();
    let expected: usize = held.iter().map(|c| c.wavelengths.hops()).sum();
    assert_eq!(reserved, expected, "every (link, λ) pair has one holder");
    assert_eq!(sim.counters().successful as usize, held.len());
    assert_eq!(sim.counters().requests(), 8 * 150);

    for conn in &held {
        sim.release_connection(conn).expect("release");
    }
    assert!(sim.links().iter().all(|l| l.active.is_empty()));
}
