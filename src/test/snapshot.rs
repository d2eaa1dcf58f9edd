use super::abc;
use crate::sim::{BlockReason, ConnectionResult, LinkLoad, SwitchingMode};
use serde_json::Value;

#[test]
fn link_load_thresholds() {
    assert_eq!(LinkLoad::classify(0, 4), LinkLoad::Free);
    assert_eq!(LinkLoad::classify(1, 4), LinkLoad::Light);
    assert_eq!(LinkLoad::classify(2, 4), LinkLoad::Heavy);
    assert_eq!(LinkLoad::classify(4, 4), LinkLoad::Heavy);
    // W/2 rounds down, so with W = 2 a single wavelength is already heavy.
    assert_eq!(LinkLoad::classify(1, 2), LinkLoad::Heavy);
}

#[test]
fn snapshots_are_copies() {
    let sim = abc(2, 0);
    let mut nodes = sim.nodes();
    nodes[0].failed = true;
    let mut links = sim.links();
    links[0].wavelengths[0] = true;

    assert!(sim.nodes().iter().all(|n| !n.failed));
    assert!(sim.links().iter().all(|l| l.active.is_empty()));
}

#[test]
fn link_snapshot_lists_active_wavelengths() {
    let sim = abc(4, 0);
    sim.simulate_connection("A", "C", SwitchingMode::Ocs, false);
    sim.simulate_connection("A", "B", SwitchingMode::Ocs, false);
    sim.fail_node("C").expect("fail C");

    let snap = sim.snapshot();
    assert_eq!(snap.wavelengths, 4);
    assert_eq!(snap.nodes.iter().filter(|n| n.failed).count(), 1);

    let ab = &snap.links[0];
    assert_eq!((ab.a.as_str(), ab.b.as_str()), ("A", "B"));
    assert_eq!(ab.active, vec![0, 1]);
    assert_eq!(ab.load, LinkLoad::Heavy);
    assert_eq!(ab.label(), "λ0,λ1");

    let bc = &snap.links[1];
    assert_eq!(bc.active, vec![0]);
    assert_eq!(bc.load, LinkLoad::Light);

    let free = abc(4, 0).links();
    assert_eq!(free[0].label(), "Free");
}

#[test]
fn with_network_exposes_active_subgraph() {
    let sim = abc(2, 0);
    sim.fail_node("C").expect("fail C");
    let (nodes, links) = sim.with_network(|net| (net.active_nodes().count(), net.active_links().count()));
    assert_eq!((nodes, links), (2, 1));
}

#[test]
fn active_subgraph_copies_operational_part() {
    let sim = abc(2, 0);
    sim.fail_node("B").expect("fail B");
    let (nodes, links) = sim.active_subgraph();
    assert_eq!(nodes, ["A", "C"]);
    assert!(links.is_empty());

    // 副本不持有锁，之后仍可继续操作引擎
    sim.repair_node("B").expect("repair B");
    let (nodes, links) = sim.active_subgraph();
    assert_eq!(nodes, ["A", "B", "C"]);
    assert_eq!(
        links,
        [
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "C".to_string())
        ]
    );
}

#[test]
fn results_and_snapshot_serialize_to_json() {
    let blocked = ConnectionResult::Blocked {
        reason: BlockReason::NoWavelength,
    };
    let v = serde_json::to_value(&blocked).unwrap();
    assert_eq!(v["status"], "blocked");
    assert_eq!(v["reason"], "no_wavelength");

    let sim = abc(2, 0);
    let ok = sim.simulate_connection("A", "C", SwitchingMode::Obs, false);
    let v = serde_json::to_value(&ok).unwrap();
    assert_eq!(v["status"], "success");
    assert_eq!(v["mode"], "OBS");
    assert_eq!(v["path"], serde_json::json!(["A", "B", "C"]));
    assert_eq!(v["wavelengths"]["kind"], "continuous");
    assert_eq!(v["wavelengths"]["wavelength"], 0);

    let snap: Value = serde_json::to_value(sim.snapshot()).unwrap();
    assert_eq!(snap["links"].as_array().map(Vec::len), Some(2));
    assert_eq!(snap["qos"]["blocking_probability"], 0.0);
    assert_eq!(snap["links"][0]["load"], "heavy");
}
