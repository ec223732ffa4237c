use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{OriginModel, SimConfig, TopologyConfig};
use crate::error::{ConfigError, SimError};
use crate::mesh::{RouterId, Topology};
use crate::sim::SimTime;
use crate::traffic::{Arrival, PoissonTraffic, ScriptedTraffic, TrafficGenerator};

fn uniform_cfg(updown_ratio: f64) -> SimConfig {
    SimConfig {
        updown_ratio,
        origin: OriginModel::UniformRouter,
        ..SimConfig::default()
    }
}

#[test]
fn scripted_traffic_replays_in_order_and_never_goes_back_in_time() {
    let topo = Topology::chain(2, 50.0).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let mut traffic = ScriptedTraffic::new([
        Arrival {
            time: SimTime(5),
            source: RouterId(0),
            destination: RouterId(1),
        },
        Arrival {
            time: SimTime(50),
            source: RouterId(1),
            destination: RouterId(0),
        },
    ]);
    assert_eq!(traffic.remaining(), 2);

    let a = traffic.next_arrival(SimTime(20), &topo, &mut rng).unwrap().unwrap();
    assert_eq!(a.time, SimTime(20));
    assert_eq!(a.source, RouterId(0));
    let b = traffic.next_arrival(SimTime(20), &topo, &mut rng).unwrap().unwrap();
    assert_eq!(b.time, SimTime(50));
    assert!(traffic.next_arrival(SimTime(60), &topo, &mut rng).unwrap().is_none());
}

#[test]
fn uplink_goes_to_nearest_gateway_and_downlink_comes_from_it() {
    let topo = Topology::chain(4, 50.0).unwrap();
    let mut rng = StdRng::seed_from_u64(9);

    let mut up = PoissonTraffic::new(&uniform_cfg(1.0)).unwrap();
    let mut down = PoissonTraffic::new(&uniform_cfg(0.0)).unwrap();
    for _ in 0..50 {
        let a = up.next_arrival(SimTime::ZERO, &topo, &mut rng).unwrap().unwrap();
        assert_eq!(a.destination, RouterId(3));
        let b = down.next_arrival(SimTime::ZERO, &topo, &mut rng).unwrap().unwrap();
        assert_eq!(b.source, RouterId(3));
    }
}

#[test]
fn poisson_gaps_average_to_the_configured_mean() {
    let topo = Topology::chain(3, 50.0).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut traffic = PoissonTraffic::new(&uniform_cfg(1.0)).unwrap();

    let n = 4000;
    let mut now = SimTime::ZERO;
    for _ in 0..n {
        let a = traffic.next_arrival(now, &topo, &mut rng).unwrap().unwrap();
        assert!(a.time >= now);
        now = a.time;
    }
    let mean = now.as_secs_f64() / n as f64;
    assert!((0.09..0.11).contains(&mean), "mean gap {mean}");
}

#[test]
fn random_point_outside_client_range_is_a_coverage_gap() {
    let topo = Topology::chain(2, 50.0).unwrap();
    let cfg = SimConfig {
        topology: TopologyConfig {
            max_x: 1000.0,
            max_y: 1000.0,
            client_range: 1.0,
            ..TopologyConfig::default()
        },
        ..SimConfig::default()
    };
    let mut traffic = PoissonTraffic::new(&cfg).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let err = traffic.next_arrival(SimTime::ZERO, &topo, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::CoverageGap { .. })
    ));
}

#[test]
fn empty_topology_cannot_source_traffic() {
    let topo = Topology::default();
    let mut traffic = PoissonTraffic::new(&uniform_cfg(1.0)).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        traffic.next_arrival(SimTime::ZERO, &topo, &mut rng),
        Err(SimError::Config(ConfigError::EmptyTopology))
    ));
}
