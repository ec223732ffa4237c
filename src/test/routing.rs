use crate::error::{ConfigError, SimError};
use crate::mesh::{Point, RouterId, Topology};

#[test]
fn greedy_next_hop_moves_toward_destination() {
    let mut topo = Topology::chain(4, 50.0).unwrap();
    assert_eq!(topo.next_hop(RouterId(0), RouterId(3)).unwrap(), RouterId(1));
    assert_eq!(topo.next_hop(RouterId(2), RouterId(0)).unwrap(), RouterId(1));

    let path = topo.projected_path(RouterId(0), RouterId(3)).unwrap();
    assert_eq!(path.len(), 3);
    let hops: Vec<_> = path
        .iter()
        .map(|&l| {
            let link = topo.link(l).unwrap();
            (link.source, link.destination)
        })
        .collect();
    assert_eq!(
        hops,
        vec![
            (RouterId(0), RouterId(1)),
            (RouterId(1), RouterId(2)),
            (RouterId(2), RouterId(3)),
        ]
    );
    assert!(topo.projected_path(RouterId(3), RouterId(3)).unwrap().is_empty());
}

#[test]
fn greedy_route_that_never_converges_is_a_config_error() {
    let mut topo = Topology::default();
    let a = topo.add_router(Point::new(0.0, 0.0));
    let b = topo.add_router(Point::new(-10.0, 0.0));
    let dst = topo.add_router(Point::new(100.0, 0.0));
    topo.connect(a, b).unwrap();
    topo.generate_links().unwrap();

    let err = topo.projected_path(a, dst).unwrap_err();
    assert!(!err.is_invariant());
    assert!(matches!(
        err,
        SimError::Config(ConfigError::RoutingLoop { from, to, .. }) if from == a && to == dst
    ));
}

#[test]
fn isolated_router_has_no_next_hop() {
    let mut topo = Topology::default();
    let lonely = topo.add_router(Point::new(0.0, 0.0));
    let other = topo.add_router(Point::new(500.0, 0.0));

    let err = topo.next_hop(lonely, other).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::NoNeighbour { router }) if router == lonely
    ));
    assert!(matches!(
        topo.next_hop(lonely, RouterId(9)),
        Err(SimError::Config(ConfigError::UnknownRouter(RouterId(9))))
    ));
}

#[test]
fn missing_link_lookup_is_an_invariant_error() {
    let topo = Topology::chain(3, 50.0).unwrap();
    let err = topo.find_link(RouterId(0), RouterId(2)).unwrap_err();
    assert!(err.is_invariant());
}
