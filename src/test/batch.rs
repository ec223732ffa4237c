use crate::batch::run_batch;
use crate::config::SimConfig;
use crate::mesh::MeshWorld;
use crate::sim::{EventKind, Simulator};

fn small_cfg() -> SimConfig {
    SimConfig {
        num_packets: 100,
        repeats: 3,
        seed: Some(5),
        display_progress: false,
        ..SimConfig::default()
    }
}

#[test]
fn batch_runs_are_isolated_and_averaged() {
    let out = run_batch(&small_cfg(), false).unwrap();
    let s = &out.summary;

    assert!(out.trace.is_none());
    assert_eq!(s.base_seed, 5);
    assert_eq!(s.routers, 4);
    assert_eq!(s.gateways, 1);
    assert_eq!(s.runs.len(), 3);
    assert_eq!(
        s.runs.iter().map(|r| r.seed).collect::<Vec<_>>(),
        vec![5, 6, 7]
    );
    for r in &s.runs {
        assert_eq!(r.stats.packet_counter, 100);
        assert!(r.stats.success_counter + r.stats.drop_counter <= 100);
        assert!((0.0..=100.0).contains(&r.delivery_ratio));
    }

    let avg_pdr = s.runs.iter().map(|r| r.delivery_ratio).sum::<f64>() / 3.0;
    assert!((s.avg_delivery_ratio - avg_pdr).abs() < 1e-9);
}

#[test]
fn batch_with_fixed_seed_is_reproducible() {
    let mut cfg = small_cfg();
    cfg.fs_enabled = false;
    cfg.repeats = 2;
    let a = run_batch(&cfg, false).unwrap().summary;
    let b = run_batch(&cfg, false).unwrap().summary;

    let stats = |s: &crate::batch::BatchSummary| {
        s.runs.iter().map(|r| r.stats.clone()).collect::<Vec<_>>()
    };
    assert_eq!(stats(&a), stats(&b));
    assert!(a.runs.iter().all(|r| r.stats.schedules == 0));
}

#[test]
fn batch_returns_first_run_trace_on_request() {
    let mut cfg = small_cfg();
    cfg.repeats = 1;
    cfg.num_packets = 10;
    let out = run_batch(&cfg, true).unwrap();
    let trace = out.trace.unwrap();

    assert_eq!(trace.events.len() as u64, out.summary.runs[0].stats.events);
    assert!(trace.count(EventKind::New) >= 10);
    assert!(trace.count(EventKind::Schedule) >= 1);
}

#[test]
fn invalid_config_aborts_the_batch() {
    let mut cfg = small_cfg();
    cfg.topology.num_gateways = 50;
    let err = run_batch(&cfg, false).unwrap_err();
    assert!(!err.is_invariant());
}

#[test]
fn independent_runs_can_execute_on_separate_threads() {
    let mut cfg = small_cfg();
    cfg.fs_enabled = false;
    let topo = crate::mesh::Topology::chain(4, 50.0).unwrap();

    let handles: Vec<_> = (0..3u64)
        .map(|seed| {
            let cfg = SimConfig {
                origin: crate::config::OriginModel::UniformRouter,
                ..cfg.clone()
            };
            let world = MeshWorld::with_poisson_traffic(topo.clone(), cfg, seed).unwrap();
            std::thread::spawn(move || {
                let mut world = world;
                let mut sim = Simulator::default();
                world.run(&mut sim).unwrap();
                world.stats
            })
        })
        .collect();

    for h in handles {
        let stats = h.join().unwrap();
        assert_eq!(stats.packet_counter, 100);
    }
}
