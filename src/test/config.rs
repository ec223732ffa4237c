use crate::config::{InterferenceModel, OriginModel, SimConfig, TopologyKind};
use crate::error::ConfigError;
use crate::sim::SimTime;

#[test]
fn defaults_match_reference_experiment() {
    let cfg = SimConfig::default();
    assert_eq!(cfg.end(), SimTime::from_secs(300));
    assert_eq!(cfg.num_packets, 10_000);
    assert_eq!(cfg.mean(), SimTime::from_millis(100));
    assert_eq!(cfg.hop_delay(), SimTime::from_millis(10));
    assert_eq!(cfg.max_retries, 1);
    assert_eq!(cfg.max_retry_time(), SimTime::from_millis(50));
    assert!(cfg.fs_enabled);
    assert_eq!(cfg.repeats, 10);
    assert_eq!(cfg.interference, InterferenceModel::SharedEndpoint);
    assert_eq!(cfg.topology.kind, TopologyKind::Hexagonal);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_fills_missing_fields_with_defaults() {
    let cfg = SimConfig::from_json(
        r#"{
            "fs_enabled": false,
            "repeats": 3,
            "origin": "uniform_router",
            "interference": { "kind": "range", "range": 75.0 },
            "topology": { "kind": "grid", "num_routers": 25 }
        }"#,
    )
    .unwrap();

    assert!(!cfg.fs_enabled);
    assert_eq!(cfg.repeats, 3);
    assert_eq!(cfg.origin, OriginModel::UniformRouter);
    assert_eq!(cfg.interference, InterferenceModel::Range { range: 75.0 });
    assert_eq!(cfg.topology.kind, TopologyKind::Grid);
    assert_eq!(cfg.topology.num_routers, 25);
    assert_eq!(cfg.topology.router_range, 120.0);
    assert_eq!(cfg.hop_delay_secs, 0.01);
}

#[test]
fn invalid_parameters_are_rejected() {
    let bad = [
        SimConfig {
            hop_delay_secs: 0.0,
            ..SimConfig::default()
        },
        SimConfig {
            mean_secs: -1.0,
            ..SimConfig::default()
        },
        SimConfig {
            hop_delay_secs: 1e-10,
            ..SimConfig::default()
        },
        SimConfig {
            mean_secs: 4e-10,
            ..SimConfig::default()
        },
        SimConfig {
            repeats: 0,
            ..SimConfig::default()
        },
        SimConfig {
            updown_ratio: 1.5,
            ..SimConfig::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    assert!(SimConfig::from_json("{ not json").is_err());
    assert!(SimConfig::from_json(r#"{ "repeats": 0 }"#).is_err());
}

#[test]
fn sub_nanosecond_delays_round_to_zero_and_are_rejected() {
    let cfg = SimConfig {
        hop_delay_secs: 1e-10,
        ..SimConfig::default()
    };
    assert_eq!(cfg.hop_delay(), SimTime::ZERO);
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidParameter { name: "hop_delay_secs", .. })
    ));

    let ok = SimConfig {
        hop_delay_secs: 1e-9,
        ..SimConfig::default()
    };
    assert_eq!(ok.hop_delay(), SimTime(1));
    assert!(ok.validate().is_ok());
}
