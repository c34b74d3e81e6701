// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Configuration documents parsed with serde_json.

use skipmap::{Config, ConfigError, IndexedSkipMap, LevelGenerator};

#[test]
fn empty_document_is_default() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.max_level, 16);
    assert_eq!(config.probability, 0.5);
    assert_eq!(config.seed, None);
}

#[test]
fn partial_document_fills_defaults() {
    let config: Config = serde_json::from_str(r#"{ "max_level": 4, "seed": 12 }"#).unwrap();
    assert_eq!(config.max_level, 4);
    assert_eq!(config.probability, 0.5);
    assert_eq!(config.seed, Some(12));
    config.validate().unwrap();
    assert_eq!(config.generator().unwrap().max_level(), 4);
}

#[test]
fn parsed_config_builds_a_map() {
    let json = r#"{ "max_level": 5, "probability": 0.25, "seed": 1 }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    let mut map: IndexedSkipMap<u32, u32> = IndexedSkipMap::with_config(&config).unwrap();
    map.extend((0..100).map(|k| (k, k)));
    assert_eq!(map.max_level(), 5);
    assert!(map.height() <= 5);
    map.verify().unwrap();
}

#[test]
fn parsed_invalid_config_is_rejected_at_construction() {
    let config: Config = serde_json::from_str(r#"{ "max_level": 100 }"#).unwrap();
    assert_eq!(
        IndexedSkipMap::<u32, u32>::with_config(&config).unwrap_err(),
        ConfigError::MaxLevelTooLarge { got: 100, limit: 64 }
    );
}

#[test]
fn config_survives_serialization() {
    let config = Config::default().with_max_level(9).with_probability(0.3).with_seed(77);
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn same_seed_same_shape() {
    let config = Config::default().with_seed(2024);
    let a: IndexedSkipMap<u32, ()> = {
        let mut map = IndexedSkipMap::with_config(&config).unwrap();
        map.extend((0..1000).map(|k| (k, ())));
        map
    };
    let b: IndexedSkipMap<u32, ()> = {
        let mut map = IndexedSkipMap::with_config(&config).unwrap();
        map.extend((0..1000).map(|k| (k, ())));
        map
    };
    assert_eq!(a.height(), b.height());
    assert_eq!(a, b);
}
