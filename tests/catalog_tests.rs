//! Shape catalogs imported from JSON, and JSON configuration files.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;

use blockfall::core::{
    load_catalog_file, parse_catalog, registry_from_templates, ConfigError, GameConfig,
    MovementManager, RegistryError, SelectionPolicy, SetupError, ShapeRegistry,
};
use blockfall::types::Intent;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("blockfall-{}-{name}", std::process::id()))
}

fn sequence(ids: &[&str]) -> GameConfig {
    GameConfig {
        selection: SelectionPolicy::Sequence(ids.iter().map(|s| s.to_string()).collect()),
        ..GameConfig::default()
    }
}

#[test]
fn test_imported_shapes_are_playable() {
    let catalog = json!([
        { "id": "bar", "orientations": [[[1, 1, 1]], [[1], [1], [1]]] },
        { "id": "dot", "offsets": [[[0, 0]]] },
    ]);
    let registry = registry_from_templates(parse_catalog(&catalog.to_string()).unwrap()).unwrap();
    assert_eq!(registry.len(), 2);

    let mut manager = MovementManager::new(&sequence(&["bar", "dot"]), Arc::new(registry)).unwrap();
    let active = manager.snapshot().active.unwrap();
    assert_eq!(active.shape.as_str(), "bar");
    assert_eq!(active.anchor, (0, 3));

    assert!(manager.apply(Intent::HardDrop));
    let snap = manager.snapshot();
    assert_eq!(snap.to_rows()[19], "...###....");
    assert_eq!(snap.active.unwrap().shape.as_str(), "dot");

    assert!(manager.apply(Intent::RotateCw));
    assert!(manager.apply(Intent::HardDrop));
    assert_eq!(manager.snapshot().to_rows()[18], "....#.....");
}

#[test]
fn test_duplicate_identity_is_rejected() {
    let templates = parse_catalog(
        &json!([
            { "id": "dot", "offsets": [[[0, 0]]] },
            { "id": "dot", "offsets": [[[0, 0], [0, 1]]] },
        ])
        .to_string(),
    )
    .unwrap();
    match registry_from_templates(templates) {
        Err(RegistryError::DuplicateShape(id)) => assert_eq!(id.as_str(), "dot"),
        other => panic!("expected duplicate error, got {other:?}"),
    }
}

#[test]
fn test_far_offsets_are_rejected() {
    let templates = parse_catalog(
        &json!([{ "id": "far", "offsets": [[[0, 0]], [[-32768, 0], [0, 32767]]] }]).to_string(),
    )
    .unwrap();
    match registry_from_templates(templates) {
        Err(RegistryError::OffsetOutOfRange { id, index, offset }) => {
            assert_eq!(id.as_str(), "far");
            assert_eq!(index, 1);
            assert_eq!(offset, (-32768, 0));
        }
        other => panic!("expected offset error, got {other:?}"),
    }
}

#[test]
fn test_shape_wider_than_field_fails_setup() {
    let row = vec![1u8; 12];
    let templates =
        parse_catalog(&json!([{ "id": "long", "orientations": [[row]] }]).to_string()).unwrap();
    let registry = Arc::new(registry_from_templates(templates).unwrap());
    let err = MovementManager::new(&sequence(&["long"]), registry).unwrap_err();
    assert!(matches!(
        err,
        SetupError::Registry(RegistryError::ShapeTooWide { width: 12, field_width: 10, .. })
    ));
}

#[test]
fn test_catalog_file_round_trip() {
    let path = temp_path("catalog.json");
    std::fs::write(&path, json!([{ "id": "pair", "offsets": [[[0, 0], [0, 1]]] }]).to_string())
        .unwrap();
    let templates = load_catalog_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let registry = registry_from_templates(templates).unwrap();
    let shape = registry.by_index(0).unwrap();
    assert_eq!(shape.id().as_str(), "pair");
    assert_eq!(shape.tag(), 1);
    assert_eq!(shape.offsets(0), &[(0, 0), (0, 1)]);
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let err = load_catalog_file(temp_path("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_catalog_is_parse_error() {
    let path = temp_path("broken.json");
    std::fs::write(&path, "[{ \"id\": 3 }]").unwrap();
    let err = load_catalog_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_config_file_takes_defaults_for_missing_keys() {
    let path = temp_path("config.json");
    let text = json!({
        "field_width": 12,
        "selection": { "sequence": ["I", "O"] },
        "speed": { "lines_per_level": 5 },
    });
    std::fs::write(&path, text.to_string()).unwrap();
    let config = GameConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.field_width, 12);
    assert_eq!(config.field_height, 20);
    assert_eq!(config.speed.lines_per_level, 5);
    assert_eq!(config.speed.step_ms, 75);
    assert_eq!(
        config.selection,
        SelectionPolicy::Sequence(vec!["I".into(), "O".into()])
    );
    assert!(config.validate().is_ok());

    let manager = MovementManager::new(&config, Arc::new(ShapeRegistry::with_presets())).unwrap();
    assert_eq!(manager.snapshot().width, 12);
}

#[test]
fn test_invalid_config_fails_setup() {
    let config = GameConfig {
        field_height: 0,
        ..GameConfig::default()
    };
    let err = MovementManager::new(&config, Arc::new(ShapeRegistry::with_presets())).unwrap_err();
    assert!(matches!(
        err,
        SetupError::Config(ConfigError::InvalidDimensions { height: 0, .. })
    ));

    let tall = GameConfig {
        field_height: 40_000,
        ..GameConfig::default()
    };
    let err = MovementManager::new(&tall, Arc::new(ShapeRegistry::with_presets())).unwrap_err();
    assert!(matches!(
        err,
        SetupError::Config(ConfigError::InvalidDimensions { height: 40_000, .. })
    ));
}
