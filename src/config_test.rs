use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = config_from(&[]);
    assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert!(cfg.static_dir.ends_with("static"));
    assert_eq!(cfg.scale_device, None);
    assert_eq!(cfg.scale_read_size, 7);
    assert!((cfg.scale_fallback_weight - 10.0).abs() < f64::EPSILON);
    assert_eq!(cfg.updates_capacity, DEFAULT_UPDATES_CHANNEL_CAPACITY);
}

#[test]
fn overrides_are_parsed() {
    let cfg = config_from(&[
        ("DATABASE_URL", "sqlite::memory:"),
        ("PORT", "9100"),
        ("DB_MAX_CONNECTIONS", "2"),
        ("STATIC_DIR", "/srv/static"),
        ("SCALE_DEVICE", "/dev/ttyUSB0"),
        ("SCALE_READ_SIZE", "9"),
        ("SCALE_FALLBACK_WEIGHT", "2.5"),
        ("UPDATES_CHANNEL_CAPACITY", "8"),
    ]);
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.db_max_connections, 2);
    assert_eq!(cfg.static_dir, PathBuf::from("/srv/static"));
    assert_eq!(cfg.scale_device, Some(PathBuf::from("/dev/ttyUSB0")));
    assert_eq!(cfg.scale_read_size, 9);
    assert!((cfg.scale_fallback_weight - 2.5).abs() < f64::EPSILON);
    assert_eq!(cfg.updates_capacity, 8);
}

#[test]
fn invalid_numbers_fall_back_to_defaults() {
    let cfg = config_from(&[("PORT", "not-a-port"), ("SCALE_READ_SIZE", "-1"), ("SCALE_FALLBACK_WEIGHT", "heavy")]);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.scale_read_size, DEFAULT_SCALE_READ_SIZE);
    assert!((cfg.scale_fallback_weight - DEFAULT_SCALE_FALLBACK_WEIGHT).abs() < f64::EPSILON);
}

#[test]
fn blank_values_count_as_unset() {
    let cfg = config_from(&[("SCALE_DEVICE", "  "), ("DATABASE_URL", "")]);
    assert_eq!(cfg.scale_device, None);
    assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
}
