use atlas_domain::config::ApiConfig;

#[test]
fn defaults_are_usable_without_any_file() {
    let cfg = ApiConfig::default();

    assert_eq!(cfg.server.port, 4680);
    assert!(cfg.server.ssl.is_none());
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.database.namespace, "atlas");
    assert_eq!(cfg.database.database, "core");
    assert!(cfg.database.credentials.is_none());
}

#[test]
fn partial_json_overlays_defaults() {
    let cfg: ApiConfig =
        serde_json::from_str(r#"{"server":{"port":9000},"database":{"url":"ws://db:8000"}}"#)
            .expect("partial config should deserialize");

    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.database.url, "ws://db:8000");
    // Untouched sections keep their defaults.
    assert_eq!(cfg.database.namespace, "atlas");
}

#[test]
fn mutation_through_deref_copies_on_write() {
    let base = ApiConfig::default();
    let mut copy = base.clone();
    copy.server.port = 1234;

    assert_eq!(base.server.port, 4680);
    assert_eq!(copy.server.port, 1234);
}
