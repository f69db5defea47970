#[cfg(test)]
mod config_tests {
    use std::env;
    use table_bench::config::{BenchConfig, CONFIG_PATH_ENV};
    use table_bench::services::BenchError;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench.json");
        std::fs::write(&path, r#"{ "row_count": 5000, "seed": 9 }"#).unwrap();

        let config = BenchConfig::load_from_path(&path).unwrap();
        assert_eq!(config.row_count, 5000);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.overscan, 20);
        assert_eq!(config.row_height_px, 35.0);
        assert!(config.sync_search_to_url);
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved.json");

        let config = BenchConfig {
            row_count: 250,
            overscan: 5,
            viewport_height_px: 420.0,
            seed: Some(1234),
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(BenchConfig::load_from_path(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_reports_its_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        match BenchConfig::load_from_path(&path) {
            Err(BenchError::ConfigIo { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected ConfigIo error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = BenchConfig::from_json_str("{ row_count: }").unwrap_err();
        assert!(matches!(err, BenchError::ConfigParse(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = BenchConfig::from_json_str(r#"{ "row_height_px": 0 }"#).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { ref field, .. } if field == "row_height_px"));

        let err = BenchConfig::from_json_str(r#"{ "age_span": 0 }"#).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { ref field, .. } if field == "age_span"));

        let err = BenchConfig::from_json_str(r#"{ "registered_span_ms": -1 }"#).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { .. }));

        let err = BenchConfig::from_json_str(r#"{ "registered_span_ms": 10000000000000000 }"#)
            .unwrap_err();
        assert!(
            matches!(err, BenchError::InvalidConfig { ref field, .. } if field == "registered_span_ms")
        );
    }

    // The only test in this binary that touches the environment
    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.json");
        std::fs::write(&path, r#"{ "row_count": 10, "overscan": 3 }"#).unwrap();

        unsafe {
            env::set_var(CONFIG_PATH_ENV, &path);
            env::set_var("TABLE_BENCH_ROWS", "42");
        }
        let loaded = BenchConfig::from_env();
        unsafe {
            env::remove_var(CONFIG_PATH_ENV);
            env::remove_var("TABLE_BENCH_ROWS");
        }

        let config = loaded.unwrap();
        assert_eq!(config.row_count, 42);
        assert_eq!(config.overscan, 3);
    }
}
