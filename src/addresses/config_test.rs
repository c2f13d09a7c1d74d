//! Tests for address service configuration / 地址服务配置测试

#[cfg(test)]
mod tests {
    use super::super::config::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Point the home lookup at an empty directory / 将主目录查找指向空目录
    fn isolated_home() -> TempDir {
        let home = tempdir().unwrap();
        std::env::set_var("GEO_ADDRESSES_HOME", home.path());
        home
    }

    #[test]
    fn test_app_config_default() {
        // Test default AppConfig / 测试默认AppConfig
        let config = AppConfig::default();

        assert_eq!(config.http.addr.to_string(), "127.0.0.1:8000");
        assert_eq!(config.http.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.validation.min_label_length, 10);
        assert_eq!(config.validation.max_label_length, 255);
    }

    #[test]
    #[serial]
    fn test_load_with_cli_no_config_file() {
        // Test loading config without config file / 测试无配置文件时的配置加载
        let _home = isolated_home();
        let args = CliArgs {
            http_addr: Some("127.0.0.1:8081".to_string()),
            db_type: Some("sled".to_string()),
            db_path: Some("./test-data".to_string()),
            log_level: Some("debug".to_string()),
            min_label_length: Some(3),
            allowed_origins: vec!["https://maps.example.com".to_string()],
            ..Default::default()
        };

        let config = AppConfig::load_with_cli(&args).unwrap();
        assert_eq!(config.http.addr.to_string(), "127.0.0.1:8081");
        assert_eq!(config.storage.backend, "sled");
        assert_eq!(config.storage.path, "./test-data");
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.validation.min_label_length, 3);
        assert_eq!(config.validation.max_label_length, 255);
        assert_eq!(config.http.allowed_origins, vec!["https://maps.example.com"]);
    }

    #[test]
    #[serial]
    fn test_load_with_cli_from_file() {
        // Test loading config from an explicit file / 测试从指定文件加载配置
        let _home = isolated_home();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[http]
addr = "0.0.0.0:9000"
request_timeout_secs = 5

[storage]
backend = "sled"
path = "/var/lib/geo-addresses"

[validation]
min_label_length = 2
"#,
        )
        .unwrap();

        let args = CliArgs {
            config: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        };
        let config = AppConfig::load_with_cli(&args).unwrap();

        assert_eq!(config.http.addr.to_string(), "0.0.0.0:9000");
        assert_eq!(config.http.request_timeout_secs, 5);
        // Unspecified fields keep defaults / 未指定字段保留默认值
        assert_eq!(config.http.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.storage.backend, "sled");
        assert_eq!(config.storage.path, "/var/lib/geo-addresses");
        assert_eq!(config.validation.min_label_length, 2);
        assert_eq!(config.validation.max_label_length, 255);
    }

    #[test]
    #[serial]
    fn test_cli_overrides_file() {
        let _home = isolated_home();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log]\nlevel = \"warn\"\n").unwrap();

        let args = CliArgs {
            config: Some(path.to_string_lossy().to_string()),
            log_level: Some("trace".to_string()),
            ..Default::default()
        };
        let config = AppConfig::load_with_cli(&args).unwrap();
        assert_eq!(config.log.level, "trace");
    }

    #[test]
    #[serial]
    fn test_home_config_is_used_without_explicit_file() {
        let home = isolated_home();
        let config_dir = home.path().join(".geo-addresses");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[validation]\nmax_label_length = 64\n",
        )
        .unwrap();

        let config = AppConfig::load_with_cli(&CliArgs::default()).unwrap();
        assert_eq!(config.validation.max_label_length, 64);
    }

    #[test]
    #[serial]
    fn test_explicit_file_layers_over_home_config() {
        let home = isolated_home();
        let config_dir = home.path().join(".geo-addresses");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[validation]\nmax_label_length = 64\nmin_label_length = 3\n",
        )
        .unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("override.toml");
        fs::write(&path, "[validation]\nmax_label_length = 32\n").unwrap();

        let args = CliArgs {
            config: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        };
        let config = AppConfig::load_with_cli(&args).unwrap();
        assert_eq!(config.validation.max_label_length, 32);
        assert_eq!(config.validation.min_label_length, 3);
    }

    #[test]
    #[serial]
    fn test_missing_config_file_falls_back_to_defaults() {
        let _home = isolated_home();
        let args = CliArgs {
            config: Some("/nonexistent/geo-addresses.toml".to_string()),
            ..Default::default()
        };
        let config = AppConfig::load_with_cli(&args).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _home = isolated_home();
        std::env::set_var("GEO_ADDRESSES_STORAGE__BACKEND", "rocksdb");
        std::env::set_var("GEO_ADDRESSES_VALIDATION__MIN_LABEL_LENGTH", "4");

        let result = AppConfig::load_with_cli(&CliArgs::default());

        std::env::remove_var("GEO_ADDRESSES_STORAGE__BACKEND");
        std::env::remove_var("GEO_ADDRESSES_VALIDATION__MIN_LABEL_LENGTH");

        let config = result.unwrap();
        assert_eq!(config.storage.backend, "rocksdb");
        assert_eq!(config.validation.min_label_length, 4);
    }

    #[test]
    #[serial]
    fn test_inverted_label_bounds_rejected() {
        let _home = isolated_home();
        let args = CliArgs {
            min_label_length: Some(50),
            max_label_length: Some(20),
            ..Default::default()
        };
        let err = AppConfig::load_with_cli(&args).unwrap_err();
        assert!(err.to_string().contains("min_label_length"));
    }

    #[test]
    #[serial]
    fn test_invalid_http_addr_rejected() {
        let _home = isolated_home();
        let args = CliArgs {
            http_addr: Some("not-an-addr".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::load_with_cli(&args).is_err());
    }

    #[test]
    fn test_cli_args_parse() {
        use clap::Parser;

        let args = CliArgs::try_parse_from([
            "geo-addresses",
            "--http-addr",
            "0.0.0.0:8000",
            "--allowed-origin",
            "http://a.example",
            "--allowed-origin",
            "http://b.example",
            "--min-label-length",
            "1",
        ])
        .unwrap();

        assert_eq!(args.http_addr.as_deref(), Some("0.0.0.0:8000"));
        assert_eq!(args.allowed_origins.len(), 2);
        assert_eq!(args.min_label_length, Some(1));
        assert!(args.config.is_none());
    }
}
