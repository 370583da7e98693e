#[cfg(test)]
mod tests {
    use nag::libs::config::{Config, NotifyConfig, ServerConfig, CONFIG_FILE_NAME};
    use nag::libs::data_storage::DataStorage;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Test context to ensure a clean environment for the config test.
    /// It sets up a temporary directory to act as the user's home/appdata
    /// directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            // Mock the home/appdata directory for cross-platform compatibility.
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    // The whole lifecycle lives in one test: the data directory comes from
    // process-global environment variables, and parallel tests would race
    // on them.
    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_lifecycle(_ctx: &mut ConfigTestContext) {
        // No file yet: read() falls back to a default with no sections.
        let config = Config::read().unwrap();
        assert!(config.server.is_none());
        assert!(config.notify.is_none());

        // Defaults carry the documented values.
        let notify = NotifyConfig::default();
        assert_eq!(notify.poll_interval, 10);
        assert_eq!(notify.cache_ttl, 60);
        assert_eq!(notify.day_offset_hours, 4);
        assert!(notify.hourly_checkin);
        assert_eq!(ServerConfig::default().url, "http://localhost:5600");

        // Save and read a populated config back.
        let config = Config {
            server: Some(ServerConfig {
                url: "http://localhost:5666".to_string(),
            }),
            notify: Some(NotifyConfig {
                poll_interval: 30,
                ..Default::default()
            }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.server, config.server);
        assert_eq!(loaded.notify, config.notify);

        // Partial sections fill the missing fields from defaults.
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, r#"{ "notify": { "day_offset_hours": 6 } }"#).unwrap();
        let loaded = Config::read().unwrap();
        let notify = loaded.notify.unwrap();
        assert_eq!(notify.day_offset_hours, 6);
        assert_eq!(notify.poll_interval, 10);
        assert!(loaded.server.is_none());

        // A file that exists but does not parse is an error, not a default.
        std::fs::write(&path, "{ broken").unwrap();
        assert!(Config::read().is_err());
    }
}
