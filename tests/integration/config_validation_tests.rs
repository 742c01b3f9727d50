//! Configuration loading tests

#[cfg(test)]
mod tests {
    use account_checker_rs::config::{VerificationMode, Validate};
    use account_checker_rs::server::builder::{ConfigSource, load_config};
    use account_checker_rs::{CheckerError, Config};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let (config, source) = load_config("/no/such/checker.yaml").await.unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            source,
            ConfigSource::Environment("/no/such/checker.yaml".into())
        );
    }

    #[tokio::test]
    async fn test_existing_file_is_reported_as_source() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server:\n  port: 9090\n").unwrap();

        let (config, source) = load_config(file.path()).await.unwrap();
        assert_eq!(config.server().port, 9090);
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_broken_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server: [not, a, map]\n").unwrap();

        let result = load_config(file.path()).await;
        assert!(matches!(result, Err(CheckerError::Config(_))));
    }

    #[tokio::test]
    async fn test_remote_mode_requires_endpoint() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"verification:\n  mode: remote\n").unwrap();
        assert!(Config::from_file(file.path()).await.is_err());

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"verification:\n  mode: remote\n  endpoint: \"https://verify.example.com/login\"\n")
            .unwrap();
        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.verification().mode, VerificationMode::Remote);
    }

    #[test]
    fn test_sections_validate_independently() {
        let mut config = Config::default();
        config.checker.events.observer_buffer = 0;
        assert!(config.checker.events.validate().is_err());
        assert!(config.checker.batch.validate().is_ok());
        assert!(config.validate().is_err());
    }
}
