use clap::Parser;
use dupview::cli::{Cli, ThemeArg};
use dupview::config::{Config, ConfigError};
use figment::providers::{Format, Serialized, Toml};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = figment::Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config.endpoint, "http://localhost:8080/report");
    assert_eq!(config.theme, ThemeArg::Auto);
    assert!(!config.show_fetch_errors);
    assert_eq!(config.timeout(), None);
}

#[test]
fn test_config_load_from_env() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("DUPVIEW_SHOW_FETCH_ERRORS", "true");
        jail.set_env("DUPVIEW_TIMEOUT_SECS", "7");

        let config: Config = Config::figment(None).extract()?;
        assert!(config.show_fetch_errors);
        assert_eq!(config.timeout(), Some(Duration::from_secs(7)));
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            "endpoint = \"http://from-file/report\"\ntheme = \"light\"\n",
        )?;
        jail.set_env("DUPVIEW_ENDPOINT", "http://from-env/report");

        let config = Config::load(Some(Path::new("config.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(config.endpoint, "http://from-env/report");
        assert_eq!(config.theme, ThemeArg::Light);
        Ok(())
    });
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
endpoint = "http://scanner.local:9000/report"
theme = "light"
show_fetch_errors = true
timeout_secs = 15
"#;
    fs::write(&config_path, toml_content).unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    assert_eq!(config.endpoint, "http://scanner.local:9000/report");
    assert_eq!(config.theme, ThemeArg::Light);
    assert!(config.show_fetch_errors);
    assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    // Unset keys keep their defaults
    assert!(!config.ascii_borders);
}

#[test]
fn test_config_missing_explicit_file() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_config_invalid_value() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "theme = \"sepia\"\n").unwrap();

    let err = Config::load(Some(&config_path)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_cli_overrides_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "endpoint = \"http://from-file/report\"\ntheme = \"light\"\n",
    )
    .unwrap();

    let mut config = Config::load(Some(&config_path)).unwrap();
    let cli = Cli::try_parse_from([
        "dupview",
        "--endpoint",
        "http://from-cli/report",
        "--theme",
        "dark",
        "--timeout",
        "5",
    ])
    .unwrap();
    config.apply_cli(&cli);

    assert_eq!(config.endpoint, "http://from-cli/report");
    assert_eq!(config.theme, ThemeArg::Dark);
    assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn test_config_toml_reads_back() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let config = Config {
        endpoint: "http://elsewhere/report".to_string(),
        theme: ThemeArg::Dark,
        ascii_borders: true,
        show_fetch_errors: true,
        timeout_secs: Some(3),
    };
    fs::write(&config_path, config.to_toml().unwrap()).unwrap();

    let figment = figment::Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path));
    let loaded: Config = figment.extract().unwrap();
    assert_eq!(loaded, config);
}
