#![allow(clippy::unwrap_used)]
// Integration tests for config loading and saving.

use figment::Jail;
use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;

use depot_config::{Config, Profile, load_config_from, resolve_token, save_config_to};

fn sample() -> Config {
    let mut cfg = Config::default();
    cfg.profiles.insert(
        "default".into(),
        Profile {
            server: "https://wms.example.com/api/v1".into(),
            api_token_env: Some("DEPOT_TEST_TOKEN".into()),
            page_size: Some(50),
            ..Profile::default()
        },
    );
    cfg
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    save_config_to(&sample(), &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[profiles.default]"));
    assert!(!text.contains("api_token ="));

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_env_overrides_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                default_profile = "prod"

                [defaults]
                output = "table"

                [profiles.prod]
                server = "https://wms.example.com"
            "#,
        )?;
        jail.set_env("DEPOT_DEFAULTS__OUTPUT", "json");

        let cfg = load_config_from(&jail.directory().join("config.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.default_profile.as_deref(), Some("prod"));
        assert_eq!(cfg.profiles["prod"].server, "https://wms.example.com");
        Ok(())
    });
}

#[test]
fn test_token_env_var_comes_first() {
    Jail::expect_with(|jail| {
        jail.set_env("DEPOT_TEST_TOKEN", "from-env");
        let profile = Profile {
            server: "https://wms.example.com".into(),
            api_token: Some("from-file".into()),
            api_token_env: Some("DEPOT_TEST_TOKEN".into()),
            ..Profile::default()
        };
        let token = resolve_token(&profile, "config-test-env").unwrap();
        assert_eq!(token.expose_secret(), "from-env");
        Ok(())
    });
}
