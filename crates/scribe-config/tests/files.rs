//! Loading configuration from files on disk.

use std::io::Write;

use scribe_config::{AuthKind, ConfigError, ConfigLoader, LogFormat};

fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn toml_file_is_loaded() {
    let file = write_file(
        ".toml",
        r#"
            [api]
            title = "Pet Store"
            description = """
                Manages pets.
                Also owners."""
            prefix = "/prefix"
            docs_url = "/ui"

            [[api.servers]]
            url = "https://pets.example.com"
            description = "production"

            [auth]
            scheme = "bearer"
            bearer_format = "JWT"

            [logging]
            format = "pretty"
        "#,
    );

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();

    assert_eq!(config.api.title, "Pet Store");
    assert_eq!(config.docs_path(), "/prefix/ui");
    assert_eq!(config.api.servers[0].description.as_deref(), Some("production"));
    assert_eq!(config.auth.scheme, AuthKind::Bearer);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.docs.enabled);
}

#[test]
fn json_file_is_loaded() {
    let file = write_file(".json", r#"{"docs": {"enabled": false}}"#);

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert!(!config.docs.enabled);
    assert_eq!(config.api.docs_url, "/docs");
}

#[test]
fn unsupported_extension_is_rejected() {
    let file = write_file(".yaml", "api: {}");
    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn optional_file_is_used_when_present() {
    let file = write_file(".toml", "[api]\nversion = \"3.0.0\"\n");
    let config = ConfigLoader::new()
        .with_optional_file(file.path())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(config.api.version, "3.0.0");
}

#[test]
fn invalid_file_values_fail_on_load() {
    let file = write_file(".toml", "[api]\ndocs_url = \"docs\"\n");
    let err = ConfigLoader::new()
        .with_file(file.path())
        .unwrap()
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("api.docs_url"));
}
