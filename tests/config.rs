use std::io::Write;

use gym_api_gateway::{ApiClient, Config, ConfigLocation, Error};
use serde_json::json;

#[test]
fn invalid_base_url_fails_fast() {
    let cfg = Config::from_values("http://exa mple.com", None, None, None);

    let err = match ApiClient::new(cfg) {
        Ok(_) => panic!("expected invalid URL error"),
        Err(err) => err,
    };

    match err {
        Error::Config(msg) => assert!(msg.contains("Invalid base URL")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn loads_from_file_location() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let raw = json!({
        "base_url": "http://localhost:8000",
        "api_prefix": "/v1",
        "timeout_secs": 5,
        "log_traffic": false,
    });
    write!(file, "{}", raw).unwrap();

    let cfg = Config::load(ConfigLocation::File(
        file.path().to_string_lossy().to_string(),
    ))
    .expect("config");

    assert_eq!(cfg.api_root().unwrap(), "http://localhost:8000/v1");
    assert_eq!(cfg.login_route, "/login");
    assert_eq!(cfg.timeout(), Some(std::time::Duration::from_secs(5)));
    assert!(!cfg.log_traffic);
}

#[test]
fn missing_base_url_in_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"api_prefix": "/v1"}}"#).unwrap();

    assert!(matches!(Config::from_file(file.path()), Err(Error::Config(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        Config::from_file("/definitely/not/here.json"),
        Err(Error::Io(_))
    ));
}
