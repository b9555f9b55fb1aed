use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

use eve_sso_pkce::config::Config;

#[test]
fn config_from_path_parses_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    let toml = r#"
client_id = "abc123client"
redirect_uri = "http://localhost:9000/cb"
scopes = ["esi-mail.read_mail.v1", "publicData"]
log_dir = "/tmp"
"#;
    f.write_all(toml.as_bytes()).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.client_id, "abc123client");
    assert_eq!(cfg.redirect_uri, "http://localhost:9000/cb");
    assert_eq!(cfg.scopes, vec!["esi-mail.read_mail.v1", "publicData"]);
    assert_eq!(cfg.log_dir.unwrap().to_str().unwrap(), "/tmp");
}

#[test]
fn empty_config_uses_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    File::create(&cfg_path).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.client_id, "your_client_id");
    assert_eq!(cfg.redirect_uri, "http://localhost:8080/callback");
    assert!(cfg.scopes.is_empty());
    assert!(cfg.log_dir.is_none());
}

#[test]
fn invalid_toml_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    f.write_all(b"client_id = [not valid").unwrap();
    assert!(Config::from_path(&cfg_path).is_err());
    assert!(Config::from_path(&td.path().join("missing.toml")).is_err());
}

#[test]
fn endpoints_follow_auth_base() {
    let cfg = Config {
        auth_base: "http://127.0.0.1:1234/".into(),
        ..Config::new("id")
    };
    assert_eq!(cfg.authorize_url(), "http://127.0.0.1:1234/v2/oauth/authorize");
    assert_eq!(cfg.token_url(), "http://127.0.0.1:1234/v2/oauth/token");

    let default = Config::default();
    assert_eq!(default.token_url(), "https://login.eveonline.com/v2/oauth/token");
    assert_eq!(default.authorize_url(), "https://login.eveonline.com/v2/oauth/authorize");
}
