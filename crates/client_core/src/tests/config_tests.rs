use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(tag: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("taximeter_config_test_{tag}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("taximeter.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_yields_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/taximeter.toml"), no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.poll_interval(), Duration::from_millis(2000));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "file",
        "server_url = \"http://taxi.local:8080/\"\npoll_interval_ms = 500\n",
    );
    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.server_url, "http://taxi.local:8080");
    assert_eq!(settings.poll_interval_ms, 500);
    assert_eq!(settings.request_timeout_secs, 10);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_invalid_numbers_are_ignored() {
    let path = temp_config("env", "poll_interval_ms = 500\nrequest_timeout_secs = 3\n");
    let env_vars: HashMap<&str, &str> = HashMap::from([
        ("TAXIMETER_SERVER_URL", "http://10.0.0.2:5000"),
        ("TAXIMETER_POLL_INTERVAL_MS", "750"),
        ("TAXIMETER_REQUEST_TIMEOUT_SECS", "soon"),
    ]);
    let settings = load_settings_from(&path, |key| env_vars.get(key).map(|v| v.to_string()));
    assert_eq!(settings.server_url, "http://10.0.0.2:5000");
    assert_eq!(settings.poll_interval_ms, 750);
    assert_eq!(settings.request_timeout_secs, 3);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unparsable_file_and_zero_interval_fall_back_to_defaults() {
    let path = temp_config("bad", "poll_interval_ms = \"fast\"");
    assert_eq!(load_settings_from(&path, no_env), Settings::default());
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");

    let settings = load_settings_from(Path::new("/nonexistent/taximeter.toml"), |key| {
        (key == "TAXIMETER_POLL_INTERVAL_MS").then(|| "0".to_string())
    });
    assert_eq!(settings.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
}
