use std::collections::HashMap;

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn missing_config_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_with(&dir.path().join("greenkaki.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.reply_delay_ms, 1000);
    assert_eq!(settings.round_size, 5);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("greenkaki.toml");
    fs::write(
        &config_path,
        "data_path = \"data/recycling.toml\"\nreply_delay_ms = 250\nround_size = 3\nmin_confidence = 0.7\n",
    )
    .expect("write config");

    let settings = load_settings_with(&config_path, env_from(&[]));
    assert_eq!(
        settings.data_path,
        Some(dir.path().join("data/recycling.toml"))
    );
    assert_eq!(settings.reply_delay_ms, 250);
    assert_eq!(settings.round_size, 3);
    assert_eq!(settings.min_confidence, 0.7);
}

#[test]
fn environment_overrides_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("greenkaki.toml");
    fs::write(&config_path, "reply_delay_ms = 250\nround_size = 3\n").expect("write config");

    let settings = load_settings_with(
        &config_path,
        env_from(&[
            ("GREENKAKI_DATA", "/srv/a.toml"),
            ("APP__DATA_PATH", "/srv/b.toml"),
            ("APP__REPLY_DELAY_MS", "0"),
            ("APP__ROUND_SIZE", "7"),
        ]),
    );
    assert_eq!(settings.data_path, Some(PathBuf::from("/srv/b.toml")));
    assert_eq!(settings.reply_delay_ms, 0);
    assert_eq!(settings.round_size, 7);
}

#[test]
fn invalid_values_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("greenkaki.toml");
    fs::write(&config_path, "round_size = 0\nmin_confidence = 3.0\n").expect("write config");

    let settings = load_settings_with(
        &config_path,
        env_from(&[
            ("APP__REPLY_DELAY_MS", "soon"),
            ("APP__ROUND_SIZE", "0"),
            ("APP__MIN_CONFIDENCE", "-1"),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn unparseable_config_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("greenkaki.toml");
    fs::write(&config_path, "reply_delay = [").expect("write config");

    let settings = load_settings_with(&config_path, env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn bad_value_keeps_the_rest_of_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("greenkaki.toml");
    fs::write(
        &config_path,
        "data_path = \"mydata.toml\"\nreply_delay_ms = 250\nround_size = -1\nmin_confidence = \"high\"\n",
    )
    .expect("write config");

    let settings = load_settings_with(&config_path, env_from(&[]));
    assert_eq!(settings.data_path, Some(dir.path().join("mydata.toml")));
    assert_eq!(settings.reply_delay_ms, 250);
    assert_eq!(settings.round_size, 5);
    assert_eq!(settings.min_confidence, 0.5);
}

#[test]
fn unknown_key_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("greenkaki.toml");
    fs::write(&config_path, "data_path = \"mydata.toml\"\nreply_dealy_ms = 250\n")
        .expect("write config");

    let settings = load_settings_with(&config_path, env_from(&[]));
    assert_eq!(settings.data_path, Some(dir.path().join("mydata.toml")));
    assert_eq!(settings.reply_delay_ms, 1000);
}

#[test]
fn integer_min_confidence_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("greenkaki.toml");
    fs::write(&config_path, "min_confidence = 1\n").expect("write config");

    let settings = load_settings_with(&config_path, env_from(&[]));
    assert_eq!(settings.min_confidence, 1.0);
}

#[test]
fn absolute_data_path_is_kept() {
    assert_eq!(
        resolve_relative_to(Path::new("/etc/greenkaki.toml"), PathBuf::from("/data/x.toml")),
        PathBuf::from("/data/x.toml")
    );
    assert_eq!(
        resolve_relative_to(Path::new("greenkaki.toml"), PathBuf::from("x.toml")),
        PathBuf::from("x.toml")
    );
}

#[test]
fn chat_options_follow_settings() {
    let settings = Settings {
        reply_delay_ms: 40,
        min_confidence: 0.25,
        ..Settings::default()
    };
    let options = settings.chat_options();
    assert_eq!(options.reply_delay, Duration::from_millis(40));
    assert_eq!(options.min_confidence, 0.25);
}
