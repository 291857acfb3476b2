use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    assert_eq!(resolve_settings(None, env_from(&[])), Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let settings = resolve_settings(
        Some(
            r#"
bind_addr = "0.0.0.0:9000"
session_idle_ttl_seconds = 120
max_sessions = 5
"#,
        ),
        env_from(&[]),
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.session_idle_ttl_seconds, 120);
    assert_eq!(settings.max_sessions, 5);
    assert_eq!(settings.sweep_interval_seconds, 60);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let settings = resolve_settings(
        Some(r#"bind_addr = "0.0.0.0:9000""#),
        env_from(&[
            ("SCRAMBLE_BIND", "127.0.0.1:1111"),
            ("APP__BIND_ADDR", "127.0.0.1:2222"),
            ("APP__MAX_SESSIONS", "42"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2222");
    assert_eq!(settings.max_sessions, 42);
}

#[test]
fn bad_numbers_and_bad_files_are_ignored() {
    let settings = resolve_settings(
        Some("this is = = not toml"),
        env_from(&[("APP__SESSION_IDLE_TTL_SECONDS", "soon")]),
    );
    assert_eq!(settings, Settings::default());
}
