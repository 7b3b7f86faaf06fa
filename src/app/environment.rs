//! Loads [`FirebaseOptions`] from the process environment.

use std::env;
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde_json::{Map, Value};

use crate::app::errors::{AppError, AppResult};
use crate::app::types::FirebaseOptions;

const CONFIG_VAR: &str = "FIREBASE_CONFIG";

impl FirebaseOptions {
    /// Reads options from `FIREBASE_CONFIG` and the per-field `FIREBASE_*` variables.
    ///
    /// `FIREBASE_CONFIG` may hold a JSON object, a path to a JSON file, or a
    /// `apiKey=...,projectId=...` list. Per-field variables override it. The
    /// result is not validated; [`crate::app::initialize_app`] does that.
    pub fn from_env() -> AppResult<Self> {
        options_from_lookup(|name| env::var(name).ok())
    }
}

pub(crate) fn options_from_lookup<F>(lookup: F) -> AppResult<FirebaseOptions>
where
    F: Fn(&str) -> Option<String>,
{
    let base: FirebaseOptions = match lookup(CONFIG_VAR) {
        Some(raw) => {
            let map = parse_config_source(&raw).ok_or_else(|| AppError::InvalidConfigSource {
                message: format!("{CONFIG_VAR} is neither a JSON object, a JSON file nor a key=value list"),
            })?;
            serde_json::from_value(Value::Object(map)).map_err(|err| AppError::InvalidConfigSource {
                message: err.to_string(),
            })?
        }
        None => FirebaseOptions::default(),
    };

    let overrides = FirebaseOptions {
        api_key: lookup("FIREBASE_API_KEY"),
        auth_domain: lookup("FIREBASE_AUTH_DOMAIN"),
        project_id: lookup("FIREBASE_PROJECT_ID"),
        storage_bucket: lookup("FIREBASE_STORAGE_BUCKET"),
        messaging_sender_id: lookup("FIREBASE_MESSAGING_SENDER_ID"),
        app_id: lookup("FIREBASE_APP_ID"),
        measurement_id: lookup("FIREBASE_MEASUREMENT_ID"),
    };
    Ok(base.merge(overrides))
}

fn parse_config_source(raw: &str) -> Option<Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
        return Some(map);
    }

    if let Some(path) = treat_as_path(raw) {
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&contents) {
                return Some(map);
            }
        }
    }

    parse_key_value_config(raw)
}

#[cfg(not(target_arch = "wasm32"))]
fn treat_as_path(raw: &str) -> Option<String> {
    if raw.contains('=') {
        return None;
    }
    let trimmed = raw.trim();
    if Path::new(trimmed).exists() {
        Some(trimmed.to_string())
    } else {
        None
    }
}

#[cfg(target_arch = "wasm32")]
fn treat_as_path(_raw: &str) -> Option<String> {
    None
}

fn parse_key_value_config(raw: &str) -> Option<Map<String, Value>> {
    let mut map = Map::new();
    for entry in raw.split(',') {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn parses_key_value_configs() {
        let map = parse_key_value_config("apiKey=foo,projectId=my-proj").unwrap();
        assert_eq!(map.get("apiKey").unwrap().as_str(), Some("foo"));
        assert_eq!(map.get("projectId").unwrap().as_str(), Some("my-proj"));
    }

    #[test]
    fn key_value_configs_skip_empty_entries() {
        let trailing = parse_key_value_config("apiKey=foo,projectId=bar,").unwrap();
        assert_eq!(trailing.len(), 2);
        assert_eq!(trailing["projectId"], "bar");

        let doubled = parse_key_value_config("apiKey=foo,,projectId=bar").unwrap();
        assert_eq!(doubled.len(), 2);
        assert_eq!(doubled["apiKey"], "foo");
    }

    #[test]
    fn from_env_accepts_trailing_comma_in_key_value_config() {
        let options = options_from_lookup(lookup_from(&[(
            "FIREBASE_CONFIG",
            "apiKey=foo,projectId=bar,",
        )]))
        .unwrap();
        assert_eq!(options.api_key.as_deref(), Some("foo"));
        assert_eq!(options.project_id.as_deref(), Some("bar"));
        assert_eq!(options.auth_domain, None);
    }

    #[test]
    fn parse_config_source_accepts_files_and_json() {
        let json = parse_config_source("{\"apiKey\":\"foo\"}").unwrap();
        assert_eq!(json["apiKey"], "foo");

        let mut path = std::env::temp_dir();
        path.push(format!(
            "firebase_auth_facade_test_{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::write(&path, "{\"projectId\":\"demo\"}").unwrap();
        let path_str = path.to_string_lossy().to_string();
        let file_json = parse_config_source(&path_str).unwrap();
        assert_eq!(file_json["projectId"], "demo");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn field_variables_override_config_source() {
        let options = options_from_lookup(lookup_from(&[
            (
                "FIREBASE_CONFIG",
                r#"{"apiKey":"from-json","projectId":"demo","appId":"1:2:web:3"}"#,
            ),
            ("FIREBASE_API_KEY", "from-var"),
            ("FIREBASE_AUTH_DOMAIN", "demo.firebaseapp.com"),
        ]))
        .unwrap();

        assert_eq!(options.api_key.as_deref(), Some("from-var"));
        assert_eq!(options.project_id.as_deref(), Some("demo"));
        assert_eq!(options.auth_domain.as_deref(), Some("demo.firebaseapp.com"));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn empty_environment_yields_empty_options() {
        let options = options_from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(options, FirebaseOptions::default());
    }

    #[test]
    fn unreadable_config_source_is_rejected() {
        let result = options_from_lookup(lookup_from(&[("FIREBASE_CONFIG", "not a config")]));
        assert!(matches!(result, Err(AppError::InvalidConfigSource { .. })));
    }
}
