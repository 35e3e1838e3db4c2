use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "live_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSettings {
    /// Value written to the `channel` header of every response and event.
    pub channel: String,
    pub timestamp_events: bool,
}

impl Default for AnswerSettings {
    fn default() -> Self {
        Self {
            channel: "live".into(),
            timestamp_events: true,
        }
    }
}

/// Flags may be written as TOML booleans or as strings such as `"off"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(raw) => parse_flag(raw),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileSettings {
    channel: Option<String>,
    timestamp_events: Option<FlagValue>,
}

impl FileSettings {
    fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    fn apply_to(self, settings: &mut AnswerSettings) {
        if let Some(v) = self.channel {
            settings.channel = v;
        }
        if let Some(parsed) = self.timestamp_events.as_ref().and_then(FlagValue::as_bool) {
            settings.timestamp_events = parsed;
        }
    }
}

pub fn load_settings() -> AnswerSettings {
    let mut settings = AnswerSettings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        match FileSettings::parse(&raw) {
            Ok(file_cfg) => file_cfg.apply_to(&mut settings),
            Err(err) => warn!(file = SETTINGS_FILE, error = %err, "ignoring unparsable settings"),
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub fn load_settings_file(path: &Path) -> anyhow::Result<AnswerSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let file_cfg = FileSettings::parse(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;

    let mut settings = AnswerSettings::default();
    file_cfg.apply_to(&mut settings);
    Ok(settings)
}

pub fn load_settings_from(
    raw_toml: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> AnswerSettings {
    let mut settings = AnswerSettings::default();

    if let Some(raw) = raw_toml {
        match FileSettings::parse(raw) {
            Ok(file_cfg) => file_cfg.apply_to(&mut settings),
            Err(err) => warn!(error = %err, "ignoring unparsable settings"),
        }
    }

    apply_env(&mut settings, env);
    settings
}

fn apply_env(settings: &mut AnswerSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("LIVE_CHANNEL") {
        settings.channel = v;
    }
    if let Some(v) = env("APP__CHANNEL") {
        settings.channel = v;
    }

    if let Some(v) = env("APP__TIMESTAMP_EVENTS") {
        if let Some(parsed) = parse_flag(&v) {
            settings.timestamp_events = parsed;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let settings = load_settings_from(None, |_| None);
        assert_eq!(settings, AnswerSettings::default());
        assert_eq!(settings.channel, "live");
        assert!(settings.timestamp_events);
    }

    #[test]
    fn file_values_apply_and_env_wins() {
        let raw = "channel = \"twin\"\ntimestamp_events = \"false\"\n";

        let from_file = load_settings_from(Some(raw), |_| None);
        assert_eq!(from_file.channel, "twin");
        assert!(!from_file.timestamp_events);

        let with_env = load_settings_from(
            Some(raw),
            env_from(&[("LIVE_CHANNEL", "edge"), ("APP__TIMESTAMP_EVENTS", "on")]),
        );
        assert_eq!(with_env.channel, "edge");
        assert!(with_env.timestamp_events);

        let prefixed = load_settings_from(
            Some(raw),
            env_from(&[("LIVE_CHANNEL", "edge"), ("APP__CHANNEL", "app")]),
        );
        assert_eq!(prefixed.channel, "app");
    }

    #[test]
    fn accepts_toml_boolean_flags() {
        let settings =
            load_settings_from(Some("channel = \"twin\"\ntimestamp_events = false\n"), |_| None);
        assert_eq!(
            settings,
            AnswerSettings {
                channel: "twin".into(),
                timestamp_events: false,
            }
        );

        let enabled = load_settings_from(Some("timestamp_events = true\n"), |_| None);
        assert!(enabled.timestamp_events);
    }

    #[test]
    fn unreadable_flag_keeps_the_rest_of_the_file() {
        let settings =
            load_settings_from(Some("channel = \"twin\"\ntimestamp_events = \"maybe\"\n"), |_| None);
        assert_eq!(settings.channel, "twin");
        assert!(settings.timestamp_events);
    }

    #[test]
    fn ignores_garbage_values() {
        let settings = load_settings_from(
            Some("this is not toml ="),
            env_from(&[("APP__TIMESTAMP_EVENTS", "maybe")]),
        );
        assert_eq!(settings, AnswerSettings::default());
    }

    #[test]
    fn reports_missing_settings_file() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("live_client_missing_{unique}.toml"));

        let err = load_settings_file(&path).expect_err("missing file");
        assert!(err.to_string().contains("failed to read settings file"));
    }

    #[test]
    fn reports_unparsable_settings_file() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("live_client_broken_{unique}.toml"));
        fs::write(&path, "channel = [1, 2]\n").expect("write settings");

        let err = load_settings_file(&path).expect_err("broken file");
        assert!(err.to_string().contains("failed to parse settings file"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn loads_settings_file_from_disk() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("live_client_settings_{unique}.toml"));
        fs::write(&path, "channel = \"bench\"\ntimestamp_events = false\n")
            .expect("write settings");

        let settings = load_settings_file(&path).expect("settings");
        assert_eq!(settings.channel, "bench");
        assert!(!settings.timestamp_events);

        let _ = fs::remove_file(&path);
    }
}
