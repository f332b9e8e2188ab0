use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings for the run-script action, as stored by the property inspector.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunScriptSettings {
    #[serde(default)]
    pub default_title: Option<String>,
    #[serde(default)]
    pub script_path: String,
    #[serde(default)]
    pub script_arguments: Option<String>,
}

impl RunScriptSettings {
    pub fn default_title(&self) -> &str {
        self.default_title.as_deref().unwrap_or("")
    }
}

/// Settings for the run-interval action: a key-press script plus a script
/// that is re-run every `interval_delay` seconds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunIntervalSettings {
    #[serde(flatten)]
    pub script: RunScriptSettings,
    #[serde(default)]
    pub interval_script_path: String,
    #[serde(default)]
    pub interval_script_arguments: Option<String>,
    /// Seconds between runs. Fractions are allowed.
    #[serde(default)]
    pub interval_delay: f64,
}

impl RunIntervalSettings {
    /// True when the settings describe a runnable interval.
    pub fn is_interval_valid(&self) -> bool {
        let valid = !self.interval_script_path.is_empty() && self.interval_delay > 0.0;
        info!(
            "interval settings valid: {valid} (path: '{}', delay: {})",
            self.interval_script_path, self.interval_delay
        );
        valid
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn run_script_keys_are_camel_case() {
        let settings: RunScriptSettings = serde_json::from_str(
            r#"{"defaultTitle":"Git","scriptPath":"/bin/status","scriptArguments":"'my repo'"}"#,
        )
        .unwrap();
        assert_eq!(
            settings,
            RunScriptSettings {
                default_title: Some("Git".into()),
                script_path: "/bin/status".into(),
                script_arguments: Some("'my repo'".into()),
            }
        );
    }

    #[test]
    fn missing_fields_default() {
        let settings: RunIntervalSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, RunIntervalSettings::default());
        assert_eq!(settings.script.default_title(), "");
        assert!(!settings.is_interval_valid());
    }

    #[test]
    fn interval_validity() {
        let mut settings: RunIntervalSettings = serde_json::from_str(
            r#"{"scriptPath":"a","intervalScriptPath":"/bin/check","intervalDelay":2}"#,
        )
        .unwrap();
        assert_eq!(settings.script.script_path, "a");
        assert!(settings.is_interval_valid());

        settings.interval_delay = 0.0;
        assert!(!settings.is_interval_valid());

        settings.interval_delay = 0.5;
        settings.interval_script_path.clear();
        assert!(!settings.is_interval_valid());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "intervalScriptPath": "/bin/check",
            "intervalScriptArguments": "0 a b",
            "intervalDelay": 1.5,
        });
        write!(file, "{json}").unwrap();

        let settings = RunIntervalSettings::load(file.path()).unwrap();
        assert_eq!(settings.interval_script_arguments.as_deref(), Some("0 a b"));
        assert_eq!(settings.interval_delay, 1.5);
    }

    #[test]
    fn load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = RunIntervalSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
