//! Settings file handling for pomgen.
//! Settings narrow or adjust the built-in target matrix; they never define
//! fragments or the skeleton.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::matrix::MatrixOptions;
use crate::target::DeploymentContext;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of `pomgen.json` / `pomgen.yml` / `pomgen.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Overrides the project version for every module.
    pub version: Option<String>,
    /// Module ids to generate; empty means all.
    pub modules: Vec<String>,
    /// Deployment contexts to generate; empty means all.
    pub contexts: Vec<DeploymentContext>,
    /// Root directory for generated documents.
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Builds matrix options from these settings.
    pub fn matrix_options(&self) -> MatrixOptions {
        MatrixOptions {
            modules: self.modules.clone(),
            contexts: self.contexts.clone(),
            version: self.version.clone(),
        }
    }
}

/// Finds the first existing settings file in `dir`.
pub fn find_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Option<PathBuf> {
    config_files
        .iter()
        .map(|file| dir.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Parses settings, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML settings
pub fn parse_settings(content: &str) -> Result<Settings> {
    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid settings format: {e}"))),
    }
}

/// Loads settings from `explicit`, or from the first settings file found in `dir`.
///
/// A missing settings file yields the defaults; a missing explicit path is an error.
pub fn load_settings<P: AsRef<Path>>(explicit: Option<&Path>, dir: P) -> Result<Settings> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::ConfigError(format!(
                    "settings file '{}' does not exist",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match find_config(dir, &CONFIG_FILES) {
            Some(path) => path,
            None => {
                debug!("No settings file found (tried: {})", CONFIG_FILES.join(", "));
                return Ok(Settings::default());
            }
        },
    };

    debug!("Loading settings from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(Error::IoError)?;
    parse_settings(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_settings() {
        let settings =
            parse_settings(r#"{"version": "1.0.5", "modules": ["core"], "contexts": ["release"]}"#)
                .unwrap();
        assert_eq!(settings.version.as_deref(), Some("1.0.5"));
        assert_eq!(settings.modules, vec!["core".to_string()]);
        assert_eq!(settings.contexts, vec![DeploymentContext::Release]);
    }

    #[test]
    fn test_parse_yaml_settings() {
        let settings =
            parse_settings("modules:\n  - sparksql\n  - bokeh\noutput_dir: out\n").unwrap();
        assert_eq!(settings.modules, vec!["sparksql".to_string(), "bokeh".to_string()]);
        assert_eq!(settings.output_dir, Some(PathBuf::from("out")));
        assert!(settings.version.is_none());
    }

    #[test]
    fn test_unknown_context_is_rejected() {
        assert!(matches!(
            parse_settings("contexts: [staging]\n"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_settings_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(load_settings(None, temp_dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_settings_prefers_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pomgen.yml"), "version: '2.0.0'\n").unwrap();
        fs::write(temp_dir.path().join("pomgen.json"), r#"{"version": "1.9.0"}"#).unwrap();

        let settings = load_settings(None, temp_dir.path()).unwrap();
        assert_eq!(settings.version.as_deref(), Some("1.9.0"));
    }

    #[test]
    fn test_missing_explicit_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.yml");
        assert!(matches!(
            load_settings(Some(&missing), temp_dir.path()),
            Err(Error::ConfigError(_))
        ));
    }
}
