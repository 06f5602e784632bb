//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hierflat/hierflat.toml`
//! 3. Local config: `<project_dir>/.hierflat.toml`
//! 4. Environment variables: `HIERFLAT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, ValidationMode};

/// Default prefix of exported file names.
pub const DEFAULT_FILE_PREFIX: &str = "industry-analysis";

/// CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving exported files
    pub output_dir: PathBuf,
    /// File name prefix, followed by `-<date>-<time>.csv`
    pub file_prefix: String,
    /// Prepend a byte-order mark for spreadsheet applications
    pub bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.into(),
            bom: true,
        }
    }
}

/// Input validation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ValidationConfig {
    pub mode: ValidationMode,
}

/// Raw export config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawExportConfig {
    pub output_dir: Option<PathBuf>,
    pub file_prefix: Option<String>,
    pub bom: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawValidationConfig {
    pub mode: Option<ValidationMode>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub export: RawExportConfig,
    pub validation: RawValidationConfig,
}

/// Unified configuration for hierflat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub export: ExportConfig,
    pub validation: ValidationConfig,
}

/// Get the XDG config directory for hierflat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hierflat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hierflat.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".hierflat.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.export.output_dir.to_string_lossy().as_ref());
        self.export.output_dir = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            export: ExportConfig {
                output_dir: overlay
                    .export
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| self.export.output_dir.clone()),
                file_prefix: overlay
                    .export
                    .file_prefix
                    .clone()
                    .unwrap_or_else(|| self.export.file_prefix.clone()),
                bom: overlay.export.bom.unwrap_or(self.export.bom),
            },
            validation: ValidationConfig {
                mode: overlay.validation.mode.unwrap_or(self.validation.mode),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/hierflat/hierflat.toml`
    /// 3. Local config: `<project_dir>/.hierflat.toml`
    /// 4. Environment variables: `HIERFLAT_*` prefix, `__` as section separator
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply HIERFLAT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("HIERFLAT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("export.output_dir") {
            settings.export.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("export.file_prefix") {
            settings.export.file_prefix = val;
        }
        if let Ok(val) = config.get_bool("export.bom") {
            settings.export.bom = val;
        }
        if let Ok(val) = config.get_string("validation.mode") {
            settings.validation.mode = parse_mode(&val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# hierflat configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/hierflat/hierflat.toml
#   Local:  <project_dir>/.hierflat.toml
#   Env:    HIERFLAT_* environment variables (e.g. HIERFLAT_EXPORT__BOM=false)

[export]
# Directory receiving exported CSV files (~ and $VAR are expanded)
# output_dir = "."

# File name prefix: <prefix>-<YYYY-MM-DD>-<HH-MM-SS>.csv
# file_prefix = "industry-analysis"

# Prepend a UTF-8 byte-order mark (needed by some spreadsheet applications)
# bom = true

[validation]
# strict: reject nodes without a name or with non-list children
# lenient: default such fields and log a warning
# mode = "strict"
"#
        .to_string()
    }
}

fn parse_mode(val: &str) -> Result<ValidationMode, ApplicationError> {
    match val.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(ValidationMode::Strict),
        "lenient" => Ok(ValidationMode::Lenient),
        other => Err(ApplicationError::Config {
            message: format!("unknown validation mode: {other}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_uses_bom_and_strict_mode() {
        let settings = Settings::default();
        assert!(settings.export.bom);
        assert_eq!(settings.export.file_prefix, DEFAULT_FILE_PREFIX);
        assert_eq!(settings.validation.mode, ValidationMode::Strict);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            export: RawExportConfig {
                output_dir: None,
                file_prefix: Some("topics".to_string()),
                bom: Some(false),
            },
            validation: RawValidationConfig { mode: None },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.export.output_dir, PathBuf::from("."));
        assert_eq!(result.export.file_prefix, "topics");
        assert!(!result.export.bom);
        assert_eq!(result.validation.mode, ValidationMode::Strict);
    }

    #[test]
    fn given_tilde_in_output_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings::default();
        settings.export.output_dir = PathBuf::from("~/exports");

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings
            .export
            .output_dir
            .to_string_lossy()
            .starts_with(&home));
    }

    #[test]
    fn given_mode_strings_when_parsing_then_accepts_known_values() {
        assert_eq!(parse_mode("Lenient").unwrap(), ValidationMode::Lenient);
        assert_eq!(parse_mode(" strict ").unwrap(), ValidationMode::Strict);
        assert!(parse_mode("loose").is_err());
    }

    #[test]
    fn given_settings_when_serializing_then_toml_has_sections() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("[export]"));
        assert!(toml.contains("[validation]"));
        assert!(toml.contains("mode = \"strict\""));
    }
}
