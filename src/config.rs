//! Configuration file support for cdx-merge.
//!
//! Provides YAML-based defaults through `cdx-merge.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::bom_merge::domain::{SpecVersion, ValidationMode};
use crate::bom_merge::policies::IdentityPolicy;
use crate::shared::error::MergeError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "cdx-merge.config.yml";

/// Top-level configuration file schema.
///
/// Every field is a default that the matching CLI flag overrides.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub hierarchical: Option<bool>,
    pub group: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub validation: Option<String>,
    pub identity: Option<String>,
    pub output_version: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    pub fn validation_mode(&self) -> Result<Option<ValidationMode>> {
        parse_field("validation", self.validation.as_deref())
    }

    pub fn identity_policy(&self) -> Result<Option<IdentityPolicy>> {
        parse_field("identity", self.identity.as_deref())
    }

    pub fn output_spec_version(&self) -> Result<Option<SpecVersion>> {
        parse_field("output_version", self.output_version.as_deref())
    }
}

fn parse_field<T>(field: &str, value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(None),
        Some(raw) => match raw.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => Err(MergeError::parameter(format!("Invalid config: {} - {}", field, e)).into()),
        },
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.validation_mode()?;
    config.identity_policy()?;
    config.output_spec_version()?;

    for (field, value) in [
        ("group", &config.group),
        ("name", &config.name),
        ("version", &config.version),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(MergeError::parameter(format!(
                "Invalid config: {} must not be empty (remove the '{}' entry or give it a value)",
                field, field
            ))
            .into());
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ExitCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
hierarchical: true
group: acme
name: suite
version: "2.0"
validation: relaxed
identity: bom-ref
output_version: "1.5"
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.hierarchical, Some(true));
        assert_eq!(config.group.as_deref(), Some("acme"));
        assert_eq!(config.name.as_deref(), Some("suite"));
        assert_eq!(config.version.as_deref(), Some("2.0"));
        assert_eq!(
            config.validation_mode().unwrap(),
            Some(ValidationMode::Relaxed)
        );
        assert_eq!(
            config.identity_policy().unwrap(),
            Some(IdentityPolicy::BomRef)
        );
        assert_eq!(
            config.output_spec_version().unwrap(),
            Some(SpecVersion::V1_5)
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "validation: strict\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.validation.as_deref(), Some("strict"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_enum_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        for (content, field) in [
            ("validation: sometimes\n", "validation"),
            ("identity: fuzzy\n", "identity"),
            ("output_version: \"1.1\"\n", "output_version"),
        ] {
            let config_path = dir.path().join("config.yml");
            fs::write(&config_path, content).unwrap();

            let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
            assert!(err.contains(&format!("Invalid config: {}", field)), "{}", err);
        }
    }

    #[test]
    fn test_empty_subject_field_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "name: \"   \"\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("name must not be empty"));
        assert_eq!(
            ExitCode::from_error(&err),
            ExitCode::ParameterValidationError
        );
    }

    #[test]
    fn test_invalid_output_version_has_single_hint() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "output_version: \"1.1\"\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("Unsupported CycloneDX spec version: '1.1'"));
        assert_eq!(message.matches("Invalid merge parameters").count(), 1);
        assert_eq!(message.matches("💡 Hint:").count(), 1);
        assert_eq!(
            ExitCode::from_error(&err),
            ExitCode::ParameterValidationError
        );
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
validation: none
unknown_field: true
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.hierarchical.is_none());
        assert!(config.validation_mode().unwrap().is_none());
        assert!(config.identity_policy().unwrap().is_none());
        assert!(config.output_spec_version().unwrap().is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
