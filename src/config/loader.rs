//! Declaration file loading.

use crate::config::schema::ValidationConfig;
use crate::error::{RequisiteError, Result};
use std::fs;
use std::path::Path;

/// Load a declaration file and parse it into a [`ValidationConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ValidationConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RequisiteError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RequisiteError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`ValidationConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ValidationConfig> {
    serde_yaml::from_str(content).map_err(|e| RequisiteError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load several declaration files and combine their rules.
///
/// Later files win when two declare a rule for the same type and field.
pub fn load_config_files<P: AsRef<Path>>(paths: &[P]) -> Result<ValidationConfig> {
    let mut merged = ValidationConfig::default();

    for path in paths {
        let config = load_config_file(path.as_ref())?;
        for (type_name, rules) in config.types {
            merged
                .types
                .entry(type_name)
                .or_default()
                .fields
                .extend(rules.fields);
        }
    }

    Ok(merged)
}
