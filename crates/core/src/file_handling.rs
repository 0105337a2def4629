//! Config file loading and validation for runpick.
//!
//! This module reads the YAML config holding scripts and workspaces and
//! checks that their names can be shown as structured picker items.

use std::fs::File;

use log::debug;

use crate::display::format::{SCRIPT_SEPARATOR, WORKSPACE_SEPARATOR};
use crate::error::Error::{EmptyName, NameWithSeparator};
use crate::error::{Error, Result};
use crate::script_definitions::RunpickConfig;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Validates a script or workspace name.
///
/// Names may not be blank and may not contain `separator`, otherwise the
/// picker could not tell the name apart from the rest of the item.
///
/// # Errors
///
/// Returns an error if the name is blank or contains the separator.
pub fn validate_name(name: &str, separator: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EmptyName);
    }

    if name.contains(separator) {
        return Err(NameWithSeparator {
            name: name.to_string(),
            separator: separator.to_string(),
        });
    }

    Ok(())
}

/// Validates every script and workspace name in the config.
///
/// # Errors
///
/// Returns the first invalid name found.
pub fn validate_config(config: &RunpickConfig) -> Result<()> {
    for name in config.scripts.keys() {
        validate_name(name, SCRIPT_SEPARATOR)?;
    }

    for name in config.workspaces.keys() {
        validate_name(name, WORKSPACE_SEPARATOR)?;
    }

    Ok(())
}

/// Loads and validates the config file.
///
/// # Errors
///
/// Returns an error if:
/// - The config file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - The config has no scripts
/// - A script or workspace name is invalid
///
/// # Examples
///
/// ```no_run
/// use runpick_core::file_handling::get_config;
///
/// let config = get_config("/home/me/.runpick/config.yml")?;
/// println!("Loaded {} scripts", config.scripts.len());
/// # Ok::<(), runpick_core::error::Error>(())
/// ```
pub fn get_config(config_path: &str) -> Result<RunpickConfig> {
    let config_reader = get_reader("config", config_path)?;

    let config: RunpickConfig = serde_yaml::from_reader(config_reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )
    })?;

    if config.scripts.is_empty() {
        return Err(Error::empty_script_definition(config_path.to_string()));
    }

    validate_config(&config)?;

    debug!(
        "Loaded {} scripts and {} workspaces from `{config_path}`",
        config.scripts.len(),
        config.workspaces.len()
    );

    Ok(config)
}
