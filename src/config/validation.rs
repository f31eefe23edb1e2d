//! Configuration validation utilities

use super::*;
use crate::core::error::{Error, Result};
use std::path::Path;

/// Validate the entire configuration
pub fn validate_config(config: &EvalConfig) -> Result<()> {
    validate_save_dir(&config.save_dir)?;
    validate_class_names(config.class_names.as_deref())?;
    config
        .plot
        .validate()
        .map_err(|e| Error::ConfigurationError(format!("Invalid plot settings: {}", e)))?;

    Ok(())
}

fn validate_save_dir(save_dir: &Path) -> Result<()> {
    if save_dir.as_os_str().is_empty() {
        return Err(Error::ConfigurationError(
            "save_dir must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Class names must be non-empty and unique
fn validate_class_names(names: Option<&[String]>) -> Result<()> {
    let names = match names {
        Some(names) => names,
        None => return Ok(()),
    };

    if names.is_empty() {
        return Err(Error::ConfigurationError(
            "class_names must list at least one class when given".to_string(),
        ));
    }

    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(Error::ConfigurationError(format!(
                "class_names[{}] is blank",
                i
            )));
        }
        if names[..i].contains(name) {
            return Err(Error::ConfigurationError(format!(
                "Duplicate class name: {}",
                name
            )));
        }
    }

    Ok(())
}
