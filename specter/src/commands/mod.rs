// specter/src/commands/mod.rs
//! Command implementations for the specter CLI.

pub mod doc;
pub mod text;

use anyhow::Result;
use std::path::Path;

use specter_core::{SpecterConfig, SpecterError};

/// Loads the configuration file when given, the built-in defaults
/// otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> Result<SpecterConfig> {
    match path {
        Some(path) => SpecterConfig::load_from_file(path),
        None => SpecterConfig::load_defaults(),
    }
}

/// Narrows the configured detectors to an explicitly enabled set.
///
/// Naming a detector that is not configured is a fatal configuration
/// error, consistent with the startup checks in the core.
pub(crate) fn select_detectors(config: &mut SpecterConfig, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }

    for name in names {
        if !config.detectors.iter().any(|d| &d.name == name) {
            return Err(SpecterError::InvalidConfig(format!(
                "unknown detector '{}' requested on the command line",
                name
            ))
            .into());
        }
    }

    config.detectors.retain(|d| names.contains(&d.name));
    Ok(())
}
