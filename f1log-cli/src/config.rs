//! Driver filter configuration
//!
//! A JSON file with a `drivers` array of display names. Matching
//! against decoded participant names is case-insensitive, so the names
//! are normalized once at load.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FilterFile {
    drivers: Vec<String>,
}

/// The set of driver names whose telemetry should be extracted.
/// Immutable for the run.
#[derive(Debug, Clone)]
pub struct DriverFilter {
    /// Lowercased names for membership tests.
    wanted: HashSet<String>,
    /// Names as configured, for messages.
    names: Vec<String>,
}

impl DriverFilter {
    /// Load the filter from a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read driver filter {}", path.display()))?;
        let parsed: FilterFile = serde_json::from_str(&raw)
            .with_context(|| format!("invalid driver filter {}", path.display()))?;
        Self::from_names(parsed.drivers)
    }

    /// Build a filter from plain names. Blank entries are dropped; an
    /// effectively empty filter is a configuration error.
    pub fn from_names(names: Vec<String>) -> Result<Self> {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            bail!("driver filter is empty: nothing to extract");
        }
        let wanted = names.iter().map(|name| name.to_lowercase()).collect();
        Ok(Self { wanted, names })
    }

    /// Case-insensitive membership test against a participant name.
    pub fn matches(&self, name: &str) -> bool {
        self.wanted.contains(&name.to_lowercase())
    }

    /// The configured names, original casing.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
