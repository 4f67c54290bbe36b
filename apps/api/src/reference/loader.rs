use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::ReferenceTables;

impl ReferenceTables {
    /// Loads and validates a table set from a JSON file with the same shape
    /// `GET /api/v1/reference` returns.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference tables from {}", path.display()))?;
        let tables: ReferenceTables = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed reference tables in {}", path.display()))?;
        tables
            .validate()
            .with_context(|| format!("Invalid reference tables in {}", path.display()))?;

        info!(
            cities = tables.cities.len(),
            companies = tables.companies.len(),
            skills = tables.skills.len(),
            "Loaded reference tables from {}",
            path.display()
        );
        Ok(tables)
    }

    /// Loads from `path` when given, otherwise returns the bundled tables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => {
                info!("Using bundled reference tables");
                Ok(Self::builtin())
            }
        }
    }
}
