//! JSON shape catalog import.
//!
//! ```json
//! [
//!   { "id": "S", "orientations": [[[0, 1, 1], [1, 1, 0]], [[1, 0], [1, 1], [0, 1]]] },
//!   { "id": "dot", "offsets": [[[0, 0]]] }
//! ]
//! ```
//!
//! `orientations` holds 0/1 matrices; `offsets` holds `(row, col)` lists. When both are
//! present `offsets` wins. Well-formedness is checked by [`ShapeRegistry::register`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RegistryError};
use crate::shape::{ShapeRegistry, ShapeTemplate};
use crate::types::Offset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orientations: Vec<Vec<Vec<u8>>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offsets: Vec<Vec<Offset>>,
}

impl CatalogEntry {
    pub fn into_template(self) -> ShapeTemplate {
        if self.offsets.is_empty() {
            ShapeTemplate::from_matrices(self.id, &self.orientations)
        } else {
            ShapeTemplate::new(self.id, self.offsets)
        }
    }
}

pub fn parse_catalog(text: &str) -> Result<Vec<ShapeTemplate>, serde_json::Error> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(text)?;
    Ok(entries.into_iter().map(CatalogEntry::into_template).collect())
}

pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Vec<ShapeTemplate>, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let templates = parse_catalog(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("loaded {} shapes from {}", templates.len(), path.display());
    Ok(templates)
}

/// Registry built from imported templates.
pub fn registry_from_templates<I>(templates: I) -> Result<ShapeRegistry, RegistryError>
where
    I: IntoIterator<Item = ShapeTemplate>,
{
    let mut registry = ShapeRegistry::new();
    registry.register_all(templates)?;
    Ok(registry)
}
