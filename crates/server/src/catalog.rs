// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Material catalog loading.

use decom_domain::{CatalogMaterial, DomainError, MaterialCatalog, MaterialId};
use std::path::Path;
use tracing::info;

/// Materials offered when no catalog file is configured.
const DEFAULT_MATERIALS: &[(&str, &str)] = &[
    ("antenna-panel", "Panel antenna"),
    ("antenna-mw", "Microwave dish"),
    ("rru", "Remote radio unit"),
    ("bbu", "Baseband unit"),
    ("feeder-cable", "Feeder cable"),
    ("jumper-cable", "Jumper cable"),
    ("power-cable", "DC power cable"),
    ("rectifier", "Rectifier"),
    ("battery-bank", "Battery bank"),
    ("cabinet", "Outdoor cabinet"),
    ("mount-bracket", "Mounting bracket"),
    ("grounding-kit", "Grounding kit"),
];

/// Builds the built-in catalog.
///
/// # Errors
///
/// Returns an error if a built-in entry is invalid.
pub fn default_catalog() -> Result<MaterialCatalog, DomainError> {
    let materials: Vec<CatalogMaterial> = DEFAULT_MATERIALS
        .iter()
        .map(|&(id, name)| {
            MaterialId::new(id).map(|id| CatalogMaterial::new(id, name.to_string()))
        })
        .collect::<Result<Vec<CatalogMaterial>, DomainError>>()?;
    MaterialCatalog::new(materials)
}

/// Loads a catalog from a JSON list of `{ "id", "name" }` objects.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it repeats
/// a material id.
pub fn load_catalog(path: &Path) -> Result<MaterialCatalog, Box<dyn std::error::Error>> {
    let contents: String = std::fs::read_to_string(path)?;
    let materials: Vec<CatalogMaterial> = serde_json::from_str(&contents)?;
    let catalog: MaterialCatalog = MaterialCatalog::new(materials)?;
    info!(
        path = %path.display(),
        materials = catalog.len(),
        "Loaded material catalog"
    );
    Ok(catalog)
}
