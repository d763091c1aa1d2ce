// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The material catalog.
//!
//! The catalog is static reference data owned outside this system. Material
//! lines capture the catalog name when they are created and never re-resolve
//! it afterwards.

use crate::error::DomainError;
use crate::types::MaterialId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One material definition in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMaterial {
    /// The material identifier.
    pub id: MaterialId,
    /// The display name.
    pub name: String,
}

impl CatalogMaterial {
    /// Creates a new catalog entry.
    #[must_use]
    pub const fn new(id: MaterialId, name: String) -> Self {
        Self { id, name }
    }
}

/// A read-only list of material definitions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MaterialCatalog {
    materials: Vec<CatalogMaterial>,
}

impl MaterialCatalog {
    /// Builds a catalog from its entries.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateMaterial` if two entries share an id.
    pub fn new(materials: Vec<CatalogMaterial>) -> Result<Self, DomainError> {
        let mut seen: HashSet<&MaterialId> = HashSet::new();
        for material in &materials {
            if !seen.insert(&material.id) {
                return Err(DomainError::DuplicateMaterial(material.id.clone()));
            }
        }
        Ok(Self { materials })
    }

    /// Looks up a material by id.
    #[must_use]
    pub fn get(&self, id: &MaterialId) -> Option<&CatalogMaterial> {
        self.materials.iter().find(|m| &m.id == id)
    }

    /// Looks up a material by id, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownMaterial` if the id is not in the catalog.
    pub fn require(&self, id: &MaterialId) -> Result<&CatalogMaterial, DomainError> {
        self.get(id)
            .ok_or_else(|| DomainError::UnknownMaterial(id.clone()))
    }

    /// Returns true if the catalog defines the given id.
    #[must_use]
    pub fn contains(&self, id: &MaterialId) -> bool {
        self.get(id).is_some()
    }

    /// Returns all entries in catalog order.
    #[must_use]
    pub fn materials(&self) -> &[CatalogMaterial] {
        &self.materials
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
