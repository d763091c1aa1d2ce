// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Material lines recorded by the survey and dismantling phases.

use crate::catalog::CatalogMaterial;
use crate::types::{MaterialCondition, MaterialId};
use serde::{Deserialize, Serialize};
use time::Date;

/// Common access to the identity key of a material line.
pub trait MaterialLine {
    /// Returns the material this line refers to.
    fn material_id(&self) -> &MaterialId;
}

/// A material found at the site during the survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyMaterialLine {
    pub material_id: MaterialId,
    /// Display name captured from the catalog when the line was created.
    pub name: String,
    pub quantity: u32,
    pub condition: MaterialCondition,
    pub can_be_reused: bool,
    #[serde(default)]
    pub notes: String,
}

impl SurveyMaterialLine {
    /// Creates a survey line for a catalog material with the selection defaults:
    /// one unit, in good condition, reusable.
    #[must_use]
    pub fn from_catalog(material: &CatalogMaterial) -> Self {
        Self {
            material_id: material.id.clone(),
            name: material.name.clone(),
            quantity: 1,
            condition: MaterialCondition::Good,
            can_be_reused: true,
            notes: String::new(),
        }
    }
}

impl MaterialLine for SurveyMaterialLine {
    fn material_id(&self) -> &MaterialId {
        &self.material_id
    }
}

/// A material actually removed from the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DismantledMaterialLine {
    pub material_id: MaterialId,
    pub name: String,
    pub quantity_dismantled: u32,
    pub condition_after_dismantling: MaterialCondition,
    #[serde(default)]
    pub damage_notes: String,
    /// Stamped when the line is written; not editable per line.
    pub dismantling_date: Date,
}

impl DismantledMaterialLine {
    /// Derives a dismantled line from a survey line, carrying quantity and
    /// condition over unchanged.
    #[must_use]
    pub fn from_survey_line(line: &SurveyMaterialLine, dismantling_date: Date) -> Self {
        Self {
            material_id: line.material_id.clone(),
            name: line.name.clone(),
            quantity_dismantled: line.quantity,
            condition_after_dismantling: line.condition,
            damage_notes: String::new(),
            dismantling_date,
        }
    }
}

impl MaterialLine for DismantledMaterialLine {
    fn material_id(&self) -> &MaterialId {
        &self.material_id
    }
}

/// Finds the line for a material in a material list.
#[must_use]
pub fn find_line<'a, L: MaterialLine>(lines: &'a [L], material_id: &MaterialId) -> Option<&'a L> {
    lines.iter().find(|line| line.material_id() == material_id)
}
