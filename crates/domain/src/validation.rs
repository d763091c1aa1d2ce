// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::MaterialCatalog;
use crate::dismantling::DismantlingRecord;
use crate::error::DomainError;
use crate::material::{MaterialLine, SurveyMaterialLine};
use crate::survey::SurveyRecord;
use crate::types::MaterialId;
use std::collections::HashSet;

/// Validates that a material list holds at most one line per material.
///
/// # Errors
///
/// Returns `DomainError::DuplicateMaterial` for the first repeated id.
pub fn validate_unique_materials<L: MaterialLine>(lines: &[L]) -> Result<(), DomainError> {
    let mut seen: HashSet<&MaterialId> = HashSet::new();
    for line in lines {
        // Rule: a material list is a mapping keyed by material id
        if !seen.insert(line.material_id()) {
            return Err(DomainError::DuplicateMaterial(line.material_id().clone()));
        }
    }
    Ok(())
}

/// Validates that every survey line references a catalog material.
///
/// # Errors
///
/// Returns `DomainError::UnknownMaterial` for the first line whose id is not
/// in the catalog.
pub fn validate_survey_materials(
    catalog: &MaterialCatalog,
    lines: &[SurveyMaterialLine],
) -> Result<(), DomainError> {
    for line in lines {
        catalog.require(&line.material_id)?;
    }
    validate_unique_materials(lines)
}

/// Validates the quantity-conservation invariant between the two records.
///
/// Every dismantled line whose material was surveyed must not exceed the
/// surveyed quantity. Lines without a survey counterpart were entered
/// manually and are not bounded.
///
/// # Errors
///
/// Returns `DomainError::QuantityExceedsSurvey` for the first violation.
pub fn validate_dismantled_within_survey(
    survey: &SurveyRecord,
    dismantling: &DismantlingRecord,
) -> Result<(), DomainError> {
    for line in &dismantling.materials {
        if let Some(surveyed) = survey.quantity_of(&line.material_id)
            && line.quantity_dismantled > surveyed
        {
            return Err(DomainError::QuantityExceedsSurvey {
                material_id: line.material_id.clone(),
                dismantled: line.quantity_dismantled,
                surveyed,
            });
        }
    }
    Ok(())
}
