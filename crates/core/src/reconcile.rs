// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Survey/dismantling reconciliation.
//!
//! A dismantling material list is produced in one of two modes:
//!
//! - **Survey-driven**: the survey holds materials, and every dismantled
//!   quantity is bounded by the surveyed quantity of the same material.
//! - **Manual**: the survey holds no materials, and lines are chosen
//!   directly from the catalog with no upper bound.
//!
//! Both modes finalize into the same `Vec<DismantledMaterialLine>`.

use crate::drafts::{DraftLine, EditBuffer, ManualSelection};
use decom_domain::{
    ActivityAggregate, DismantledMaterialLine, MaterialId, SurveyMaterialLine, SurveyRecord,
};
use time::Date;

/// Which reconciliation mode an activity is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationMode {
    SurveyDriven,
    Manual,
}

impl ReconciliationMode {
    /// Selects the mode from the survey record.
    #[must_use]
    pub const fn for_survey(survey: &SurveyRecord) -> Self {
        if survey.has_materials() {
            Self::SurveyDriven
        } else {
            Self::Manual
        }
    }

    /// Returns the string representation of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SurveyDriven => "survey-driven",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for ReconciliationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pending dismantling submission, bound to the buffer its mode reads.
#[derive(Debug, Clone, Copy)]
pub enum Reconciliation<'a> {
    SurveyDriven {
        survey: &'a SurveyRecord,
        edits: &'a EditBuffer,
    },
    Manual {
        selection: &'a ManualSelection,
    },
}

impl<'a> Reconciliation<'a> {
    /// Binds the buffer matching the survey's mode.
    ///
    /// The buffer belonging to the other mode is ignored.
    #[must_use]
    pub const fn select(
        survey: &'a SurveyRecord,
        edits: &'a EditBuffer,
        selection: &'a ManualSelection,
    ) -> Self {
        match ReconciliationMode::for_survey(survey) {
            ReconciliationMode::SurveyDriven => Self::SurveyDriven { survey, edits },
            ReconciliationMode::Manual => Self::Manual { selection },
        }
    }

    /// The mode of this submission.
    #[must_use]
    pub const fn mode(&self) -> ReconciliationMode {
        match self {
            Self::SurveyDriven { .. } => ReconciliationMode::SurveyDriven,
            Self::Manual { .. } => ReconciliationMode::Manual,
        }
    }

    /// Produces the new dismantled material list.
    ///
    /// Survey-driven submissions merge into `existing`: materials without a
    /// draft quantity keep their prior line, a resolved quantity of zero
    /// removes the line, anything else replaces it. Manual submissions
    /// replace the list with every selected entry whose quantity is at
    /// least one.
    #[must_use]
    pub fn finalize(
        &self,
        existing: &[DismantledMaterialLine],
        today: Date,
    ) -> Vec<DismantledMaterialLine> {
        match self {
            Self::SurveyDriven { survey, edits } => {
                merge_survey_drafts(survey, edits, existing, today)
            }
            Self::Manual { selection } => manual_lines(selection, today),
        }
    }
}

/// Clamps a raw quantity into `[0, surveyed]`.
#[must_use]
pub fn clamp_to_survey(raw: i64, surveyed: u32) -> u32 {
    let clamped: i64 = raw.clamp(0, i64::from(surveyed));
    u32::try_from(clamped).unwrap_or(0)
}

/// The quantity shown for a survey line: draft, else prior, else surveyed.
///
/// The result is always within `[0, surveyed]`.
#[must_use]
pub fn effective_quantity(
    survey_line: &SurveyMaterialLine,
    prior: Option<&DismantledMaterialLine>,
    draft: Option<&DraftLine>,
) -> u32 {
    let raw: i64 = draft
        .and_then(|d| d.quantity_dismantled)
        .or_else(|| prior.map(|p| i64::from(p.quantity_dismantled)))
        .unwrap_or_else(|| i64::from(survey_line.quantity));
    clamp_to_survey(raw, survey_line.quantity)
}

/// Remaining (not yet dismantled) quantity for a surveyed material.
///
/// Returns `None` if the material was not surveyed.
#[must_use]
pub fn remaining_quantity(
    activity: &ActivityAggregate,
    edits: &EditBuffer,
    material_id: &MaterialId,
) -> Option<u32> {
    let survey_line: &SurveyMaterialLine = activity.survey.line(material_id)?;
    let effective: u32 = effective_quantity(
        survey_line,
        activity.dismantling.line(material_id),
        edits.get(material_id),
    );
    Some(survey_line.quantity.saturating_sub(effective))
}

/// Builds one dismantled line per survey line, at full surveyed quantity.
///
/// Used to auto-fill an empty dismantling list on completion.
#[must_use]
pub fn synthesize_from_survey(survey: &SurveyRecord, today: Date) -> Vec<DismantledMaterialLine> {
    survey
        .materials
        .iter()
        .map(|line| DismantledMaterialLine::from_survey_line(line, today))
        .collect()
}

/// Caps each dismantled line at the quantity surveyed for its material.
///
/// Lines for materials absent from the survey are kept as they are. A line
/// whose cap is zero is dropped, matching how a zero quantity removes a
/// line on submission.
#[must_use]
pub fn clamp_dismantled_to_survey(
    survey: &SurveyRecord,
    materials: &[DismantledMaterialLine],
) -> Vec<DismantledMaterialLine> {
    materials
        .iter()
        .filter_map(|line| match survey.quantity_of(&line.material_id) {
            Some(0) => None,
            Some(surveyed) if line.quantity_dismantled > surveyed => {
                Some(DismantledMaterialLine {
                    quantity_dismantled: surveyed,
                    ..line.clone()
                })
            }
            _ => Some(line.clone()),
        })
        .collect()
}

fn merge_survey_drafts(
    survey: &SurveyRecord,
    edits: &EditBuffer,
    existing: &[DismantledMaterialLine],
    today: Date,
) -> Vec<DismantledMaterialLine> {
    let mut merged: Vec<DismantledMaterialLine> = existing.to_vec();

    for survey_line in &survey.materials {
        let Some(draft) = edits.get(&survey_line.material_id) else {
            continue;
        };
        // Only a draft carrying a quantity is submitted
        let Some(raw) = draft.quantity_dismantled else {
            continue;
        };

        let quantity: u32 = clamp_to_survey(raw, survey_line.quantity);
        let position: Option<usize> = merged
            .iter()
            .position(|line| line.material_id == survey_line.material_id);

        if quantity == 0 {
            if let Some(index) = position {
                merged.remove(index);
            }
            continue;
        }

        let prior_notes: Option<String> = position
            .and_then(|index| merged.get(index))
            .map(|line| line.damage_notes.clone());
        let line: DismantledMaterialLine = DismantledMaterialLine {
            material_id: survey_line.material_id.clone(),
            name: survey_line.name.clone(),
            quantity_dismantled: quantity,
            condition_after_dismantling: draft
                .condition_after_dismantling
                .unwrap_or(survey_line.condition),
            damage_notes: draft
                .damage_notes
                .clone()
                .or(prior_notes)
                .unwrap_or_default(),
            dismantling_date: today,
        };

        match position.and_then(|index| merged.get_mut(index)) {
            Some(slot) => *slot = line,
            None => merged.push(line),
        }
    }

    merged
}

fn manual_lines(selection: &ManualSelection, today: Date) -> Vec<DismantledMaterialLine> {
    selection
        .entries()
        .iter()
        .filter_map(|entry| {
            let quantity: u32 = entry
                .quantity
                .and_then(|q| u32::try_from(q).ok())
                .filter(|q| *q >= 1)?;
            Some(DismantledMaterialLine {
                material_id: entry.material_id.clone(),
                name: entry.name.clone(),
                quantity_dismantled: quantity,
                condition_after_dismantling: entry.condition_after_dismantling,
                damage_notes: entry.damage_notes.clone(),
                dismantling_date: today,
            })
        })
        .collect()
}

/// The list a materials view should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMaterials<'a> {
    /// Recorded dismantled lines.
    Dismantled(&'a [DismantledMaterialLine]),
    /// Survey lines, shown as a preview before anything was dismantled.
    Surveyed(&'a [SurveyMaterialLine]),
}

impl DisplayMaterials<'_> {
    /// Number of rows to render.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Dismantled(lines) => lines.len(),
            Self::Surveyed(lines) => lines.len(),
        }
    }

    /// Returns true if there is nothing to render.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Chooses the list to display for an activity.
///
/// Recorded dismantled materials win; otherwise the survey materials are
/// shown as a preview.
#[must_use]
pub fn display_materials(activity: &ActivityAggregate) -> DisplayMaterials<'_> {
    if activity.dismantling.materials.is_empty() {
        DisplayMaterials::Surveyed(&activity.survey.materials)
    } else {
        DisplayMaterials::Dismantled(&activity.dismantling.materials)
    }
}
