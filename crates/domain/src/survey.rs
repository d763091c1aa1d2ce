// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The survey record and its status rules.

use crate::material::{SurveyMaterialLine, find_line};
use crate::types::{MaterialId, PhaseStatus};
use serde::{Deserialize, Serialize};
use time::Date;

/// Report text used when a survey is marked completed without a report.
pub const COMPLETED_REPORT_PLACEHOLDER: &str = "Survey completed.";

/// Materials found at a site, with the survey report and phase status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub status: PhaseStatus,
    #[serde(default)]
    pub materials: Vec<SurveyMaterialLine>,
    #[serde(default)]
    pub report: String,
    #[serde(default)]
    pub survey_date: Option<Date>,
}

impl SurveyRecord {
    /// Returns true if the survey recorded any materials.
    ///
    /// This decides whether dismantling is reconciled against the survey or
    /// entered manually.
    #[must_use]
    pub const fn has_materials(&self) -> bool {
        !self.materials.is_empty()
    }

    /// Returns the survey line for a material, if surveyed.
    #[must_use]
    pub fn line(&self, material_id: &MaterialId) -> Option<&SurveyMaterialLine> {
        find_line(&self.materials, material_id)
    }

    /// Returns the surveyed quantity for a material, if surveyed.
    #[must_use]
    pub fn quantity_of(&self, material_id: &MaterialId) -> Option<u32> {
        self.line(material_id).map(|line| line.quantity)
    }

    /// The date used for the survey completion milestone: the survey date,
    /// or `today` when none was recorded.
    #[must_use]
    pub fn completion_date(&self, today: Date) -> Date {
        self.survey_date.unwrap_or(today)
    }
}

/// Normalizes a submitted survey status.
///
/// `pending` is never a user-selectable target: an absent or `pending`
/// status becomes `in-progress`.
#[must_use]
pub const fn normalize_survey_status(status: Option<PhaseStatus>) -> PhaseStatus {
    match status {
        None | Some(PhaseStatus::Pending) => PhaseStatus::InProgress,
        Some(other) => other,
    }
}

/// Returns the report to keep when a survey is marked completed.
#[must_use]
pub fn report_or_placeholder(report: &str) -> String {
    if report.trim().is_empty() {
        String::from(COMPLETED_REPORT_PLACEHOLDER)
    } else {
        report.to_string()
    }
}
