// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::assignment::AssignmentLedger;
use crate::dismantling::DismantlingRecord;
use crate::survey::SurveyRecord;
use crate::timeline::Timeline;
use crate::types::ActivityId;
use serde::{Deserialize, Serialize};

/// One site's dismantling engagement.
///
/// The aggregate owns the survey record, the dismantling record, the
/// assignment ledger and the shared timeline. Every mutation replaces one
/// sub-record (or merges into the timeline) and is persisted as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityAggregate {
    pub activity_id: ActivityId,
    pub site_code: String,
    #[serde(default)]
    pub survey: SurveyRecord,
    #[serde(default)]
    pub dismantling: DismantlingRecord,
    #[serde(default)]
    pub assign_activity_tasks: AssignmentLedger,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub notes: String,
}

impl ActivityAggregate {
    /// Creates an empty activity for a site.
    ///
    /// Both phases start `pending` with no materials.
    #[must_use]
    pub fn new(activity_id: ActivityId, site_code: &str) -> Self {
        Self {
            activity_id,
            site_code: site_code.to_string(),
            survey: SurveyRecord::default(),
            dismantling: DismantlingRecord::default(),
            assign_activity_tasks: AssignmentLedger::default(),
            timeline: Timeline::default(),
            notes: String::new(),
        }
    }

    /// Returns true if the survey may no longer be changed.
    #[must_use]
    pub const fn is_survey_locked(&self) -> bool {
        self.dismantling.is_completed()
    }

    /// A short summary of the aggregate used for audit snapshots.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "activity={},survey_status={},survey_materials={},dismantling_status={},dismantled_materials={}",
            self.activity_id,
            self.survey.status,
            self.survey.materials.len(),
            self.dismantling.status,
            self.dismantling.materials.len()
        )
    }
}
