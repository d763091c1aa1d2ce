// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use decom_domain::{ActivityAggregate, AssignmentLedger, DismantlingRecord, SurveyRecord, Timeline};
use serde::{Deserialize, Serialize};

/// A partial update to an activity aggregate.
///
/// Each present record replaces the corresponding sub-record wholesale.
/// The timeline is the exception: its keys are merged so that one phase's
/// milestone never erases another's.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey: Option<SurveyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismantling: Option<DismantlingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign_activity_tasks: Option<AssignmentLedger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ActivityUpdate {
    /// Returns true if the update touches nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.survey.is_none()
            && self.dismantling.is_none()
            && self.timeline.is_none()
            && self.assign_activity_tasks.is_none()
            && self.notes.is_none()
    }

    /// Names of the touched sub-records, for logging.
    #[must_use]
    pub fn touched(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = Vec::new();
        if self.survey.is_some() {
            keys.push("survey");
        }
        if self.dismantling.is_some() {
            keys.push("dismantling");
        }
        if self.timeline.is_some() {
            keys.push("timeline");
        }
        if self.assign_activity_tasks.is_some() {
            keys.push("assignActivityTasks");
        }
        if self.notes.is_some() {
            keys.push("notes");
        }
        keys
    }

    /// Applies the update to an aggregate, returning the new aggregate.
    #[must_use]
    pub fn apply_to(&self, activity: &ActivityAggregate) -> ActivityAggregate {
        let mut updated: ActivityAggregate = activity.clone();
        if let Some(survey) = &self.survey {
            updated.survey = survey.clone();
        }
        if let Some(dismantling) = &self.dismantling {
            updated.dismantling = dismantling.clone();
        }
        if let Some(timeline) = &self.timeline {
            updated.timeline.merge(timeline);
        }
        if let Some(ledger) = &self.assign_activity_tasks {
            updated.assign_activity_tasks = ledger.clone();
        }
        if let Some(notes) = &self.notes {
            updated.notes.clone_from(notes);
        }
        updated
    }
}
