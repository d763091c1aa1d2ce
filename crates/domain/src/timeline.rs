// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Milestone dates shared by the phases of an activity.
///
/// The survey and dismantling completion dates are named fields; any other
/// milestone is kept by name in `others`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_completion_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismantling_completion_date: Option<Date>,
    #[serde(flatten)]
    pub others: BTreeMap<String, Date>,
}

impl Timeline {
    /// A timeline update carrying only the survey completion milestone.
    #[must_use]
    pub fn survey_completed(date: Date) -> Self {
        Self {
            survey_completion_date: Some(date),
            ..Self::default()
        }
    }

    /// A timeline update carrying only the dismantling completion milestone.
    #[must_use]
    pub fn dismantling_completed(date: Date) -> Self {
        Self {
            dismantling_completion_date: Some(date),
            ..Self::default()
        }
    }

    /// Returns true if no milestone is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.survey_completion_date.is_none()
            && self.dismantling_completion_date.is_none()
            && self.others.is_empty()
    }

    /// Merges an update into this timeline.
    ///
    /// Only milestones present in `update` are written; the rest are kept.
    pub fn merge(&mut self, update: &Self) {
        if let Some(date) = update.survey_completion_date {
            self.survey_completion_date = Some(date);
        }
        if let Some(date) = update.dismantling_completion_date {
            self.dismantling_completion_date = Some(date);
        }
        for (name, date) in &update.others {
            self.others.insert(name.clone(), *date);
        }
    }
}
