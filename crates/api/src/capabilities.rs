// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for UI gating.
//!
//! Capabilities are advisory only. The freeze rule is still enforced by
//! `apply`, whatever a client shows.

use decom_domain::ActivityAggregate;

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

/// What may currently be done with one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCapabilities {
    pub can_edit_survey: Capability,
    pub can_complete_survey: Capability,
    pub can_edit_dismantling: Capability,
    pub can_complete_dismantling: Capability,
}

impl ActivityCapabilities {
    /// Derives the capabilities of an activity.
    #[must_use]
    pub const fn for_activity(activity: &ActivityAggregate) -> Self {
        let survey_open: bool = !activity.is_survey_locked();
        Self {
            can_edit_survey: Capability::from_bool(survey_open),
            can_complete_survey: Capability::from_bool(
                survey_open && !activity.survey.status.is_completed(),
            ),
            can_edit_dismantling: Capability::Allowed,
            can_complete_dismantling: Capability::from_bool(!activity.dismantling.is_completed()),
        }
    }
}
