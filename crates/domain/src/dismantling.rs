// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The dismantling record and its status inference.
//!
//! Status here never advances on its own: it moves only when a setup save,
//! a material submission or an explicit completion asks it to.

use crate::material::{DismantledMaterialLine, find_line};
use crate::types::{MaterialId, PartyId, PhaseStatus};
use serde::{Deserialize, Serialize};
use time::Date;

/// Materials actually removed from a site, with schedule and issue fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DismantlingRecord {
    pub status: PhaseStatus,
    #[serde(default)]
    pub materials: Vec<DismantledMaterialLine>,
    /// Fixed at the first save.
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub team_leader: Option<PartyId>,
    #[serde(default)]
    pub issues_encountered: String,
}

impl DismantlingRecord {
    /// Returns true once dismantling has been completed.
    ///
    /// A completed dismantling freezes the survey.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Returns the dismantled line for a material, if any.
    #[must_use]
    pub fn line(&self, material_id: &MaterialId) -> Option<&DismantledMaterialLine> {
        find_line(&self.materials, material_id)
    }
}

/// Computes the dismantling status after a save.
///
/// - `mark_completed` forces `completed`
/// - an existing status other than `pending` is retained
/// - anything else becomes `in-progress`
#[must_use]
pub const fn next_dismantling_status(
    current: Option<PhaseStatus>,
    mark_completed: bool,
) -> PhaseStatus {
    if mark_completed {
        return PhaseStatus::Completed;
    }
    match current {
        Some(PhaseStatus::InProgress) => PhaseStatus::InProgress,
        Some(PhaseStatus::Completed) => PhaseStatus::Completed,
        Some(PhaseStatus::Pending) | None => PhaseStatus::InProgress,
    }
}

/// Resolves the dismantling start date.
///
/// Once a start date has been stored it wins over anything the form sends.
#[must_use]
pub fn resolve_start_date(existing: Option<Date>, submitted: Option<Date>, today: Date) -> Date {
    existing.or(submitted).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_mark_completed_always_completes() {
        for current in [
            None,
            Some(PhaseStatus::Pending),
            Some(PhaseStatus::InProgress),
            Some(PhaseStatus::Completed),
        ] {
            assert_eq!(
                next_dismantling_status(current, true),
                PhaseStatus::Completed
            );
        }
    }

    #[test]
    fn test_non_pending_status_is_retained() {
        assert_eq!(
            next_dismantling_status(Some(PhaseStatus::InProgress), false),
            PhaseStatus::InProgress
        );
        assert_eq!(
            next_dismantling_status(Some(PhaseStatus::Completed), false),
            PhaseStatus::Completed
        );
    }

    #[test]
    fn test_unset_or_pending_becomes_in_progress() {
        assert_eq!(
            next_dismantling_status(None, false),
            PhaseStatus::InProgress
        );
        assert_eq!(
            next_dismantling_status(Some(PhaseStatus::Pending), false),
            PhaseStatus::InProgress
        );
    }

    #[test]
    fn test_existing_start_date_wins() {
        let existing: Option<Date> = Some(date!(2026 - 04 - 01));
        let submitted: Option<Date> = Some(date!(2026 - 05 - 01));

        assert_eq!(
            resolve_start_date(existing, submitted, date!(2026 - 06 - 01)),
            date!(2026 - 04 - 01)
        );
    }

    #[test]
    fn test_start_date_falls_back_to_form_then_today() {
        assert_eq!(
            resolve_start_date(None, Some(date!(2026 - 05 - 01)), date!(2026 - 06 - 01)),
            date!(2026 - 05 - 01)
        );
        assert_eq!(
            resolve_start_date(None, None, date!(2026 - 06 - 01)),
            date!(2026 - 06 - 01)
        );
    }
}
