// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::drafts::{EditBuffer, ManualSelection};
use decom_domain::{PartyId, Phase, PhaseStatus, SurveyMaterialLine};
use time::Date;

/// Survey form values submitted by `SaveSurvey`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurveyForm {
    pub survey_date: Option<Date>,
    /// A missing or `pending` status is stored as `in-progress`.
    pub status: Option<PhaseStatus>,
    pub report: String,
    pub materials: Vec<SurveyMaterialLine>,
}

/// Dismantling setup values submitted by `SaveDismantlingSetup`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DismantlingSetupForm {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub team_leader: Option<PartyId>,
    pub issues_encountered: String,
    pub mark_completed: bool,
}

/// A command represents user or system intent as data only.
///
/// Commands carry no behavior; `apply` turns them into an
/// `ActivityUpdate` plus an audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the survey record.
    SaveSurvey(SurveyForm),
    /// Mark the survey completed without editing its materials.
    MarkSurveyCompleted,
    /// Save the dismantling header fields.
    SaveDismantlingSetup(DismantlingSetupForm),
    /// Assign a phase to a party.
    SaveAssignment {
        phase: Phase,
        assigned_to: Option<String>,
        due_date: Option<Date>,
    },
    /// Submit the dismantled materials.
    ///
    /// Only the buffer matching the activity's reconciliation mode is read.
    SubmitDismantlingMaterials {
        edits: EditBuffer,
        manual: ManualSelection,
    },
    /// Complete dismantling, auto-filling an empty material list.
    CompleteDismantling,
    /// Replace the free-form activity notes.
    SaveNotes { notes: String },
}

impl Command {
    /// The action name recorded in audit events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SaveSurvey(_) => "SaveSurvey",
            Self::MarkSurveyCompleted => "MarkSurveyCompleted",
            Self::SaveDismantlingSetup(_) => "SaveDismantlingSetup",
            Self::SaveAssignment { .. } => "SaveAssignment",
            Self::SubmitDismantlingMaterials { .. } => "SubmitDismantlingMaterials",
            Self::CompleteDismantling => "CompleteDismantling",
            Self::SaveNotes { .. } => "SaveNotes",
        }
    }
}

