// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-phase task assignment.
//!
//! Assignments are independent of execution data: a phase can be assigned
//! before anything is recorded for it, and the assignment survives status
//! changes.

use crate::error::DomainError;
use crate::types::{PartyId, Phase};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// The responsible party and due date for one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseAssignment {
    pub assigned_to: PartyId,
    /// The acting user who made the assignment.
    pub assigned_by: PartyId,
    /// Set automatically when the assignment is saved.
    pub assigned_date: OffsetDateTime,
    pub due_date: Date,
}

/// Assignments for the survey and dismantling phases of one activity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentLedger {
    #[serde(default)]
    pub survey: Option<PhaseAssignment>,
    #[serde(default)]
    pub dismantling: Option<PhaseAssignment>,
}

impl AssignmentLedger {
    /// Returns the assignment for a phase.
    #[must_use]
    pub const fn get(&self, phase: Phase) -> Option<&PhaseAssignment> {
        match phase {
            Phase::Survey => self.survey.as_ref(),
            Phase::Dismantling => self.dismantling.as_ref(),
        }
    }

    /// Returns a copy of this ledger with one phase's assignment replaced.
    #[must_use]
    pub fn with_assignment(&self, phase: Phase, assignment: PhaseAssignment) -> Self {
        let mut ledger: Self = self.clone();
        match phase {
            Phase::Survey => ledger.survey = Some(assignment),
            Phase::Dismantling => ledger.dismantling = Some(assignment),
        }
        ledger
    }
}

/// Validates the user-supplied assignment fields.
///
/// Both the assignee and the due date are required.
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming the first missing field.
pub fn validate_assignment_fields(
    assigned_to: Option<&str>,
    due_date: Option<Date>,
) -> Result<(PartyId, Date), DomainError> {
    let assignee: &str = assigned_to.unwrap_or_default();
    let assigned_to: PartyId = PartyId::new(assignee)?;
    let due_date: Date = due_date.ok_or(DomainError::MissingField { field: "dueDate" })?;
    Ok((assigned_to, due_date))
}
