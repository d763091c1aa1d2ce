// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Editing session over one activity.
//!
//! A session owns the activity as last returned by the store together with
//! the unsaved edit state: the survey draft, the survey-driven edit buffer
//! and the manual selection. Every mutation runs the core `apply`, hands the
//! update to the store and adopts the aggregate the store returns. A failed
//! call leaves the activity and all buffers as they were.

use std::sync::Arc;

use decom::{
    Command, DismantlingSetupForm, DisplayMaterials, EditBuffer, ManualSelection,
    ReconciliationMode, SurveyDraft, SurveyForm, TransitionResult, apply, display_materials,
    remaining_quantity,
};
use decom_audit::{Actor, AuditEvent, Cause};
use decom_domain::{
    ActivityAggregate, ActivityId, CatalogMaterial, MaterialCatalog, MaterialId, Phase, PhaseStatus,
    progress_percentage,
};
use decom_persistence::ActivityStore;
use time::{Date, OffsetDateTime};
use tracing::{debug, error, info, warn};

use crate::capabilities::ActivityCapabilities;
use crate::error::{ApiError, translate_core_error, translate_domain_error};

/// Survey header fields; the materials come from the session's survey draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurveyHeader {
    pub survey_date: Option<Date>,
    pub status: Option<PhaseStatus>,
    pub report: String,
}

/// Assignment form values for one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentForm {
    pub phase: Phase,
    pub assigned_to: Option<String>,
    pub due_date: Option<Date>,
}

/// An editing session over one activity.
#[derive(Debug, Clone)]
pub struct ActivitySession {
    activity: ActivityAggregate,
    catalog: Arc<MaterialCatalog>,
    survey_draft: SurveyDraft,
    edit_buffer: EditBuffer,
    manual_selection: ManualSelection,
}

impl ActivitySession {
    /// Opens a session over an already loaded activity.
    #[must_use]
    pub fn new(activity: ActivityAggregate, catalog: Arc<MaterialCatalog>) -> Self {
        let survey_draft: SurveyDraft = SurveyDraft::from_record(&activity.survey);
        Self {
            activity,
            catalog,
            survey_draft,
            edit_buffer: EditBuffer::new(),
            manual_selection: ManualSelection::new(),
        }
    }

    /// Loads an activity from the store and opens a session over it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the activity does not exist, or a persistence
    /// error if the read fails.
    pub fn open<S: ActivityStore>(
        store: &mut S,
        activity_id: ActivityId,
        catalog: Arc<MaterialCatalog>,
    ) -> Result<Self, ApiError> {
        let activity: ActivityAggregate = store.load_activity(activity_id)?;
        debug!(activity_id = activity_id.value(), "Opened activity session");
        Ok(Self::new(activity, catalog))
    }

    /// The activity as last confirmed by the store.
    #[must_use]
    pub const fn activity(&self) -> &ActivityAggregate {
        &self.activity
    }

    /// The catalog this session validates against.
    #[must_use]
    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn survey_draft(&self) -> &SurveyDraft {
        &self.survey_draft
    }

    pub const fn survey_draft_mut(&mut self) -> &mut SurveyDraft {
        &mut self.survey_draft
    }

    #[must_use]
    pub const fn edit_buffer(&self) -> &EditBuffer {
        &self.edit_buffer
    }

    pub const fn edit_buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.edit_buffer
    }

    #[must_use]
    pub const fn manual_selection(&self) -> &ManualSelection {
        &self.manual_selection
    }

    pub const fn manual_selection_mut(&mut self) -> &mut ManualSelection {
        &mut self.manual_selection
    }

    /// Toggles a catalog material in or out of the survey draft.
    ///
    /// Returns true if the material is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the material is not in the catalog.
    pub fn toggle_survey_material(&mut self, material_id: &MaterialId) -> Result<bool, ApiError> {
        let material: &CatalogMaterial = self
            .catalog
            .require(material_id)
            .map_err(translate_domain_error)?;
        Ok(self.survey_draft.toggle(material))
    }

    /// Toggles a catalog material in or out of the manual selection.
    ///
    /// Returns true if the material is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the material is not in the catalog.
    pub fn toggle_manual_material(&mut self, material_id: &MaterialId) -> Result<bool, ApiError> {
        let material: &CatalogMaterial = self
            .catalog
            .require(material_id)
            .map_err(translate_domain_error)?;
        Ok(self.manual_selection.toggle(material))
    }

    /// Quantity still to dismantle for a surveyed material, counting unsaved
    /// edits. `None` if the material was never surveyed.
    #[must_use]
    pub fn remaining_quantity(&self, material_id: &MaterialId) -> Option<u32> {
        remaining_quantity(&self.activity, &self.edit_buffer, material_id)
    }

    /// The materials to show: dismantled lines if any, else surveyed lines.
    #[must_use]
    pub fn display_materials(&self) -> DisplayMaterials<'_> {
        display_materials(&self.activity)
    }

    /// Progress of one phase as a percentage.
    #[must_use]
    pub fn progress_percentage(&self, phase: Phase) -> u8 {
        match phase {
            Phase::Survey => progress_percentage(self.activity.survey.status),
            Phase::Dismantling => progress_percentage(self.activity.dismantling.status),
        }
    }

    #[must_use]
    pub const fn capabilities(&self) -> ActivityCapabilities {
        ActivityCapabilities::for_activity(&self.activity)
    }

    /// Which buffer a material submission will read.
    #[must_use]
    pub const fn reconciliation_mode(&self) -> ReconciliationMode {
        ReconciliationMode::for_survey(&self.activity.survey)
    }

    /// Saves the survey using the lines of the survey draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the survey is locked, a line is invalid, or the
    /// store fails.
    pub fn save_survey<S: ActivityStore>(
        &mut self,
        store: &mut S,
        header: SurveyHeader,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AuditEvent, ApiError> {
        let form: SurveyForm = SurveyForm {
            survey_date: header.survey_date,
            status: header.status,
            report: header.report,
            materials: self.survey_draft.lines().to_vec(),
        };
        let event: AuditEvent = self.execute(store, Command::SaveSurvey(form), actor, cause, now)?;
        self.survey_draft = SurveyDraft::from_record(&self.activity.survey);
        Ok(event)
    }

    /// Marks the survey completed, keeping its materials.
    ///
    /// # Errors
    ///
    /// Returns an error if the survey is locked or the store fails.
    pub fn mark_survey_completed<S: ActivityStore>(
        &mut self,
        store: &mut S,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AuditEvent, ApiError> {
        self.execute(store, Command::MarkSurveyCompleted, actor, cause, now)
    }

    /// Saves the dismantling header fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn save_dismantling_setup<S: ActivityStore>(
        &mut self,
        store: &mut S,
        form: DismantlingSetupForm,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AuditEvent, ApiError> {
        self.execute(store, Command::SaveDismantlingSetup(form), actor, cause, now)
    }

    /// Assigns a phase. The actor is recorded as the assigner.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if the assignee or due date is missing, or an
    /// error if the store fails.
    pub fn save_assignment<S: ActivityStore>(
        &mut self,
        store: &mut S,
        form: AssignmentForm,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AuditEvent, ApiError> {
        let command: Command = Command::SaveAssignment {
            phase: form.phase,
            assigned_to: form.assigned_to,
            due_date: form.due_date,
        };
        self.execute(store, command, actor, cause, now)
    }

    /// Submits the pending dismantled materials.
    ///
    /// The buffer read depends on the reconciliation mode; it is cleared
    /// only once the store has accepted the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn submit_dismantling_materials<S: ActivityStore>(
        &mut self,
        store: &mut S,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AuditEvent, ApiError> {
        let mode: ReconciliationMode = self.reconciliation_mode();
        let command: Command = Command::SubmitDismantlingMaterials {
            edits: self.edit_buffer.clone(),
            manual: self.manual_selection.clone(),
        };
        let event: AuditEvent = self.execute(store, command, actor, cause, now)?;
        match mode {
            ReconciliationMode::SurveyDriven => self.edit_buffer.clear(),
            ReconciliationMode::Manual => self.manual_selection.clear(),
        }
        Ok(event)
    }

    /// Completes dismantling, auto-filling an empty material list from the
    /// survey.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn complete_dismantling<S: ActivityStore>(
        &mut self,
        store: &mut S,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AuditEvent, ApiError> {
        self.execute(store, Command::CompleteDismantling, actor, cause, now)
    }

    /// Replaces the activity notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn save_notes<S: ActivityStore>(
        &mut self,
        store: &mut S,
        notes: String,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AuditEvent, ApiError> {
        self.execute(store, Command::SaveNotes { notes }, actor, cause, now)
    }

    fn execute<S: ActivityStore>(
        &mut self,
        store: &mut S,
        command: Command,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AuditEvent, ApiError> {
        let activity_id: i64 = self.activity.activity_id.value();
        let action: &'static str = command.name();

        let result: TransitionResult =
            apply(&self.catalog, &self.activity, command, actor, cause, now).map_err(|err| {
                warn!(activity_id, action, error = %err, "Command rejected");
                translate_core_error(err)
            })?;

        match store.update_activity(self.activity.activity_id, &result.update, &result.audit_event) {
            Ok(activity) => {
                info!(
                    activity_id,
                    action,
                    keys = ?result.update.touched(),
                    "Activity updated"
                );
                self.activity = activity;
                Ok(result.audit_event)
            }
            Err(err) => {
                error!(activity_id, action, error = %err, "Failed to persist activity update");
                Err(ApiError::Persistence {
                    message: err.to_string(),
                })
            }
        }
    }
}
