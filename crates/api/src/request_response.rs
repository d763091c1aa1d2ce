// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw strings for dates, statuses and conditions; they are
//! parsed into domain types at the boundary so that a bad value is reported
//! as `invalid-input` before any command is built.

use crate::capabilities::ActivityCapabilities;
use decom::ReconciliationMode;
use decom_audit::AuditEvent;
use decom_domain::{ActivityAggregate, MaterialCondition, PhaseStatus};
use serde::{Deserialize, Serialize};

/// API request to create a new activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    /// The site being decommissioned.
    pub site_code: String,
}

/// One survey line as submitted by the survey form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyMaterialInput {
    pub material_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub can_be_reused: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request to save the survey record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSurveyRequest {
    #[serde(default)]
    pub survey_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub materials: Vec<SurveyMaterialInput>,
}

/// API request to save the dismantling setup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DismantlingSetupRequest {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub team_leader: Option<String>,
    #[serde(default)]
    pub issues_encountered: Option<String>,
    #[serde(default)]
    pub mark_completed: bool,
}

/// API request to assign a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssignmentRequest {
    /// `survey` or `dismantling`.
    pub phase: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// A survey-driven draft for one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLineInput {
    pub material_id: String,
    #[serde(default)]
    pub quantity_dismantled: Option<i64>,
    #[serde(default)]
    pub condition_after_dismantling: Option<String>,
    #[serde(default)]
    pub damage_notes: Option<String>,
}

/// A manual-mode entry chosen from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntryInput {
    pub material_id: String,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub condition_after_dismantling: Option<String>,
    #[serde(default)]
    pub damage_notes: Option<String>,
}

/// API request to submit dismantled materials.
///
/// Only the list matching the activity's reconciliation mode is used.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMaterialsRequest {
    #[serde(default)]
    pub drafts: Vec<DraftLineInput>,
    #[serde(default)]
    pub manual: Vec<ManualEntryInput>,
}

/// API request to replace the activity notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveNotesRequest {
    pub notes: String,
}

/// Progress of both phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub survey: u8,
    pub dismantling: u8,
}

/// API response carrying the full activity and its derived views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub activity: ActivityAggregate,
    pub reconciliation_mode: &'static str,
    pub progress: ProgressView,
    pub capabilities: ActivityCapabilities,
}

/// One row of the activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummaryResponse {
    pub activity_id: i64,
    pub site_code: String,
    pub survey_status: PhaseStatus,
    pub dismantling_status: PhaseStatus,
    pub progress: ProgressView,
}

/// Where a displayed material row comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialSource {
    Dismantled,
    Surveyed,
}

/// One displayed material row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRowView {
    pub material_id: String,
    pub name: String,
    pub quantity: u32,
    pub condition: MaterialCondition,
    /// Absent for materials that were never surveyed.
    pub surveyed_quantity: Option<u32>,
    pub remaining_quantity: Option<u32>,
}

/// API response for the materials view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsResponse {
    pub source: MaterialSource,
    pub rows: Vec<MaterialRowView>,
}

/// One audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventResponse {
    pub event_id: Option<i64>,
    pub action: String,
    pub details: Option<String>,
    pub actor_id: String,
    pub cause_id: String,
    pub before: String,
    pub after: String,
}

impl From<&AuditEvent> for AuditEventResponse {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            actor_id: event.actor.id.clone(),
            cause_id: event.cause.id.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
        }
    }
}

/// Renders a reconciliation mode for responses.
#[must_use]
pub const fn mode_label(mode: ReconciliationMode) -> &'static str {
    mode.as_str()
}

/// One catalog material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryView {
    pub id: String,
    pub name: String,
}

/// API response listing the material catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub materials: Vec<CatalogEntryView>,
}
