// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each mutating handler loads the activity, opens a session, translates the
//! request into session input and runs exactly one session operation.

use std::str::FromStr;
use std::sync::Arc;

use decom::{
    DismantlingSetupForm, DisplayMaterials, EditBuffer, ManualSelection, ReconciliationMode,
    SurveyDraft,
};
use decom_audit::{Actor, AuditEvent, Cause};
use decom_domain::{
    ActivityAggregate, ActivityId, DomainError, MaterialCatalog,
    MaterialCondition, MaterialId, PartyId, Phase, PhaseStatus, SurveyRecord, parse_date,
    progress_percentage,
};
use decom_persistence::ActivityStore;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::capabilities::ActivityCapabilities;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    ActivityResponse, ActivitySummaryResponse, AuditEventResponse, CatalogEntryView,
    CatalogResponse, CreateActivityRequest, DismantlingSetupRequest, MaterialRowView,
    MaterialSource, MaterialsResponse, ProgressView, SaveAssignmentRequest, SaveNotesRequest,
    SaveSurveyRequest, SubmitMaterialsRequest, mode_label,
};
use crate::session::{ActivitySession, AssignmentForm, SurveyHeader};

/// Result of a mutating API operation.
#[derive(Debug, Clone)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

fn progress_of(activity: &ActivityAggregate) -> ProgressView {
    ProgressView {
        survey: progress_percentage(activity.survey.status),
        dismantling: progress_percentage(activity.dismantling.status),
    }
}

/// Builds the full response view of an activity.
#[must_use]
pub fn activity_response(activity: &ActivityAggregate) -> ActivityResponse {
    ActivityResponse {
        activity: activity.clone(),
        reconciliation_mode: mode_label(ReconciliationMode::for_survey(&activity.survey)),
        progress: progress_of(activity),
        capabilities: ActivityCapabilities::for_activity(activity),
    }
}

fn finish(session: &ActivitySession, audit_event: AuditEvent) -> ApiResult<ActivityResponse> {
    ApiResult {
        response: activity_response(session.activity()),
        audit_event,
    }
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(parse_date)
        .transpose()
        .map_err(translate_domain_error)
}

fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .filter(|v| !v.trim().is_empty())
        .map(T::from_str)
        .transpose()
        .map_err(translate_domain_error)
}

fn parse_material_id(value: &str) -> Result<MaterialId, ApiError> {
    MaterialId::new(value).map_err(translate_domain_error)
}

/// Creates a new activity for a site.
///
/// # Errors
///
/// Returns `MissingField` if the site code is blank, or a persistence error
/// if the write fails.
pub fn create_activity<S: ActivityStore>(
    store: &mut S,
    request: &CreateActivityRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<ActivityResponse, ApiError> {
    let site_code: &str = request.site_code.trim();
    if site_code.is_empty() {
        return Err(ApiError::MissingField {
            field: String::from("siteCode"),
        });
    }

    let activity: ActivityAggregate = store.create_activity(site_code, actor, cause)?;
    Ok(activity_response(&activity))
}

/// Loads one activity.
///
/// # Errors
///
/// Returns `NotFound` if the activity does not exist.
pub fn get_activity<S: ActivityStore>(
    store: &mut S,
    activity_id: ActivityId,
) -> Result<ActivityResponse, ApiError> {
    let activity: ActivityAggregate = store.load_activity(activity_id)?;
    Ok(activity_response(&activity))
}

/// Lists every activity ordered by id.
///
/// # Errors
///
/// Returns a persistence error if the read fails.
pub fn list_activities<S: ActivityStore>(
    store: &mut S,
) -> Result<Vec<ActivitySummaryResponse>, ApiError> {
    let activities: Vec<ActivityAggregate> = store.list_activities()?;
    Ok(activities
        .iter()
        .map(|a| ActivitySummaryResponse {
            activity_id: a.activity_id.value(),
            site_code: a.site_code.clone(),
            survey_status: a.survey.status,
            dismantling_status: a.dismantling.status,
            progress: progress_of(a),
        })
        .collect())
}

/// Saves the survey record.
///
/// The submitted lines become the session's survey draft; each material is
/// looked up in the catalog so the stored name always matches it.
///
/// # Errors
///
/// Returns an error if:
/// - The activity does not exist
/// - Dismantling is completed
/// - A material is unknown or repeated, or a value cannot be parsed
/// - The store fails
pub fn save_survey<S: ActivityStore>(
    store: &mut S,
    catalog: Arc<MaterialCatalog>,
    activity_id: ActivityId,
    request: &SaveSurveyRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ActivityResponse>, ApiError> {
    let mut session: ActivitySession = ActivitySession::open(store, activity_id, catalog)?;
    if session.activity().is_survey_locked() {
        return Err(translate_domain_error(DomainError::LockedByCompletion));
    }

    // The request carries the whole survey
    *session.survey_draft_mut() = SurveyDraft::default();

    for input in &request.materials {
        let material_id: MaterialId = parse_material_id(&input.material_id)?;
        if session.survey_draft().is_selected(&material_id) {
            return Err(translate_domain_error(DomainError::DuplicateMaterial(material_id)));
        }
        session.toggle_survey_material(&material_id)?;

        let draft: &mut SurveyDraft = session.survey_draft_mut();
        draft.set_quantity(&material_id, input.quantity);
        if let Some(condition) = parse_optional::<MaterialCondition>(input.condition.as_deref())? {
            draft.set_condition(&material_id, condition);
        }
        if let Some(can_be_reused) = input.can_be_reused {
            draft.set_can_be_reused(&material_id, can_be_reused);
        }
        if let Some(notes) = &input.notes {
            draft.set_notes(&material_id, notes);
        }
    }

    let header: SurveyHeader = SurveyHeader {
        survey_date: parse_optional_date(request.survey_date.as_deref())?,
        status: parse_optional::<PhaseStatus>(request.status.as_deref())?,
        report: request.report.clone().unwrap_or_default(),
    };

    let audit_event: AuditEvent = session.save_survey(store, header, actor, cause, now)?;
    Ok(finish(&session, audit_event))
}

/// Marks the survey completed without touching its materials.
///
/// # Errors
///
/// Returns an error if the activity does not exist, dismantling is
/// completed, or the store fails.
pub fn mark_survey_completed<S: ActivityStore>(
    store: &mut S,
    catalog: Arc<MaterialCatalog>,
    activity_id: ActivityId,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ActivityResponse>, ApiError> {
    let mut session: ActivitySession = ActivitySession::open(store, activity_id, catalog)?;
    let audit_event: AuditEvent = session.mark_survey_completed(store, actor, cause, now)?;
    Ok(finish(&session, audit_event))
}

/// Saves the dismantling header fields.
///
/// # Errors
///
/// Returns an error if the activity does not exist, a value cannot be
/// parsed, or the store fails.
pub fn save_dismantling_setup<S: ActivityStore>(
    store: &mut S,
    catalog: Arc<MaterialCatalog>,
    activity_id: ActivityId,
    request: &DismantlingSetupRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ActivityResponse>, ApiError> {
    let team_leader: Option<PartyId> = request
        .team_leader
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(PartyId::new)
        .transpose()
        .map_err(translate_domain_error)?;

    let form: DismantlingSetupForm = DismantlingSetupForm {
        start_date: parse_optional_date(request.start_date.as_deref())?,
        end_date: parse_optional_date(request.end_date.as_deref())?,
        team_leader,
        issues_encountered: request.issues_encountered.clone().unwrap_or_default(),
        mark_completed: request.mark_completed,
    };

    let mut session: ActivitySession = ActivitySession::open(store, activity_id, catalog)?;
    let audit_event: AuditEvent = session.save_dismantling_setup(store, form, actor, cause, now)?;
    Ok(finish(&session, audit_event))
}

/// Assigns a phase to a party.
///
/// # Errors
///
/// Returns `MissingField` if the assignee or due date is missing, and
/// `InvalidInput` for an unknown phase or a malformed date.
pub fn save_assignment<S: ActivityStore>(
    store: &mut S,
    catalog: Arc<MaterialCatalog>,
    activity_id: ActivityId,
    request: &SaveAssignmentRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ActivityResponse>, ApiError> {
    let phase: Phase = Phase::from_str(&request.phase).map_err(translate_domain_error)?;
    let form: AssignmentForm = AssignmentForm {
        phase,
        assigned_to: request.assigned_to.clone(),
        due_date: parse_optional_date(request.due_date.as_deref())?,
    };

    let mut session: ActivitySession = ActivitySession::open(store, activity_id, catalog)?;
    let audit_event: AuditEvent = session.save_assignment(store, form, actor, cause, now)?;
    Ok(finish(&session, audit_event))
}

/// Submits dismantled materials.
///
/// Drafts fill the edit buffer and manual entries fill the manual
/// selection; the activity's reconciliation mode decides which one is used.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown material or a malformed value, or
/// an error if the store fails.
pub fn submit_dismantling_materials<S: ActivityStore>(
    store: &mut S,
    catalog: Arc<MaterialCatalog>,
    activity_id: ActivityId,
    request: &SubmitMaterialsRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ActivityResponse>, ApiError> {
    let mut session: ActivitySession = ActivitySession::open(store, activity_id, catalog)?;

    for draft in &request.drafts {
        let material_id: MaterialId = parse_material_id(&draft.material_id)?;
        let condition: Option<MaterialCondition> =
            parse_optional(draft.condition_after_dismantling.as_deref())?;
        let buffer: &mut EditBuffer = session.edit_buffer_mut();
        buffer.set_quantity(&material_id, draft.quantity_dismantled);
        if let Some(condition) = condition {
            buffer.set_condition(&material_id, condition);
        }
        if let Some(notes) = &draft.damage_notes {
            buffer.set_damage_notes(&material_id, notes);
        }
    }

    for entry in &request.manual {
        let material_id: MaterialId = parse_material_id(&entry.material_id)?;
        let condition: Option<MaterialCondition> =
            parse_optional(entry.condition_after_dismantling.as_deref())?;
        if !session.manual_selection().is_selected(&material_id) {
            session.toggle_manual_material(&material_id)?;
        }
        let selection: &mut ManualSelection = session.manual_selection_mut();
        selection.set_quantity(&material_id, entry.quantity);
        if let Some(condition) = condition {
            selection.set_condition(&material_id, condition);
        }
        if let Some(notes) = &entry.damage_notes {
            selection.set_damage_notes(&material_id, notes);
        }
    }

    let audit_event: AuditEvent =
        session.submit_dismantling_materials(store, actor, cause, now)?;
    Ok(finish(&session, audit_event))
}

/// Completes dismantling.
///
/// # Errors
///
/// Returns an error if the activity does not exist or the store fails.
pub fn complete_dismantling<S: ActivityStore>(
    store: &mut S,
    catalog: Arc<MaterialCatalog>,
    activity_id: ActivityId,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ActivityResponse>, ApiError> {
    let mut session: ActivitySession = ActivitySession::open(store, activity_id, catalog)?;
    let audit_event: AuditEvent = session.complete_dismantling(store, actor, cause, now)?;
    Ok(finish(&session, audit_event))
}

/// Replaces the activity notes.
///
/// # Errors
///
/// Returns an error if the activity does not exist or the store fails.
pub fn save_notes<S: ActivityStore>(
    store: &mut S,
    catalog: Arc<MaterialCatalog>,
    activity_id: ActivityId,
    request: &SaveNotesRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ActivityResponse>, ApiError> {
    let mut session: ActivitySession = ActivitySession::open(store, activity_id, catalog)?;
    let audit_event: AuditEvent =
        session.save_notes(store, request.notes.clone(), actor, cause, now)?;
    Ok(finish(&session, audit_event))
}

/// Returns the displayed materials with their remaining quantities.
///
/// # Errors
///
/// Returns `NotFound` if the activity does not exist.
pub fn get_materials<S: ActivityStore>(
    store: &mut S,
    catalog: Arc<MaterialCatalog>,
    activity_id: ActivityId,
) -> Result<MaterialsResponse, ApiError> {
    let session: ActivitySession = ActivitySession::open(store, activity_id, catalog)?;
    let survey: &SurveyRecord = &session.activity().survey;

    let response: MaterialsResponse = match session.display_materials() {
        DisplayMaterials::Dismantled(lines) => MaterialsResponse {
            source: MaterialSource::Dismantled,
            rows: lines
                .iter()
                .map(|line| MaterialRowView {
                    material_id: line.material_id.value().to_string(),
                    name: line.name.clone(),
                    quantity: line.quantity_dismantled,
                    condition: line.condition_after_dismantling,
                    surveyed_quantity: survey.quantity_of(&line.material_id),
                    remaining_quantity: session.remaining_quantity(&line.material_id),
                })
                .collect(),
        },
        DisplayMaterials::Surveyed(lines) => MaterialsResponse {
            source: MaterialSource::Surveyed,
            rows: lines
                .iter()
                .map(|line| MaterialRowView {
                    material_id: line.material_id.value().to_string(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    condition: line.condition,
                    surveyed_quantity: Some(line.quantity),
                    remaining_quantity: session.remaining_quantity(&line.material_id),
                })
                .collect(),
        },
    };
    Ok(response)
}

/// Returns the audit events of one activity in commit order.
///
/// # Errors
///
/// Returns `NotFound` if the activity does not exist.
pub fn get_audit_timeline<S: ActivityStore>(
    store: &mut S,
    activity_id: ActivityId,
) -> Result<Vec<AuditEventResponse>, ApiError> {
    // Distinguish an unknown activity from one without events
    store.load_activity(activity_id)?;
    let events: Vec<AuditEvent> = store.audit_timeline(activity_id)?;
    info!(
        activity_id = activity_id.value(),
        event_count = events.len(),
        "Loaded audit timeline"
    );
    Ok(events.iter().map(AuditEventResponse::from).collect())
}

/// Lists the material catalog.
#[must_use]
pub fn get_catalog(catalog: &MaterialCatalog) -> CatalogResponse {
    CatalogResponse {
        materials: catalog
            .materials()
            .iter()
            .map(|m| CatalogEntryView {
                id: m.id.value().to_string(),
                name: m.name.clone(),
            })
            .collect(),
    }
}
