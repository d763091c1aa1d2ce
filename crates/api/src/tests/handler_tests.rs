// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler tests against an in-memory store.

use decom_domain::{ActivityId, MaterialCondition, PhaseStatus};
use time::macros::date;

use super::helpers::{
    FailingStore, create_activity, create_test_actor, create_test_catalog, create_test_cause,
    test_now,
};
use crate::{
    ActivityResponse, ActivitySummaryResponse, ApiError, ApiResult, AuditEventResponse,
    CatalogResponse, CreateActivityRequest, DismantlingSetupRequest, DraftLineInput,
    FailureReason, ManualEntryInput, MaterialSource, MaterialsResponse, SaveAssignmentRequest,
    SaveNotesRequest, SaveSurveyRequest, SubmitMaterialsRequest, SurveyMaterialInput,
    create_activity as create_activity_handler, get_activity, get_audit_timeline, get_catalog,
    get_materials, list_activities, save_assignment, save_dismantling_setup, save_notes,
    save_survey, submit_dismantling_materials,
};

fn survey_input(material_id: &str, quantity: u32) -> SurveyMaterialInput {
    SurveyMaterialInput {
        material_id: material_id.to_string(),
        quantity,
        condition: None,
        can_be_reused: None,
        notes: None,
    }
}

fn save_two_line_survey(store: &mut FailingStore, activity_id: ActivityId) {
    let request: SaveSurveyRequest = SaveSurveyRequest {
        survey_date: Some(String::from("2026-03-02")),
        status: Some(String::from("in-progress")),
        report: Some(String::from("Tower access confirmed")),
        materials: vec![survey_input("cable-1", 10), survey_input("antenna-1", 3)],
    };
    save_survey(
        store,
        create_test_catalog(),
        activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();
}

// ============================================================================
// Activity lifecycle
// ============================================================================

#[test]
fn test_create_activity_requires_site_code() {
    let mut store: FailingStore = FailingStore::new();
    let request: CreateActivityRequest = CreateActivityRequest {
        site_code: String::from("   "),
    };

    let result: Result<ActivityResponse, ApiError> = create_activity_handler(
        &mut store,
        &request,
        &create_test_actor(),
        &create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::MissingField { ref field }) if field == "siteCode"
    ));
}

#[test]
fn test_create_activity_returns_empty_activity() {
    let mut store: FailingStore = FailingStore::new();
    let request: CreateActivityRequest = CreateActivityRequest {
        site_code: String::from("SITE-042"),
    };

    let response: ActivityResponse = create_activity_handler(
        &mut store,
        &request,
        &create_test_actor(),
        &create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.activity.site_code, "SITE-042");
    assert_eq!(response.activity.survey.status, PhaseStatus::Pending);
    assert_eq!(response.reconciliation_mode, "manual");
    assert_eq!(response.progress.survey, 0);
    assert!(response.capabilities.can_edit_survey.is_allowed());
}

#[test]
fn test_get_unknown_activity_is_not_found() {
    let mut store: FailingStore = FailingStore::new();

    let err: ApiError = get_activity(&mut store, ActivityId::new(99)).unwrap_err();

    assert_eq!(err.reason(), FailureReason::NotFound);
}

#[test]
fn test_list_activities_in_id_order() {
    let mut store: FailingStore = FailingStore::new();
    let first = create_activity(&mut store);
    let second = create_activity(&mut store);

    let rows: Vec<ActivitySummaryResponse> = list_activities(&mut store).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].activity_id, first.activity_id.value());
    assert_eq!(rows[1].activity_id, second.activity_id.value());
}

// ============================================================================
// Survey
// ============================================================================

#[test]
fn test_save_survey_takes_names_from_catalog() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);

    save_two_line_survey(&mut store, activity.activity_id);
    let response: ActivityResponse = get_activity(&mut store, activity.activity_id).unwrap();

    let survey = &response.activity.survey;
    assert_eq!(survey.status, PhaseStatus::InProgress);
    assert_eq!(survey.survey_date, Some(date!(2026 - 03 - 02)));
    assert_eq!(survey.materials.len(), 2);
    assert_eq!(survey.materials[0].name, "Feeder cable");
    assert_eq!(survey.materials[1].quantity, 3);
    assert_eq!(response.reconciliation_mode, "survey-driven");
}

#[test]
fn test_save_survey_rejects_unknown_and_duplicate_materials() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);

    for materials in [
        vec![survey_input("ghost-9", 1)],
        vec![survey_input("cable-1", 1), survey_input("cable-1", 2)],
    ] {
        let request: SaveSurveyRequest = SaveSurveyRequest {
            materials,
            ..SaveSurveyRequest::default()
        };
        let err: ApiError = save_survey(
            &mut store,
            create_test_catalog(),
            activity.activity_id,
            &request,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap_err();
        assert_eq!(err.reason(), FailureReason::InvalidInput);
    }
}

#[test]
fn test_save_survey_rejects_unparseable_status() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);
    let request: SaveSurveyRequest = SaveSurveyRequest {
        status: Some(String::from("almost-done")),
        ..SaveSurveyRequest::default()
    };

    let err: ApiError = save_survey(
        &mut store,
        create_test_catalog(),
        activity.activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "status"));
}

// ============================================================================
// Dismantling
// ============================================================================

#[test]
fn test_submit_drafts_clamps_to_survey() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);
    save_two_line_survey(&mut store, activity.activity_id);
    let request: SubmitMaterialsRequest = SubmitMaterialsRequest {
        drafts: vec![DraftLineInput {
            material_id: String::from("cable-1"),
            quantity_dismantled: Some(15),
            condition_after_dismantling: Some(String::from("poor")),
            damage_notes: Some(String::from("jacket split")),
        }],
        manual: Vec::new(),
    };

    let result: ApiResult<ActivityResponse> = submit_dismantling_materials(
        &mut store,
        create_test_catalog(),
        activity.activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let lines = &result.response.activity.dismantling.materials;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity_dismantled, 10);
    assert_eq!(lines[0].condition_after_dismantling, MaterialCondition::Poor);
    assert_eq!(lines[0].damage_notes, "jacket split");
    assert_eq!(result.audit_event.action.name, "SubmitDismantlingMaterials");
    assert_eq!(result.response.progress.dismantling, 50);
}

#[test]
fn test_submit_manual_entries_without_survey() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);
    let request: SubmitMaterialsRequest = SubmitMaterialsRequest {
        drafts: Vec::new(),
        manual: vec![
            ManualEntryInput {
                material_id: String::from("rru-1"),
                quantity: Some(4),
                condition_after_dismantling: None,
                damage_notes: None,
            },
            ManualEntryInput {
                material_id: String::from("antenna-1"),
                quantity: Some(0),
                condition_after_dismantling: None,
                damage_notes: None,
            },
        ],
    };

    let result: ApiResult<ActivityResponse> = submit_dismantling_materials(
        &mut store,
        create_test_catalog(),
        activity.activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let lines = &result.response.activity.dismantling.materials;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].name, "Remote radio unit");
    assert_eq!(lines[0].quantity_dismantled, 4);
    assert_eq!(lines[0].condition_after_dismantling, MaterialCondition::Good);
}

#[test]
fn test_setup_keeps_existing_start_date() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);
    let mut request: DismantlingSetupRequest = DismantlingSetupRequest {
        start_date: Some(String::from("2026-03-05")),
        team_leader: Some(String::from("lead-2")),
        ..DismantlingSetupRequest::default()
    };
    save_dismantling_setup(
        &mut store,
        create_test_catalog(),
        activity.activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    request.start_date = Some(String::from("2026-03-08"));
    request.mark_completed = true;
    let result: ApiResult<ActivityResponse> = save_dismantling_setup(
        &mut store,
        create_test_catalog(),
        activity.activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let dismantling = &result.response.activity.dismantling;
    assert_eq!(dismantling.start_date, Some(date!(2026 - 03 - 05)));
    assert_eq!(dismantling.status, PhaseStatus::Completed);
    assert!(dismantling.materials.is_empty());
    assert!(!result.response.capabilities.can_complete_dismantling.is_allowed());
}

#[test]
fn test_assignment_rejects_unknown_phase_and_bad_date() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);

    for (phase, due_date) in [("transport", "2026-04-01"), ("survey", "01/04/2026")] {
        let request: SaveAssignmentRequest = SaveAssignmentRequest {
            phase: phase.to_string(),
            assigned_to: Some(String::from("crew-lead-3")),
            due_date: Some(due_date.to_string()),
        };
        let err: ApiError = save_assignment(
            &mut store,
            create_test_catalog(),
            activity.activity_id,
            &request,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap_err();
        assert_eq!(err.reason(), FailureReason::InvalidInput);
    }
}

#[test]
fn test_assignment_without_due_date_is_missing_field() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);
    let request: SaveAssignmentRequest = SaveAssignmentRequest {
        phase: String::from("survey"),
        assigned_to: Some(String::from("crew-lead-3")),
        due_date: None,
    };

    let err: ApiError = save_assignment(
        &mut store,
        create_test_catalog(),
        activity.activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::MissingField {
            field: String::from("dueDate")
        }
    );
}

// ============================================================================
// Read views
// ============================================================================

#[test]
fn test_materials_view_falls_back_to_survey() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);
    save_two_line_survey(&mut store, activity.activity_id);

    let view: MaterialsResponse =
        get_materials(&mut store, create_test_catalog(), activity.activity_id).unwrap();

    assert_eq!(view.source, MaterialSource::Surveyed);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].surveyed_quantity, Some(10));
    assert_eq!(view.rows[0].remaining_quantity, Some(0));
}

#[test]
fn test_materials_view_shows_dismantled_lines() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);
    save_two_line_survey(&mut store, activity.activity_id);
    let request: SubmitMaterialsRequest = SubmitMaterialsRequest {
        drafts: vec![DraftLineInput {
            material_id: String::from("antenna-1"),
            quantity_dismantled: Some(1),
            condition_after_dismantling: None,
            damage_notes: None,
        }],
        manual: Vec::new(),
    };
    submit_dismantling_materials(
        &mut store,
        create_test_catalog(),
        activity.activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let view: MaterialsResponse =
        get_materials(&mut store, create_test_catalog(), activity.activity_id).unwrap();

    assert_eq!(view.source, MaterialSource::Dismantled);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].quantity, 1);
    assert_eq!(view.rows[0].remaining_quantity, Some(2));
}

#[test]
fn test_audit_timeline_lists_operations() {
    let mut store: FailingStore = FailingStore::new();
    let activity = create_activity(&mut store);
    let request: SaveNotesRequest = SaveNotesRequest {
        notes: String::from("Landlord on site Tuesdays"),
    };
    save_notes(
        &mut store,
        create_test_catalog(),
        activity.activity_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let events: Vec<AuditEventResponse> =
        get_audit_timeline(&mut store, activity.activity_id).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, "CreateActivity");
    assert_eq!(events[1].action, "SaveNotes");
    assert_eq!(events[1].actor_id, "planner-7");
    assert!(events[1].event_id.is_some());

    let err: ApiError = get_audit_timeline(&mut store, ActivityId::new(77)).unwrap_err();
    assert_eq!(err.reason(), FailureReason::NotFound);
}

#[test]
fn test_catalog_lists_every_material() {
    let catalog = create_test_catalog();

    let response: CatalogResponse = get_catalog(&catalog);

    assert_eq!(response.materials.len(), 3);
    assert_eq!(response.materials[2].id, "rru-1");
}
