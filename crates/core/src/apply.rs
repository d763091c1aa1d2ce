// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, DismantlingSetupForm, SurveyForm};
use crate::drafts::{EditBuffer, ManualSelection};
use crate::error::CoreError;
use crate::reconcile::{Reconciliation, clamp_dismantled_to_survey, synthesize_from_survey};
use crate::state::TransitionResult;
use crate::update::ActivityUpdate;
use decom_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use decom_domain::{
    ActivityAggregate, DismantledMaterialLine, DismantlingRecord, DomainError, MaterialCatalog,
    PartyId, Phase, PhaseAssignment, PhaseStatus, SurveyRecord, Timeline,
    next_dismantling_status, normalize_survey_status, report_or_placeholder, resolve_start_date,
    validate_assignment_fields, validate_dismantled_within_survey, validate_survey_materials,
};
use time::{Date, OffsetDateTime};

/// Applies a command to an activity, producing an update and an audit event.
///
/// This function is pure: it never touches storage. The caller persists
/// `update` and `audit_event` together and only then adopts
/// `new_activity`.
///
/// # Arguments
///
/// * `catalog` - The material catalog survey lines are validated against
/// * `activity` - The current activity (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The current instant; its date is used for every date stamp
///
/// # Errors
///
/// Returns an error if:
/// - The survey is locked because dismantling was completed
/// - A survey line references a material outside the catalog, or repeats one
/// - An assignment is missing its assignee or due date
/// - The actor id is blank when an assignment must be stamped with it
/// - The resulting dismantled quantities exceed the surveyed quantities
pub fn apply(
    catalog: &MaterialCatalog,
    activity: &ActivityAggregate,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let today: Date = now.date();
    let name: &'static str = command.name();

    let (update, details): (ActivityUpdate, String) = match command {
        Command::SaveSurvey(form) => save_survey(catalog, activity, form, today)?,
        Command::MarkSurveyCompleted => mark_survey_completed(activity, today)?,
        Command::SaveDismantlingSetup(form) => save_dismantling_setup(activity, form, today),
        Command::SaveAssignment {
            phase,
            assigned_to,
            due_date,
        } => save_assignment(activity, &actor, phase, assigned_to.as_deref(), due_date, now)?,
        Command::SubmitDismantlingMaterials { edits, manual } => {
            submit_dismantling_materials(activity, &edits, &manual, today)
        }
        Command::CompleteDismantling => complete_dismantling(activity, today),
        Command::SaveNotes { notes } => {
            let details: String = format!("Saved notes ({} characters)", notes.chars().count());
            (
                ActivityUpdate {
                    notes: Some(notes),
                    ..ActivityUpdate::default()
                },
                details,
            )
        }
    };

    let new_activity: ActivityAggregate = update.apply_to(activity);
    validate_dismantled_within_survey(&new_activity.survey, &new_activity.dismantling)?;

    let before: StateSnapshot = StateSnapshot::of_activity(activity);
    let after: StateSnapshot = StateSnapshot::of_activity(&new_activity);
    let action: Action = Action::new(String::from(name), Some(details));
    let audit_event: AuditEvent =
        AuditEvent::new(activity.activity_id, actor, cause, action, before, after);

    Ok(TransitionResult {
        update,
        new_activity,
        audit_event,
    })
}

fn ensure_survey_unlocked(activity: &ActivityAggregate) -> Result<(), CoreError> {
    if activity.is_survey_locked() {
        return Err(CoreError::DomainViolation(DomainError::LockedByCompletion));
    }
    Ok(())
}

fn survey_timeline(survey: &SurveyRecord, today: Date) -> Option<Timeline> {
    survey
        .status
        .is_completed()
        .then(|| Timeline::survey_completed(survey.completion_date(today)))
}

fn save_survey(
    catalog: &MaterialCatalog,
    activity: &ActivityAggregate,
    form: SurveyForm,
    today: Date,
) -> Result<(ActivityUpdate, String), CoreError> {
    ensure_survey_unlocked(activity)?;
    validate_survey_materials(catalog, &form.materials)?;

    let survey: SurveyRecord = SurveyRecord {
        status: normalize_survey_status(form.status),
        materials: form.materials,
        report: form.report,
        survey_date: form.survey_date,
    };
    let details: String = format!(
        "Saved survey with {} material(s), status {}",
        survey.materials.len(),
        survey.status
    );
    let timeline: Option<Timeline> = survey_timeline(&survey, today);

    // Lowering a surveyed quantity caps the dismantled line recorded for it
    let existing: &DismantlingRecord = &activity.dismantling;
    let clamped: Vec<DismantledMaterialLine> =
        clamp_dismantled_to_survey(&survey, &existing.materials);
    let dismantling: Option<DismantlingRecord> =
        (clamped != existing.materials).then(|| DismantlingRecord {
            materials: clamped,
            ..existing.clone()
        });

    Ok((
        ActivityUpdate {
            survey: Some(survey),
            dismantling,
            timeline,
            ..ActivityUpdate::default()
        },
        details,
    ))
}

fn mark_survey_completed(
    activity: &ActivityAggregate,
    today: Date,
) -> Result<(ActivityUpdate, String), CoreError> {
    ensure_survey_unlocked(activity)?;

    let survey: SurveyRecord = SurveyRecord {
        status: PhaseStatus::Completed,
        report: report_or_placeholder(&activity.survey.report),
        ..activity.survey.clone()
    };
    let timeline: Option<Timeline> = survey_timeline(&survey, today);

    Ok((
        ActivityUpdate {
            survey: Some(survey),
            timeline,
            ..ActivityUpdate::default()
        },
        String::from("Marked survey completed"),
    ))
}

/// Stamps the dismantling completion milestone unless it already exists.
fn dismantling_timeline(
    activity: &ActivityAggregate,
    status: PhaseStatus,
    today: Date,
) -> Option<Timeline> {
    (status.is_completed() && activity.timeline.dismantling_completion_date.is_none())
        .then(|| Timeline::dismantling_completed(today))
}

fn save_dismantling_setup(
    activity: &ActivityAggregate,
    form: DismantlingSetupForm,
    today: Date,
) -> (ActivityUpdate, String) {
    let existing: &DismantlingRecord = &activity.dismantling;
    let status: PhaseStatus = next_dismantling_status(Some(existing.status), form.mark_completed);

    let dismantling: DismantlingRecord = DismantlingRecord {
        status,
        materials: existing.materials.clone(),
        start_date: Some(resolve_start_date(existing.start_date, form.start_date, today)),
        end_date: form.end_date.or(existing.end_date),
        team_leader: form.team_leader.or_else(|| existing.team_leader.clone()),
        issues_encountered: form.issues_encountered,
    };
    let details: String = format!("Saved dismantling setup, status {status}");

    (
        ActivityUpdate {
            dismantling: Some(dismantling),
            timeline: dismantling_timeline(activity, status, today),
            ..ActivityUpdate::default()
        },
        details,
    )
}

fn save_assignment(
    activity: &ActivityAggregate,
    actor: &Actor,
    phase: Phase,
    assigned_to: Option<&str>,
    due_date: Option<Date>,
    now: OffsetDateTime,
) -> Result<(ActivityUpdate, String), CoreError> {
    let (assigned_to, due_date): (PartyId, Date) =
        validate_assignment_fields(assigned_to, due_date)?;
    let assigned_by: PartyId = actor.party_id()?;

    let details: String = format!("Assigned {phase} to {assigned_to}, due {due_date}");
    let assignment: PhaseAssignment = PhaseAssignment {
        assigned_to,
        assigned_by,
        assigned_date: now,
        due_date,
    };

    Ok((
        ActivityUpdate {
            assign_activity_tasks: Some(
                activity.assign_activity_tasks.with_assignment(phase, assignment),
            ),
            ..ActivityUpdate::default()
        },
        details,
    ))
}

fn submit_dismantling_materials(
    activity: &ActivityAggregate,
    edits: &EditBuffer,
    manual: &ManualSelection,
    today: Date,
) -> (ActivityUpdate, String) {
    let existing: &DismantlingRecord = &activity.dismantling;
    let reconciliation: Reconciliation<'_> = Reconciliation::select(&activity.survey, edits, manual);
    let materials: Vec<DismantledMaterialLine> = reconciliation.finalize(&existing.materials, today);

    let details: String = format!(
        "Submitted {} dismantled material(s) in {} mode",
        materials.len(),
        reconciliation.mode()
    );
    let dismantling: DismantlingRecord = DismantlingRecord {
        status: next_dismantling_status(Some(existing.status), false),
        materials,
        start_date: Some(resolve_start_date(existing.start_date, None, today)),
        ..existing.clone()
    };

    (
        ActivityUpdate {
            dismantling: Some(dismantling),
            ..ActivityUpdate::default()
        },
        details,
    )
}

fn complete_dismantling(activity: &ActivityAggregate, today: Date) -> (ActivityUpdate, String) {
    let existing: &DismantlingRecord = &activity.dismantling;

    let (materials, details): (Vec<DismantledMaterialLine>, String) =
        if existing.materials.is_empty() {
            let synthesized: Vec<DismantledMaterialLine> =
                synthesize_from_survey(&activity.survey, today);
            let details: String = format!(
                "Completed dismantling, auto-filled {} material(s) from survey",
                synthesized.len()
            );
            (synthesized, details)
        } else {
            (
                existing.materials.clone(),
                format!(
                    "Completed dismantling with {} recorded material(s)",
                    existing.materials.len()
                ),
            )
        };

    let dismantling: DismantlingRecord = DismantlingRecord {
        status: PhaseStatus::Completed,
        materials,
        start_date: Some(resolve_start_date(existing.start_date, None, today)),
        ..existing.clone()
    };

    (
        ActivityUpdate {
            dismantling: Some(dismantling),
            timeline: dismantling_timeline(activity, PhaseStatus::Completed, today),
            ..ActivityUpdate::default()
        },
        details,
    )
}
