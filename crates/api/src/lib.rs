// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for site decommissioning activities.
//!
//! Requests are parsed into domain values here, commands run through the
//! core `apply`, and every successful mutation is written together with its
//! audit event by an `ActivityStore`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod capabilities;
mod error;
mod handlers;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use capabilities::{ActivityCapabilities, Capability};
pub use error::{
    ApiError, FailureReason, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    ApiResult, activity_response, complete_dismantling, create_activity, get_activity,
    get_audit_timeline, get_catalog, get_materials, list_activities, mark_survey_completed,
    save_assignment, save_dismantling_setup, save_notes, save_survey, submit_dismantling_materials,
};
pub use request_response::{
    ActivityResponse, ActivitySummaryResponse, AuditEventResponse, CatalogEntryView,
    CatalogResponse, CreateActivityRequest, DismantlingSetupRequest, DraftLineInput,
    ManualEntryInput, MaterialRowView, MaterialSource, MaterialsResponse, ProgressView,
    SaveAssignmentRequest, SaveNotesRequest, SaveSurveyRequest, SubmitMaterialsRequest,
    SurveyMaterialInput, mode_label,
};
pub use session::{ActivitySession, AssignmentForm, SurveyHeader};
