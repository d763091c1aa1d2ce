// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod activity;
mod assignment;
mod catalog;
mod dismantling;
mod error;
mod material;
mod progress;
mod survey;
mod timeline;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use activity::ActivityAggregate;
pub use assignment::{AssignmentLedger, PhaseAssignment, validate_assignment_fields};
pub use catalog::{CatalogMaterial, MaterialCatalog};
pub use dismantling::{DismantlingRecord, next_dismantling_status, resolve_start_date};
pub use material::{DismantledMaterialLine, MaterialLine, SurveyMaterialLine, find_line};
pub use progress::{WorkStatus, progress_percentage};
pub use survey::{
    COMPLETED_REPORT_PLACEHOLDER, SurveyRecord, normalize_survey_status, report_or_placeholder,
};
pub use timeline::Timeline;

// Re-export public types
pub use error::DomainError;
pub use types::{
    ActivityId, MaterialCondition, MaterialId, PartyId, Phase, PhaseStatus, parse_date,
};
pub use validation::{
    validate_dismantled_within_survey, validate_survey_materials, validate_unique_materials,
};
