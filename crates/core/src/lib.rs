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

mod apply;
mod command;
mod drafts;
mod error;
mod reconcile;
mod state;
mod update;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::{Command, DismantlingSetupForm, SurveyForm};
pub use drafts::{DraftLine, EditBuffer, ManualEntry, ManualSelection, SurveyDraft};
pub use error::CoreError;
pub use reconcile::{
    DisplayMaterials, Reconciliation, ReconciliationMode, clamp_dismantled_to_survey,
    clamp_to_survey, display_materials, effective_quantity, remaining_quantity,
    synthesize_from_survey,
};
pub use state::TransitionResult;
pub use update::ActivityUpdate;
