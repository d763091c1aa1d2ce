// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::MaterialId;
use thiserror::Error;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field was not supplied.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// The survey cannot change because dismantling has been completed.
    #[error("Survey is locked: dismantling has already been completed")]
    LockedByCompletion,
    /// A material line references an id that is not in the catalog.
    #[error("Material '{0}' is not in the material catalog")]
    UnknownMaterial(MaterialId),
    /// A material id appears more than once in one material list.
    #[error("Material '{0}' appears more than once in the material list")]
    DuplicateMaterial(MaterialId),
    /// A dismantled quantity exceeds the quantity recorded by the survey.
    #[error(
        "Dismantled quantity {dismantled} for material '{material_id}' exceeds surveyed quantity {surveyed}"
    )]
    QuantityExceedsSurvey {
        /// The material whose bound was violated.
        material_id: MaterialId,
        /// The dismantled quantity.
        dismantled: u32,
        /// The surveyed quantity.
        surveyed: u32,
    },
    /// Material id is empty or invalid.
    #[error("Invalid material id: {0}")]
    InvalidMaterialId(String),
    /// Phase status string is not recognised.
    #[error("Invalid phase status: {0}")]
    InvalidPhaseStatus(String),
    /// Work status string is not recognised.
    #[error("Invalid work status: {0}")]
    InvalidWorkStatus(String),
    /// Material condition string is not recognised.
    #[error("Invalid material condition: {0}")]
    InvalidCondition(String),
    /// Phase name is not recognised.
    #[error("Invalid phase: {0}")]
    InvalidPhase(String),
    /// Failed to parse date from string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}
