// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use decom::CoreError;
use decom_domain::DomainError;
use decom_persistence::PersistenceError;
use serde::Serialize;
use thiserror::Error;

/// The typed reason carried by every failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    MissingField,
    LockedByCompletion,
    InvalidInput,
    NotFound,
    PersistenceError,
}

impl FailureReason {
    /// Returns the string representation of the reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing-field",
            Self::LockedByCompletion => "locked-by-completion",
            Self::InvalidInput => "invalid-input",
            Self::NotFound => "not-found",
            Self::PersistenceError => "persistence-error",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required field was not supplied.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field, as named on the wire.
        field: String,
    },
    /// The survey cannot change because dismantling has been completed.
    #[error("{message}")]
    LockedByCompletion {
        /// A human-readable description.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The store failed; nothing was written.
    #[error("Persistence error: {message}")]
    Persistence {
        /// A description of the store failure.
        message: String,
    },
}

impl ApiError {
    /// The typed failure reason of this error.
    #[must_use]
    pub const fn reason(&self) -> FailureReason {
        match self {
            Self::MissingField { .. } => FailureReason::MissingField,
            Self::LockedByCompletion { .. } => FailureReason::LockedByCompletion,
            Self::InvalidInput { .. } => FailureReason::InvalidInput,
            Self::NotFound { .. } => FailureReason::NotFound,
            Self::Persistence { .. } => FailureReason::PersistenceError,
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingField { field } => ApiError::MissingField {
            field: field.to_string(),
        },
        DomainError::LockedByCompletion => ApiError::LockedByCompletion { message },
        DomainError::UnknownMaterial(_)
        | DomainError::DuplicateMaterial(_)
        | DomainError::QuantityExceedsSurvey { .. }
        | DomainError::InvalidMaterialId(_) => ApiError::InvalidInput {
            field: String::from("materials"),
            message,
        },
        DomainError::InvalidPhaseStatus(_) | DomainError::InvalidWorkStatus(_) => {
            ApiError::InvalidInput {
                field: String::from("status"),
                message,
            }
        }
        DomainError::InvalidCondition(_) => ApiError::InvalidInput {
            field: String::from("condition"),
            message,
        },
        DomainError::InvalidPhase(_) => ApiError::InvalidInput {
            field: String::from("phase"),
            message,
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// A missing activity is a `not-found`; every other store failure is a
/// `persistence-error`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ActivityNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Activity"),
            message: format!("Activity {id} does not exist"),
        },
        other => ApiError::Persistence {
            message: other.to_string(),
        },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}
