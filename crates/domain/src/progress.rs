// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display progress for work statuses.
//!
//! The vocabulary includes the trucking values (`loading`, `in-transit`,
//! `unloading`) used by cell-on-wheels work types so that progress bars read
//! the same across subsystems. Phase records here only ever hold
//! `pending`, `in-progress` or `completed`.

use crate::error::DomainError;
use crate::types::PhaseStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status vocabulary shared by progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    NotStarted,
    Pending,
    InProgress,
    Loading,
    InTransit,
    Unloading,
    Completed,
}

impl WorkStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Loading => "loading",
            Self::InTransit => "in-transit",
            Self::Unloading => "unloading",
            Self::Completed => "completed",
        }
    }

    /// Fixed progress percentage for the status.
    #[must_use]
    pub const fn progress_percentage(&self) -> u8 {
        match self {
            Self::NotStarted | Self::Pending => 0,
            Self::Loading => 25,
            Self::InProgress => 50,
            Self::InTransit => 60,
            Self::Unloading => 80,
            Self::Completed => 100,
        }
    }
}

impl From<PhaseStatus> for WorkStatus {
    fn from(status: PhaseStatus) -> Self {
        match status {
            PhaseStatus::Pending => Self::Pending,
            PhaseStatus::InProgress => Self::InProgress,
            PhaseStatus::Completed => Self::Completed,
        }
    }
}

impl FromStr for WorkStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "loading" => Ok(Self::Loading),
            "in-transit" => Ok(Self::InTransit),
            "unloading" => Ok(Self::Unloading),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidWorkStatus(s.to_string())),
        }
    }
}

/// Progress percentage of a phase status.
#[must_use]
pub fn progress_percentage(status: PhaseStatus) -> u8 {
    WorkStatus::from(status).progress_percentage()
}
