// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use decom::ActivityUpdate;
use decom_audit::{Actor, AuditEvent, Cause};
use decom_domain::{ActivityAggregate, ActivityId};

use crate::error::PersistenceError;

/// Storage seam for activity aggregates.
///
/// Writes are partial: `update_activity` replaces only the sub-records
/// present in the update and merges timeline keys. Each write is atomic
/// together with its audit event.
pub trait ActivityStore {
    /// Creates an empty activity for a site.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn create_activity(
        &mut self,
        site_code: &str,
        actor: &Actor,
        cause: &Cause,
    ) -> Result<ActivityAggregate, PersistenceError>;

    /// Loads one activity.
    ///
    /// # Errors
    ///
    /// Returns `ActivityNotFound` if the activity does not exist.
    fn load_activity(&mut self, activity_id: ActivityId)
    -> Result<ActivityAggregate, PersistenceError>;

    /// Lists every activity.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_activities(&mut self) -> Result<Vec<ActivityAggregate>, PersistenceError>;

    /// Applies a partial update and records its audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing is written in that case.
    fn update_activity(
        &mut self,
        activity_id: ActivityId,
        update: &ActivityUpdate,
        event: &AuditEvent,
    ) -> Result<ActivityAggregate, PersistenceError>;

    /// Returns the audit events of one activity in commit order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn audit_timeline(&mut self, activity_id: ActivityId)
    -> Result<Vec<AuditEvent>, PersistenceError>;
}
