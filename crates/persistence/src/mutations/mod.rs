// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Every write that changes an activity also writes its audit event, inside
//! one transaction.

pub mod activity;
pub mod audit;

use diesel::{Connection, SqliteConnection};
use decom::ActivityUpdate;
use decom_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use decom_domain::{ActivityAggregate, ActivityId};
use tracing::debug;

use crate::error::PersistenceError;
use crate::queries;

/// Creates an activity and records its creation event.
///
/// # Errors
///
/// Returns an error if either insert fails; nothing is written in that case.
pub fn create_activity_with_audit(
    conn: &mut SqliteConnection,
    site_code: &str,
    actor: &Actor,
    cause: &Cause,
) -> Result<(ActivityAggregate, i64), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let activity: ActivityAggregate = activity::insert_activity(conn, site_code)?;
        let event: AuditEvent = AuditEvent::new(
            activity.activity_id,
            actor.clone(),
            cause.clone(),
            Action::new(
                String::from("CreateActivity"),
                Some(format!("Created activity for site {site_code}")),
            ),
            StateSnapshot::new(String::from("none")),
            StateSnapshot::of_activity(&activity),
        );
        let event_id: i64 = audit::persist_audit_event(conn, &event)?;
        Ok((activity, event_id))
    })
}

/// Applies a partial update to the stored activity and records the event.
///
/// The update is merged into the aggregate as currently stored, so the
/// returned aggregate reflects what the database now holds.
///
/// # Errors
///
/// Returns `ActivityNotFound` if the activity does not exist, or an error if
/// any write fails; nothing is written in that case.
pub fn persist_update(
    conn: &mut SqliteConnection,
    activity_id: ActivityId,
    update: &ActivityUpdate,
    event: &AuditEvent,
) -> Result<(ActivityAggregate, i64), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let current: ActivityAggregate = queries::activity::load_activity(conn, activity_id)?;
        let updated: ActivityAggregate = update.apply_to(&current);
        activity::write_activity(conn, &updated)?;
        let event_id: i64 = audit::persist_audit_event(conn, event)?;
        debug!(
            activity_id = activity_id.value(),
            event_id,
            touched = ?update.touched(),
            "Persisted activity update"
        );
        Ok((updated, event_id))
    })
}
