// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use decom_domain::{ActivityAggregate, ActivityId};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::activities;
use crate::error::PersistenceError;

fn timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Inserts a new, empty activity for a site.
///
/// The key is assigned by the database, so the body is written twice: once
/// to obtain the key and once with the key embedded.
pub fn insert_activity(
    conn: &mut SqliteConnection,
    site_code: &str,
) -> Result<ActivityAggregate, PersistenceError> {
    let now: String = timestamp()?;
    diesel::insert_into(activities::table)
        .values((
            activities::site_code.eq(site_code),
            activities::body_json.eq("{}"),
            activities::created_at.eq(&now),
            activities::updated_at.eq(&now),
        ))
        .execute(conn)?;

    let activity_id: ActivityId = ActivityId::new(last_insert_rowid(conn)?);
    let activity: ActivityAggregate = ActivityAggregate::new(activity_id, site_code);
    write_activity(conn, &activity)?;
    Ok(activity)
}

/// Overwrites the stored body of an existing activity.
pub fn write_activity(
    conn: &mut SqliteConnection,
    activity: &ActivityAggregate,
) -> Result<(), PersistenceError> {
    let body_json: String = serde_json::to_string(activity)?;
    let affected: usize = diesel::update(
        activities::table.filter(activities::activity_id.eq(activity.activity_id.value())),
    )
    .set((
        activities::body_json.eq(body_json),
        activities::updated_at.eq(timestamp()?),
    ))
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ActivityNotFound(
            activity.activity_id.value(),
        ));
    }
    Ok(())
}
