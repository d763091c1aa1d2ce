// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use decom_domain::{ActivityAggregate, ActivityId};

use crate::data_models::ActivityRow;
use crate::diesel_schema::activities;
use crate::error::PersistenceError;

/// Decodes a stored row into an aggregate.
///
/// The row's key and site code are authoritative over the copies inside
/// the JSON body.
pub fn decode_activity(row: ActivityRow) -> Result<ActivityAggregate, PersistenceError> {
    let mut activity: ActivityAggregate = serde_json::from_str(&row.body_json)?;
    activity.activity_id = ActivityId::new(row.activity_id);
    activity.site_code = row.site_code;
    Ok(activity)
}

/// Loads one activity.
///
/// # Errors
///
/// Returns `ActivityNotFound` if no row exists, or an error if the body
/// cannot be decoded.
pub fn load_activity(
    conn: &mut SqliteConnection,
    activity_id: ActivityId,
) -> Result<ActivityAggregate, PersistenceError> {
    let row: ActivityRow = activities::table
        .filter(activities::activity_id.eq(activity_id.value()))
        .select(ActivityRow::as_select())
        .first::<ActivityRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ActivityNotFound(activity_id.value()))?;

    decode_activity(row)
}

/// Lists all activities, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a body cannot be decoded.
pub fn list_activities(
    conn: &mut SqliteConnection,
) -> Result<Vec<ActivityAggregate>, PersistenceError> {
    let rows: Vec<ActivityRow> = activities::table
        .order(activities::activity_id.asc())
        .select(ActivityRow::as_select())
        .load::<ActivityRow>(conn)?;

    rows.into_iter().map(decode_activity).collect()
}
