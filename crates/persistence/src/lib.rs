// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for site decommissioning activities.
//!
//! Each activity is stored as one JSON document in the `activities` table.
//! Every write also appends an audit event, in the same transaction.
//!
//! ## Backend
//!
//! `SQLite` via Diesel. Tests use shared in-memory databases; deployments
//! use a file database in WAL mode. Migrations are embedded and applied
//! when a connection is opened.

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

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use decom::ActivityUpdate;
use decom_audit::{Actor, AuditEvent, Cause};
use decom_domain::{ActivityAggregate, ActivityId};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::ActivityStore;

use backend::sqlite::JournalMode;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite` persistence adapter.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own shared in-memory database, so tests are
    /// isolated from each other.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::open(&shared_memory_url, JournalMode::Default)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open(path_str, JournalMode::Wal)?;
        info!(path = path_str, "File database ready");
        Ok(Self { conn })
    }

    /// Retrieves one audit event by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the event does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }
}

impl ActivityStore for Persistence {
    fn create_activity(
        &mut self,
        site_code: &str,
        actor: &Actor,
        cause: &Cause,
    ) -> Result<ActivityAggregate, PersistenceError> {
        let (activity, event_id): (ActivityAggregate, i64) =
            mutations::create_activity_with_audit(&mut self.conn, site_code, actor, cause)?;
        info!(
            activity_id = activity.activity_id.value(),
            site_code, event_id, "Created activity"
        );
        Ok(activity)
    }

    fn load_activity(
        &mut self,
        activity_id: ActivityId,
    ) -> Result<ActivityAggregate, PersistenceError> {
        queries::activity::load_activity(&mut self.conn, activity_id)
    }

    fn list_activities(&mut self) -> Result<Vec<ActivityAggregate>, PersistenceError> {
        queries::activity::list_activities(&mut self.conn)
    }

    fn update_activity(
        &mut self,
        activity_id: ActivityId,
        update: &ActivityUpdate,
        event: &AuditEvent,
    ) -> Result<ActivityAggregate, PersistenceError> {
        let (activity, _event_id): (ActivityAggregate, i64) =
            mutations::persist_update(&mut self.conn, activity_id, update, event)?;
        Ok(activity)
    }

    fn audit_timeline(
        &mut self,
        activity_id: ActivityId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, activity_id)
    }
}
